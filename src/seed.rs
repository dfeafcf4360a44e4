//! First-run sample data.

use crate::{
    error::Result,
    model::{Category, MemoFormData},
    storage::RemoteMemoService,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Populates an empty remote store with [`sample_memos`].
///
/// Only the first call per bootstrapper inserts anything. Two processes racing
/// on the same empty store can still both seed it.
#[derive(Debug, Default)]
pub struct SeedBootstrapper {
    started: AtomicBool,
}

impl SeedBootstrapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_run(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Inserts the sample memos and returns how many were written.
    ///
    /// Stops at the first failed insert; rows written before it stay.
    pub async fn bootstrap<S: RemoteMemoService + ?Sized>(&self, service: &S) -> Result<usize> {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::debug!("Seed already attempted, skipping");
            return Ok(0);
        }

        let samples = sample_memos();
        tracing::info!(count = samples.len(), "Seeding empty memo store");

        let mut inserted = 0;
        for form in &samples {
            service.insert(form).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// One memo per known category plus a couple of extras.
pub fn sample_memos() -> Vec<MemoFormData> {
    vec![
        MemoFormData::new("Welcome to Memos")
            .with_category(Category::Personal)
            .with_content(
                "# Getting started\n\nCreate, edit and delete memos. \
                 Use **search** to match titles, content or tags.",
            )
            .with_tags(tags(&["welcome", "guide"])),
        MemoFormData::new("Weekly team meeting")
            .with_category(Category::Work)
            .with_content("## Agenda\n- Sprint review\n- Q3 roadmap\n- Open questions")
            .with_tags(tags(&["meeting", "q3"])),
        MemoFormData::new("Rust ownership notes")
            .with_category(Category::Study)
            .with_content(
                "Each value has one owner. Borrow with `&` for shared access \
                 and `&mut` for exclusive access.",
            )
            .with_tags(tags(&["rust", "learning"])),
        MemoFormData::new("Habit tracker app")
            .with_category(Category::Idea)
            .with_content("A tiny app that tracks daily habits with streaks and reminders.")
            .with_tags(tags(&["app", "side-project"])),
        MemoFormData::new("Book recommendations")
            .with_category(Category::Other)
            .with_content("- The Pragmatic Programmer\n- Designing Data-Intensive Applications")
            .with_tags(tags(&["books"])),
        MemoFormData::new("Release checklist")
            .with_category(Category::Work)
            .with_content("- [ ] Bump version\n- [ ] Update changelog\n- [ ] Tag release")
            .with_tags(tags(&["release", "checklist"])),
        MemoFormData::new("Markdown notes plugin")
            .with_category(Category::Idea)
            .with_content("Render memo content as markdown with code highlighting.")
            .with_tags(tags(&["markdown", "app"])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryMemoService, Operation};
    use std::collections::HashSet;

    #[test]
    fn test_samples_cover_every_known_category() {
        let samples = sample_memos();
        let categories: HashSet<_> = samples.iter().map(|m| m.category.clone()).collect();
        for category in Category::KNOWN {
            assert!(categories.contains(&category), "missing {}", category);
        }
        assert!(samples.len() > Category::KNOWN.len());
        assert!(samples.iter().all(|m| !m.title.is_empty()));
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let service = InMemoryMemoService::new();
        let seeder = SeedBootstrapper::new();

        let first = seeder.bootstrap(&service).await.unwrap();
        let second = seeder.bootstrap(&service).await.unwrap();

        assert_eq!(first, sample_memos().len());
        assert_eq!(second, 0);
        assert_eq!(service.row_count(), sample_memos().len());
        assert!(seeder.has_run());
    }

    #[tokio::test]
    async fn test_concurrent_bootstrap_inserts_once() {
        let service = InMemoryMemoService::new();
        let seeder = SeedBootstrapper::new();

        let (a, b) = tokio::join!(seeder.bootstrap(&service), seeder.bootstrap(&service));
        assert_eq!(a.unwrap() + b.unwrap(), sample_memos().len());
        assert_eq!(service.calls(Operation::Insert), sample_memos().len());
    }

    #[tokio::test]
    async fn test_bootstrap_stops_at_first_failure() {
        let service = InMemoryMemoService::new();
        service.fail_next(Operation::Insert);

        let seeder = SeedBootstrapper::new();
        assert!(seeder.bootstrap(&service).await.is_err());
        assert_eq!(service.row_count(), 0);
    }
}
