use super::service::RemoteMemoService;
use crate::{
    error::{MemoError, Result},
    model::{MemoFormData, MemoRow},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use url::Url;

const REST_PREFIX: &str = "rest/v1";

/// Client for a PostgREST-compatible table endpoint.
///
/// Rows live at `{base_url}/rest/v1/{table}`; filters use the PostgREST
/// `column=op.value` query syntax.
pub struct RestMemoService {
    endpoint: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RestMemoService {
    pub fn new(base_url: &str, table: &str, api_key: Option<String>) -> Result<Self> {
        // reqwest is built without a bundled TLS provider; a second install is a no-op.
        let _ = rustls::crypto::ring::default_provider().install_default();

        Ok(Self {
            endpoint: table_endpoint(base_url, table)?,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url_with(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(MemoError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn single_row(&self, request: RequestBuilder, id: Option<&str>) -> Result<MemoRow> {
        let rows: Vec<MemoRow> = self
            .send(request.header("Prefer", "return=representation"))
            .await?
            .json()
            .await?;

        rows.into_iter().next().ok_or_else(|| match id {
            Some(id) => MemoError::NotFound(id.to_string()),
            None => MemoError::Remote {
                status: 200,
                message: "insert returned no row".to_string(),
            },
        })
    }
}

/// Builds `{base_url}/rest/v1/{table}`, tolerating a trailing slash on the base.
pub fn table_endpoint(base_url: &str, table: &str) -> Result<Url> {
    if table.is_empty() || table.contains(['/', '?', '#']) {
        return Err(MemoError::Config(format!("Invalid table name: '{}'", table)));
    }
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    if base.cannot_be_a_base() {
        return Err(MemoError::Config(format!(
            "URL cannot be used as a base: {}",
            base_url
        )));
    }
    Ok(base.join(&format!("{}/{}", REST_PREFIX, table))?)
}

fn eq(id: &str) -> String {
    format!("eq.{}", id)
}

fn neq(id: &str) -> String {
    format!("neq.{}", id)
}

#[async_trait]
impl RemoteMemoService for RestMemoService {
    async fn select_all(&self) -> Result<Vec<MemoRow>> {
        tracing::debug!(endpoint = %self.endpoint, "Selecting all memos");
        let url = self.url_with(&[("select", "*"), ("order", "created_at.desc")]);
        let rows = self.send(self.client.get(url)).await?.json().await?;
        Ok(rows)
    }

    async fn insert(&self, fields: &MemoFormData) -> Result<MemoRow> {
        let request = self.client.post(self.url_with(&[])).json(fields);
        self.single_row(request, None).await
    }

    async fn update(&self, id: &str, fields: &MemoFormData) -> Result<MemoRow> {
        let filter = eq(id);
        let request = self
            .client
            .patch(self.url_with(&[("id", filter.as_str())]))
            .json(fields);
        self.single_row(request, Some(id)).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let filter = eq(id);
        let url = self.url_with(&[("id", filter.as_str())]);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn delete_all_except(&self, sentinel_id: &str) -> Result<()> {
        let filter = neq(sentinel_id);
        let url = self.url_with(&[("id", filter.as_str())]);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::storage::CLEAR_ALL_SENTINEL_ID;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const ROW_JSON: &str = r#"[{"id":"abc","title":"Groceries","content":"milk","category":"personal","tags":null,"created_at":"2024-01-15T10:30:00Z","updated_at":"2024-01-15T10:30:00Z"}]"#;

    /// Serves one canned response and yields the raw request, lowercased.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (base_url, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= head_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_update_sends_patch_with_auth_and_representation() {
        let (base_url, server) = serve_once("200 OK", ROW_JSON).await;
        let service = RestMemoService::new(&base_url, "memos", Some("secret".to_string())).unwrap();

        let form = MemoFormData::new("Groceries").with_content("milk");
        let row = service.update("abc", &form).await.unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.category, Category::Personal);

        let request = server.await.unwrap();
        assert!(request.starts_with("patch /rest/v1/memos?id=eq.abc "));
        assert!(request.contains("prefer: return=representation"));
        assert!(request.contains("apikey: secret"));
        assert!(request.contains("authorization: bearer secret"));
        assert!(request.contains(r#""title":"groceries""#));
    }

    #[tokio::test]
    async fn test_update_with_empty_response_is_not_found() {
        let (base_url, server) = serve_once("200 OK", "[]").await;
        let service = RestMemoService::new(&base_url, "memos", None).unwrap();

        let result = service.update("gone", &MemoFormData::new("Title")).await;
        assert!(matches!(result, Err(MemoError::NotFound(id)) if id == "gone"));

        let request = server.await.unwrap();
        assert!(!request.contains("apikey:"));
    }

    #[tokio::test]
    async fn test_insert_with_empty_response_is_remote_error() {
        let (base_url, server) = serve_once("201 Created", "[]").await;
        let service = RestMemoService::new(&base_url, "memos", None).unwrap();

        let result = service.insert(&MemoFormData::new("Title")).await;
        assert!(matches!(result, Err(MemoError::Remote { .. })));

        let request = server.await.unwrap();
        assert!(request.starts_with("post /rest/v1/memos "));
        assert!(request.contains("prefer: return=representation"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_remote_error() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
        let service = RestMemoService::new(&base_url, "memos", None).unwrap();

        match service.select_all().await {
            Err(MemoError::Remote { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("boom"));
            }
            other => panic!("expected a remote error, got {:?}", other.map(|r| r.len())),
        }

        let request = server.await.unwrap();
        assert!(request.starts_with("get /rest/v1/memos?select=*&order=created_at.desc "));
    }

    #[tokio::test]
    async fn test_clear_deletes_everything_but_the_sentinel() {
        let (base_url, server) = serve_once("204 No Content", "").await;
        let service = RestMemoService::new(&base_url, "memos", Some("secret".to_string())).unwrap();

        service
            .delete_all_except(CLEAR_ALL_SENTINEL_ID)
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with(&format!(
            "delete /rest/v1/memos?id=neq.{} ",
            CLEAR_ALL_SENTINEL_ID
        )));
        assert!(request.contains("authorization: bearer secret"));
    }

    #[test]
    fn test_table_endpoint() {
        let url = table_endpoint("https://example.supabase.co", "memos").unwrap();
        assert_eq!(url.as_str(), "https://example.supabase.co/rest/v1/memos");
    }

    #[test]
    fn test_table_endpoint_trailing_slash() {
        let url = table_endpoint("http://localhost:54321/", "notes").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/rest/v1/notes");
    }

    #[test]
    fn test_table_endpoint_rejects_bad_input() {
        assert!(table_endpoint("not a url", "memos").is_err());
        assert!(table_endpoint("https://example.com", "").is_err());
        assert!(table_endpoint("https://example.com", "memos?x=1").is_err());
    }

    #[test]
    fn test_filter_query_pairs() {
        let service = RestMemoService::new("https://example.com", "memos", None).unwrap();

        let url = service.url_with(&[("id", eq("abc").as_str())]);
        assert_eq!(url.query(), Some("id=eq.abc"));

        let url = service.url_with(&[("select", "*"), ("order", "created_at.desc")]);
        assert_eq!(url.query(), Some("select=*&order=created_at.desc"));

        let url = service.url_with(&[]);
        assert_eq!(url.query(), None);
    }
}
