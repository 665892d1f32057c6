// Authenticated Twitter REST v1.1 client.
//
// A thin reqwest wrapper: every request is signed with OAuth 1.0a and
// non-success responses are classified into `GraphError`. Nothing is sent at
// construction time, so rejected credentials surface on the first call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::GraphError;
use super::models::{Account, UserPage};
use super::oauth::{self, Credentials};
use super::traits::SocialGraph;

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com";

const FRIENDS_LIST: &str = "1.1/friends/list.json";
const FOLLOWERS_LIST: &str = "1.1/followers/list.json";
const FRIENDSHIPS_DESTROY: &str = "1.1/friendships/destroy.json";

/// Request-signing client for one account.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl TwitterClient {
    /// Build a client for `base_url` (normally [`DEFAULT_API_URL`]).
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("twittquilibrium/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Send a signed request and deserialize the JSON response.
    ///
    /// `path` is relative to the base URL (e.g. `1.1/friends/list.json`).
    /// `params` go in the query string and are covered by the signature.
    async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, GraphError> {
        let url = format!("{}/{}", self.base_url, path);
        let endpoint = path.trim_start_matches("1.1/").trim_end_matches(".json");

        let auth = oauth::authorization_header(&self.credentials, method.as_str(), &url, params);

        debug!(endpoint = endpoint, method = %method, "Signed API request");

        let response = self
            .client
            .request(method, &url)
            .query(params)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|source| GraphError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| GraphError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(GraphError::from_response(endpoint, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| GraphError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Fetch one page of a cursored listing.
    ///
    /// A cursor of 0 is the API's end-of-list marker, so it is never sent;
    /// leaving `cursor` out requests the first page.
    async fn list_page(&self, path: &str, page_size: u32, cursor: i64) -> Result<UserPage> {
        let count = page_size.to_string();
        let cursor_param = cursor.to_string();

        let mut params = vec![("count", count.as_str())];
        if cursor != 0 {
            params.push(("cursor", cursor_param.as_str()));
        }
        params.push(("skip_status", "true"));
        params.push(("include_user_entities", "false"));

        let page = self.signed_request(Method::GET, path, &params).await?;
        Ok(page)
    }
}

#[async_trait]
impl SocialGraph for TwitterClient {
    async fn list_followed(&self, page_size: u32, cursor: i64) -> Result<UserPage> {
        self.list_page(FRIENDS_LIST, page_size, cursor).await
    }

    async fn list_followers(&self, page_size: u32, cursor: i64) -> Result<UserPage> {
        self.list_page(FOLLOWERS_LIST, page_size, cursor).await
    }

    async fn destroy_friendship(&self, handle: &str, id: u64) -> Result<Account> {
        let id = id.to_string();
        let account = self
            .signed_request(
                Method::POST,
                FRIENDSHIPS_DESTROY,
                &[("screen_name", handle), ("user_id", id.as_str())],
            )
            .await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const EMPTY_PAGE: &str = r#"{"users": [], "next_cursor": 0}"#;

    /// Accept one connection, answer it with `body`, and return the request line.
    async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let head = String::from_utf8_lossy(&buf[..read]).to_string();

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            head.lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    fn client(base_url: &str) -> TwitterClient {
        TwitterClient::new(Credentials::new("t", "ts", "c", "cs"), base_url).unwrap()
    }

    #[tokio::test]
    async fn test_first_followed_page_omits_cursor() {
        let (base_url, server) = serve_once(EMPTY_PAGE).await;

        let page = client(&base_url).list_followed(200, 0).await.unwrap();
        let request_line = server.await.unwrap();

        assert!(page.users.is_empty());
        assert!(
            request_line.starts_with("GET /1.1/friends/list.json?count=200&"),
            "unexpected request line: {request_line}"
        );
        assert!(
            !request_line.contains("cursor="),
            "unexpected request line: {request_line}"
        );
    }

    #[tokio::test]
    async fn test_followers_and_later_pages_send_cursor() {
        let (base_url, server) = serve_once(EMPTY_PAGE).await;
        client(&base_url).list_followers(200, -1).await.unwrap();
        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /1.1/followers/list.json?"));
        assert!(request_line.contains("cursor=-1"), "{request_line}");

        let (base_url, server) = serve_once(EMPTY_PAGE).await;
        client(&base_url)
            .list_followed(200, 1489467234237774933)
            .await
            .unwrap();
        let request_line = server.await.unwrap();
        assert!(
            request_line.contains("cursor=1489467234237774933"),
            "{request_line}"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let creds = Credentials::new("t", "ts", "c", "cs");
        let client = TwitterClient::new(creds, "http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let creds = Credentials::new("t", "ts", "c", "cs");
        let client = TwitterClient::new(creds, "http://127.0.0.1:9").unwrap();
        let err = client.list_followed(200, 0).await.unwrap_err();
        let graph_err = err.downcast_ref::<GraphError>().expect("typed error");
        assert!(matches!(graph_err, GraphError::Transport { .. }));
    }
}
