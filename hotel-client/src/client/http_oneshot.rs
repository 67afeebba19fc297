// hotel-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory calls (feature "in-process")

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::decode_response;
use super::http::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::upload::UploadFile;

/// Source of multipart boundaries; each request takes the next value
static NEXT_BOUNDARY: AtomicU64 = AtomicU64::new(0x7d1f_0c3a_9b00);

/// Oneshot HTTP client
///
/// Calls the Router through tower's `oneshot`, for a server running in the
/// same process. No sockets are opened.
///
/// # Example
///
/// ```ignore
/// use hotel_client::OneshotHttpClient;
///
/// let client = OneshotHttpClient::new(build_app());
/// let banners: Vec<Banner> = client.get("/api/banners").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn builder(&self, method: Method, path: &str) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let bytes = serde_json::to_vec(body)?;
        self.builder(method, path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn empty_request(&self, method: Method, path: &str) -> ClientResult<Request<Body>> {
        self.builder(method, path)
            .body(Body::empty())
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        decode_response(status, &body)
    }
}

fn boundary_candidate(n: u64) -> String {
    format!("hotel-client-{:016x}", n)
}

/// First boundary from `start` on that does not occur in `bytes`
fn boundary_from(bytes: &[u8], start: u64) -> String {
    let mut n = start;
    loop {
        let boundary = boundary_candidate(n);
        let needle = boundary.as_bytes();
        if !bytes.windows(needle.len()).any(|w| w == needle) {
            return boundary;
        }
        n = n.wrapping_add(1);
    }
}

fn next_boundary(bytes: &[u8]) -> String {
    boundary_from(bytes, NEXT_BOUNDARY.fetch_add(1, Ordering::Relaxed))
}

/// Encode one file as a `multipart/form-data` body
fn multipart_body(file: &UploadFile, boundary: &str) -> Vec<u8> {
    let file_name = file.file_name.replace('"', "%22");
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let request = self.empty_request(Method::GET, path)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let request = self.empty_request(Method::DELETE, path)?;
        self.execute(request).await
    }

    async fn post_file<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        file: &UploadFile,
    ) -> ClientResult<T> {
        let boundary = next_boundary(&file.bytes);
        let request = self
            .builder(Method::POST, path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(multipart_body(file, &boundary)))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_oneshot_round_trip() {
        let router = Router::new().route("/api/ping", get(|| async { axum::Json(vec![1, 2, 3]) }));
        let client = OneshotHttpClient::new(router);
        let values: Vec<u32> = client.get("/api/ping").await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_multipart_body_layout() {
        let file = UploadFile::new("lobby.png", b"PNG".to_vec());
        let boundary = next_boundary(&file.bytes);
        let body = String::from_utf8(multipart_body(&file, &boundary)).unwrap();
        assert!(body.starts_with(&format!("--{}\r\n", boundary)));
        assert!(body.contains("name=\"file\"; filename=\"lobby.png\""));
        assert!(body.contains("Content-Type: image/png\r\n\r\nPNG\r\n"));
        assert!(body.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn test_boundary_avoids_file_contents() {
        let mut bytes = b"\x89PNG--".to_vec();
        bytes.extend_from_slice(boundary_candidate(41).as_bytes());
        bytes.extend_from_slice(boundary_candidate(42).as_bytes());

        assert_eq!(boundary_from(&bytes, 41), boundary_candidate(43));
        assert_eq!(boundary_from(b"plain", 41), boundary_candidate(41));
    }

    #[tokio::test]
    async fn test_upload_of_file_containing_boundary() {
        use axum::extract::Multipart;
        use axum::routing::post;

        async fn echo(mut multipart: Multipart) -> axum::Json<usize> {
            let field = multipart.next_field().await.unwrap().unwrap();
            axum::Json(field.bytes().await.unwrap().len())
        }

        // payload containing the boundaries the next requests would pick
        let next = NEXT_BOUNDARY.load(Ordering::Relaxed);
        let mut bytes = Vec::new();
        for n in next..next + 4 {
            bytes.extend_from_slice(format!("\r\n--{}\r\n", boundary_candidate(n)).as_bytes());
        }
        bytes.extend_from_slice(&[0u8; 32]);
        let expected = bytes.len();

        let client = OneshotHttpClient::new(Router::new().route("/api/upload", post(echo)));
        let file = UploadFile::new("tricky.png", bytes);
        let len: usize = client.post_file("/api/upload", &file).await.unwrap();
        assert_eq!(len, expected);
    }
}
