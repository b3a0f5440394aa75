// ============================================================================
// HTTP TRANSPORT - Abstracción de transporte (gloo-net en el navegador)
// ============================================================================

use std::collections::BTreeMap;
use serde::{Serialize, de::DeserializeOwned};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Serialize `body` as JSON and set the content type
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = RequestBody::Json(serde_json::to_string(body)?);
        Ok(self.with_header("Content-Type", "application/json"))
    }

    /// The browser sets the multipart boundary itself, so no content type here
    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(raw) => serde_json::from_str(raw).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// Sends a request and returns whatever status came back. Only a missing
/// response (offline, CORS, DNS) is an error here.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// ============================================================================
// Navegador: gloo-net
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl BrowserTransport {
    fn multipart_form(parts: &[MultipartPart]) -> ClientResult<web_sys::FormData> {
        let form = web_sys::FormData::new()?;
        for part in parts {
            let bag = web_sys::BlobPropertyBag::new();
            bag.set_type(&part.content_type);
            let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(part.bytes.as_slice()));
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &bag)?;
            match &part.filename {
                Some(filename) => form.append_with_blob_and_filename(&part.name, &blob, filename)?,
                None => form.append_with_blob(&part.name, &blob)?,
            }
        }
        Ok(form)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        use gloo_net::http::Request;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Patch => Request::patch(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match &req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(raw) => builder.body(wasm_bindgen::JsValue::from_str(raw)),
            RequestBody::Multipart(parts) => builder.body(Self::multipart_form(parts)?),
        }
        .map_err(|e| ClientError::Network(format!("Request build error: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Tests: respuestas enlatadas
// ============================================================================

#[cfg(test)]
pub use mock::MockTransport;

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    type Key = (HttpMethod, String);

    /// Canned responses keyed by method and URL. Queued responses are served
    /// in order; the last one keeps being served once the queue runs dry.
    /// Unknown routes answer 404.
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<HashMap<Key, VecDeque<ClientResult<HttpResponse>>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, method: HttpMethod, url: &str, response: ClientResult<HttpResponse>) {
            self.responses
                .borrow_mut()
                .entry((method, url.to_string()))
                .or_default()
                .push_back(response);
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
            self.push(method, url, Ok(HttpResponse { status, body: body.to_string().into_bytes() }));
        }

        pub fn mock_text(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.push(method, url, Ok(HttpResponse { status, body: body.as_bytes().to_vec() }));
        }

        pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
            self.push(method, url, Err(ClientError::Network("connection refused".to_string())));
        }

        /// Drop every canned response (requests already recorded are kept)
        pub fn reset_responses(&self) {
            self.responses.borrow_mut().clear();
        }

        pub fn sent(&self, method: HttpMethod, url: &str) -> Vec<HttpRequest> {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .cloned()
                .collect()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    fn not_found() -> ClientResult<HttpResponse> {
        Ok(HttpResponse { status: 404, body: Vec::new() })
    }

    #[async_trait::async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
            let key = (req.method, req.url.clone());
            self.requests.borrow_mut().push(req);

            let mut responses = self.responses.borrow_mut();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
                Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
                None => not_found(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new(HttpMethod::Post, "http://x/a")
            .with_json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.json_body(), Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn response_ok_range() {
        assert!(HttpResponse { status: 204, body: vec![] }.ok());
        assert!(!HttpResponse { status: 302, body: vec![] }.ok());
        assert!(!HttpResponse { status: 500, body: b"boom".to_vec() }.ok());
    }

    #[tokio::test]
    async fn mock_serves_queue_then_repeats_last() {
        let mock = MockTransport::new();
        mock.mock_text(HttpMethod::Get, "http://x/n", 200, "1");
        mock.mock_text(HttpMethod::Get, "http://x/n", 200, "2");

        let first = mock.send(HttpRequest::get("http://x/n")).await.unwrap();
        let second = mock.send(HttpRequest::get("http://x/n")).await.unwrap();
        let third = mock.send(HttpRequest::get("http://x/n")).await.unwrap();
        assert_eq!((first.text(), second.text(), third.text()), ("1".into(), "2".into(), "2".into()));

        let missing = mock.send(HttpRequest::get("http://x/none")).await.unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(mock.request_count(), 4);
    }
}
