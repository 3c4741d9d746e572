//! HTTP transport for the gateway API, implemented with curl.
//!
//! Every gateway endpoint is a POST with a JSON body, so the transport
//! exposes exactly that and nothing else.

use crate::error::Result;
use curl::easy::{Easy2, Handler, List, WriteError};

/// Collects the response body as it arrives.
struct BodySink(Vec<u8>);

impl Handler for BodySink {
    fn write(&mut self, data: &[u8]) -> std::result::Result<usize, WriteError> {
        self.0.extend_from_slice(data);
        Ok(data.len())
    }
}

#[derive(Debug)]
pub(crate) struct HttpResponse {
    pub status_code: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convert the response body to a UTF-8 string.
    ///
    /// # Errors
    /// Returns an error if the body is not valid UTF-8.
    pub fn body_string(self) -> Result<String> {
        Ok(String::from_utf8(self.body)?)
    }
}

pub(crate) struct HttpClient {
    curl: Easy2<BodySink>,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let mut curl = Easy2::new(BodySink(Vec::new()));
        curl.timeout(std::time::Duration::from_secs(timeout_secs))?;
        curl.useragent(&format!("tosspay/{}", env!("CARGO_PKG_VERSION")))?;

        Ok(Self { curl })
    }

    /// POST a JSON body and return the response.
    pub fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse> {
        let mut headers = List::new();
        headers.append("Content-Type: application/json")?;
        headers.append("Accept: application/json")?;
        self.curl.http_headers(headers)?;

        self.curl.url(url)?;
        self.curl.post(true)?;
        self.curl.post_field_size(body.len() as u64)?;
        self.curl.post_fields_copy(body)?;

        self.curl.perform()?;

        let status_code = self.curl.response_code()?;
        let sink = self.curl.get_mut();
        let body = std::mem::take(&mut sink.0);

        tracing::debug!(status_code, bytes = body.len(), "gateway response received");

        Ok(HttpResponse { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_string() {
        let response = HttpResponse {
            status_code: 200,
            body: br#"{"code":0}"#.to_vec(),
        };
        assert_eq!(response.body_string().unwrap(), r#"{"code":0}"#);
    }

    #[test]
    fn test_body_string_rejects_invalid_utf8() {
        let response = HttpResponse {
            status_code: 200,
            body: vec![0xff, 0xfe],
        };
        assert!(response.body_string().is_err());
    }
}
