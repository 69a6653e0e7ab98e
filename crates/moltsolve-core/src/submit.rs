//! Verification endpoint client
//!
//! One blocking POST per answer. Failures are reported back to the caller,
//! never retried.

use crate::config::ApiOptions;
use crate::decode::Answer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("API key is empty")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Verification request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Verification endpoint returned {status} with a non-JSON body: {body}")]
    InvalidResponse { status: u16, body: String },
}

/// Body of `POST /verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest<'a> {
    pub verification_code: &'a str,
    pub answer: Answer,
}

/// What the endpoint sends back; unknown fields are kept for display
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VerifyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VerifyResponse {
    /// Local stand-in for a submission that never got a usable reply
    pub fn from_error(error: &SubmitError) -> Self {
        Self {
            success: false,
            message: Some(error.to_string()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Blocking client for the verification API
pub struct VerifyClient {
    client: reqwest::blocking::Client,
    verify_url: String,
}

impl VerifyClient {
    pub fn new(options: &ApiOptions) -> Result<Self, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(SubmitError::Client)?;

        Ok(Self {
            client,
            verify_url: format!("{}/verify", options.base_url.trim_end_matches('/')),
        })
    }

    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }

    /// Send one answer for a verification code
    pub fn submit(
        &self,
        api_key: &str,
        verification_code: &str,
        answer: Answer,
    ) -> Result<VerifyResponse, SubmitError> {
        if api_key.trim().is_empty() {
            return Err(SubmitError::MissingApiKey);
        }

        let request = VerifyRequest {
            verification_code,
            answer,
        };
        tracing::info!("Submitting answer {} to {}", answer, self.verify_url);

        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|source| SubmitError::Request {
                url: self.verify_url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|source| SubmitError::Request {
            url: self.verify_url.clone(),
            source,
        })?;

        let parsed: VerifyResponse = serde_json::from_str(&body)
            .map_err(|_| SubmitError::InvalidResponse { status, body })?;

        tracing::debug!("Verification response ({}): {:?}", status, parsed);
        Ok(parsed)
    }

    /// Like [`submit`](Self::submit), but folds failures into an unsuccessful
    /// response
    pub fn submit_outcome(&self, api_key: &str, verification_code: &str, answer: Answer) -> VerifyResponse {
        match self.submit(api_key, verification_code, answer) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                VerifyResponse::from_error(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one HTTP response on a local port and hand back the raw request
    fn one_shot_server(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body_buf = vec![0u8; content_length];
            reader.read_exact(&mut body_buf).unwrap();
            head.push_str(&String::from_utf8_lossy(&body_buf));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(head).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    fn options(base_url: String) -> ApiOptions {
        ApiOptions {
            base_url,
            api_key: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_request_body() {
        let request = VerifyRequest {
            verification_code: "abc",
            answer: Answer::new(35.0),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "verification_code": "abc", "answer": "35.00" })
        );
    }

    #[test]
    fn test_verify_url_trailing_slash() {
        let client = VerifyClient::new(&options("https://example.com/api/v1/".into())).unwrap();
        assert_eq!(client.verify_url(), "https://example.com/api/v1/verify");
    }

    #[test]
    fn test_response_keeps_extra_fields() {
        let response: VerifyResponse =
            serde_json::from_str(r#"{"success":true,"message":"ok","karma":3}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("ok"));
        assert_eq!(response.extra.get("karma"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_submit_success() {
        let (url, rx) = one_shot_server("200 OK", r#"{"success":true,"message":"verified"}"#);
        let client = VerifyClient::new(&options(url)).unwrap();

        let response = client.submit("secret", "code-1", Answer::new(35.0)).unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("verified"));

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /verify "));
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(raw.contains(r#""answer":"35.00""#));
        assert!(raw.contains(r#""verification_code":"code-1""#));
    }

    #[test]
    fn test_submit_rejected_answer() {
        let (url, _rx) = one_shot_server("400 Bad Request", r#"{"success":false,"message":"wrong"}"#);
        let client = VerifyClient::new(&options(url)).unwrap();

        let response = client.submit("secret", "code-1", Answer::new(1.0)).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("wrong"));
    }

    #[test]
    fn test_submit_non_json_body() {
        let (url, _rx) = one_shot_server("502 Bad Gateway", "upstream down");
        let client = VerifyClient::new(&options(url)).unwrap();

        let err = client.submit("secret", "code-1", Answer::new(1.0)).unwrap_err();
        assert!(matches!(err, SubmitError::InvalidResponse { status: 502, .. }));
    }

    #[test]
    fn test_unreachable_endpoint_is_unsuccessful() {
        // Bind then drop so the port is very likely closed
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = VerifyClient::new(&options(format!("http://127.0.0.1:{}", port))).unwrap();

        let response = client.submit_outcome("secret", "code-1", Answer::new(1.0));
        assert!(!response.success);
        assert!(response.message.is_some());
    }

    #[test]
    fn test_empty_api_key() {
        let client = VerifyClient::new(&options("http://127.0.0.1:1".into())).unwrap();
        let err = client.submit(" ", "code-1", Answer::new(1.0)).unwrap_err();
        assert!(matches!(err, SubmitError::MissingApiKey));
    }
}
