use http::StatusCode;
use serde::Serialize;

/// One response per connection. Only 2xx responses carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Option<Vec<u8>>,
}

impl Response {
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self {
                status,
                body: Some(body),
            },
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Success with an empty body.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: Some(Vec::new()),
        }
    }

    /// Status line only.
    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn forbidden() -> Self {
        Self::status(StatusCode::FORBIDDEN)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown")
        )
        .into_bytes();

        match &self.body {
            Some(body) if self.status.is_success() => {
                let header = format!("Content-Length: {}\r\n\r\n", body.len());
                out.extend_from_slice(header.as_bytes());
                out.extend_from_slice(body);
            }
            _ => out.extend_from_slice(b"\r\n"),
        }
        out
    }
}
