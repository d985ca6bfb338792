//! Per-connection request framing.
//!
//! The framer is fed one line at a time until the headers end, then at most
//! one body of the announced length. It never touches a socket; the caller
//! reads whatever [`Demand`] asks for next.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("connection closed before the request was complete")]
    Incomplete,

    #[error("request line or header exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("request body of {length} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { length: usize, limit: usize },

    #[error("expected a body of {expected} bytes, got {actual}")]
    BodyLength { expected: usize, actual: usize },

    #[error("input delivered after the request was framed")]
    AlreadyFramed,

    #[error("I/O error while framing: {0}")]
    Io(#[from] std::io::Error),
}

/// A complete request: the request line and its raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedRequest {
    pub request_line: String,
    pub body: Vec<u8>,
}

/// What the framer needs next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Demand {
    Line,
    Body(usize),
    Dispatch(FramedRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameState {
    AwaitingRequestLine,
    AwaitingHeaders {
        request_line: String,
        content_length: usize,
    },
    AwaitingBody {
        request_line: String,
        length: usize,
    },
    Framed,
}

#[derive(Debug)]
pub struct RequestFramer {
    state: FrameState,
    max_body_bytes: usize,
}

impl RequestFramer {
    pub fn new(max_body_bytes: usize) -> Self {
        Self {
            state: FrameState::AwaitingRequestLine,
            max_body_bytes,
        }
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Feed one line, with or without its trailing line break.
    pub fn push_line(&mut self, line: &str) -> Result<Demand, FrameError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let blank = line.trim().is_empty();

        match std::mem::replace(&mut self.state, FrameState::Framed) {
            FrameState::AwaitingRequestLine => {
                // Stray blank lines before the request line are skipped
                self.state = if blank {
                    FrameState::AwaitingRequestLine
                } else {
                    FrameState::AwaitingHeaders {
                        request_line: line.to_string(),
                        content_length: 0,
                    }
                };
                Ok(Demand::Line)
            }
            FrameState::AwaitingHeaders {
                request_line,
                content_length,
            } if !blank => {
                self.state = FrameState::AwaitingHeaders {
                    request_line,
                    content_length: parse_content_length(line).unwrap_or(content_length),
                };
                Ok(Demand::Line)
            }
            FrameState::AwaitingHeaders {
                request_line,
                content_length: 0,
            } => Ok(Demand::Dispatch(FramedRequest {
                request_line,
                body: Vec::new(),
            })),
            FrameState::AwaitingHeaders {
                request_line,
                content_length,
            } => {
                if content_length > self.max_body_bytes {
                    return Err(FrameError::BodyTooLarge {
                        length: content_length,
                        limit: self.max_body_bytes,
                    });
                }
                self.state = FrameState::AwaitingBody {
                    request_line,
                    length: content_length,
                };
                Ok(Demand::Body(content_length))
            }
            state @ (FrameState::AwaitingBody { .. } | FrameState::Framed) => {
                self.state = state;
                Err(FrameError::AlreadyFramed)
            }
        }
    }

    /// Feed the body requested by [`Demand::Body`].
    pub fn push_body(&mut self, body: Vec<u8>) -> Result<Demand, FrameError> {
        match std::mem::replace(&mut self.state, FrameState::Framed) {
            FrameState::AwaitingBody {
                request_line,
                length,
            } => {
                if body.len() != length {
                    return Err(FrameError::BodyLength {
                        expected: length,
                        actual: body.len(),
                    });
                }
                Ok(Demand::Dispatch(FramedRequest { request_line, body }))
            }
            state => {
                self.state = state;
                Err(FrameError::AlreadyFramed)
            }
        }
    }
}

/// `Some(length)` if `line` is a Content-Length header. A malformed value
/// counts as zero.
/// The value of a `Content-Length` header line. Anything but plain decimal
/// digits counts as no body.
fn parse_content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }

    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Some(0);
    }
    Some(value.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framer() -> RequestFramer {
        RequestFramer::new(1024)
    }

    #[test]
    fn test_request_without_body() {
        let mut framer = framer();
        assert_eq!(
            framer.push_line("GET /games/1 HTTP/1.1\r\n").unwrap(),
            Demand::Line
        );
        assert!(matches!(framer.state(), FrameState::AwaitingHeaders { .. }));
        assert_eq!(framer.push_line("Host: localhost\r\n").unwrap(), Demand::Line);

        match framer.push_line("\r\n").unwrap() {
            Demand::Dispatch(request) => {
                assert_eq!(request.request_line, "GET /games/1 HTTP/1.1");
                assert!(request.body.is_empty());
            }
            other => panic!("Expected dispatch, got {:?}", other),
        }
        assert_eq!(framer.state(), &FrameState::Framed);
    }

    #[test]
    fn test_request_with_body() {
        let mut framer = framer();
        framer.push_line("POST /users HTTP/1.1").unwrap();
        framer.push_line("content-LENGTH:  14 ").unwrap();
        assert_eq!(framer.push_line("").unwrap(), Demand::Body(14));
        assert!(matches!(
            framer.state(),
            FrameState::AwaitingBody { length: 14, .. }
        ));

        let body = br#"{"Nickname":1}"#.to_vec();
        match framer.push_body(body.clone()).unwrap() {
            Demand::Dispatch(request) => {
                assert_eq!(request.request_line, "POST /users HTTP/1.1");
                assert_eq!(request.body, body);
            }
            other => panic!("Expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let mut framer = framer();
        framer.push_line("\r\n").unwrap();
        framer.push_line("   \r\n").unwrap();
        assert_eq!(framer.state(), &FrameState::AwaitingRequestLine);

        framer.push_line("PUT /games HTTP/1.1\r\n").unwrap();
        assert!(matches!(framer.state(), FrameState::AwaitingHeaders { .. }));
    }

    #[test]
    fn test_malformed_content_length_means_no_body() {
        for header in [
            "Content-Length: lots",
            "Content-Length",
            "Content-Length:",
            "Content-Length: +5",
            "Content-Length: -5",
            "Content-Length: 5 5",
        ] {
            let mut framer = framer();
            framer.push_line("POST /games HTTP/1.1").unwrap();
            framer.push_line(header).unwrap();
            assert!(matches!(framer.push_line("").unwrap(), Demand::Dispatch(_)));
        }
    }

    #[test]
    fn test_last_content_length_wins() {
        let mut framer = framer();
        framer.push_line("POST /games HTTP/1.1").unwrap();
        framer.push_line("Content-Length: 10").unwrap();
        framer.push_line("X-Content-Length: 99").unwrap();
        framer.push_line("Content-Length: 3").unwrap();
        assert_eq!(framer.push_line("").unwrap(), Demand::Body(3));
    }

    #[test]
    fn test_body_too_large() {
        let mut framer = RequestFramer::new(8);
        framer.push_line("POST /games HTTP/1.1").unwrap();
        framer.push_line("Content-Length: 9").unwrap();
        assert!(matches!(
            framer.push_line(""),
            Err(FrameError::BodyTooLarge { length: 9, limit: 8 })
        ));
    }

    #[test]
    fn test_wrong_body_length() {
        let mut framer = framer();
        framer.push_line("POST /games HTTP/1.1").unwrap();
        framer.push_line("Content-Length: 4").unwrap();
        framer.push_line("").unwrap();
        assert!(matches!(
            framer.push_body(b"abc".to_vec()),
            Err(FrameError::BodyLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_input_out_of_order() {
        let mut framer = framer();
        assert!(matches!(
            framer.push_body(Vec::new()),
            Err(FrameError::AlreadyFramed)
        ));
        assert_eq!(framer.state(), &FrameState::AwaitingRequestLine);

        framer.push_line("GET /games/1 HTTP/1.1").unwrap();
        framer.push_line("").unwrap();
        assert!(matches!(
            framer.push_line("GET /games/2 HTTP/1.1"),
            Err(FrameError::AlreadyFramed)
        ));
    }
}
