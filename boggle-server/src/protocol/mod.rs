use std::io::ErrorKind;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, warn};

pub mod framer;
pub mod handlers;
pub mod response;
pub mod routes;


pub use framer::{Demand, FrameError, FrameState, FramedRequest, RequestFramer};
pub use handlers::RequestDispatcher;
pub use response::Response;
pub use routes::{Operation, RouteTable};

/// Longest request line or header accepted.
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Serve the single request carried by `stream`, then close it. A request
/// that cannot be framed is dropped without a response.
pub async fn handle_connection<S>(
    stream: S,
    dispatcher: &RequestDispatcher,
    max_body_bytes: usize,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);
    let request = match read_request(&mut reader, max_body_bytes).await {
        Ok(request) => request,
        Err(FrameError::Incomplete) => {
            debug!("Client disconnected before completing a request");
            return;
        }
        Err(e) => {
            warn!("Dropping connection: {}", e);
            return;
        }
    };

    let response = dispatcher.dispatch(&request).await;

    let mut stream = reader.into_inner();
    if let Err(e) = stream.write_all(&response.to_bytes()).await {
        warn!("Failed to send response: {}", e);
        return;
    }
    if let Err(e) = stream.shutdown().await {
        debug!("Failed to close connection cleanly: {}", e);
    }
}

/// Drive a [`RequestFramer`] from `reader` until one request is framed.
pub async fn read_request<R>(
    reader: &mut R,
    max_body_bytes: usize,
) -> Result<FramedRequest, FrameError>
where
    R: AsyncBufRead + Unpin,
{
    let mut framer = RequestFramer::new(max_body_bytes);
    let mut demand = Demand::Line;
    let mut line = String::new();

    loop {
        demand = match demand {
            Demand::Line => {
                line.clear();
                let read = (&mut *reader)
                    .take(MAX_LINE_BYTES as u64)
                    .read_line(&mut line)
                    .await?;

                if !line.ends_with('\n') {
                    if read >= MAX_LINE_BYTES {
                        return Err(FrameError::LineTooLong {
                            limit: MAX_LINE_BYTES,
                        });
                    }
                    return Err(FrameError::Incomplete);
                }
                framer.push_line(&line)?
            }
            Demand::Body(length) => {
                let mut body = vec![0; length];
                reader.read_exact(&mut body).await.map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => FrameError::Incomplete,
                    _ => FrameError::Io(e),
                })?;
                framer.push_body(body)?
            }
            Demand::Dispatch(request) => return Ok(request),
        };
    }
}
