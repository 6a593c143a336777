//! Stream-based data source.
//!
//! Receives throughput snapshots from an async byte stream. This covers
//! the live case: a broker-side agent pushes newline-delimited JSON
//! snapshots over TCP and the TUI follows along.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use super::{decode_snapshot, decode_snapshot_bytes, DataSource, ThroughputSnapshot};

/// A data source that receives throughput snapshots from an async stream.
///
/// Spawns a background task that reads newline-delimited JSON from the
/// provided reader and makes snapshots available via `poll()`. Each line
/// is one complete snapshot array.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use brokerwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"[]\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<ThroughputSnapshot>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
    /// Copy of the shared error refreshed on poll, so `error()` can hand
    /// out a plain reference.
    error_cache: Option<String>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// The reader must yield newline-delimited JSON snapshot arrays.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF
                        *error_handle.lock().unwrap() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => match decode_snapshot(line.trim()) {
                        Ok(snapshot) => {
                            *error_handle.lock().unwrap() = None;
                            if tx.send(snapshot).await.is_err() {
                                // Receiver dropped
                                break;
                            }
                        }
                        Err(e) => {
                            // Malformed line: report and keep reading
                            *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                        }
                    },
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
            error_cache: None,
        }
    }

    /// Create a StreamSource from a raw bytes channel.
    ///
    /// Useful when another transport (a websocket client, a message bus
    /// consumer) already delivers whole JSON payloads.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, snapshot_rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                match decode_snapshot_bytes(&bytes) {
                    Ok(snapshot) => {
                        *error_handle.lock().unwrap() = None;
                        if tx.send(snapshot).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                    }
                }
            }
        });

        Self {
            receiver: snapshot_rx,
            description: format!("stream: {}", description),
            last_error,
            error_cache: None,
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<ThroughputSnapshot> {
        self.error_cache = self.last_error.lock().unwrap().clone();

        match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if self.error_cache.is_none() {
                    self.error_cache = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.error_cache.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_json() -> &'static str {
        r#"[{"name":"total","read":2048.0,"write":4096.0}]"#
    }

    #[tokio::test]
    async fn test_stream_source_spawn() {
        let data = format!("{}\n", sample_json());
        let cursor = Cursor::new(data);

        let mut source = StreamSource::spawn(cursor, "test");

        // Give the background task time to process
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot[0].name, "total");
    }

    #[tokio::test]
    async fn test_stream_source_multiple_snapshots() {
        let data = format!("{}\n{}\n", sample_json(), sample_json());
        let cursor = Cursor::new(data);

        let mut source = StreamSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_some());
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_stream_source_description() {
        let cursor = Cursor::new("");
        let source = StreamSource::spawn(cursor, "tcp://localhost:9000");
        assert_eq!(source.description(), "stream: tcp://localhost:9000");
    }

    #[tokio::test]
    async fn test_stream_source_from_bytes_channel() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(16);
        let mut source = StreamSource::from_bytes_channel(rx, "test-channel");

        tx.send(sample_json().as_bytes().to_vec()).await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn test_stream_source_invalid_line_is_soft() {
        let data = "not valid json\n";
        let cursor = Cursor::new(data);

        let mut source = StreamSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        // No snapshot arrives; the error surfaces on the next poll.
        // It may already read "Connection closed" once EOF follows the
        // bad line, so just require that some error is reported.
        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }

    #[tokio::test]
    async fn test_stream_source_empty_stream() {
        let cursor = Cursor::new("");
        let mut source = StreamSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_none());
    }
}
