//! Datagram socket lifecycle and receive loop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::net::UnixDatagram;
use tracing::{debug, info, warn};

/// Owns the ingestion socket.
///
/// Binding removes a stale socket file left behind by a crashed prior run; a
/// live bind failure is fatal to the caller since no ingestion is possible
/// without the endpoint. The receive loop itself never terminates on its own:
/// read errors are logged and skipped, malformed payloads are the callback's
/// problem.
pub struct IngestListener {
    socket: UnixDatagram,
    path: PathBuf,
    max_datagram_bytes: usize,
}

impl IngestListener {
    /// Binds the socket at `path`, replacing any stale file.
    pub fn bind<P: AsRef<Path>>(path: P, max_datagram_bytes: usize) -> io::Result<Self> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed stale ingestion socket"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        let socket = UnixDatagram::bind(path)?;
        info!(path = %path.display(), "ingestion socket bound");
        Ok(Self {
            socket,
            path: path.to_path_buf(),
            max_datagram_bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Receives datagrams forever, handing each trimmed line to `handle`.
    ///
    /// Datagrams larger than the configured buffer are truncated, matching
    /// the fixed-size receive discipline of the wire contract. Strictly
    /// sequential: the next datagram is not read until `handle` returns,
    /// which keeps gauge updates free of interleaving.
    pub async fn run<F>(self, mut handle: F) -> io::Result<()>
    where
        F: FnMut(&str),
    {
        let mut buf = vec![0u8; self.max_datagram_bytes];
        loop {
            match self.socket.recv(&mut buf).await {
                Ok(n) => {
                    let text = String::from_utf8_lossy(&buf[..n]);
                    let line = text.trim();
                    if line.is_empty() {
                        continue;
                    }
                    handle(line);
                }
                Err(e) => {
                    warn!(error = %e, "ingestion receive failed, continuing");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Duration};

    async fn recv_one(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("listener did not deliver in time")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn delivers_trimmed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.sock");
        let listener = IngestListener::bind(&path, 1024).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(listener.run(move |line| {
            tx.send(line.to_string()).ok();
        }));

        let client = UnixDatagram::unbound().unwrap();
        client.send_to(b"  Telnet connect 203.0.113.7\n", &path).await.unwrap();
        assert_eq!(recv_one(&mut rx).await, "Telnet connect 203.0.113.7");
    }

    #[tokio::test]
    async fn skips_empty_datagrams() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.sock");
        let listener = IngestListener::bind(&path, 1024).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(listener.run(move |line| {
            tx.send(line.to_string()).ok();
        }));

        let client = UnixDatagram::unbound().unwrap();
        client.send_to(b"   \n", &path).await.unwrap();
        client.send_to(b"MQTT CONNACK", &path).await.unwrap();
        // Only the non-blank datagram arrives.
        assert_eq!(recv_one(&mut rx).await, "MQTT CONNACK");
    }

    #[tokio::test]
    async fn oversized_datagrams_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.sock");
        let listener = IngestListener::bind(&path, 64).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(listener.run(move |line| {
            tx.send(line.to_string()).ok();
        }));

        let payload = format!("UPnP otherHttpRequests GET /{}", "a".repeat(200));
        let client = UnixDatagram::unbound().unwrap();
        client.send_to(payload.as_bytes(), &path).await.unwrap();

        let line = recv_one(&mut rx).await;
        assert_eq!(line.len(), 64);
        assert!(payload.starts_with(&line));
    }

    #[tokio::test]
    async fn rebinds_over_a_stale_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.sock");

        // First bind, then drop without unlinking to simulate a crash.
        let first = IngestListener::bind(&path, 1024).unwrap();
        drop(first);
        assert!(path.exists());

        let second = IngestListener::bind(&path, 1024).unwrap();
        assert_eq!(second.path(), path.as_path());
    }
}
