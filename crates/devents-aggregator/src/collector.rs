//! Event source seam.
//!
//! The dispatch loop consumes channels, not a concrete producer. A
//! `Collector` owns the send side of both channels and drops them to
//! signal end of input; platform pollers living in other crates implement
//! the same trait against `devents-core` types.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use devents_core::error::DeventsError;
use devents_core::Event;

#[async_trait]
pub trait Collector: Send {
    /// Produce events until the source is exhausted. Non-fatal faults are
    /// reported through `errors` and production continues where possible.
    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<Event>,
        errors: mpsc::Sender<DeventsError>,
    );
}

/// Reads one JSON event per line from stdin.
///
/// Blank lines are skipped; lines that fail to decode are reported through
/// the error channel and skipped. EOF or a read error ends the stream.
#[derive(Debug, Default)]
pub struct StdinCollector;

#[async_trait]
impl Collector for StdinCollector {
    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<Event>,
        errors: mpsc::Sender<DeventsError>,
    ) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Event>(line) {
                        Ok(ev) => {
                            if events.send(ev).await.is_err() {
                                // consumer gone
                                return;
                            }
                        }
                        Err(e) => {
                            let _ = errors
                                .send(DeventsError::Source(format!("bad event line: {e}")))
                                .await;
                        }
                    }
                }
                Ok(None) => return, // EOF
                Err(e) => {
                    let _ = errors
                        .send(DeventsError::Source(format!("stdin read failed: {e}")))
                        .await;
                    return;
                }
            }
        }
    }
}
