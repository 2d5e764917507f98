//! Background media worker and the persistence gateway.
//!
//! One worker thread owns the three slow operations: file ingestion, video
//! poster derivation (both via [`crate::ingest`]) and the save-block POST.
//! Requests flow in over a channel, completions flow back as events the UI
//! drains at the top of each frame. Completions address blocks by stable id,
//! so one that lands after the user navigated away still applies safely.
//!
//! A second save for the same block issued before the first resolves is
//! neither queued nor deduplicated.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::ingest::{self, IngestError};
use crate::media::{CollectionBlock, MediaItem};

const SAVE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway error: {0}")]
    Gateway(String),
}

/// The persistence gateway: one operation, save the full serialized block.
/// Success or failure is the only observable result; the last full write
/// wins at the gateway.
pub trait BlockSink: Send {
    fn save_block(&self, block: &CollectionBlock) -> Result<(), SaveError>;
}

/// Production sink: POST `<base_url>/updateBlock/<blockId>` with the block
/// as JSON.
pub struct HttpSink {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSink {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(SAVE_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                log::warn!("http client builder failed ({err}); saves run without a timeout");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl BlockSink for HttpSink {
    fn save_block(&self, block: &CollectionBlock) -> Result<(), SaveError> {
        let url = format!("{}/updateBlock/{}", self.base_url, block.id);
        let response = self.client.post(url).json(block).send()?;
        if !response.status().is_success() {
            return Err(SaveError::Gateway(format!(
                "server answered {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Whether an upload lands in the media list or replaces the cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadTarget {
    Slide,
    Cover,
}

pub enum WorkerRequest {
    IngestFile {
        block_id: String,
        target: UploadTarget,
        path: PathBuf,
    },
    SaveBlock {
        block: CollectionBlock,
    },
}

pub enum WorkerEvent {
    Ingested {
        block_id: String,
        target: UploadTarget,
        item: MediaItem,
        preview: Option<egui::ColorImage>,
    },
    IngestFailed {
        block_id: String,
        error: IngestError,
    },
    Saved {
        block_id: String,
        result: Result<(), SaveError>,
    },
}

pub struct MediaWorker {
    request_tx: Sender<WorkerRequest>,
    event_rx: Receiver<WorkerEvent>,
    _handle: JoinHandle<()>,
}

impl MediaWorker {
    /// Spawns the worker thread. Each completed request pokes the egui
    /// context so the next frame drains the event promptly.
    pub fn spawn(sink: Box<dyn BlockSink>, ctx: egui::Context) -> Self {
        let (request_tx, request_rx) = channel::<WorkerRequest>();
        let (event_tx, event_rx) = channel::<WorkerEvent>();

        let handle = std::thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let event = handle_request(request, sink.as_ref());
                if event_tx.send(event).is_err() {
                    break;
                }
                ctx.request_repaint();
            }
        });

        Self {
            request_tx,
            event_rx,
            _handle: handle,
        }
    }

    pub fn submit(&self, request: WorkerRequest) {
        if self.request_tx.send(request).is_err() {
            log::error!("media worker is gone; request dropped");
        }
    }

    /// Drains all completions that arrived since the previous frame.
    pub fn poll_events(&self) -> Vec<WorkerEvent> {
        self.event_rx.try_iter().collect()
    }
}

fn handle_request(request: WorkerRequest, sink: &dyn BlockSink) -> WorkerEvent {
    match request {
        WorkerRequest::IngestFile {
            block_id,
            target,
            path,
        } => match ingest::ingest_file(&path) {
            Ok((mut item, preview)) => {
                if target == UploadTarget::Cover {
                    item.id = format!("cover-{}", Uuid::new_v4());
                }
                WorkerEvent::Ingested {
                    block_id,
                    target,
                    item,
                    preview,
                }
            }
            Err(error) => {
                log::error!("ingest failed: {error}");
                WorkerEvent::IngestFailed { block_id, error }
            }
        },
        WorkerRequest::SaveBlock { block } => {
            let block_id = block.id.clone();
            let result = sink.save_block(&block);
            if let Err(err) = &result {
                log::error!("saving {block_id} failed: {err}");
            }
            WorkerEvent::Saved { block_id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GalleryStore;
    use std::sync::{Arc, Mutex};

    /// Records every saved block id; fails on demand.
    struct RecordingSink {
        saved: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new(fail: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
            let saved = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    saved: saved.clone(),
                    fail,
                },
                saved,
            )
        }
    }

    impl BlockSink for RecordingSink {
        fn save_block(&self, block: &CollectionBlock) -> Result<(), SaveError> {
            self.saved.lock().unwrap().push(block.id.clone());
            if self.fail {
                Err(SaveError::Gateway("injected failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn http_sink_normalizes_the_base_url() {
        let sink = HttpSink::new("http://localhost:3000/api/");
        assert_eq!(sink.base_url, "http://localhost:3000/api");
    }

    #[test]
    fn successful_save_clears_only_the_saved_block() {
        let mut store = GalleryStore::seeded(2, 1);
        let first = store.blocks()[0].id.clone();
        let second = store.blocks()[1].id.clone();
        store.add_slide(&first).unwrap();
        store.add_slide(&second).unwrap();

        let (sink, saved) = RecordingSink::new(false);
        let block = store.block(&first).unwrap().clone();
        let event = handle_request(WorkerRequest::SaveBlock { block }, &sink);

        match event {
            WorkerEvent::Saved { block_id, result } => {
                assert_eq!(block_id, first);
                store.apply_save_result(&block_id, result.is_ok());
            }
            _ => panic!("expected a save completion"),
        }

        assert_eq!(saved.lock().unwrap().as_slice(), [first.clone()]);
        assert!(!store.is_dirty(&first));
        assert!(store.is_dirty(&second));
    }

    #[test]
    fn failed_save_keeps_the_dirty_flag_for_retry() {
        let mut store = GalleryStore::seeded(1, 1);
        let id = store.blocks()[0].id.clone();
        store.add_slide(&id).unwrap();

        let (sink, _) = RecordingSink::new(true);
        let block = store.block(&id).unwrap().clone();
        let event = handle_request(WorkerRequest::SaveBlock { block }, &sink);

        match event {
            WorkerEvent::Saved { block_id, result } => {
                assert!(result.is_err());
                store.apply_save_result(&block_id, result.is_ok());
            }
            _ => panic!("expected a save completion"),
        }
        assert!(store.is_dirty(&id));
    }

    #[test]
    fn ingest_of_a_missing_file_reports_failure() {
        let (sink, _) = RecordingSink::new(false);
        let event = handle_request(
            WorkerRequest::IngestFile {
                block_id: "collection-1".to_string(),
                target: UploadTarget::Slide,
                path: PathBuf::from("/nonexistent/picture.png"),
            },
            &sink,
        );
        assert!(matches!(
            event,
            WorkerEvent::IngestFailed { ref block_id, .. } if block_id == "collection-1"
        ));
    }

    #[test]
    fn worker_thread_round_trips_a_save() {
        let (sink, saved) = RecordingSink::new(false);
        let worker = MediaWorker::spawn(Box::new(sink), egui::Context::default());

        let block = CollectionBlock::seeded(1, 1);
        worker.submit(WorkerRequest::SaveBlock { block });

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            let events = worker.poll_events();
            if !events.is_empty() {
                assert!(matches!(
                    events[0],
                    WorkerEvent::Saved { ref block_id, result: Ok(()) }
                        if block_id == "collection-1"
                ));
                break;
            }
            assert!(std::time::Instant::now() < deadline, "no event arrived");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(saved.lock().unwrap().len(), 1);
    }
}
