use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::classifier::ClassifierAdapter;
use crate::color::LabelColors;
use crate::data::model::{Classification, PhotometricRecord};
use crate::data::validate::ValidationError;
use crate::pipeline::{classify_catalogue, prepare, CatalogueRow, CatalogueSummary};

/// Messages cycled while a classification is running.
pub const LOADING_MESSAGES: [&str; 6] = [
    "🌠 Analyzing spectral signatures...",
    "🌌 Processing quantum indicators...",
    "✨ Calculating celestial metrics...",
    "🔭 Consulting astronomical databases...",
    "🛰️ Calibrating space-time coordinates...",
    "⚡ Processing quantum fluctuations...",
];

const LOADING_MESSAGE_PERIOD: Duration = Duration::from_millis(500);

/// Loading message to show `elapsed` after the call started.
pub fn loading_message(elapsed: Duration) -> &'static str {
    let step = (elapsed.as_millis() / LOADING_MESSAGE_PERIOD.as_millis()) as usize;
    LOADING_MESSAGES[step % LOADING_MESSAGES.len()]
}

// ---------------------------------------------------------------------------
// Pieces of state
// ---------------------------------------------------------------------------

/// What the last form submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Rejected(ValidationError),
    Classified(Classification),
}

/// A classification running on a worker thread.
struct PendingClassification {
    receiver: Receiver<Classification>,
    started: Instant,
}

/// A loaded and classified catalogue file.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub source: PathBuf,
    pub rows: Vec<CatalogueRow>,
    pub summary: CatalogueSummary,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Classifier loaded at startup, shared read-only with worker threads.
    pub adapter: Arc<ClassifierAdapter>,

    /// Values currently entered in the form.
    pub form: PhotometricRecord,

    /// Result of the last completed submission.
    pub outcome: Option<FormOutcome>,

    /// In-flight single-record classification, if any.
    pending: Option<PendingClassification>,

    /// Loaded catalogue (None until the user opens a file).
    pub catalogue: Option<Catalogue>,

    /// Colours used for labels in the table and plot.
    pub label_colors: LabelColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(adapter: Arc<ClassifierAdapter>) -> Self {
        Self {
            adapter,
            form: PhotometricRecord::default(),
            outcome: None,
            pending: None,
            catalogue: None,
            label_colors: LabelColors::default(),
            status_message: None,
        }
    }

    /// Whether a classification is still running.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time since the running classification started.
    pub fn pending_elapsed(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.started.elapsed())
    }

    /// Validate the form and, if it passes, classify it on a worker thread.
    ///
    /// `notify` runs on the worker once the result has been sent.
    /// Ignored while a previous submission is still running.
    pub fn submit(&mut self, notify: impl FnOnce() + Send + 'static) {
        if self.is_pending() {
            return;
        }
        let vector = match prepare(&self.form) {
            Ok(vector) => vector,
            Err(e) => {
                log::warn!("Rejected form input: {e}");
                self.outcome = Some(FormOutcome::Rejected(e));
                return;
            }
        };

        self.outcome = None;
        let adapter = Arc::clone(&self.adapter);
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("classify".into())
            .spawn(move || {
                let result = adapter.classify(&vector);
                // The receiver is gone only if the app is shutting down.
                let _ = tx.send(result);
                notify();
            });

        match spawned {
            Ok(_) => {
                self.pending = Some(PendingClassification {
                    receiver: rx,
                    started: Instant::now(),
                });
            }
            Err(e) => {
                log::error!("Failed to start classification worker: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Collect a finished classification. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        match pending.receiver.try_recv() {
            Ok(classification) => {
                log::info!(
                    "Classified form input as {} ({:.1}% confidence)",
                    classification.label,
                    classification.confidence() * 100.0
                );
                self.outcome = Some(FormOutcome::Classified(classification));
                self.pending = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                log::error!("Classification worker exited without a result");
                self.status_message = Some("Error: classification did not complete".into());
                self.pending = None;
                true
            }
        }
    }

    /// Reset the form to its initial all-zero values.
    pub fn clear_form(&mut self) {
        self.form = PhotometricRecord::default();
        self.outcome = None;
    }

    /// Classify a freshly loaded catalogue and make it current.
    pub fn set_catalogue(&mut self, source: PathBuf, records: Vec<PhotometricRecord>) {
        let rows = classify_catalogue(&records, &self.adapter);
        let summary = CatalogueSummary::from_rows(&rows);
        log::info!(
            "Classified {} of {} catalogue rows from {} ({} rejected)",
            summary.classified(),
            rows.len(),
            source.display(),
            summary.rejected
        );
        self.catalogue = Some(Catalogue {
            source,
            rows,
            summary,
        });
        self.status_message = None;
    }
}
