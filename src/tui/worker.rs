//! Background analysis worker.
//!
//! The model call blocks for seconds, so it runs on its own thread and
//! reports back over a channel that the main loop drains without blocking.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::AnalysisService;
use crate::domain::{HealthAnalysis, Submission};
use crate::ports::{AnalysisError, GenerativeModel};

/// Messages from the worker, each tagged with its submission id.
#[derive(Debug)]
pub enum AnalysisProgress {
    /// Request is on the wire
    Requesting { id: u64 },
    /// Model answered with a valid analysis
    Complete { id: u64, analysis: HealthAnalysis },
    /// Request or decoding failed
    Failed { id: u64, error: AnalysisError },
}

/// Handle to a running analysis worker.
pub struct AnalysisWorkerHandle {
    id: u64,
    progress_rx: Receiver<AnalysisProgress>,
    _handle: JoinHandle<()>,
}

impl AnalysisWorkerHandle {
    /// Submission this worker is running.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<AnalysisProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Runs one analysis in the background.
pub struct AnalysisWorker;

impl AnalysisWorker {
    /// Spawn a background analysis for `submission`.
    pub fn spawn<M>(
        service: Arc<AnalysisService<M>>,
        submission: Submission,
    ) -> AnalysisWorkerHandle
    where
        M: GenerativeModel + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let id = submission.id;

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, submission, &tx);
        });

        AnalysisWorkerHandle {
            id,
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<M>(
        service: &AnalysisService<M>,
        submission: Submission,
        tx: &Sender<AnalysisProgress>,
    ) where
        M: GenerativeModel,
    {
        let id = submission.id;
        // The receiver is gone if the user reset or quit; nothing to do then.
        let _ = tx.send(AnalysisProgress::Requesting { id });

        let message = match service.analyze(&submission.data) {
            Ok(analysis) => AnalysisProgress::Complete { id, analysis },
            Err(error) => AnalysisProgress::Failed { id, error },
        };
        let _ = tx.send(message);
    }
}
