//! Background warm-up of language services.
//!
//! Loading completion and analysis support can take a while. The text surface
//! starts in plain highlighting mode, a worker thread warms the services up,
//! and the surface picks up the result on the next
//! [`poll`](Warmup::poll).

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use tracing::debug;

use crate::language::Language;

/// Provider of editor language services (completion, quick info...).
pub trait LanguageServices: Send + Sync {
    /// Loads whatever `language` needs. Runs on a worker thread.
    fn warm_up(&self, language: Language) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarmupStatus {
    Pending,
    Ready,
    Failed(String),
}

/// Handle to an in-flight warm-up. Dropping it abandons the result; the
/// worker finishes on its own and its send is discarded.
///
/// The worker thread is detached and is never joined. It keeps its clone of
/// the services `Arc` until [`LanguageServices::warm_up`] returns, so a
/// closed window releases the services only once the warm-up in flight
/// completes. An implementation that blocks forever pins them for the life
/// of the process.
#[derive(Debug)]
pub struct Warmup {
    language: Language,
    receiver: Receiver<Result<(), String>>,
}

impl Warmup {
    pub fn spawn(services: Arc<dyn LanguageServices>, language: Language) -> Self {
        let (sender, receiver) = bounded(1);
        thread::spawn(move || {
            let result = services.warm_up(language);
            if sender.send(result).is_err() {
                debug!(%language, "warm-up finished after its surface was closed");
            }
        });
        Self { language, receiver }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn poll(&self) -> WarmupStatus {
        match self.receiver.try_recv() {
            Ok(result) => status(result),
            Err(TryRecvError::Empty) => WarmupStatus::Pending,
            Err(TryRecvError::Disconnected) => worker_lost(),
        }
    }

    /// Blocks up to `timeout` for the result.
    pub fn wait(&self, timeout: Duration) -> WarmupStatus {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => status(result),
            Err(RecvTimeoutError::Timeout) => WarmupStatus::Pending,
            Err(RecvTimeoutError::Disconnected) => worker_lost(),
        }
    }
}

fn status(result: Result<(), String>) -> WarmupStatus {
    match result {
        Ok(()) => WarmupStatus::Ready,
        Err(reason) => WarmupStatus::Failed(reason),
    }
}

fn worker_lost() -> WarmupStatus {
    WarmupStatus::Failed("warm-up worker exited without reporting".to_owned())
}
