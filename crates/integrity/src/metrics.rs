//! Process-wide observer for integrity checks.
//!
//! Nothing is recorded until a recorder is installed with
//! [`set_integrity_metrics`]. Once installed, each `IntegrityEngine` check
//! reports to it after the verdict is built.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::Lazy;

/// Receives one call per completed integrity check.
pub trait IntegrityMetrics: Send + Sync {
    /// `latency` covers subtraction and scoring. `compared` counts the priors
    /// scored; `score` and `flagged` mirror the returned verdict.
    fn record_check(&self, latency: Duration, compared: usize, score: u8, flagged: bool);
}

type Recorder = Arc<dyn IntegrityMetrics>;

static RECORDER: Lazy<RwLock<Option<Recorder>>> = Lazy::new(|| RwLock::new(None));

pub(crate) fn metrics_recorder() -> Option<Recorder> {
    match RECORDER.read() {
        Ok(slot) => slot.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the recorder shared by every engine; `None` turns recording off.
pub fn set_integrity_metrics(recorder: Option<Recorder>) {
    let mut slot = match RECORDER.write() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = recorder;
}
