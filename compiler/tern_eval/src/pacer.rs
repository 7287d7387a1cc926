//! Pacing capability behind the `delay` global.
//!
//! Before each statement the dispatcher reads `delay` and, when positive,
//! hands the duration to the interpreter's pacer. Keeping the actual sleep
//! behind this type lets tests run paced scripts without real time passing.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// Pacer implementation using enum dispatch.
pub enum PacerImpl {
    /// Blocks the current thread for the requested duration.
    Thread,
    /// Records requested pauses without sleeping.
    Recording(Mutex<Vec<Duration>>),
    /// Ignores every pause.
    Disabled,
}

impl PacerImpl {
    /// Pause between two statements.
    pub fn pause(&self, duration: Duration) {
        match self {
            Self::Thread => std::thread::sleep(duration),
            Self::Recording(log) => log.lock().push(duration),
            Self::Disabled => {}
        }
    }

    /// Pauses requested so far; empty unless recording.
    pub fn recorded(&self) -> Vec<Duration> {
        match self {
            Self::Recording(log) => log.lock().clone(),
            Self::Thread | Self::Disabled => Vec::new(),
        }
    }
}

/// Shared pacer handle.
pub type SharedPacer = Arc<PacerImpl>;

/// Pacer that really sleeps (the default).
pub fn thread_pacer() -> SharedPacer {
    Arc::new(PacerImpl::Thread)
}

/// Pacer that records pauses, for tests.
pub fn recording_pacer() -> SharedPacer {
    Arc::new(PacerImpl::Recording(Mutex::new(Vec::new())))
}

/// Pacer that never pauses.
pub fn disabled_pacer() -> SharedPacer {
    Arc::new(PacerImpl::Disabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_pacer_logs_in_order() {
        let pacer = recording_pacer();
        pacer.pause(Duration::from_millis(5));
        pacer.pause(Duration::from_millis(1));
        assert_eq!(
            pacer.recorded(),
            vec![Duration::from_millis(5), Duration::from_millis(1)]
        );
    }

    #[test]
    fn disabled_pacer_records_nothing() {
        let pacer = disabled_pacer();
        pacer.pause(Duration::from_secs(60));
        assert!(pacer.recorded().is_empty());
    }
}
