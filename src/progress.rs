//! Progress reporting and cooperative cancellation shared by both passes.

use crate::error::ResizeError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Progress tag reported for every resized line.
pub const RESIZE_TAG: &str = "Resize/Image";

/// Receives progress from worker threads.
///
/// `offset` counts finished lines, so it runs from 1 to `span` and the
/// last report of a completed resize has `offset == span`. Returning
/// `false` asks the resize to stop scheduling further lines.
pub trait ProgressMonitor: Sync {
    fn report(&self, tag: &str, offset: u64, span: u64) -> bool;
}

impl<F> ProgressMonitor for F
where
    F: Fn(&str, u64, u64) -> bool + Sync,
{
    fn report(&self, tag: &str, offset: u64, span: u64) -> bool {
        self(tag, offset, span)
    }
}

/// Shared state of one resize: line counter, continue flag and the first
/// failure any worker hit.
pub struct Progress<'a> {
    monitor: Option<&'a dyn ProgressMonitor>,
    span: u64,
    offset: AtomicU64,
    running: AtomicBool,
    failure: Mutex<Option<ResizeError>>,
}

impl<'a> Progress<'a> {
    pub fn new(monitor: Option<&'a dyn ProgressMonitor>, span: u64) -> Self {
        Self {
            monitor,
            span,
            offset: AtomicU64::new(0),
            running: AtomicBool::new(true),
            failure: Mutex::new(None),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn offset(&self) -> u64 {
        self.offset.load(Ordering::Relaxed)
    }

    /// Count one finished line and forward it to the monitor.
    pub fn line_done(&self) {
        let offset = self.offset.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(monitor) = self.monitor {
            if !monitor.report(RESIZE_TAG, offset, self.span) {
                self.running.store(false, Ordering::Relaxed);
            }
        }
    }

    /// Stop the resize; the first recorded error wins.
    pub fn fail(&self, error: ResizeError) {
        self.running.store(false, Ordering::Relaxed);
        if let Ok(mut slot) = self.failure.lock() {
            if slot.is_none() {
                *slot = Some(error);
            }
        }
    }

    /// `Ok` while running; otherwise the recorded failure, or
    /// [`ResizeError::Cancelled`] when the monitor asked to stop.
    pub fn status(&self) -> Result<(), ResizeError> {
        if self.is_running() {
            return Ok(());
        }
        let failure = match self.failure.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        Err(failure.unwrap_or(ResizeError::Cancelled {
            offset: self.offset(),
            span: self.span,
        }))
    }
}
