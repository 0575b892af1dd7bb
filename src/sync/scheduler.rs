//! Recurring sync on a background thread.
//!
//! The worker runs a cycle as soon as it starts, then again every interval
//! or whenever a refresh is requested. Cycles never overlap within one
//! scheduler; refreshes requested during a cycle collapse into one cycle
//! that runs right after it.

use super::cycle::SyncService;
use crate::api::IssueSource;
use crate::locator::WorkspaceSearch;
use log::{debug, info};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Messages to the worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Refresh,
    Stop,
}

/// Handle to a running scheduler
///
/// **Public** - dropping the handle stops the worker too
pub struct Scheduler {
    control: Sender<Signal>,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn the worker thread
    ///
    /// # Arguments
    /// * `service` - shared sync service
    /// * `interval` - time between scheduled cycles
    pub fn start<S, W>(service: Arc<SyncService<S, W>>, interval: Duration) -> Self
    where
        S: IssueSource + Send + Sync + 'static,
        W: WorkspaceSearch + Send + Sync + 'static,
    {
        let (control, signals) = mpsc::channel();

        let worker = thread::spawn(move || {
            info!("Scheduler started, interval {}s", interval.as_secs());
            loop {
                // Failures are logged by run_cycle; the next tick retries
                let _ = service.run_cycle();

                match signals.recv_timeout(interval) {
                    Ok(Signal::Refresh) => {
                        if drain_pending(&signals) == Some(Signal::Stop) {
                            break;
                        }
                        debug!("Refresh requested");
                    }
                    Err(RecvTimeoutError::Timeout) => debug!("Scheduled sync due"),
                    Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("Scheduler stopped");
        });

        Self {
            control,
            worker: Some(worker),
        }
    }

    /// Request an extra cycle
    ///
    /// # Returns
    /// `false` if the worker is no longer running
    pub fn refresh(&self) -> bool {
        self.control.send(Signal::Refresh).is_ok()
    }

    /// Stop the worker and wait for an in-flight cycle to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.control.send(Signal::Stop);
            let _ = worker.join();
        }
    }
}

/// Discard queued refreshes; a queued stop is returned so it is not lost
fn drain_pending(signals: &Receiver<Signal>) -> Option<Signal> {
    let mut dropped = 0;
    while let Ok(signal) = signals.try_recv() {
        match signal {
            Signal::Refresh => dropped += 1,
            Signal::Stop => return Some(Signal::Stop),
        }
    }
    if dropped > 0 {
        debug!("Coalesced {} extra refresh requests", dropped);
    }
    None
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
