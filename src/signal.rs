//! Ctrl+C handling.
//!
//! A single `AtomicBool` is shared between the signal handler, the walker
//! and the hashing workers. The handler only sets the flag; workers poll it
//! and the pipeline turns it into [`crate::duplicates::FinderError::Interrupted`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use xxdupe::duplicates::FinderConfig;
//! use xxdupe::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let config = FinderConfig::default().with_shutdown_flag(handler.get_flag());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether Ctrl+C was pressed or [`Self::request_shutdown`] was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown without a signal.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clone of the flag for worker threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag so the handler can serve another run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler, or reuse the installed one.
///
/// The returned handler has its flag cleared. Repeated calls (for example
/// from several `run_app` invocations in one test process) share a single
/// registration.
///
/// # Errors
///
/// Returns an error if the OS refuses the handler for a reason other than
/// one already being registered.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        log::info!("Interrupt received, stopping");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler);
        }
        Err(ctrlc::Error::MultipleHandlers) => {
            log::debug!("Ctrl+C handler already registered, using unhooked handler");
            let _ = GLOBAL_HANDLER.set(handler);
        }
        Err(err) => return Err(err.into()),
    }

    // Another thread may have won the race to set the global
    Ok(GLOBAL_HANDLER.get_or_init(ShutdownHandler::new).clone())
}
