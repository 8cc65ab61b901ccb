//! Deferred preset application.
//!
//! Selecting a preset may happen on the audio thread (host automation of
//! revelation). Writing seven parameters and running their listeners is not
//! something the audio thread should do, so the revelation listener only
//! posts the index into a one-slot mailbox and wakes the control thread.
//! The control side takes the index and applies the preset as one batch.
//!
//! The mailbox has depth one and overwrites: if presets 2 then 7 are
//! selected before the control thread runs, only 7 is applied.

use arc_swap::ArcSwapOption;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle, Thread};

use crate::params::Param;
use crate::presets::preset_at;
use crate::store::ParameterStore;

const EMPTY: u32 = u32::MAX;

/// Name of the thread spawned by [`ControlRunner`].
pub const CONTROL_THREAD_NAME: &str = "abyssal-control";

/// Translates revelation changes into preset batches.
pub struct PresetDispatcher {
    store: Arc<ParameterStore>,
    pending: AtomicU32,
    waker: ArcSwapOption<Thread>,
}

impl std::fmt::Debug for PresetDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetDispatcher")
            .field("pending", &self.pending())
            .field("has_runner", &self.waker.load().is_some())
            .finish()
    }
}

impl PresetDispatcher {
    /// Create a dispatcher and subscribe it to `store`'s revelation changes.
    ///
    /// The subscription holds a weak reference, so dropping the returned
    /// `Arc` ends dispatching.
    pub fn attach(store: Arc<ParameterStore>) -> Arc<Self> {
        let dispatcher = Arc::new(Self {
            store: Arc::clone(&store),
            pending: AtomicU32::new(EMPTY),
            waker: ArcSwapOption::empty(),
        });

        let weak: Weak<Self> = Arc::downgrade(&dispatcher);
        store.subscribe(Arc::new(move |param, value| {
            if param != Param::Revelation || value < 0.0 {
                return;
            }
            if let Some(dispatcher) = weak.upgrade() {
                dispatcher.notify(value as usize);
            }
        }));
        dispatcher
    }

    /// Post a preset index. Real-time safe: one atomic store and an unpark.
    pub fn notify(&self, index: usize) {
        let encoded = u32::try_from(index).unwrap_or(EMPTY - 1);
        self.pending.store(encoded, Ordering::Release);
        let waker = self.waker.load();
        if let Some(thread) = &*waker {
            thread.unpark();
        }
    }

    /// Index waiting to be applied, if any.
    pub fn pending(&self) -> Option<usize> {
        match self.pending.load(Ordering::Acquire) {
            EMPTY => None,
            index => Some(index as usize),
        }
    }

    /// Apply the pending preset, if any. Control thread only.
    ///
    /// Returns the index applied. An index outside the catalogue is
    /// discarded without touching the store.
    pub fn drain(&self) -> Option<usize> {
        let index = match self.pending.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => return None,
            index => index as usize,
        };
        let Some(preset) = preset_at(index as i64) else {
            tracing::debug!(index, "discarding out-of-range preset");
            return None;
        };
        self.store.apply_batch(&preset.assignments());
        tracing::info!(index, name = preset.name, "applied preset");
        Some(index)
    }

    fn set_waker(&self, thread: Option<Thread>) {
        self.waker.store(thread.map(Arc::new));
    }
}

/// Owns the control thread that applies presets as they arrive.
///
/// The thread parks until the dispatcher wakes it. Dropping the runner stops
/// and joins the thread; pending work left after that is applied by the next
/// [`PresetDispatcher::drain`].
#[derive(Debug)]
pub struct ControlRunner {
    dispatcher: Arc<PresetDispatcher>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ControlRunner {
    /// Spawn the control thread for `dispatcher`.
    pub fn spawn(dispatcher: Arc<PresetDispatcher>) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = {
            let dispatcher = Arc::clone(&dispatcher);
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name(CONTROL_THREAD_NAME.to_string())
                .spawn(move || {
                    while !shutdown.load(Ordering::Acquire) {
                        dispatcher.drain();
                        thread::park();
                    }
                })?
        };

        dispatcher.set_waker(Some(handle.thread().clone()));
        // Covers a preset posted before the waker was installed.
        handle.thread().unpark();
        tracing::debug!(thread = CONTROL_THREAD_NAME, "control runner started");

        Ok(Self {
            dispatcher,
            shutdown,
            handle: Some(handle),
        })
    }
}

impl Drop for ControlRunner {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.dispatcher.set_waker(None);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("control thread panicked");
            }
        }
        tracing::debug!("control runner stopped");
    }
}
