//! Lock-free parameter storage shared between the audio and control threads.
//!
//! ## Threading
//!
//! - **Values**: one `AtomicU32` per parameter holding the `f32` bit pattern.
//!   A reader never sees a torn value. `get` is wait-free.
//! - **Listeners**: published through `ArcSwap<Vec<Listener>>`, so notifying
//!   is a wait-free load followed by plain calls.
//! - **Batches**: `apply_batch` raises an in-flight counter, writes, bumps a
//!   generation counter, then lowers the in-flight counter. A snapshot that
//!   sees either counter move is discarded, so the audio path never runs a
//!   block with half of a preset applied.

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering, fence};

use crate::params::{CONTINUOUS_COUNT, Param, ParameterSnapshot};
use crate::presets::PRESET_COUNT;

/// Value passed to listeners when revelation returns to unset.
pub const REVELATION_UNSET: f32 = -1.0;

/// Encoded "no preset selected".
const UNSET: u32 = u32::MAX;

/// Change callback. Runs on the writer's thread, which may be the audio
/// thread, so it must not block or allocate.
pub type Listener = Arc<dyn Fn(Param, f32) + Send + Sync>;

/// Attempts [`ParameterStore::snapshot`] makes before settling for a
/// possibly stale result.
const SNAPSHOT_RETRIES: usize = 64;

/// Thread-safe parameter values with change notification.
///
/// # Example
///
/// ```rust
/// use abyssal_engine::{Param, ParameterStore};
///
/// let store = ParameterStore::new();
/// store.set(Param::Corruption, 1.7);
/// assert_eq!(store.get(Param::Corruption), 1.0);
///
/// store.set(Param::Corruption, f32::NAN);
/// assert_eq!(store.get(Param::Corruption), 1.0);
/// ```
pub struct ParameterStore {
    values: [AtomicU32; CONTINUOUS_COUNT],
    revelation: AtomicU32,
    in_flight: AtomicU32,
    generation: AtomicU64,
    listeners: ArcSwap<Vec<Listener>>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterStore")
            .field("snapshot", &self.snapshot())
            .field("listeners", &self.listeners.load().len())
            .finish()
    }
}

impl ParameterStore {
    /// Create a store holding the default values with revelation unset.
    pub fn new() -> Self {
        let defaults = ParameterSnapshot::default().values();
        Self {
            values: defaults.map(|v| AtomicU32::new(v.to_bits())),
            revelation: AtomicU32::new(UNSET),
            in_flight: AtomicU32::new(0),
            generation: AtomicU64::new(0),
            listeners: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Current value. Revelation reads as its index, or
    /// [`REVELATION_UNSET`].
    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        match param.continuous_index() {
            Some(i) => f32::from_bits(self.values[i].load(Ordering::Acquire)),
            None => self.revelation().map_or(REVELATION_UNSET, |i| i as f32),
        }
    }

    /// Selected preset, if any.
    #[inline]
    pub fn revelation(&self) -> Option<usize> {
        match self.revelation.load(Ordering::Acquire) {
            UNSET => None,
            index => Some(index as usize),
        }
    }

    /// Write a value from any thread.
    ///
    /// Continuous values are clamped to `[0, 1]` and non-finite writes are
    /// ignored. For revelation the value is rounded to a preset index; an
    /// index outside the catalogue is ignored. Listeners run only when a
    /// continuous value actually changes, but every valid revelation write
    /// notifies: selecting a preset is an action even if it was already
    /// selected.
    pub fn set(&self, param: Param, value: f32) {
        if !value.is_finite() {
            return;
        }
        match param.continuous_index() {
            Some(i) => {
                if self.store_continuous(i, value) {
                    self.notify(param, self.get(param));
                }
            }
            None => {
                let index = value.round();
                if index >= 0.0 && index < PRESET_COUNT as f32 {
                    self.select_preset(index as usize);
                }
            }
        }
    }

    /// Select a preset by index. Returns `false`, changing nothing, when the
    /// index is outside the catalogue.
    pub fn set_revelation(&self, index: i64) -> bool {
        match usize::try_from(index) {
            Ok(i) if i < PRESET_COUNT => {
                self.select_preset(i);
                true
            }
            _ => false,
        }
    }

    /// Return to free manual control.
    pub fn clear_revelation(&self) {
        if self.revelation.swap(UNSET, Ordering::AcqRel) != UNSET {
            self.notify(Param::Revelation, REVELATION_UNSET);
        }
    }

    /// Store a selection without notifying. Used when restoring saved state,
    /// where the knob values are restored separately.
    pub(crate) fn restore_revelation(&self, index: Option<usize>) {
        let encoded = index
            .filter(|&i| i < PRESET_COUNT)
            .map_or(UNSET, |i| i as u32);
        self.revelation.store(encoded, Ordering::Release);
    }

    /// Write several continuous values as one unit.
    ///
    /// A concurrent [`snapshot_into`](Self::snapshot_into) observes either
    /// none or all of the batch. Revelation entries are ignored. Listeners
    /// run after the whole batch is visible.
    pub fn apply_batch(&self, writes: &[(Param, f32)]) {
        let mut changed = [false; CONTINUOUS_COUNT];

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        for &(param, value) in writes {
            if let Some(i) = param.continuous_index()
                && value.is_finite()
            {
                changed[i] |= self.store_continuous(i, value);
            }
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        for (param, _) in Param::CONTINUOUS
            .into_iter()
            .zip(changed)
            .filter(|(_, c)| *c)
        {
            self.notify(param, self.get(param));
        }
    }

    /// Read every value into `snapshot` if no batch overlaps the read.
    ///
    /// Returns `false` and leaves `snapshot` untouched when a batch was in
    /// progress; the caller keeps using its previous snapshot for one more
    /// block. Wait-free.
    pub fn snapshot_into(&self, snapshot: &mut ParameterSnapshot) -> bool {
        let generation = self.generation.load(Ordering::SeqCst);
        if self.in_flight.load(Ordering::SeqCst) != 0 {
            return false;
        }

        let candidate = self.read_all();

        fence(Ordering::SeqCst);
        if self.in_flight.load(Ordering::SeqCst) != 0
            || self.generation.load(Ordering::SeqCst) != generation
        {
            return false;
        }
        *snapshot = candidate;
        true
    }

    /// Consistent snapshot for control-side readers.
    ///
    /// Retries while batches are landing; after a bounded number of attempts
    /// it returns the latest values even if a batch overlapped.
    pub fn snapshot(&self) -> ParameterSnapshot {
        let mut snapshot = ParameterSnapshot::default();
        for _ in 0..SNAPSHOT_RETRIES {
            if self.snapshot_into(&mut snapshot) {
                return snapshot;
            }
            std::hint::spin_loop();
        }
        self.read_all()
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(Arc::clone(&listener));
            next
        });
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.load().len()
    }

    fn select_preset(&self, index: usize) {
        self.revelation.store(index as u32, Ordering::Release);
        self.notify(Param::Revelation, index as f32);
    }

    /// Clamp and store. Returns whether the stored bits changed.
    fn store_continuous(&self, index: usize, value: f32) -> bool {
        let bits = value.clamp(0.0, 1.0).to_bits();
        self.values[index].swap(bits, Ordering::AcqRel) != bits
    }

    fn read_all(&self) -> ParameterSnapshot {
        let values = core::array::from_fn(|i| f32::from_bits(self.values[i].load(Ordering::Acquire)));
        ParameterSnapshot::from_values(values, self.revelation())
    }

    fn notify(&self, param: Param, value: f32) {
        for listener in self.listeners.load().iter() {
            listener(param, value);
        }
    }
}
