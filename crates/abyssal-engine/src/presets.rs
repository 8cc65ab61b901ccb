//! The factory preset catalogue selected by the revelation parameter.
//!
//! Knobs are stored the way they are printed on the panel, 1 to 10, in the
//! order corruption, drown, obscura, void, erosion, whispers, tremor.

use crate::params::{CONTINUOUS_COUNT, Param};

/// Number of factory presets.
pub const PRESET_COUNT: usize = 10;

/// A named knob setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Display name.
    pub name: &'static str,
    /// Panel positions, each in `[1, 10]`, in knob order.
    pub knobs: [u8; CONTINUOUS_COUNT],
}

impl Preset {
    const fn new(name: &'static str, knobs: [u8; CONTINUOUS_COUNT]) -> Self {
        Self { name, knobs }
    }

    /// Parameter values, `(knob - 1) / 9`, in knob order.
    pub fn normalized(&self) -> [f32; CONTINUOUS_COUNT] {
        self.knobs.map(|k| f32::from(k.saturating_sub(1)) / 9.0)
    }

    /// `(param, value)` pairs ready for a batch write.
    pub fn assignments(&self) -> [(Param, f32); CONTINUOUS_COUNT] {
        let values = self.normalized();
        let mut pairs = [(Param::Corruption, 0.0); CONTINUOUS_COUNT];
        for ((pair, param), value) in pairs.iter_mut().zip(Param::CONTINUOUS).zip(values) {
            *pair = (param, value);
        }
        pairs
    }
}

/// Factory presets in revelation order.
pub static PRESETS: [Preset; PRESET_COUNT] = [
    Preset::new("Void Walker", [4, 8, 2, 10, 2, 6, 2]),
    Preset::new("Neural Snap", [9, 5, 8, 1, 10, 1, 9]),
    Preset::new("Steam Hammer", [8, 3, 4, 2, 5, 3, 4]),
    Preset::new("Black Hole", [2, 9, 1, 10, 3, 9, 1]),
    Preset::new("Heartbeat", [3, 4, 2, 3, 1, 2, 3]),
    Preset::new("Rusty Gears", [7, 4, 5, 3, 8, 4, 5]),
    Preset::new("Ghost Pipe", [3, 6, 4, 8, 4, 7, 3]),
    Preset::new("Engine Fail", [8, 6, 4, 2, 7, 2, 7]),
    Preset::new("Dark Mass", [5, 7, 2, 8, 2, 5, 2]),
    Preset::new("Abyssal Gaze", [6, 6, 5, 7, 4, 5, 4]),
];

/// Preset at `index`, or `None` when out of range (including negative).
pub fn preset_at(index: i64) -> Option<&'static Preset> {
    usize::try_from(index).ok().and_then(|i| PRESETS.get(i))
}

/// Find a preset by name, ignoring case. Returns its index too.
pub fn find_by_name(name: &str) -> Option<(usize, &'static Preset)> {
    PRESETS
        .iter()
        .enumerate()
        .find(|(_, p)| p.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_bounds() {
        assert_eq!(preset_at(0).map(|p| p.name), Some("Void Walker"));
        assert_eq!(preset_at(9).map(|p| p.name), Some("Abyssal Gaze"));
        assert!(preset_at(-1).is_none());
        assert!(preset_at(10).is_none());
        assert!(preset_at(i64::MAX).is_none());
    }

    #[test]
    fn knobs_in_panel_range() {
        for preset in &PRESETS {
            assert!(preset.knobs.iter().all(|k| (1..=10).contains(k)), "{}", preset.name);
            assert!(preset.normalized().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn abyssal_gaze_values() {
        let values = PRESETS[9].normalized();
        let expected = [0.556, 0.556, 0.444, 0.667, 0.333, 0.444, 0.333];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-3, "{v} vs {e}");
        }
    }

    #[test]
    fn endpoints_normalize_exactly() {
        let values = PRESETS[1].normalized();
        assert_eq!(values[3], 0.0);
        assert_eq!(values[4], 1.0);
    }

    #[test]
    fn assignments_follow_knob_order() {
        let pairs = PRESETS[3].assignments();
        assert_eq!(pairs[0].0, Param::Corruption);
        assert_eq!(pairs[6].0, Param::Tremor);
        assert_eq!(pairs[3], (Param::Void, 1.0));
    }

    #[test]
    fn find_by_name_ignores_case() {
        let (index, preset) = find_by_name("black hole").unwrap();
        assert_eq!(index, 3);
        assert_eq!(preset.name, "Black Hole");
        assert!(find_by_name("Shallow End").is_none());
    }
}
