//! The eight Abyssal Gaze parameters and their metadata.

use abyssal_core::{ParamDescriptor, ParamId};

use crate::presets::PRESET_COUNT;
use crate::store::REVELATION_UNSET;

/// First stable [`ParamId`]; parameters are numbered consecutively from here.
const ID_BASE: u32 = 100;

/// Number of continuous parameters.
pub const CONTINUOUS_COUNT: usize = 7;

/// One of the processor's parameters.
///
/// The first seven are continuous in `[0, 1]`, listed in preset knob order.
/// [`Param::Revelation`] selects a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// Saturation drive.
    Corruption,
    /// Dry/processed blend.
    Drown,
    /// Low-pass cutoff.
    Obscura,
    /// Reverb room size.
    Void,
    /// Quantization depth.
    Erosion,
    /// Delay feedback.
    Whispers,
    /// Tremolo rate.
    Tremor,
    /// Preset selection.
    Revelation,
}

impl Param {
    /// Every parameter in stable order.
    pub const ALL: [Param; 8] = [
        Param::Corruption,
        Param::Drown,
        Param::Obscura,
        Param::Void,
        Param::Erosion,
        Param::Whispers,
        Param::Tremor,
        Param::Revelation,
    ];

    /// The continuous parameters in preset knob order.
    pub const CONTINUOUS: [Param; CONTINUOUS_COUNT] = [
        Param::Corruption,
        Param::Drown,
        Param::Obscura,
        Param::Void,
        Param::Erosion,
        Param::Whispers,
        Param::Tremor,
    ];

    /// Host-facing metadata.
    ///
    /// Revelation's default is [`REVELATION_UNSET`], outside its `[0, 9]`
    /// range: no preset is selected until one is chosen.
    pub const fn descriptor(self) -> ParamDescriptor {
        let base = match self {
            Param::Corruption => ParamDescriptor::normalized("Corruption", "Corrupt", 0.0),
            Param::Drown => ParamDescriptor::normalized("Drown", "Drown", 0.5),
            Param::Obscura => ParamDescriptor::normalized("Obscura", "Obscura", 1.0),
            Param::Void => ParamDescriptor::normalized("VOID", "Void", 0.0),
            Param::Erosion => ParamDescriptor::normalized("Erosion", "Erode", 0.0),
            Param::Whispers => ParamDescriptor::normalized("Whispers", "Whisper", 0.0),
            Param::Tremor => ParamDescriptor::normalized("Tremor", "Tremor", 0.0),
            Param::Revelation => {
                ParamDescriptor::choice("Revelation", "Preset", PRESET_COUNT, REVELATION_UNSET)
            }
        };
        base.with_id(self.id(), self.string_id())
    }

    /// Stable numeric id.
    pub const fn id(self) -> ParamId {
        ParamId(ID_BASE + self as u32)
    }

    /// Stable string id used in saved state and on the command line.
    pub const fn string_id(self) -> &'static str {
        match self {
            Param::Corruption => "corruption",
            Param::Drown => "drown",
            Param::Obscura => "obscura",
            Param::Void => "void",
            Param::Erosion => "erosion",
            Param::Whispers => "whispers",
            Param::Tremor => "tremor",
            Param::Revelation => "revelation",
        }
    }

    /// Look up a parameter by string id (case-insensitive).
    pub fn from_string_id(id: &str) -> Option<Param> {
        Self::ALL
            .into_iter()
            .find(|p| p.string_id().eq_ignore_ascii_case(id))
    }

    /// Look up a parameter by numeric id.
    pub fn from_id(id: ParamId) -> Option<Param> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Position among the continuous parameters, `None` for revelation.
    pub const fn continuous_index(self) -> Option<usize> {
        match self {
            Param::Revelation => None,
            other => Some(other as usize),
        }
    }

    /// Default value. Revelation has none: it starts unset.
    pub fn default_value(self) -> Option<f32> {
        self.continuous_index().map(|_| self.descriptor().default)
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.string_id())
    }
}

/// Every parameter value, read once at block start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Saturation amount.
    pub corruption: f32,
    /// Dry/processed blend.
    pub drown: f32,
    /// Filter brightness.
    pub obscura: f32,
    /// Reverb room size.
    pub void: f32,
    /// Quantization amount.
    pub erosion: f32,
    /// Delay feedback amount.
    pub whispers: f32,
    /// Tremolo amount.
    pub tremor: f32,
    /// Selected preset, `None` for free manual control.
    pub revelation: Option<usize>,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        let mut values = [0.0; CONTINUOUS_COUNT];
        for (slot, param) in values.iter_mut().zip(Param::CONTINUOUS) {
            *slot = param.descriptor().default;
        }
        Self::from_values(values, None)
    }
}

impl ParameterSnapshot {
    /// Build from continuous values in knob order.
    pub fn from_values(values: [f32; CONTINUOUS_COUNT], revelation: Option<usize>) -> Self {
        let [corruption, drown, obscura, void, erosion, whispers, tremor] = values;
        Self {
            corruption,
            drown,
            obscura,
            void,
            erosion,
            whispers,
            tremor,
            revelation,
        }
    }

    /// Continuous values in knob order.
    pub fn values(&self) -> [f32; CONTINUOUS_COUNT] {
        [
            self.corruption,
            self.drown,
            self.obscura,
            self.void,
            self.erosion,
            self.whispers,
            self.tremor,
        ]
    }

    /// Value of a continuous parameter. Revelation reads as its index, or -1
    /// when unset.
    pub fn get(&self, param: Param) -> f32 {
        match param.continuous_index() {
            Some(i) => self.values()[i],
            None => self.revelation.map_or(-1.0, |i| i as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ParameterStore;

    #[test]
    fn ids_are_stable_and_unique() {
        assert_eq!(Param::Corruption.id(), ParamId(100));
        assert_eq!(Param::Revelation.id(), ParamId(107));
        for p in Param::ALL {
            assert_eq!(Param::from_id(p.id()), Some(p));
            assert_eq!(Param::from_string_id(p.string_id()), Some(p));
        }
        assert_eq!(Param::from_string_id("DROWN"), Some(Param::Drown));
        assert_eq!(Param::from_string_id("feedback"), None);
    }

    #[test]
    fn descriptors_carry_identity() {
        let d = Param::Whispers.descriptor();
        assert_eq!(d.string_id, "whispers");
        assert_eq!(d.id, Param::Whispers.id());
        assert!(!d.is_stepped());

        let r = Param::Revelation.descriptor();
        assert!(r.is_stepped());
        assert_eq!(r.max, 9.0);
        assert_eq!(r.default, REVELATION_UNSET);
        assert!(!r.contains(r.default));
        assert_eq!(r.default, ParameterStore::new().get(Param::Revelation));
    }

    #[test]
    fn default_snapshot() {
        let snap = ParameterSnapshot::default();
        assert_eq!(snap.values(), [0.0, 0.5, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(snap.revelation, None);
        assert_eq!(snap.get(Param::Obscura), 1.0);
        assert_eq!(snap.get(Param::Revelation), -1.0);
        assert_eq!(Param::Revelation.default_value(), None);
    }

    #[test]
    fn continuous_index_follows_knob_order() {
        for (i, p) in Param::CONTINUOUS.into_iter().enumerate() {
            assert_eq!(p.continuous_index(), Some(i));
        }
        assert_eq!(Param::Revelation.continuous_index(), None);
    }
}
