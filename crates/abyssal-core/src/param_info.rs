//! Parameter metadata for hosts, persistence and tooling.
//!
//! Every parameter carries a [`ParamDescriptor`]: display names, range,
//! default, unit and a stable identity. Hosts and saved state refer to
//! parameters by [`ParamId`] or `string_id`, never by position.
//!
//! # Example
//!
//! ```rust
//! use abyssal_core::{ParamDescriptor, ParamFlags, ParamId};
//!
//! let drown = ParamDescriptor::normalized("Drown", "Drown", 0.5)
//!     .with_id(ParamId(101), "drown");
//!
//! assert_eq!(drown.clamp(1.7), 1.0);
//! assert!(drown.flags.contains(ParamFlags::AUTOMATABLE));
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Used for automation, state save/restore and parameter mapping. Once
/// assigned, a `ParamId` never changes for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// ```rust
/// use abyssal_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host may record and play back automation for this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Discrete values only (a choice or index).
    pub const STEPPED: Self = Self(1 << 1);

    /// Whether all bits of `other` are set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit used when displaying a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Normalized amount shown as a percentage.
    Percent,
    /// Index into a list of choices.
    Choice,
}

impl ParamUnit {
    /// Unit suffix for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Percent => "%",
            ParamUnit::Choice => "",
        }
    }
}

/// Complete description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full name for display.
    pub name: &'static str,
    /// Short name, 8 characters or less.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Value on construction.
    pub default: f32,
    /// Recommended increment for encoder-style control.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID used as the key in saved state.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// A continuous `[0, 1]` amount.
    pub const fn normalized(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// A discrete choice among `count` entries, indices `0..count`.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        count: usize,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Choice,
            min: 0.0,
            max: count.saturating_sub(1) as f32,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Assign the stable identity.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Whether this parameter only takes discrete values.
    #[inline]
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamp a value to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Whether `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_descriptor_range() {
        let d = ParamDescriptor::normalized("Corruption", "Corrupt", 0.0);
        assert_eq!(d.min, 0.0);
        assert_eq!(d.max, 1.0);
        assert_eq!(d.clamp(-0.5), 0.0);
        assert_eq!(d.clamp(0.25), 0.25);
        assert!(!d.is_stepped());
        assert_eq!(d.unit.suffix(), "%");
    }

    #[test]
    fn choice_descriptor_is_stepped() {
        let d = ParamDescriptor::choice("Revelation", "Reveal", 10, 0.0);
        assert_eq!(d.max, 9.0);
        assert!(d.is_stepped());
        assert!(d.flags.contains(ParamFlags::AUTOMATABLE));
        assert!(d.contains(9.0));
        assert!(!d.contains(10.0));
    }

    #[test]
    fn with_id_assigns_identity() {
        let d = ParamDescriptor::normalized("Void", "Void", 0.0).with_id(ParamId(103), "void");
        assert_eq!(d.id, ParamId(103));
        assert_eq!(d.string_id, "void");
    }

    #[test]
    fn flags_union_and_contains() {
        let f = ParamFlags::NONE.union(ParamFlags::STEPPED);
        assert!(f.contains(ParamFlags::STEPPED));
        assert!(!f.contains(ParamFlags::AUTOMATABLE));
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
    }
}
