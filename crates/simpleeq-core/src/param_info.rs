//! Parameter introspection for discoverable equalizer parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! describe a processor's parameters at runtime. The equalizer's parameter
//! layout is built from these descriptors and consumed by:
//!
//! - **Host automation**: parameter lists with ranges, steps, and stable IDs
//! - **State persistence**: `string_id` keys in flat key → value snapshots
//! - **Command-line tools**: generated parameter tables and `key=value` parsing
//!
//! # Design
//!
//! Parameters are accessed by index. Each one is described by a
//! [`ParamDescriptor`] that also carries:
//!
//! - [`ParamId`]: stable numeric ID for automation and persistence
//! - [`ParamScale`]: normalization curve (linear or logarithmic)
//! - [`ParamFlags`]: capability flags for hosts (automatable, stepped, etc.)
//! - `string_id`: human-readable stable ID used as the persistence key
//! - `group`: parameter grouping for host tree display
//!
//! # Example
//!
//! ```rust
//! use simpleeq_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(900), "trim_gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-24.0, 24.0);
//!         }
//!     }
//! }
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\]
/// space. Use Logarithmic for frequency parameters (20 Hz–20 kHz).
///
/// # Normalization Formulas
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter: hosts
/// record automation against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// Use [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use simpleeq_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::NONE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
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

/// Trait for processors that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the instance. Use [`param_count`](Self::param_count) to
/// determine valid indices.
///
/// # Thread Safety
///
/// This trait does not require thread safety. Stores shared between a control
/// thread and the audio thread implement it over atomics.
pub trait ParameterInfo {
    /// Returns the number of parameters exposed.
    ///
    /// Valid parameter indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` if `index >= param_count()`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp the value to the descriptor's range. Out-of-bounds
    /// indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`], [`ParamDescriptor::short_name`]
    /// and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Returns the stable [`ParamId`] for the parameter at the given index.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)). Use on setup paths only.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Short Name
///
/// `short_name` should be 8 characters or less for narrow displays.
///
/// # Example
///
/// ```rust
/// use simpleeq_core::{ParamDescriptor, ParamId};
///
/// let peak = ParamDescriptor::frequency_hz("Peak Freq", "PeakFreq", 20.0, 20000.0, 750.0)
///     .with_id(ParamId(102), "peak_freq");
///
/// assert_eq!(peak.clamp(5.0), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "LowCut Freq").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the processor is created.
    pub default: f32,

    /// Step increment. For [`ParamFlags::STEPPED`] parameters values snap to
    /// `min + k * step`.
    pub step: f32,

    /// Stable numeric ID for host automation and persistence.
    pub id: ParamId,

    /// Human-readable stable ID used as the key in state snapshots and
    /// settings files.
    pub string_id: &'static str,

    /// Normalization curve for mapping between plain and normalized values.
    pub scale: ParamScale,

    /// Capability flags for host communication.
    pub flags: ParamFlags,

    /// Parameter group for host tree display (e.g., `"low_cut"`).
    pub group: &'static str,
}

impl ParamDescriptor {
    /// Frequency parameter in Hz with logarithmic scaling.
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Gain parameter with custom name and range (decibels).
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Dimensionless quality (Q) parameter.
    pub fn quality(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.05,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Filter slope in dB/octave, stepped in 12 dB increments.
    pub fn slope_db_per_octave(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::DecibelsPerOctave,
            min,
            max,
            default,
            step: 12.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            group: "",
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simpleeq_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::gain_db("Peak Gain", "PeakGain", -24.0, 24.0, 0.0)
    ///     .with_id(ParamId(103), "peak_gain");
    /// assert_eq!(desc.id, ParamId(103));
    /// assert_eq!(desc.string_id, "peak_gain");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Stepped parameters additionally snap to the nearest step. NaN maps to
    /// the default value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simpleeq_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -24.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(100.0), 24.0);
    ///
    /// let slope = ParamDescriptor::slope_db_per_octave("Slope", "Slope", 12.0, 48.0, 12.0);
    /// assert_eq!(slope.clamp(28.0), 24.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        if self.flags.contains(ParamFlags::STEPPED) && self.step > 0.0 {
            let steps = libm::roundf((clamped - self.min) / self.step);
            (self.min + steps * self.step).min(self.max)
        } else {
            clamped
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// Respects the parameter's [`ParamScale`].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - gain parameters.
    Decibels,

    /// Hertz (Hz) - cutoff and center frequencies.
    Hertz,

    /// Decibels per octave - filter slopes.
    DecibelsPerOctave,

    /// No unit - Q and other dimensionless parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simpleeq_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::DecibelsPerOctave => " dB/oct",
            ParamUnit::None => "",
        }
    }
}
