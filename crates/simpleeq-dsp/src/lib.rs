//! SimpleEQ DSP - the three-band equalizer engine
//!
//! Signal flow for each channel:
//!
//! ```text
//! input → low cut (12–48 dB/oct) → peak (±24 dB) → high cut (12–48 dB/oct) → output
//! ```
//!
//! # Components
//!
//! - [`ChainSettings`] / [`Slope`] - the plain-value parameter set
//! - [`ChainCoefficients`] - coefficient designer (Butterworth cuts, RBJ peak)
//! - [`FilterChain`] / [`MonoChain`] - pre-allocated biquad cascades
//! - [`ParameterStore`] - lock-free parameter values shared across threads
//! - [`SimpleEq`] - dual-channel processor implementing [`AudioProcessor`]
//! - [`StateSnapshot`] - exported/imported parameter state
//!
//! # Logging
//!
//! With the `tracing` feature enabled, setup paths (prepare, reset, layout
//! changes, state import) emit `debug` events. The audio path never logs.
//!
//! # Example
//!
//! ```rust
//! use simpleeq_dsp::{AudioProcessor, EqParam, SimpleEq};
//!
//! let mut eq = SimpleEq::new();
//! let params = eq.params().clone();
//! eq.prepare(44100.0, 512);
//!
//! // Any thread holding the handle can write
//! params.set_value(EqParam::PeakFreq, 2000.0);
//! params.set_value(EqParam::PeakGain, -4.5);
//!
//! let mut mono = vec![0.0f32; 512];
//! eq.set_channel_count(1);
//! eq.process(&mut [&mut mono[..]], 512);
//! ```

pub mod designer;
pub mod filter_chain;
pub mod parameters;
pub mod processor;
pub mod settings;
pub mod state;

pub use designer::{
    ChainCoefficients, CutCoefficients, CutKind, DEFAULT_SAMPLE_RATE, design_cut,
    design_high_cut, design_low_cut, design_peak,
};
pub use filter_chain::{FilterChain, MonoChain};
pub use parameters::{EqParam, PARAM_COUNT, ParameterStore, parameter_layout};
pub use processor::{AudioProcessor, MAX_CHANNELS, SimpleEq};
pub use settings::{ChainSettings, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ, Slope};
pub use state::StateSnapshot;
