//! Settings files and state blobs for the SimpleEQ equalizer.
//!
//! # Features
//!
//! - **Settings**: named parameter sets stored as TOML ([`EqSettings`])
//! - **State blobs**: processor state as flat JSON objects ([`encode_state`],
//!   [`decode_state`])
//! - **Validation**: keys are checked against the parameter layout and values
//!   for finiteness ([`validate_param`])
//!
//! Range checking is left to the parameter store, which clamps on write.
//!
//! # Example
//!
//! ```rust,no_run
//! use simpleeq_config::EqSettings;
//! use simpleeq_dsp::{AudioProcessor, SimpleEq};
//!
//! let settings = EqSettings::load("vocal.toml").unwrap();
//!
//! let mut eq = SimpleEq::new();
//! settings.apply_to(eq.params()).unwrap();
//! eq.prepare(48000.0, 512);
//!
//! // Save what the processor ended up with
//! EqSettings::from_snapshot("vocal (clamped)", &eq.export_state())
//!     .save("vocal-clamped.toml")
//!     .unwrap();
//! ```

mod error;
mod settings;
mod state_file;
mod validation;

pub use error::ConfigError;
pub use settings::EqSettings;
pub use state_file::{decode_state, encode_state, load_state, save_state};
pub use validation::{validate_param, validate_params};
