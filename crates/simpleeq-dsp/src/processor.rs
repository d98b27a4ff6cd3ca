//! The dual-channel equalizer processor.
//!
//! [`AudioProcessor`] is the host-facing capability set; [`SimpleEq`]
//! implements it with two independent [`MonoChain`]s that share one
//! [`ParameterStore`].
//!
//! ## Real-time behavior
//!
//! [`AudioProcessor::process`] never allocates, locks or logs. At the start
//! of each call the store is snapshotted and compared with the snapshot the
//! current coefficients were designed from; only a difference triggers a
//! redesign, and both chains receive identical coefficients before any
//! sample is processed.

use simpleeq_core::{ParamDescriptor, ParameterInfo};

use crate::designer::{ChainCoefficients, DEFAULT_SAMPLE_RATE};
use crate::filter_chain::MonoChain;
use crate::parameters::ParameterStore;
use crate::settings::ChainSettings;
use crate::state::StateSnapshot;

/// Number of channels the processor filters. Further channels pass through.
pub const MAX_CHANNELS: usize = 2;

/// Host-facing processor interface.
///
/// The host calls [`prepare`](Self::prepare) before the first block and
/// whenever the sample rate or block size changes, then
/// [`process`](Self::process) once per block from the audio thread.
pub trait AudioProcessor {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Resets all state and designs coefficients for `sample_rate`.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize);

    /// Processes `num_samples` samples of every buffer in place.
    ///
    /// `buffers` holds one slice per channel. Runs on the audio thread.
    fn process(&mut self, buffers: &mut [&mut [f32]], num_samples: usize);

    /// Clears all filter state without touching parameters.
    fn reset(&mut self);

    /// Drops back to the unprepared state. Processing passes audio through
    /// until the next [`prepare`](Self::prepare).
    fn release_resources(&mut self) {}

    /// Ordered parameter descriptors.
    fn parameter_layout(&self) -> Vec<ParamDescriptor>;

    /// Current parameter values keyed by string ID.
    fn export_state(&self) -> StateSnapshot;

    /// Restores parameter values from a snapshot.
    ///
    /// Unknown keys are ignored, missing keys keep their current values and
    /// present values are clamped to their ranges.
    fn import_state(&mut self, state: &StateSnapshot);

    /// Processing latency in samples.
    fn latency_samples(&self) -> usize {
        0
    }

    /// Length of the tail after input stops, in seconds.
    fn tail_length_seconds(&self) -> f64 {
        0.0
    }
}

/// Three-band equalizer for mono or stereo audio.
///
/// # Example
///
/// ```rust
/// use simpleeq_dsp::{AudioProcessor, EqParam, SimpleEq};
///
/// let mut eq = SimpleEq::new();
/// eq.params().set_value(EqParam::PeakGain, 6.0);
/// eq.prepare(48000.0, 256);
///
/// let mut left = vec![0.25f32; 256];
/// let mut right = vec![0.25f32; 256];
/// eq.process(&mut [&mut left[..], &mut right[..]], 256);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleEq {
    params: ParameterStore,
    chains: [MonoChain; MAX_CHANNELS],
    channels: usize,
    sample_rate: f32,
    max_block_size: usize,
    applied: Option<ChainSettings>,
    coefficients: ChainCoefficients,
    prepared: bool,
}

impl Default for SimpleEq {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleEq {
    /// Creates an unprepared stereo processor with default parameters.
    pub fn new() -> Self {
        Self::with_params(ParameterStore::new())
    }

    /// Creates a processor reading from an existing store handle.
    pub fn with_params(params: ParameterStore) -> Self {
        let coefficients = ChainCoefficients::design(&params.snapshot(), DEFAULT_SAMPLE_RATE);
        Self {
            params,
            chains: [MonoChain::new(), MonoChain::new()],
            channels: MAX_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: 0,
            applied: None,
            coefficients,
            prepared: false,
        }
    }

    /// Shared parameter store. Clone it to write from another thread.
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Sample rate of the last [`prepare`](AudioProcessor::prepare).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size of the last [`prepare`](AudioProcessor::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Number of channels being filtered (1 or 2).
    pub fn channel_count(&self) -> usize {
        self.channels
    }

    /// Whether [`prepare`](AudioProcessor::prepare) has run since
    /// construction or the last release.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Coefficients currently installed in the chains.
    pub fn coefficients(&self) -> &ChainCoefficients {
        &self.coefficients
    }

    /// Chain for `channel`.
    pub fn chain(&self, channel: usize) -> Option<&MonoChain> {
        self.chains.get(channel)
    }

    /// Changes the channel layout and prepares again.
    ///
    /// `1` filters only the first channel; anything larger filters two.
    pub fn set_channel_count(&mut self, channels: usize) {
        self.channels = channels.clamp(1, MAX_CHANNELS);
        #[cfg(feature = "tracing")]
        tracing::debug!("layout: {channels} requested, {} filtered", self.channels);
        if self.prepared {
            self.prepare(self.sample_rate, self.max_block_size);
        }
    }

    /// Redesigns coefficients if the store changed since the last block.
    ///
    /// Returns `true` when new coefficients were installed.
    fn update_coefficients(&mut self) -> bool {
        let current = self.params.snapshot();
        if self.applied == Some(current) {
            return false;
        }
        let designed = ChainCoefficients::design(&current, self.sample_rate);
        self.install(current, designed)
    }

    /// Installs `designed` on every chain and records `settings` as applied.
    ///
    /// A set with any non-finite section is dropped whole, so the chains and
    /// [`coefficients`](Self::coefficients) keep the previous set and the next
    /// block designs again.
    fn install(&mut self, settings: ChainSettings, designed: ChainCoefficients) -> bool {
        if !designed.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::warn!("non-finite coefficients for {settings:?}, keeping previous set");
            return false;
        }
        let mut installed = true;
        for chain in &mut self.chains {
            installed &= chain.apply(&designed);
        }
        self.coefficients = designed;
        if installed {
            self.applied = Some(settings);
        }
        installed
    }
}

impl AudioProcessor for SimpleEq {
    fn name(&self) -> &'static str {
        "SimpleEQ"
    }

    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("prepare: invalid sample rate {sample_rate}, using {DEFAULT_SAMPLE_RATE}");
            DEFAULT_SAMPLE_RATE
        };
        self.max_block_size = max_block_size;
        for chain in &mut self.chains {
            chain.reset();
        }
        self.applied = None;
        self.update_coefficients();
        self.prepared = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "prepare: {} Hz, block {max_block_size}, {} ch",
            self.sample_rate,
            self.channels
        );
    }

    fn process(&mut self, buffers: &mut [&mut [f32]], num_samples: usize) {
        if !self.prepared {
            return;
        }
        self.update_coefficients();

        for (chain, buffer) in self.chains[..self.channels].iter_mut().zip(buffers.iter_mut()) {
            let len = num_samples.min(buffer.len());
            chain.process_block(&mut buffer[..len]);
        }
    }

    fn reset(&mut self) {
        for chain in &mut self.chains {
            chain.reset();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("reset: delay lines cleared");
    }

    fn release_resources(&mut self) {
        self.prepared = false;
        #[cfg(feature = "tracing")]
        tracing::debug!("release: processor unprepared");
    }

    fn parameter_layout(&self) -> Vec<ParamDescriptor> {
        self.params.descriptors().to_vec()
    }

    fn export_state(&self) -> StateSnapshot {
        self.params
            .descriptors()
            .iter()
            .enumerate()
            .filter_map(|(i, d)| self.params.get(i).map(|v| (d.string_id, v)))
            .collect()
    }

    fn import_state(&mut self, state: &StateSnapshot) {
        for (key, value) in state.iter() {
            self.params.set_by_string_id(key, value);
        }
        self.applied = None;
        #[cfg(feature = "tracing")]
        tracing::debug!("import_state: {} keys, redesign on next block", state.len());
    }
}

impl ParameterInfo for SimpleEq {
    fn param_count(&self) -> usize {
        self.params.param_count()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.param_info(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }
}
