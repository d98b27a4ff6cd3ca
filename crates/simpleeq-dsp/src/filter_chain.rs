//! Filter chains: cascades of biquad sections.
//!
//! [`FilterChain`] is one band's cascade, pre-allocated at its maximum size.
//! [`MonoChain`] is the complete per-channel topology:
//!
//! ```text
//! input → low cut (1–4 sections) → peak (1 section) → high cut (1–4 sections) → output
//! ```

use simpleeq_core::{Biquad, BiquadCoefficients, MAX_BUTTERWORTH_SECTIONS};

use crate::designer::{ChainCoefficients, CutCoefficients};

/// A fixed-capacity cascade of biquad sections.
///
/// Only the first [`active_sections`](Self::active_sections) sections run;
/// the remaining ones are bypassed and keep their delay lines untouched.
/// Nothing allocates after construction.
#[derive(Debug, Clone)]
pub struct FilterChain {
    sections: Vec<Biquad>,
    active: usize,
}

impl FilterChain {
    /// Creates a chain with `capacity` sections (at least one), all active
    /// and all passing audio through unchanged.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            sections: vec![Biquad::new(); capacity],
            active: capacity,
        }
    }

    /// Maximum number of sections.
    pub fn capacity(&self) -> usize {
        self.sections.len()
    }

    /// Number of sections currently processing audio.
    pub fn active_sections(&self) -> usize {
        self.active
    }

    /// Enables the first `count` sections (clamped to `1..=capacity`).
    ///
    /// Sections that become active start from silence.
    pub fn set_active_sections(&mut self, count: usize) {
        let count = count.clamp(1, self.capacity());
        if count > self.active {
            for section in &mut self.sections[self.active..count] {
                section.clear();
            }
        }
        self.active = count;
    }

    /// Replaces the coefficients of the active sections, in order.
    ///
    /// Delay lines are kept. A section offered a non-finite set keeps its
    /// previous coefficients. Returns `false` if any set was rejected.
    pub fn update_coefficients(&mut self, coeffs: &[BiquadCoefficients]) -> bool {
        let mut accepted = true;
        for (section, &c) in self.sections[..self.active].iter_mut().zip(coeffs) {
            accepted &= section.set_coefficients(c);
        }
        accepted
    }

    /// Sets the active count and coefficients from a designed cut filter.
    pub fn apply_cut(&mut self, cut: &CutCoefficients) -> bool {
        self.set_active_sections(cut.len());
        self.update_coefficients(cut.active())
    }

    /// Runs one sample through the active sections.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        self.sections[..self.active]
            .iter_mut()
            .fold(input, |x, section| section.process(x))
    }

    /// Zeroes every delay line, active or not.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// Section at `index`, if within capacity.
    pub fn section(&self, index: usize) -> Option<&Biquad> {
        self.sections.get(index)
    }

    /// True when every delay line is zero.
    pub fn is_silent(&self) -> bool {
        self.sections.iter().all(|s| s.state() == [0.0; 4])
    }
}

/// The full band topology for one channel.
#[derive(Debug, Clone)]
pub struct MonoChain {
    low_cut: FilterChain,
    peak: FilterChain,
    high_cut: FilterChain,
}

impl Default for MonoChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoChain {
    /// Creates a transparent chain with room for the steepest slopes.
    pub fn new() -> Self {
        Self {
            low_cut: FilterChain::new(MAX_BUTTERWORTH_SECTIONS),
            peak: FilterChain::new(1),
            high_cut: FilterChain::new(MAX_BUTTERWORTH_SECTIONS),
        }
    }

    /// Installs a full set of designed coefficients.
    ///
    /// Returns `false` if any section rejected its coefficients.
    pub fn apply(&mut self, coeffs: &ChainCoefficients) -> bool {
        let low = self.low_cut.apply_cut(&coeffs.low_cut);
        let peak = self.peak.update_coefficients(&[coeffs.peak]);
        let high = self.high_cut.apply_cut(&coeffs.high_cut);
        low && peak && high
    }

    /// Runs one sample through low cut, peak and high cut.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let x = self.low_cut.process_sample(input);
        let x = self.peak.process_sample(x);
        self.high_cut.process_sample(x)
    }

    /// Processes a buffer in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Zeroes all delay lines.
    pub fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }

    /// Low-cut cascade.
    pub fn low_cut(&self) -> &FilterChain {
        &self.low_cut
    }

    /// Peak section.
    pub fn peak(&self) -> &FilterChain {
        &self.peak
    }

    /// High-cut cascade.
    pub fn high_cut(&self) -> &FilterChain {
        &self.high_cut
    }

    /// True when every delay line in the chain is zero.
    pub fn is_silent(&self) -> bool {
        self.low_cut.is_silent() && self.peak.is_silent() && self.high_cut.is_silent()
    }
}
