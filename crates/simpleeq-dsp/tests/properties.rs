//! Property-based tests for the equalizer engine.

use proptest::prelude::*;
use simpleeq_dsp::{
    AudioProcessor, ChainCoefficients, ChainSettings, EqParam, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ,
    ParameterStore, SimpleEq, Slope,
};

fn slope() -> impl Strategy<Value = Slope> {
    prop::sample::select(Slope::ALL.to_vec())
}

fn settings() -> impl Strategy<Value = ChainSettings> {
    (
        20.0f32..20000.0,
        20.0f32..20000.0,
        20.0f32..20000.0,
        -24.0f32..=24.0,
        0.1f32..=10.0,
        slope(),
        slope(),
    )
        .prop_map(
            |(low, high, peak, gain, q, low_slope, high_slope)| ChainSettings {
                low_cut_freq: low,
                high_cut_freq: high,
                peak_freq: peak,
                peak_gain_db: gain,
                peak_quality: q,
                low_cut_slope: low_slope,
                high_cut_slope: high_slope,
            },
        )
}

fn sample_rate() -> impl Strategy<Value = f32> {
    prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 88200.0, 96000.0, 192000.0])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Designer output is finite for every valid parameter set.
    #[test]
    fn design_is_always_finite(settings in settings(), sr in sample_rate()) {
        let coeffs = ChainCoefficients::design(&settings, sr);
        prop_assert!(coeffs.is_finite(), "{:?} at {} Hz", settings, sr);
        prop_assert_eq!(coeffs.low_cut.len(), settings.low_cut_slope.sections());
        prop_assert_eq!(coeffs.high_cut.len(), settings.high_cut_slope.sections());
    }

    /// Processing bounded input with any parameter set stays finite.
    #[test]
    fn processing_stays_finite(
        settings in settings(),
        sr in sample_rate(),
        input in prop::collection::vec(-1.0f32..=1.0, 64..256),
    ) {
        let mut eq = SimpleEq::new();
        eq.params().store_settings(&settings);
        eq.prepare(sr, input.len());

        let mut left = input.clone();
        let mut right = input;
        let n = left.len();
        eq.process(&mut [&mut left[..], &mut right[..]], n);
        prop_assert!(left.iter().chain(&right).all(|x| x.is_finite()));
    }

    /// Whatever is written, snapshots stay in range with the cuts ordered.
    #[test]
    fn snapshot_always_valid(
        values in prop::array::uniform7(proptest::num::f32::ANY),
    ) {
        let store = ParameterStore::new();
        for (param, value) in EqParam::ALL.into_iter().zip(values) {
            store.set_value(param, value);
        }
        let snap = store.snapshot();
        prop_assert!(snap.low_cut_freq < snap.high_cut_freq, "{:?}", snap);
        for freq in [snap.low_cut_freq, snap.high_cut_freq, snap.peak_freq] {
            prop_assert!((MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&freq));
        }
        prop_assert!((-24.0..=24.0).contains(&snap.peak_gain_db));
        prop_assert!((0.1..=10.0).contains(&snap.peak_quality));
    }
}
