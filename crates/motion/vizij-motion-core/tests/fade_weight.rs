mod common;

use approx::assert_relative_eq;
use common::{started_entry, Recorder};
use vizij_motion_core::{ease_sine, Motion, MotionConfig, MotionError};

#[test]
fn fade_in_follows_sine_ease() {
    let recorder = Recorder::new(1.0, 0.0);
    let mut entry = started_entry(0.0, None);

    let w = recorder.compute_fade_weight(&mut entry, 0.5).unwrap();
    assert_relative_eq!(w, ease_sine(0.5));
    assert!(w > 0.0 && w < 1.0);

    let mut prev = 0.0;
    for i in 1..=10 {
        let t = i as f32 * 0.1;
        let w = recorder.compute_fade_weight(&mut entry, t).unwrap();
        assert!(w >= prev, "fade-in decreased at t={t}");
        prev = w;
    }
    assert_relative_eq!(prev, 1.0);
}

#[test]
fn zero_fade_in_has_no_ramp() {
    let recorder = Recorder::new(0.0, 0.0);
    let mut entry = started_entry(10.0, None);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 10.0).unwrap(), 1.0);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 10.001).unwrap(), 1.0);
}

#[test]
fn unbounded_end_never_fades_out() {
    let recorder = Recorder::new(0.0, 1.0);
    let mut entry = started_entry(0.0, None);
    for t in [0.0, 4.5, 5.0, 1_000.0] {
        assert_eq!(recorder.compute_fade_weight(&mut entry, t).unwrap(), 1.0);
    }
}

#[test]
fn negative_end_never_fades_out() {
    let recorder = Recorder::new(0.0, 1.0);
    let mut entry = started_entry(0.0, Some(-1.0));
    for t in [0.0, 2.0, 30.0] {
        assert_eq!(recorder.compute_fade_weight(&mut entry, t).unwrap(), 1.0);
    }
}

#[test]
fn zero_fade_out_has_no_ramp() {
    let recorder = Recorder::new(0.0, 0.0);
    let mut entry = started_entry(0.0, Some(5.0));
    assert_eq!(recorder.compute_fade_weight(&mut entry, 4.99).unwrap(), 1.0);
}

#[test]
fn fade_out_ramps_toward_end() {
    let recorder = Recorder::new(0.0, 1.0);
    let mut entry = started_entry(0.0, Some(5.0));
    assert_relative_eq!(
        recorder.compute_fade_weight(&mut entry, 4.5).unwrap(),
        ease_sine(0.5)
    );
    assert_eq!(recorder.compute_fade_weight(&mut entry, 5.0).unwrap(), 0.0);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 3.0).unwrap(), 1.0);
}

#[test]
fn weight_scales_result_exactly() {
    let mut recorder = Recorder::new(0.0, 0.0);
    recorder.core_mut().set_weight(0.5);
    let mut entry = started_entry(0.0, None);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 3.0).unwrap(), 0.5);
}

#[test]
fn fade_weight_stays_in_unit_interval() {
    let spans = [0.0, 0.5, 1.0, 2.0];
    for &fade_in in &spans {
        for &fade_out in &spans {
            for end in [None, Some(5.0)] {
                let recorder = Recorder::new(fade_in, fade_out);
                let mut entry = started_entry(0.0, end);
                for step in -4..=28 {
                    let t = step as f32 * 0.25;
                    let w = recorder.compute_fade_weight(&mut entry, t).unwrap();
                    assert!(
                        (0.0..=1.0).contains(&w),
                        "w={w} fade_in={fade_in} fade_out={fade_out} end={end:?} t={t}"
                    );
                }
            }
        }
    }
}

#[test]
fn state_record_is_written() {
    let recorder = Recorder::new(2.0, 0.0);
    let mut entry = started_entry(0.0, None);
    let w = recorder.compute_fade_weight(&mut entry, 1.0).unwrap();
    assert_eq!(entry.state_time(), 1.0);
    assert_eq!(entry.state_weight(), w);
}

#[test]
fn unset_fade_uses_configured_default() {
    let cfg = MotionConfig {
        default_fade_in_seconds: 2.0,
        default_fade_out_seconds: 0.0,
        ..MotionConfig::default()
    };
    let mut recorder = Recorder::with_config(-1.0, -1.0, &cfg);
    assert_eq!(recorder.core().fade_in_time(), None);
    assert_eq!(recorder.core().effective_fade_in_seconds(), 2.0);

    let mut entry = started_entry(0.0, Some(10.0));
    assert_relative_eq!(
        recorder.compute_fade_weight(&mut entry, 1.0).unwrap(),
        ease_sine(0.5)
    );

    recorder.core_mut().set_fade_in_time(0.0);
    assert_eq!(recorder.core().fade_in_time(), Some(0.0));
    assert_eq!(recorder.compute_fade_weight(&mut entry, 1.0).unwrap(), 1.0);
}

#[test]
fn strict_contract_rejects_out_of_range_weight() {
    let cfg = MotionConfig::default().with_strict_contracts(true);
    let mut recorder = Recorder::with_config(0.0, 0.0, &cfg);
    recorder.core_mut().set_weight(1.5);
    let mut entry = started_entry(0.0, None);

    let err = recorder.compute_fade_weight(&mut entry, 1.0).unwrap_err();
    assert!(matches!(err, MotionError::ContractViolation { .. }));
    assert_eq!(err.category(), "contract");
    // Nothing out of range reaches the state record.
    assert_eq!(entry.state_weight(), 0.0);
}

#[test]
fn lenient_contract_clamps_weight() {
    let cfg = MotionConfig::default().with_strict_contracts(false);
    let mut recorder = Recorder::with_config(0.0, 0.0, &cfg);
    let mut entry = started_entry(0.0, None);

    recorder.core_mut().set_weight(1.5);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 1.0).unwrap(), 1.0);
    assert_eq!(entry.state_weight(), 1.0);

    recorder.core_mut().set_weight(-0.2);
    assert_eq!(recorder.compute_fade_weight(&mut entry, 1.0).unwrap(), 0.0);
}

#[test]
fn non_finite_time_is_invalid_argument() {
    let recorder = Recorder::new(1.0, 1.0);
    let mut entry = started_entry(0.0, None);
    let err = recorder.compute_fade_weight(&mut entry, f32::NAN).unwrap_err();
    assert!(matches!(err, MotionError::InvalidArgument { .. }));
    let err = recorder
        .compute_fade_weight(&mut entry, f32::INFINITY)
        .unwrap_err();
    assert_eq!(err.category(), "argument");
}
