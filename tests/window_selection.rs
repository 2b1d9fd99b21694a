use chrono::Weekday;
use contact_timing_core::binning::{bin_of, circular_distance, label_of};
use contact_timing_core::config::{AlgorithmConfig, ConstraintError, ContactConstraints, QuietHours};
use contact_timing_core::selection::{apply_mask, composite_score, select_top_windows};
use contact_timing_core::types::HourBin;

/// A week where raw and smoothed estimates agree: `base` everywhere except
/// the listed peaks.
fn make_field(base: f64, peaks: &[(usize, f64)]) -> Vec<HourBin> {
    let mut bins = HourBin::empty_week();
    for bin in bins.iter_mut() {
        bin.raw_probability = base;
        bin.smoothed_probability = base;
    }
    for &(h, p) in peaks {
        bins[h].raw_probability = p;
        bins[h].smoothed_probability = p;
    }
    bins
}

fn assert_spaced(hours: &[usize], min_spacing: usize) {
    for (i, a) in hours.iter().enumerate() {
        for b in &hours[i + 1..] {
            assert!(
                circular_distance(*a, *b) >= min_spacing,
                "windows {a} and {b} are closer than {min_spacing} hours"
            );
        }
    }
}

#[test]
fn test_selection_respects_spacing_across_week_wrap() {
    let config = AlgorithmConfig::default();
    let bins = make_field(0.1, &[(167, 0.9), (0, 0.85), (2, 0.8), (50, 0.7)]);

    let windows = select_top_windows(&bins, &config);
    let hours: Vec<usize> = windows.iter().map(|w| w.hour_of_week).collect();

    assert_eq!(hours, vec![167, 50, 3, 7, 11]);
    assert!(!hours.contains(&0), "hour 0 is one hour from hour 167");
    assert_spaced(&hours, config.min_spacing_hours);
}

#[test]
fn test_selection_orders_by_confidence_with_hour_tie_break() {
    let config = AlgorithmConfig {
        top_k_windows: 4,
        ..AlgorithmConfig::default()
    };
    let bins = make_field(0.2, &[(100, 0.8), (10, 0.8), (5, 0.8), (60, 0.9)]);

    let windows = select_top_windows(&bins, &config);
    let hours: Vec<usize> = windows.iter().map(|w| w.hour_of_week).collect();

    assert_eq!(hours, vec![60, 5, 10, 100]);
    assert!(windows.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_selection_stops_at_top_k() {
    let config = AlgorithmConfig {
        top_k_windows: 2,
        min_spacing_hours: 0,
        ..AlgorithmConfig::default()
    };
    let bins = make_field(0.1, &[(1, 0.9), (2, 0.8), (3, 0.7)]);

    let windows = select_top_windows(&bins, &config);

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].hour_of_week, 1);
    assert_eq!(windows[1].hour_of_week, 2);
}

#[test]
fn test_window_fields_map_from_bin_label() {
    let config = AlgorithmConfig::default();
    let bins = make_field(0.1, &[(34, 0.7), (167, 0.6)]);

    let windows = select_top_windows(&bins, &config);

    let first = &windows[0];
    assert_eq!(first.dow, "Mon");
    assert_eq!(first.start, 10);
    assert_eq!(first.end, 11);
    assert_eq!(first.confidence, 0.7);
    assert_eq!(first.hour_of_week, 34);

    let last_hour = &windows[1];
    assert_eq!(last_hour.dow, "Sat");
    assert_eq!(last_hour.start, 23);
    assert_eq!(last_hour.end, 24);
}

#[test]
fn test_fully_masked_field_selects_nothing() {
    let config = AlgorithmConfig::default();
    let mut bins = make_field(0.1, &[(34, 0.9)]);
    for bin in bins.iter_mut() {
        bin.smoothed_probability = 0.0;
    }

    assert!(select_top_windows(&bins, &config).is_empty());
}

#[test]
fn test_flat_field_selects_nothing() {
    let config = AlgorithmConfig::default();
    let bins = make_field(0.5, &[]);

    assert!(select_top_windows(&bins, &config).is_empty());
}

#[test]
fn test_quiet_hours_mask_overnight() {
    let config = AlgorithmConfig::default();
    // Peaks inside the quiet period must never surface.
    let mut bins = make_field(0.3, &[(22, 0.95), (24 + 3, 0.9), (34, 0.6), (24 * 5 + 12, 0.55)]);
    let constraints = ContactConstraints::none().with_quiet_hours(QuietHours::new(21, 7));

    let masked = apply_mask(&mut bins, &constraints);

    assert_eq!(masked, 7 * 10);
    for bin in &bins {
        let hour = label_of(bin.hour_of_week).hour;
        if hour >= 21 || hour < 7 {
            assert_eq!(bin.smoothed_probability, 0.0, "bin {} not masked", bin.hour_of_week);
        } else {
            assert!(bin.smoothed_probability > 0.0);
        }
    }

    let windows = select_top_windows(&bins, &config);
    assert_eq!(windows[0].hour_of_week, 34);
    assert!(windows.iter().all(|w| (7..21).contains(&w.start)));
}

#[test]
fn test_preferred_days_mask_other_days() {
    let mut bins = make_field(0.3, &[(34, 0.9), (12, 0.95)]);
    let constraints =
        ContactConstraints::none().with_preferred_days(vec![Weekday::Mon, Weekday::Wed]);

    let masked = apply_mask(&mut bins, &constraints);

    assert_eq!(masked, 5 * 24);
    for bin in &bins {
        let allowed = (24..48).contains(&bin.hour_of_week) || (72..96).contains(&bin.hour_of_week);
        assert_eq!(bin.smoothed_probability > 0.0, allowed, "bin {}", bin.hour_of_week);
    }

    let windows = select_top_windows(&bins, &AlgorithmConfig::default());
    assert_eq!(windows[0].hour_of_week, 34);
    assert!(windows.iter().all(|w| w.dow == "Mon" || w.dow == "Wed"));
}

#[test]
fn test_empty_constraints_are_noop() {
    let original = make_field(0.3, &[(34, 0.9)]);

    let mut bins = original.clone();
    assert_eq!(apply_mask(&mut bins, &ContactConstraints::none()), 0);
    assert_eq!(bins, original);

    let empty_days = ContactConstraints::none().with_preferred_days(Vec::new());
    assert_eq!(apply_mask(&mut bins, &empty_days), 0);

    let zero_length = ContactConstraints::none().with_quiet_hours(QuietHours::new(9, 9));
    assert_eq!(apply_mask(&mut bins, &zero_length), 0);
}

#[test]
fn test_quiet_hours_parse() {
    let q = QuietHours::parse("21:00", "07:00").unwrap();
    assert_eq!(q, QuietHours::new(21, 7));
    assert!(q.contains(23));
    assert!(q.contains(0));
    assert!(q.contains(6));
    assert!(!q.contains(7));
    assert!(!q.contains(20));

    // Partial hours are quiet in full.
    let q = QuietHours::parse("21:30", "06:15").unwrap();
    assert_eq!(q, QuietHours::new(21, 7));

    let daytime = QuietHours::parse("12:00", "14:00").unwrap();
    assert!(daytime.contains(12));
    assert!(daytime.contains(13));
    assert!(!daytime.contains(14));
    assert!(!daytime.contains(2));

    let err = QuietHours::parse("25:00", "07:00").unwrap_err();
    assert!(matches!(err, ConstraintError::InvalidTime(_)));
}

#[test]
fn test_composite_score_blend() {
    let config = AlgorithmConfig::default();

    let score = composite_score(0.8, 0.5, 1.0, &config);
    assert!((score - 0.78).abs() < 1e-12);

    assert_eq!(composite_score(0.0, 0.0, 0.0, &config), 0.0);
    assert!((composite_score(1.0, 1.0, 1.0, &config) - 1.0).abs() < 1e-12);
}

#[test]
fn test_composite_score_clamps_inputs() {
    let config = AlgorithmConfig::default();

    let score = composite_score(0.5, -2.0, 3.0, &config);
    assert!((score - (0.6 * 0.5 + 0.2)).abs() < 1e-12);

    let score = composite_score(f64::NAN, 0.0, 0.0, &config);
    assert_eq!(score, 0.0);
}

#[test]
fn test_quiet_hours_deserialize_checks_bounds() {
    let quiet: QuietHours = serde_json::from_str(r#"{"start":21,"end":7}"#).unwrap();
    assert_eq!(quiet, QuietHours::new(21, 7));

    assert!(serde_json::from_str::<QuietHours>(r#"{"start":30,"end":5}"#).is_err());
    assert!(serde_json::from_str::<QuietHours>(r#"{"start":22,"end":24}"#).is_err());

    let constraints: ContactConstraints =
        serde_json::from_str(r#"{"quiet_hours":{"start":22,"end":6},"preferred_days":null}"#)
            .unwrap();
    assert!(constraints.is_masked(bin_of(Weekday::Mon, 23)));
    assert!(!constraints.is_masked(bin_of(Weekday::Mon, 12)));
}
