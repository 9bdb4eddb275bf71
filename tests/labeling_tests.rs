use rowchart::labeling::{ExtendedWilkinson, LabelGenerator, LabelInclusion};

fn generator() -> ExtendedWilkinson {
    ExtendedWilkinson
}

#[test]
fn degenerate_range_returns_single_label() {
    for max_labels in [2, 5, 20] {
        let props = generator().generate(5.0, 5.0, max_labels, LabelInclusion::Included);
        assert_eq!(props.labels, vec![5.0]);
        assert_eq!(props.step, 1.0);
        assert_eq!(props.min, 5.0);
        assert_eq!(props.max, 5.0);
    }
}

#[test]
fn labels_are_sorted_and_uniformly_spaced() {
    let props = generator().generate(0.0, 100.0, 10, LabelInclusion::Any);

    assert!(props.labels.len() >= 2);
    assert_eq!(props.labels[0], props.min);
    assert_eq!(*props.labels.last().expect("labels"), props.max);

    for pair in props.labels.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap > 0.0);
        assert!((gap - props.step).abs() <= props.step * 1e-9);
    }
}

#[test]
fn generation_is_deterministic() {
    let first = generator().generate(-3.7, 19.2, 7, LabelInclusion::Included);
    let second = generator().generate(-3.7, 19.2, 7, LabelInclusion::Included);
    assert_eq!(first, second);
}

#[test]
fn included_policy_strictly_contains_the_data_range() {
    let props = generator().generate(0.3, 9.7, 6, LabelInclusion::Included);

    assert!(props.labels.len() > 1, "expected a non-degenerate solution");
    assert!(props.min < 0.3);
    assert!(props.max > 9.7);
}

#[test]
fn excluded_policy_stays_strictly_inside_the_data_range() {
    let props = generator().generate(0.3, 9.7, 6, LabelInclusion::Excluded);

    assert!(props.labels.len() > 1, "expected a non-degenerate solution");
    assert!(props.min > 0.3);
    assert!(props.max < 9.7);
}

#[test]
fn fractional_steps_do_not_accumulate_float_dust() {
    let props = generator().generate(0.0, 1.0, 11, LabelInclusion::Any);

    // Every materialized label is already snapped to 10 significant digits,
    // so re-snapping must be the identity.
    for label in &props.labels {
        let resnapped = format!("{label:.9e}").parse::<f64>().expect("parse");
        assert_eq!(*label, resnapped, "label {label} drifted");
    }
}

#[test]
fn negative_ranges_are_supported() {
    let props = generator().generate(-250.0, -30.0, 8, LabelInclusion::Included);

    assert!(props.labels.len() > 1);
    assert!(props.min < -250.0);
    assert!(props.max > -30.0);
}

#[test]
fn label_count_tracks_the_requested_budget() {
    let small = generator().generate(0.0, 1000.0, 3, LabelInclusion::Any);
    let large = generator().generate(0.0, 1000.0, 20, LabelInclusion::Any);

    assert!(small.labels.len() < large.labels.len());
}
