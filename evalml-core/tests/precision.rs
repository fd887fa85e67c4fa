use std::sync::Arc;

use approx::assert_abs_diff_eq;
use serde_json::json;

use evalml_core::{
    error::Error,
    evaluation::Evaluation,
    metrics::{get_metric, Metric, MetricInputs, PrecisionConfig, PrecisionMetric},
    Average, MetricValue,
};

fn precision(predictions: &[i64], references: &[i64], config: &PrecisionConfig) -> f64 {
    PrecisionMetric
        .compute_precision(predictions, references, config)
        .unwrap()["precision"]
        .as_float()
        .unwrap()
}

#[test]
fn binary_precision_two_of_three() {
    let score = precision(&[1, 0, 1, 1, 0], &[1, 1, 1, 0, 0], &PrecisionConfig::default());
    assert_abs_diff_eq!(score, 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn binary_precision_without_true_positives() {
    let score = precision(&[0, 0, 0, 0], &[1, 1, 1, 1], &PrecisionConfig::default());
    assert_eq!(score, 0.0);
}

#[test]
fn binary_precision_all_correct() {
    let score = precision(&[1, 1, 1, 1], &[1, 1, 1, 1], &PrecisionConfig::default());
    assert_eq!(score, 1.0);
}

#[test]
fn mismatched_lengths_fail_with_shape_mismatch() {
    let result = PrecisionMetric.compute_precision(
        &[1, 0, 1, 1, 0],
        &[1, 1, 1, 0],
        &PrecisionConfig::default(),
    );
    match result {
        Err(Error::ShapeMismatch(msg)) => assert!(msg.contains("[4, 5]")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn macro_average_is_mean_of_per_class_precision() {
    let predictions = [0, 2, 1, 0, 0, 1, 2, 2];
    let references = [0, 1, 2, 0, 1, 2, 2, 1];
    // class 0: predicted at 0, 3, 4 -> 2 correct
    // class 1: predicted at 2, 5    -> 0 correct
    // class 2: predicted at 1, 6, 7 -> 1 correct
    let per_class = [2.0 / 3.0, 0.0, 1.0 / 3.0];

    let config = PrecisionConfig::default()
        .with_average(Average::Macro)
        .with_labels(vec![0, 1, 2]);
    let score = precision(&predictions, &references, &config);
    assert_abs_diff_eq!(score, per_class.iter().sum::<f64>() / 3.0, epsilon = 1e-12);

    let config = PrecisionConfig::default()
        .with_average(Average::None)
        .with_labels(vec![0, 1, 2]);
    let output = PrecisionMetric
        .compute_precision(&predictions, &references, &config)
        .unwrap();
    let scores = output["precision"].as_per_label().unwrap();
    let expected_scores = [0, 1, 2].into_iter().zip(per_class);
    for ((label, score), (expected_label, expected)) in scores.iter().zip(expected_scores) {
        assert_eq!(*label, expected_label);
        assert_abs_diff_eq!(*score, expected, epsilon = 1e-12);
    }
}

#[test]
fn binary_precision_stays_within_unit_interval() {
    for seed in 0..50_i64 {
        let len = (seed % 13 + 1) as usize;
        let predictions: Vec<i64> = (0..len as i64).map(|i| (i * seed + 1) % 2).collect();
        let references: Vec<i64> = (0..len as i64).map(|i| (i + seed) % 2).collect();
        let score = precision(&predictions, &references, &PrecisionConfig::default());
        assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }
}

#[test]
fn identical_calls_give_identical_results() {
    let metric = get_metric("precision").unwrap();
    let config = metric
        .parse_config(&json!({"average": "weighted", "sampleWeight": [1.0, 2.0, 0.5, 1.0]}))
        .unwrap();
    let inputs = MetricInputs::new(vec![0, 1, 2, 1], vec![0, 2, 2, 1]);
    let first = metric.compute(&inputs, config.as_ref()).unwrap();
    let second = metric.compute(&inputs, config.as_ref()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_computations_are_independent() {
    let metric: Arc<dyn Metric> = get_metric("precision").unwrap();
    let config = Arc::new(PrecisionConfig::default().with_average(Average::Micro));
    let inputs = MetricInputs::new(vec![0, 2, 1, 0, 0, 1], vec![0, 1, 2, 0, 1, 2]);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metric = metric.clone();
                let config = config.clone();
                let inputs = &inputs;
                s.spawn(move || metric.compute(inputs, &*config).unwrap())
            })
            .collect();
        for handle in handles {
            let output = handle.join().unwrap();
            assert_abs_diff_eq!(
                output["precision"].as_float().unwrap(),
                1.0 / 3.0,
                epsilon = 1e-12
            );
        }
    });
}

#[test]
fn evaluation_accumulates_batches() {
    let mut evaluation = Evaluation::for_metric("precision").unwrap();
    evaluation.add_batch(&[1, 0], &[1, 1]);
    evaluation.add_batch(&[1, 1, 0], &[1, 0, 0]);
    assert_abs_diff_eq!(
        evaluation.compute().unwrap()["precision"].as_float().unwrap(),
        2.0 / 3.0,
        epsilon = 1e-12
    );
}

#[test]
fn per_label_result_is_a_mapping() {
    let config = PrecisionConfig::default().with_average(Average::None);
    let output = PrecisionMetric
        .compute_precision(&[0, 1, 1, 2], &[0, 1, 2, 2], &config)
        .unwrap();
    assert_eq!(
        output["precision"],
        MetricValue::PerLabel(vec![(0, 1.0), (1, 0.5), (2, 1.0)])
    );
}
