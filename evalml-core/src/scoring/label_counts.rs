use std::collections::BTreeMap;

use itertools::Itertools;

/// Weighted per-label counts, one entry per selected label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCounts<L> {
    pub labels: Vec<L>,
    pub tp_sum: Vec<f64>,
    pub pred_sum: Vec<f64>,
    pub true_sum: Vec<f64>,
}

impl<L> LabelCounts<L> {
    /// Collapse all labels into a single global count.
    pub fn summed(&self) -> (f64, f64, f64) {
        (
            self.tp_sum.iter().sum(),
            self.pred_sum.iter().sum(),
            self.true_sum.iter().sum(),
        )
    }
}

/// Counts true positives, predicted positives and actual positives for each label.
///
/// When `labels` is given the result follows its order and may include labels absent from
/// the data (their counts are zero). Otherwise every label in `present_labels` is used in
/// sorted order. `sample_weight` must already match the input lengths.
pub fn label_counts<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    sample_weight: Option<&[f64]>,
    present_labels: &[L],
    labels: Option<&[L]>,
) -> LabelCounts<L> {
    let selected: Vec<L> = match labels {
        Some(labels) => labels.to_vec(),
        None => present_labels.to_vec(),
    };

    let index: BTreeMap<&L, usize> = selected
        .iter()
        .chain(present_labels.iter())
        .sorted()
        .dedup()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect();

    let mut tp_sum = vec![0.0; index.len()];
    let mut pred_sum = vec![0.0; index.len()];
    let mut true_sum = vec![0.0; index.len()];

    for (i, (t, p)) in y_true.iter().zip(y_pred.iter()).enumerate() {
        let weight = sample_weight.map_or(1.0, |w| w[i]);
        let (Some(&ti), Some(&pi)) = (index.get(t), index.get(p)) else {
            continue;
        };
        true_sum[ti] += weight;
        pred_sum[pi] += weight;
        if ti == pi {
            tp_sum[ti] += weight;
        }
    }

    let positions: Vec<usize> = selected.iter().map(|label| index[label]).collect();
    let pick = |sums: &[f64]| positions.iter().map(|&i| sums[i]).collect::<Vec<f64>>();

    LabelCounts {
        tp_sum: pick(&tp_sum),
        pred_sum: pick(&pred_sum),
        true_sum: pick(&true_sum),
        labels: selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::unique_labels;

    #[test]
    fn counts_follow_requested_label_order() {
        let y_true = [0, 1, 2, 0, 1, 2];
        let y_pred = [0, 2, 1, 0, 0, 1];
        let present = unique_labels(&y_true, &y_pred);
        let counts = label_counts(&y_true, &y_pred, None, &present, Some(&[2, 0, 9][..]));

        assert_eq!(counts.labels, vec![2, 0, 9]);
        assert_eq!(counts.tp_sum, vec![0.0, 2.0, 0.0]);
        assert_eq!(counts.pred_sum, vec![1.0, 3.0, 0.0]);
        assert_eq!(counts.true_sum, vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn weights_scale_counts() {
        let y_true = [1, 1, 0, 0];
        let y_pred = [1, 1, 1, 0];
        let present = unique_labels(&y_true, &y_pred);
        let counts = label_counts(&y_true, &y_pred, Some(&[1.0, 1.0, 2.0, 1.0][..]), &present, None);

        assert_eq!(counts.labels, vec![0, 1]);
        assert_eq!(counts.tp_sum, vec![1.0, 2.0]);
        assert_eq!(counts.pred_sum, vec![1.0, 4.0]);
        assert_eq!(counts.summed(), (3.0, 5.0, 5.0));
    }
}
