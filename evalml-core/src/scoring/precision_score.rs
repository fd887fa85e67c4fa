use crate::{
    error::{Error, Result},
    types::{Average, ClassLabel, ZeroDivision},
};

use super::{check_consistent_length, label_counts, type_of_target, unique_labels, TargetType};

/// Keyword arguments of [`precision_score`].
#[derive(Debug, Clone)]
pub struct PrecisionParams<'a> {
    /// Labels to include and, for `Average::None`, their output order.
    pub labels: Option<&'a [ClassLabel]>,
    /// Positive class when `average` is `Average::Binary`.
    pub pos_label: ClassLabel,
    pub average: Average,
    pub sample_weight: Option<&'a [f64]>,
    pub zero_division: ZeroDivision,
}

impl Default for PrecisionParams<'_> {
    fn default() -> Self {
        PrecisionParams {
            labels: None,
            pos_label: DEFAULT_POS_LABEL,
            average: Average::default(),
            sample_weight: None,
            zero_division: ZeroDivision::default(),
        }
    }
}

pub const DEFAULT_POS_LABEL: ClassLabel = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum PrecisionScore {
    Averaged(f64),
    PerLabel(Vec<(ClassLabel, f64)>),
}

/// Precision, `tp / (tp + fp)`, of `y_pred` against the ground truth `y_true`.
///
/// Follows the semantics of scikit-learn's `precision_score`:
///
/// * all three sequences must have the same length,
/// * `Average::Binary` is only accepted for targets with at least two distinct labels,
///   and then scores `pos_label` alone, ignoring `labels`,
/// * `Average::Samples` needs multilabel targets and is always rejected here,
/// * labels without predicted samples score `zero_division`,
/// * NaN scores are left out of every average, and an average over nothing is NaN.
pub fn precision_score(
    y_true: &[ClassLabel],
    y_pred: &[ClassLabel],
    params: &PrecisionParams,
) -> Result<PrecisionScore> {
    match params.sample_weight {
        Some(weights) => check_consistent_length(&[y_true.len(), y_pred.len(), weights.len()])?,
        None => check_consistent_length(&[y_true.len(), y_pred.len()])?,
    }

    let present_labels = unique_labels(y_true, y_pred);
    let target_type = type_of_target(&present_labels);
    let labels = check_set_wise_labels(target_type, &present_labels, params)?;

    if params.average == Average::Samples {
        return Err(Error::InvalidAverageMode(
            "Samplewise metrics are not available outside of multilabel classification."
                .to_owned(),
        ));
    }

    let counts = label_counts(
        y_true,
        y_pred,
        params.sample_weight,
        &present_labels,
        labels.as_deref(),
    );

    let (tp_sum, pred_sum, true_sum) = if params.average == Average::Micro {
        let (tp, pred, truth) = counts.summed();
        (vec![tp], vec![pred], vec![truth])
    } else {
        (counts.tp_sum, counts.pred_sum, counts.true_sum)
    };

    let precision = prf_divide(&tp_sum, &pred_sum, params.average, params.zero_division);

    Ok(match params.average {
        Average::None => PrecisionScore::PerLabel(counts.labels.into_iter().zip(precision).collect()),
        Average::Weighted => PrecisionScore::Averaged(nan_average(&precision, Some(true_sum.as_slice()))),
        _ => PrecisionScore::Averaged(nan_average(&precision, None)),
    })
}

fn check_set_wise_labels(
    target_type: TargetType,
    present_labels: &[ClassLabel],
    params: &PrecisionParams,
) -> Result<Option<Vec<ClassLabel>>> {
    if params.average == Average::Binary {
        return match target_type {
            TargetType::Binary => {
                if present_labels.binary_search(&params.pos_label).is_err()
                    && present_labels.len() >= 2
                {
                    return Err(Error::InvalidLabelSet(format!(
                        "pos_label={} is not a valid label. It should be one of {:?}",
                        params.pos_label, present_labels
                    )));
                }
                Ok(Some(vec![params.pos_label]))
            }
            TargetType::Multiclass => Err(Error::InvalidAverageMode(format!(
                "Target is {} but average='binary'. Please choose another average setting, one of [None, 'micro', 'macro', 'weighted'].",
                target_type
            ))),
        };
    }

    if params.pos_label != DEFAULT_POS_LABEL {
        tracing::warn!(
            "Note that pos_label (set to {}) is ignored when average != 'binary' (got '{}'). You may use labels=[pos_label] to specify a single positive class.",
            params.pos_label,
            params.average
        );
    }

    Ok(params.labels.map(|labels| labels.to_vec()))
}

/// Element-wise `numerator / denominator`, substituting `zero_division` where the
/// denominator is zero.
fn prf_divide(
    numerator: &[f64],
    denominator: &[f64],
    average: Average,
    zero_division: ZeroDivision,
) -> Vec<f64> {
    let mut ill_defined = false;
    let result: Vec<f64> = numerator
        .iter()
        .zip(denominator.iter())
        .map(|(&n, &d)| {
            if d == 0.0 {
                ill_defined = true;
                zero_division.value()
            } else {
                n / d
            }
        })
        .collect();

    if ill_defined && zero_division == ZeroDivision::Warn {
        let (axis0, axis1) = if average == Average::Samples {
            ("label", "sample")
        } else {
            ("sample", "label")
        };
        let location = if result.len() == 1 {
            "due to".to_owned()
        } else {
            format!("in {axis1}s with")
        };
        tracing::warn!(
            "Precision is ill-defined and being set to 0.0 {location} no predicted {axis0}s. Use `zero_division` parameter to control this behavior."
        );
    }

    result
}

/// Mean of the non-NaN `values`, optionally weighted.
///
/// Returns NaN when nothing is left to average. Falls back to the unweighted mean when the
/// remaining weights sum to zero.
fn nan_average(values: &[f64], weights: Option<&[f64]>) -> f64 {
    let kept: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, &v)| (v, weights.map_or(1.0, |w| w[i])))
        .collect();

    if kept.is_empty() {
        return f64::NAN;
    }

    let total_weight: f64 = kept.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return kept.iter().map(|(v, _)| v).sum::<f64>() / kept.len() as f64;
    }
    kept.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight
}
