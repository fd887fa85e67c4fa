use derive_more::Display;
use itertools::Itertools;

use crate::error::{Error, Result};

/// Kind of target inferred from the labels present in the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum TargetType {
    #[display(fmt = "binary")]
    Binary,
    #[display(fmt = "multiclass")]
    Multiclass,
}

pub fn check_consistent_length(lengths: &[usize]) -> Result<()> {
    if lengths.iter().all_equal() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch(format!(
            "Found input variables with inconsistent numbers of samples: {:?}",
            lengths
        )))
    }
}

/// Sorted distinct labels found in either sequence.
pub fn unique_labels<L: Ord + Clone>(y_true: &[L], y_pred: &[L]) -> Vec<L> {
    y_true
        .iter()
        .chain(y_pred.iter())
        .sorted()
        .dedup()
        .cloned()
        .collect()
}

pub fn type_of_target<L>(present_labels: &[L]) -> TargetType {
    if present_labels.len() > 2 {
        TargetType::Multiclass
    } else {
        TargetType::Binary
    }
}
