use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LOSS: &str = "loss";
pub const VAL_LOSS: &str = "val_loss";
pub const ACCURACY: &str = "accuracy";
pub const VAL_ACCURACY: &str = "val_accuracy";

/// Per-epoch metric series recorded while training the forecasting model.
///
/// Accepts either a flat map of series (`{"loss": [..], "val_loss": [..]}`) or the
/// same map nested under a `history` key, which is how training frameworks usually
/// dump it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HistoryRepr", into = "BTreeMap<String, Vec<f64>>")]
pub struct TrainingHistory {
    series: BTreeMap<String, Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryRepr {
    Nested { history: BTreeMap<String, Vec<f64>> },
    Flat(BTreeMap<String, Vec<f64>>),
}

impl From<HistoryRepr> for TrainingHistory {
    fn from(repr: HistoryRepr) -> Self {
        match repr {
            HistoryRepr::Nested { history } | HistoryRepr::Flat(history) => {
                TrainingHistory { series: history }
            }
        }
    }
}

impl From<TrainingHistory> for BTreeMap<String, Vec<f64>> {
    fn from(history: TrainingHistory) -> Self {
        history.series
    }
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.insert(name.into(), values);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of epochs, i.e. the length of the longest series.
    pub fn epochs(&self) -> usize {
        self.series.values().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_and_nested_forms() {
        let flat: TrainingHistory =
            serde_json::from_str(r#"{"loss": [1.0, 0.5], "val_loss": [1.2, 0.7, 0.6]}"#).unwrap();
        let nested: TrainingHistory =
            serde_json::from_str(r#"{"history": {"loss": [1.0, 0.5], "val_loss": [1.2, 0.7, 0.6]}}"#)
                .unwrap();
        assert_eq!(flat, nested);
        assert_eq!(flat.get(LOSS), Some(&[1.0, 0.5][..]));
        assert_eq!(flat.epochs(), 3);
        assert!(flat.get(ACCURACY).is_none());
    }
}
