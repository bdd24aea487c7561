//! Predictor abstraction

use anyhow::Result;

use crate::model::FeatureRow;

/// Anything that scores an encoded customer row
///
/// Implementations are shared read-only across concurrent requests.
pub trait Predictor: Send + Sync {
    /// Probability that the customer purchases the package (class 1)
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64>;
}
