//! Prediction service
//!
//! Turns a validated customer record into a class label and probability.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::Predictor;
use crate::model::{CustomerRecord, FeatureRow};

/// Probability at or above which the customer is predicted to purchase
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Outcome of one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 = will purchase, 0 = will not purchase
    pub predicted_class: u8,
    /// Probability of class 1
    pub predicted_probability: f64,
}

impl Prediction {
    /// Threshold a probability into a prediction
    pub fn from_probability(probability: f64) -> Self {
        Self {
            predicted_class: u8::from(probability >= DECISION_THRESHOLD),
            predicted_probability: probability,
        }
    }

    pub fn will_purchase(&self) -> bool {
        self.predicted_class == 1
    }
}

/// Stateless prediction over a shared, immutable predictor
#[derive(Clone)]
pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    /// Score a record
    ///
    /// Records with non-finite numbers are rejected before the model is
    /// called. Model failures and probabilities outside `[0, 1]` are errors.
    pub fn predict(&self, record: &CustomerRecord) -> Result<Prediction> {
        record.validate()?;

        let row = FeatureRow::from_record(record);
        let probability = self
            .predictor
            .predict_probability(&row)
            .context("Model inference failed")?;

        if !(0.0..=1.0).contains(&probability) {
            bail!("Model returned probability {} outside [0, 1]", probability);
        }

        let prediction = Prediction::from_probability(probability);
        tracing::debug!(
            predicted_class = prediction.predicted_class,
            predicted_probability = prediction.predicted_probability,
            "Prediction complete"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed probability and counts calls
    pub(crate) struct FixedPredictor {
        pub probability: f64,
        pub calls: AtomicUsize,
    }

    impl FixedPredictor {
        pub(crate) fn new(probability: f64) -> Arc<Self> {
            Arc::new(Self {
                probability,
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Predictor for FixedPredictor {
        fn predict_probability(&self, _row: &FeatureRow) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.probability)
        }
    }

    /// Probability grows with the age column
    struct AgePredictor;

    impl Predictor for AgePredictor {
        fn predict_probability(&self, row: &FeatureRow) -> Result<f64> {
            Ok((row.get(0).unwrap_or(0.0) / 100.0).clamp(0.0, 1.0))
        }
    }

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict_probability(&self, _row: &FeatureRow) -> Result<f64> {
            bail!("tree evaluation failed")
        }
    }

    #[test]
    fn test_threshold() {
        assert_eq!(Prediction::from_probability(0.5).predicted_class, 1);
        assert_eq!(Prediction::from_probability(0.4999).predicted_class, 0);
        assert_eq!(Prediction::from_probability(1.0).predicted_class, 1);
        assert_eq!(Prediction::from_probability(0.0).predicted_class, 0);
    }

    #[test]
    fn test_class_matches_probability() {
        let service = PredictionService::new(Arc::new(AgePredictor));
        for age in [18.0, 30.0, 49.0, 50.0, 51.0, 75.0, 100.0] {
            let record = CustomerRecord {
                age,
                ..Default::default()
            };
            let prediction = service.predict(&record).unwrap();
            assert!((0.0..=1.0).contains(&prediction.predicted_probability));
            assert_eq!(
                prediction.will_purchase(),
                prediction.predicted_probability >= DECISION_THRESHOLD
            );
        }
    }

    #[test]
    fn test_out_of_range_probability() {
        let service = PredictionService::new(FixedPredictor::new(1.2));
        assert!(service.predict(&CustomerRecord::default()).is_err());

        let service = PredictionService::new(FixedPredictor::new(f64::NAN));
        assert!(service.predict(&CustomerRecord::default()).is_err());
    }

    #[test]
    fn test_model_error_propagates() {
        let service = PredictionService::new(Arc::new(FailingPredictor));
        let err = service.predict(&CustomerRecord::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("tree evaluation failed"));
    }

    #[test]
    fn test_invalid_record_never_reaches_model() {
        let predictor = FixedPredictor::new(0.7);
        let service = PredictionService::new(predictor.clone());
        let record = CustomerRecord {
            monthly_income: f64::INFINITY,
            ..Default::default()
        };
        assert!(service.predict(&record).is_err());
        assert_eq!(predictor.calls(), 0);

        service.predict(&CustomerRecord::default()).unwrap();
        assert_eq!(predictor.calls(), 1);
    }
}
