//! Core prediction engine
//!
//! This module provides the prediction pipeline:
//! - Predictor: Scores an encoded row (implemented by the loaded forest)
//! - PredictionService: Validates, scores and thresholds a customer record

mod predictor;
mod service;

pub use predictor::Predictor;
pub use service::{Prediction, PredictionService, DECISION_THRESHOLD};

#[cfg(test)]
pub(crate) use service::tests::FixedPredictor;
