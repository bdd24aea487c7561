//! Tourism - wellness tourism package purchase prediction
//!
//! Serves a pretrained random forest classifier that predicts whether a
//! customer buys the Wellness Tourism Package.
//!
//! # Architecture
//!
//! - **loader**: fetch the JSON forest artifact (Hub registry or local path)
//! - **engine**: validate, score and threshold a customer record
//! - **server**: JSON API and interactive HTML form
//! - **publish**: upload the deployment files to a Hugging Face Space
//!
//! # Example
//!
//! ```bash
//! # Start server
//! tourism serve --port 7860
//!
//! # Score one record
//! tourism predict record.json --model ./models/model.json
//!
//! # Publish the deployment files
//! HF_TOKEN=hf_... tourism publish --space cktai/tourism-wellness-predictor
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod loader;
pub mod model;
pub mod publish;
pub mod server;

// Re-export key types
pub use config::{AppConfig, HubConfig, RegistryConfig, ServerConfig, SpaceConfig};
pub use engine::{Prediction, PredictionService, Predictor};
pub use loader::{load_model, LoadedModel, RandomForest};
pub use model::CustomerRecord;
