//! One-off prediction command

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::engine::PredictionService;
use crate::loader::load_model;
use crate::model::CustomerRecord;
use crate::server::PredictResponse;

/// Score a JSON record and print the API response body
pub async fn predict(
    mut config: AppConfig,
    input: Option<PathBuf>,
    model: Option<PathBuf>,
) -> Result<()> {
    let text = match input {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read record from stdin")?;
            text
        }
    };
    let record = parse_record(&text)?;

    if let Some(model) = model {
        config.registry.local_path = Some(model);
    }
    let model = load_model(&config.registry, config.hub.token.clone()).await?;
    let prediction = PredictionService::new(model.predictor()).predict(&record)?;

    let response = PredictResponse {
        input: record,
        predicted_class: prediction.predicted_class,
        predicted_probability: prediction.predicted_probability,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn parse_record(text: &str) -> Result<CustomerRecord> {
    let record: CustomerRecord =
        serde_json::from_str(text).context("Invalid customer record")?;
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let json = serde_json::to_string(&CustomerRecord::default()).unwrap();
        assert_eq!(parse_record(&json).unwrap(), CustomerRecord::default());

        let err = parse_record("{\"Age\": 30}").unwrap_err();
        assert!(format!("{:#}", err).contains("missing field"));
    }
}
