//! HTTP request handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, Form, Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::form::{self, Outcome};
use crate::engine::PredictionService;
use crate::model::CustomerRecord;

/// Fixed acknowledgment returned by `GET /`
pub const ROOT_MESSAGE: &str = "Tourism Wellness Package Prediction API is running.";

/// Shared application state
pub struct AppState {
    pub service: PredictionService,
    /// Name of the loaded model, for logs
    pub model_name: String,
}

impl AppState {
    pub fn new(service: PredictionService, model_name: impl Into<String>) -> Self {
        Self {
            service,
            model_name: model_name.into(),
        }
    }
}

/// Service info endpoint
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// JSON prediction endpoint
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CustomerRecord>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(record) = payload.map_err(|rejection| ApiError::Validation {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    record.validate().map_err(|e| ApiError::Validation {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: e.to_string(),
    })?;

    let prediction = state.service.predict(&record).map_err(|e| {
        let message = format!("{:#}", e);
        tracing::error!(model = %state.model_name, error = %message, "Inference failed");
        ApiError::Inference(e)
    })?;

    Ok(Json(PredictResponse {
        input: record,
        predicted_class: prediction.predicted_class,
        predicted_probability: prediction.predicted_probability,
    }))
}

/// Render the empty form
pub async fn form_page() -> Html<String> {
    Html(form::render_page(&form::initial_values(), Outcome::Empty))
}

/// Handle a form submission
pub async fn form_submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let values = match payload {
        Ok(Form(values)) => values,
        Err(rejection) => {
            let page = form::render_page(
                &form::initial_values(),
                Outcome::Error(&rejection.body_text()),
            );
            return (rejection.status(), Html(page)).into_response();
        }
    };

    let record = match form::record_from_form(&values) {
        Ok(record) => record,
        Err(e) => {
            let page = form::render_page(&values, Outcome::Error(&e.to_string()));
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    match state.service.predict(&record) {
        Ok(prediction) => {
            let page = form::render_page(&values, Outcome::Predicted(&record, &prediction));
            (StatusCode::OK, Html(page)).into_response()
        }
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!(model = %state.model_name, error = %message, "Inference failed");
            let page = form::render_page(&values, Outcome::Error("Prediction failed"));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

/// Request failure, rendered as an [`ErrorResponse`]
#[derive(Debug)]
pub enum ApiError {
    /// The request never reached the model
    Validation { status: StatusCode, message: String },
    /// The model failed on a valid request
    Inference(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            ApiError::Validation { status, message } => {
                (status, message, "invalid_request_error")
            }
            ApiError::Inference(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
                "server_error",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    message,
                    r#type: kind.to_string(),
                },
            }),
        )
            .into_response()
    }
}

// Request/Response types

#[derive(Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct PredictResponse {
    pub input: CustomerRecord,
    pub predicted_class: u8,
    pub predicted_probability: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
}
