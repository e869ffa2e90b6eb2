use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use wasser_client::db::StoreError;

use crate::validation::ValidationError;

pub const FETCH_FAILED: &str = "Fehler beim Abrufen der Daten";
pub const SAVE_FAILED: &str = "Fehler beim Speichern der Daten";
pub const CREATE_FAILED: &str = "Fehler beim Hinzufügen der Daten";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("a record for {month}/{year} already exists")]
    Duplicate { year: i32, month: i32 },
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Map a store failure, keeping `NotFound` and `Duplicate` distinct and
    /// tagging everything else with the user-facing message for the route.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |e| match e {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Duplicate { year, month } => ApiError::Duplicate { year, month },
            source => ApiError::Store { context, source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(e) => {
                metrics::counter!("validation_rejected_total").increment(1);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Datensatz {id} nicht gefunden"))
            }
            ApiError::Duplicate { year, month } => (
                StatusCode::CONFLICT,
                format!("Für {month}/{year} existiert bereits ein Datensatz"),
            ),
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, context, "record store error");
                metrics::counter!("store_errors_total").increment(1);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
