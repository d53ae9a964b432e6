use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::state::Collection;

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(ApiError::BadRequest(format!("expected a JSON object, got {other}"))),
        Err(e) => Err(ApiError::BadRequest(e.to_string())),
    }
}

/// Non-numeric ids can never match a stored record.
fn parse_id(id: &str) -> Result<u64, ApiError> {
    id.parse().map_err(|_| ApiError::NotFound)
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_handler(
    State(collection): State<Collection>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let object = parse_object(&body)?;
    let stored = collection.insert(object).await;
    tracing::debug!(id = %stored["id"], "created object");
    Ok((StatusCode::CREATED, Json(Value::Object(stored))))
}

pub async fn read_handler(
    State(collection): State<Collection>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let object = collection.get(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(Value::Object(object)))
}

pub async fn update_handler(
    State(collection): State<Collection>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    // Absence wins over a malformed body, like json-server.
    if collection.get(id).await.is_none() {
        return Err(ApiError::NotFound);
    }
    let object = parse_object(&body)?;
    let stored = collection.replace(id, object).await.ok_or(ApiError::NotFound)?;
    tracing::debug!(id, "replaced object");
    Ok(Json(Value::Object(stored)))
}

pub async fn delete_handler(
    State(collection): State<Collection>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if !collection.remove(id).await {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(id, "deleted object");
    Ok(StatusCode::OK)
}
