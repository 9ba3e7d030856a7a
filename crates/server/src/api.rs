//! Handlers for the JSON envelope operations and the redirect front door.
//!
//! POST operations read the raw body and decode it themselves so a malformed
//! envelope always yields `400 Invalid request` instead of the extractor's
//! own rejection text.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use common::{
    types::{
        DeleteRequest, GetRequest, GetResponse, PutRequest, PutResponse, ScanRequest, ScanResponse,
    },
    STATUS_BODY,
};
use serde::de::DeserializeOwned;
use service::CallContext;
use tracing::debug;

use crate::errors::ApiError;
use crate::routes::SharedStore;

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Liveness only; never touches storage.
pub async fn status() -> &'static str {
    STATUS_BODY
}

pub async fn scan(State(store): State<SharedStore>, body: Bytes) -> Result<Json<ScanResponse>, ApiError> {
    let ScanRequest {} = decode(&body)?;
    let ctx = CallContext::new();
    let records = store.scan(&ctx).await?;
    debug!(request_id = %ctx.request_id(), count = records.len(), "scan ok");
    Ok(Json(ScanResponse { records, error: None }))
}

pub async fn get_record(State(store): State<SharedStore>, body: Bytes) -> Result<Json<GetResponse>, ApiError> {
    let req: GetRequest = decode(&body)?;
    let ctx = CallContext::new();
    let record = store.get(&ctx, &req.name).await?;
    debug!(request_id = %ctx.request_id(), name = %record.name, "get ok");
    Ok(Json(GetResponse { record: Some(record), error: None }))
}

pub async fn put_record(State(store): State<SharedStore>, body: Bytes) -> Result<Json<PutResponse>, ApiError> {
    let req: PutRequest = decode(&body)?;
    let ctx = CallContext::new();
    let record = store.put(&ctx, req.record).await?;
    Ok(Json(PutResponse { record: Some(record), error: None }))
}

/// Success is a 200 with an empty body.
pub async fn delete_record(State(store): State<SharedStore>, body: Bytes) -> Result<StatusCode, ApiError> {
    let req: DeleteRequest = decode(&body)?;
    let ctx = CallContext::new();
    store.delete(&ctx, &req.name).await?;
    Ok(StatusCode::OK)
}

/// `GET /c/<name>`: 301 to the record's destination.
///
/// A name that cannot be decoded can never match a record and is a 404. A
/// stored destination that is not a valid header value is a 500.
pub async fn redirect(
    State(store): State<SharedStore>,
    name: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(name) = name.map_err(|e| ApiError::UnknownName(e.body_text()))?;
    let ctx = CallContext::new();
    let record = store.get(&ctx, &name).await?;
    let location = HeaderValue::try_from(record.to.as_str())
        .map_err(|e| ApiError::InvalidLocation(format!("record {name}: {e}")))?;
    debug!(request_id = %ctx.request_id(), %name, to = %record.to, "redirect");
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
