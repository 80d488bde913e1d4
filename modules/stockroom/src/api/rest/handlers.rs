use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, OriginalUri, Path, Query};
use serde_json::Value;
use stockroom_errors::ApiResult;

use super::dto::{
    ClockInDto, ClockInFilterQuery, DeletedDto, EmailCountDto, ItemDto, ItemFilterQuery,
};
use super::error::{json_decode_to_problem, problem_at, query_rejection_to_problem};
use crate::domain::model::RecordId;
use crate::domain::service::Service;
use crate::domain::validation;

pub type JsonBody<T> = Json<T>;

/// Bodies are decoded as JSON whatever their `content-type`.
fn payload(body: &Bytes, instance: &str) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| json_decode_to_problem(&e, instance))
}

// ==================== Items ====================

pub async fn create_item(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> ApiResult<JsonBody<ItemDto>> {
    let at = problem_at(uri.path());
    let new_item = validation::new_item(&payload(&body, uri.path())?).map_err(&at)?;
    let item = svc.create_item(new_item).await.map_err(&at)?;
    Ok(Json(item.into()))
}

pub async fn get_item(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<JsonBody<ItemDto>> {
    let item = svc
        .get_item(&RecordId::new(id))
        .await
        .map_err(problem_at(uri.path()))?;
    Ok(Json(item.into()))
}

pub async fn filter_items(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ItemFilterQuery>, QueryRejection>,
) -> ApiResult<JsonBody<Vec<ItemDto>>> {
    let at = problem_at(uri.path());
    let Query(q) = query.map_err(|e| query_rejection_to_problem(&e, uri.path()))?;
    let filter = validation::item_filter(
        q.email.as_deref(),
        q.expiry_date.as_deref(),
        q.insert_date.as_deref(),
        q.quantity.as_deref(),
    )
    .map_err(&at)?;
    let items = svc.filter_items(&filter).await.map_err(&at)?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

pub async fn update_item(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<JsonBody<ItemDto>> {
    let at = problem_at(uri.path());
    let patch = validation::new_item(&payload(&body, uri.path())?).map_err(&at)?;
    let item = svc
        .update_item(&RecordId::new(id), patch)
        .await
        .map_err(&at)?;
    Ok(Json(item.into()))
}

pub async fn delete_item(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<JsonBody<DeletedDto>> {
    svc.delete_item(&RecordId::new(id))
        .await
        .map_err(problem_at(uri.path()))?;
    Ok(Json(DeletedDto::new("Item deleted")))
}

pub async fn count_items_by_email(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<JsonBody<Vec<EmailCountDto>>> {
    let counts = svc
        .count_items_by_email()
        .await
        .map_err(problem_at(uri.path()))?;
    Ok(Json(counts.into_iter().map(EmailCountDto::from).collect()))
}

// ==================== Clock-in ====================

pub async fn create_clock_in(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> ApiResult<JsonBody<ClockInDto>> {
    let at = problem_at(uri.path());
    let new_record = validation::new_clock_in(&payload(&body, uri.path())?).map_err(&at)?;
    let record = svc.create_clock_in(new_record).await.map_err(&at)?;
    Ok(Json(record.into()))
}

pub async fn get_clock_in(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<JsonBody<ClockInDto>> {
    let record = svc
        .get_clock_in(&RecordId::new(id))
        .await
        .map_err(problem_at(uri.path()))?;
    Ok(Json(record.into()))
}

pub async fn filter_clock_ins(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ClockInFilterQuery>, QueryRejection>,
) -> ApiResult<JsonBody<Vec<ClockInDto>>> {
    let at = problem_at(uri.path());
    let Query(q) = query.map_err(|e| query_rejection_to_problem(&e, uri.path()))?;
    let filter = validation::clock_in_filter(
        q.email.as_deref(),
        q.location.as_deref(),
        q.insert_datetime.as_deref(),
    )
    .map_err(&at)?;
    let records = svc.filter_clock_ins(&filter).await.map_err(&at)?;
    Ok(Json(records.into_iter().map(ClockInDto::from).collect()))
}

pub async fn update_clock_in(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<JsonBody<ClockInDto>> {
    let at = problem_at(uri.path());
    let patch = validation::new_clock_in(&payload(&body, uri.path())?).map_err(&at)?;
    let record = svc
        .update_clock_in(&RecordId::new(id), patch)
        .await
        .map_err(&at)?;
    Ok(Json(record.into()))
}

pub async fn delete_clock_in(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<JsonBody<DeletedDto>> {
    svc.delete_clock_in(&RecordId::new(id))
        .await
        .map_err(problem_at(uri.path()))?;
    Ok(Json(DeletedDto::new("Clock-in record deleted")))
}
