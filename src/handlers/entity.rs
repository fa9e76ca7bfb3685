//! Entity CRUD handlers: list, read, create, delete. Generic over the entity; the
//! service for `E` is projected out of the router state.

use crate::entity::Entity;
use crate::error::AppError;
use crate::response::{one_or_absent, AbsentPolicy};
use crate::service::CrudService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn entity_from_body<E: Entity>(body: Value) -> Result<E, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

pub async fn list<E: Entity>(
    State(service): State<CrudService<E>>,
) -> Result<Json<Vec<E>>, AppError> {
    let rows = service.find_all().await?;
    Ok(Json(rows))
}

pub async fn read<E: Entity>(
    State(service): State<CrudService<E>>,
    State(absent): State<AbsentPolicy>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let row = service.find_by_id(id).await?;
    one_or_absent(row, absent, || format!("{}/{}", E::PATH, id))
}

pub async fn create<E: Entity>(
    State(service): State<CrudService<E>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<E>, AppError> {
    let Json(body) = body?;
    let entity = entity_from_body::<E>(body)?;
    let saved = service.save(entity).await?;
    Ok(Json(saved))
}

pub async fn delete<E: Entity>(
    State(service): State<CrudService<E>>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    service.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
