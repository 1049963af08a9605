//! Entity CRUD handlers, generic over the resource DTO: create, read, update,
//! partial update, delete, paginated list.

use crate::dto::Dto;
use crate::error::AppError;
use crate::model::Entity;
use crate::pagination::{page_request, pagination_headers};
use crate::response::{entity_created, entity_deleted, entity_updated};
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

fn entity_name<D: Dto>() -> &'static str {
    CrudService::<D>::entity_name()
}

fn parse_id<D: Dto>(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::bad_request(entity_name::<D>(), "idinvalid", format!("invalid id: {}", id_str)))
}

fn json_body<D: Dto>(body: Result<Json<D>, JsonRejection>) -> Result<D, AppError> {
    match body {
        Ok(Json(dto)) => Ok(dto),
        Err(JsonRejection::MissingJsonContentType(r)) => Err(AppError::UnsupportedMediaType(r.body_text())),
        Err(r) => Err(AppError::bad_request(entity_name::<D>(), "invalidbody", r.body_text())),
    }
}

fn validate<D: Dto>(dto: &D) -> Result<(), AppError> {
    RequestValidator::validate(&dto.clone().into_entity().to_record(), D::Entity::descriptor())
}

/// Body id must be present and match the path id.
fn check_path_id<D: Dto>(dto: &D, id: i64) -> Result<(), AppError> {
    match dto.id() {
        None => Err(AppError::bad_request(entity_name::<D>(), "idnull", "Invalid id")),
        Some(body_id) if body_id != id => Err(AppError::bad_request(entity_name::<D>(), "idinvalid", "Invalid ID")),
        Some(_) => Ok(()),
    }
}

async fn ensure_exists<D: Dto>(service: &CrudService<D>, id: i64) -> Result<(), AppError> {
    if service.exists(id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(entity_name::<D>(), "idnotfound"))
    }
}

pub async fn list<D: Dto>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let page = page_request(D::Entity::descriptor(), &params)?;
    let service = CrudService::<D>::new(state.db.clone());
    let total = service.count_all().await?;
    let rows = service.find_all(&page).await?;
    let headers = pagination_headers(uri.path(), uri.query(), &page, total);
    Ok((StatusCode::OK, headers, Json(rows)).into_response())
}

pub async fn create<D: Dto>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<D>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = entity_name::<D>();
    let dto = json_body(body)?;
    validate(&dto)?;
    if dto.id().is_some() {
        return Err(AppError::bad_request(
            entity,
            "idexists",
            format!("A new {} cannot already have an ID", entity),
        ));
    }
    let saved = CrudService::<D>::new(state.db.clone()).save(dto).await?;
    let id = saved.id().unwrap_or_default();

    let mut headers = entity_created(&state.config.application_name, entity, id);
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    if let Ok(v) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, v);
    }
    Ok((StatusCode::CREATED, headers, Json(saved)).into_response())
}

pub async fn read<D: Dto>(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Response, AppError> {
    let id = parse_id::<D>(&id_str)?;
    let dto = CrudService::<D>::new(state.db.clone())
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(entity_name::<D>(), "notfound"))?;
    Ok(Json(dto).into_response())
}

pub async fn update<D: Dto>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<D>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = entity_name::<D>();
    let id = parse_id::<D>(&id_str)?;
    let dto = json_body(body)?;
    validate(&dto)?;
    check_path_id(&dto, id)?;

    let service = CrudService::<D>::new(state.db.clone());
    ensure_exists(&service, id).await?;
    let saved = service
        .update(dto)
        .await?
        .ok_or_else(|| AppError::not_found(entity, "idnotfound"))?;
    let headers = entity_updated(&state.config.application_name, entity, id);
    Ok((headers, Json(saved)).into_response())
}

/// Merge patch: only fields present in the body overwrite the stored entity.
pub async fn partial_update<D: Dto>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<D>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = entity_name::<D>();
    let id = parse_id::<D>(&id_str)?;
    let dto = json_body(body)?;
    check_path_id(&dto, id)?;

    let service = CrudService::<D>::new(state.db.clone());
    ensure_exists(&service, id).await?;
    let saved = service
        .partial_update(dto)
        .await?
        .ok_or_else(|| AppError::not_found(entity, "idnotfound"))?;
    let headers = entity_updated(&state.config.application_name, entity, id);
    Ok((headers, Json(saved)).into_response())
}

/// Always 204, whether or not the row existed.
pub async fn delete<D: Dto>(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Response, AppError> {
    let entity = entity_name::<D>();
    let id = parse_id::<D>(&id_str)?;
    CrudService::<D>::new(state.db.clone()).delete(id).await?;
    let headers: HeaderMap = entity_deleted(&state.config.application_name, entity, id);
    Ok((StatusCode::NO_CONTENT, headers).into_response())
}
