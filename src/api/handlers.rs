use super::auth::Caller;
use super::AppState;
use crate::error::{ApiError, EditError};
use crate::models::{NewProperty, Property, PropertyUpdate};
use crate::search::{
    self, parse_criteria, predicate::ExactMatch, Filter, Predicate, QueryDescriptor, SortKey,
    SortSpec, Window,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub success: bool,
    pub property: Property,
}

#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub success: bool,
    pub count: usize,
    pub properties: Vec<Property>,
}

impl PropertyResponse {
    fn ok(property: Property) -> Json<Self> {
        Json(Self {
            success: true,
            property,
        })
    }
}

pub async fn health() -> &'static str {
    "Property search API is running"
}

/// GET /api/properties
pub async fn search_properties(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<search::types::SearchResponse<Property>>> {
    let criteria = parse_criteria(&params).with_page_size_cap(state.config.search.max_page_size);
    let descriptor = QueryDescriptor::from_criteria(&criteria);
    let page = search::execute(state.store.as_ref(), &descriptor).await?;
    Ok(Json(page.into_response()))
}

/// GET /api/properties/:id
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PropertyResponse>> {
    let property = state
        .store
        .record_view(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(PropertyResponse::ok(property))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<NewProperty>,
) -> ApiResult<(StatusCode, Json<PropertyResponse>)> {
    body.validate().map_err(ApiError::Validation)?;

    let id = uuid::Uuid::new_v4().to_string();
    let property = body.into_property(id, caller.user_id, Utc::now());
    let property = state.store.insert(property).await?;
    info!(id = %property.id, owner = %property.owner, "Created property");

    Ok((StatusCode::CREATED, PropertyResponse::ok(property)))
}

fn check_owner(caller: &Caller, property: &Property, action: &str) -> Result<(), EditError> {
    if caller.can_modify(&property.owner) {
        Ok(())
    } else {
        Err(EditError::Forbidden(format!(
            "Not authorized to {action} this property"
        )))
    }
}

/// PUT /api/properties/:id
pub async fn update_property(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> ApiResult<Json<PropertyResponse>> {
    let now = Utc::now();
    let edit = |property: &mut Property| -> Result<(), EditError> {
        check_owner(&caller, property, "update")?;
        *property = update.apply(property, now).map_err(EditError::Invalid)?;
        Ok(())
    };

    let updated = state
        .store
        .update(&id, Box::new(edit))
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(%id, by = %caller.user_id, "Updated property");
    Ok(PropertyResponse::ok(updated))
}

/// DELETE /api/properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let property = state.store.get(&id).await?.ok_or(ApiError::NotFound)?;
    check_owner(&caller, &property, "delete")?;
    if !state.store.remove(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!(%id, by = %caller.user_id, "Deleted property");
    Ok(Json(json!({
        "success": true,
        "message": "Property deleted successfully",
    })))
}

/// GET /api/properties/user/properties
pub async fn user_properties(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<PropertyListResponse>> {
    let filter = Filter::open().with(Predicate::Exact(ExactMatch::Owner(caller.user_id)));
    let properties = state
        .store
        .find(&filter, &SortSpec::resolve(SortKey::Newest), Window::all())
        .await?;

    Ok(Json(PropertyListResponse {
        success: true,
        count: properties.len(),
        properties,
    }))
}

#[derive(Clone, Copy)]
enum Toggle {
    Featured,
    Verified,
}

async fn toggle(state: &AppState, caller: &Caller, id: &str, flag: Toggle) -> ApiResult<bool> {
    caller.require_admin()?;
    let now = Utc::now();
    let edit = move |property: &mut Property| -> Result<(), EditError> {
        match flag {
            Toggle::Featured => property.featured = !property.featured,
            Toggle::Verified => property.verified = !property.verified,
        }
        property.updated_at = now;
        Ok(())
    };

    let property = state
        .store
        .update(id, Box::new(edit))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(match flag {
        Toggle::Featured => property.featured,
        Toggle::Verified => property.verified,
    })
}

/// PUT /api/properties/:id/featured
pub async fn toggle_featured(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let featured = toggle(&state, &caller, &id, Toggle::Featured).await?;
    info!(%id, featured, "Toggled featured flag");
    Ok(Json(json!({ "success": true, "featured": featured })))
}

/// PUT /api/properties/:id/verify
pub async fn toggle_verified(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let verified = toggle(&state, &caller, &id, Toggle::Verified).await?;
    info!(%id, verified, "Toggled verified flag");
    Ok(Json(json!({ "success": true, "verified": verified })))
}
