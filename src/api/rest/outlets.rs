use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::proximity::rank_by_proximity;
use crate::error::AppError;
use crate::geo::validate_coordinate;
use crate::models::outlet::{MenuItem, Outlet, OutletCandidate, PartialCoordinate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/outlets", post(create_outlet).get(list_outlets))
        .route("/outlets/:id/menu", post(add_menu_item))
        .route("/menu-items/:id/availability", patch(set_availability))
}

#[derive(Deserialize)]
pub struct CreateOutletRequest {
    pub airport_id: Uuid,
    pub name: String,
    pub terminal: Option<String>,
    pub location: Option<PartialCoordinate>,
}

async fn create_outlet(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOutletRequest>,
) -> Result<(StatusCode, Json<Outlet>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name",
            message: "name cannot be empty".to_string(),
        });
    }

    // A half-populated pair carries no usable position and is stored as
    // absent; the outlet then ranks with the unlocated candidates.
    let location = payload
        .location
        .and_then(PartialCoordinate::into_coordinate);
    if let Some(location) = &location {
        validate_coordinate(location)?;
    }

    let outlet = Outlet {
        id: Uuid::new_v4(),
        airport_id: payload.airport_id,
        name: payload.name,
        terminal: payload.terminal,
        location,
        created_at: Utc::now(),
    };

    state.outlets.insert(outlet.id, outlet.clone());
    Ok((StatusCode::CREATED, Json(outlet)))
}

#[derive(Deserialize)]
pub struct ListOutletsQuery {
    pub airport_id: Option<Uuid>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

async fn list_outlets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOutletsQuery>,
) -> Result<Json<Vec<OutletCandidate>>, AppError> {
    let airport_id = query.airport_id.ok_or(AppError::Validation {
        field: "airport_id",
        message: "airport_id is required".to_string(),
    })?;

    // A half-populated reference is treated as absent.
    let reference = PartialCoordinate {
        lat: query.lat,
        lng: query.lng,
    }
    .into_coordinate();
    if let Some(reference) = &reference {
        validate_coordinate(reference)?;
    }

    let mut outlets: Vec<Outlet> = state
        .outlets
        .iter()
        .filter(|entry| entry.value().airport_id == airport_id)
        .map(|entry| entry.value().clone())
        .collect();
    outlets.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(rank_by_proximity(reference.as_ref(), outlets)))
}

#[derive(Deserialize)]
pub struct AddMenuItemRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

async fn add_menu_item(
    State(state): State<Arc<AppState>>,
    Path(outlet_id): Path<Uuid>,
    Json(payload): Json<AddMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    if !state.outlets.contains_key(&outlet_id) {
        return Err(AppError::NotFound(format!("outlet {} not found", outlet_id)));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name",
            message: "name cannot be empty".to_string(),
        });
    }

    if !(payload.price > 0.0) {
        return Err(AppError::Validation {
            field: "price",
            message: "price must be positive".to_string(),
        });
    }

    let item = MenuItem {
        id: Uuid::new_v4(),
        outlet_id,
        name: payload.name,
        price: payload.price,
        is_available: payload.is_available,
    };

    state.menu_items.insert(item.id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Deserialize)]
pub struct SetAvailabilityRequest {
    pub is_available: bool,
}

async fn set_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<Json<MenuItem>, AppError> {
    let mut item = state
        .menu_items
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {} not found", id)))?;

    item.is_available = payload.is_available;

    Ok(Json(item.clone()))
}
