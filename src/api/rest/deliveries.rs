use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::models::order::Order;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries/:order_id/track", get(track_delivery))
        .route("/deliveries/:order_id", patch(advance_delivery))
}

#[derive(Serialize)]
struct DeliveryStep {
    status: DeliveryStatus,
    rank: usize,
    phase: &'static str,
}

#[derive(Serialize)]
struct TrackResponse {
    delivery: Delivery,
    order: Order,
    steps: Vec<DeliveryStep>,
}

fn steps_for(current: DeliveryStatus) -> Vec<DeliveryStep> {
    DeliveryStatus::SEQUENCE
        .iter()
        .map(|status| {
            let phase = match status.rank().cmp(&current.rank()) {
                std::cmp::Ordering::Less => "completed",
                std::cmp::Ordering::Equal => "current",
                std::cmp::Ordering::Greater => "upcoming",
            };
            DeliveryStep {
                status: *status,
                rank: status.rank(),
                phase,
            }
        })
        .collect()
}

async fn track_delivery(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<TrackResponse>, AppError> {
    let delivery = state
        .deliveries
        .get(&order_id)
        .map(|entry| entry.value().clone());
    let order = state.orders.get(&order_id).map(|entry| entry.value().clone());

    match (delivery, order) {
        (Some(delivery), Some(order)) => {
            let steps = steps_for(delivery.status);
            Ok(Json(TrackResponse {
                delivery,
                order,
                steps,
            }))
        }
        (None, Some(_)) => Err(AppError::IntegrityViolation(format!(
            "order {} has no linked delivery",
            order_id
        ))),
        (Some(_), None) => Err(AppError::IntegrityViolation(format!(
            "delivery for {} has no linked order",
            order_id
        ))),
        (None, None) => Err(AppError::NotFound(format!(
            "delivery for order {} not found",
            order_id
        ))),
    }
}

#[derive(Deserialize)]
pub struct AdvanceDeliveryRequest {
    pub status: DeliveryStatus,
    pub courier_name: Option<String>,
    pub estimated_time: Option<DateTime<Utc>>,
    pub tracking_note: Option<String>,
}

/// Backoffice progression. The lifecycle is purely sequential, so the only
/// legal target is the next status in the sequence.
async fn advance_delivery(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<AdvanceDeliveryRequest>,
) -> Result<Json<Delivery>, AppError> {
    let mut delivery = state
        .deliveries
        .get_mut(&order_id)
        .ok_or_else(|| AppError::NotFound(format!("delivery for order {} not found", order_id)))?;

    if delivery.status.next() != Some(payload.status) {
        return Err(AppError::InvalidTransition {
            from: delivery.status.to_string(),
            to: payload.status.to_string(),
        });
    }

    let now = Utc::now();
    delivery.status = payload.status;
    delivery.updated_at = now;

    if let Some(courier_name) = payload.courier_name {
        delivery.courier_name = Some(courier_name);
    }
    if let Some(estimated_time) = payload.estimated_time {
        delivery.estimated_time = Some(estimated_time);
    }
    if let Some(tracking_note) = payload.tracking_note {
        delivery.tracking_note = Some(tracking_note);
    }

    // delivered_at is stamped exactly when the lifecycle reaches DELIVERED.
    if payload.status == DeliveryStatus::Delivered {
        delivery.delivered_at = Some(now);
    }

    tracing::info!(order_id = %order_id, status = %delivery.status, "delivery advanced");

    Ok(Json(delivery.clone()))
}
