use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::pricing::{RequestedItem, price_order};
use crate::engine::queue::{QueueEstimate, estimate_queue};
use crate::error::AppError;
use crate::models::delivery::Delivery;
use crate::models::order::{Order, OrderEvent, OrderStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/queue", get(get_queue))
        .route("/orders/:id/status", patch(transition_status))
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Uuid,
    pub outlet_id: Uuid,
    pub airport_id: Uuid,
    pub gate_number: Option<String>,
    pub pre_order_time: Option<DateTime<Utc>>,
    pub delivery_address: Option<String>,
    pub special_notes: Option<String>,
    pub items: Vec<RequestedItem>,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    match try_create_order(&state, payload) {
        Ok(order) => {
            state
                .metrics
                .orders_created_total
                .with_label_values(&["success"])
                .inc();

            let _ = state.order_events_tx.send(OrderEvent {
                order_id: order.id,
                status: order.status,
                at: order.created_at,
            });

            tracing::info!(
                order_id = %order.id,
                outlet_id = %order.outlet_id,
                total = order.total_amount,
                "order created"
            );

            Ok((StatusCode::CREATED, Json(order)))
        }
        Err(err) => {
            state
                .metrics
                .orders_created_total
                .with_label_values(&["rejected"])
                .inc();
            Err(err)
        }
    }
}

fn try_create_order(state: &AppState, payload: CreateOrderRequest) -> Result<Order, AppError> {
    if !state.outlets.contains_key(&payload.outlet_id) {
        return Err(AppError::NotFound(format!(
            "outlet {} not found",
            payload.outlet_id
        )));
    }

    let now = Utc::now();

    if let Some(pre_order_time) = payload.pre_order_time {
        let earliest = now + Duration::minutes(state.config.min_lead_minutes);
        if pre_order_time < earliest {
            return Err(AppError::Validation {
                field: "pre_order_time",
                message: format!(
                    "scheduled time must be at least {} minutes from now",
                    state.config.min_lead_minutes
                ),
            });
        }
    }

    let (items, total_amount) = price_order(&state.menu_items, &payload.items)?;

    let order = Order {
        id: Uuid::new_v4(),
        user_id: payload.user_id,
        outlet_id: payload.outlet_id,
        airport_id: payload.airport_id,
        gate_number: payload.gate_number,
        pre_order_time: payload.pre_order_time,
        delivery_address: payload.delivery_address,
        special_notes: payload.special_notes,
        items,
        total_amount,
        status: OrderStatus::Pending,
        created_at: now,
    };

    // Delivery goes in first so no reader resolving by order id can observe
    // an order without its linked delivery.
    state
        .deliveries
        .insert(order.id, Delivery::new(order.id, now));
    state.orders.insert(order.id, order.clone());

    Ok(order)
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub user_id: Option<Uuid>,
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let user_id = query.user_id.ok_or(AppError::Validation {
        field: "user_id",
        message: "user_id is required".to_string(),
    })?;

    let mut orders: Vec<Order> = state
        .orders
        .iter()
        .filter(|entry| entry.value().user_id == user_id)
        .map(|entry| entry.value().clone())
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders.truncate(20);

    Ok(Json(orders))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    Ok(Json(order.value().clone()))
}

#[derive(Serialize)]
struct QueueResponse {
    order: Order,
    #[serde(flatten)]
    estimate: QueueEstimate,
}

async fn get_queue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<QueueResponse>, AppError> {
    let order = state
        .orders
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    // One snapshot of the outlet's orders; position and wait estimate are
    // derived from the same set.
    let siblings: Vec<Order> = state
        .orders
        .iter()
        .filter(|entry| entry.value().outlet_id == order.outlet_id)
        .map(|entry| entry.value().clone())
        .collect();

    let estimate = estimate_queue(&order, &siblings, state.config.avg_prep_minutes);

    state.metrics.queue_lookups_total.inc();
    state
        .metrics
        .estimated_wait_minutes
        .observe(estimate.estimated_wait_minutes as f64);

    Ok(Json(QueueResponse { order, estimate }))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub status: OrderStatus,
}

async fn transition_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionRequest>,
) -> Result<Json<Order>, AppError> {
    // The map entry lock makes this a conditional update: the legality check
    // and the write see the same current status, so two concurrent requests
    // cannot race into an illegal sequence.
    let updated = {
        let mut entry = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        if !entry.status.can_transition_to(payload.status) {
            return Err(AppError::InvalidTransition {
                from: entry.status.to_string(),
                to: payload.status.to_string(),
            });
        }

        entry.status = payload.status;
        entry.clone()
    };

    state
        .metrics
        .order_transitions_total
        .with_label_values(&[payload.status.as_str()])
        .inc();

    let _ = state.order_events_tx.send(OrderEvent {
        order_id: updated.id,
        status: updated.status,
        at: Utc::now(),
    });

    tracing::info!(order_id = %updated.id, status = %updated.status, "order status updated");

    Ok(Json(updated))
}
