use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::Config;
use crate::models::delivery::Delivery;
use crate::models::order::{Order, OrderEvent};
use crate::models::outlet::{MenuItem, Outlet};
use crate::observability::metrics::Metrics;

/// The datastore collaborator. Deliveries are keyed by order id (one-to-one
/// with orders).
pub struct AppState {
    pub outlets: DashMap<Uuid, Outlet>,
    pub menu_items: DashMap<Uuid, MenuItem>,
    pub orders: DashMap<Uuid, Order>,
    pub deliveries: DashMap<Uuid, Delivery>,
    pub order_events_tx: broadcast::Sender<OrderEvent>,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (order_events_tx, _unused_rx) = broadcast::channel(config.event_buffer_size);

        Self {
            outlets: DashMap::new(),
            menu_items: DashMap::new(),
            orders: DashMap::new(),
            deliveries: DashMap::new(),
            order_events_tx,
            metrics: Metrics::new(),
            config,
        }
    }
}
