use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::order::{Order, OrderStatus};

/// Redacted view of a sibling order ahead in the queue. Exposes a short
/// opaque order number, never the internal id or another customer's items.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub position: usize,
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueEstimate {
    pub queue_position: usize,
    pub orders_ahead: Vec<QueueEntry>,
    pub estimated_wait_minutes: u64,
    pub total_in_queue: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Computes the target's queue position among `outlet_orders`, a single
/// snapshot of every order at the target's outlet. Only active siblings
/// placed strictly before the target count; the target itself never does.
pub fn estimate_queue(
    target: &Order,
    outlet_orders: &[Order],
    avg_prep_minutes: u64,
) -> QueueEstimate {
    if !target.status.is_active() {
        return QueueEstimate {
            queue_position: 0,
            orders_ahead: Vec::new(),
            estimated_wait_minutes: 0,
            total_in_queue: 0,
            message: Some("Order is no longer in queue".to_string()),
        };
    }

    let mut ahead: Vec<&Order> = outlet_orders
        .iter()
        .filter(|sibling| {
            sibling.id != target.id
                && sibling.status.is_active()
                && sibling.created_at < target.created_at
        })
        .collect();
    ahead.sort_by_key(|sibling| sibling.created_at);

    let queue_position = ahead.len() + 1;
    let estimated_wait_minutes = ahead.len() as u64 * avg_prep_minutes;

    let orders_ahead = ahead
        .iter()
        .enumerate()
        .map(|(index, sibling)| QueueEntry {
            position: index + 1,
            order_number: sibling.order_number(),
            placed_at: sibling.created_at,
            status: sibling.status,
        })
        .collect();

    QueueEstimate {
        queue_position,
        orders_ahead,
        estimated_wait_minutes,
        total_in_queue: queue_position,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::estimate_queue;
    use crate::models::order::{Order, OrderStatus};

    fn order(seed: u128, status: OrderStatus, minutes_ago: i64) -> Order {
        Order {
            id: Uuid::from_u128(seed),
            user_id: Uuid::from_u128(1),
            outlet_id: Uuid::from_u128(2),
            airport_id: Uuid::from_u128(3),
            gate_number: None,
            pre_order_time: None,
            delivery_address: None,
            special_notes: None,
            items: Vec::new(),
            total_amount: 0.0,
            status,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn position_counts_only_earlier_active_siblings() {
        let first = order(1, OrderStatus::Preparing, 30);
        let target = order(2, OrderStatus::Pending, 20);
        let later = order(3, OrderStatus::Pending, 10);
        let snapshot = vec![later, target.clone(), first];

        let estimate = estimate_queue(&target, &snapshot, 10);

        assert_eq!(estimate.orders_ahead.len(), 1);
        assert_eq!(estimate.queue_position, 2);
        assert_eq!(estimate.estimated_wait_minutes, 10);
        assert!(estimate.message.is_none());
    }

    #[test]
    fn inactive_siblings_do_not_count() {
        let ready = order(1, OrderStatus::Ready, 40);
        let cancelled = order(2, OrderStatus::Cancelled, 35);
        let active = order(3, OrderStatus::Confirmed, 30);
        let target = order(4, OrderStatus::Pending, 20);
        let snapshot = vec![ready, cancelled, active, target.clone()];

        let estimate = estimate_queue(&target, &snapshot, 10);

        assert_eq!(estimate.queue_position, 2);
        assert_eq!(estimate.estimated_wait_minutes, 10);
    }

    #[test]
    fn inactive_target_reports_zero_position() {
        let sibling = order(1, OrderStatus::Pending, 30);
        let target = order(2, OrderStatus::Ready, 20);
        let snapshot = vec![sibling, target.clone()];

        let estimate = estimate_queue(&target, &snapshot, 10);

        assert_eq!(estimate.queue_position, 0);
        assert!(estimate.orders_ahead.is_empty());
        assert_eq!(estimate.estimated_wait_minutes, 0);
        assert!(estimate.message.is_some());
    }

    #[test]
    fn entries_are_redacted_and_oldest_first() {
        let oldest = order(0xAA, OrderStatus::Pending, 30);
        let middle = order(0xBB, OrderStatus::Confirmed, 25);
        let target = order(0xCC, OrderStatus::Pending, 10);
        let snapshot = vec![middle.clone(), oldest.clone(), target.clone()];

        let estimate = estimate_queue(&target, &snapshot, 10);

        assert_eq!(estimate.orders_ahead.len(), 2);
        assert_eq!(estimate.orders_ahead[0].order_number, oldest.order_number());
        assert_eq!(estimate.orders_ahead[1].order_number, middle.order_number());
        assert_eq!(estimate.orders_ahead[0].position, 1);
        assert_eq!(estimate.orders_ahead[1].position, 2);
        for entry in &estimate.orders_ahead {
            assert_eq!(entry.order_number.len(), 6);
        }
    }

    #[test]
    fn wait_scales_with_configured_prep_minutes() {
        let a = order(1, OrderStatus::Pending, 40);
        let b = order(2, OrderStatus::Pending, 30);
        let target = order(3, OrderStatus::Pending, 10);
        let snapshot = vec![a, b, target.clone()];

        let estimate = estimate_queue(&target, &snapshot, 7);

        assert_eq!(estimate.queue_position, 3);
        assert_eq!(estimate.estimated_wait_minutes, 14);
    }
}
