use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery lifecycle, purely sequential. The rank of a status is its index
/// in the sequence and drives the tracking view's completed/current/upcoming
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    pub const SEQUENCE: [DeliveryStatus; 5] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Assigned,
        DeliveryStatus::PickedUp,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
    ];

    pub fn rank(self) -> usize {
        match self {
            DeliveryStatus::Pending => 0,
            DeliveryStatus::Assigned => 1,
            DeliveryStatus::PickedUp => 2,
            DeliveryStatus::InTransit => 3,
            DeliveryStatus::Delivered => 4,
        }
    }

    pub fn next(self) -> Option<DeliveryStatus> {
        Self::SEQUENCE.get(self.rank() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::Assigned => "ASSIGNED",
            DeliveryStatus::PickedUp => "PICKED_UP",
            DeliveryStatus::InTransit => "IN_TRANSIT",
            DeliveryStatus::Delivered => "DELIVERED",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-to-one with an Order; created atomically with it at `PENDING`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub order_id: Uuid,
    pub status: DeliveryStatus,
    pub courier_name: Option<String>,
    pub estimated_time: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub tracking_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(order_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            order_id,
            status: DeliveryStatus::Pending,
            courier_name: None,
            estimated_time: None,
            delivered_at: None,
            tracking_note: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryStatus;

    #[test]
    fn ranks_follow_the_sequence() {
        for (index, status) in DeliveryStatus::SEQUENCE.iter().enumerate() {
            assert_eq!(status.rank(), index);
        }
    }

    #[test]
    fn next_walks_the_sequence_and_stops_at_delivered() {
        assert_eq!(
            DeliveryStatus::Pending.next(),
            Some(DeliveryStatus::Assigned)
        );
        assert_eq!(
            DeliveryStatus::Assigned.next(),
            Some(DeliveryStatus::PickedUp)
        );
        assert_eq!(
            DeliveryStatus::PickedUp.next(),
            Some(DeliveryStatus::InTransit)
        );
        assert_eq!(
            DeliveryStatus::InTransit.next(),
            Some(DeliveryStatus::Delivered)
        );
        assert_eq!(DeliveryStatus::Delivered.next(), None);
    }
}
