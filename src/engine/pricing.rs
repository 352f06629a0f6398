use dashmap::DashMap;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::OrderLine;
use crate::models::outlet::MenuItem;

#[derive(Debug, Clone, Deserialize)]
pub struct RequestedItem {
    pub menu_item_id: Uuid,
    pub quantity: u32,
    pub special_requests: Option<String>,
}

/// Resolves requested items against the catalog and re-prices them. Client
/// supplied prices never enter here; every line takes the catalog's current
/// price. Any missing or unavailable item fails the whole order.
pub fn price_order(
    catalog: &DashMap<Uuid, MenuItem>,
    requested: &[RequestedItem],
) -> Result<(Vec<OrderLine>, f64), AppError> {
    if requested.is_empty() {
        return Err(AppError::Validation {
            field: "items",
            message: "order must contain at least one item".to_string(),
        });
    }

    if requested.iter().any(|item| item.quantity < 1) {
        return Err(AppError::Validation {
            field: "items.quantity",
            message: "quantity must be at least 1".to_string(),
        });
    }

    let unavailable: Vec<Uuid> = requested
        .iter()
        .filter(|item| {
            !catalog
                .get(&item.menu_item_id)
                .map(|entry| entry.is_available)
                .unwrap_or(false)
        })
        .map(|item| item.menu_item_id)
        .collect();

    if !unavailable.is_empty() {
        return Err(AppError::ItemsUnavailable {
            item_ids: unavailable,
        });
    }

    let mut total = 0.0;
    let mut lines = Vec::with_capacity(requested.len());
    for item in requested {
        let menu_item = catalog.get(&item.menu_item_id).ok_or_else(|| {
            AppError::Internal(format!("menu item {} vanished mid-pricing", item.menu_item_id))
        })?;
        total += menu_item.price * item.quantity as f64;
        lines.push(OrderLine {
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            price: menu_item.price,
            special_requests: item.special_requests.clone(),
        });
    }

    Ok((lines, total))
}

#[cfg(test)]
mod tests {
    use dashmap::DashMap;
    use uuid::Uuid;

    use super::{RequestedItem, price_order};
    use crate::error::AppError;
    use crate::models::outlet::MenuItem;

    fn catalog_with(items: &[(Uuid, f64, bool)]) -> DashMap<Uuid, MenuItem> {
        let catalog = DashMap::new();
        for (id, price, is_available) in items {
            catalog.insert(
                *id,
                MenuItem {
                    id: *id,
                    outlet_id: Uuid::from_u128(1),
                    name: "item".to_string(),
                    price: *price,
                    is_available: *is_available,
                },
            );
        }
        catalog
    }

    fn requested(id: Uuid, quantity: u32) -> RequestedItem {
        RequestedItem {
            menu_item_id: id,
            quantity,
            special_requests: None,
        }
    }

    #[test]
    fn total_is_sum_of_catalog_price_times_quantity() {
        let a = Uuid::from_u128(10);
        let b = Uuid::from_u128(11);
        let catalog = catalog_with(&[(a, 100.0, true), (b, 200.0, true)]);

        let (lines, total) =
            price_order(&catalog, &[requested(a, 2), requested(b, 1)]).unwrap();

        assert_eq!(total, 400.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].price, 100.0);
        assert_eq!(lines[1].price, 200.0);
    }

    #[test]
    fn missing_item_fails_the_whole_order() {
        let a = Uuid::from_u128(10);
        let ghost = Uuid::from_u128(99);
        let catalog = catalog_with(&[(a, 100.0, true)]);

        let err = price_order(&catalog, &[requested(a, 1), requested(ghost, 1)]).unwrap_err();

        match err {
            AppError::ItemsUnavailable { item_ids } => assert_eq!(item_ids, vec![ghost]),
            other => panic!("expected ItemsUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn unavailable_item_fails_the_whole_order() {
        let a = Uuid::from_u128(10);
        let sold_out = Uuid::from_u128(11);
        let catalog = catalog_with(&[(a, 100.0, true), (sold_out, 50.0, false)]);

        let err = price_order(&catalog, &[requested(a, 1), requested(sold_out, 1)]).unwrap_err();

        assert!(matches!(err, AppError::ItemsUnavailable { .. }));
    }

    #[test]
    fn zero_quantity_is_a_validation_error() {
        let a = Uuid::from_u128(10);
        let catalog = catalog_with(&[(a, 100.0, true)]);

        let err = price_order(&catalog, &[requested(a, 0)]).unwrap_err();

        assert!(matches!(err, AppError::Validation { field: "items.quantity", .. }));
    }

    #[test]
    fn empty_order_is_a_validation_error() {
        let catalog = catalog_with(&[]);
        let err = price_order(&catalog, &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "items", .. }));
    }
}
