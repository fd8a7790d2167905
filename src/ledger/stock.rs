//! Coupling between sales and product inventory.
//!
//! A sale refers to its product by name only. When the name resolves to a
//! product that tracks stock, recording the sale takes units out and removing
//! it puts them back. Anything else (unknown name, untracked stock, product
//! deleted since) leaves inventory alone.

use tracing::{debug, warn};

use super::collection::Collection;
use super::records::{Product, Sale};
use crate::error::{LedgerError, Result};

pub(crate) fn product_named<'a>(
    products: &'a Collection<Product>,
    name: &str,
) -> Option<&'a Product> {
    products.find(|p| p.name == name)
}

/// Check that the sale fits in stock. Pure, so a failed sale leaves nothing behind.
pub(crate) fn check_available(products: &Collection<Product>, sale: &Sale) -> Result<()> {
    let Some(product) = product_named(products, &sale.product_name) else {
        debug!("Sale of unknown product '{}', stock not tracked", sale.product_name);
        return Ok(());
    };
    match product.stock {
        Some(available) if sale.quantity > available => {
            warn!(
                product = %product.name,
                requested = sale.quantity,
                available,
                "Rejected sale, not enough stock"
            );
            Err(LedgerError::InsufficientStock {
                product: product.name.clone(),
                requested: sale.quantity,
                available,
            })
        }
        _ => Ok(()),
    }
}

/// Take the sold units out of stock. Call only after `check_available` passed.
pub(crate) fn withdraw(products: &mut Collection<Product>, sale: &Sale) {
    if let Some(product) = products.find_mut(|p| p.name == sale.product_name) {
        if let Some(stock) = product.stock.as_mut() {
            *stock -= sale.quantity;
            debug!("Stock of '{}' down to {}", product.name, stock);
        }
    }
}

/// Put a removed sale's units back. Returns whether any stock changed.
pub(crate) fn restore(products: &mut Collection<Product>, sale: &Sale) -> bool {
    match products.find_mut(|p| p.name == sale.product_name) {
        Some(product) => match product.stock.as_mut() {
            Some(stock) => {
                *stock += sale.quantity;
                debug!("Stock of '{}' back up to {}", product.name, stock);
                true
            }
            None => false,
        },
        None => {
            debug!(
                "Product '{}' no longer exists, skipping restock",
                sale.product_name
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn product(id: u64, name: &str, stock: Option<f64>) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            production_cost: 10.0,
            sale_price: 20.0,
            prep_time: None,
            category: "Cakes".to_string(),
            stock,
            stock_minimum: None,
        }
    }

    fn sale(name: &str, quantity: f64) -> Sale {
        Sale {
            id: 100,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            product_name: name.to_string(),
            quantity,
            unit_price: 20.0,
            client: None,
            payment_method: "Cash".to_string(),
            total: quantity * 20.0,
        }
    }

    #[test]
    fn test_check_available_rejects_oversell() {
        let mut products = Collection::new();
        products.insert(product(1, "Cake", Some(5.0)));

        let err = check_available(&products, &sale("Cake", 6.0)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientStock { requested, available, .. }
                if requested == 6.0 && available == 5.0
        ));
        assert!(check_available(&products, &sale("Cake", 5.0)).is_ok());
    }

    #[test]
    fn test_untracked_and_unknown_products_pass() {
        let mut products = Collection::new();
        products.insert(product(1, "Cookie", None));

        assert!(check_available(&products, &sale("Cookie", 1000.0)).is_ok());
        assert!(check_available(&products, &sale("Ghost", 1000.0)).is_ok());

        withdraw(&mut products, &sale("Cookie", 3.0));
        assert_eq!(products.get(1).unwrap().stock, None);
        assert!(!restore(&mut products, &sale("Ghost", 3.0)));
    }

    #[test]
    fn test_withdraw_then_restore() {
        let mut products = Collection::new();
        products.insert(product(1, "Cake", Some(3.0)));

        withdraw(&mut products, &sale("Cake", 2.0));
        assert_eq!(products.get(1).unwrap().stock, Some(1.0));

        assert!(restore(&mut products, &sale("Cake", 2.0)));
        assert_eq!(products.get(1).unwrap().stock, Some(3.0));
    }
}
