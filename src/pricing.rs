//! Pricing calculators used when setting up products.

use crate::error::{LedgerError, Result};

/// Cost of one unit out of a purchase of `quantity` units.
pub fn unit_cost(cost: f64, quantity: f64) -> Result<f64> {
    if quantity == 0.0 {
        return Err(LedgerError::InvalidCalculation(
            "quantity cannot be zero".to_string(),
        ));
    }
    if cost < 0.0 || quantity < 0.0 {
        return Err(LedgerError::InvalidCalculation(
            "cost and quantity must not be negative".to_string(),
        ));
    }
    Ok(cost / quantity)
}

/// Price at which `margin_percent` of the price is profit over `unit_cost`.
pub fn suggested_price(unit_cost: f64, margin_percent: f64) -> Result<f64> {
    if !(0.0..100.0).contains(&margin_percent) {
        return Err(LedgerError::InvalidCalculation(format!(
            "margin must be at least 0% and below 100%, got {margin_percent}%"
        )));
    }
    if unit_cost < 0.0 {
        return Err(LedgerError::InvalidCalculation(
            "cost must not be negative".to_string(),
        ));
    }
    Ok(unit_cost / (1.0 - margin_percent / 100.0))
}

/// Profit as a percentage of the sale price.
pub fn product_margin(production_cost: f64, sale_price: f64) -> Result<f64> {
    if sale_price <= 0.0 {
        return Err(LedgerError::InvalidCalculation(
            "sale price must be greater than zero".to_string(),
        ));
    }
    Ok((sale_price - production_cost) / sale_price * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cost() {
        assert_eq!(unit_cost(100.0, 4.0).unwrap(), 25.0);
    }

    #[test]
    fn test_unit_cost_zero_quantity() {
        let err = unit_cost(100.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("quantity cannot be zero"));
    }

    #[test]
    fn test_suggested_price() {
        assert_eq!(suggested_price(30.0, 40.0).unwrap(), 50.0);
        assert_eq!(suggested_price(30.0, 0.0).unwrap(), 30.0);
        assert!(suggested_price(30.0, 100.0).is_err());
        assert!(suggested_price(30.0, -5.0).is_err());
    }

    #[test]
    fn test_product_margin() {
        assert_eq!(product_margin(30.0, 50.0).unwrap(), 40.0);
        assert!(product_margin(30.0, 0.0).is_err());
    }
}
