use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collection::{Draft, Record, RecordId};
use crate::error::{LedgerError, Result};

/// Expense category counted as cost of ingredients on the dashboard
pub const INGREDIENTS_CATEGORY: &str = "Ingredients";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Expense {
    pub id: RecordId,
    pub date: NaiveDate,
    pub concept: String,
    pub quantity: f64,
    pub unit: String,
    pub cost: f64,
    pub category: String,
}

impl Expense {
    pub fn unit_cost(&self) -> f64 {
        self.cost / self.quantity
    }
}

impl Record for Expense {
    const KIND: &'static str = "expense";

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Sale {
    pub id: RecordId,
    pub date: NaiveDate,
    /// Looked up against `Product::name`; not an enforced reference.
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub payment_method: String,
    /// quantity * unit_price at the time of sale, never recomputed
    pub total: f64,
}

impl Record for Sale {
    const KIND: &'static str = "sale";

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub production_cost: f64,
    pub sale_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    pub category: String,
    /// `None` means stock is not tracked for this product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_minimum: Option<f64>,
}

impl Product {
    pub fn tracks_stock(&self) -> bool {
        self.stock.is_some()
    }

    /// Low only when both stock and minimum are set and stock has reached the minimum.
    pub fn is_low_stock(&self) -> bool {
        match (self.stock, self.stock_minimum) {
            (Some(stock), Some(minimum)) => stock <= minimum,
            _ => false,
        }
    }

    pub fn unit_margin(&self) -> f64 {
        self.sale_price - self.production_cost
    }
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub date: String,
    pub concept: String,
    pub quantity: String,
    pub unit: String,
    pub cost: String,
    pub category: String,
}

impl Draft for ExpenseDraft {
    type Record = Expense;

    fn validate(&self, id: RecordId) -> Result<Expense> {
        Ok(Expense {
            id,
            date: parse_date("date", &self.date)?,
            concept: required("concept", &self.concept)?,
            quantity: positive("quantity", &self.quantity)?,
            unit: required("unit", &self.unit)?,
            cost: positive("cost", &self.cost)?,
            category: required("category", &self.category)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    pub date: String,
    pub product_name: String,
    pub quantity: String,
    pub unit_price: String,
    pub client: Option<String>,
    pub payment_method: String,
}

impl Draft for SaleDraft {
    type Record = Sale;

    fn validate(&self, id: RecordId) -> Result<Sale> {
        let date = parse_date("date", &self.date)?;
        let product_name = required("product", &self.product_name)?;
        let quantity = positive("quantity", &self.quantity)?;
        let unit_price = positive("unit price", &self.unit_price)?;
        let payment_method = required("payment method", &self.payment_method)?;

        Ok(Sale {
            id,
            date,
            product_name,
            quantity,
            unit_price,
            client: optional_text(self.client.as_deref()),
            payment_method,
            total: quantity * unit_price,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub production_cost: String,
    pub sale_price: String,
    pub prep_time: Option<String>,
    pub category: String,
    pub stock: Option<String>,
    pub stock_minimum: Option<String>,
}

impl Draft for ProductDraft {
    type Record = Product;

    fn validate(&self, id: RecordId) -> Result<Product> {
        Ok(Product {
            id,
            name: required("name", &self.name)?,
            description: optional_text(self.description.as_deref()),
            production_cost: positive("production cost", &self.production_cost)?,
            sale_price: positive("sale price", &self.sale_price)?,
            prep_time: optional_text(self.prep_time.as_deref()),
            category: required("category", &self.category)?,
            stock: optional_non_negative("stock", self.stock.as_deref())?,
            stock_minimum: optional_non_negative("stock minimum", self.stock_minimum.as_deref())?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number(field: &'static str, value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::validation(field, "is required"));
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(LedgerError::validation(
            field,
            format!("'{value}' is not a number"),
        )),
    }
}

pub(crate) fn positive(field: &'static str, value: &str) -> Result<f64> {
    let n = number(field, value)?;
    if n <= 0.0 {
        return Err(LedgerError::validation(field, "must be greater than 0"));
    }
    Ok(n)
}

pub(crate) fn non_negative(field: &'static str, value: &str) -> Result<f64> {
    let n = number(field, value)?;
    if n < 0.0 {
        return Err(LedgerError::validation(field, "must not be negative"));
    }
    Ok(n)
}

fn optional_non_negative(field: &'static str, value: Option<&str>) -> Result<Option<f64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => non_negative(field, v).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::validation(field, "is required"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        LedgerError::validation(field, format!("'{value}' is not a YYYY-MM-DD date"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_draft() -> ExpenseDraft {
        ExpenseDraft {
            date: "2025-03-02".into(),
            concept: "Flour".into(),
            quantity: "4".into(),
            unit: "kg".into(),
            cost: "100".into(),
            category: "Ingredients".into(),
        }
    }

    fn field_of(err: LedgerError) -> &'static str {
        match err {
            LedgerError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_expense_unit_cost() {
        let expense = expense_draft().validate(1).unwrap();
        assert_eq!(expense.unit_cost(), 25.0);
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_expense_rejects_zero_quantity() {
        let draft = ExpenseDraft {
            quantity: "0".into(),
            ..expense_draft()
        };
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "quantity");
    }

    #[test]
    fn test_expense_rejects_non_numeric_cost() {
        let draft = ExpenseDraft {
            cost: "abc".into(),
            ..expense_draft()
        };
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "cost");

        let draft = ExpenseDraft {
            cost: "NaN".into(),
            ..expense_draft()
        };
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "cost");
    }

    #[test]
    fn test_expense_rejects_blank_concept_and_bad_date() {
        let draft = ExpenseDraft {
            concept: "   ".into(),
            ..expense_draft()
        };
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "concept");

        let draft = ExpenseDraft {
            date: "02/03/2025".into(),
            ..expense_draft()
        };
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "date");
    }

    #[test]
    fn test_sale_total_is_computed() {
        let sale = SaleDraft {
            date: "2025-03-02".into(),
            product_name: " Cake ".into(),
            quantity: "3".into(),
            unit_price: "12.5".into(),
            client: Some("".into()),
            payment_method: "Cash".into(),
        }
        .validate(7)
        .unwrap();
        assert_eq!(sale.total, 37.5);
        assert_eq!(sale.product_name, "Cake");
        assert_eq!(sale.client, None);
    }

    #[test]
    fn test_product_stock_is_optional_but_non_negative() {
        let mut draft = ProductDraft {
            name: "Cake".into(),
            production_cost: "30".into(),
            sale_price: "50".into(),
            category: "Cakes".into(),
            ..Default::default()
        };
        let product = draft.validate(1).unwrap();
        assert!(!product.tracks_stock());
        assert!(!product.is_low_stock());

        draft.stock = Some("0".into());
        draft.stock_minimum = Some("0".into());
        let product = draft.validate(1).unwrap();
        assert_eq!(product.stock, Some(0.0));
        assert!(product.is_low_stock());

        draft.stock = Some("-1".into());
        assert_eq!(field_of(draft.validate(1).unwrap_err()), "stock");
    }
}
