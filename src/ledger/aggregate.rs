use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

use super::collection::Collection;
use super::records::{Expense, Product, Sale, INGREDIENTS_CATEGORY};
use crate::config::Goals;

/// Shown instead of a month when there are no sales
pub const NO_MONTH: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Dashboard metrics derived from the current ledger contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub total_spent: f64,
    pub total_sold: f64,
    pub net_profit: f64,
    pub margin_percent: f64,
    pub units_sold: f64,
    pub best_selling_product: Option<String>,
    pub best_month: String,
    pub average_daily_revenue: f64,
    pub low_stock_products: Vec<String>,
    pub cost_of_ingredients: f64,
    pub expense_count: usize,
    pub sale_count: usize,
    pub product_count: usize,
    /// Revenue per month, oldest first
    pub monthly_revenue: Vec<MonthTotal>,
    /// Spending per expense category, in first-seen order
    pub spending_by_category: Vec<CategoryTotal>,
    /// Percent of the revenue goal reached, `None` while the goal is disabled
    pub revenue_goal_progress: Option<f64>,
}

/// Revenue and units over every recorded sale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SalesTotals {
    pub revenue: f64,
    pub units: f64,
}

pub(crate) fn sales_totals(sales: &Collection<Sale>) -> SalesTotals {
    sales.iter().fold(SalesTotals::default(), |acc, s| SalesTotals {
        revenue: acc.revenue + s.total,
        units: acc.units + s.quantity,
    })
}

pub fn compute(
    expenses: &Collection<Expense>,
    sales: &Collection<Sale>,
    products: &Collection<Product>,
    goals: &Goals,
) -> AggregateSnapshot {
    let total_spent: f64 = expenses.iter().map(|e| e.cost).sum();
    let SalesTotals {
        revenue: total_sold,
        units: units_sold,
    } = sales_totals(sales);
    let net_profit = total_sold - total_spent;
    let margin_percent = if total_sold > 0.0 {
        net_profit / total_sold * 100.0
    } else {
        0.0
    };

    let per_product = sum_grouped(sales.iter().map(|s| (s.product_name.as_str(), s.quantity)));
    let best_selling_product = argmax(&per_product).map(|name| name.to_string());

    let per_month = sum_grouped(sales.iter().map(|s| (month_key(s.date), s.total)));
    let best_month = argmax(&per_month)
        .map(|(year, month)| month_label(year, month))
        .unwrap_or_else(|| NO_MONTH.to_string());

    let mut monthly_revenue: Vec<MonthTotal> = per_month
        .iter()
        .map(|&((year, month), total)| MonthTotal {
            year,
            month,
            label: month_label(year, month),
            total,
        })
        .collect();
    monthly_revenue.sort_by_key(|m| (m.year, m.month));

    let selling_days: HashSet<NaiveDate> = sales.iter().map(|s| s.date).collect();
    let average_daily_revenue = if selling_days.is_empty() {
        0.0
    } else {
        total_sold / selling_days.len() as f64
    };

    let low_stock_products = low_stock_names(products);

    let cost_of_ingredients: f64 = expenses
        .filter(|e| e.category == INGREDIENTS_CATEGORY)
        .map(|e| e.cost)
        .sum();

    let spending_by_category = sum_grouped(expenses.iter().map(|e| (e.category.as_str(), e.cost)))
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();

    let revenue_goal_progress = if goals.revenue_goal > 0.0 {
        Some(total_sold / goals.revenue_goal * 100.0)
    } else {
        None
    };

    AggregateSnapshot {
        total_spent,
        total_sold,
        net_profit,
        margin_percent,
        units_sold,
        best_selling_product,
        best_month,
        average_daily_revenue,
        low_stock_products,
        cost_of_ingredients,
        expense_count: expenses.len(),
        sale_count: sales.len(),
        product_count: products.len(),
        monthly_revenue,
        spending_by_category,
        revenue_goal_progress,
    }
}

/// Names of products whose tracked stock is at or below their minimum.
pub fn low_stock_names(products: &Collection<Product>) -> Vec<String> {
    products
        .filter(|p| p.is_low_stock())
        .map(|p| p.name.clone())
        .collect()
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// "March 2025"
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

/// Sum values per key, keeping keys in the order they first appear.
fn sum_grouped<K, I>(pairs: I) -> Vec<(K, f64)>
where
    K: PartialEq,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: Vec<(K, f64)> = Vec::new();
    for (key, value) in pairs {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, sum)) => *sum += value,
            None => groups.push((key, value)),
        }
    }
    groups
}

/// Key with the largest sum. Ties go to the earliest key.
fn argmax<K: Copy>(groups: &[(K, f64)]) -> Option<K> {
    let mut best: Option<&(K, f64)> = None;
    for group in groups {
        match best {
            Some((_, top)) if *top >= group.1 => {}
            _ => best = Some(group),
        }
    }
    best.map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sale(id: u64, day: &str, product: &str, quantity: f64, unit_price: f64) -> Sale {
        Sale {
            id,
            date: date(day),
            product_name: product.to_string(),
            quantity,
            unit_price,
            client: None,
            payment_method: "Cash".to_string(),
            total: quantity * unit_price,
        }
    }

    fn expense(id: u64, category: &str, cost: f64) -> Expense {
        Expense {
            id,
            date: date("2025-01-05"),
            concept: "Stuff".to_string(),
            quantity: 1.0,
            unit: "unit".to_string(),
            cost,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_sales_totals() {
        let mut sales = Collection::new();
        assert_eq!(sales_totals(&sales), SalesTotals::default());

        sales.insert(sale(1, "2025-01-01", "Cake", 2.0, 50.0));
        sales.insert(sale(2, "2025-01-02", "Cookie", 4.0, 2.5));
        let totals = sales_totals(&sales);
        assert_eq!(totals.revenue, 110.0);
        assert_eq!(totals.units, 6.0);
    }

    #[test]
    fn test_empty_ledger() {
        let snap = compute(
            &Collection::new(),
            &Collection::new(),
            &Collection::new(),
            &Goals::default(),
        );
        assert_eq!(snap.total_spent, 0.0);
        assert_eq!(snap.total_sold, 0.0);
        assert_eq!(snap.net_profit, 0.0);
        assert_eq!(snap.margin_percent, 0.0);
        assert_eq!(snap.units_sold, 0.0);
        assert_eq!(snap.average_daily_revenue, 0.0);
        assert_eq!(snap.best_selling_product, None);
        assert_eq!(snap.best_month, NO_MONTH);
        assert!(snap.low_stock_products.is_empty());
        assert!(snap.monthly_revenue.is_empty());
        assert_eq!(snap.revenue_goal_progress, None);
    }

    #[test]
    fn test_totals_and_margin() {
        let mut expenses = Collection::new();
        expenses.insert(expense(1, "Ingredients", 100.0));
        expenses.insert(expense(2, "Packaging", 50.0));
        expenses.insert(expense(3, "Ingredients", 50.0));

        let mut sales = Collection::new();
        sales.insert(sale(4, "2025-01-10", "Cake", 2.0, 100.0));
        sales.insert(sale(5, "2025-01-10", "Cookie", 10.0, 20.0));
        sales.insert(sale(6, "2025-01-11", "Cake", 1.0, 100.0));

        let goals = Goals {
            revenue_goal: 1000.0,
            ..Default::default()
        };
        let snap = compute(&expenses, &sales, &Collection::new(), &goals);

        assert_eq!(snap.total_spent, 200.0);
        assert_eq!(snap.total_sold, 500.0);
        assert_eq!(snap.net_profit, 300.0);
        assert_eq!(snap.margin_percent, 60.0);
        assert_eq!(snap.units_sold, 13.0);
        assert_eq!(snap.cost_of_ingredients, 150.0);
        assert_eq!(snap.average_daily_revenue, 250.0);
        assert_eq!(snap.best_selling_product.as_deref(), Some("Cookie"));
        assert_eq!(snap.revenue_goal_progress, Some(50.0));
        assert_eq!(
            snap.spending_by_category,
            vec![
                CategoryTotal {
                    category: "Ingredients".into(),
                    total: 150.0
                },
                CategoryTotal {
                    category: "Packaging".into(),
                    total: 50.0
                },
            ]
        );
    }

    #[test]
    fn test_best_selling_tie_goes_to_first_seen() {
        let mut sales = Collection::new();
        sales.insert(sale(1, "2025-01-10", "Zebra cake", 3.0, 1.0));
        sales.insert(sale(2, "2025-01-10", "Apple pie", 2.0, 1.0));
        sales.insert(sale(3, "2025-01-11", "Apple pie", 1.0, 1.0));

        let snap = compute(
            &Collection::new(),
            &sales,
            &Collection::new(),
            &Goals::default(),
        );
        assert_eq!(snap.best_selling_product.as_deref(), Some("Zebra cake"));
    }

    #[test]
    fn test_best_month_and_series() {
        let mut sales = Collection::new();
        sales.insert(sale(1, "2025-03-01", "Cake", 1.0, 100.0));
        sales.insert(sale(2, "2025-01-15", "Cake", 1.0, 150.0));
        sales.insert(sale(3, "2025-03-20", "Cake", 1.0, 100.0));
        sales.insert(sale(4, "2024-12-31", "Cake", 1.0, 10.0));

        let snap = compute(
            &Collection::new(),
            &sales,
            &Collection::new(),
            &Goals::default(),
        );
        assert_eq!(snap.best_month, "March 2025");
        let labels: Vec<_> = snap.monthly_revenue.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["December 2024", "January 2025", "March 2025"]);
        assert_eq!(snap.monthly_revenue[2].total, 200.0);
    }

    #[test]
    fn test_low_stock_requires_tracking() {
        let mut products = Collection::new();
        for (id, name, stock, minimum) in [
            (1, "Low", Some(1.0), Some(2.0)),
            (2, "Equal", Some(2.0), Some(2.0)),
            (3, "Fine", Some(5.0), Some(2.0)),
            (4, "Untracked", None, Some(2.0)),
            (5, "No minimum", Some(0.0), None),
        ] {
            products.insert(Product {
                id,
                name: name.to_string(),
                description: None,
                production_cost: 1.0,
                sale_price: 2.0,
                prep_time: None,
                category: "Cakes".to_string(),
                stock,
                stock_minimum: minimum,
            });
        }
        assert_eq!(low_stock_names(&products), vec!["Low", "Equal"]);
    }
}
