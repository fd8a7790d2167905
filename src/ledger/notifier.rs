//! One-shot goal and low-stock alerts.
//!
//! Each threshold is latched in [`Goals`]: the first evaluation that finds it
//! crossed sends one notification and sets the latch. Goal latches only
//! re-arm through an explicit goals save. Low-stock latches re-arm on their own
//! once the product is no longer low.

use std::collections::BTreeSet;
use tracing::{debug, info};

use super::aggregate::{sales_totals, SalesTotals};
use super::collection::Collection;
use super::records::{Product, Sale};
use crate::config::Goals;

/// Output port for user-facing alerts. Fire and forget.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

/// Prints alerts to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        info!(title, body, "Notification");
        println!("[ALERT] {title}: {body}");
    }
}

/// Drops alerts, for read-only use of the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, title: &str, _body: &str) {
        debug!("Suppressed notification '{title}'");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Keeps every alert it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub sent: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<&str> {
        self.sent.iter().map(|n| n.title.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.sent.push(Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

pub const REVENUE_GOAL_TITLE: &str = "Revenue goal reached";
pub const UNITS_GOAL_TITLE: &str = "Units goal reached";

pub fn low_stock_title(product: &str) -> String {
    format!("Low stock: {product}")
}

/// Compare the ledger against every threshold and fire what newly crossed.
/// Returns the number of notifications sent.
pub(crate) fn evaluate<N: Notifier + ?Sized>(
    goals: &mut Goals,
    sales: &Collection<Sale>,
    products: &Collection<Product>,
    notifier: &mut N,
) -> usize {
    let mut fired = 0;
    let SalesTotals {
        revenue: total_sold,
        units: units_sold,
    } = sales_totals(sales);

    if goals.revenue_goal > 0.0 && !goals.revenue_goal_notified && total_sold >= goals.revenue_goal
    {
        goals.revenue_goal_notified = true;
        notifier.notify(
            REVENUE_GOAL_TITLE,
            &format!(
                "Sales reached {:.2}, goal was {:.2}",
                total_sold, goals.revenue_goal
            ),
        );
        fired += 1;
    }

    if goals.units_goal > 0.0 && !goals.units_goal_notified && units_sold >= goals.units_goal {
        goals.units_goal_notified = true;
        notifier.notify(
            UNITS_GOAL_TITLE,
            &format!("{} units sold, goal was {}", units_sold, goals.units_goal),
        );
        fired += 1;
    }

    let low: Vec<&Product> = products.filter(|p| p.is_low_stock()).collect();
    let low_names: BTreeSet<&str> = low.iter().map(|p| p.name.as_str()).collect();

    let before = goals.low_stock_notified.len();
    goals
        .low_stock_notified
        .retain(|name| low_names.contains(name.as_str()));
    if goals.low_stock_notified.len() != before {
        debug!(
            "Re-armed {} low-stock alert(s)",
            before - goals.low_stock_notified.len()
        );
    }

    for product in low {
        if goals.low_stock_notified.insert(product.name.clone()) {
            notifier.notify(
                &low_stock_title(&product.name),
                &format!(
                    "{} left, minimum is {}",
                    product.stock.unwrap_or_default(),
                    product.stock_minimum.unwrap_or_default()
                ),
            );
            fired += 1;
        }
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(id: u64, quantity: f64, total: f64) -> Sale {
        Sale {
            id,
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            product_name: "Cake".to_string(),
            quantity,
            unit_price: total / quantity,
            client: None,
            payment_method: "Card".to_string(),
            total,
        }
    }

    fn product(stock: f64, minimum: f64) -> Product {
        Product {
            id: 1,
            name: "Cake".to_string(),
            description: None,
            production_cost: 1.0,
            sale_price: 2.0,
            prep_time: None,
            category: "Cakes".to_string(),
            stock: Some(stock),
            stock_minimum: Some(minimum),
        }
    }

    #[test]
    fn test_disabled_goals_never_fire() {
        let mut goals = Goals::default();
        let mut sales = Collection::new();
        sales.insert(sale(1, 100.0, 100_000.0));
        let mut notifier = RecordingNotifier::default();

        let fired = evaluate(&mut goals, &sales, &Collection::new(), &mut notifier);
        assert_eq!(fired, 0);
        assert!(!goals.revenue_goal_notified);
        assert!(!goals.units_goal_notified);
    }

    #[test]
    fn test_units_goal_latches() {
        let mut goals = Goals {
            units_goal: 10.0,
            ..Default::default()
        };
        let mut sales = Collection::new();
        sales.insert(sale(1, 10.0, 10.0));
        let mut notifier = RecordingNotifier::default();

        evaluate(&mut goals, &sales, &Collection::new(), &mut notifier);
        evaluate(&mut goals, &sales, &Collection::new(), &mut notifier);
        assert_eq!(notifier.titles(), vec![UNITS_GOAL_TITLE]);
        assert!(goals.units_goal_notified);
    }

    #[test]
    fn test_goals_fire_at_dashboard_totals() {
        let mut sales = Collection::new();
        sales.insert(sale(1, 2.0, 0.1));
        sales.insert(sale(2, 1.0, 0.2));
        let snap = super::super::aggregate::compute(
            &Collection::new(),
            &sales,
            &Collection::new(),
            &Goals::default(),
        );
        let mut goals = Goals {
            revenue_goal: snap.total_sold,
            units_goal: snap.units_sold,
            ..Default::default()
        };
        let mut notifier = RecordingNotifier::default();

        let fired = evaluate(&mut goals, &sales, &Collection::new(), &mut notifier);
        assert_eq!(fired, 2);
        assert_eq!(notifier.titles(), vec![REVENUE_GOAL_TITLE, UNITS_GOAL_TITLE]);
    }

    #[test]
    fn test_low_stock_prunes_vanished_products() {
        let mut goals = Goals::default();
        goals.low_stock_notified.insert("Gone".to_string());
        let mut products = Collection::new();
        products.insert(product(1.0, 2.0));
        let mut notifier = RecordingNotifier::default();

        evaluate(&mut goals, &Collection::new(), &products, &mut notifier);
        assert_eq!(notifier.titles(), vec!["Low stock: Cake"]);
        assert_eq!(notifier.sent[0].body, "1 left, minimum is 2");
        assert_eq!(
            goals.low_stock_notified.iter().collect::<Vec<_>>(),
            vec!["Cake"]
        );
    }
}
