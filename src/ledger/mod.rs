mod aggregate;
mod collection;
mod notifier;
mod records;
mod stock;

pub use aggregate::{month_label, AggregateSnapshot, CategoryTotal, MonthTotal, NO_MONTH};
pub use collection::{Collection, Draft, Record, RecordId};
pub use notifier::{
    low_stock_title, ConsoleNotifier, Notification, Notifier, RecordingNotifier, SilentNotifier,
    REVENUE_GOAL_TITLE, UNITS_GOAL_TITLE,
};
pub use records::{
    Expense, ExpenseDraft, Product, ProductDraft, Sale, SaleDraft, DATE_FORMAT,
    INGREDIENTS_CATEGORY,
};

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::config::{GoalSettings, LedgerState, StateStore};
use crate::error::{LedgerError, Result};

/// Narrows a listing to a category or product and an inclusive date range.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub category: Option<String>,
    pub product: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    fn in_range(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |d| date >= d) && self.to.map_or(true, |d| date <= d)
    }
}

/// Owns the ledger state and keeps its collections consistent.
///
/// Every accepted mutation re-evaluates the goal and low-stock alerts and
/// reports newly crossed thresholds to the notifier. Rejected mutations leave
/// the state untouched.
#[derive(Debug)]
pub struct Ledger<N: Notifier> {
    state: LedgerState,
    notifier: N,
}

impl<N: Notifier> Ledger<N> {
    pub fn new(notifier: N) -> Self {
        Self::from_state(LedgerState::default(), notifier)
    }

    /// Take over a loaded state. A counter that lags behind the stored ids
    /// is moved forward so new records never reuse one.
    pub fn from_state(mut state: LedgerState, notifier: N) -> Self {
        if let Some(previous) = state.reconcile_counter() {
            warn!(
                "Id counter was at {previous} but records go up to {}, moving it forward",
                state.counter.last_id
            );
        }
        Self { state, notifier }
    }

    /// Load from the store, starting empty when nothing was saved yet.
    pub fn load<S: StateStore + ?Sized>(store: &S, notifier: N) -> Result<Self> {
        let state = store.load_state()?.unwrap_or_default();
        Ok(Self::from_state(state, notifier))
    }

    /// Persist the current state. A failure here does not undo anything in memory.
    pub fn save<S: StateStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.save_state(&self.state)
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn expenses(&self) -> &Collection<Expense> {
        &self.state.expenses
    }

    pub fn sales(&self) -> &Collection<Sale> {
        &self.state.sales
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.state.products
    }

    pub fn product_named(&self, name: &str) -> Option<&Product> {
        stock::product_named(&self.state.products, name)
    }

    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> Result<Expense> {
        let expense = draft.validate(self.state.counter.peek())?;
        self.state.counter.next_id();
        self.state.expenses.insert(expense.clone());
        debug!("Added expense {} '{}'", expense.id, expense.concept);
        self.check_alerts();
        Ok(expense)
    }

    /// Record a sale and take its units out of the product's tracked stock.
    pub fn add_sale(&mut self, draft: &SaleDraft) -> Result<Sale> {
        let sale = draft.validate(self.state.counter.peek())?;
        stock::check_available(&self.state.products, &sale)?;

        self.state.counter.next_id();
        stock::withdraw(&mut self.state.products, &sale);
        self.state.sales.insert(sale.clone());
        debug!(
            "Added sale {} of {} x '{}'",
            sale.id, sale.quantity, sale.product_name
        );
        self.check_alerts();
        Ok(sale)
    }

    pub fn add_product(&mut self, draft: &ProductDraft) -> Result<Product> {
        let product = draft.validate(self.state.counter.peek())?;
        if self.product_named(&product.name).is_some() {
            return Err(LedgerError::validation(
                "name",
                format!("a product named '{}' already exists", product.name),
            ));
        }
        self.state.counter.next_id();
        self.state.products.insert(product.clone());
        debug!("Added product {} '{}'", product.id, product.name);
        self.check_alerts();
        Ok(product)
    }

    pub fn remove_expense(&mut self, id: RecordId) -> Option<Expense> {
        let removed = self.state.expenses.remove(id)?;
        debug!("Removed expense {id}");
        self.check_alerts();
        Some(removed)
    }

    /// Remove a sale and put its units back, if the product still tracks stock.
    pub fn remove_sale(&mut self, id: RecordId) -> Option<Sale> {
        let removed = self.state.sales.remove(id)?;
        stock::restore(&mut self.state.products, &removed);
        debug!("Removed sale {id}");
        self.check_alerts();
        Some(removed)
    }

    /// Remove a product. Sales that name it are kept as they are.
    pub fn remove_product(&mut self, id: RecordId) -> Option<Product> {
        let removed = self.state.products.remove(id)?;
        debug!("Removed product {id} '{}'", removed.name);
        self.check_alerts();
        Some(removed)
    }

    /// Set a product's stock, starting to track it if it was not.
    pub fn set_stock(&mut self, id: RecordId, stock: &str) -> Result<Product> {
        let stock = records::non_negative("stock", stock)?;
        let product = self.product_mut(id)?;
        product.stock = Some(stock);
        let product = product.clone();
        debug!("Set stock of '{}' to {}", product.name, stock);
        self.check_alerts();
        Ok(product)
    }

    /// Add units to a product's stock. Untracked stock starts from zero.
    pub fn restock(&mut self, id: RecordId, quantity: &str) -> Result<Product> {
        let quantity = records::positive("quantity", quantity)?;
        let product = self.product_mut(id)?;
        let stock = product.stock.unwrap_or_default() + quantity;
        product.stock = Some(stock);
        let product = product.clone();
        debug!("Restocked '{}' to {}", product.name, stock);
        self.check_alerts();
        Ok(product)
    }

    /// Change a product's pricing. Recorded sale totals stay as they were.
    pub fn reprice_product(
        &mut self,
        id: RecordId,
        production_cost: &str,
        sale_price: &str,
    ) -> Result<Product> {
        let production_cost = records::positive("production cost", production_cost)?;
        let sale_price = records::positive("sale price", sale_price)?;
        let product = self.product_mut(id)?;
        product.production_cost = production_cost;
        product.sale_price = sale_price;
        Ok(product.clone())
    }

    pub fn filter_expenses<'a>(
        &'a self,
        filter: &'a RecordFilter,
    ) -> impl Iterator<Item = &'a Expense> + 'a {
        self.state.expenses.filter(move |e| {
            filter.category.as_ref().map_or(true, |c| &e.category == c) && filter.in_range(e.date)
        })
    }

    pub fn filter_sales<'a>(
        &'a self,
        filter: &'a RecordFilter,
    ) -> impl Iterator<Item = &'a Sale> + 'a {
        self.state.sales.filter(move |s| {
            filter.product.as_ref().map_or(true, |p| &s.product_name == p) && filter.in_range(s.date)
        })
    }

    pub fn compute_aggregates(&self) -> AggregateSnapshot {
        aggregate::compute(
            &self.state.expenses,
            &self.state.sales,
            &self.state.products,
            &self.state.goals,
        )
    }

    /// Store new goals. Re-arms both goal latches and every low-stock alert,
    /// then re-evaluates right away.
    pub fn save_configuration(&mut self, settings: GoalSettings) -> Result<()> {
        if !settings.revenue_goal.is_finite() || settings.revenue_goal < 0.0 {
            return Err(LedgerError::validation(
                "revenue goal",
                "must be a number not below 0",
            ));
        }
        if !settings.units_goal.is_finite() || settings.units_goal < 0.0 {
            return Err(LedgerError::validation(
                "units goal",
                "must be a number not below 0",
            ));
        }
        self.state.goals.apply(settings);
        debug!(
            revenue_goal = settings.revenue_goal,
            units_goal = settings.units_goal,
            "Saved goals"
        );
        self.check_alerts();
        Ok(())
    }

    pub fn goals(&self) -> GoalSettings {
        self.state.goals.settings()
    }

    /// Products currently alerted as low on stock
    pub fn low_stock_alerts(&self) -> &BTreeSet<String> {
        &self.state.goals.low_stock_notified
    }

    fn product_mut(&mut self, id: RecordId) -> Result<&mut Product> {
        self.state
            .products
            .get_mut(id)
            .ok_or(LedgerError::RecordNotFound {
                kind: "product",
                id,
            })
    }

    fn check_alerts(&mut self) -> usize {
        notifier::evaluate(
            &mut self.state.goals,
            &self.state.sales,
            &self.state.products,
            &mut self.notifier,
        )
    }
}
