use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ledger::{Collection, Expense, Product, Record, RecordId, Sale};

/// The whole persisted ledger: one blob, last writer wins.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct LedgerState {
    #[serde(default)]
    pub counter: Counter,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub expenses: Collection<Expense>,
    #[serde(default)]
    pub sales: Collection<Sale>,
    #[serde(default)]
    pub products: Collection<Product>,
}

impl LedgerState {
    /// Highest id stored in any collection, 0 when all are empty.
    pub fn max_record_id(&self) -> RecordId {
        let expenses = self.expenses.iter().map(Record::id);
        let sales = self.sales.iter().map(Record::id);
        let products = self.products.iter().map(Record::id);
        expenses.chain(sales).chain(products).max().unwrap_or(0)
    }

    /// Move the counter past every stored id, for blobs saved without a
    /// `[counter]` table or edited by hand. Returns the previous value when
    /// it had to move.
    pub fn reconcile_counter(&mut self) -> Option<RecordId> {
        let max = self.max_record_id();
        if self.counter.last_id >= max {
            return None;
        }
        let previous = self.counter.last_id;
        self.counter.last_id = max;
        Some(previous)
    }
}

/// Id allocator shared by all collections. Ids are never reused.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub last_id: RecordId,
}

impl Counter {
    pub fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        self.last_id
    }

    /// The id the next call to `next_id` would hand out.
    pub fn peek(&self) -> RecordId {
        self.last_id + 1
    }
}

/// Goal thresholds plus the one-shot notification latches.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Goals {
    #[serde(default)]
    pub revenue_goal: f64,
    #[serde(default)]
    pub units_goal: f64,
    #[serde(default)]
    pub revenue_goal_notified: bool,
    #[serde(default)]
    pub units_goal_notified: bool,
    /// Products already alerted as low on stock
    #[serde(default)]
    pub low_stock_notified: BTreeSet<String>,
}

/// User-editable part of [`Goals`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalSettings {
    pub revenue_goal: f64,
    pub units_goal: f64,
}

impl Goals {
    pub fn settings(&self) -> GoalSettings {
        GoalSettings {
            revenue_goal: self.revenue_goal,
            units_goal: self.units_goal,
        }
    }

    /// Store new thresholds and re-arm every latch.
    pub fn apply(&mut self, settings: GoalSettings) {
        self.revenue_goal = settings.revenue_goal;
        self.units_goal = settings.units_goal;
        self.revenue_goal_notified = false;
        self.units_goal_notified = false;
        self.low_stock_notified.clear();
    }
}
