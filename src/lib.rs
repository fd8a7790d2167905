pub mod config;
pub mod error;
pub mod ledger;
pub mod pricing;

pub use config::{GoalSettings, LedgerState, MemoryStore, Settings, StateStore, TomlStore};
pub use error::{LedgerError, Result};
pub use ledger::{
    AggregateSnapshot, ConsoleNotifier, Expense, ExpenseDraft, Ledger, Notifier, Product,
    ProductDraft, RecordFilter, RecordId, RecordingNotifier, Sale, SaleDraft, SilentNotifier,
};
