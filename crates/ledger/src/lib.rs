//! Expense ledger and settlement engine.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Callers
//! that share a ledger across threads must serialise `add_expense` against
//! every other operation.

pub mod balance;
pub mod details;
pub mod expense;
pub mod ledger;
pub mod settlement;
pub mod split;

pub use balance::BalanceSheet;
pub use details::{collect_split_details, parse_split_details, parse_split_value};
pub use expense::{AddExpense, Expense};
pub use ledger::{ExpenseCommand, ExpenseLedger, ExpenseRecorded, LedgerEvent};
pub use settlement::{PlannerConfig, Settlement, SettlementPlan, SettlementPlanner};
pub use split::{ResolvedShares, SplitCalculator, SplitDetails, SplitType};
