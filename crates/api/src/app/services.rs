//! Shared application state behind the HTTP handlers.

use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use splitledger_core::ValidationError;
use splitledger_ledger::{
    AddExpense, BalanceSheet, Expense, ExpenseLedger, SettlementPlan, SettlementPlanner,
    SplitCalculator,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A handler panicked while holding the ledger lock.
    #[error("ledger is unavailable")]
    Unavailable,
}

impl<T> From<PoisonError<T>> for ServiceError {
    fn from(_: PoisonError<T>) -> Self {
        ServiceError::Unavailable
    }
}

/// One in-memory ledger shared by every request.
///
/// Writes take the lock exclusively, so concurrent submissions are applied
/// one at a time and reads always see whole expenses.
#[derive(Debug, Default)]
pub struct LedgerService {
    ledger: RwLock<ExpenseLedger>,
    planner: SettlementPlanner,
}

impl LedgerService {
    pub fn new(ledger: ExpenseLedger, planner: SettlementPlanner) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            planner,
        }
    }

    /// Resolve `cmd` and append it to the shared ledger.
    ///
    /// Splitting does not depend on ledger state, so it runs before the write
    /// lock is taken; the lock only guards the append.
    pub fn add_expense(&self, cmd: AddExpense) -> Result<Expense, ServiceError> {
        let expense = cmd.resolve(&SplitCalculator).inspect_err(|err| {
            tracing::debug!(error = %err, "expense rejected");
        })?;
        let mut ledger = self.ledger.write()?;
        Ok(ledger.record(expense)?)
    }

    pub fn expenses(&self) -> Result<Vec<Expense>, ServiceError> {
        Ok(self.ledger.read()?.expenses().to_vec())
    }

    pub fn balances(&self) -> Result<BalanceSheet, ServiceError> {
        Ok(self.ledger.read()?.compute_balances())
    }

    pub fn settlements(&self) -> Result<SettlementPlan, ServiceError> {
        Ok(self.ledger.read()?.plan_settlements(&self.planner))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use splitledger_core::Money;
    use splitledger_ledger::SplitType;

    use super::*;

    #[test]
    fn rejected_expense_leaves_state_untouched() {
        let service = LedgerService::default();
        let ok = AddExpense::new("Alice", Decimal::from(90), ["Alice", "Bob", "Carol"], SplitType::Equal);
        service.add_expense(ok).unwrap();

        let bad = AddExpense::new("Alice", Decimal::from(100), ["Alice", "Bob"], SplitType::Exact)
            .with_details([("Alice", Decimal::from(40)), ("Bob", Decimal::from(50))]);
        let err = service.add_expense(bad).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::SplitSumMismatch { .. })));

        assert_eq!(service.expenses().unwrap().len(), 1);
        assert_eq!(service.balances().unwrap().get("Alice"), Some(Money::from_cents(6000)));
        assert_eq!(service.settlements().unwrap().len(), 2);
    }

    #[test]
    fn oversized_split_values_do_not_disable_the_ledger() {
        let service = LedgerService::default();
        let huge = AddExpense::new("Alice", Decimal::from(10), ["Alice", "Bob"], SplitType::Shares)
            .with_details([("Alice", Decimal::MAX), ("Bob", Decimal::MAX)]);

        let err = service.add_expense(huge).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidShareValue { .. })));

        assert!(service.expenses().unwrap().is_empty());
        let ok = AddExpense::new("Alice", Decimal::from(10), ["Alice", "Bob"], SplitType::Equal);
        service.add_expense(ok).unwrap();
        assert_eq!(service.expenses().unwrap().len(), 1);
    }

    #[test]
    fn totals_past_capacity_keep_balances_readable() {
        let service = LedgerService::default();
        let huge = || AddExpense::new("Alice", Decimal::from(50_000_000_000_000_000i64), ["Bob"], SplitType::Equal);

        service.add_expense(huge()).unwrap();
        let err = service.add_expense(huge()).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::LedgerCapacityExceeded(_))
        ));

        let balances = service.balances().unwrap();
        assert!(balances.net().is_zero());
        assert_eq!(service.settlements().unwrap().len(), 1);
    }
}
