use serde::{Deserialize, Serialize};

use splitledger_core::{
    Aggregate, AggregateRoot, Entity, LedgerId, Money, Participant, ValidationError,
    ValidationResult,
};

use crate::balance::BalanceSheet;
use crate::expense::{AddExpense, Expense};
use crate::settlement::{SettlementPlan, SettlementPlanner};
use crate::split::SplitCalculator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCommand {
    AddExpense(AddExpense),
}

/// Event: ExpenseRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecorded {
    pub ledger_id: LedgerId,
    pub expense: Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    ExpenseRecorded(ExpenseRecorded),
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::ExpenseRecorded(_) => "ledger.expense_recorded",
        }
    }
}

/// Aggregate root: an append-only list of expenses for one group.
///
/// Balances and settlements are never stored; they are derived from the
/// expense list on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseLedger {
    id: LedgerId,
    expenses: Vec<Expense>,
    /// Sum of every recorded total. Bounds the magnitude of every balance, so
    /// keeping it representable keeps balance arithmetic from overflowing.
    gross: Money,
    version: u64,
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::empty(LedgerId::new())
    }

    /// Empty aggregate for rehydration.
    pub fn empty(id: LedgerId) -> Self {
        Self {
            id,
            expenses: Vec::new(),
            gross: Money::ZERO,
            version: 0,
        }
    }

    /// Rebuild a ledger from previously recorded expenses, e.g. a filtered
    /// history after an external delete.
    pub fn from_expenses<I>(id: LedgerId, expenses: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = Expense>,
    {
        let mut ledger = Self::empty(id);
        for expense in expenses {
            ledger.record(expense)?;
        }
        Ok(ledger)
    }

    /// Validate and record an expense.
    ///
    /// On error the ledger is unchanged.
    pub fn add_expense(&mut self, cmd: AddExpense) -> ValidationResult<Expense> {
        let event = self.decide_add(&cmd)?;
        Ok(self.commit(event))
    }

    /// Record an expense that was already resolved with
    /// [`AddExpense::resolve`].
    ///
    /// Only ledger-wide limits are checked here, so callers can do the
    /// expensive resolution without holding exclusive access.
    pub fn record(&mut self, expense: Expense) -> ValidationResult<Expense> {
        let event = self.decide_record(expense)?;
        Ok(self.commit(event))
    }

    fn commit(&mut self, event: LedgerEvent) -> Expense {
        self.apply(&event);
        let LedgerEvent::ExpenseRecorded(recorded) = event;
        recorded.expense
    }

    /// Expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Every name that appears as a payer or participant, sorted.
    pub fn participants(&self) -> Vec<Participant> {
        let mut names: Vec<Participant> = self
            .expenses
            .iter()
            .flat_map(|e| std::iter::once(e.payer()).chain(e.participants()))
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn compute_balances(&self) -> BalanceSheet {
        BalanceSheet::from_expenses(&self.expenses)
    }

    pub fn plan_settlements(&self, planner: &SettlementPlanner) -> SettlementPlan {
        planner.plan(&self.compute_balances())
    }
}

impl AggregateRoot for ExpenseLedger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for ExpenseLedger {
    type Command = ExpenseCommand;
    type Event = LedgerEvent;
    type Error = ValidationError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::ExpenseRecorded(e) => {
                self.gross = self.gross.saturating_add(e.expense.total());
                self.expenses.push(e.expense.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ExpenseCommand::AddExpense(cmd) => self.decide_add(cmd).map(|event| vec![event]),
        }
    }
}

impl ExpenseLedger {
    fn decide_add(&self, cmd: &AddExpense) -> ValidationResult<LedgerEvent> {
        let expense = cmd.resolve(&SplitCalculator).inspect_err(|err| {
            tracing::debug!(ledger_id = %self.id, error = %err, "expense rejected");
        })?;
        self.decide_record(expense)
    }

    fn decide_record(&self, expense: Expense) -> ValidationResult<LedgerEvent> {
        if self.gross.checked_add(expense.total()).is_none() {
            tracing::warn!(
                ledger_id = %self.id,
                gross = %self.gross,
                total = %expense.total(),
                "expense rejected: ledger capacity exceeded"
            );
            return Err(ValidationError::LedgerCapacityExceeded(expense.total().to_string()));
        }

        tracing::info!(
            ledger_id = %self.id,
            expense_id = %expense.id(),
            payer = %expense.payer(),
            total = %expense.total(),
            split_type = %expense.split_type(),
            "expense recorded"
        );

        Ok(LedgerEvent::ExpenseRecorded(ExpenseRecorded {
            ledger_id: self.id,
            expense,
        }))
    }
}
