use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use splitledger_core::{Money, Participant};

use crate::expense::Expense;
use crate::settlement::Settlement;

/// Net position per participant.
///
/// Positive = the group owes this participant; negative = this participant
/// owes the group. A sheet derived from a ledger always sums to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    balances: BTreeMap<Participant, Money>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate balances over `expenses`: the payer is credited the total and
    /// every participant is debited their resolved share.
    pub fn from_expenses<'a, I>(expenses: I) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut sheet = Self::new();
        for expense in expenses {
            sheet.credit(expense.payer(), expense.total());
            for (participant, share) in expense.resolved_shares() {
                sheet.credit(participant, -*share);
            }
        }
        sheet
    }

    /// Saturates at the `Money` range. Ledger-derived sheets never reach it,
    /// since the ledger caps the sum of its totals.
    fn credit(&mut self, participant: &Participant, amount: Money) {
        let balance = self.balances.entry(participant.clone()).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn get(&self, participant: &str) -> Option<Money> {
        self.balances.get(participant).copied()
    }

    /// Participants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.balances.iter().map(|(p, m)| (p, *m))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of all balances (zero for any ledger-derived sheet).
    pub fn net(&self) -> Money {
        self.balances
            .values()
            .fold(Money::ZERO, |acc, b| acc.saturating_add(*b))
    }

    /// True when every balance is within `tolerance` of zero.
    pub fn is_settled(&self, tolerance: Money) -> bool {
        self.balances.values().all(|b| b.abs() <= tolerance.abs())
    }

    /// Apply a payment: the payer's balance rises, the receiver's falls.
    pub fn apply(&mut self, settlement: &Settlement) {
        self.credit(&settlement.from, settlement.amount);
        self.credit(&settlement.to, -settlement.amount);
    }
}

impl FromIterator<(Participant, Money)> for BalanceSheet {
    fn from_iter<T: IntoIterator<Item = (Participant, Money)>>(iter: T) -> Self {
        let mut sheet = Self::new();
        for (participant, amount) in iter {
            sheet.credit(&participant, amount);
        }
        sheet
    }
}
