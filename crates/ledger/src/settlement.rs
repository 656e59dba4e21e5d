//! Debt simplification: turn net balances into a short list of payments.

use serde::{Deserialize, Serialize};

use splitledger_core::{Money, Participant};

use crate::balance::BalanceSheet;

/// A single proposed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}

/// Payments in the order they were planned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementPlan(Vec<Settlement>);

impl SettlementPlan {
    pub fn iter(&self) -> impl Iterator<Item = &Settlement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl IntoIterator for SettlementPlan {
    type Item = Settlement;
    type IntoIter = std::vec::IntoIter<Settlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Balances within this distance of zero are treated as settled.
    pub tolerance: Money,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: Money::ZERO,
        }
    }
}

/// Greedy largest-creditor / largest-debtor pairing.
///
/// Each step pairs the participant owed the most with the participant owing
/// the most (ties broken by ascending name) and settles the smaller of the
/// two amounts. The result is deterministic for a given sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementPlanner {
    config: PlannerConfig,
}

struct Position<'a> {
    participant: &'a Participant,
    /// Absolute amount still to receive (creditor) or pay (debtor), in cents.
    remaining: i64,
}

impl SettlementPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn plan(&self, sheet: &BalanceSheet) -> SettlementPlan {
        let tolerance = self.config.tolerance.cents().saturating_abs();

        let mut creditors: Vec<Position<'_>> = sheet
            .iter()
            .filter(|(_, b)| b.cents() > tolerance)
            .map(|(participant, b)| Position { participant, remaining: b.cents() })
            .collect();
        let mut debtors: Vec<Position<'_>> = sheet
            .iter()
            .filter(|(_, b)| b.cents() < -tolerance)
            .map(|(participant, b)| Position {
                participant,
                remaining: b.cents().saturating_neg(),
            })
            .collect();

        let mut settlements = Vec::new();

        while let (Some(ci), Some(di)) = (largest(&creditors), largest(&debtors)) {
            let owed = creditors[ci].remaining;
            let owing = debtors[di].remaining;
            let mut amount = owed.min(owing);

            let last_pair = creditors.len() == 1 && debtors.len() == 1;
            let drift = owed.abs_diff(owing);
            if last_pair && drift != 0 && drift <= tolerance.unsigned_abs() {
                // The lexicographically-last participant of the pair keeps the
                // leftover; the other one is settled exactly.
                let creditor_is_last = creditors[ci].participant > debtors[di].participant;
                let leftover_with_creditor = owed > owing;
                if creditor_is_last != leftover_with_creditor {
                    amount = owed.max(owing);
                }
                tracing::debug!(
                    creditor = %creditors[ci].participant,
                    debtor = %debtors[di].participant,
                    drift,
                    "absorbing rounding drift on final pair"
                );
                creditors[ci].remaining = amount;
                debtors[di].remaining = amount;
            }

            let settlement = Settlement {
                from: debtors[di].participant.clone(),
                to: creditors[ci].participant.clone(),
                amount: Money::from_cents(amount),
            };
            tracing::debug!(
                from = %settlement.from,
                to = %settlement.to,
                amount = %settlement.amount,
                "planned settlement"
            );
            settlements.push(settlement);

            creditors[ci].remaining -= amount;
            debtors[di].remaining -= amount;

            if creditors[ci].remaining <= tolerance {
                creditors.remove(ci);
            }
            if debtors[di].remaining <= tolerance {
                debtors.remove(di);
            }
        }

        if !creditors.is_empty() || !debtors.is_empty() {
            tracing::warn!(
                net = %sheet.net(),
                unsettled_creditors = creditors.len(),
                unsettled_debtors = debtors.len(),
                "balance sheet does not net to zero; plan leaves residual balances"
            );
        }

        SettlementPlan(settlements)
    }
}

/// Index of the position with the largest remaining amount, lowest name first on ties.
fn largest(positions: &[Position<'_>]) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| b.participant.cmp(a.participant))
        })
        .map(|(idx, _)| idx)
}
