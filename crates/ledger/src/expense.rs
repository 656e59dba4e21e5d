use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitledger_core::{
    Entity, ExpenseId, Money, Participant, ValidationError, ValidationResult,
};

use crate::details::collect_split_details;
use crate::split::{ResolvedShares, SplitCalculator, SplitDetails, SplitType};

/// Command: record a new expense.
///
/// Carries raw caller input; names are trimmed and validated by
/// [`AddExpense::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpense {
    pub payer: String,
    pub total: Decimal,
    pub participants: Vec<String>,
    pub split_type: SplitType,
    #[serde(default)]
    pub split_details: BTreeMap<String, Decimal>,
}

impl AddExpense {
    pub fn new<I, S>(payer: impl Into<String>, total: Decimal, participants: I, split_type: SplitType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            payer: payer.into(),
            total,
            participants: participants.into_iter().map(Into::into).collect(),
            split_type,
            split_details: BTreeMap::new(),
        }
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        self.split_details = details.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Validate the command and build the expense it describes.
    ///
    /// Checks run in a fixed order (payer, total, participants, then the
    /// split itself) so a given input always reports the same error.
    pub fn resolve(&self, calculator: &SplitCalculator) -> ValidationResult<Expense> {
        let payer = Participant::new(&self.payer).map_err(|_| ValidationError::InvalidPayer)?;

        let total = Money::from_decimal(self.total)
            .filter(|t| t.is_positive())
            .ok_or_else(|| ValidationError::invalid_total(self.total))?;

        let participants = normalize_participants(&self.participants);
        if participants.is_empty() {
            return Err(ValidationError::EmptyParticipants);
        }

        let split_details = match self.split_type {
            SplitType::Equal => SplitDetails::new(),
            _ => collect_split_details(self.split_details.iter().map(|(k, v)| (k, *v)))?,
        };

        let resolved_shares = calculator.resolve(total, &participants, self.split_type, &split_details)?;

        Ok(Expense {
            id: ExpenseId::new(),
            payer,
            total,
            participants,
            split_type: self.split_type,
            split_details,
            resolved_shares,
            recorded_at: Utc::now(),
        })
    }
}

/// Trim names, drop blanks, keep the first occurrence of each name.
fn normalize_participants(raw: &[String]) -> Vec<Participant> {
    let mut out: Vec<Participant> = Vec::with_capacity(raw.len());
    for name in raw {
        if let Ok(p) = Participant::new(name) {
            if !out.contains(&p) {
                out.push(p);
            }
        }
    }
    out
}

/// A recorded expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: ExpenseId,
    payer: Participant,
    total: Money,
    participants: Vec<Participant>,
    split_type: SplitType,
    split_details: SplitDetails,
    resolved_shares: ResolvedShares,
    recorded_at: DateTime<Utc>,
}

impl Expense {
    pub fn payer(&self) -> &Participant {
        &self.payer
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Participants in their original listing order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn split_type(&self) -> SplitType {
        self.split_type
    }

    /// The values the caller declared (empty for equal splits).
    pub fn split_details(&self) -> &SplitDetails {
        &self.split_details
    }

    pub fn resolved_shares(&self) -> &ResolvedShares {
        &self.resolved_shares
    }

    pub fn share_of(&self, participant: &str) -> Option<Money> {
        self.resolved_shares.get(participant).copied()
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
