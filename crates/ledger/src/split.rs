use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use splitledger_core::{Money, Participant, ValidationError, ValidationResult};

/// How an expense total is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Exact,
    Percentage,
    Shares,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Exact => "exact",
            SplitType::Percentage => "percentage",
            SplitType::Shares => "shares",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(SplitType::Equal),
            "exact" => Ok(SplitType::Exact),
            "percentage" => Ok(SplitType::Percentage),
            "shares" => Ok(SplitType::Shares),
            _ => Err(ValidationError::UnknownSplitType(s.to_string())),
        }
    }
}

/// Per-participant split values (amount, percentage or share count).
pub type SplitDetails = BTreeMap<Participant, Decimal>;

/// Per-participant owed amounts; always sums exactly to the expense total.
pub type ResolvedShares = BTreeMap<Participant, Money>;

/// Maximum allowed gap between the sum of exact amounts and the total.
pub const EXACT_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed gap between the sum of percentages and 100.
pub const PERCENT_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Resolves a split declaration into per-participant shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitCalculator;

impl SplitCalculator {
    /// Resolve `total` among `participants` according to `split_type`.
    ///
    /// `participants` is the normalised, de-duplicated listing; its order
    /// decides who receives residual cents. `details` is ignored for
    /// [`SplitType::Equal`] and must cover exactly `participants` otherwise.
    pub fn resolve(
        &self,
        total: Money,
        participants: &[Participant],
        split_type: SplitType,
        details: &SplitDetails,
    ) -> ValidationResult<ResolvedShares> {
        if !total.is_positive() {
            return Err(ValidationError::invalid_total(total));
        }
        if participants.is_empty() {
            return Err(ValidationError::EmptyParticipants);
        }

        let cents = match split_type {
            SplitType::Equal => equal_cents(total, participants.len()),
            SplitType::Exact => {
                let weights = ordered_values(participants, details, |participant, value| {
                    if value < Decimal::ZERO {
                        return Err(ValidationError::invalid_share(
                            participant.as_str(),
                            "exact amount must not be negative",
                        ));
                    }
                    Ok(())
                })?;
                exact_cents(total, participants, &weights)?
            }
            SplitType::Percentage => {
                let weights = ordered_values(participants, details, |participant, value| {
                    if value < Decimal::ZERO {
                        return Err(ValidationError::invalid_share(
                            participant.as_str(),
                            "percentage must not be negative",
                        ));
                    }
                    Ok(())
                })?;
                let sum = checked_sum(participants, &weights, "percentage is too large")?;
                if (sum - Decimal::ONE_HUNDRED).abs() > PERCENT_SUM_TOLERANCE {
                    return Err(ValidationError::SplitSumMismatch {
                        expected: Decimal::ONE_HUNDRED,
                        actual: sum,
                    });
                }
                weighted_cents(total, participants, &weights, Decimal::ONE_HUNDRED)?
            }
            SplitType::Shares => {
                let weights = ordered_values(participants, details, |participant, value| {
                    if value <= Decimal::ZERO {
                        return Err(ValidationError::invalid_share(
                            participant.as_str(),
                            "share count must be positive",
                        ));
                    }
                    Ok(())
                })?;
                let sum = checked_sum(participants, &weights, "share count is too large")?;
                weighted_cents(total, participants, &weights, sum)?
            }
        };

        let shares: ResolvedShares = participants
            .iter()
            .cloned()
            .zip(cents.into_iter().map(Money::from_cents))
            .collect();

        tracing::debug!(
            %split_type,
            total = %total,
            participants = participants.len(),
            "resolved split"
        );

        Ok(shares)
    }
}

/// Check that `details` covers exactly `participants` and return the values
/// in participant order, running `check` on each.
fn ordered_values<F>(
    participants: &[Participant],
    details: &SplitDetails,
    check: F,
) -> ValidationResult<Vec<Decimal>>
where
    F: Fn(&Participant, Decimal) -> ValidationResult<()>,
{
    let expected: BTreeSet<&Participant> = participants.iter().collect();
    let missing: Vec<String> = participants
        .iter()
        .filter(|p| !details.contains_key(*p))
        .map(|p| p.to_string())
        .collect();
    let unexpected: Vec<String> = details
        .keys()
        .filter(|k| !expected.contains(k))
        .map(|k| k.to_string())
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ValidationError::SplitDetailsMismatch { missing, unexpected });
    }

    participants
        .iter()
        .map(|p| {
            let value = details[p];
            check(p, value)?;
            Ok(value)
        })
        .collect()
}

/// Sum `values`, blaming the participant whose value overflows the running total.
fn checked_sum(
    participants: &[Participant],
    values: &[Decimal],
    reason: &'static str,
) -> ValidationResult<Decimal> {
    participants
        .iter()
        .zip(values)
        .try_fold(Decimal::ZERO, |acc, (participant, value)| {
            acc.checked_add(*value)
                .ok_or_else(|| ValidationError::invalid_share(participant.as_str(), reason))
        })
}

fn equal_cents(total: Money, count: usize) -> Vec<i64> {
    let count = count as i64;
    let base = total.cents() / count;
    let remainder = total.cents() % count;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

fn exact_cents(
    total: Money,
    participants: &[Participant],
    amounts: &[Decimal],
) -> ValidationResult<Vec<i64>> {
    let sum = checked_sum(participants, amounts, "amount is too large")?;
    let expected = total.to_decimal();
    if (sum - expected).abs() > EXACT_SUM_TOLERANCE {
        return Err(ValidationError::SplitSumMismatch {
            expected,
            actual: sum,
        });
    }

    let mut cents = Vec::with_capacity(amounts.len());
    for (participant, amount) in participants.iter().zip(amounts) {
        let money = Money::from_decimal(*amount).ok_or_else(|| {
            ValidationError::invalid_share(participant.as_str(), "amount out of range")
        })?;
        cents.push(money.cents());
    }

    let unassigned = residual(total, &cents);
    distribute_residual(&mut cents, unassigned);
    Ok(cents)
}

/// Shares proportional to `weights / divisor`, floored to cents, with the
/// residual distributed in listing order.
///
/// Multiplies before dividing for exactness; weights too large for that are
/// reduced to a ratio first.
fn weighted_cents(
    total: Money,
    participants: &[Participant],
    weights: &[Decimal],
    divisor: Decimal,
) -> ValidationResult<Vec<i64>> {
    let total_cents = Decimal::from(total.cents());
    let mut cents = Vec::with_capacity(weights.len());
    for (participant, weight) in participants.iter().zip(weights) {
        let share = total_cents
            .checked_mul(*weight)
            .and_then(|v| v.checked_div(divisor))
            .or_else(|| weight.checked_div(divisor)?.checked_mul(total_cents))
            .and_then(|v| v.floor().to_i64())
            .ok_or_else(|| {
                ValidationError::invalid_share(participant.as_str(), "value is too large for this total")
            })?;
        cents.push(share);
    }

    let unassigned = residual(total, &cents);
    distribute_residual(&mut cents, unassigned);
    Ok(cents)
}

/// Cents still unassigned after rounding; small enough for `i64` once the
/// share values have been validated.
fn residual(total: Money, cents: &[i64]) -> i64 {
    let assigned: i128 = cents.iter().map(|&c| i128::from(c)).sum();
    (i128::from(total.cents()) - assigned) as i64
}

/// Hand out `residual` cents one at a time in listing order, wrapping around.
///
/// A negative residual is taken back from participants whose share is still
/// positive, so no share ever goes below zero.
fn distribute_residual(cents: &mut [i64], residual: i64) {
    if cents.is_empty() {
        return;
    }

    let mut remaining = residual;
    let mut idx = 0usize;
    while remaining != 0 {
        let slot = &mut cents[idx % cents.len()];
        if remaining > 0 {
            *slot += 1;
            remaining -= 1;
        } else if *slot > 0 {
            *slot -= 1;
            remaining += 1;
        }
        idx += 1;
    }
}
