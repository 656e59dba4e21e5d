use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;

use splitledger_core::{ValidationError, ValidationResult};
use splitledger_ledger::{parse_split_details, parse_split_value, AddExpense, SplitType};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /expenses`.
///
/// Fields are deliberately loose (numbers or strings, lists or text) so that
/// every bad value is reported as a domain validation error instead of a
/// generic JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest {
    #[serde(default)]
    pub payer: String,
    pub total: Option<NumberOrText>,
    #[serde(default)]
    pub participants: Participants,
    pub split_type: Option<String>,
    pub split_details: Option<RawSplitDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(Number),
    Text(String),
}

/// Either a JSON list or newline-separated text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Participants {
    List(Vec<String>),
    Lines(String),
}

impl Default for Participants {
    fn default() -> Self {
        Participants::List(Vec::new())
    }
}

/// Either an object keyed by participant or `Name:Value` lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSplitDetails {
    Map(BTreeMap<String, NumberOrText>),
    Lines(String),
}

impl AddExpenseRequest {
    /// Turn the loose request into an engine command.
    ///
    /// A missing split type means an equal split. Details are not even parsed
    /// for equal splits, since they would be ignored.
    pub fn into_command(self) -> ValidationResult<AddExpense> {
        let total = match &self.total {
            None => return Err(ValidationError::invalid_total("missing")),
            Some(NumberOrText::Number(n)) => {
                decimal_from_number(n).ok_or_else(|| ValidationError::invalid_total(n))?
            }
            Some(NumberOrText::Text(s)) => {
                Decimal::from_str(s.trim()).map_err(|_| ValidationError::invalid_total(s))?
            }
        };

        let split_type = match self.split_type.as_deref() {
            None => SplitType::Equal,
            Some(raw) => raw.parse()?,
        };

        let participants = match self.participants {
            Participants::List(list) => list,
            Participants::Lines(text) => text.lines().map(str::to_string).collect(),
        };

        let cmd = AddExpense::new(self.payer, total, participants, split_type);
        if split_type == SplitType::Equal {
            return Ok(cmd);
        }

        let details = match self.split_details {
            None => Vec::new(),
            Some(RawSplitDetails::Lines(text)) => parse_split_details(&text)?
                .into_iter()
                .map(|(p, v)| (p.to_string(), v))
                .collect(),
            Some(RawSplitDetails::Map(map)) => map
                .into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        NumberOrText::Number(n) => decimal_from_number(&n).ok_or_else(|| {
                            ValidationError::invalid_share(&name, format!("not a usable number: {n}"))
                        })?,
                        NumberOrText::Text(s) => parse_split_value(&name, &s)?,
                    };
                    Ok((name, value))
                })
                .collect::<ValidationResult<Vec<_>>>()?,
        };

        Ok(cmd.with_details(details))
    }
}

fn decimal_from_number(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
