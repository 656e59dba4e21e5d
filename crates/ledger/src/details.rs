//! Parsing of split details supplied as text or as loosely typed values.
//!
//! Textual input holds one `Name:Value` declaration per line:
//!
//! ```text
//! John:100.00
//! Jane: 150
//! ```

use std::collections::btree_map::Entry;
use std::str::FromStr;

use rust_decimal::Decimal;

use splitledger_core::{Participant, ValidationError, ValidationResult};

use crate::split::SplitDetails;

/// Parse one split value for `participant`.
///
/// Accepts plain decimal notation (`12`, `33.33`, `-1`). Range checks depend
/// on the split type and happen in the calculator.
pub fn parse_split_value(participant: &str, raw: &str) -> ValidationResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid_share(participant, "value is missing"));
    }
    Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::invalid_share(participant, format!("not a number: {trimmed:?}")))
}

/// Parse `Name:Value` lines into split details.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_split_details(text: &str) -> ValidationResult<SplitDetails> {
    let mut details = SplitDetails::new();

    for (idx, line) in text.lines().enumerate() {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        let malformed = || ValidationError::MalformedSplitDetail {
            line: idx + 1,
            content: content.to_string(),
        };

        let (name, value) = content.split_once(':').ok_or_else(malformed)?;
        let participant = Participant::new(name).map_err(|_| malformed())?;
        let value = parse_split_value(participant.as_str(), value)?;

        match details.entry(participant) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(_) => return Err(malformed()),
        }
    }

    Ok(details)
}

/// Build split details from name/value pairs, trimming names.
///
/// Two keys that trim to the same name are rejected rather than merged.
pub fn collect_split_details<I, K>(pairs: I) -> ValidationResult<SplitDetails>
where
    I: IntoIterator<Item = (K, Decimal)>,
    K: AsRef<str>,
{
    let mut details = SplitDetails::new();
    for (name, value) in pairs {
        let participant = Participant::new(name.as_ref()).map_err(|_| {
            ValidationError::invalid_share(name.as_ref(), "participant name must not be empty")
        })?;
        match details.entry(participant) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                return Err(ValidationError::invalid_share(
                    slot.key().as_str(),
                    "declared more than once",
                ));
            }
        }
    }
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_lines_with_optional_spaces() {
        let details = parse_split_details("John:100.00\n  Jane: 150\n\nBob :50\n").unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details["John"], dec!(100.00));
        assert_eq!(details["Jane"], dec!(150));
        assert_eq!(details["Bob"], dec!(50));
    }

    #[test]
    fn line_without_colon_is_malformed() {
        let err = parse_split_details("John:1\nJane 2").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedSplitDetail {
                line: 2,
                content: "Jane 2".into(),
            }
        );
    }

    #[test]
    fn empty_name_is_malformed() {
        let err = parse_split_details(" : 5").unwrap_err();
        assert_eq!(err.code(), "malformed_split_detail");
    }

    #[test]
    fn non_numeric_value_is_invalid_share() {
        let err = parse_split_details("John:lots").unwrap_err();
        assert_eq!(err.code(), "invalid_share_value");
        assert!(err.to_string().contains("John"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = parse_split_details("John:1\n John :2").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedSplitDetail {
                line: 2,
                content: "John :2".into(),
            }
        );
    }

    #[test]
    fn collected_pairs_are_trimmed_and_deduplicated() {
        let details = collect_split_details([(" Alice ", dec!(1)), ("Bob", dec!(2))]).unwrap();
        assert_eq!(details["Alice"], dec!(1));

        let err = collect_split_details([("Alice", dec!(1)), ("Alice ", dec!(2))]).unwrap_err();
        assert_eq!(err, ValidationError::invalid_share("Alice", "declared more than once"));
    }
}
