use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Column names of the store, in the order rows are written.
pub const HEADER: [&str; 4] = ["date", "category", "amount", "description"];

/// One expense entry. Field order matters: it is the serialization order of a
/// store row, which must match `HEADER`.
///
/// The date is kept as the string the user typed; month grouping only looks at
/// its first seven characters, so nothing here checks it is a real calendar date.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Expense {
    pub date: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    pub description: String,
}

/// Parses user (or stored) amount text. Accepts plain decimals as well as
/// scientific notation, surrounding whitespace is ignored.
///
/// Numbers a float would accept but a `Decimal` can't hold (`1e30`, `inf`,
/// `nan`, more than 28 fractional digits) are `OutOfRange`, not `NonNumericInput`.
pub(crate) fn parse_amount(field: &'static str, text: &str) -> Result<Decimal, Error> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| {
            let input = text.to_owned();
            if text.parse::<f64>().is_ok() {
                Error::OutOfRange { field, input }
            } else {
                Error::NonNumericInput { field, input }
            }
        })
}

fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
    parse_amount("amount", &text).map_err(serde::de::Error::custom)
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{field} must be a number (got {input:?})")]
    NonNumericInput { field: &'static str, input: String },
    #[error("{field} {input:?} is outside the supported range")]
    OutOfRange { field: &'static str, input: String },
    #[error("Total for {group:?} overflowed")]
    Overflow { group: String },
    #[error("Malformed expense store at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Chart rendering failed: {0}")]
    Chart(String),
    #[error("Invalid choice {0:?}")]
    InvalidChoice(String),
    #[error("End of input")]
    EndOfInput,
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, Error};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_plain_amounts() {
        assert_eq!(parse_amount("Amount", "100").unwrap(), dec!(100));
        assert_eq!(parse_amount("Amount", " 12.50\n").unwrap(), dec!(12.50));
        assert_eq!(parse_amount("Amount", "-3.2").unwrap(), dec!(-3.2));
        assert_eq!(parse_amount("Amount", "0").unwrap(), dec!(0));
    }

    #[test]
    fn parse_scientific_amount() {
        assert_eq!(parse_amount("Amount", "1e3").unwrap(), dec!(1000));
        assert_eq!(parse_amount("Amount", "2.5e-1").unwrap(), dec!(0.25));
    }

    #[test]
    fn reject_non_numeric() {
        for text in ["", "abc", "12,5", "1.2.3", "ten"] {
            match parse_amount("Budget", text) {
                Err(Error::NonNumericInput { field, input }) => {
                    assert_eq!(field, "Budget");
                    assert_eq!(input, text);
                }
                other => panic!("{text:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn valid_floats_out_of_range() {
        for text in ["1e30", "-1e30", "1e+30", "inf", "nan", "79228162514264337593543950336"] {
            match parse_amount("Amount", text) {
                Err(Error::OutOfRange { field, input }) => {
                    assert_eq!(field, "Amount");
                    assert_eq!(input, text);
                }
                other => panic!("{text:?} gave {other:?}"),
            }
        }
        let err = parse_amount("Amount", "1e30").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Amount \"1e30\" is outside the supported range"
        );
        assert_eq!(
            parse_amount("Amount", "79228162514264337593543950335").unwrap(),
            Decimal::MAX
        );
    }

    #[test]
    fn non_numeric_message() {
        let err = parse_amount("Amount", "ten").unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a number (got \"ten\")");
    }
}
