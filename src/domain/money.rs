use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Money is represented as an arbitrary-precision decimal so that repeated
/// deposits like `0.1 + 0.2` land exactly on `0.3`.
pub type Amount = Decimal;

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "1e2" -> 100
///
/// The sign is preserved; rejecting non-positive amounts is the ledger's job.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| ParseAmountError::InvalidFormat)
}

/// Format an amount without trailing zeros.
/// Example: 50.00 -> "50", 12.50 -> "12.5"
pub fn format_amount(amount: Amount) -> String {
    amount.normalize().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
