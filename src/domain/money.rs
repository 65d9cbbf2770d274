use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Amounts are exact decimals so sums of currency-like values never pick up
/// binary floating-point error. Display is always two decimal places.
pub const DISPLAY_SCALE: u32 = 2;

/// Most decimal places a stored amount may have (whole cents).
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Largest amount a single transaction may carry: 999,999,999,999.99.
///
/// Amounts are stored as JSON numbers, so every accepted amount must survive
/// an `f64` round trip exactly; at two decimal places that holds well below
/// 2^53 cents. The cap also keeps ledger sums far from `Decimal` overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x107A_3FFF, 0x5AF3, 0, false, 2);

/// Format an amount with two decimal places.
/// Example: 50 -> "50.00", -12.345 -> "-12.35"
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a user-entered decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, ".75" -> 0.75
///
/// Sign is preserved; rejecting non-positive values is up to the ledger.
pub fn parse_amount(input: &str) -> Result<Decimal, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    // Give ".5" style input an explicit leading zero
    let normalized = match input.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{}", rest),
        _ if input.starts_with('.') => format!("0{}", input),
        _ => input.to_string(),
    };

    Decimal::from_str(&normalized).map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
