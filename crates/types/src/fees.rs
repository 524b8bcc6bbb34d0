//! Fee arithmetic over decimal strings
//!
//! Fees arrive from providers as base-unit decimal strings and can exceed
//! every native integer width, so all math runs on [`BigUint`]. Parsing is
//! strict: anything other than pure ASCII digits is rejected rather than
//! guessed at.

use num_bigint::BigUint;

/// Parses a base-unit fee string into an arbitrary-precision integer.
///
/// Returns `None` for empty strings and for anything containing a sign,
/// decimals, or other non-digit characters.
pub fn parse_fee(value: &str) -> Option<BigUint> {
	if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
		return None;
	}
	value.parse::<BigUint>().ok()
}

/// Sums a sequence of fee strings, skipping any that fail to parse.
///
/// Returns the partial sum together with the number of skipped entries, so
/// callers can surface degraded totals without failing the whole route.
pub fn sum_fees<'a, I>(fees: I) -> (BigUint, usize)
where
	I: IntoIterator<Item = &'a str>,
{
	let mut total = BigUint::from(0u32);
	let mut skipped = 0usize;

	for fee in fees {
		match parse_fee(fee) {
			Some(value) => total += value,
			None => skipped += 1,
		}
	}

	(total, skipped)
}

/// Computes the fee implied by an input and output amount, as a percentage
/// of the input, clamped to 0..=100.
///
/// The fee is `input - output`, taken in basis points on exact integers
/// before the single narrowing conversion to `f64`, so 18-decimal amounts
/// do not lose precision on the way in. Unparsable values, a zero input,
/// and an output at or above the input all yield 0.
pub fn fee_percentage(input_amount: &str, output_amount: &str) -> f64 {
	let (Some(input), Some(output)) = (parse_fee(input_amount), parse_fee(output_amount)) else {
		return 0.0;
	};

	if input == BigUint::from(0u32) || output >= input {
		return 0.0;
	}

	let basis_points = (&input - &output) * BigUint::from(10_000u32) / &input;
	let basis_points = u64::try_from(basis_points).unwrap_or(u64::MAX);

	(basis_points as f64 / 100.0).min(100.0)
}
