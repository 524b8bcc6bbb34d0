//! Validation result model
//!
//! Validation accumulates every problem it finds instead of stopping at
//! the first, so callers can report all of them in one pass.

use serde::{Deserialize, Serialize};

/// Outcome of validating a request or route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
	pub valid: bool,
	/// Human-readable problems, empty when valid
	pub errors: Vec<String>,
}

impl ValidationResult {
	/// A passing result with no errors.
	pub fn ok() -> Self {
		Self {
			valid: true,
			errors: Vec::new(),
		}
	}

	/// A failing result carrying the given errors.
	pub fn failed(errors: Vec<String>) -> Self {
		Self {
			valid: false,
			errors,
		}
	}

	/// Records a problem and marks the result invalid.
	pub fn push_error(&mut self, error: impl Into<String>) {
		self.valid = false;
		self.errors.push(error.into());
	}

	/// Folds another result into this one; the combination is valid only
	/// when both inputs were.
	pub fn merge(&mut self, other: ValidationResult) {
		self.valid = self.valid && other.valid;
		self.errors.extend(other.errors);
	}
}

impl Default for ValidationResult {
	fn default() -> Self {
		Self::ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validation_result_accumulates_errors() {
		let mut result = ValidationResult::ok();
		assert!(result.valid);

		result.push_error("missing amount");
		result.push_error("unsupported chain pair");

		assert!(!result.valid);
		assert_eq!(result.errors.len(), 2);
	}

	#[test]
	fn test_failed_constructor() {
		let result = ValidationResult::failed(vec!["bad address".to_string()]);
		assert!(!result.valid);
		assert_eq!(result.errors, vec!["bad address".to_string()]);
	}

	#[test]
	fn test_merge_combines_verdicts_and_errors() {
		let mut result = ValidationResult::ok();
		result.merge(ValidationResult::ok());
		assert!(result.valid);

		result.merge(ValidationResult::failed(vec!["bad address".to_string()]));
		assert!(!result.valid);
		assert_eq!(result.errors, vec!["bad address".to_string()]);
	}
}
