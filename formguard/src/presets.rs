//! Ready-made configurations for common masked inputs.

use crate::field::{FailureKind, FieldConfig};

impl FieldConfig {
    /// US telephone number: `(555) 123-4567`, full mask shown while typing.
    pub fn telephone() -> Self {
        Self::new()
            .mask("(___) ___-____")
            .slots("_")
            .accept(r"\d")
            .exact_length(10)
            .show_full_mask(true)
            .validate_unmasked(true)
    }

    /// Card number in four groups of four, checked with [`luhn_check`].
    ///
    /// Reads back unmasked.
    pub fn credit_card() -> Self {
        Self::new()
            .mask(".... .... .... ....")
            .slots(".")
            .accept(r"\d")
            .exact_length(16)
            .validate_unmasked(true)
            .custom(luhn_check)
            .unmask_on_read(true)
            .message(
                FailureKind::Custom,
                "Invalid credit card number... Try 4111 1111 1111 1111",
            )
    }
}

/// Luhn checksum over a card number. Spaces are ignored.
///
/// Any other non-digit, or a digit sum of zero, fails.
pub fn luhn_check(number: &str) -> bool {
    const DOUBLED: [u32; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

    let mut sum = 0;
    for (i, c) in number.chars().filter(|c| *c != ' ').rev().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 1 { DOUBLED[digit as usize] } else { digit };
    }
    sum != 0 && sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_valid_numbers() {
        assert!(luhn_check("4111111111111111"));
        assert!(luhn_check("4111 1111 1111 1111"));
        assert!(luhn_check("79927398713"));
    }

    #[test]
    fn test_luhn_invalid_numbers() {
        assert!(!luhn_check("4111111111111112"));
        assert!(!luhn_check("0000000000000000"));
        assert!(!luhn_check("4111-1111-1111-1111"));
        assert!(!luhn_check(""));
    }
}
