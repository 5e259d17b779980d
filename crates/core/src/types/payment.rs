//! Masked payment card details.

use serde::{Deserialize, Serialize};

/// The parts of a payment card that are safe to keep on an order.
///
/// Only the last four digits of the card number survive; the CVV is never
/// represented at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub card_last4: String,
    pub card_name: String,
    pub expiry_date: String,
}

impl CardSummary {
    /// Mask a card number, keeping its last four digits.
    ///
    /// Separators (spaces, dashes) are ignored. Numbers with fewer than four
    /// digits keep whatever digits they have.
    #[must_use]
    pub fn mask(card_number: &str, card_name: &str, expiry_date: &str) -> Self {
        let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
        let card_last4 = digits
            .iter()
            .skip(digits.len().saturating_sub(4))
            .collect();

        Self {
            card_last4,
            card_name: card_name.trim().to_owned(),
            expiry_date: expiry_date.trim().to_owned(),
        }
    }
}
