//! Whole-dong price representation.

use serde::{Deserialize, Serialize};

use crate::format::format_vnd;

/// An amount of Vietnamese dong.
///
/// The dong has no minor unit in practice, so prices travel as plain JSON
/// integers and are kept as `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vnd(i64);

impl Vnd {
    /// Create a price from a dong amount.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// The raw dong amount.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Multiply by a line-item quantity, saturating on overflow.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl std::fmt::Display for Vnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_vnd(self.0))
    }
}

impl From<i64> for Vnd {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_vnd_format() {
        assert_eq!(Vnd::new(199_000).to_string(), "199.000 ₫");
    }

    #[test]
    fn test_times() {
        assert_eq!(Vnd::new(50_000).times(3), Vnd::new(150_000));
    }

    #[test]
    fn test_transparent_json() {
        let price: Vnd = serde_json::from_str("250000").unwrap();
        assert_eq!(price.amount(), 250_000);
        assert!(serde_json::from_str::<Vnd>("\"250000\"").is_err());
    }
}
