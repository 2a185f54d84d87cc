//! Ticker symbol newtype.

use crate::error::ScrapeError;
use std::fmt;

/// A tradable security's symbol, used both as the remote lookup key and as a
/// path component for storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Surrounding whitespace is trimmed; an empty result is rejected.
    pub fn new(symbol: &str) -> Result<Self, ScrapeError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ScrapeError::EmptyTicker);
        }
        Ok(Self(symbol.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_symbol_verbatim() {
        assert_eq!(Ticker::new("BRK-B").unwrap().as_str(), "BRK-B");
        assert_eq!(Ticker::new(" aapl ").unwrap().to_string(), "aapl");
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(Ticker::new(""), Err(ScrapeError::EmptyTicker)));
        assert!(matches!(Ticker::new("   "), Err(ScrapeError::EmptyTicker)));
    }
}
