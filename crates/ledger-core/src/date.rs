//! # Ledger Dates
//!
//! Fixed-format business dates: `LedgerDate` (`YYYY-MM-DD`) and
//! `MonthKey` (`MM` or `YYYY-MM`).
//!
//! ## Text In, Text Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Dates Flow Through the Ledger                    │
//! │                                                                         │
//! │  Browser <input type="date">  ──►  "2025-03-01"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerDate::from_str  ← shape check only: DDDD-DD-DD                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerDate { year: 2025, month: 3, day: 1 }                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite TEXT column  ──►  "2025-03-01"  (Display, zero padded)         │
//! │                                                                         │
//! │  NO timezone, NO calendar: "2025-02-31" is a valid LedgerDate.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! The derived `Ord` compares (year, month, day). Because the text form is
//! fixed width and zero padded, this is exactly the lexicographic order of
//! the stored strings, so SQL `ORDER BY date` and Rust sorting agree.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DateParseError;

// =============================================================================
// LedgerDate
// =============================================================================

/// A `YYYY-MM-DD` date with no calendar semantics.
///
/// ## Example
/// ```rust
/// use ledger_core::LedgerDate;
///
/// let date: LedgerDate = "2025-03-01".parse().unwrap();
/// assert_eq!(date.month_segment(), "03");
/// assert_eq!(date.to_string(), "2025-03-01");
///
/// // Day 31 of February is accepted on purpose.
/// assert!("2025-02-31".parse::<LedgerDate>().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerDate {
    year: u16,
    month: u8,
    day: u8,
}

impl LedgerDate {
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// The two-digit month segment, e.g. `"03"`.
    pub fn month_segment(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for LedgerDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError {
            input: s.to_string(),
            expected: "YYYY-MM-DD",
        };

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(err());
        }

        let year = parse_digits(&bytes[0..4]).ok_or_else(err)?;
        let month = parse_digits(&bytes[5..7]).ok_or_else(err)?;
        let day = parse_digits(&bytes[8..10]).ok_or_else(err)?;

        Ok(LedgerDate {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        })
    }
}

impl Serialize for LedgerDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LedgerDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Parses a run of ASCII digits; `None` if any byte is not a digit.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            Some(acc * 10 + u32::from(b - b'0'))
        } else {
            None
        }
    })
}

// =============================================================================
// MonthKey
// =============================================================================

/// Selects the records of one month.
///
/// ## Two Shapes
/// - `"10"`      → `Month` : month segment equals 10, any year
///   (what the browser's month dropdown sends)
/// - `"2025-10"` → `YearMonth` : date starts with `2025-10`
///   (what monthly reconciliation uses)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthKey {
    Month(u8),
    YearMonth { year: u16, month: u8 },
}

impl MonthKey {
    /// Checks whether `date` falls in this month.
    pub fn matches(&self, date: &LedgerDate) -> bool {
        match *self {
            MonthKey::Month(month) => date.month == month,
            MonthKey::YearMonth { year, month } => date.year == year && date.month == month,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKey::Month(month) => write!(f, "{:02}", month),
            MonthKey::YearMonth { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl FromStr for MonthKey {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError {
            input: s.to_string(),
            expected: "MM or YYYY-MM",
        };

        let bytes = s.as_bytes();
        match bytes.len() {
            2 => {
                let month = parse_digits(bytes).ok_or_else(err)?;
                Ok(MonthKey::Month(month as u8))
            }
            7 if bytes[4] == b'-' => {
                let year = parse_digits(&bytes[0..4]).ok_or_else(err)?;
                let month = parse_digits(&bytes[5..7]).ok_or_else(err)?;
                Ok(MonthKey::YearMonth {
                    year: year as u16,
                    month: month as u8,
                })
            }
            _ => Err(err()),
        }
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> LedgerDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let d = date("2025-03-01");
        assert_eq!(d.year(), 2025);
        assert_eq!(d.month(), 3);
        assert_eq!(d.day(), 1);
        assert_eq!(d.to_string(), "2025-03-01");
    }

    #[test]
    fn test_no_calendar_validation() {
        assert!("2025-02-31".parse::<LedgerDate>().is_ok());
        assert!("2025-13-99".parse::<LedgerDate>().is_ok());
        assert!("0000-00-00".parse::<LedgerDate>().is_ok());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        for bad in [
            "",
            "2025-3-01",
            "2025/03/01",
            "25-03-01",
            "2025-03-01T00:00",
            "2025-03-0a",
            " 2025-03-01",
            "２０２５-03-01",
        ] {
            assert!(bad.parse::<LedgerDate>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_order_matches_text_order() {
        let mut dates = vec![
            date("2025-10-02"),
            date("2024-12-31"),
            date("2025-09-30"),
            date("2025-10-01"),
        ];
        let mut texts: Vec<String> = dates.iter().map(|d| d.to_string()).collect();

        dates.sort();
        texts.sort();

        let sorted: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        assert_eq!(sorted, texts);
    }

    #[test]
    fn test_serde_as_string() {
        let d = date("2025-03-01");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-03-01\"");

        let back: LedgerDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);

        assert!(serde_json::from_str::<LedgerDate>("\"03/01/2025\"").is_err());
    }

    #[test]
    fn test_month_key_shapes() {
        assert_eq!("10".parse::<MonthKey>().unwrap(), MonthKey::Month(10));
        assert_eq!(
            "2025-03".parse::<MonthKey>().unwrap(),
            MonthKey::YearMonth {
                year: 2025,
                month: 3
            }
        );
        assert!("3".parse::<MonthKey>().is_err());
        assert!("2025-3".parse::<MonthKey>().is_err());
        assert!("2025-03-01".parse::<MonthKey>().is_err());
        assert!("ab".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_matches() {
        let any_october: MonthKey = "10".parse().unwrap();
        assert!(any_october.matches(&date("2024-10-15")));
        assert!(any_october.matches(&date("2025-10-01")));
        assert!(!any_october.matches(&date("2025-01-10")));

        let march_2025: MonthKey = "2025-03".parse().unwrap();
        assert!(march_2025.matches(&date("2025-03-31")));
        assert!(!march_2025.matches(&date("2024-03-31")));
        assert_eq!(march_2025.to_string(), "2025-03");
    }
}
