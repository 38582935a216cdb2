//! Segmented document identity: establishment-point-sequence, the printable
//! form of a terminal-scoped document number.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::terminal;

/// A document number in its segmented form, e.g. `001-002-0000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DocumentNumber {
    pub establishment: i32,
    pub point: i32,
    pub sequence: i64,
}

impl DocumentNumber {
    pub fn new(establishment: i32, point: i32, sequence: i64) -> Self {
        Self {
            establishment,
            point,
            sequence,
        }
    }

    /// Number as issued by a terminal: establishment and point come from the
    /// terminal, the sequence from the allocation.
    pub fn from_terminal(terminal: &terminal::Model, sequence: i64) -> Self {
        Self {
            establishment: terminal.establishment_code,
            point: terminal.point_code,
            sequence,
        }
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}-{:03}-{:07}",
            self.establishment, self.point, self.sequence
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document number '{0}': expected EEE-PPP-SSSSSSS")]
pub struct ParseDocumentNumberError(String);

impl FromStr for DocumentNumber {
    type Err = ParseDocumentNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('-');
        let (establishment, point, sequence) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(e), Some(p), Some(n), None) => (e, p, n),
            _ => return Err(ParseDocumentNumberError(s.to_string())),
        };

        let establishment = establishment
            .parse::<i32>()
            .map_err(|_| ParseDocumentNumberError(s.to_string()))?;
        let point = point
            .parse::<i32>()
            .map_err(|_| ParseDocumentNumberError(s.to_string()))?;
        let sequence = sequence
            .parse::<i64>()
            .map_err(|_| ParseDocumentNumberError(s.to_string()))?;

        Ok(Self {
            establishment,
            point,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_zero_padded_segments() {
        let number = DocumentNumber::new(1, 2, 42);
        assert_eq!(number.to_string(), "001-002-0000042");
    }

    #[test]
    fn wide_sequences_are_not_truncated() {
        let number = DocumentNumber::new(999, 31, 12_345_678);
        assert_eq!(number.to_string(), "999-031-12345678");
    }

    #[test]
    fn parses_its_own_display_form() {
        let number = DocumentNumber::new(1, 2, 42);
        let parsed: DocumentNumber = number.to_string().parse().unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("1-2".parse::<DocumentNumber>().is_err());
        assert!("a-b-c".parse::<DocumentNumber>().is_err());
        assert!("1-2-3-4".parse::<DocumentNumber>().is_err());
    }

    #[test]
    fn from_terminal_uses_the_terminal_codes() {
        let terminal = terminal::Model {
            id: 5,
            code: "POS-1".into(),
            establishment_code: 1,
            point_code: 2,
            next_number: 42,
        };
        let number = DocumentNumber::from_terminal(&terminal, terminal.next_number);
        assert_eq!(number.to_string(), "001-002-0000042");
    }
}
