//! Tableaux moves and their wire payloads

use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A move requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableauxMove {
    /// Append one child per atom of `clause` below `leaf`
    Expand { leaf: usize, clause: usize },
    /// Close `leaf` against a complementary `ancestor`
    Close { leaf: usize, ancestor: usize },
    /// Undo the most recent expand or close
    Backtrack,
}

/// What the history keeps of an applied move: enough to undo it and to
/// replay it on a fresh tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRecord {
    Expand { leaf: usize, clause: usize },
    Close { leaf: usize, ancestor: usize },
}

impl From<MoveRecord> for TableauxMove {
    fn from(record: MoveRecord) -> Self {
        match record {
            MoveRecord::Expand { leaf, clause } => TableauxMove::Expand { leaf, clause },
            MoveRecord::Close { leaf, ancestor } => TableauxMove::Close { leaf, ancestor },
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRecord::Expand { leaf, clause } => write!(f, "e{}.{}", leaf, clause),
            MoveRecord::Close { leaf, ancestor } => write!(f, "c{}.{}", leaf, ancestor),
        }
    }
}

/// JSON form of a move: `{"type": "e", "id1": leaf, "id2": clause}`,
/// `{"type": "c", "id1": leaf, "id2": ancestor}` or `{"type": "b"}`.
///
/// Ids are kept as raw JSON numbers so that negative or oversized integers
/// reach validation and come back as illegal moves rather than decoding
/// errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum MovePayload {
    #[serde(rename = "e")]
    Expand { id1: Number, id2: Number },
    #[serde(rename = "c")]
    Close { id1: Number, id2: Number },
    #[serde(rename = "b")]
    Backtrack {},
}

impl TableauxMove {
    /// Decode a JSON move payload.
    ///
    /// Missing fields, nulls, fractions and unknown move types are
    /// `MalformedPayload`. Integer ids that cannot name a node or clause,
    /// negative or beyond the platform's index range, are `IllegalMove`.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: MovePayload = serde_json::from_str(json)
            .map_err(|e| KernelError::malformed(format!("Invalid move: {}", e)))?;

        match payload {
            MovePayload::Expand { id1, id2 } => Ok(TableauxMove::Expand {
                leaf: index(&id1, "Node")?,
                clause: index(&id2, "Clause")?,
            }),
            MovePayload::Close { id1, id2 } => Ok(TableauxMove::Close {
                leaf: index(&id1, "Node")?,
                ancestor: index(&id2, "Node")?,
            }),
            MovePayload::Backtrack {} => Ok(TableauxMove::Backtrack),
        }
    }

    pub fn to_json(&self) -> String {
        let payload = match *self {
            TableauxMove::Expand { leaf, clause } => MovePayload::Expand {
                id1: Number::from(leaf),
                id2: Number::from(clause),
            },
            TableauxMove::Close { leaf, ancestor } => MovePayload::Close {
                id1: Number::from(leaf),
                id2: Number::from(ancestor),
            },
            TableauxMove::Backtrack => MovePayload::Backtrack {},
        };
        // A plain enum of integers always serializes
        serde_json::to_string(&payload).unwrap_or_default()
    }
}

/// Turn a JSON id into an index. `kind` names what the id refers to.
fn index(id: &Number, kind: &str) -> Result<usize> {
    let missing = || KernelError::illegal_move(format!("{} with ID {} does not exist", kind, id));

    if let Some(id) = id.as_u64() {
        return usize::try_from(id).map_err(|_| missing());
    }
    if id.is_i64() {
        return Err(missing());
    }
    // Integers beyond 64 bits only survive as floats
    match id.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() >= i64::MAX as f64 => Err(missing()),
        _ => Err(KernelError::malformed(format!("Invalid move: id {} is not an integer", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_moves() {
        assert_eq!(
            TableauxMove::from_json(r#"{"type":"e", "id1": 0, "id2": 1}"#).unwrap(),
            TableauxMove::Expand { leaf: 0, clause: 1 }
        );
        assert_eq!(
            TableauxMove::from_json(r#"{"type":"c", "id1": 3, "id2": 2}"#).unwrap(),
            TableauxMove::Close { leaf: 3, ancestor: 2 }
        );
        assert_eq!(
            TableauxMove::from_json(r#"{"type":"b"}"#).unwrap(),
            TableauxMove::Backtrack
        );
    }

    #[test]
    fn test_negative_ids_are_illegal() {
        assert!(matches!(
            TableauxMove::from_json(r#"{"type":"e", "id1": -15, "id2": 0}"#),
            Err(KernelError::IllegalMove(_))
        ));
        assert!(matches!(
            TableauxMove::from_json(r#"{"type":"e", "id1": 0, "id2": -3}"#),
            Err(KernelError::IllegalMove(_))
        ));
        assert!(matches!(
            TableauxMove::from_json(r#"{"type":"c", "id1": 4, "id2": -3}"#),
            Err(KernelError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_oversized_ids_are_illegal() {
        for json in [
            r#"{"type":"e", "id1": 18446744073709551616, "id2": 0}"#,
            r#"{"type":"e", "id1": 0, "id2": 1e30}"#,
            r#"{"type":"c", "id1": 1, "id2": -9223372036854775809}"#,
        ] {
            match TableauxMove::from_json(json) {
                Err(KernelError::IllegalMove(msg)) => assert!(msg.contains("does not exist"), "{}", msg),
                other => panic!("expected IllegalMove for {}, got {:?}", json, other),
            }
        }
    }

    #[test]
    fn test_malformed_payloads() {
        for json in [
            r#"{"type":"e", "id1": null, "id2": 2}"#,
            r#"{"type":null, "id1": 0, "id2": -3}"#,
            r#"{"type":null, "id1": 0, "id2": null}"#,
            r#"{"type":"d", "id1": 1, "id2": 0}"#,
            r#"{"type":"e", "id1": 1}"#,
            r#"{"id1": 1, "id2": 0}"#,
            r#"{"type":"c", "id1": 1.5, "id2": 0}"#,
            r#"{"type":"c", "id1": 1, "id2": "2"}"#,
            "not json",
        ] {
            assert!(
                matches!(TableauxMove::from_json(json), Err(KernelError::MalformedPayload(_))),
                "expected malformed payload for {}",
                json
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        for mv in [
            TableauxMove::Expand { leaf: 3, clause: 1 },
            TableauxMove::Close { leaf: 4, ancestor: 1 },
            TableauxMove::Backtrack,
        ] {
            assert_eq!(TableauxMove::from_json(&mv.to_json()).unwrap(), mv);
        }
        assert_eq!(TableauxMove::Backtrack.to_json(), r#"{"type":"b"}"#);
    }

    #[test]
    fn test_record_display() {
        assert_eq!(MoveRecord::Expand { leaf: 0, clause: 2 }.to_string(), "e0.2");
        assert_eq!(MoveRecord::Close { leaf: 5, ancestor: 1 }.to_string(), "c5.1");
    }
}
