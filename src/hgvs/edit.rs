//! Nucleic acid edits
//!
//! Allele strings are carried verbatim: no case folding, and an absent
//! reference (`None`) is distinct from an empty one only for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Check whether `c` is a DNA/RNA base or IUPAC ambiguity code (either case)
pub fn is_nucleotide(c: char) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        'A' | 'C'
            | 'G'
            | 'T'
            | 'U'
            | 'R'
            | 'Y'
            | 'S'
            | 'W'
            | 'K'
            | 'M'
            | 'B'
            | 'D'
            | 'H'
            | 'V'
            | 'N'
    )
}

/// Check whether every character of `seq` is a nucleotide
///
/// The empty string is a valid (empty) sequence.
pub fn is_nucleotide_sequence(seq: &str) -> bool {
    seq.chars().all(is_nucleotide)
}

/// Kind of a nucleic acid edit, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Substitution,
    Deletion,
    Insertion,
    Duplication,
    Delins,
    Inversion,
    Identity,
    Uncertain,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EditKind::Substitution => "sub",
            EditKind::Deletion => "del",
            EditKind::Insertion => "ins",
            EditKind::Duplication => "dup",
            EditKind::Delins => "delins",
            EditKind::Inversion => "inv",
            EditKind::Identity => "identity",
            EditKind::Uncertain => "uncertain",
        };
        write!(f, "{}", s)
    }
}

/// A nucleic acid edit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NaEdit {
    /// Single base change (e.g., A>G)
    Substitution { reference: String, alternate: String },

    /// Removal of bases (e.g., del, delA)
    Deletion {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },

    /// Addition of bases between two positions (e.g., insATG)
    Insertion { alternate: String },

    /// Copy of bases (e.g., dup, dupATG)
    Duplication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sequence: Option<String>,
    },

    /// Replacement of bases (e.g., delinsATG, delACinsGT)
    Delins {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        alternate: String,
    },

    /// Reversal of bases (inv)
    Inversion,

    /// No change (e.g., A=, =)
    Identity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },

    /// Unknown or unresolved change (?)
    Uncertain,
}

impl NaEdit {
    pub fn kind(&self) -> EditKind {
        match self {
            NaEdit::Substitution { .. } => EditKind::Substitution,
            NaEdit::Deletion { .. } => EditKind::Deletion,
            NaEdit::Insertion { .. } => EditKind::Insertion,
            NaEdit::Duplication { .. } => EditKind::Duplication,
            NaEdit::Delins { .. } => EditKind::Delins,
            NaEdit::Inversion => EditKind::Inversion,
            NaEdit::Identity { .. } => EditKind::Identity,
            NaEdit::Uncertain => EditKind::Uncertain,
        }
    }

    /// The stated reference allele, if the edit carries a non-empty one
    ///
    /// Duplications are excluded: their sequence is checked separately.
    pub fn stated_reference(&self) -> Option<&str> {
        let reference = match self {
            NaEdit::Substitution { reference, .. } => Some(reference.as_str()),
            NaEdit::Deletion { reference }
            | NaEdit::Delins { reference, .. }
            | NaEdit::Identity { reference } => reference.as_deref(),
            _ => None,
        };
        reference.filter(|r| !r.is_empty())
    }

    /// The stated alternate allele for edits that carry one
    pub fn stated_alternate(&self) -> Option<&str> {
        match self {
            NaEdit::Substitution { alternate, .. }
            | NaEdit::Insertion { alternate }
            | NaEdit::Delins { alternate, .. } => Some(alternate.as_str()),
            _ => None,
        }
    }

    /// Edit leaves the sequence unchanged
    pub fn is_identity(&self) -> bool {
        match self {
            NaEdit::Identity { .. } => true,
            NaEdit::Substitution {
                reference,
                alternate,
            } => reference == alternate,
            _ => false,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, NaEdit::Uncertain)
    }
}

impl fmt::Display for NaEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaEdit::Substitution {
                reference,
                alternate,
            } => write!(f, "{}>{}", reference, alternate),
            NaEdit::Deletion { reference } => {
                write!(f, "del{}", reference.as_deref().unwrap_or(""))
            }
            NaEdit::Insertion { alternate } => write!(f, "ins{}", alternate),
            NaEdit::Duplication { sequence } => {
                write!(f, "dup{}", sequence.as_deref().unwrap_or(""))
            }
            NaEdit::Delins {
                reference,
                alternate,
            } => write!(
                f,
                "del{}ins{}",
                reference.as_deref().unwrap_or(""),
                alternate
            ),
            NaEdit::Inversion => write!(f, "inv"),
            NaEdit::Identity { reference } => {
                write!(f, "{}=", reference.as_deref().unwrap_or(""))
            }
            NaEdit::Uncertain => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_nucleotide_sequence() {
        assert!(is_nucleotide_sequence("ACGT"));
        assert!(is_nucleotide_sequence("acgun"));
        assert!(is_nucleotide_sequence("RYSWKMBDHVN"));
        assert!(is_nucleotide_sequence(""));
        assert!(!is_nucleotide_sequence("ACXT"));
        assert!(!is_nucleotide_sequence("AC GT"));
    }

    #[test]
    fn test_display() {
        let sub = NaEdit::Substitution {
            reference: "A".into(),
            alternate: "G".into(),
        };
        assert_eq!(sub.to_string(), "A>G");
        assert_eq!(NaEdit::Deletion { reference: None }.to_string(), "del");
        assert_eq!(
            NaEdit::Deletion {
                reference: Some("GG".into())
            }
            .to_string(),
            "delGG"
        );
        assert_eq!(
            NaEdit::Insertion {
                alternate: "AT".into()
            }
            .to_string(),
            "insAT"
        );
        assert_eq!(NaEdit::Duplication { sequence: None }.to_string(), "dup");
        assert_eq!(
            NaEdit::Delins {
                reference: None,
                alternate: "TT".into()
            }
            .to_string(),
            "delinsTT"
        );
        assert_eq!(
            NaEdit::Delins {
                reference: Some("AC".into()),
                alternate: "TT".into()
            }
            .to_string(),
            "delACinsTT"
        );
        assert_eq!(NaEdit::Inversion.to_string(), "inv");
        assert_eq!(NaEdit::Identity { reference: None }.to_string(), "=");
        assert_eq!(NaEdit::Uncertain.to_string(), "?");
    }

    #[test]
    fn test_stated_reference() {
        let del = NaEdit::Deletion {
            reference: Some(String::new()),
        };
        assert_eq!(del.stated_reference(), None);
        let delins = NaEdit::Delins {
            reference: Some("CA".into()),
            alternate: "T".into(),
        };
        assert_eq!(delins.stated_reference(), Some("CA"));
        let dup = NaEdit::Duplication {
            sequence: Some("A".into()),
        };
        assert_eq!(dup.stated_reference(), None);
    }

    #[test]
    fn test_is_identity() {
        assert!(NaEdit::Identity { reference: None }.is_identity());
        let same = NaEdit::Substitution {
            reference: "C".into(),
            alternate: "C".into(),
        };
        assert!(same.is_identity());
        assert!(!NaEdit::Inversion.is_identity());
    }

    #[test]
    fn test_serde_tagged() {
        let edit: NaEdit =
            serde_json::from_str(r#"{"type":"delins","reference":"AC","alternate":"T"}"#)
                .unwrap();
        assert_eq!(edit.kind(), EditKind::Delins);
        let json = serde_json::to_string(&NaEdit::Duplication { sequence: None }).unwrap();
        assert_eq!(json, r#"{"type":"duplication"}"#);
    }
}
