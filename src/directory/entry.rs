use std::fmt;

use crate::directory::text::{extract_digits, strip_diacritics};

/// Label values exported by Google Contacts carry the relation schema URI as
/// a prefix, e.g. `http://schemas.google.com/g/2005#mobile`.
pub const LABEL_SCHEMA_PREFIX: &str = "http://schemas.google.com/g/2005#";

/// One dialable number for one person.
///
/// Normalization happens at construction time: the number keeps only its
/// digits, the name and label lose their diacritics, and the label loses the
/// relation schema prefix. Records are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    number: String,
    name: String,
    label: String,
}

impl DirectoryEntry {
    pub fn new(raw_number: &str, raw_name: &str, raw_label: &str) -> Self {
        Self {
            number: extract_digits(raw_number),
            name: strip_diacritics(raw_name),
            label: strip_diacritics(&raw_label.replace(LABEL_SCHEMA_PREFIX, "")),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for DirectoryEntry {
    /// The display form shown on the phone: `name (label)`, or the bare name
    /// when no label qualifies the number.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(formatter, "{}", self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.label)
        }
    }
}
