use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three regulatory form categories the filing crawler keeps. Every other
/// form type on the index is silently discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// 10-K annual report
    Annual,
    /// 10-Q quarterly report
    Quarterly,
    /// 8-K current report
    Current,
}

impl FormType {
    /// Parses an index form label, returning None for forms outside the
    /// allow-list. Amended variants ("10-K/A") are not relevant forms here.
    pub fn from_index_label(label: &str) -> Option<Self> {
        match label.trim() {
            "10-K" => Some(FormType::Annual),
            "10-Q" => Some(FormType::Quarterly),
            "8-K" => Some(FormType::Current),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            FormType::Annual => "10-K",
            FormType::Quarterly => "10-Q",
            FormType::Current => "8-K",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::from_index_label(s).ok_or_else(|| format!("Unknown form type: {s}"))
    }
}
