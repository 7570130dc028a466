use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical sentiment attached by the enrichment stage. Unknown is the
/// total default; a persisted row never carries a null label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    #[default]
    Unknown,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            "unknown" => Ok(SentimentLabel::Unknown),
            _ => Err(format!("Unknown sentiment label: {s}")),
        }
    }
}

/// Checks the analyzer's score contract: a finite value in [-1.0, 1.0].
pub fn score_in_range(score: f64) -> bool {
    score.is_finite() && (-1.0..=1.0).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("POSITIVE".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
        assert_eq!(" neutral ".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert!("bullish".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn score_range_is_closed() {
        assert!(score_in_range(-1.0));
        assert!(score_in_range(1.0));
        assert!(score_in_range(0.0));
        assert!(!score_in_range(1.01));
        assert!(!score_in_range(-1.5));
        assert!(!score_in_range(f64::NAN));
    }
}
