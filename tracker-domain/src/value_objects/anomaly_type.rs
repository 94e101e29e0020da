// Anomaly type value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyType {
    Combat,
    Data,
    Relic,
    Gas,
    Ice,
    /// Dead-letter bucket for stored rows whose type column is unrecognised.
    #[serde(rename = "unknown")]
    Unknown,
}

impl AnomalyType {
    pub const ACCEPTED: [AnomalyType; 5] = [
        AnomalyType::Combat,
        AnomalyType::Data,
        AnomalyType::Relic,
        AnomalyType::Gas,
        AnomalyType::Ice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::Combat => "Combat",
            AnomalyType::Data => "Data",
            AnomalyType::Relic => "Relic",
            AnomalyType::Gas => "Gas",
            AnomalyType::Ice => "Ice",
            AnomalyType::Unknown => "unknown",
        }
    }

    /// Parses client input. `unknown` and anything outside the enumeration is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ACCEPTED
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == raw)
    }

    pub fn from_stored(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(AnomalyType::Unknown)
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_each_listed_type() {
        for kind in AnomalyType::ACCEPTED {
            assert_eq!(AnomalyType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_never_accepts_unknown_sentinel() {
        assert_eq!(AnomalyType::parse("unknown"), None);
        assert_eq!(AnomalyType::parse("Unknown"), None);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(AnomalyType::parse("combat"), None);
        assert_eq!(AnomalyType::parse("GAS"), None);
    }

    #[test]
    fn stored_values_fall_back_to_unknown() {
        assert_eq!(AnomalyType::from_stored("Relic"), AnomalyType::Relic);
        assert_eq!(AnomalyType::from_stored("Wormhole"), AnomalyType::Unknown);
    }
}
