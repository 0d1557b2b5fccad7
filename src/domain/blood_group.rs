//! Blood group and urgency enumerations
//!
//! The eight ABO/Rh blood groups and the request urgency levels. Parsing
//! is the validation boundary for blood groups: anything outside the eight
//! known labels fails with [`CrossmatchError::InvalidBloodGroup`].

use crate::domain::errors::CrossmatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight ABO/Rh blood groups
///
/// # Examples
///
/// ```
/// use crossmatch::domain::BloodGroup;
///
/// let group: BloodGroup = "AB+".parse().unwrap();
/// assert_eq!(group, BloodGroup::AbPositive);
/// assert!("X+".parse::<BloodGroup>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    /// A positive
    #[serde(rename = "A+")]
    APositive,
    /// A negative
    #[serde(rename = "A-")]
    ANegative,
    /// B positive
    #[serde(rename = "B+")]
    BPositive,
    /// B negative
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive (universal recipient)
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative
    #[serde(rename = "AB-")]
    AbNegative,
    /// O positive
    #[serde(rename = "O+")]
    OPositive,
    /// O negative (universal donor)
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All eight blood groups, in display order
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Returns the clinical label for this blood group, e.g. `"A+"`
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// Whether this group is the universal donor (O-)
    pub fn is_universal_donor(&self) -> bool {
        matches!(self, BloodGroup::ONegative)
    }

    /// Whether this group is the universal recipient (AB+)
    pub fn is_universal_recipient(&self) -> bool {
        matches!(self, BloodGroup::AbPositive)
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = CrossmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A+" => Ok(BloodGroup::APositive),
            "A-" => Ok(BloodGroup::ANegative),
            "B+" => Ok(BloodGroup::BPositive),
            "B-" => Ok(BloodGroup::BNegative),
            "AB+" => Ok(BloodGroup::AbPositive),
            "AB-" => Ok(BloodGroup::AbNegative),
            "O+" => Ok(BloodGroup::OPositive),
            "O-" => Ok(BloodGroup::ONegative),
            other => Err(CrossmatchError::InvalidBloodGroup(other.to_string())),
        }
    }
}

/// Urgency level of a blood request
///
/// Orders the urgency-weighted compatibility score and selects the call to
/// action in donor-facing notification messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Life-threatening, immediate response needed
    Critical,
    /// Response needed within 24-48 hours
    Urgent,
    /// Routine request
    #[default]
    Normal,
}

impl UrgencyLevel {
    /// Multiplier applied to the compatibility score
    pub fn weight(&self) -> u32 {
        match self {
            UrgencyLevel::Critical => 3,
            UrgencyLevel::Urgent => 2,
            UrgencyLevel::Normal => 1,
        }
    }

    /// Returns the lowercase label, e.g. `"critical"`
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Normal => "normal",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = CrossmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(UrgencyLevel::Critical),
            "urgent" => Ok(UrgencyLevel::Urgent),
            "normal" => Ok(UrgencyLevel::Normal),
            other => Err(CrossmatchError::Validation(format!(
                "Invalid urgency level '{other}'. Must be one of: critical, urgent, normal"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_group_parse_all_labels() {
        for group in BloodGroup::ALL {
            let parsed: BloodGroup = group.as_str().parse().unwrap();
            assert_eq!(parsed, group);
        }
    }

    #[test]
    fn test_blood_group_parse_unknown_fails() {
        let err = "X+".parse::<BloodGroup>().unwrap_err();
        assert!(matches!(err, CrossmatchError::InvalidBloodGroup(_)));
        assert!("".parse::<BloodGroup>().is_err());
        assert!("ab+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_blood_group_parse_trims_whitespace() {
        let parsed: BloodGroup = " O- ".parse().unwrap();
        assert_eq!(parsed, BloodGroup::ONegative);
    }

    #[test]
    fn test_blood_group_serde_uses_clinical_labels() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let back: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(back, BloodGroup::OPositive);
    }

    #[test]
    fn test_universal_flags() {
        assert!(BloodGroup::ONegative.is_universal_donor());
        assert!(BloodGroup::AbPositive.is_universal_recipient());
        assert!(!BloodGroup::OPositive.is_universal_donor());
        assert!(!BloodGroup::AbNegative.is_universal_recipient());
    }

    #[test]
    fn test_urgency_weights_are_ordered() {
        assert!(UrgencyLevel::Critical.weight() > UrgencyLevel::Urgent.weight());
        assert!(UrgencyLevel::Urgent.weight() > UrgencyLevel::Normal.weight());
    }

    #[test]
    fn test_urgency_parse() {
        assert_eq!(
            "CRITICAL".parse::<UrgencyLevel>().unwrap(),
            UrgencyLevel::Critical
        );
        assert!("panic".parse::<UrgencyLevel>().is_err());
    }

    #[test]
    fn test_urgency_default_is_normal() {
        assert_eq!(UrgencyLevel::default(), UrgencyLevel::Normal);
    }
}
