//! Blood-group compatibility table and scoring
//!
//! Static donor/recipient compatibility per standard transfusion rules,
//! plus an urgency-weighted score used to rank willing donors. All
//! functions here are pure; the only fallible entry point is the string
//! boundary, which rejects unknown blood-group labels.

use super::blood_group::{BloodGroup, UrgencyLevel};
use super::donor::Donor;
use crate::domain::result::Result;
use std::str::FromStr;

use BloodGroup::*;

/// Returns the blood groups that may donate to the given recipient
///
/// The mapping is fixed: O- receives only from O-, AB+ receives from all
/// eight groups, and O- appears in every donor set (universal donor).
///
/// # Examples
///
/// ```
/// use crossmatch::domain::{compatibility, BloodGroup};
///
/// let donors = compatibility::compatible_donor_groups(BloodGroup::APositive);
/// assert_eq!(
///     donors,
///     &[
///         BloodGroup::APositive,
///         BloodGroup::ANegative,
///         BloodGroup::OPositive,
///         BloodGroup::ONegative
///     ]
/// );
/// ```
pub fn compatible_donor_groups(recipient: BloodGroup) -> &'static [BloodGroup] {
    match recipient {
        APositive => &[APositive, ANegative, OPositive, ONegative],
        ANegative => &[ANegative, ONegative],
        BPositive => &[BPositive, BNegative, OPositive, ONegative],
        BNegative => &[BNegative, ONegative],
        AbPositive => &[
            APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative, OPositive,
            ONegative,
        ],
        AbNegative => &[ANegative, BNegative, AbNegative, ONegative],
        OPositive => &[OPositive, ONegative],
        ONegative => &[ONegative],
    }
}

/// String entry point for [`compatible_donor_groups`]
///
/// # Errors
///
/// Fails with [`CrossmatchError::InvalidBloodGroup`] if the label is not
/// one of the eight known blood groups.
///
/// [`CrossmatchError::InvalidBloodGroup`]: crate::domain::errors::CrossmatchError::InvalidBloodGroup
pub fn compatible_donor_groups_for(label: &str) -> Result<&'static [BloodGroup]> {
    let recipient = BloodGroup::from_str(label)?;
    Ok(compatible_donor_groups(recipient))
}

/// Whether `donor` may donate to `recipient`
///
/// Never errors; incompatibility and invalid input are indistinguishable
/// only at the string boundary, which callers hit via
/// [`compatible_donor_groups_for`].
pub fn is_compatible(donor: BloodGroup, recipient: BloodGroup) -> bool {
    compatible_donor_groups(recipient).contains(&donor)
}

/// Urgency-weighted compatibility score
///
/// Returns 0 for an incompatible pair. For a compatible pair the base
/// score is 1, +2 for an exact blood-group match, +1 when the donor is the
/// universal donor (O-) and the request is critical; the sum is then
/// multiplied by the urgency weight (critical 3, urgent 2, normal 1).
/// This gives a total ordering over willing donors: exact matches,
/// universal donors in emergencies and overall urgency all rank higher.
pub fn compatibility_score(donor: BloodGroup, recipient: BloodGroup, urgency: UrgencyLevel) -> u32 {
    if !is_compatible(donor, recipient) {
        return 0;
    }

    let mut score: u32 = 1;
    if donor == recipient {
        score += 2;
    }
    if donor.is_universal_donor() && urgency == UrgencyLevel::Critical {
        score += 1;
    }

    score * urgency.weight()
}

/// A donor paired with their compatibility score for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDonor {
    /// The scored donor
    pub donor: Donor,
    /// Score from [`compatibility_score`]; always > 0
    pub score: u32,
}

/// Ranks donors by desirability for the given recipient and urgency
///
/// Incompatible donors (score 0) are dropped; the rest are sorted
/// descending by score. The sort is stable, so ties keep input order.
pub fn sort_donors_by_compatibility(
    donors: Vec<Donor>,
    recipient: BloodGroup,
    urgency: UrgencyLevel,
) -> Vec<RankedDonor> {
    let mut ranked: Vec<RankedDonor> = donors
        .into_iter()
        .filter_map(|donor| {
            let score = compatibility_score(donor.blood_group, recipient, urgency);
            (score > 0).then_some(RankedDonor { donor, score })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CrossmatchError;
    use crate::domain::ids::UserId;
    use test_case::test_case;

    fn donor(id: &str, blood_group: BloodGroup) -> Donor {
        Donor::new(
            UserId::new(id).unwrap(),
            format!("Donor {id}"),
            format!("{id}@example.com"),
            "+10000000000",
            blood_group,
        )
    }

    #[test]
    fn test_o_negative_is_universal_donor() {
        for recipient in BloodGroup::ALL {
            assert!(
                compatible_donor_groups(recipient).contains(&ONegative),
                "O- must be able to donate to {recipient}"
            );
        }
    }

    #[test]
    fn test_ab_positive_is_universal_recipient() {
        let donors = compatible_donor_groups(AbPositive);
        assert_eq!(donors.len(), 8);
        for group in BloodGroup::ALL {
            assert!(donors.contains(&group));
        }
    }

    #[test]
    fn test_o_negative_receives_only_from_o_negative() {
        assert_eq!(compatible_donor_groups(ONegative), &[ONegative]);
    }

    #[test_case(APositive, &[APositive, ANegative, OPositive, ONegative])]
    #[test_case(ANegative, &[ANegative, ONegative])]
    #[test_case(BPositive, &[BPositive, BNegative, OPositive, ONegative])]
    #[test_case(BNegative, &[BNegative, ONegative])]
    #[test_case(AbNegative, &[ANegative, BNegative, AbNegative, ONegative])]
    #[test_case(OPositive, &[OPositive, ONegative])]
    fn test_compatibility_table(recipient: BloodGroup, expected: &[BloodGroup]) {
        assert_eq!(compatible_donor_groups(recipient), expected);
    }

    #[test]
    fn test_compatible_donor_groups_for_invalid_label() {
        let err = compatible_donor_groups_for("X+").unwrap_err();
        assert!(matches!(err, CrossmatchError::InvalidBloodGroup(_)));
    }

    #[test]
    fn test_compatible_donor_groups_for_valid_label() {
        let donors = compatible_donor_groups_for("O+").unwrap();
        assert_eq!(donors, &[OPositive, ONegative]);
    }

    #[test]
    fn test_score_zero_iff_incompatible() {
        for donor in BloodGroup::ALL {
            for recipient in BloodGroup::ALL {
                for urgency in [
                    UrgencyLevel::Critical,
                    UrgencyLevel::Urgent,
                    UrgencyLevel::Normal,
                ] {
                    let score = compatibility_score(donor, recipient, urgency);
                    assert_eq!(
                        score == 0,
                        !is_compatible(donor, recipient),
                        "score/compatibility disagree for {donor} -> {recipient}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_urgency_strictly_increases_score() {
        for group in BloodGroup::ALL {
            let critical = compatibility_score(group, group, UrgencyLevel::Critical);
            let normal = compatibility_score(group, group, UrgencyLevel::Normal);
            assert!(critical > normal, "critical must outrank normal for {group}");
        }
    }

    #[test_case(APositive, APositive, UrgencyLevel::Normal, 3; "exact match, normal")]
    #[test_case(ONegative, APositive, UrgencyLevel::Normal, 1; "compatible, normal")]
    #[test_case(ONegative, APositive, UrgencyLevel::Critical, 6; "universal donor bonus, critical")]
    #[test_case(ONegative, ONegative, UrgencyLevel::Critical, 12; "exact match plus bonus, critical")]
    #[test_case(APositive, APositive, UrgencyLevel::Urgent, 6; "exact match, urgent")]
    #[test_case(BPositive, APositive, UrgencyLevel::Critical, 0; "incompatible scores zero")]
    fn test_score_values(
        donor: BloodGroup,
        recipient: BloodGroup,
        urgency: UrgencyLevel,
        expected: u32,
    ) {
        assert_eq!(compatibility_score(donor, recipient, urgency), expected);
    }

    #[test]
    fn test_sort_drops_incompatible_and_orders_descending() {
        let donors = vec![
            donor("1", ONegative),
            donor("2", BPositive),
            donor("3", APositive),
        ];

        let ranked = sort_donors_by_compatibility(donors, APositive, UrgencyLevel::Normal);

        let ids: Vec<&str> = ranked.iter().map(|r| r.donor.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"], "exact match first, B+ dropped");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        // Two O+ donors tie; input order must be preserved.
        let donors = vec![
            donor("first", OPositive),
            donor("second", OPositive),
            donor("exact", APositive),
        ];

        let ranked = sort_donors_by_compatibility(donors, APositive, UrgencyLevel::Urgent);

        let ids: Vec<&str> = ranked.iter().map(|r| r.donor.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "first", "second"]);
    }
}
