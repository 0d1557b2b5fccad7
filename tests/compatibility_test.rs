//! Integration tests for the compatibility table and scoring
//!
//! These pin the transfusion-medicine invariants: O- is the universal
//! donor, AB+ the universal recipient, score is zero exactly for
//! incompatible pairs, and urgency strictly increases rank.

use crossmatch::domain::compatibility::{
    compatibility_score, compatible_donor_groups, compatible_donor_groups_for, is_compatible,
    sort_donors_by_compatibility,
};
use crossmatch::domain::{BloodGroup, CrossmatchError, Donor, UrgencyLevel, UserId};

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
fn test_o_negative_donates_to_every_group() {
    for recipient in BloodGroup::ALL {
        assert!(
            compatible_donor_groups(recipient).contains(&BloodGroup::ONegative),
            "O- must appear in the donor set for {recipient}"
        );
    }
}

#[test]
fn test_ab_positive_receives_from_every_group() {
    let donors = compatible_donor_groups(BloodGroup::AbPositive);
    assert_eq!(donors.len(), 8);
    for group in BloodGroup::ALL {
        assert!(is_compatible(group, BloodGroup::AbPositive));
    }
}

#[test]
fn test_o_negative_receives_only_o_negative() {
    assert_eq!(
        compatible_donor_groups(BloodGroup::ONegative),
        &[BloodGroup::ONegative]
    );
}

#[test]
fn test_score_zero_exactly_when_incompatible() {
    for donor in BloodGroup::ALL {
        for recipient in BloodGroup::ALL {
            let score = compatibility_score(donor, recipient, UrgencyLevel::Urgent);
            assert_eq!(score == 0, !is_compatible(donor, recipient));
        }
    }
}

#[test]
fn test_urgency_strictly_increases_score_for_compatible_pairs() {
    for donor in BloodGroup::ALL {
        for recipient in BloodGroup::ALL {
            if !is_compatible(donor, recipient) {
                continue;
            }
            let critical = compatibility_score(donor, recipient, UrgencyLevel::Critical);
            let urgent = compatibility_score(donor, recipient, UrgencyLevel::Urgent);
            let normal = compatibility_score(donor, recipient, UrgencyLevel::Normal);
            assert!(critical > urgent && urgent > normal);
        }
    }
}

#[test]
fn test_exact_match_outranks_merely_compatible() {
    let exact = compatibility_score(BloodGroup::APositive, BloodGroup::APositive, UrgencyLevel::Normal);
    let compatible =
        compatibility_score(BloodGroup::OPositive, BloodGroup::APositive, UrgencyLevel::Normal);
    assert!(exact > compatible);
}

#[test]
fn test_universal_donor_bonus_applies_only_when_critical() {
    let critical =
        compatibility_score(BloodGroup::ONegative, BloodGroup::APositive, UrgencyLevel::Critical);
    let urgent =
        compatibility_score(BloodGroup::ONegative, BloodGroup::APositive, UrgencyLevel::Urgent);
    // (1 + 1) * 3 = 6 with the bonus, 1 * 2 = 2 without.
    assert_eq!(critical, 6);
    assert_eq!(urgent, 2);
}

#[test]
fn test_unknown_label_is_invalid_blood_group() {
    let err = compatible_donor_groups_for("X+").unwrap_err();
    assert!(matches!(err, CrossmatchError::InvalidBloodGroup(_)));
}

#[test]
fn test_ranking_filters_and_orders() {
    let ranked = sort_donors_by_compatibility(
        vec![
            donor("o-neg", BloodGroup::ONegative),
            donor("b-pos", BloodGroup::BPositive),
            donor("a-pos", BloodGroup::APositive),
        ],
        BloodGroup::APositive,
        UrgencyLevel::Critical,
    );

    let ids: Vec<&str> = ranked.iter().map(|r| r.donor.id.as_str()).collect();
    // Exact match (3*3=9) ahead of universal-donor-with-bonus (2*3=6); B+ dropped.
    assert_eq!(ids, vec!["a-pos", "o-neg"]);
}
