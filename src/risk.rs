use crate::models::{
    CareAccess, ChronicCondition, FamilyRisks, HealthProfile, Housing, Overcrowding,
    RiskAssessment, RiskLevel, SocialParticipation, SupportNetwork,
};

pub const SOCIAL_HIGH_THRESHOLD: u32 = 10;
pub const SOCIAL_MEDIUM_THRESHOLD: u32 = 6;
pub const SANITARY_HIGH_THRESHOLD: u32 = 8;
pub const SANITARY_MEDIUM_THRESHOLD: u32 = 4;

// Categories without a weight (Crítico overcrowding, Media participation,
// Muy difícil access, anything unlisted) contribute zero.
pub fn overcrowding_weight(value: Overcrowding) -> u32 {
    match value {
        Overcrowding::High => 3,
        Overcrowding::Medium => 2,
        Overcrowding::Low => 1,
        Overcrowding::Critical | Overcrowding::Unlisted => 0,
    }
}

pub fn support_network_weight(value: SupportNetwork) -> u32 {
    match value {
        SupportNetwork::Weak => 3,
        SupportNetwork::Regular => 2,
        SupportNetwork::Strong => 1,
        SupportNetwork::Unlisted => 0,
    }
}

pub fn participation_weight(value: SocialParticipation) -> u32 {
    match value {
        SocialParticipation::Null => 3,
        SocialParticipation::Low => 2,
        SocialParticipation::High => 1,
        SocialParticipation::Medium | SocialParticipation::Unlisted => 0,
    }
}

pub fn care_access_weight(value: CareAccess) -> u32 {
    match value {
        CareAccess::Difficult => 3,
        CareAccess::Regular => 2,
        CareAccess::Easy => 1,
        CareAccess::VeryDifficult | CareAccess::Unlisted => 0,
    }
}

pub fn chronic_condition_weight(condition: ChronicCondition) -> u32 {
    match condition {
        ChronicCondition::CardiacDisease => 3,
        ChronicCondition::Diabetes
        | ChronicCondition::Hypertension
        | ChronicCondition::PulmonaryDisease => 2,
        ChronicCondition::Obesity => 1,
        _ => 0,
    }
}

pub fn classify(score: u32, high: u32, medium: u32) -> RiskLevel {
    if score >= high {
        RiskLevel::High
    } else if score >= medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn social_risk(housing: &Housing) -> RiskAssessment {
    let score = overcrowding_weight(housing.overcrowding)
        + support_network_weight(housing.support_network)
        + participation_weight(housing.social_participation)
        + care_access_weight(housing.care_access);

    RiskAssessment {
        level: classify(score, SOCIAL_HIGH_THRESHOLD, SOCIAL_MEDIUM_THRESHOLD),
        score,
    }
}

pub fn sanitary_risk(health: &HealthProfile) -> RiskAssessment {
    let mut score: u32 = health
        .chronic_conditions
        .iter()
        .map(|condition| chronic_condition_weight(*condition))
        .sum();

    if health.adolescent_pregnancy {
        score += 2;
    }
    if health.domestic_violence {
        score += 3;
    }
    if health.substance_use {
        score += 3;
    }
    if health.unemployment {
        score += 1;
    }

    RiskAssessment {
        level: classify(score, SANITARY_HIGH_THRESHOLD, SANITARY_MEDIUM_THRESHOLD),
        score,
    }
}

const UNSCORED: RiskAssessment = RiskAssessment {
    level: RiskLevel::Low,
    score: 0,
};

/// Rebuilds the risks of a stored family that lacks them. A missing section
/// scores zero.
pub fn assess_stored(housing: Option<&Housing>, health: Option<&HealthProfile>) -> FamilyRisks {
    FamilyRisks {
        social: housing.map_or(UNSCORED, social_risk),
        sanitary: health.map_or(UNSCORED, sanitary_risk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn housing(
        overcrowding: Overcrowding,
        support_network: SupportNetwork,
        social_participation: SocialParticipation,
        care_access: CareAccess,
    ) -> Housing {
        Housing {
            kind: "Casa".to_string(),
            overcrowding,
            support_network,
            social_participation,
            care_access,
        }
    }

    #[test]
    fn worst_housing_scores_high() {
        let risk = social_risk(&housing(
            Overcrowding::High,
            SupportNetwork::Weak,
            SocialParticipation::Null,
            CareAccess::Difficult,
        ));
        assert_eq!(risk.score, 12);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn best_housing_scores_low() {
        let risk = social_risk(&housing(
            Overcrowding::Low,
            SupportNetwork::Strong,
            SocialParticipation::High,
            CareAccess::Easy,
        ));
        assert_eq!(risk.score, 4);
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn unscored_categories_add_nothing() {
        let risk = social_risk(&housing(
            Overcrowding::Critical,
            SupportNetwork::Regular,
            SocialParticipation::Medium,
            CareAccess::VeryDifficult,
        ));
        assert_eq!(risk.score, 2);
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn social_thresholds_are_inclusive() {
        assert_eq!(classify(10, 10, 6), RiskLevel::High);
        assert_eq!(classify(9, 10, 6), RiskLevel::Medium);
        assert_eq!(classify(6, 10, 6), RiskLevel::Medium);
        assert_eq!(classify(5, 10, 6), RiskLevel::Low);
    }

    #[test]
    fn sanitary_score_sums_conditions_and_flags() {
        let health = HealthProfile {
            chronic_conditions: BTreeSet::from([
                ChronicCondition::Diabetes,
                ChronicCondition::Hypertension,
                ChronicCondition::Arthritis,
            ]),
            domestic_violence: true,
            ..HealthProfile::default()
        };

        let risk = sanitary_risk(&health);
        assert_eq!(risk.score, 7);
        assert_eq!(risk.level, RiskLevel::Medium);
    }

    #[test]
    fn sanitary_flags_alone_can_reach_high() {
        let health = HealthProfile {
            adolescent_pregnancy: true,
            domestic_violence: true,
            substance_use: true,
            unemployment: true,
            ..HealthProfile::default()
        };

        let risk = sanitary_risk(&health);
        assert_eq!(risk.score, 9);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn stored_family_without_health_scores_social_only() {
        let worst = housing(
            Overcrowding::High,
            SupportNetwork::Weak,
            SocialParticipation::Null,
            CareAccess::Difficult,
        );
        let risks = assess_stored(Some(&worst), None);
        assert_eq!(risks.social.score, 12);
        assert_eq!(risks.sanitary, UNSCORED);
    }

    #[test]
    fn empty_health_profile_is_low() {
        let risk = sanitary_risk(&HealthProfile::default());
        assert_eq!(risk.score, 0);
        assert_eq!(risk.level, RiskLevel::Low);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn overcrowding_strategy() -> impl Strategy<Value = Overcrowding> {
        prop_oneof![
            Just(Overcrowding::Low),
            Just(Overcrowding::Medium),
            Just(Overcrowding::High),
            Just(Overcrowding::Critical),
            Just(Overcrowding::Unlisted),
        ]
    }

    fn support_network_strategy() -> impl Strategy<Value = SupportNetwork> {
        prop_oneof![
            Just(SupportNetwork::Weak),
            Just(SupportNetwork::Regular),
            Just(SupportNetwork::Strong),
            Just(SupportNetwork::Unlisted),
        ]
    }

    fn participation_strategy() -> impl Strategy<Value = SocialParticipation> {
        prop_oneof![
            Just(SocialParticipation::Null),
            Just(SocialParticipation::Low),
            Just(SocialParticipation::Medium),
            Just(SocialParticipation::High),
            Just(SocialParticipation::Unlisted),
        ]
    }

    fn care_access_strategy() -> impl Strategy<Value = CareAccess> {
        prop_oneof![
            Just(CareAccess::Easy),
            Just(CareAccess::Regular),
            Just(CareAccess::Difficult),
            Just(CareAccess::VeryDifficult),
            Just(CareAccess::Unlisted),
        ]
    }

    fn chronic_condition_strategy() -> impl Strategy<Value = ChronicCondition> {
        prop_oneof![
            Just(ChronicCondition::Diabetes),
            Just(ChronicCondition::Hypertension),
            Just(ChronicCondition::Obesity),
            Just(ChronicCondition::PulmonaryDisease),
            Just(ChronicCondition::CardiacDisease),
            Just(ChronicCondition::Arthritis),
            Just(ChronicCondition::Depression),
            Just(ChronicCondition::NoCondition),
            Just(ChronicCondition::Unlisted),
        ]
    }

    proptest! {
        /// Social score stays within 0..=12 and its level matches the thresholds
        #[test]
        fn social_level_matches_score(
            overcrowding in overcrowding_strategy(),
            support_network in support_network_strategy(),
            social_participation in participation_strategy(),
            care_access in care_access_strategy(),
        ) {
            let risk = social_risk(&Housing {
                kind: "Casa".to_string(),
                overcrowding,
                support_network,
                social_participation,
                care_access,
            });

            prop_assert!(risk.score <= 12);
            let expected = if risk.score >= 10 {
                RiskLevel::High
            } else if risk.score >= 6 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };
            prop_assert_eq!(risk.level, expected);
        }

        /// Sanitary level matches the thresholds for any condition set and flags
        #[test]
        fn sanitary_level_matches_score(
            conditions in proptest::collection::btree_set(chronic_condition_strategy(), 0..6),
            flags in proptest::array::uniform4(any::<bool>()),
        ) {
            let risk = sanitary_risk(&HealthProfile {
                chronic_conditions: conditions,
                adolescent_pregnancy: flags[0],
                domestic_violence: flags[1],
                substance_use: flags[2],
                unemployment: flags[3],
                ..HealthProfile::default()
            });

            let expected = if risk.score >= 8 {
                RiskLevel::High
            } else if risk.score >= 4 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };
            prop_assert_eq!(risk.level, expected);
        }
    }
}
