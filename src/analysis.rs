use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::models::{
    ChronicCondition, FamilyRecord, InstitutionRecord, Overcrowding, SectorRecord, Vulnerability,
};

/// Share of families (in percent, inclusive) at which a condition becomes a
/// community priority.
pub const PRIORITY_THRESHOLD_PERCENT: usize = 30;

/// Institution types that count as community resources.
pub const RESOURCE_INSTITUTION_TYPES: [&str; 3] = ["Educación", "Deportes", "Cultura"];

/// Conditions tallied across the family collection, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "hipertension")]
    Hypertension,
    #[serde(rename = "obesidad")]
    Obesity,
    #[serde(rename = "hacinamiento")]
    Overcrowding,
    #[serde(rename = "violencia_intrafamiliar")]
    DomesticViolence,
    #[serde(rename = "consumo_drogas")]
    SubstanceUse,
    #[serde(rename = "embarazo_adolescente")]
    AdolescentPregnancy,
    #[serde(rename = "desempleo")]
    Unemployment,
    #[serde(rename = "baja_escolaridad")]
    LowSchooling,
    #[serde(rename = "acceso_salud")]
    CareAccess,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::Diabetes,
        Condition::Hypertension,
        Condition::Obesity,
        Condition::Overcrowding,
        Condition::DomesticViolence,
        Condition::SubstanceUse,
        Condition::AdolescentPregnancy,
        Condition::Unemployment,
        Condition::LowSchooling,
        Condition::CareAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Diabetes => "diabetes",
            Condition::Hypertension => "hipertension",
            Condition::Obesity => "obesidad",
            Condition::Overcrowding => "hacinamiento",
            Condition::DomesticViolence => "violencia_intrafamiliar",
            Condition::SubstanceUse => "consumo_drogas",
            Condition::AdolescentPregnancy => "embarazo_adolescente",
            Condition::Unemployment => "desempleo",
            Condition::LowSchooling => "baja_escolaridad",
            Condition::CareAccess => "acceso_salud",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityCondition {
    #[serde(rename = "problema")]
    pub condition: Condition,
    #[serde(rename = "cantidad")]
    pub count: usize,
    #[serde(rename = "porcentaje")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityDiagnostic {
    #[serde(rename = "problemas_prioritarios")]
    pub priorities: Vec<PriorityCondition>,
    #[serde(rename = "fortalezas_comunitarias")]
    pub strengths: Vec<String>,
    #[serde(rename = "poblaciones_vulnerables")]
    pub vulnerable_sectors: Vec<String>,
    #[serde(rename = "recursos_disponibles")]
    pub resources: Vec<String>,
    /// Families left out of the tally because a section was missing.
    #[serde(rename = "familias_omitidas", default)]
    pub skipped_families: usize,
}

/// Lists the tracked conditions present in one family.
///
/// Fails when the housing or health section is absent, since the tally
/// cannot tell "absent" from "not present" for those conditions.
pub fn family_conditions(family: &FamilyRecord) -> Result<Vec<Condition>, RecordError> {
    let missing = |section| RecordError::MissingSection {
        surname: family.surname.clone(),
        section,
    };
    let health = family.health.as_ref().ok_or_else(|| missing("salud"))?;
    let housing = family.housing.as_ref().ok_or_else(|| missing("vivienda"))?;

    let chronic = &health.chronic_conditions;
    let checks = [
        (
            Condition::Diabetes,
            chronic.contains(&ChronicCondition::Diabetes),
        ),
        (
            Condition::Hypertension,
            chronic.contains(&ChronicCondition::Hypertension),
        ),
        (
            Condition::Obesity,
            chronic.contains(&ChronicCondition::Obesity),
        ),
        (
            Condition::Overcrowding,
            housing.overcrowding == Overcrowding::High,
        ),
        (Condition::DomesticViolence, health.domestic_violence),
        (Condition::SubstanceUse, health.substance_use),
        (Condition::AdolescentPregnancy, health.adolescent_pregnancy),
        (Condition::Unemployment, health.unemployment),
        (
            Condition::LowSchooling,
            family
                .education
                .as_ref()
                .is_some_and(|education| education.low_schooling),
        ),
        (Condition::CareAccess, housing.care_access.is_difficult()),
    ];

    Ok(checks
        .into_iter()
        .filter_map(|(condition, present)| present.then_some(condition))
        .collect())
}

/// Tallies conditions across all families and flags those at or above the
/// priority threshold. Malformed families are logged and skipped but still
/// count toward the denominator.
pub fn analyze_community_data(
    families: &[FamilyRecord],
    sectors: &[SectorRecord],
    institutions: &[InstitutionRecord],
) -> CommunityDiagnostic {
    let mut diagnostic = CommunityDiagnostic::default();
    let mut counts = [0usize; Condition::ALL.len()];

    for family in families {
        match family_conditions(family) {
            Ok(conditions) => {
                for condition in conditions {
                    counts[condition as usize] += 1;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping family in community analysis");
                diagnostic.skipped_families += 1;
            }
        }
    }

    let total = families.len();
    if total > 0 {
        for condition in Condition::ALL {
            let count = counts[condition as usize];
            if count * 100 >= PRIORITY_THRESHOLD_PERCENT * total {
                diagnostic.priorities.push(PriorityCondition {
                    condition,
                    count,
                    percentage: (count as f64 / total as f64) * 100.0,
                });
            }
        }
    }

    for sector in sectors {
        if sector.vulnerability == Vulnerability::High {
            diagnostic.vulnerable_sectors.push(sector.name.clone());
        }
        diagnostic
            .strengths
            .extend(sector.characteristics.iter().cloned());
    }

    for institution in institutions {
        if RESOURCE_INSTITUTION_TYPES.contains(&institution.kind.as_str()) {
            diagnostic.resources.push(institution.name.clone());
        }
    }

    diagnostic
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{
        CareAccess, FamilyRisks, HeadOfHousehold, HealthProfile, Housing,
        RiskAssessment, RiskLevel, SocialParticipation, SupportNetwork,
    };
    use chrono::NaiveDate;
    use std::collections::{BTreeMap, BTreeSet};

    pub(crate) fn sample_family(surname: &str) -> FamilyRecord {
        let low = RiskAssessment {
            level: RiskLevel::Low,
            score: 0,
        };
        FamilyRecord {
            sector: "Sector Norte".to_string(),
            surname: surname.to_string(),
            members: 4,
            head: HeadOfHousehold {
                name: format!("Jefe {surname}"),
                age: 40,
                occupation: "Empleado".to_string(),
            },
            housing: Some(Housing {
                kind: "Casa".to_string(),
                overcrowding: Overcrowding::Low,
                support_network: SupportNetwork::Strong,
                social_participation: SocialParticipation::High,
                care_access: CareAccess::Easy,
            }),
            health: Some(HealthProfile::default()),
            education: None,
            risks: FamilyRisks {
                social: low,
                sanitary: low,
            },
            observations: String::new(),
            registered_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            registered_by: "TENS Ana Martínez".to_string(),
            extra: Default::default(),
        }
    }

    fn with_violence(mut family: FamilyRecord) -> FamilyRecord {
        if let Some(health) = family.health.as_mut() {
            health.domestic_violence = true;
        }
        family
    }

    fn overcrowded(mut family: FamilyRecord) -> FamilyRecord {
        if let Some(housing) = family.housing.as_mut() {
            housing.overcrowding = Overcrowding::High;
        }
        family
    }

    fn sector(name: &str, vulnerability: Vulnerability, characteristics: &[&str]) -> SectorRecord {
        SectorRecord {
            name: name.to_string(),
            population: 1000,
            family_count: 250,
            territory: "Urbano".to_string(),
            vulnerability,
            services: BTreeMap::new(),
            problems: Vec::new(),
            characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn find(diagnostic: &CommunityDiagnostic, condition: Condition) -> Option<&PriorityCondition> {
        diagnostic
            .priorities
            .iter()
            .find(|priority| priority.condition == condition)
    }

    #[test]
    fn empty_collection_yields_empty_diagnostic() {
        let diagnostic = analyze_community_data(&[], &[], &[]);
        assert!(diagnostic.priorities.is_empty());
        assert!(diagnostic.strengths.is_empty());
        assert_eq!(diagnostic.skipped_families, 0);
    }

    #[test]
    fn thirty_percent_is_a_priority() {
        let families: Vec<FamilyRecord> = (0..10)
            .map(|i| {
                let family = sample_family(&format!("F{i}"));
                if i < 3 {
                    with_violence(family)
                } else {
                    family
                }
            })
            .collect();

        let diagnostic = analyze_community_data(&families, &[], &[]);
        let entry = find(&diagnostic, Condition::DomesticViolence).unwrap();
        assert_eq!(entry.count, 3);
        assert!((entry.percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn below_thirty_percent_is_not_a_priority() {
        let families: Vec<FamilyRecord> = (0..7)
            .map(|i| {
                let family = sample_family(&format!("F{i}"));
                if i < 2 {
                    with_violence(family)
                } else {
                    family
                }
            })
            .collect();

        let diagnostic = analyze_community_data(&families, &[], &[]);
        assert!(find(&diagnostic, Condition::DomesticViolence).is_none());
    }

    #[test]
    fn malformed_family_does_not_stop_the_scan() {
        let mut broken = with_violence(sample_family("Roto"));
        broken.health = None;
        let families = vec![
            with_violence(sample_family("A")),
            with_violence(sample_family("B")),
            broken,
            sample_family("C"),
            sample_family("D"),
        ];

        let diagnostic = analyze_community_data(&families, &[], &[]);
        let entry = find(&diagnostic, Condition::DomesticViolence).unwrap();
        assert_eq!(entry.count, 2);
        assert!((entry.percentage - 40.0).abs() < 1e-9);
        assert_eq!(diagnostic.skipped_families, 1);
    }

    #[test]
    fn half_overcrowded_yields_single_entry() {
        let families = vec![
            overcrowded(sample_family("A")),
            overcrowded(sample_family("B")),
            sample_family("C"),
            sample_family("D"),
        ];

        let diagnostic = analyze_community_data(&families, &[], &[]);
        assert_eq!(
            diagnostic.priorities,
            vec![PriorityCondition {
                condition: Condition::Overcrowding,
                count: 2,
                percentage: 50.0,
            }]
        );

        let json = serde_json::to_value(&diagnostic.priorities[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"problema": "hacinamiento", "cantidad": 2, "porcentaje": 50.0})
        );
    }

    #[test]
    fn quarter_overcrowded_is_not_reported() {
        let families = vec![
            overcrowded(sample_family("A")),
            sample_family("B"),
            sample_family("C"),
            sample_family("D"),
        ];

        let diagnostic = analyze_community_data(&families, &[], &[]);
        assert!(find(&diagnostic, Condition::Overcrowding).is_none());
    }

    #[test]
    fn priorities_follow_counter_order() {
        let mut family = overcrowded(with_violence(sample_family("A")));
        if let Some(health) = family.health.as_mut() {
            health.chronic_conditions = BTreeSet::from([ChronicCondition::Diabetes]);
        }
        family.education = Some(crate::models::Education {
            low_schooling: true,
        });

        let diagnostic = analyze_community_data(&[family], &[], &[]);
        let order: Vec<Condition> = diagnostic.priorities.iter().map(|p| p.condition).collect();
        assert_eq!(
            order,
            vec![
                Condition::Diabetes,
                Condition::Overcrowding,
                Condition::DomesticViolence,
                Condition::LowSchooling,
            ]
        );
    }

    #[test]
    fn sectors_and_institutions_feed_context_lists() {
        let sectors = vec![
            sector("Sector Norte", Vulnerability::High, &["Junta de vecinos activa"]),
            sector("Sector Sur", Vulnerability::Critical, &[]),
        ];
        let institutions = vec![
            InstitutionRecord {
                name: "Escuela Básica San José".to_string(),
                kind: "Educación".to_string(),
                sectors: vec!["Sector Norte".to_string()],
            },
            InstitutionRecord {
                name: "CESFAM".to_string(),
                kind: "Salud".to_string(),
                sectors: Vec::new(),
            },
        ];

        let diagnostic = analyze_community_data(&[], &sectors, &institutions);
        assert_eq!(diagnostic.vulnerable_sectors, vec!["Sector Norte".to_string()]);
        assert_eq!(diagnostic.strengths, vec!["Junta de vecinos activa".to_string()]);
        assert_eq!(diagnostic.resources, vec!["Escuela Básica San José".to_string()]);
    }

    #[test]
    fn missing_housing_is_reported_by_name() {
        let mut family = sample_family("Soto");
        family.housing = None;
        assert_eq!(
            family_conditions(&family),
            Err(RecordError::MissingSection {
                surname: "Soto".to_string(),
                section: "vivienda",
            })
        );
    }
}
