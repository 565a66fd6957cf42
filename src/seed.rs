use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use chrono::NaiveDate;

use crate::models::{
    CareAccess, ChronicCondition, Education, HeadOfHousehold, HealthProfile, Housing, InstitutionRecord,
    Overcrowding, SectorRecord, SocialParticipation, SupportNetwork, TeamInfo, TeamRecord,
    Vulnerability,
};
use crate::session::{FamilyForm, Session};

fn services(available: &[&str]) -> BTreeMap<String, bool> {
    [
        "agua_potable",
        "electricidad",
        "alcantarillado",
        "transporte",
        "escuela",
        "cesfam",
        "organizaciones",
        "areas_verdes",
    ]
    .into_iter()
    .map(|service| (service.to_string(), available.contains(&service)))
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).context("invalid date")
}

/// Loads the classroom demonstration data into the session.
pub fn seed(session: &mut Session) -> anyhow::Result<()> {
    let sectors = vec![
        (
            "Sector Norte",
            1200,
            300,
            "Urbano",
            Vulnerability::High,
            services(&[
                "agua_potable",
                "electricidad",
                "alcantarillado",
                "transporte",
                "escuela",
                "organizaciones",
            ]),
            &["Hacinamiento", "Inseguridad", "Desempleo", "Obesidad"][..],
            &["Junta de vecinos activa", "Club deportivo"][..],
        ),
        (
            "Sector Centro",
            800,
            200,
            "Urbano",
            Vulnerability::Medium,
            services(&[
                "agua_potable",
                "electricidad",
                "alcantarillado",
                "transporte",
                "escuela",
                "cesfam",
                "organizaciones",
                "areas_verdes",
            ]),
            &["Diabetes", "Hipertensión", "Adultos mayores"][..],
            &["Centro de madres"][..],
        ),
        (
            "Sector Sur",
            1500,
            375,
            "Rural",
            Vulnerability::Critical,
            services(&["electricidad", "escuela", "areas_verdes"]),
            &[
                "Falta de servicios básicos",
                "Embarazo adolescente",
                "Violencia intrafamiliar",
            ][..],
            &[][..],
        ),
    ];

    for (name, population, family_count, territory, vulnerability, services, problems, traits) in
        sectors
    {
        session.add_sector(SectorRecord {
            name: name.to_string(),
            population,
            family_count,
            territory: territory.to_string(),
            vulnerability,
            services,
            problems: strings(problems),
            characteristics: strings(traits),
        });
    }

    let teams = vec![
        ("Sector Norte", [1, 2, 4, 1, 1], "Dra. María González", "Presencial"),
        ("Sector Centro", [1, 1, 2, 1, 0], "Enf. Carlos Rodríguez", "Híbrido"),
        ("Sector Sur", [1, 2, 3, 1, 1], "Dr. Juan Pérez", "Presencial"),
    ];

    for (sector, counts, leader, modality) in teams {
        let composition = ["medicos", "enfermeras", "tens", "matronas", "psicologos"]
            .into_iter()
            .map(str::to_string)
            .zip(counts)
            .collect();
        session.add_team(TeamRecord {
            sector: sector.to_string(),
            composition,
            info: TeamInfo {
                leader: leader.to_string(),
                modality: modality.to_string(),
            },
        });
    }

    let families = vec![
        FamilyForm {
            sector: "Sector Norte".to_string(),
            surname: "González".to_string(),
            members: 5,
            head: HeadOfHousehold {
                name: "Roberto González".to_string(),
                age: 45,
                occupation: "Empleado".to_string(),
            },
            housing: Housing {
                kind: "Casa".to_string(),
                overcrowding: Overcrowding::High,
                support_network: SupportNetwork::Weak,
                social_participation: SocialParticipation::Low,
                care_access: CareAccess::Difficult,
            },
            health: HealthProfile {
                chronic_conditions: BTreeSet::from([
                    ChronicCondition::Diabetes,
                    ChronicCondition::Hypertension,
                ]),
                domestic_violence: true,
                ..HealthProfile::default()
            },
            education: None,
            observations: "Familia en situación de vulnerabilidad, requiere intervención prioritaria"
                .to_string(),
            registered_on: date(2024, 1, 15)?,
            registered_by: "TENS Ana Martínez".to_string(),
        },
        FamilyForm {
            sector: "Sector Norte".to_string(),
            surname: "Silva".to_string(),
            members: 3,
            head: HeadOfHousehold {
                name: "Carmen Silva".to_string(),
                age: 38,
                occupation: "Dueña de casa".to_string(),
            },
            housing: Housing {
                kind: "Departamento".to_string(),
                overcrowding: Overcrowding::Medium,
                support_network: SupportNetwork::Regular,
                social_participation: SocialParticipation::High,
                care_access: CareAccess::Easy,
            },
            health: HealthProfile {
                chronic_conditions: BTreeSet::from([ChronicCondition::Obesity]),
                ..HealthProfile::default()
            },
            education: None,
            observations: "Familia estable, requiere educación en hábitos saludables".to_string(),
            registered_on: date(2024, 1, 15)?,
            registered_by: "TENS Ana Martínez".to_string(),
        },
        FamilyForm {
            sector: "Sector Centro".to_string(),
            surname: "Rodríguez".to_string(),
            members: 4,
            head: HeadOfHousehold {
                name: "Luis Rodríguez".to_string(),
                age: 52,
                occupation: "Jubilado".to_string(),
            },
            housing: Housing {
                kind: "Casa".to_string(),
                overcrowding: Overcrowding::Low,
                support_network: SupportNetwork::Strong,
                social_participation: SocialParticipation::High,
                care_access: CareAccess::Easy,
            },
            health: HealthProfile {
                chronic_conditions: BTreeSet::from([
                    ChronicCondition::Hypertension,
                    ChronicCondition::Arthritis,
                ]),
                elder_present: true,
                ..HealthProfile::default()
            },
            education: None,
            observations: "Adulto mayor con buen apoyo familiar".to_string(),
            registered_on: date(2024, 1, 16)?,
            registered_by: "Enf. Carlos Rodríguez".to_string(),
        },
        FamilyForm {
            sector: "Sector Sur".to_string(),
            surname: "Mendoza".to_string(),
            members: 6,
            head: HeadOfHousehold {
                name: "Patricia Mendoza".to_string(),
                age: 35,
                occupation: "Desempleado".to_string(),
            },
            housing: Housing {
                kind: "Mediagua".to_string(),
                overcrowding: Overcrowding::High,
                support_network: SupportNetwork::Weak,
                social_participation: SocialParticipation::Null,
                care_access: CareAccess::Difficult,
            },
            health: HealthProfile {
                adolescent_pregnancy: true,
                domestic_violence: true,
                substance_use: true,
                unemployment: true,
                ..HealthProfile::default()
            },
            education: Some(Education {
                low_schooling: true,
            }),
            observations: "Familia en situación crítica, requiere intervención multisectorial"
                .to_string(),
            registered_on: date(2024, 1, 17)?,
            registered_by: "TENS Pedro López".to_string(),
        },
    ];

    for form in families {
        session.register_family(form)?;
    }

    let institutions = vec![
        (
            "Escuela Básica San José",
            "Educación",
            &["Sector Norte", "Sector Centro"][..],
        ),
        (
            "Municipalidad de San Pedro",
            "Municipalidad",
            &["Sector Norte", "Sector Centro", "Sector Sur"][..],
        ),
        (
            "Centro de Salud Familiar (CESFAM)",
            "Salud",
            &["Sector Centro"][..],
        ),
    ];

    for (name, kind, sectors) in institutions {
        session.add_institution(InstitutionRecord {
            name: name.to_string(),
            kind: kind.to_string(),
            sectors: strings(sectors),
        });
    }

    tracing::info!(
        sectors = session.sectors.len(),
        families = session.families.len(),
        institutions = session.institutions.len(),
        "seed data loaded"
    );
    Ok(())
}
