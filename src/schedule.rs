use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::InterventionTemplate;
use crate::models::InterventionType;

pub const BUDGET_MIN: u64 = 500_000;
pub const BUDGET_MAX: u64 = 2_000_000;

pub const FIRST_START_OFFSET_DAYS: i64 = 30;
pub const START_SPACING_DAYS: i64 = 60;
pub const DAYS_PER_MONTH: i64 = 30;

pub const RESPONSIBLE: &str = "Equipo de Salud Familiar";
pub const TEAM: &str = "Médico, TENS, Matrona, Psicólogo";

/// Supplies the estimated budget for each scheduled intervention.
pub trait BudgetEstimator {
    fn estimate(&mut self, template: &InterventionTemplate) -> u64;
}

impl<F> BudgetEstimator for F
where
    F: FnMut(&InterventionTemplate) -> u64,
{
    fn estimate(&mut self, template: &InterventionTemplate) -> u64 {
        self(template)
    }
}

/// Uniform draw from `BUDGET_MIN..=BUDGET_MAX`.
pub struct RandomBudget {
    rng: StdRng,
}

impl RandomBudget {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetEstimator for RandomBudget {
    fn estimate(&mut self, _template: &InterventionTemplate) -> u64 {
        self.rng.gen_range(BUDGET_MIN..=BUDGET_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulePriority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

impl SchedulePriority {
    pub fn for_type(kind: InterventionType) -> Self {
        match kind {
            InterventionType::Preventive => SchedulePriority::High,
            InterventionType::Curative | InterventionType::Promotional => SchedulePriority::Medium,
            InterventionType::Rehabilitative | InterventionType::Community => SchedulePriority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulePriority::High => "Alta",
            SchedulePriority::Medium => "Media",
            SchedulePriority::Low => "Baja",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledIntervention {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: InterventionType,
    #[serde(rename = "objetivo")]
    pub objective: String,
    #[serde(rename = "poblacion")]
    pub population: String,
    #[serde(rename = "prioridad")]
    pub priority: SchedulePriority,
    #[serde(rename = "fecha_inicio")]
    pub start: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end: NaiveDate,
    #[serde(rename = "frecuencia")]
    pub frequency: String,
    #[serde(rename = "responsable")]
    pub responsible: String,
    #[serde(rename = "equipo")]
    pub team: String,
    #[serde(rename = "recursos")]
    pub resources: Vec<String>,
    #[serde(rename = "presupuesto")]
    pub budget: u64,
    #[serde(rename = "indicadores")]
    pub indicators: Vec<String>,
    #[serde(rename = "actividades")]
    pub activities: Vec<String>,
}

pub fn type_rank(kind: InterventionType) -> u8 {
    match kind {
        InterventionType::Preventive => 1,
        InterventionType::Curative => 2,
        InterventionType::Promotional => 3,
        InterventionType::Rehabilitative => 4,
        InterventionType::Community => 5,
    }
}

pub fn start_date(today: NaiveDate, index: usize) -> NaiveDate {
    today + Duration::days(FIRST_START_OFFSET_DAYS + index as i64 * START_SPACING_DAYS)
}

/// Orders suggestions by type rank (stable, so catalog order breaks ties)
/// and staggers their starts 60 days apart from `today + 30`. Start dates do
/// not depend on the duration of earlier items.
pub fn generate_schedule(
    suggestions: &[InterventionTemplate],
    today: NaiveDate,
    budget: &mut impl BudgetEstimator,
) -> Vec<ScheduledIntervention> {
    let mut ordered: Vec<&InterventionTemplate> = suggestions.iter().collect();
    ordered.sort_by_key(|template| type_rank(template.kind));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, template)| {
            let start = start_date(today, index);
            let end = start + Duration::days(template.duration_months as i64 * DAYS_PER_MONTH);
            ScheduledIntervention {
                name: template.name.clone(),
                kind: template.kind,
                objective: template.objective.clone(),
                population: template.population.clone(),
                priority: SchedulePriority::for_type(template.kind),
                start,
                end,
                frequency: template.frequency.clone(),
                responsible: RESPONSIBLE.to_string(),
                team: TEAM.to_string(),
                resources: template.resources.clone(),
                budget: budget.estimate(template),
                indicators: template.indicators.clone(),
                activities: template.activities.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Condition;
    use crate::catalog::{community_strengthening_program, templates_for};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn fixed(_: &InterventionTemplate) -> u64 {
        1_000_000
    }

    fn mixed_suggestions() -> Vec<InterventionTemplate> {
        let mut suggestions = templates_for(Condition::Overcrowding);
        suggestions.extend(templates_for(Condition::Diabetes));
        suggestions.push(community_strengthening_program());
        suggestions.extend(templates_for(Condition::DomesticViolence));
        suggestions
    }

    #[test]
    fn starts_are_staggered_from_fixed_baseline() {
        let schedule = generate_schedule(&mixed_suggestions(), today(), &mut fixed);
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[0].start, today() + Duration::days(30));
        for pair in schedule.windows(2) {
            assert_eq!(pair[1].start - pair[0].start, Duration::days(60));
        }
    }

    #[test]
    fn end_date_tracks_duration() {
        let schedule = generate_schedule(&templates_for(Condition::Hypertension), today(), &mut fixed);
        assert_eq!(schedule[0].end - schedule[0].start, Duration::days(360));
    }

    #[test]
    fn preventive_first_and_ties_keep_catalog_order() {
        let schedule = generate_schedule(&mixed_suggestions(), today(), &mut fixed);
        let names: Vec<&str> = schedule.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Programa de Educación Diabetológica",
                "Programa de Prevención de Violencia Intrafamiliar",
                "Talleres de Cocina Saludable",
                "Programa de Fortalecimiento Comunitario",
                "Programa de Mejora Habitacional",
            ]
        );
        assert_eq!(schedule[0].priority, SchedulePriority::High);
        assert_eq!(schedule[2].priority, SchedulePriority::Medium);
        assert_eq!(schedule[4].priority, SchedulePriority::Low);
    }

    #[test]
    fn every_item_carries_team_and_budget() {
        let schedule = generate_schedule(&mixed_suggestions(), today(), &mut fixed);
        for item in &schedule {
            assert_eq!(item.responsible, RESPONSIBLE);
            assert_eq!(item.team, TEAM);
            assert_eq!(item.budget, 1_000_000);
            assert!(!item.activities.is_empty());
        }
    }

    #[test]
    fn random_budget_stays_in_range() {
        let mut budget = RandomBudget::seeded(7);
        let schedule = generate_schedule(&mixed_suggestions(), today(), &mut budget);
        for item in &schedule {
            assert!((BUDGET_MIN..=BUDGET_MAX).contains(&item.budget));
        }
    }

    #[test]
    fn seeded_budget_is_reproducible() {
        let first = generate_schedule(&mixed_suggestions(), today(), &mut RandomBudget::seeded(42));
        let second = generate_schedule(&mixed_suggestions(), today(), &mut RandomBudget::seeded(42));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_suggestions_give_empty_schedule() {
        assert!(generate_schedule(&[], today(), &mut fixed).is_empty());
    }

    #[test]
    fn dates_serialize_as_iso_days() {
        let schedule = generate_schedule(&templates_for(Condition::Obesity), today(), &mut fixed);
        let json = serde_json::to_value(&schedule[0]).unwrap();
        assert_eq!(json["fecha_inicio"], "2026-03-31");
        assert_eq!(json["prioridad"], "Media");
    }
}
