use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::CommunityDiagnostic;
use crate::catalog::{self, InterventionTemplate};
use crate::models::{InterventionPlanRecord, PlanWindow};
use crate::schedule::{self, BudgetEstimator, ScheduledIntervention};
use crate::session::Session;

pub const ADOPTED_STATUS: &str = "Planificada";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(rename = "diagnostico")]
    pub diagnostic: CommunityDiagnostic,
    #[serde(rename = "sugerencias")]
    pub suggestions: Vec<InterventionTemplate>,
    #[serde(rename = "cronograma")]
    pub schedule: Vec<ScheduledIntervention>,
}

pub fn personalized_recommendations(
    session: &Session,
    today: NaiveDate,
    budget: &mut impl BudgetEstimator,
) -> Recommendations {
    let diagnostic = session.diagnose();
    let suggestions = catalog::suggest_interventions(&diagnostic);
    let schedule = schedule::generate_schedule(&suggestions, today, budget);

    Recommendations {
        diagnostic,
        suggestions,
        schedule,
    }
}

impl From<&ScheduledIntervention> for InterventionPlanRecord {
    fn from(item: &ScheduledIntervention) -> Self {
        InterventionPlanRecord {
            name: item.name.clone(),
            kind: item.kind,
            objective: item.objective.clone(),
            target_population: item.population.clone(),
            activities: item.activities.clone(),
            responsible: item.responsible.clone(),
            resources: item.resources.clone(),
            budget: item.budget,
            window: PlanWindow {
                start: item.start,
                end: item.end,
                frequency: item.frequency.clone(),
            },
            indicators: item.indicators.clone(),
            status: ADOPTED_STATUS.to_string(),
        }
    }
}

/// Appends every scheduled item to the session's intervention plan.
pub fn adopt_schedule(session: &mut Session, schedule: &[ScheduledIntervention]) -> usize {
    for item in schedule {
        session.add_plan_activity(item.into());
    }
    tracing::info!(adopted = schedule.len(), "schedule adopted into plan");
    schedule.len()
}
