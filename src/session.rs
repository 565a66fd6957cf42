use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, CommunityDiagnostic};
use crate::error::SessionError;
use crate::models::{
    Education, FamilyRecord, FamilyRisks, HeadOfHousehold, HealthProfile, Housing,
    InstitutionRecord, InterventionPlanRecord, JsonFields, RiskLevel, SectorRecord, TeamRecord,
};
use crate::risk;

/// All collections for one user's working session. Every collection is
/// append-only; `reset` is the only way to remove records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "sectores", default)]
    pub sectors: Vec<SectorRecord>,
    #[serde(rename = "equipos", default)]
    pub teams: Vec<TeamRecord>,
    #[serde(rename = "familias", default)]
    pub families: Vec<FamilyRecord>,
    #[serde(rename = "instituciones", default)]
    pub institutions: Vec<InstitutionRecord>,
    #[serde(rename = "plan_intervencion", default)]
    pub plan: Vec<InterventionPlanRecord>,
}

/// Registration input for one family, before risks are attached.
#[derive(Debug, Clone)]
pub struct FamilyForm {
    pub sector: String,
    pub surname: String,
    pub members: u32,
    pub head: HeadOfHousehold,
    pub housing: Housing,
    pub health: HealthProfile,
    pub education: Option<Education>,
    pub observations: String,
    pub registered_on: NaiveDate,
    pub registered_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct FamilyFilter {
    pub sector: Option<String>,
    /// Matches when either the social or the sanitary level equals it.
    pub level: Option<RiskLevel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorCoverage {
    pub sector: String,
    pub registered: usize,
    pub declared: u32,
    pub coverage: f64,
    pub team_leader: Option<String>,
}

fn require(value: &str, field: &'static str) -> Result<(), SessionError> {
    if value.trim().is_empty() {
        return Err(SessionError::MissingField(field));
    }
    Ok(())
}

impl Session {
    /// Validates the form, attaches both risk assessments and appends the
    /// family. Returns the computed risks.
    pub fn register_family(&mut self, form: FamilyForm) -> Result<FamilyRisks, SessionError> {
        require(&form.surname, "apellido")?;
        require(&form.head.name, "jefe_hogar.nombre")?;
        require(&form.registered_by, "responsable")?;
        if form.members == 0 {
            return Err(SessionError::InvalidField {
                field: "num_integrantes",
                reason: "must be at least 1".to_string(),
            });
        }

        let risks = FamilyRisks {
            social: risk::social_risk(&form.housing),
            sanitary: risk::sanitary_risk(&form.health),
        };

        tracing::info!(
            surname = %form.surname,
            sector = %form.sector,
            social = risks.social.score,
            sanitary = risks.sanitary.score,
            "family registered"
        );

        self.families.push(FamilyRecord {
            sector: form.sector,
            surname: form.surname,
            members: form.members,
            head: form.head,
            housing: Some(form.housing),
            health: Some(form.health),
            education: form.education,
            risks,
            observations: form.observations,
            registered_on: form.registered_on,
            registered_by: form.registered_by,
            extra: JsonFields::new(),
        });

        Ok(risks)
    }

    pub fn add_sector(&mut self, sector: SectorRecord) {
        self.sectors.push(sector);
    }

    pub fn add_team(&mut self, team: TeamRecord) {
        self.teams.push(team);
    }

    pub fn add_institution(&mut self, institution: InstitutionRecord) {
        self.institutions.push(institution);
    }

    pub fn add_plan_activity(&mut self, activity: InterventionPlanRecord) {
        self.plan.push(activity);
    }

    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
            && self.teams.is_empty()
            && self.families.is_empty()
            && self.institutions.is_empty()
            && self.plan.is_empty()
    }

    pub fn diagnose(&self) -> CommunityDiagnostic {
        analysis::analyze_community_data(&self.families, &self.sectors, &self.institutions)
    }

    /// Families matching the filter, highest combined risk score first.
    pub fn families_by_risk(&self, filter: &FamilyFilter) -> Vec<&FamilyRecord> {
        let mut families: Vec<&FamilyRecord> = self
            .families
            .iter()
            .filter(|family| {
                filter
                    .sector
                    .as_deref()
                    .map_or(true, |sector| family.sector == sector)
            })
            .filter(|family| {
                filter.level.map_or(true, |level| {
                    family.risks.social.level == level || family.risks.sanitary.level == level
                })
            })
            .collect();

        families.sort_by(|a, b| b.risks.combined_score().cmp(&a.risks.combined_score()));
        families
    }

    pub fn sector_coverage(&self) -> Vec<SectorCoverage> {
        self.sectors
            .iter()
            .map(|sector| {
                let registered = self
                    .families
                    .iter()
                    .filter(|family| family.sector == sector.name)
                    .count();
                let coverage = if sector.family_count == 0 {
                    0.0
                } else {
                    registered as f64 / sector.family_count as f64 * 100.0
                };
                let team_leader = self
                    .teams
                    .iter()
                    .find(|team| team.sector == sector.name)
                    .map(|team| team.info.leader.clone());

                SectorCoverage {
                    sector: sector.name.clone(),
                    registered,
                    declared: sector.family_count,
                    coverage,
                    team_leader,
                }
            })
            .collect()
    }
}
