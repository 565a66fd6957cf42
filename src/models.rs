use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::risk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overcrowding {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Crítico")]
    Critical,
    #[serde(rename = "Otro")]
    #[serde(other)]
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportNetwork {
    #[serde(rename = "Débil")]
    Weak,
    #[serde(rename = "Regular")]
    Regular,
    #[serde(rename = "Fuerte")]
    Strong,
    #[serde(rename = "Otro")]
    #[serde(other)]
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialParticipation {
    #[serde(rename = "Nula")]
    Null,
    #[serde(rename = "Baja")]
    Low,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Otro")]
    #[serde(other)]
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareAccess {
    #[serde(rename = "Fácil")]
    Easy,
    #[serde(rename = "Regular")]
    Regular,
    #[serde(rename = "Difícil")]
    Difficult,
    #[serde(rename = "Muy difícil")]
    VeryDifficult,
    #[serde(rename = "Otro")]
    #[serde(other)]
    Unlisted,
}

impl CareAccess {
    pub fn is_difficult(self) -> bool {
        matches!(self, CareAccess::Difficult | CareAccess::VeryDifficult)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChronicCondition {
    Diabetes,
    #[serde(rename = "Hipertensión")]
    Hypertension,
    #[serde(rename = "Obesidad")]
    Obesity,
    #[serde(rename = "Enfermedad pulmonar")]
    PulmonaryDisease,
    #[serde(rename = "Enfermedad cardíaca")]
    CardiacDisease,
    #[serde(rename = "Artritis")]
    Arthritis,
    #[serde(rename = "Depresión")]
    Depression,
    #[serde(rename = "Ansiedad")]
    Anxiety,
    #[serde(rename = "Ninguna")]
    NoCondition,
    #[serde(rename = "Otra")]
    #[serde(other)]
    Unlisted,
}

impl ChronicCondition {
    /// Parses a form label. Labels outside the known list map to `Unlisted`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Diabetes" => ChronicCondition::Diabetes,
            "Hipertensión" => ChronicCondition::Hypertension,
            "Obesidad" => ChronicCondition::Obesity,
            "Enfermedad pulmonar" => ChronicCondition::PulmonaryDisease,
            "Enfermedad cardíaca" => ChronicCondition::CardiacDisease,
            "Artritis" => ChronicCondition::Arthritis,
            "Depresión" => ChronicCondition::Depression,
            "Ansiedad" => ChronicCondition::Anxiety,
            "Ninguna" => ChronicCondition::NoCondition,
            _ => ChronicCondition::Unlisted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum RiskLevel {
    #[serde(rename = "Bajo")]
    #[value(name = "bajo")]
    Low,
    #[serde(rename = "Medio")]
    #[value(name = "medio")]
    Medium,
    #[serde(rename = "Alto")]
    #[value(name = "alto")]
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Bajo",
            RiskLevel::Medium => "Medio",
            RiskLevel::High => "Alto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterventionType {
    #[serde(rename = "Preventiva")]
    Preventive,
    #[serde(rename = "Curativa")]
    Curative,
    #[serde(rename = "Promocional")]
    Promotional,
    #[serde(rename = "Rehabilitadora")]
    Rehabilitative,
    #[serde(rename = "Comunitaria")]
    Community,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::Preventive => "Preventiva",
            InterventionType::Curative => "Curativa",
            InterventionType::Promotional => "Promocional",
            InterventionType::Rehabilitative => "Rehabilitadora",
            InterventionType::Community => "Comunitaria",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vulnerability {
    #[serde(rename = "Baja")]
    Low,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Crítica")]
    Critical,
    #[serde(rename = "Otra")]
    #[serde(other)]
    Unlisted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadOfHousehold {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "edad")]
    pub age: u32,
    #[serde(rename = "ocupacion")]
    pub occupation: String,
}

/// Housing descriptors. The last four fields feed the social risk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Housing {
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "hacinamiento")]
    pub overcrowding: Overcrowding,
    #[serde(rename = "red_apoyo")]
    pub support_network: SupportNetwork,
    #[serde(rename = "participacion_social")]
    pub social_participation: SocialParticipation,
    #[serde(rename = "acceso_aps")]
    pub care_access: CareAccess,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(rename = "enfermedades_cronicas", default)]
    pub chronic_conditions: BTreeSet<ChronicCondition>,
    #[serde(rename = "embarazo_adolescente", default)]
    pub adolescent_pregnancy: bool,
    #[serde(rename = "violencia_intrafamiliar", default)]
    pub domestic_violence: bool,
    #[serde(rename = "consumo_drogas", default)]
    pub substance_use: bool,
    #[serde(rename = "desempleo", default)]
    pub unemployment: bool,
    #[serde(rename = "discapacidad", default)]
    pub disability: bool,
    #[serde(rename = "adulto_mayor", default)]
    pub elder_present: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "baja_escolaridad", default)]
    pub low_schooling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "nivel")]
    pub level: RiskLevel,
    #[serde(rename = "puntaje")]
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRisks {
    pub social: RiskAssessment,
    #[serde(rename = "sanitario")]
    pub sanitary: RiskAssessment,
}

impl FamilyRisks {
    pub fn combined_score(&self) -> u32 {
        self.social.score + self.sanitary.score
    }
}

/// One registered household. Risks are computed once at registration and
/// never refreshed.
///
/// Stored records are read field by field so that one damaged family never
/// blocks loading the rest of a snapshot. An unreadable section loads as
/// `None` and community analysis skips the record; its raw JSON is kept in
/// `extra` and written back on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct FamilyRecord {
    pub sector: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "num_integrantes")]
    pub members: u32,
    #[serde(rename = "jefe_hogar")]
    pub head: HeadOfHousehold,
    #[serde(rename = "vivienda", skip_serializing_if = "Option::is_none")]
    pub housing: Option<Housing>,
    #[serde(rename = "salud", skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthProfile>,
    #[serde(rename = "educacion", skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(rename = "riesgos")]
    pub risks: FamilyRisks,
    #[serde(rename = "observaciones")]
    pub observations: String,
    #[serde(rename = "fecha_registro")]
    pub registered_on: NaiveDate,
    #[serde(rename = "responsable")]
    pub registered_by: String,
    /// Unreadable sections and unknown keys, kept verbatim.
    #[serde(flatten)]
    pub extra: JsonFields,
}

pub type JsonFields = serde_json::Map<String, serde_json::Value>;

/// Removes `key` and parses it. A missing or null key is `Ok(None)`; a value
/// that does not parse comes back as `Err` with the raw JSON.
fn take_field<T: DeserializeOwned>(
    fields: &mut JsonFields,
    key: &'static str,
) -> Result<Option<T>, serde_json::Value> {
    match fields.remove(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|err| {
                tracing::warn!(field = key, error = %err, "unreadable family field");
                value
            }),
    }
}

fn take_or_default<T: DeserializeOwned + Default>(fields: &mut JsonFields, key: &'static str) -> T {
    take_field(fields, key).ok().flatten().unwrap_or_default()
}

fn take_section<T: DeserializeOwned>(
    fields: &mut JsonFields,
    extra: &mut JsonFields,
    key: &'static str,
) -> Option<T> {
    take_field(fields, key).unwrap_or_else(|raw| {
        extra.insert(key.to_string(), raw);
        None
    })
}

fn unknown_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl From<serde_json::Value> for FamilyRecord {
    fn from(value: serde_json::Value) -> Self {
        let mut fields = match value {
            serde_json::Value::Object(fields) => fields,
            other => {
                tracing::warn!(entry = %other, "family entry is not an object");
                JsonFields::new()
            }
        };
        let mut extra = JsonFields::new();

        let housing: Option<Housing> = take_section(&mut fields, &mut extra, "vivienda");
        let health: Option<HealthProfile> = take_section(&mut fields, &mut extra, "salud");
        let education = take_section(&mut fields, &mut extra, "educacion");
        let risks = take_field(&mut fields, "riesgos")
            .ok()
            .flatten()
            .unwrap_or_else(|| risk::assess_stored(housing.as_ref(), health.as_ref()));

        let mut record = FamilyRecord {
            sector: take_or_default(&mut fields, "sector"),
            surname: take_or_default(&mut fields, "apellido"),
            members: take_or_default(&mut fields, "num_integrantes"),
            head: take_or_default(&mut fields, "jefe_hogar"),
            housing,
            health,
            education,
            risks,
            observations: take_or_default(&mut fields, "observaciones"),
            registered_on: take_field(&mut fields, "fecha_registro")
                .ok()
                .flatten()
                .unwrap_or_else(unknown_date),
            registered_by: take_or_default(&mut fields, "responsable"),
            extra,
        };
        record.extra.extend(fields);
        record
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "poblacion_total")]
    pub population: u32,
    #[serde(rename = "num_familias")]
    pub family_count: u32,
    #[serde(rename = "tipo_territorio", default)]
    pub territory: String,
    #[serde(rename = "vulnerabilidad")]
    pub vulnerability: Vulnerability,
    #[serde(rename = "servicios", default)]
    pub services: BTreeMap<String, bool>,
    #[serde(rename = "problemas", default)]
    pub problems: Vec<String>,
    #[serde(rename = "caracteristicas", default)]
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(rename = "jefe_equipo")]
    pub leader: String,
    #[serde(rename = "modalidad", default)]
    pub modality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub sector: String,
    #[serde(rename = "composicion", default)]
    pub composition: BTreeMap<String, u32>,
    #[serde(rename = "informacion")]
    pub info: TeamInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "sectores_cobertura", default)]
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWindow {
    #[serde(rename = "fecha_inicio")]
    pub start: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end: NaiveDate,
    #[serde(rename = "frecuencia")]
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionPlanRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: InterventionType,
    #[serde(rename = "objetivo_general")]
    pub objective: String,
    #[serde(rename = "poblacion_objetivo")]
    pub target_population: String,
    #[serde(rename = "actividades_especificas", default)]
    pub activities: Vec<String>,
    #[serde(rename = "responsables", default)]
    pub responsible: String,
    #[serde(rename = "recursos_necesarios", default)]
    pub resources: Vec<String>,
    #[serde(rename = "presupuesto_estimado")]
    pub budget: u64,
    #[serde(rename = "cronograma")]
    pub window: PlanWindow,
    #[serde(rename = "indicadores", default)]
    pub indicators: Vec<String>,
    #[serde(rename = "estado")]
    pub status: String,
}
