use std::io::Read;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::models::{
    CareAccess, ChronicCondition, Education, HeadOfHousehold, HealthProfile, Housing, Overcrowding,
    SocialParticipation, SupportNetwork,
};
use crate::session::{FamilyForm, Session};

/// One spreadsheet row. Blank flag cells read as `false`.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    sector: String,
    apellido: String,
    num_integrantes: u32,
    jefe_nombre: String,
    jefe_edad: u32,
    jefe_ocupacion: String,
    tipo_vivienda: String,
    hacinamiento: Overcrowding,
    red_apoyo: SupportNetwork,
    participacion_social: SocialParticipation,
    acceso_aps: CareAccess,
    #[serde(default)]
    enfermedades_cronicas: String,
    embarazo_adolescente: Option<bool>,
    violencia_intrafamiliar: Option<bool>,
    consumo_drogas: Option<bool>,
    desempleo: Option<bool>,
    discapacidad: Option<bool>,
    adulto_mayor: Option<bool>,
    baja_escolaridad: Option<bool>,
    #[serde(default)]
    observaciones: String,
    fecha_registro: NaiveDate,
    responsable: String,
}

impl From<CsvRow> for FamilyForm {
    fn from(row: CsvRow) -> Self {
        FamilyForm {
            sector: row.sector,
            surname: row.apellido,
            members: row.num_integrantes,
            head: HeadOfHousehold {
                name: row.jefe_nombre,
                age: row.jefe_edad,
                occupation: row.jefe_ocupacion,
            },
            housing: Housing {
                kind: row.tipo_vivienda,
                overcrowding: row.hacinamiento,
                support_network: row.red_apoyo,
                social_participation: row.participacion_social,
                care_access: row.acceso_aps,
            },
            health: HealthProfile {
                chronic_conditions: row
                    .enfermedades_cronicas
                    .split(';')
                    .filter(|label| !label.trim().is_empty())
                    .map(ChronicCondition::from_label)
                    .collect(),
                adolescent_pregnancy: row.embarazo_adolescente.unwrap_or_default(),
                domestic_violence: row.violencia_intrafamiliar.unwrap_or_default(),
                substance_use: row.consumo_drogas.unwrap_or_default(),
                unemployment: row.desempleo.unwrap_or_default(),
                disability: row.discapacidad.unwrap_or_default(),
                elder_present: row.adulto_mayor.unwrap_or_default(),
            },
            education: row
                .baja_escolaridad
                .map(|low_schooling| Education { low_schooling }),
            observations: row.observaciones,
            registered_on: row.fecha_registro,
            registered_by: row.responsable,
        }
    }
}

/// Registers every row as a family. Stops at the first bad row; rows before
/// it stay registered.
pub fn import_families<R: Read>(session: &mut Session, reader: R) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut inserted = 0usize;

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = result.with_context(|| format!("invalid family row at line {line}"))?;
        session
            .register_family(row.into())
            .with_context(|| format!("rejected family at line {line}"))?;
        inserted += 1;
    }

    tracing::info!(inserted, "families imported");
    Ok(inserted)
}

pub fn import_csv(session: &mut Session, csv_path: &Path) -> anyhow::Result<usize> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    import_families(session, file)
}
