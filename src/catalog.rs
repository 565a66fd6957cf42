use serde::{Deserialize, Serialize};

use crate::analysis::{CommunityDiagnostic, Condition};
use crate::models::InterventionType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionTemplate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: InterventionType,
    #[serde(rename = "objetivo")]
    pub objective: String,
    #[serde(rename = "poblacion")]
    pub population: String,
    #[serde(rename = "actividades")]
    pub activities: Vec<String>,
    #[serde(rename = "duracion_meses")]
    pub duration_months: u32,
    #[serde(rename = "frecuencia")]
    pub frequency: String,
    #[serde(rename = "recursos")]
    pub resources: Vec<String>,
    #[serde(rename = "indicadores")]
    pub indicators: Vec<String>,
}

struct Entry {
    name: &'static str,
    kind: InterventionType,
    objective: &'static str,
    population: &'static str,
    activities: &'static [&'static str],
    duration_months: u32,
    frequency: &'static str,
    resources: &'static [&'static str],
    indicators: &'static [&'static str],
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl From<&Entry> for InterventionTemplate {
    fn from(entry: &Entry) -> Self {
        InterventionTemplate {
            name: entry.name.to_string(),
            kind: entry.kind,
            objective: entry.objective.to_string(),
            population: entry.population.to_string(),
            activities: owned(entry.activities),
            duration_months: entry.duration_months,
            frequency: entry.frequency.to_string(),
            resources: owned(entry.resources),
            indicators: owned(entry.indicators),
        }
    }
}

const DIABETES: &[Entry] = &[
    Entry {
        name: "Programa de Educación Diabetológica",
        kind: InterventionType::Preventive,
        objective: "Mejorar el control de la diabetes y prevenir complicaciones",
        population: "Personas con diabetes y sus familias",
        activities: &[
            "Talleres de educación en diabetes",
            "Grupos de apoyo para diabéticos",
            "Control de glicemia domiciliario",
            "Educación nutricional específica",
        ],
        duration_months: 6,
        frequency: "Semanal",
        resources: &["Educador en diabetes", "Nutricionista", "Glucómetros"],
        indicators: &[
            "Control glicémico",
            "Adherencia al tratamiento",
            "Complicaciones",
        ],
    },
    Entry {
        name: "Talleres de Cocina Saludable",
        kind: InterventionType::Promotional,
        objective: "Enseñar preparación de alimentos saludables para diabéticos",
        population: "Familias con miembros diabéticos",
        activities: &[
            "Clases de cocina práctica",
            "Recetarios saludables",
            "Planificación de menús semanales",
        ],
        duration_months: 3,
        frequency: "Quincenal",
        resources: &["Cocina equipada", "Nutricionista", "Ingredientes"],
        indicators: &["Cambios en hábitos alimentarios", "Control de peso"],
    },
];

const HYPERTENSION: &[Entry] = &[Entry {
    name: "Programa de Control de Hipertensión",
    kind: InterventionType::Preventive,
    objective: "Controlar la presión arterial y prevenir complicaciones cardiovasculares",
    population: "Personas con hipertensión arterial",
    activities: &[
        "Control de presión arterial regular",
        "Educación sobre medicamentos",
        "Talleres de reducción de sodio",
        "Actividad física adaptada",
    ],
    duration_months: 12,
    frequency: "Mensual",
    resources: &[
        "Tensiómetros",
        "Educador en salud",
        "Monitor de actividad física",
    ],
    indicators: &["Control de presión arterial", "Adherencia al tratamiento"],
}];

const OBESITY: &[Entry] = &[Entry {
    name: "Programa de Actividad Física Comunitaria",
    kind: InterventionType::Promotional,
    objective: "Promover hábitos de vida saludable y control de peso",
    population: "Personas con sobrepeso y obesidad",
    activities: &[
        "Clases de ejercicio grupal",
        "Caminatas comunitarias",
        "Talleres de nutrición",
        "Seguimiento de peso y medidas",
    ],
    duration_months: 6,
    frequency: "Semanal",
    resources: &[
        "Instructor de actividad física",
        "Nutricionista",
        "Balanzas",
    ],
    indicators: &[
        "Pérdida de peso",
        "Mejora en condición física",
        "Adherencia",
    ],
}];

const OVERCROWDING: &[Entry] = &[Entry {
    name: "Programa de Mejora Habitacional",
    kind: InterventionType::Community,
    objective: "Mejorar las condiciones de vivienda y hacinamiento",
    population: "Familias en situación de hacinamiento",
    activities: &[
        "Asesoría en mejoras habitacionales",
        "Gestión de subsidios habitacionales",
        "Talleres de organización del espacio",
        "Apoyo en trámites municipales",
    ],
    duration_months: 12,
    frequency: "Mensual",
    resources: &["Asistente social", "Arquitecto", "Gestor municipal"],
    indicators: &["Reducción del hacinamiento", "Mejoras habitacionales"],
}];

const DOMESTIC_VIOLENCE: &[Entry] = &[Entry {
    name: "Programa de Prevención de Violencia Intrafamiliar",
    kind: InterventionType::Preventive,
    objective: "Prevenir y detectar casos de violencia intrafamiliar",
    population: "Familias en riesgo de violencia",
    activities: &[
        "Talleres de resolución pacífica de conflictos",
        "Educación en derechos humanos",
        "Detección temprana de violencia",
        "Derivación a servicios especializados",
    ],
    duration_months: 6,
    frequency: "Quincenal",
    resources: &["Psicólogo", "Trabajador social", "Abogado"],
    indicators: &[
        "Reducción de casos de violencia",
        "Derivaciones exitosas",
    ],
}];

const SUBSTANCE_USE: &[Entry] = &[Entry {
    name: "Programa de Prevención de Consumo de Drogas",
    kind: InterventionType::Preventive,
    objective: "Prevenir el consumo de drogas y apoyar la rehabilitación",
    population: "Adolescentes y jóvenes en riesgo",
    activities: &[
        "Talleres de prevención en colegios",
        "Actividades deportivas y recreativas",
        "Apoyo a familias afectadas",
        "Derivación a centros de rehabilitación",
    ],
    duration_months: 12,
    frequency: "Semanal",
    resources: &["Psicólogo", "Monitor deportivo", "Educador"],
    indicators: &[
        "Reducción del consumo",
        "Participación en actividades",
    ],
}];

const ADOLESCENT_PREGNANCY: &[Entry] = &[Entry {
    name: "Programa de Salud Sexual y Reproductiva",
    kind: InterventionType::Preventive,
    objective: "Prevenir embarazos adolescentes y promover salud sexual",
    population: "Adolescentes y jóvenes",
    activities: &[
        "Educación sexual integral",
        "Talleres de proyecto de vida",
        "Acceso a métodos anticonceptivos",
        "Apoyo a madres adolescentes",
    ],
    duration_months: 12,
    frequency: "Mensual",
    resources: &["Matrona", "Psicólogo", "Educador en salud"],
    indicators: &[
        "Reducción de embarazos adolescentes",
        "Uso de anticonceptivos",
    ],
}];

const UNEMPLOYMENT: &[Entry] = &[Entry {
    name: "Programa de Inserción Laboral",
    kind: InterventionType::Community,
    objective: "Mejorar las oportunidades laborales de la comunidad",
    population: "Personas desempleadas",
    activities: &[
        "Capacitación laboral",
        "Talleres de emprendimiento",
        "Gestión de empleos",
        "Apoyo en currículum vitae",
    ],
    duration_months: 6,
    frequency: "Semanal",
    resources: &["Orientador laboral", "Capacitador", "Gestor de empleos"],
    indicators: &["Inserción laboral", "Creación de emprendimientos"],
}];

const LOW_SCHOOLING: &[Entry] = &[Entry {
    name: "Programa de Alfabetización y Educación",
    kind: InterventionType::Promotional,
    objective: "Mejorar los niveles de educación de la comunidad",
    population: "Personas con baja escolaridad",
    activities: &[
        "Clases de alfabetización",
        "Apoyo escolar para niños",
        "Talleres de computación",
        "Preparación para exámenes libres",
    ],
    duration_months: 12,
    frequency: "Semanal",
    resources: &["Profesor", "Computadores", "Material educativo"],
    indicators: &[
        "Mejora en niveles de lectura",
        "Aprobación de exámenes",
    ],
}];

const CARE_ACCESS: &[Entry] = &[Entry {
    name: "Programa de Acceso a Servicios de Salud",
    kind: InterventionType::Community,
    objective: "Mejorar el acceso a servicios de salud de la comunidad",
    population: "Personas con dificultades de acceso",
    activities: &[
        "Transporte comunitario a centros de salud",
        "Atención domiciliaria",
        "Gestión de horas médicas",
        "Educación en derechos de salud",
    ],
    duration_months: 12,
    frequency: "Mensual",
    resources: &["Movilización", "Personal de salud", "Gestor"],
    indicators: &["Mejora en acceso", "Satisfacción usuaria"],
}];

const COMMUNITY_STRENGTHENING: Entry = Entry {
    name: "Programa de Fortalecimiento Comunitario",
    kind: InterventionType::Promotional,
    objective: "Potenciar las fortalezas identificadas en la comunidad",
    population: "Toda la comunidad",
    activities: &[
        "Talleres de liderazgo comunitario",
        "Organización de eventos comunitarios",
        "Fortalecimiento de redes sociales",
        "Desarrollo de proyectos comunitarios",
    ],
    duration_months: 6,
    frequency: "Mensual",
    resources: &["Facilitador comunitario", "Espacio de reunión"],
    indicators: &[
        "Participación comunitaria",
        "Desarrollo de proyectos",
    ],
};

fn entries_for(condition: Condition) -> &'static [Entry] {
    match condition {
        Condition::Diabetes => DIABETES,
        Condition::Hypertension => HYPERTENSION,
        Condition::Obesity => OBESITY,
        Condition::Overcrowding => OVERCROWDING,
        Condition::DomesticViolence => DOMESTIC_VIOLENCE,
        Condition::SubstanceUse => SUBSTANCE_USE,
        Condition::AdolescentPregnancy => ADOLESCENT_PREGNANCY,
        Condition::Unemployment => UNEMPLOYMENT,
        Condition::LowSchooling => LOW_SCHOOLING,
        Condition::CareAccess => CARE_ACCESS,
    }
}

pub fn templates_for(condition: Condition) -> Vec<InterventionTemplate> {
    entries_for(condition).iter().map(Into::into).collect()
}

pub fn community_strengthening_program() -> InterventionTemplate {
    (&COMMUNITY_STRENGTHENING).into()
}

/// Maps each priority condition to its catalog templates, in priority
/// order. One generic strengthening program is appended whenever any
/// community strength was recorded; which strengths they are does not
/// matter.
pub fn suggest_interventions(diagnostic: &CommunityDiagnostic) -> Vec<InterventionTemplate> {
    let mut suggestions: Vec<InterventionTemplate> = diagnostic
        .priorities
        .iter()
        .flat_map(|priority| templates_for(priority.condition))
        .collect();

    if !diagnostic.strengths.is_empty() {
        suggestions.push(community_strengthening_program());
    }

    suggestions
}
