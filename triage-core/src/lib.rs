//! Modelo de datos del asistente de triaje de enfermería.

mod session;

pub use session::{SessionLog, SessionSummary};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aviso que acompaña a toda evaluación mostrada al personal.
pub const DISCLAIMER: &str =
    "Este sistema es solo de apoyo y no sustituye la valoración clínica profesional.";

/// Mensaje inicial de la sesión interactiva.
pub const GREETING: &str =
    "¡Hola! Soy tu asistente de triaje. Describe los síntomas del paciente por escrito.";

/// Umbrales de temperatura (°C) usados por el clasificador.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    /// A partir de este valor la urgencia es crítica.
    pub critical_temperature: f64,
    /// A partir de este valor la urgencia es alta.
    pub high_temperature: f64,
    /// A partir de este valor la urgencia es moderada.
    pub moderate_temperature: f64,
    /// Por debajo de este valor la dificultad respiratoria se trata como asma aguda.
    pub asthma_max_temperature: f64,
    /// A partir de este valor se antepone la recomendación de fiebre alta.
    pub high_fever_advice: f64,
    /// A partir de este valor se antepone la recomendación de fiebre moderada.
    pub moderate_fever_advice: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            critical_temperature: 42.0,
            high_temperature: 39.5,
            moderate_temperature: 38.5,
            asthma_max_temperature: 38.0,
            high_fever_advice: 39.0,
            moderate_fever_advice: 38.0,
        }
    }
}

impl TriageConfig {
    /// Comprueba que los umbrales sean finitos y estrictamente descendentes.
    pub fn validate(&self) -> Result<(), TriageError> {
        let values = [
            ("critical_temperature", self.critical_temperature),
            ("high_temperature", self.high_temperature),
            ("moderate_temperature", self.moderate_temperature),
            ("asthma_max_temperature", self.asthma_max_temperature),
            ("high_fever_advice", self.high_fever_advice),
            ("moderate_fever_advice", self.moderate_fever_advice),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TriageError::InvalidConfig(format!(
                "{name} no es un número finito"
            )));
        }

        if !(self.critical_temperature > self.high_temperature
            && self.high_temperature > self.moderate_temperature)
        {
            return Err(TriageError::InvalidConfig(
                "los umbrales de urgencia deben ser descendentes (crítica > alta > moderada)"
                    .to_string(),
            ));
        }

        if self.high_fever_advice <= self.moderate_fever_advice {
            return Err(TriageError::InvalidConfig(
                "high_fever_advice debe ser mayor que moderate_fever_advice".to_string(),
            ));
        }

        Ok(())
    }
}

/// Nivel de urgencia, ordenado de menor a mayor gravedad.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Urgency {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "moderada")]
    Moderate,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "critica")]
    Critical,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Moderate => "moderada",
            Urgency::High => "alta",
            Urgency::Critical => "critica",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Normal => "Normal",
            Urgency::Moderate => "Moderada",
            Urgency::High => "Alta",
            Urgency::Critical => "Crítica",
        }
    }
}

/// Signo clínico detectable en la narrativa.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symptom {
    #[serde(rename = "fiebre")]
    Fever,
    #[serde(rename = "respiracion")]
    RespiratoryDistress,
    #[serde(rename = "dolor_pulmon")]
    LungPain,
    #[serde(rename = "tos")]
    Cough,
}

impl Symptom {
    pub fn id(self) -> &'static str {
        match self {
            Symptom::Fever => "fiebre",
            Symptom::RespiratoryDistress => "respiracion",
            Symptom::LungPain => "dolor_pulmon",
            Symptom::Cough => "tos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Symptom::Fever => "Fiebre",
            Symptom::RespiratoryDistress => "Dificultad respiratoria",
            Symptom::LungPain => "Dolor pulmonar",
            Symptom::Cough => "Tos",
        }
    }
}

/// Patrón diagnóstico probable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    #[serde(rename = "neumonia")]
    Pneumonia,
    #[serde(rename = "asma_aguda")]
    AcuteAsthma,
    #[serde(rename = "crisis_respiratoria")]
    RespiratoryCrisis,
}

impl Diagnosis {
    pub fn id(self) -> &'static str {
        match self {
            Diagnosis::Pneumonia => "neumonia",
            Diagnosis::AcuteAsthma => "asma_aguda",
            Diagnosis::RespiratoryCrisis => "crisis_respiratoria",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::Pneumonia => "Posible neumonía",
            Diagnosis::AcuteAsthma => "Posible crisis asmática aguda",
            Diagnosis::RespiratoryCrisis => "Crisis respiratoria",
        }
    }
}

/// Evidencia extraída de una narrativa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub temperature: Option<f64>,
    /// En el orden del catálogo, sin repeticiones.
    pub symptoms: Vec<Symptom>,
    /// Copia en minúsculas de la narrativa original.
    pub narrative: String,
    pub captured_at: DateTime<Utc>,
}

impl ExtractionResult {
    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    /// `false` cuando no se detectó temperatura ni síntomas ("información insuficiente").
    pub fn has_signal(&self) -> bool {
        self.temperature.is_some() || !self.symptoms.is_empty()
    }
}

/// Resultado del triaje para una extracción.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TriageResult {
    pub diagnosis: Option<Diagnosis>,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
    pub codes: Vec<String>,
}

/// Extracción y triaje de una misma narrativa, listos para presentar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub extraction: ExtractionResult,
    pub triage: TriageResult,
    /// Etiqueta de la banda de temperatura, si se detectó temperatura.
    #[serde(default)]
    pub temperature_band: Option<String>,
    /// `Some(true)` si la temperatura cae fuera del rango normal del catálogo.
    #[serde(default)]
    pub temperature_outside_normal: Option<bool>,
}

impl Assessment {
    pub fn is_insufficient(&self) -> bool {
        !self.extraction.has_signal()
    }
}

/// Datos demográficos opcionales del paciente.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientDemographics {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
}

/// Registro inmutable de una evaluación dentro de la sesión.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub narrative: String,
    pub temperature: Option<f64>,
    pub diagnosis: Option<Diagnosis>,
    pub urgency: Urgency,
    pub symptoms: Vec<Symptom>,
    pub recommendations: Vec<String>,
    pub codes: Vec<String>,
    #[serde(default)]
    pub demographics: Option<PatientDemographics>,
    pub recorded_at: DateTime<Utc>,
}

/// Errores del asistente de triaje.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Configuración no válida: {0}")]
    InvalidConfig(String),
    #[error("No se pudieron leer los datos: {0}")]
    Parse(String),
    #[error("Otro error: {0}")]
    Other(String),
}
