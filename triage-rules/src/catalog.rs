//! Static symptom and diagnosis tables.
//!
//! Both catalogs are ordered slices: symptom detection walks
//! [`SYMPTOM_CATALOG`] front to back and records identifiers in that order.

use triage_core::{Diagnosis, Symptom};

/// A temperature range `[lower, upper)` with its clinical label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    pub label: &'static str,
    pub lower: f64,
    pub upper: f64,
}

impl TemperatureBand {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

#[derive(Debug)]
pub struct SymptomEntry {
    pub symptom: Symptom,
    /// Lower-case substrings; the first hit records the symptom.
    pub keywords: &'static [&'static str],
    pub normal_range: Option<(f64, f64)>,
    pub bands: &'static [TemperatureBand],
}

#[derive(Debug)]
pub struct DiagnosisEntry {
    pub diagnosis: Diagnosis,
    pub symptoms: &'static [Symptom],
    pub recommendations: &'static [&'static str],
    /// NIC reference codes, treated as opaque strings.
    pub codes: &'static [&'static str],
}

const FEVER_BANDS: [TemperatureBand; 5] = [
    TemperatureBand {
        label: "normal",
        lower: 35.0,
        upper: 37.5,
    },
    TemperatureBand {
        label: "febrícula",
        lower: 37.5,
        upper: 38.0,
    },
    TemperatureBand {
        label: "fiebre moderada",
        lower: 38.0,
        upper: 39.0,
    },
    TemperatureBand {
        label: "fiebre alta",
        lower: 39.0,
        upper: 40.0,
    },
    TemperatureBand {
        label: "hiperpirexia",
        lower: 40.0,
        upper: 45.0,
    },
];

pub static SYMPTOM_CATALOG: [SymptomEntry; 4] = [
    SymptomEntry {
        symptom: Symptom::Fever,
        keywords: &[
            "fiebre",
            "febril",
            "calentura",
            "temperatura alta",
            "hipertermia",
        ],
        normal_range: Some((36.0, 37.5)),
        bands: &FEVER_BANDS,
    },
    SymptomEntry {
        symptom: Symptom::RespiratoryDistress,
        keywords: &[
            "no puede respirar",
            "dificultad para respirar",
            "dificultad respiratoria",
            "le cuesta respirar",
            "falta de aire",
            "falta el aire",
            "ahogo",
            "se ahoga",
            "disnea",
        ],
        normal_range: None,
        bands: &[],
    },
    SymptomEntry {
        symptom: Symptom::LungPain,
        keywords: &[
            "dolor en el pulmon",
            "dolor en el pulmón",
            "dolor de pulmon",
            "dolor de pulmón",
            "dolor pulmonar",
            "dolor en el pecho",
            "dolor de pecho",
            "dolor toracico",
            "dolor torácico",
            "duele el pecho",
        ],
        normal_range: None,
        bands: &[],
    },
    SymptomEntry {
        symptom: Symptom::Cough,
        keywords: &["tos", "flema", "expectora"],
        normal_range: None,
        bands: &[],
    },
];

static PNEUMONIA: DiagnosisEntry = DiagnosisEntry {
    diagnosis: Diagnosis::Pneumonia,
    symptoms: &[Symptom::Fever, Symptom::LungPain, Symptom::RespiratoryDistress],
    recommendations: &[
        "Administrar oxigenoterapia según prescripción y mantener SpO2 ≥ 92%",
        "Colocar al paciente en posición semi-Fowler",
        "Monitorizar signos vitales y saturación de oxígeno cada 2 horas",
        "Fomentar la tos eficaz y la fisioterapia respiratoria",
        "Obtener muestras para cultivo antes de iniciar los antibióticos prescritos",
    ],
    codes: &[
        "NIC 3320 Oxigenoterapia",
        "NIC 3350 Monitorización respiratoria",
        "NIC 3230 Fisioterapia respiratoria",
        "NIC 6680 Monitorización de los signos vitales",
    ],
};

static ACUTE_ASTHMA: DiagnosisEntry = DiagnosisEntry {
    diagnosis: Diagnosis::AcuteAsthma,
    symptoms: &[Symptom::RespiratoryDistress],
    recommendations: &[
        "Administrar broncodilatador inhalado según prescripción",
        "Mantener al paciente sentado e incorporado",
        "Vigilar frecuencia respiratoria, uso de musculatura accesoria y sibilancias",
        "Acompañar al paciente para disminuir la ansiedad durante la crisis",
    ],
    codes: &[
        "NIC 3210 Manejo del asma",
        "NIC 2311 Administración de medicación: inhalación",
        "NIC 3350 Monitorización respiratoria",
        "NIC 5820 Disminución de la ansiedad",
    ],
};

static RESPIRATORY_CRISIS: DiagnosisEntry = DiagnosisEntry {
    diagnosis: Diagnosis::RespiratoryCrisis,
    symptoms: &[Symptom::RespiratoryDistress],
    recommendations: &[
        "Asegurar la permeabilidad de la vía aérea",
        "Administrar oxígeno y avisar al médico de inmediato",
        "Monitorizar la saturación de oxígeno de forma continua",
        "Preparar el equipo de soporte ventilatorio",
    ],
    codes: &[
        "NIC 3140 Manejo de la vía aérea",
        "NIC 3320 Oxigenoterapia",
        "NIC 3390 Ayuda a la ventilación",
        "NIC 3350 Monitorización respiratoria",
    ],
};

pub static DIAGNOSIS_CATALOG: [&DiagnosisEntry; 3] =
    [&PNEUMONIA, &ACUTE_ASTHMA, &RESPIRATORY_CRISIS];

pub fn diagnosis_entry(diagnosis: Diagnosis) -> &'static DiagnosisEntry {
    match diagnosis {
        Diagnosis::Pneumonia => &PNEUMONIA,
        Diagnosis::AcuteAsthma => &ACUTE_ASTHMA,
        Diagnosis::RespiratoryCrisis => &RESPIRATORY_CRISIS,
    }
}

pub fn symptom_entry(symptom: Symptom) -> Option<&'static SymptomEntry> {
    SYMPTOM_CATALOG.iter().find(|entry| entry.symptom == symptom)
}

/// Label of the fever band covering `temperature`, if any.
pub fn temperature_band(temperature: f64) -> Option<&'static str> {
    symptom_entry(Symptom::Fever)?
        .bands
        .iter()
        .find(|band| band.contains(temperature))
        .map(|band| band.label)
}

/// Whether `temperature` falls outside the fever entry's normal range (inclusive).
pub fn outside_normal_range(temperature: f64) -> Option<bool> {
    let (lower, upper) = symptom_entry(Symptom::Fever)?.normal_range?;
    Some(temperature < lower || temperature > upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_catalog_order_is_fixed() {
        let order: Vec<Symptom> = SYMPTOM_CATALOG.iter().map(|entry| entry.symptom).collect();
        assert_eq!(
            order,
            vec![
                Symptom::Fever,
                Symptom::RespiratoryDistress,
                Symptom::LungPain,
                Symptom::Cough,
            ]
        );
    }

    #[test]
    fn keywords_are_lowercase() {
        for entry in &SYMPTOM_CATALOG {
            for keyword in entry.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "{keyword}");
            }
        }
    }

    #[test]
    fn fever_bands_are_contiguous() {
        let bands = symptom_entry(Symptom::Fever).map(|entry| entry.bands).unwrap_or(&[]);
        assert_eq!(bands.len(), FEVER_BANDS.len());
        for pair in bands.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn band_lookup_uses_inclusive_lower_bound() {
        assert_eq!(temperature_band(37.4), Some("normal"));
        assert_eq!(temperature_band(37.5), Some("febrícula"));
        assert_eq!(temperature_band(39.0), Some("fiebre alta"));
        assert_eq!(temperature_band(41.2), Some("hiperpirexia"));
        assert_eq!(temperature_band(34.0), None);
        assert_eq!(temperature_band(45.0), None);
    }

    #[test]
    fn normal_range_comes_from_fever_entry() {
        assert_eq!(outside_normal_range(36.0), Some(false));
        assert_eq!(outside_normal_range(37.5), Some(false));
        assert_eq!(outside_normal_range(37.6), Some(true));
        assert_eq!(outside_normal_range(35.2), Some(true));
    }

    #[test]
    fn only_fever_carries_bands() {
        for entry in &SYMPTOM_CATALOG {
            let is_fever = entry.symptom == Symptom::Fever;
            assert_eq!(!entry.bands.is_empty(), is_fever, "{:?}", entry.symptom);
            assert_eq!(entry.normal_range.is_some(), is_fever, "{:?}", entry.symptom);
        }
    }

    #[test]
    fn characteristic_symptoms_drive_the_rules() {
        assert_eq!(
            diagnosis_entry(Diagnosis::Pneumonia).symptoms,
            &[Symptom::Fever, Symptom::LungPain, Symptom::RespiratoryDistress]
        );
        assert_eq!(
            diagnosis_entry(Diagnosis::AcuteAsthma).symptoms,
            &[Symptom::RespiratoryDistress]
        );
        assert_eq!(
            diagnosis_entry(Diagnosis::RespiratoryCrisis).symptoms,
            &[Symptom::RespiratoryDistress]
        );
    }

    #[test]
    fn diagnosis_lookup_matches_entry() {
        for entry in DIAGNOSIS_CATALOG {
            assert_eq!(diagnosis_entry(entry.diagnosis).diagnosis, entry.diagnosis);
            assert!(!entry.recommendations.is_empty());
            assert!(!entry.codes.is_empty());
        }
    }
}
