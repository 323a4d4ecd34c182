//! Narrative to `Assessment` rules: vital-sign parsing, symptom detection and triage.

pub mod catalog;

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use triage_core::{
    Assessment, Diagnosis, ExtractionResult, Symptom, TriageConfig, TriageError, TriageResult,
    Urgency,
};

use crate::catalog::{
    diagnosis_entry, outside_normal_range, temperature_band, DiagnosisEntry, SYMPTOM_CATALOG,
};

/// Temperature patterns, tried in order. The first one that matches decides.
/// Digits are ASCII only: `\d` would also match digits `f64::from_str` rejects.
static TEMPERATURE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"([0-9]+(?:[.,][0-9]+)?)\s*(?:grados|°)",
        r"temperatura\s+de\s+([0-9]+(?:[.,][0-9]+)?)",
        r"fiebre\s+de\s+([0-9]+(?:[.,][0-9]+)?)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid temperature regex pattern"))
    .collect()
});

/// Run extraction and classification on a narrative.
pub fn assess(narrative: &str, config: &TriageConfig) -> Result<Assessment, TriageError> {
    config.validate()?;

    let extraction = extract(narrative);
    let triage = classify(&extraction, config);
    let temperature_band = extraction
        .temperature
        .and_then(temperature_band)
        .map(str::to_string);
    let temperature_outside_normal = extraction.temperature.and_then(outside_normal_range);

    Ok(Assessment {
        extraction,
        triage,
        temperature_band,
        temperature_outside_normal,
    })
}

/// Parse a (possibly partial) JSON threshold configuration, falling back to
/// defaults for missing fields, and validate it.
pub fn parse_config(config_json: &str) -> Result<TriageConfig, TriageError> {
    let value: serde_json::Value =
        serde_json::from_str(config_json).map_err(|err| TriageError::Parse(err.to_string()))?;

    let mut merged = serde_json::to_value(TriageConfig::default())
        .map_err(|err| TriageError::Other(err.to_string()))?;
    let (Some(target), Some(overrides)) = (merged.as_object_mut(), value.as_object()) else {
        return Err(TriageError::Parse(
            "Expected a JSON object with threshold fields".to_string(),
        ));
    };
    for (key, field) in overrides {
        if !target.contains_key(key) {
            return Err(TriageError::Parse(format!("Unknown threshold field {key}")));
        }
        target.insert(key.clone(), field.clone());
    }

    let config: TriageConfig =
        serde_json::from_value(merged).map_err(|err| TriageError::Parse(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Pull the temperature and the recognised symptoms out of a narrative.
///
/// Blank or unrecognised text yields an empty result, never an error.
pub fn extract(narrative: &str) -> ExtractionResult {
    let normalized = narrative.to_lowercase();
    let temperature = parse_temperature(&normalized);
    let symptoms = detect_symptoms(&normalized);

    tracing::debug!(?temperature, ?symptoms, "narrative extracted");

    ExtractionResult {
        temperature,
        symptoms,
        narrative: normalized,
        captured_at: Utc::now(),
    }
}

/// Map extracted evidence to a probable diagnosis, an urgency and recommendations.
pub fn classify(extraction: &ExtractionResult, config: &TriageConfig) -> TriageResult {
    let temperature = extraction.temperature;
    let mut urgency = temperature
        .map(|value| urgency_from_temperature(value, config))
        .unwrap_or_default();

    let matches =
        |diagnosis| has_characteristic_symptoms(extraction, diagnosis_entry(diagnosis));

    let diagnosis = if matches(Diagnosis::Pneumonia) {
        Some(Diagnosis::Pneumonia)
    } else if matches(Diagnosis::AcuteAsthma)
        && temperature.is_some_and(|value| value < config.asthma_max_temperature)
    {
        Some(Diagnosis::AcuteAsthma)
    } else if matches(Diagnosis::RespiratoryCrisis) {
        // Overrides the temperature rule, including a critical reading.
        urgency = Urgency::High;
        Some(Diagnosis::RespiratoryCrisis)
    } else {
        None
    };

    let (mut recommendations, codes) = match diagnosis {
        Some(diagnosis) => {
            let entry = diagnosis_entry(diagnosis);
            (
                to_owned_list(entry.recommendations),
                to_owned_list(entry.codes),
            )
        }
        None => (Vec::new(), Vec::new()),
    };

    if let Some(advice) = temperature.and_then(|value| fever_advice(value, config)) {
        recommendations.insert(0, advice);
    }

    tracing::info!(
        diagnosis = diagnosis.map(Diagnosis::id),
        urgency = urgency.as_str(),
        "narrative classified"
    );

    TriageResult {
        diagnosis,
        urgency,
        recommendations,
        codes,
    }
}

fn parse_temperature(text: &str) -> Option<f64> {
    for (index, pattern) in TEMPERATURE_PATTERNS.iter().enumerate() {
        if let Some(captures) = pattern.captures(text) {
            let raw = captures.get(1)?.as_str().replace(',', ".");
            let value = raw.parse::<f64>().ok();
            tracing::debug!(pattern = index, raw = %raw, "temperature pattern matched");
            return value;
        }
    }
    None
}

fn detect_symptoms(text: &str) -> Vec<Symptom> {
    SYMPTOM_CATALOG
        .iter()
        .filter(|entry| entry.keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|entry| entry.symptom)
        .collect()
}

fn has_characteristic_symptoms(extraction: &ExtractionResult, entry: &DiagnosisEntry) -> bool {
    entry
        .symptoms
        .iter()
        .all(|symptom| extraction.has_symptom(*symptom))
}

fn urgency_from_temperature(value: f64, config: &TriageConfig) -> Urgency {
    match value {
        v if v >= config.critical_temperature => Urgency::Critical,
        v if v >= config.high_temperature => Urgency::High,
        v if v >= config.moderate_temperature => Urgency::Moderate,
        _ => Urgency::Normal,
    }
}

fn fever_advice(value: f64, config: &TriageConfig) -> Option<String> {
    if value >= config.high_fever_advice {
        Some(format!(
            "URGENTE: temperatura de {value:.1} °C. Aplicar medidas físicas de control térmico, \
             administrar el antipirético prescrito y avisar al médico de inmediato"
        ))
    } else if value >= config.moderate_fever_advice {
        Some(format!(
            "Temperatura de {value:.1} °C: controlar la temperatura cada 2 horas y favorecer la hidratación"
        ))
    } else {
        None
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction_with(temperature: Option<f64>, symptoms: Vec<Symptom>) -> ExtractionResult {
        ExtractionResult {
            temperature,
            symptoms,
            narrative: String::new(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn degrees_pattern_wins_over_later_patterns() {
        let extraction = extract("Temperatura de 37 y ahora 39 grados");
        assert_eq!(extraction.temperature, Some(39.0));
    }

    #[test]
    fn falls_back_to_temperature_and_fever_phrases() {
        assert_eq!(
            extract("tiene una temperatura de 38.2 desde ayer").temperature,
            Some(38.2)
        );
        assert_eq!(extract("refiere fiebre de 40").temperature, Some(40.0));
    }

    #[test]
    fn accepts_decimal_comma_and_degree_sign() {
        assert_eq!(extract("38,7 °C axilar").temperature, Some(38.7));
        assert_eq!(extract("Registro: 39°").temperature, Some(39.0));
    }

    #[test]
    fn non_ascii_digits_fall_through_to_later_patterns() {
        assert_eq!(
            extract("marca ３９ grados, fiebre de 39").temperature,
            Some(39.0)
        );
        assert_eq!(extract("tiene ٣٩ grados").temperature, None);
    }

    #[test]
    fn missing_temperature_is_none() {
        let extraction = extract("paciente tranquilo, refiere cansancio");
        assert_eq!(extraction.temperature, None);
        assert!(extraction.symptoms.is_empty());
    }

    #[test]
    fn empty_narrative_has_no_signal() {
        let extraction = extract("   ");
        assert_eq!(extraction.temperature, None);
        assert!(extraction.symptoms.is_empty());
        assert!(!extraction.has_signal());
    }

    #[test]
    fn symptoms_follow_catalog_order_without_duplicates() {
        let extraction = extract("Tos con flema, disnea y falta de aire. Tiene fiebre, está febril.");
        assert_eq!(
            extraction.symptoms,
            vec![Symptom::Fever, Symptom::RespiratoryDistress, Symptom::Cough]
        );
    }

    #[test]
    fn narrative_is_lowercased_copy() {
        let extraction = extract("DOLOR DE PECHO");
        assert_eq!(extraction.narrative, "dolor de pecho");
        assert_eq!(extraction.symptoms, vec![Symptom::LungPain]);
    }

    #[test]
    fn urgency_thresholds_are_inclusive() {
        let config = TriageConfig::default();
        let cases = [
            (37.9, Urgency::Normal),
            (38.4, Urgency::Normal),
            (38.5, Urgency::Moderate),
            (39.4, Urgency::Moderate),
            (39.5, Urgency::High),
            (41.9, Urgency::High),
            (42.0, Urgency::Critical),
        ];
        for (temperature, expected) in cases {
            let triage = classify(&extraction_with(Some(temperature), Vec::new()), &config);
            assert_eq!(triage.urgency, expected, "{temperature}");
            assert_eq!(triage.diagnosis, None);
        }
    }

    #[test]
    fn pneumonia_takes_priority() {
        let config = TriageConfig::default();
        let triage = classify(
            &extraction_with(
                Some(37.0),
                vec![
                    Symptom::Fever,
                    Symptom::RespiratoryDistress,
                    Symptom::LungPain,
                ],
            ),
            &config,
        );
        assert_eq!(triage.diagnosis, Some(Diagnosis::Pneumonia));
        assert_eq!(triage.urgency, Urgency::Normal);
        assert_eq!(triage.codes, to_owned_list(diagnosis_entry(Diagnosis::Pneumonia).codes));
    }

    #[test]
    fn distress_with_low_temperature_is_asthma() {
        let config = TriageConfig::default();
        let triage = classify(
            &extraction_with(Some(37.2), vec![Symptom::RespiratoryDistress]),
            &config,
        );
        assert_eq!(triage.diagnosis, Some(Diagnosis::AcuteAsthma));
        assert_eq!(triage.urgency, Urgency::Normal);
        assert_eq!(
            triage.recommendations,
            to_owned_list(diagnosis_entry(Diagnosis::AcuteAsthma).recommendations)
        );
    }

    #[test]
    fn distress_without_temperature_is_crisis() {
        let config = TriageConfig::default();
        let triage = classify(
            &extraction_with(None, vec![Symptom::RespiratoryDistress]),
            &config,
        );
        assert_eq!(triage.diagnosis, Some(Diagnosis::RespiratoryCrisis));
        assert_eq!(triage.urgency, Urgency::High);
    }

    #[test]
    fn crisis_forces_high_even_over_critical() {
        let config = TriageConfig::default();
        let triage = classify(
            &extraction_with(Some(42.3), vec![Symptom::RespiratoryDistress]),
            &config,
        );
        assert_eq!(triage.diagnosis, Some(Diagnosis::RespiratoryCrisis));
        assert_eq!(triage.urgency, Urgency::High);
    }

    #[test]
    fn high_fever_line_is_prepended_to_template() {
        let config = TriageConfig::default();
        let triage = classify(
            &extraction_with(
                Some(40.0),
                vec![
                    Symptom::Fever,
                    Symptom::RespiratoryDistress,
                    Symptom::LungPain,
                ],
            ),
            &config,
        );
        let template = diagnosis_entry(Diagnosis::Pneumonia).recommendations;

        assert_eq!(triage.recommendations.len(), template.len() + 1);
        assert!(triage.recommendations[0].starts_with("URGENTE: temperatura de 40.0 °C"));
        assert_eq!(&triage.recommendations[1..], to_owned_list(template).as_slice());
        assert_eq!(triage.urgency, Urgency::High);
    }

    #[test]
    fn moderate_fever_line_without_diagnosis() {
        let config = TriageConfig::default();
        let triage = classify(&extraction_with(Some(38.0), vec![Symptom::Fever]), &config);
        assert_eq!(triage.diagnosis, None);
        assert_eq!(triage.codes, Vec::<String>::new());
        assert_eq!(triage.recommendations.len(), 1);
        assert!(triage.recommendations[0].starts_with("Temperatura de 38.0 °C"));
    }

    #[test]
    fn no_fever_line_below_threshold() {
        let config = TriageConfig::default();
        let triage = classify(&extraction_with(Some(37.9), Vec::new()), &config);
        assert!(triage.recommendations.is_empty());
    }

    #[test]
    fn assess_flags_range_only_with_temperature() {
        let config = TriageConfig::default();
        let normal = assess("36,8 grados, tranquilo", &config).unwrap();
        assert_eq!(normal.temperature_outside_normal, Some(false));

        let missing = assess("tos seca", &config).unwrap();
        assert_eq!(missing.temperature_outside_normal, None);
        assert_eq!(missing.temperature_band, None);
    }

    #[test]
    fn assess_rejects_invalid_config() {
        let config = TriageConfig {
            moderate_temperature: 40.0,
            ..TriageConfig::default()
        };
        assert!(matches!(
            assess("fiebre de 39", &config),
            Err(TriageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parse_config_merges_over_defaults() {
        let config = parse_config(r#"{ "critical_temperature": 41.0 }"#).unwrap();
        assert_eq!(config.critical_temperature, 41.0);
        assert_eq!(config.high_temperature, 39.5);
    }

    #[test]
    fn parse_config_rejects_bad_input() {
        assert!(matches!(parse_config("[1, 2]"), Err(TriageError::Parse(_))));
        assert!(matches!(
            parse_config(r#"{ "fever": 40 }"#),
            Err(TriageError::Parse(_))
        ));
        assert!(matches!(
            parse_config(r#"{ "high_temperature": 45 }"#),
            Err(TriageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn assess_labels_temperature_band() {
        let assessment = assess("fiebre de 39,6", &TriageConfig::default()).unwrap();
        assert_eq!(assessment.temperature_band.as_deref(), Some("fiebre alta"));
        assert_eq!(assessment.temperature_outside_normal, Some(true));
        assert!(!assessment.is_insufficient());
    }
}
