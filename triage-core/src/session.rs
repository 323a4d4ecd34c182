//! Registro de evaluaciones de la sesión interactiva (solo en memoria).

use chrono::Utc;
use serde::Serialize;

use crate::{ExtractionResult, PatientDemographics, PatientRecord, TriageResult, Urgency};

/// Lista ordenada de registros: solo admite añadir o vaciar por completo.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionLog {
    records: Vec<PatientRecord>,
}

/// Conteos de la sesión.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un registro a partir de un triaje completado y lo añade al final.
    pub fn record(
        &mut self,
        triage: TriageResult,
        narrative: &str,
        extraction: &ExtractionResult,
        demographics: Option<PatientDemographics>,
    ) -> &PatientRecord {
        let TriageResult {
            diagnosis,
            urgency,
            recommendations,
            codes,
        } = triage;

        let index = self.records.len();
        self.records.push(PatientRecord {
            narrative: narrative.to_string(),
            temperature: extraction.temperature,
            diagnosis,
            urgency,
            symptoms: extraction.symptoms.clone(),
            recommendations,
            codes,
            demographics,
            recorded_at: Utc::now(),
        });
        &self.records[index]
    }

    /// Vacía la sesión. Irreversible.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn summarize(&self) -> SessionSummary {
        self.records
            .iter()
            .fold(SessionSummary::default(), |mut summary, record| {
                summary.total += 1;
                match record.urgency {
                    Urgency::Critical => summary.critical += 1,
                    Urgency::High => summary.high += 1,
                    _ => {}
                }
                summary
            })
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&PatientRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnosis, Symptom};

    fn extraction(temperature: Option<f64>, symptoms: Vec<Symptom>) -> ExtractionResult {
        ExtractionResult {
            temperature,
            symptoms,
            narrative: "narrativa".to_string(),
            captured_at: Utc::now(),
        }
    }

    fn triage(urgency: Urgency) -> TriageResult {
        TriageResult {
            diagnosis: Some(Diagnosis::RespiratoryCrisis),
            urgency,
            recommendations: vec!["Vigilar".to_string()],
            codes: vec!["NIC 3350".to_string()],
        }
    }

    #[test]
    fn record_copies_triage_and_extraction() {
        let mut log = SessionLog::new();
        let evidence = extraction(Some(39.0), vec![Symptom::Fever]);
        let demographics = PatientDemographics {
            name: Some("Ana".to_string()),
            age: Some(71),
            sex: None,
        };

        let record = log.record(
            triage(Urgency::High),
            "Fiebre de 39 grados",
            &evidence,
            Some(demographics.clone()),
        );

        assert_eq!(record.narrative, "Fiebre de 39 grados");
        assert_eq!(record.temperature, Some(39.0));
        assert_eq!(record.symptoms, vec![Symptom::Fever]);
        assert_eq!(record.diagnosis, Some(Diagnosis::RespiratoryCrisis));
        assert_eq!(record.codes, vec!["NIC 3350".to_string()]);
        assert_eq!(record.demographics, Some(demographics));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn summarize_counts_by_urgency() {
        let mut log = SessionLog::new();
        let evidence = extraction(None, Vec::new());
        for urgency in [
            Urgency::Critical,
            Urgency::High,
            Urgency::High,
            Urgency::Normal,
            Urgency::Moderate,
        ] {
            log.record(triage(urgency), "x", &evidence, None);
        }

        assert_eq!(
            log.summarize(),
            SessionSummary {
                total: 5,
                critical: 1,
                high: 2,
            }
        );
        assert_eq!(log.latest().map(|r| r.urgency), Some(Urgency::Moderate));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = SessionLog::new();
        let evidence = extraction(Some(42.5), vec![Symptom::Fever]);
        log.record(triage(Urgency::Critical), "a", &evidence, None);
        log.record(triage(Urgency::High), "b", &evidence, None);

        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.summarize().total, 0);
        assert!(log.latest().is_none());
    }
}
