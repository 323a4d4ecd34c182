//! Puente WASM <-> JavaScript independiente del framework.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use triage_core::{TriageConfig, TriageError};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
struct JsTriageConfig {
    #[serde(default)]
    critical_temperature: Option<f64>,
    #[serde(default)]
    high_temperature: Option<f64>,
    #[serde(default)]
    moderate_temperature: Option<f64>,
    #[serde(default)]
    asthma_max_temperature: Option<f64>,
    #[serde(default)]
    high_fever_advice: Option<f64>,
    #[serde(default)]
    moderate_fever_advice: Option<f64>,
}

impl From<JsTriageConfig> for TriageConfig {
    fn from(cfg: JsTriageConfig) -> Self {
        let base = TriageConfig::default();
        TriageConfig {
            critical_temperature: cfg
                .critical_temperature
                .unwrap_or(base.critical_temperature),
            high_temperature: cfg.high_temperature.unwrap_or(base.high_temperature),
            moderate_temperature: cfg
                .moderate_temperature
                .unwrap_or(base.moderate_temperature),
            asthma_max_temperature: cfg
                .asthma_max_temperature
                .unwrap_or(base.asthma_max_temperature),
            high_fever_advice: cfg.high_fever_advice.unwrap_or(base.high_fever_advice),
            moderate_fever_advice: cfg
                .moderate_fever_advice
                .unwrap_or(base.moderate_fever_advice),
        }
    }
}

/// Evalúa una narrativa y devuelve `{ extraction, triage, temperature_band,
/// temperature_outside_normal }`.
#[wasm_bindgen]
pub fn assess_narrative(narrative: &str, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsTriageConfig = from_value(js_cfg).map_err(|err| {
                JsValue::from_str(&format!("No se pudo leer la configuración: {err}"))
            })?;
            TriageConfig::from(cfg)
        }
        None => TriageConfig::default(),
    };

    let assessment = triage_rules::assess(narrative, &cfg)
        .map_err(|err| JsValue::from_str(&format_triage_error(err)))?;

    to_value(&assessment)
        .map_err(|err| JsValue::from_str(&format!("No se pudo serializar la evaluación: {err}")))
}

fn format_triage_error(err: TriageError) -> String {
    format!("Triage error: {err}")
}
