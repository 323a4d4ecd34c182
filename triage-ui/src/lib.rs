//! Componente de interfaz de triaje para entornos WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::styles;
    use chrono::{DateTime, Utc};
    use triage_core::{
        Assessment, PatientRecord, SessionLog, SessionSummary, TriageConfig, DISCLAIMER, GREETING,
    };
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, HtmlTextAreaElement, Window};
    use yew::events::InputEvent;
    use yew::prelude::*;
    use yew::TargetCast;

    #[derive(Properties, PartialEq)]
    pub struct TriageViewProps {
        pub config: TriageConfig,
    }

    #[function_component(TriageView)]
    fn triage_view(props: &TriageViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let narrative = use_state(String::new);
        let assessment = use_state(|| None::<Assessment>);
        let error = use_state(|| None::<String>);
        let session = use_state(SessionLog::new);

        let on_input = {
            let narrative = narrative.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlTextAreaElement = event.target_unchecked_into();
                narrative.set(input.value());
            })
        };

        let on_submit = {
            let narrative = narrative.clone();
            let assessment = assessment.clone();
            let error = error.clone();
            let session = session.clone();
            let config = props.config.clone();
            Callback::from(move |_| {
                let text = (*narrative).trim().to_string();
                if text.is_empty() {
                    return;
                }
                match triage_rules::assess(&text, &config) {
                    Ok(result) => {
                        let mut next = (*session).clone();
                        next.record(result.triage.clone(), &text, &result.extraction, None);
                        session.set(next);
                        assessment.set(Some(result));
                        error.set(None);
                        narrative.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            })
        };

        let on_clear = {
            let session = session.clone();
            let assessment = assessment.clone();
            Callback::from(move |_| {
                let mut next = (*session).clone();
                next.clear();
                session.set(next);
                assessment.set(None);
            })
        };

        html! {
            <div class="triage-root">
                <header class="triage-header">
                    <h1>{"Asistente de triaje de enfermería"}</h1>
                    <p>{ GREETING }</p>
                </header>
                <section class="triage-input">
                    <textarea
                        rows="4"
                        placeholder="Ej.: El paciente tiene fiebre de 39 grados y no puede respirar"
                        value={(*narrative).clone()}
                        oninput={on_input}
                        aria-label="Narrativa clínica"
                    />
                    <button type="button" onclick={on_submit}>{"Evaluar"}</button>
                    {
                        (*error).as_ref().map(|message| html! {
                            <p class="triage-error" role="alert">{ message.clone() }</p>
                        }).unwrap_or_default()
                    }
                </section>
                { (*assessment).as_ref().map(render_assessment).unwrap_or_default() }
                { render_session(&session, on_clear) }
                <footer class="triage-footer">{ DISCLAIMER }</footer>
            </div>
        }
    }

    fn render_assessment(assessment: &Assessment) -> Html {
        if assessment.is_insufficient() {
            return html! {
                <section class="triage-card insufficient">
                    <h2>{"Información insuficiente"}</h2>
                    <p>{"No se detectó temperatura ni síntomas reconocidos en la narrativa."}</p>
                </section>
            };
        }

        let triage = &assessment.triage;
        let extraction = &assessment.extraction;
        let diagnosis = triage
            .diagnosis
            .map(|d| d.label())
            .unwrap_or("Sin diagnóstico probable");
        let temperature = match (extraction.temperature, assessment.temperature_band.as_ref()) {
            (Some(value), Some(band)) => format!("{value:.1} °C ({band})"),
            (Some(value), None) => format!("{value:.1} °C"),
            (None, _) => "No registrada".to_string(),
        };

        html! {
            <section class="triage-card">
                <header>
                    <h2>{ diagnosis }</h2>
                    <span class="urgency-badge" data-level={triage.urgency.as_str()}>
                        { triage.urgency.label() }
                    </span>
                </header>
                <p class="triage-temperature"
                    data-outside-normal={assessment.temperature_outside_normal.unwrap_or(false).to_string()}>
                    { format!("Temperatura: {temperature}") }
                </p>
                <ul class="symptom-chips">
                    { for extraction.symptoms.iter().map(|symptom| html! {
                        <li class="symptom-chip">{ symptom.label() }</li>
                    }) }
                </ul>
                {
                    if triage.recommendations.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <ol class="triage-recommendations">
                                { for triage.recommendations.iter().map(|line| html! { <li>{ line.clone() }</li> }) }
                            </ol>
                        }
                    }
                }
                {
                    if triage.codes.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <p class="triage-codes">{ triage.codes.join(" · ") }</p>
                        }
                    }
                }
            </section>
        }
    }

    fn render_session(session: &SessionLog, on_clear: Callback<MouseEvent>) -> Html {
        let SessionSummary {
            total,
            critical,
            high,
        } = session.summarize();

        html! {
            <section class="triage-session">
                <header>
                    <h2>{"Historial de la sesión"}</h2>
                    <span class="session-count">{ format!("{total} registros · {critical} críticos · {high} altos") }</span>
                </header>
                <ul class="session-records">
                    {
                        if session.is_empty() {
                            html! { <li class="session-empty">{"Aún no hay evaluaciones en esta sesión."}</li> }
                        } else {
                            html! { for session.records().iter().rev().map(render_record) }
                        }
                    }
                </ul>
                {
                    if session.is_empty() {
                        html! {}
                    } else {
                        html! { <button type="button" class="session-clear" onclick={on_clear}>{"Limpiar sesión"}</button> }
                    }
                }
            </section>
        }
    }

    fn render_record(record: &PatientRecord) -> Html {
        let diagnosis = record.diagnosis.map(|d| d.label()).unwrap_or("Sin diagnóstico");
        html! {
            <li class="session-record">
                <span class="session-time">{ format_timestamp(record.recorded_at) }</span>
                <span class="urgency-badge" data-level={record.urgency.as_str()}>{ record.urgency.label() }</span>
                <span class="session-diagnosis">{ diagnosis }</span>
                <p class="session-narrative">{ record.narrative.clone() }</p>
            </li>
        }
    }

    fn format_timestamp(timestamp: DateTime<Utc>) -> String {
        timestamp.format("%Y-%m-%d %H:%M").to_string()
    }

    #[wasm_bindgen]
    pub fn mount_triage_view(selector: &str, config_json: Option<String>) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No hay window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No se pudo acceder al document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector no válido: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No se encontró el elemento del selector"))?;

        let config = match config_json {
            Some(json) => triage_rules::parse_config(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => TriageConfig::default(),
        };

        yew::Renderer::<TriageView>::with_root_and_props(target, TriageViewProps { config })
            .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_triage_view;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_triage_view(_: &str, _: Option<String>) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "triage-ui solo admite compilación para el target wasm32",
    ))
}
