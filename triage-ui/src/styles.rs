#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-triage-ui]";

/// Default CSS for the component along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --triage-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --triage-bg: #ffffff;
  --triage-accent: #667eea;
  --triage-accent-strong: #764ba2;
  --triage-card-border: rgba(148, 163, 184, 0.28);
  --triage-radius: 16px;
  --triage-text: #1f2933;
  --triage-muted: #52606d;
  --triage-surface: #f8fafc;
  --triage-urgency-critica: #b42318;
  --triage-urgency-critica-bg: rgba(180, 35, 24, 0.1);
  --triage-urgency-alta: #dc6803;
  --triage-urgency-alta-bg: rgba(220, 104, 3, 0.12);
  --triage-urgency-moderada: #b54708;
  --triage-urgency-moderada-bg: rgba(247, 144, 9, 0.12);
  --triage-urgency-normal: #067647;
  --triage-urgency-normal-bg: rgba(6, 118, 71, 0.12);
}

.triage-root {
  font-family: var(--triage-font-family);
  background: var(--triage-bg);
  color: var(--triage-text);
  border-radius: var(--triage-radius);
  display: flex;
  flex-direction: column;
  gap: 20px;
  padding: 28px;
  max-width: 880px;
  margin: 0 auto;
  box-shadow: 0 24px 48px rgba(15, 23, 42, 0.1);
}

.triage-header {
  text-align: center;
}

.triage-header h1 {
  color: var(--triage-accent);
  margin: 0;
  font-size: 2rem;
}

.triage-header p {
  color: var(--triage-muted);
  margin: 0.5rem 0 0 0;
}

.triage-input {
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.triage-input textarea {
  border: 2px solid var(--triage-accent);
  border-radius: 12px;
  padding: 12px;
  font: inherit;
  resize: vertical;
}

.triage-input button,
.session-clear {
  align-self: flex-end;
  background: linear-gradient(135deg, var(--triage-accent) 0%, var(--triage-accent-strong) 100%);
  color: #ffffff;
  border: none;
  border-radius: 25px;
  padding: 0.5rem 2rem;
  font-weight: 600;
  cursor: pointer;
}

.triage-error {
  color: var(--triage-urgency-critica);
  margin: 0;
}

.triage-card,
.triage-session {
  border: 1px solid var(--triage-card-border);
  border-radius: var(--triage-radius);
  padding: 18px 20px;
  background: var(--triage-surface);
}

.triage-card header,
.triage-session header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 12px;
}

.triage-card h2,
.triage-session h2 {
  margin: 0;
  font-size: 1.2rem;
}

.triage-card.insufficient {
  color: var(--triage-muted);
}

.urgency-badge {
  border-radius: 999px;
  padding: 2px 12px;
  font-size: 0.85rem;
  font-weight: 600;
}

.urgency-badge[data-level="critica"] {
  color: var(--triage-urgency-critica);
  background: var(--triage-urgency-critica-bg);
}

.urgency-badge[data-level="alta"] {
  color: var(--triage-urgency-alta);
  background: var(--triage-urgency-alta-bg);
}

.urgency-badge[data-level="moderada"] {
  color: var(--triage-urgency-moderada);
  background: var(--triage-urgency-moderada-bg);
}

.urgency-badge[data-level="normal"] {
  color: var(--triage-urgency-normal);
  background: var(--triage-urgency-normal-bg);
}

.triage-temperature[data-outside-normal="true"] {
  color: var(--triage-urgency-alta);
  font-weight: 600;
}

.symptom-chips {
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
  list-style: none;
  padding: 0;
}

.symptom-chip {
  border: 1px solid var(--triage-accent);
  color: var(--triage-accent);
  border-radius: 999px;
  padding: 2px 10px;
  font-size: 0.85rem;
}

.triage-recommendations li {
  margin-bottom: 6px;
}

.triage-recommendations li:first-child {
  font-weight: 600;
}

.triage-codes {
  color: var(--triage-muted);
  font-size: 0.85rem;
}

.session-records {
  list-style: none;
  padding: 0;
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.session-record {
  display: grid;
  grid-template-columns: auto auto 1fr;
  gap: 6px 12px;
  align-items: center;
  border-bottom: 1px solid var(--triage-card-border);
  padding-bottom: 8px;
}

.session-time,
.session-count,
.session-empty {
  color: var(--triage-muted);
  font-size: 0.85rem;
}

.session-narrative {
  grid-column: 1 / -1;
  margin: 0;
}

.triage-footer {
  color: var(--triage-muted);
  font-size: 0.85rem;
  text-align: center;
}

@media (max-width: 640px) {
  .triage-root {
    padding: 18px;
  }

  .session-record {
    grid-template-columns: 1fr;
  }

  .triage-input button,
  .session-clear {
    width: 100%;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("El document no tiene etiqueta <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-triage-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
