//! Interactive HTML form
//!
//! Rendered from the field table. Submitted values arrive as strings and are
//! decoded into a [`CustomerRecord`] here, so the page can be re-rendered
//! with exactly what the user typed when validation fails.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use serde_json::{Map, Value};

use crate::engine::Prediction;
use crate::model::{CustomerRecord, FieldKind, FieldSpec, FIELDS};

/// What to show below the form
pub enum Outcome<'a> {
    Empty,
    Error(&'a str),
    Predicted(&'a CustomerRecord, &'a Prediction),
}

/// Form values for a fresh page
pub fn initial_values() -> HashMap<String, String> {
    CustomerRecord::default()
        .values()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Decode submitted form values, enforcing types, vocabularies and bounds
pub fn record_from_form(values: &HashMap<String, String>) -> Result<CustomerRecord> {
    let mut object = Map::new();

    for spec in FIELDS.iter() {
        let raw = values
            .get(spec.name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("{} is required", spec.label))?;

        let value = match spec.kind {
            FieldKind::Number { .. } => {
                let number: f64 = raw
                    .parse()
                    .map_err(|_| anyhow!("{} must be a number, got {:?}", spec.label, raw))?;
                if !number.is_finite() {
                    bail!("{} must be a finite number", spec.label);
                }
                Value::from(number)
            }
            FieldKind::Choice { .. } => Value::String(raw.to_string()),
        };
        object.insert(spec.name.to_string(), value);
    }

    let record: CustomerRecord =
        serde_json::from_value(Value::Object(object)).map_err(|e| anyhow!("{}", e))?;
    record.check_bounds()?;
    Ok(record)
}

/// Render the full page
pub fn render_page(values: &HashMap<String, String>, outcome: Outcome<'_>) -> String {
    let mut html = String::new();

    html.push_str(concat!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        "<title>Tourism Wellness Package Predictor</title>\n",
        "<style>\n",
        "body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }\n",
        "form { display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem 1rem; }\n",
        "label { display: flex; flex-direction: column; font-size: 0.9rem; }\n",
        "button { grid-column: 1 / -1; padding: 0.6rem; font-size: 1rem; }\n",
        ".error { color: #b00020; }\n",
        "table { border-collapse: collapse; } td, th { border: 1px solid #ccc; padding: 0.2rem 0.5rem; }\n",
        "</style>\n</head>\n<body>\n",
        "<h1>Wellness Tourism Package Prediction</h1>\n",
        "<p>Predict whether a customer is likely to purchase the Wellness Tourism Package.</p>\n",
        "<h2>Customer Input Features</h2>\n",
        "<form method=\"post\" action=\"/form\">\n",
    ));

    for spec in FIELDS.iter() {
        let current = values.get(spec.name).map(String::as_str).unwrap_or("");
        html.push_str(&render_field(spec, current));
    }

    html.push_str("<button type=\"submit\">Predict Wellness Package Purchase</button>\n</form>\n");

    match outcome {
        Outcome::Empty => {}
        Outcome::Error(message) => {
            html.push_str(&format!(
                "<p class=\"error\" role=\"alert\">{}</p>\n",
                escape_html(message)
            ));
        }
        Outcome::Predicted(record, prediction) => {
            html.push_str(&render_result(record, prediction));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_field(spec: &FieldSpec, current: &str) -> String {
    let name = spec.name;
    let label = escape_html(spec.label);

    match spec.kind {
        FieldKind::Number {
            min, max, slider, ..
        } => {
            let input_type = if slider { "range" } else { "number" };
            format!(
                "<label>{label}<input type=\"{input_type}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required></label>\n",
                value = escape_html(current),
            )
        }
        FieldKind::Choice { options, .. } => {
            let mut select = format!("<label>{label}<select name=\"{name}\">");
            for option in options {
                let selected = if *option == current { " selected" } else { "" };
                select.push_str(&format!(
                    "<option value=\"{value}\"{selected}>{value}</option>",
                    value = escape_html(option),
                ));
            }
            select.push_str("</select></label>\n");
            select
        }
    }
}

fn render_result(record: &CustomerRecord, prediction: &Prediction) -> String {
    let mut html = String::from("<h2>Input Features</h2>\n<table>\n<tr>");
    let values = record.values();

    for (name, _) in values.iter() {
        html.push_str(&format!("<th>{}</th>", escape_html(name)));
    }
    html.push_str("</tr>\n<tr>");
    for (_, value) in values.iter() {
        html.push_str(&format!("<td>{}</td>", escape_html(&value.to_string())));
    }
    html.push_str("</tr>\n</table>\n");

    html.push_str(&format!(
        concat!(
            "<h2>Prediction</h2>\n",
            "<p>Predicted Class (ProdTaken): <strong>{}</strong> (1 = Will Purchase, 0 = Will Not Purchase)</p>\n",
            "<p>Predicted Probability of Purchase: <strong>{:.4}</strong></p>\n",
        ),
        prediction.predicted_class, prediction.predicted_probability
    ));
    html
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
