//! WASM bindings for the swarm-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::error::Result;
use crate::input::DataPoint;
use crate::layout::{LayoutConfig, layout_swarm};
use crate::output::SwarmOutput;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Request body: the records plus an optional configuration.
#[derive(Debug, Deserialize)]
struct SwarmRequest {
    points: Vec<DataPoint>,
    #[serde(default)]
    config: LayoutConfig,
}

fn report_error(msg: &str) {
    tracing::error!("{msg}");
    #[cfg(target_arch = "wasm32")]
    console_error(msg);
}

/// Lay out a swarm from a JSON request and return the JSON result.
///
/// Request and configuration errors come back as an `error` object; per-group
/// placement failures come back in `errors` next to the finished groups.
#[wasm_bindgen]
pub fn swarm_layout(input: &str) -> String {
    let output = match run(input) {
        Ok(output) => output,
        Err(e) => {
            report_error(&format!("Error laying out swarm: {e}"));
            SwarmOutput::from_error(&e)
        }
    };
    for e in &output.errors {
        report_error(&e.message);
    }
    serde_json::to_string(&output)
        .unwrap_or_else(|_| "{\"error\": {\"message\": \"Serialization error\"}}".to_string())
}

fn run(input: &str) -> Result<SwarmOutput> {
    let request: SwarmRequest = serde_json::from_str(input)?;
    let layout = layout_swarm(&request.points, &request.config)?;
    Ok(layout.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_layout_round_trip() {
        let input = r#"{
            "points": [
                {"value": 0.0, "category": "a"},
                {"value": 0.0, "category": "a"},
                {"value": 5.0, "category": "b"}
            ],
            "config": {"marker_size": 1.0, "dpi": 72.0, "category_pixels_per_unit": 1.0, "slot_width": 10.0}
        }"#;
        let out: Value = serde_json::from_str(&swarm_layout(input)).unwrap();

        let points = out["points"].as_array().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0]["x"], 0.0);
        assert!((points[1]["x"].as_f64().unwrap() + 1.05).abs() < 1e-9);
        assert_eq!(points[2]["x"], 1.0);
        assert_eq!(points[2]["y"], 5.0);
        assert_eq!(out["groups"].as_array().unwrap().len(), 2);
        assert!(out.get("error").is_none());
        assert!(out.get("errors").is_none());
    }

    #[test]
    fn test_config_is_optional() {
        let out: Value = serde_json::from_str(&swarm_layout(
            r#"{"points": [{"value": 1.0, "category": "a", "sub_category": "x"}]}"#,
        ))
        .unwrap();
        assert_eq!(out["points"][0]["sub_category"], "x");
    }

    #[test]
    fn test_malformed_json_reports_error() {
        let out: Value = serde_json::from_str(&swarm_layout("{not json")).unwrap();
        assert!(out["error"]["message"].as_str().unwrap().starts_with("JSON error"));
        assert!(out.get("points").is_none());
    }

    #[test]
    fn test_invalid_config_reports_field() {
        let out: Value = serde_json::from_str(&swarm_layout(
            r#"{"points": [], "config": {"slot_width": -1.0}}"#,
        ))
        .unwrap();
        assert_eq!(out["error"]["field"], "slot_width");
    }

    #[test]
    fn test_horizontal_orientation_from_json() {
        let out: Value = serde_json::from_str(&swarm_layout(
            r#"{"points": [{"value": 2.5, "category": "a"}], "config": {"orientation": "horizontal"}}"#,
        ))
        .unwrap();
        assert_eq!(out["points"][0]["x"], 2.5);
        assert_eq!(out["points"][0]["y"], 0.0);
    }
}
