//! Browser entry points.
//!
//! Each function opens a planner over LocalStorage, does one thing and
//! returns JSON for the presentation layer. Nothing is kept between calls,
//! so the page always sees what is stored.

use plantao_core::model::{OccurrenceId, StatusAction};
use plantao_core::{ShiftDraft, SporadicDraft, YearMonth};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::planner::Planner;
use crate::platform::WebStorage;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Plantão web module loaded");
}

fn planner() -> Planner<WebStorage> {
    Planner::new(WebStorage::new(), &AppConfig::default())
}

fn js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// `YYYY-MM`, or the current month when blank
fn month_or_current(raw: &str) -> Result<YearMonth, JsValue> {
    if raw.trim().is_empty() {
        Ok(YearMonth::of(crate::today()))
    } else {
        raw.parse().map_err(js_error)
    }
}

#[wasm_bindgen]
pub fn monthly_report(month: &str) -> Result<String, JsValue> {
    let report = planner()
        .monthly_report(month_or_current(month)?, crate::today())
        .map_err(js_error)?;
    to_json(&report)
}

#[wasm_bindgen]
pub fn goal_progress() -> Result<String, JsValue> {
    let progress = planner().goal_progress(crate::today()).map_err(js_error)?;
    to_json(&progress)
}

#[wasm_bindgen]
pub fn week_view() -> Result<String, JsValue> {
    let week = planner().week_view(crate::today()).map_err(js_error)?;
    to_json(&week)
}

#[wasm_bindgen]
pub fn calendar_month(month: &str) -> Result<String, JsValue> {
    let calendar = planner()
        .calendar_month(month_or_current(month)?)
        .map_err(js_error)?;
    to_json(&calendar)
}

/// Store a fixed shift from the wizard's JSON; returns the stored shift.
#[wasm_bindgen]
pub fn add_fixed_shift(json: &str) -> Result<String, JsValue> {
    let draft: ShiftDraft = serde_json::from_str(json).map_err(js_error)?;
    let shift = planner().add_fixed_shift(draft).map_err(js_error)?;
    to_json(&shift)
}

/// Store a sporadic shift from the wizard's JSON; returns the stored shift.
#[wasm_bindgen]
pub fn add_sporadic_shift(json: &str) -> Result<String, JsValue> {
    let draft: SporadicDraft = serde_json::from_str(json).map_err(js_error)?;
    let shift = planner().add_sporadic_shift(draft).map_err(js_error)?;
    to_json(&shift)
}

/// `action` is one of `completed`, `missed`, `reset`, `received`, `pending`.
#[wasm_bindgen]
pub fn set_status(id: &str, action: &str) -> Result<(), JsValue> {
    let action: StatusAction = action.parse().map_err(js_error)?;
    planner()
        .set_status(OccurrenceId::from_raw(id), action)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn set_monthly_goal(value: f64) -> Result<(), JsValue> {
    planner().set_monthly_goal(value).map_err(js_error)
}
