//! `POST /api/abm`: run the policy impact simulation.

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;
use axum::{extract::State, Json};
use fanar_abm_core::{Language, SimulationRequest, SimulationResult, TargetGroup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbmBody {
    #[serde(default)]
    pub policy_text: Option<String>,
    /// Anything but the string `"ar"` means English.
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub target_group: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AbmReply {
    pub ok: bool,
    pub results: Vec<SimulationResult>,
}

pub async fn abm(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AbmBody>,
) -> Result<Json<AbmReply>, ApiError> {
    let policy_text = body
        .policy_text
        .filter(|text| !text.is_empty())
        .ok_or(ApiError::Validation("policyText required"))?;
    let language = Language::from_code(
        body.language.as_ref().and_then(Value::as_str).unwrap_or("en"),
    );
    let target = TargetGroup::parse(body.target_group.as_deref().unwrap_or("all"));

    let request = SimulationRequest::new(policy_text, language, target);
    let results = state.simulator.run(&request);
    tracing::info!(
        language = language.code(),
        target = request.target.as_group().unwrap_or("all"),
        results = results.len(),
        "abm simulation"
    );

    Ok(Json(AbmReply { ok: true, results }))
}
