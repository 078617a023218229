use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::panel::server::PanelState;
use crate::probe::{CandidateEndpoint, Transport};
use crate::trigger::{ButtonView, RenderPort};

#[derive(Debug, Serialize)]
pub struct ActivationResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub view: ButtonView,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub base_url: String,
    pub candidates: Vec<CandidateEndpoint>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_trigger<T: Transport, R: RenderPort>(
    State(state): State<PanelState<T, R>>,
) -> Json<ButtonView> {
    Json(state.view.borrow().clone())
}

pub async fn post_trigger<T: Transport, R: RenderPort>(
    State(state): State<PanelState<T, R>>,
) -> (StatusCode, Json<ActivationResponse>) {
    // The sequence runs detached; clients poll GET /api/trigger for the result.
    let accepted = state.controller.activate().is_accepted();
    let status = if accepted {
        StatusCode::ACCEPTED
    } else {
        StatusCode::CONFLICT
    };
    let view = state.view.borrow().clone();

    (status, Json(ActivationResponse { accepted, view }))
}

pub async fn get_candidates<T: Transport, R: RenderPort>(
    State(state): State<PanelState<T, R>>,
) -> Json<PlanResponse> {
    let plan = state.controller.plan();
    Json(PlanResponse {
        base_url: plan.base_url.to_string(),
        candidates: plan.candidates.clone(),
    })
}
