use axum::{extract::State, response::Html, Extension, Form};
use mstat_core::FormInput;

use crate::middleware::RequestId;
use crate::render::{self, Results};

use super::AppState;

pub(super) async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::page(&state.channels, &FormInput::default(), None))
}

pub(super) async fn check(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<FormInput>,
) -> Html<String> {
    let results = run_check(&state, &req_id, &form).await;
    Html(render::page(&state.channels, &form, Some(&results)))
}

pub(super) async fn reset(
    State(state): State<AppState>,
    Form(form): Form<FormInput>,
) -> Html<String> {
    Html(render::page(&state.channels, &form.reset_filters(), None))
}

async fn run_check(state: &AppState, req_id: &RequestId, form: &FormInput) -> Results {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(e) => return Results::Error(e.to_string()),
    };

    // Only catalog channels are reachable from the form.
    if !state
        .channels
        .iter()
        .any(|c| c.url == submission.channel_url)
    {
        tracing::warn!(
            request_id = %req_id.0,
            channel = %submission.channel_url,
            "rejected unknown sales channel"
        );
        return Results::Error(format!(
            "Unknown sales channel: {}",
            submission.channel_url
        ));
    }

    tracing::info!(
        request_id = %req_id.0,
        channel = %submission.channel_url,
        status = %submission.criteria.status,
        identifiers = submission.criteria.identifiers.len(),
        "running status check"
    );

    match state.client.check(&submission).await {
        Ok(outcome) => Results::Outcome(outcome),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "status check failed");
            Results::Error(e.to_string())
        }
    }
}
