use crate::controller::{self, handle_click, Click, Control};
use crate::errors::{ActionError, AppError};
use crate::models::{ActionResponse, CatalogResponse, ClickRequest, StateSnapshot};
use crate::render::{render_cards, render_load_error, render_loading};
use crate::state::{AppState, CatalogStatus};
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let interaction = state.interaction.lock().await;
    Html(render_index(&interaction.snapshot(), interaction.policy()))
}

pub async fn cards(State(state): State<AppState>) -> Html<String> {
    let status = state.catalog.read().await;
    let html = match &*status {
        CatalogStatus::Loading => render_loading(),
        CatalogStatus::Ready(catalog) => render_cards(catalog.records()),
        CatalogStatus::Failed(message) => render_load_error(message),
    };
    Html(html)
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let status = state.catalog.read().await;
    let response = match &*status {
        CatalogStatus::Loading => CatalogResponse {
            status: "loading".to_string(),
            error: None,
            services: Vec::new(),
        },
        CatalogStatus::Ready(catalog) => CatalogResponse {
            status: "ready".to_string(),
            error: None,
            services: catalog.records().to_vec(),
        },
        CatalogStatus::Failed(message) => CatalogResponse {
            status: "failed".to_string(),
            error: Some(message.clone()),
            services: Vec::new(),
        },
    };
    Json(response)
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateSnapshot> {
    Json(state.interaction.lock().await.snapshot())
}

pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let Some(control) = Control::from_tag(&payload.control) else {
        return Err(AppError::bad_request("control must be 'like', 'copy' or 'call'"));
    };
    let click = Click {
        control,
        id: payload.id.trim().to_string(),
        clipboard: payload.clipboard,
    };

    let status = state.catalog.read().await;
    let CatalogStatus::Ready(catalog) = &*status else {
        return Err(ActionError::CatalogNotReady.into());
    };

    let mut interaction = state.interaction.lock().await;
    let outcome = handle_click(catalog, &mut interaction, &click, Local::now().time())?;

    Ok(Json(ActionResponse {
        message: outcome.message(),
        state: interaction.snapshot(),
    }))
}

pub async fn clear_history(State(state): State<AppState>) -> Json<ActionResponse> {
    Json(apply_clear(&state).await)
}

pub async fn clear_history_form(State(state): State<AppState>) -> Redirect {
    apply_clear(&state).await;
    Redirect::to("/")
}

async fn apply_clear(state: &AppState) -> ActionResponse {
    let mut interaction = state.interaction.lock().await;
    let message = controller::clear_history(&mut interaction);
    info!("call history cleared");
    ActionResponse {
        message: message.to_string(),
        state: interaction.snapshot(),
    }
}
