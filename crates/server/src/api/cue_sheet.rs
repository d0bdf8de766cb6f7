use crate::{dto::CueSheetDto, fetch::fetch_table, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cuesheet::sheet::{Config, CueSheet};
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info};

pub async fn cue_sheet(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let sheet = load_sheet(&params, &state).await?;
    Ok(Json(CueSheetDto::from(&sheet)).into_response())
}

pub async fn cue_sheet_text(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let sheet = load_sheet(&params, &state).await?;
    Ok(sheet.to_string().into_response())
}

async fn load_sheet(
    params: &HashMap<String, String>,
    state: &AppState,
) -> Result<CueSheet, StatusCode> {
    let Some(sheet_url) = params.get("sheet_url") else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let table = fetch_table(&state.client, &state.reader, sheet_url)
        .await
        .map_err(|err| {
            error!("Failed to fetch {sheet_url}: {err}");
            StatusCode::BAD_GATEWAY
        })?;

    let sheet = CueSheet::load(&table, &Config::current_year()).map_err(|err| {
        error!("Failed to load cue sheet: {err}");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    info!("Loaded {} cues", sheet.len());
    Ok(sheet)
}
