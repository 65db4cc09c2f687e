use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct PreloadTriggerResponse {
    pub started: bool,
}

#[get("/preload/status")]
pub async fn status(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let data = state.data_loader.status().await;
    Ok(web::Json(data))
}

/// Runs in the background; `started` is false while a run is active
#[post("/preload")]
pub async fn trigger(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let started = state.data_loader.trigger_preload();
    Ok(web::Json(PreloadTriggerResponse { started }))
}
