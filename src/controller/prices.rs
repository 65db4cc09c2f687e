use actix_web::{get, web, Responder};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct EthPriceResponse {
    pub price: f64,
}

#[get("/eth-price")]
pub async fn eth_price(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let price = state
        .data_loader
        .get_eth_price(&state.config.etherscan_api_key)
        .await?;

    Ok(web::Json(EthPriceResponse { price }))
}
