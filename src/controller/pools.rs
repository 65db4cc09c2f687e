//! Pool statistics API endpoints
//!
//! Every endpoint takes the pool address in the path and an optional
//! `network` query parameter defaulting to ethereum.

use actix_web::{get, web, Responder};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    model::{is_valid_pool_address, DEFAULT_NETWORK},
};

#[derive(Debug, Deserialize)]
pub struct NetworkQuery {
    network: Option<String>,
}

impl NetworkQuery {
    fn network(&self) -> &str {
        self.network.as_deref().unwrap_or(DEFAULT_NETWORK)
    }
}

fn pool_address(path: web::Path<String>) -> Result<String, Error> {
    let address = path.into_inner();

    if !is_valid_pool_address(&address) {
        return Err(Error::InvalidPoolAddress(address));
    }

    Ok(address)
}

// =============================================================================
// Historical series
// =============================================================================

#[get("/pools/{address}/tvl-history")]
pub async fn tvl_history(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_tvl_history(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

#[get("/pools/{address}/volume-history")]
pub async fn volume_history(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_volume_history(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

#[get("/pools/{address}/fees-history")]
pub async fn fees_history(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_fees_history(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

#[get("/pools/{address}/apr-history")]
pub async fn apr_history(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_apr_history(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

// =============================================================================
// Distributions
// =============================================================================

#[get("/pools/{address}/liquidity-distribution")]
pub async fn liquidity_distribution(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_liquidity_distribution(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

#[get("/pools/{address}/returns-breakdown")]
pub async fn returns_breakdown(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<NetworkQuery>,
) -> Result<impl Responder, Error> {
    let address = pool_address(path)?;
    let data = state
        .data_loader
        .get_returns_breakdown(&address, query.network())
        .await?;

    Ok(web::Json(data))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use super::*;
    use crate::{
        controller::test_utils::app_data,
        handler::test_utils::{loader, FakePools, FakePrices, USDC_ETH},
        model::{TvlPoint, VolumePoint},
    };

    macro_rules! pools_app {
        ($pools:expr) => {
            test::init_service(
                App::new()
                    .app_data(app_data(loader(FakePrices::new(None, None), $pools)))
                    .service(
                        web::scope("/api")
                            .service(tvl_history)
                            .service(volume_history)
                            .service(fees_history)
                            .service(apr_history)
                            .service(liquidity_distribution)
                            .service(returns_breakdown),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_tvl_history_defaults_to_ethereum() {
        let app = pools_app!(FakePools::healthy());

        let req = test::TestRequest::get()
            .uri(&format!("/api/pools/{}/tvl-history", USDC_ETH))
            .to_request();
        let body: Vec<TvlPoint> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 30);
        assert_eq!(body[0].tvl, 10_000_000.0);
    }

    #[actix_web::test]
    async fn test_unsupported_network_is_bad_request() {
        let app = pools_app!(FakePools::healthy());

        let req = test::TestRequest::get()
            .uri(&format!("/api/pools/{}/tvl-history?network=polygon", USDC_ETH))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("polygon"));
    }

    #[actix_web::test]
    async fn test_invalid_address_is_bad_request() {
        let app = pools_app!(FakePools::healthy());

        for uri in [
            "/api/pools/0x1234/volume-history",
            "/api/pools/88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640ab/fees-history",
            "/api/pools/0xZZe6A0c2dDD26FEEb64F039a2c41296FcB3f5640/apr-history",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_volume_history_approximated_when_service_down() {
        let app = pools_app!(FakePools::failing());

        let req = test::TestRequest::get()
            .uri(&format!("/api/pools/{}/volume-history", USDC_ETH))
            .to_request();
        let body: Vec<VolumePoint> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 30);
        assert!(body.iter().all(|p| p.approximated == Some(true)));
    }

    #[actix_web::test]
    async fn test_static_endpoints() {
        let app = pools_app!(FakePools::failing());

        for (endpoint, len) in [
            ("fees-history", 12),
            ("liquidity-distribution", 10),
            ("returns-breakdown", 4),
        ] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/pools/{}/{}?network=arbitrum", USDC_ETH, endpoint))
                .to_request();
            let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body.len(), len, "{}", endpoint);
        }
    }
}
