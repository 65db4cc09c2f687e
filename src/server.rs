use actix_cors::Cors;
use actix_web::{dev::Server, http::header, middleware, web, App, HttpServer};

use crate::{
    configuration::{AppState, State},
    controller::{pools, preload, prices},
    error::Error,
};

/// `ALLOWED_ORIGINS` entry that lets any origin through
const ANY_ORIGIN: &str = "*";

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| match origin.to_str() {
                Ok(origin) => origin_allowed(&app.config.allowed_origins, origin),
                Err(_) => false,
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .service(
                web::scope("/api")
                    .service(prices::eth_price)
                    .service(pools::tvl_history)
                    .service(pools::volume_history)
                    .service(pools::fees_history)
                    .service(pools::apr_history)
                    .service(pools::liquidity_distribution)
                    .service(pools::returns_breakdown)
                    .service(preload::status)
                    .service(preload::trigger),
            )
    })
    .bind((host, port))?
    .disable_signals()
    .run();
    Ok(server)
}

fn origin_allowed(allowed_origins: &[String], origin: &str) -> bool {
    allowed_origins
        .iter()
        .any(|allowed| allowed == ANY_ORIGIN || allowed == origin)
}
