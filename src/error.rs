use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Error as ANYHOW_ERROR;
use reqwest::Error as REQWEST_ERROR;
use serde_json::Error as JSON_ERROR;
use std::num::ParseFloatError as PARSE_FLOAT_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseIntError,
    str::ParseBoolError as PARSE_BOOL_ERROR,
};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::error::Elapsed;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    FLOAT(#[from] PARSE_FLOAT_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    TokioElapsedError(#[from] Elapsed),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Network not supported: {0}, only ethereum is supported for real data")]
    UnsupportedNetwork(String),

    #[error("Invalid pool address: {0}")]
    InvalidPoolAddress(String),

    #[error("{source_name} responded with an error: {message}")]
    UpstreamError {
        source_name: String,
        message: String,
    },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("All fallback strategies failed: {0}")]
    FallbackExhausted(String),

    #[error("Preload failed: {0}")]
    PreloadFailed(String),

    #[error("Server end with error: {0}")]
    ServerError(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::UnsupportedNetwork(_)
            | Error::InvalidPoolAddress(_)
            | Error::INT(_)
            | Error::FLOAT(_)
            | Error::ParseBoolError(_) => StatusCode::BAD_REQUEST,

            Error::ReqwestError(_)
            | Error::UpstreamError { .. }
            | Error::EmptyResponse(_)
            | Error::FallbackExhausted(_) => StatusCode::BAD_GATEWAY,

            Error::TokioElapsedError(_) => StatusCode::GATEWAY_TIMEOUT,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
