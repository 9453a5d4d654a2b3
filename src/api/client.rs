//! JSON HTTP plumbing for the backend.
//!
//! Small wrappers over gloo-net that attach the bearer token when a
//! session exists and fold every failure into [`ApiError`]. Server
//! error bodies carrying a `message` field surface that message
//! verbatim; anything else becomes a bare status error.

use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config;
use crate::core::error::ApiError;
use crate::core::session::{self, LocalStore};

fn endpoint(path: &str) -> String {
    format!("{}{path}", config::API_BASE)
}

fn bearer() -> Option<String> {
    session::auth_token(&LocalStore)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let mut request = Request::get(&endpoint(path));
    if let Some(token) = bearer() {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }
    let response = request.send().await.map_err(|err| ApiError::Network(err.to_string()))?;
    decode(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let mut request = Request::post(&endpoint(path));
    if let Some(token) = bearer() {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }
    let response = request
        .json(body)
        .map_err(|err| ApiError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !response.ok() {
        return Err(error_from_body(status, response).await);
    }
    response.json::<T>().await.map_err(|err| ApiError::Decode(err.to_string()))
}

async fn error_from_body(status: u16, response: Response) -> ApiError {
    if let Ok(body) = response.json::<serde_json::Value>().await
        && let Some(message) = body.get("message").and_then(|m| m.as_str())
        && !message.is_empty()
    {
        return ApiError::Server { status, message: message.to_string() };
    }
    ApiError::Http(status)
}
