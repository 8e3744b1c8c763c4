use crate::http::Server;
use crate::{replies, Error};
use ed25519_dalek::Signature;
use model::interaction::Interaction;
use serde::Serialize;
use std::sync::Arc;
use warp::http::header::CONTENT_TYPE;
use warp::http::HeaderValue;
use warp::hyper::body::Bytes;
use warp::hyper::Body;
use warp::{reply::Response, Rejection, Reply};

/// The interaction pipeline: verify the signature over the exact bytes as
/// received, then parse, then answer locally or forward. Parsing never
/// happens before verification.
pub async fn handle(
    server: Arc<Server>,
    signature: Option<Signature>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Rejection> {
    server
        .verification_mode
        .verify(timestamp.as_deref(), &body[..], signature.as_ref())
        .map_err(warp::reject::custom)?;

    let interaction: Interaction = serde_json::from_slice(&body[..])
        .map_err(Error::JsonError)
        .map_err(warp::reject::custom)?;

    // Ping and the other locally-handled kinds are answered here, before
    // any network call can get in the way of Discord's reply deadline.
    if let Some(response) = replies::synthesize(&interaction) {
        return Ok(warp::reply::json(&response).into_response());
    }

    let res_body = server.forwarder.forward(&body[..]).await;

    let mut response = Response::new(Body::from(res_body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(response)
}

#[derive(Serialize, Debug)]
struct HealthResponse {
    status: &'static str,
    forwarding_configured: bool,
}

pub async fn health(server: Arc<Server>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "ok",
        forwarding_configured: server.config.forward_url.is_some(),
    }))
}
