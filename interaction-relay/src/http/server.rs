use crate::forward::Forwarder;
use crate::http::response::ErrorResponse;
use crate::signature::VerificationMode;
use crate::{Config, ConfigError, Error};
use ed25519_dalek::Signature;
use log::warn;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use warp::http::StatusCode;
use warp::reply::Json;
use warp::{Filter, Rejection};

pub struct Server {
    pub config: Config,
    pub verification_mode: VerificationMode,
    pub forwarder: Forwarder,
}

impl Server {
    pub fn new(config: Config) -> Result<Server, ConfigError> {
        let verification_mode = config.verification_mode()?;
        if matches!(verification_mode, VerificationMode::Disabled) {
            warn!("Signature verification is DISABLED; treating all requests as authentic");
        }

        let forwarder = Forwarder::new(
            config.forward_url.clone().map(String::into_boxed_str),
            Duration::from_millis(config.forward_timeout_ms),
        );

        Ok(Server {
            config,
            verification_mode,
            forwarder,
        })
    }

    pub async fn start(self) {
        let address: SocketAddr = self
            .config
            .server_addr
            .parse()
            .expect("Failed to parse server address");

        let filter = Arc::new(self).filter();

        warp::serve(filter).run(address).await;
    }

    pub fn filter(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let server = self.clone();
        let health = warp::get()
            .and(warp::path::end())
            .and(warp::any().map(move || server.clone()))
            .and_then(super::health);

        let interactions = warp::post()
            .and(warp::path("discord"))
            .and(warp::path::end())
            .and(warp::any().map(move || self.clone()))
            .and(Server::parse_signature())
            .and(warp::header::optional::<String>("x-signature-timestamp"))
            .and(warp::body::bytes())
            .and_then(super::handle);

        health
            .or(interactions)
            .with(warp::log("warp"))
            .recover(|error: Rejection| async move {
                if let Some(err) = error.find::<Error>() {
                    let json: Json = ErrorResponse::from(err).into();

                    let status_code = match err {
                        Error::MissingSignatureHeaders
                        | Error::InvalidSignature(..)
                        | Error::InvalidSignatureFormat(..) => StatusCode::UNAUTHORIZED,
                        Error::JsonError(..) => StatusCode::BAD_REQUEST,
                    };

                    Ok(warp::reply::with_status(json, status_code))
                } else {
                    Err(error)
                }
            })
    }

    fn parse_signature(
    ) -> impl Filter<Extract = (Option<Signature>,), Error = warp::Rejection> + Clone {
        warp::header::optional("x-signature-ed25519").and_then(
            |signature: Option<String>| async move {
                let signature = match signature {
                    Some(signature) => signature,
                    None => return Ok(None),
                };

                let mut bytes = [0u8; 64];
                if let Err(e) = hex::decode_to_slice(signature, &mut bytes) {
                    return Err(warp::reject::custom(Error::InvalidSignatureFormat(e)));
                }

                // Valid-length hex can still hold non-canonical signature
                // bytes, which must reject rather than panic.
                match Signature::try_from(&bytes[..]) {
                    Ok(signature) => Ok(Some(signature)),
                    Err(e) => Err(warp::reject::custom(Error::InvalidSignature(e))),
                }
            },
        )
    }
}
