use log::warn;
use model::interaction::{CallbackData, InteractionResponse, EPHEMERAL};
use std::time::Duration;
use warp::hyper::body::Bytes;

/// Shown to the invoking user whenever the downstream call fails for any
/// reason. Discord retries webhook-level failures, which would duplicate
/// side effects downstream, so the failure never becomes an HTTP error.
const FALLBACK_REPLY: &str =
    "Sorry, something went wrong while handling your request. Please try again in a moment.";

pub struct Forwarder {
    http_client: reqwest::Client,
    target: Option<Box<str>>,
    timeout: Duration,
}

#[derive(thiserror::Error, Debug)]
enum ForwardError {
    #[error("no forwarding target configured")]
    NoTarget,

    #[error("error while sending request: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("target answered with status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("target answered with a malformed interaction response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl Forwarder {
    pub fn new(target: Option<Box<str>>, timeout: Duration) -> Forwarder {
        Forwarder {
            http_client: Forwarder::build_http_client(),
            target,
            timeout,
        }
    }

    /// Relays the raw interaction body downstream, exactly once. Any
    /// failure degrades to the fixed ephemeral error reply, so the caller
    /// always has a well-formed response body to emit with status 200.
    pub async fn forward(&self, body: &[u8]) -> Bytes {
        match self.try_forward(body).await {
            Ok(res_body) => res_body,
            Err(e) => {
                warn!("Failed to forward interaction, falling back to error reply: {}", e);
                fallback_body()
            }
        }
    }

    async fn try_forward(&self, body: &[u8]) -> Result<Bytes, ForwardError> {
        let target = self.target.as_deref().ok_or(ForwardError::NoTarget)?;

        let res = self
            .http_client
            .post(target)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ForwardError::BadStatus(res.status()));
        }

        let res_body = res.bytes().await?;

        // Shape check only: the bytes are passed through untouched.
        serde_json::from_slice::<InteractionResponse>(&res_body[..])?;

        Ok(res_body)
    }

    fn build_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .build()
            .expect("build_http_client")
    }
}

fn fallback_body() -> Bytes {
    let response = InteractionResponse::new_channel_message_with_source(CallbackData {
        tts: None,
        content: Box::from(FALLBACK_REPLY),
        components: None,
        flags: EPHEMERAL,
    });

    serde_json::to_vec(&response)
        .expect("serialize fallback reply")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use warp::Filter;

    const INTERACTION: &[u8] = br#"{"type":2,"data":{"name":"summary"}}"#;

    async fn spawn_target<F>(filter: F) -> String
    where
        F: Filter<Error = warp::Rejection> + Clone + Send + Sync + 'static,
        F::Extract: warp::Reply,
    {
        let (addr, fut) = warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(fut);
        format!("http://{}", addr)
    }

    fn assert_fallback(res_body: &Bytes) {
        let value: serde_json::Value = serde_json::from_slice(&res_body[..]).unwrap();
        assert_eq!(value["type"], 4);
        assert_eq!(value["data"]["content"], FALLBACK_REPLY);
        assert_eq!(value["data"]["flags"], EPHEMERAL);
    }

    #[tokio::test]
    async fn test_success_passes_body_through_verbatim() {
        let reply = r#"{"type":4,"data":{"content":"from downstream","extra":123}}"#;
        let target = spawn_target(warp::post().map(move || reply)).await;

        let forwarder = Forwarder::new(Some(target.into_boxed_str()), Duration::from_secs(1));
        let res_body = forwarder.forward(INTERACTION).await;

        assert_eq!(&res_body[..], reply.as_bytes());
    }

    #[tokio::test]
    async fn test_non_2xx_degrades_to_fallback() {
        let target = spawn_target(warp::post().map(|| {
            warp::reply::with_status("boom", warp::http::StatusCode::INTERNAL_SERVER_ERROR)
        }))
        .await;

        let forwarder = Forwarder::new(Some(target.into_boxed_str()), Duration::from_secs(1));
        assert_fallback(&forwarder.forward(INTERACTION).await);
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_to_fallback() {
        let target = spawn_target(warp::post().map(|| "not an interaction response")).await;

        let forwarder = Forwarder::new(Some(target.into_boxed_str()), Duration::from_secs(1));
        assert_fallback(&forwarder.forward(INTERACTION).await);
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_fallback_within_budget() {
        let target = spawn_target(warp::post().and_then(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, warp::Rejection>(r#"{"type":4,"data":{"content":"too late"}}"#)
        }))
        .await;

        let forwarder = Forwarder::new(Some(target.into_boxed_str()), Duration::from_millis(250));

        let started = Instant::now();
        let res_body = forwarder.forward(INTERACTION).await;

        assert_fallback(&res_body);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_connection_refused_degrades_to_fallback() {
        // Bind then drop to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let target = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let forwarder = Forwarder::new(Some(target.into_boxed_str()), Duration::from_secs(1));
        assert_fallback(&forwarder.forward(INTERACTION).await);
    }

    #[tokio::test]
    async fn test_missing_target_degrades_to_fallback() {
        let forwarder = Forwarder::new(None, Duration::from_secs(1));
        assert_fallback(&forwarder.forward(INTERACTION).await);
    }
}
