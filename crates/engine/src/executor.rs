//! Request execution and outcome classification.
//!
//! The executor turns one action endpoint into an [`ActionResult`]. It never
//! returns an error: every failure (missing endpoint, transport failure,
//! readable non-2xx status) is folded into `ActionResult::Failure`.
//!
//! Classification policy:
//! - transport raised before a response was observed → `Failure(Transport)`
//! - opaque response → `Success`. A cross-origin hook only ever yields an
//!   opaque response, so its arrival is the only available confirmation.
//!   This is a best-effort signal, not proof that the deploy started.
//! - readable non-2xx → `Failure(NonSuccessStatus)`
//! - readable 2xx → `Success`

use async_trait::async_trait;
use hookdash_types::{ActionResult, FailureReason};
use hookdash_util::{Transport, TransportError, TransportResponse, redact_endpoint};
use tracing::{debug, warn};

/// Runs the action behind one endpoint.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, endpoint: &str) -> ActionResult;
}

/// Executor that POSTs to the endpoint through a [`Transport`].
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport> ActionExecutor for RequestExecutor<T> {
    async fn execute(&self, endpoint: &str) -> ActionResult {
        if endpoint.is_empty() {
            debug!("no endpoint configured; skipping request");
            return ActionResult::Failure(FailureReason::NoEndpoint);
        }

        let outcome = self.transport.post_empty(endpoint).await;
        let result = classify(&outcome);
        match (&outcome, result) {
            (Err(error), _) => warn!(endpoint = %redact_endpoint(endpoint), error = %error, "deploy hook transport error"),
            (Ok(response), ActionResult::Failure(reason)) => {
                warn!(endpoint = %redact_endpoint(endpoint), status = ?response.status, %reason, "deploy hook rejected")
            }
            (Ok(response), ActionResult::Success) => {
                debug!(endpoint = %redact_endpoint(endpoint), opaque = response.is_opaque(), "deploy hook accepted")
            }
        }
        result
    }
}

/// Maps a transport outcome onto an [`ActionResult`].
pub fn classify(outcome: &Result<TransportResponse, TransportError>) -> ActionResult {
    match outcome {
        Err(_) => ActionResult::Failure(FailureReason::Transport),
        Ok(response) if response.is_opaque() => ActionResult::Success,
        Ok(response) if response.ok() => ActionResult::Success,
        Ok(_) => ActionResult::Failure(FailureReason::NonSuccessStatus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookdash_util::ResponseKind;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    enum Scripted {
        Respond(TransportResponse),
        InvalidUrl,
    }

    struct ScriptedTransport {
        reply: Scripted,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(reply: Scripted) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_empty(&self, endpoint: &str) -> Result<TransportResponse, TransportError> {
            self.calls.lock().unwrap().push(endpoint.to_string());
            match &self.reply {
                Scripted::Respond(response) => Ok(*response),
                Scripted::InvalidUrl => Err(TransportError::InvalidUrl(url::ParseError::EmptyHost)),
            }
        }
    }

    async fn run(reply: Scripted, endpoint: &str) -> (ActionResult, Vec<String>) {
        let executor = RequestExecutor::new(ScriptedTransport::new(reply));
        let result = executor.execute(endpoint).await;
        let calls = executor.transport.calls.lock().unwrap().clone();
        (result, calls)
    }

    #[tokio::test]
    async fn empty_endpoint_fails_without_network() {
        let (result, calls) = run(Scripted::Respond(TransportResponse::opaque()), "").await;
        assert_eq!(result, ActionResult::Failure(FailureReason::NoEndpoint));
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn blank_endpoint_is_left_to_the_transport() {
        let (result, calls) = run(Scripted::InvalidUrl, "   ").await;
        assert_eq!(result, ActionResult::Failure(FailureReason::Transport));
        assert_eq!(calls, vec!["   ".to_string()]);
    }

    #[tokio::test]
    async fn same_origin_ok_is_success() {
        let response = TransportResponse::readable(ResponseKind::Basic, StatusCode::OK);
        let (result, calls) = run(Scripted::Respond(response), "https://hooks.example.com/1").await;
        assert_eq!(result, ActionResult::Success);
        assert_eq!(calls, vec!["https://hooks.example.com/1".to_string()]);
    }

    #[tokio::test]
    async fn opaque_response_is_success() {
        let (result, _) = run(Scripted::Respond(TransportResponse::opaque()), "https://hooks.example.com/1").await;
        assert_eq!(result, ActionResult::Success);
    }

    #[tokio::test]
    async fn readable_non_ok_is_status_failure() {
        let response = TransportResponse::readable(ResponseKind::Cors, StatusCode::NOT_FOUND);
        let (result, _) = run(Scripted::Respond(response), "https://hooks.example.com/1").await;
        assert_eq!(result, ActionResult::Failure(FailureReason::NonSuccessStatus));
    }

    #[tokio::test]
    async fn transport_error_is_transport_failure() {
        let (result, calls) = run(Scripted::InvalidUrl, "https://hooks.example.com/1").await;
        assert_eq!(result, ActionResult::Failure(FailureReason::Transport));
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_failure() {
        let transport = hookdash_util::ReqwestTransport::new(&Default::default()).unwrap();
        let executor = RequestExecutor::new(transport);
        let result = executor.execute("http://127.0.0.1:1/hook").await;
        assert_eq!(result, ActionResult::Failure(FailureReason::Transport));
    }
}
