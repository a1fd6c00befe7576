use meta_core::{ActivationOutcome, AuthKey, FailureCause};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Issues authenticated blocking invocation requests to the action backend
/// and parses the two-shape response (activation record vs. activation id).
///
/// `spec.md` §4.1. No retries at this layer — invocation is not idempotent —
/// so every failure mode (non-2xx/202 status, malformed body, transport
/// error) collapses into `ActivationOutcome::Failure` rather than an `Err`.
#[derive(Clone)]
pub struct ActivationClient {
    http: reqwest::Client,
    host_base: String,
    api_version: String,
}

impl ActivationClient {
    pub fn new(http: reqwest::Client, host_base: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            http,
            host_base: host_base.into(),
            api_version: api_version.into(),
        }
    }

    /// `package` is `None` for an action addressed directly under the
    /// namespace (`/actions/<action>`), as trigger rules may do.
    fn invoke_url(&self, namespace: &str, package: Option<&str>, action: &str) -> String {
        let action_path = match package {
            Some(package) => format!("{package}/{action}"),
            None => action.to_string(),
        };
        format!(
            "{}/api/{}/namespaces/{}/actions/{}?blocking=true",
            self.host_base.trim_end_matches('/'),
            self.api_version,
            namespace,
            action_path,
        )
    }

    /// `body` must be a JSON object — the caller (`ParameterMerger`) is
    /// responsible for that invariant.
    pub async fn invoke(
        &self,
        credentials: &AuthKey,
        namespace: &str,
        package: Option<&str>,
        action: &str,
        body: Value,
    ) -> ActivationOutcome {
        let url = self.invoke_url(namespace, package, action);
        debug!(url = %url, "invoking action");

        let response = match self
            .http
            .post(&url)
            .basic_auth(&credentials.uuid, Some(&credentials.key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                return ActivationOutcome::Failure(FailureCause::new(None, format!("transport error: {err}")));
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => match response.json::<Value>().await {
                Ok(record) if record.is_object() => ActivationOutcome::Success(record),
                Ok(other) => ActivationOutcome::Failure(FailureCause::new(
                    Some(status.as_u16()),
                    format!("expected a JSON object, got {other}"),
                )),
                Err(err) => ActivationOutcome::Failure(FailureCause::new(
                    Some(status.as_u16()),
                    format!("failed to parse activation record: {err}"),
                )),
            },
            StatusCode::ACCEPTED => match response.json::<Value>().await {
                Ok(body) => match body.get("activationId").and_then(Value::as_str) {
                    Some(id) => ActivationOutcome::Pending(id.to_string()),
                    None => ActivationOutcome::Failure(FailureCause::new(
                        Some(status.as_u16()),
                        "202 response missing activationId".to_string(),
                    )),
                },
                Err(err) => ActivationOutcome::Failure(FailureCause::new(
                    Some(status.as_u16()),
                    format!("failed to parse pending response: {err}"),
                )),
            },
            other => {
                let text = response.text().await.unwrap_or_default();
                let parsed = serde_json::from_str::<Value>(&text).ok();
                let message = parsed
                    .as_ref()
                    .and_then(|body| body.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(text);
                let activation_id = parsed
                    .as_ref()
                    .and_then(|body| body.get("activationId"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let mut cause = FailureCause::new(Some(other.as_u16()), message);
                if let Some(id) = activation_id {
                    cause = cause.with_activation_id(id);
                }
                ActivationOutcome::Failure(cause)
            }
        }
    }
}
