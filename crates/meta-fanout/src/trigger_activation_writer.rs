use std::sync::Arc;

use chrono::Utc;
use meta_core::{format_log_line, Identity, LogLevel, Trigger, TriggerActivation};
use meta_store::ActivationStore;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use crate::rule_fanout::RuleFanout;

/// C7: generates the trigger activation id up front, runs the rule fan-out
/// in the background, and persists exactly one [`TriggerActivation`] once
/// it completes.
pub struct TriggerActivationWriter {
    activation_store: Arc<dyn ActivationStore>,
    rule_fanout: RuleFanout,
}

impl TriggerActivationWriter {
    pub fn new(activation_store: Arc<dyn ActivationStore>, rule_fanout: RuleFanout) -> Self {
        Self { activation_store, rule_fanout }
    }

    /// Returns the activation id immediately — the caller is expected to
    /// respond `202 Accepted` with it (`spec.md` §4.7) — while fan-out and
    /// the eventual store write continue on a spawned task.
    pub fn fire(&self, trigger: Trigger, payload: Option<Value>, identity: Identity) -> String {
        let activation_id = Uuid::new_v4().to_string();
        let store = self.activation_store.clone();
        let fanout = self.rule_fanout.clone();
        let id_for_task = activation_id.clone();

        tokio::spawn(async move {
            let start = Utc::now();
            let outcomes = fanout.fan_out(&trigger, payload, &identity.authkey).await;
            let end = Utc::now();

            let logs: Vec<String> = outcomes
                .iter()
                .map(|outcome| format_log_line(end, outcome.level, &trigger.name, &outcome.rule_name, &outcome.action_name, &outcome.message))
                .collect();
            let any_error = outcomes.iter().any(|outcome| outcome.level == LogLevel::Error);

            let activation = TriggerActivation {
                namespace: trigger.namespace.clone(),
                entity_name: trigger.name.clone(),
                subject: identity.subject.clone(),
                activation_id: id_for_task.clone(),
                start,
                end,
                response: Some(json!({ "status": if any_error { "error" } else { "success" } })),
                version: "0.0.1".to_string(),
                duration_ms: Some((end - start).num_milliseconds()),
                logs,
            };

            if let Err(err) = store.put_trigger_activation(activation).await {
                error!(activation_id = %id_for_task, trigger = %trigger.name, error = %err, "failed to persist trigger activation");
            }
        });

        activation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meta_client::ActivationClient;
    use meta_core::{Annotations, AuthKey, FullyQualifiedName, Parameters, Rule, RuleStatus};
    use meta_store::InMemoryStore;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn trigger_with_no_rules() -> Trigger {
        Trigger {
            namespace: "guest".into(),
            name: "mytrigger".into(),
            parameters: Parameters::new(),
            annotations: Annotations::new(),
            rules: vec![],
        }
    }

    #[tokio::test]
    async fn fire_persists_exactly_one_activation_with_empty_logs_when_no_rules_are_active() {
        let store = Arc::new(InMemoryStore::new());
        let activation_client = ActivationClient::new(reqwest::Client::new(), "http://127.0.0.1:1", "v1");
        let writer = TriggerActivationWriter::new(store.clone(), RuleFanout::new(activation_client));

        let identity = Identity::new("guest", "guest", AuthKey { uuid: "u".into(), key: "k".into() });
        let activation_id = writer.fire(trigger_with_no_rules(), None, identity);
        assert!(!activation_id.is_empty());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let stored = store.trigger_activations().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].activation_id, activation_id);
        assert!(stored[0].logs.is_empty());
    }

    #[tokio::test]
    async fn fire_returns_immediately_without_waiting_for_fan_out() {
        let store = Arc::new(InMemoryStore::new());
        let activation_client = ActivationClient::new(reqwest::Client::new(), "http://127.0.0.1:1", "v1");
        let writer = TriggerActivationWriter::new(store.clone(), RuleFanout::new(activation_client));

        let trigger = Trigger {
            namespace: "guest".into(),
            name: "mytrigger".into(),
            parameters: Parameters::new(),
            annotations: Annotations::new(),
            rules: vec![Rule {
                name: "r1".into(),
                action: FullyQualifiedName::new("whisk.system", None, "a1"),
                status: RuleStatus::Active,
            }],
        };
        let identity = Identity::new("guest", "guest", AuthKey { uuid: "u".into(), key: "k".into() });

        let started = tokio::time::Instant::now();
        let _ = writer.fire(trigger, None, identity);
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    /// `spec.md` §8 scenario #10: the persisted activation carries exactly 3
    /// log lines, in declaration order, with levels INFO/ERROR/ERROR.
    #[tokio::test]
    async fn fire_persists_three_ordered_logs_for_a_mixed_outcome_trigger() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/namespaces/whisk.system/actions/a1-action"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"activationId": "AID1"})))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/namespaces/whisk.system/actions/a2-action"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such action"})))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/namespaces/whisk.system/actions/a3-action"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::builder().timeout(Duration::from_millis(50)).build().unwrap();
        let activation_client = ActivationClient::new(http, mock_server.uri(), "v1");
        let store = Arc::new(InMemoryStore::new());
        let writer = TriggerActivationWriter::new(store.clone(), RuleFanout::new(activation_client));

        let rule = |name: &str| Rule {
            name: name.to_string(),
            action: FullyQualifiedName::new("whisk.system", None, format!("{name}-action")),
            status: RuleStatus::Active,
        };
        let trigger = Trigger {
            namespace: "guest".into(),
            name: "mytrigger".into(),
            parameters: Parameters::new(),
            annotations: Annotations::new(),
            rules: vec![rule("r1"), rule("r2"), rule("r3")],
        };
        let identity = Identity::new("guest", "guest", AuthKey { uuid: "u".into(), key: "k".into() });

        let activation_id = writer.fire(trigger, None, identity);
        tokio::time::sleep(Duration::from_millis(500)).await;

        let stored = store.trigger_activations().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].activation_id, activation_id);
        assert_eq!(stored[0].logs.len(), 3);
        assert!(stored[0].logs[0].contains("INFO"));
        assert!(stored[0].logs[1].contains("ERROR"));
        assert!(stored[0].logs[2].contains("ERROR"));
    }
}
