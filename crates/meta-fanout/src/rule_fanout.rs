use meta_client::ActivationClient;
use meta_core::{ActivationOutcome, AuthKey, LogLevel, Rule, Trigger};
use serde_json::Value;

/// One rule's classified outcome, in the trigger's declared rule order.
pub struct RuleOutcome {
    pub rule_name: String,
    pub action_name: String,
    pub level: LogLevel,
    pub message: String,
}

/// C6: fans a fired trigger out to every active rule's mapped action,
/// concurrently, using the firing caller's own credentials.
#[derive(Clone)]
pub struct RuleFanout {
    activation_client: ActivationClient,
}

impl RuleFanout {
    pub fn new(activation_client: ActivationClient) -> Self {
        Self { activation_client }
    }

    /// `payload` overrides `trigger.parameters` (`spec.md` §4.6 step 2); the
    /// merged object becomes the body for every rule's invocation.
    pub async fn fan_out(&self, trigger: &Trigger, payload: Option<Value>, caller_credentials: &AuthKey) -> Vec<RuleOutcome> {
        let active_rules = trigger.active_rules();
        if active_rules.is_empty() {
            return Vec::new();
        }
        let body = merge_payload(trigger, payload);

        // Spawn one task per rule so all invocations run concurrently, then
        // await them in declaration order — completion order never leaks
        // into the collected results (`spec.md` §4.6 "Ordering").
        let handles: Vec<_> = active_rules
            .into_iter()
            .cloned()
            .map(|rule| {
                let client = self.activation_client.clone();
                let credentials = caller_credentials.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    let outcome = client
                        .invoke(&credentials, &rule.action.namespace, rule.action.package.as_deref(), &rule.action.name, body)
                        .await;
                    classify(&rule, outcome)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(outcome) => results.push(outcome),
                Err(join_err) => results.push(RuleOutcome {
                    rule_name: "unknown".to_string(),
                    action_name: "unknown".to_string(),
                    level: LogLevel::Error,
                    message: format!("rule invocation task panicked: {join_err}"),
                }),
            }
        }
        results
    }
}

fn merge_payload(trigger: &Trigger, payload: Option<Value>) -> Value {
    let mut merged = trigger.parameters.clone();
    if let Some(payload) = payload.as_ref().and_then(|v| meta_core::Parameters::from_json_object(v)) {
        merged = merged.merged_with(payload);
    }
    merged.to_json_object()
}

fn classify(rule: &Rule, outcome: ActivationOutcome) -> RuleOutcome {
    let (level, message) = match outcome {
        ActivationOutcome::Success(record) => {
            let activation_id = record.get("activationId").and_then(Value::as_str).unwrap_or("unknown");
            (LogLevel::Info, format!("invoked {}, activationId={activation_id}", rule.action.name))
        }
        ActivationOutcome::Pending(activation_id) => {
            (LogLevel::Info, format!("invoked {}, activationId={activation_id}", rule.action.name))
        }
        ActivationOutcome::Failure(cause) if cause.status == Some(404) => {
            (LogLevel::Error, "action not found".to_string())
        }
        ActivationOutcome::Failure(cause) => (LogLevel::Error, cause.message),
    };
    RuleOutcome {
        rule_name: rule.name.clone(),
        action_name: rule.action.name.clone(),
        level,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meta_core::{Annotations, AuthKey, FullyQualifiedName, Parameters, RuleStatus};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rule(name: &str, status: RuleStatus) -> Rule {
        Rule {
            name: name.to_string(),
            action: FullyQualifiedName::new("whisk.system", None, format!("{name}-action")),
            status,
        }
    }

    fn trigger(rules: Vec<Rule>) -> Trigger {
        Trigger {
            namespace: "guest".into(),
            name: "mytrigger".into(),
            parameters: Parameters::from_pairs([("x".to_string(), json!("X"))]),
            annotations: Annotations::new(),
            rules,
        }
    }

    #[test]
    fn no_active_rules_skips_fan_out_work() {
        let t = trigger(vec![rule("r1", RuleStatus::Inactive)]);
        assert!(t.active_rules().is_empty());
    }

    #[test]
    fn merge_payload_overrides_trigger_parameters() {
        let t = trigger(vec![]);
        let merged = merge_payload(&t, Some(json!({"x": "OVERRIDDEN", "y": "Y"})));
        assert_eq!(merged["x"], json!("OVERRIDDEN"));
        assert_eq!(merged["y"], json!("Y"));
    }

    #[test]
    fn classify_maps_404_to_action_not_found() {
        let r = rule("r1", RuleStatus::Active);
        let outcome = ActivationOutcome::Failure(meta_core::FailureCause::new(Some(404), "no such action"));
        let classified = classify(&r, outcome);
        assert_eq!(classified.level, LogLevel::Error);
        assert_eq!(classified.message, "action not found");
    }

    #[test]
    fn classify_maps_success_to_info_with_activation_id() {
        let r = rule("r1", RuleStatus::Active);
        let outcome = ActivationOutcome::Success(json!({"activationId": "AID"}));
        let classified = classify(&r, outcome);
        assert_eq!(classified.level, LogLevel::Info);
        assert!(classified.message.contains("AID"));
    }

    /// `spec.md` §8 scenario #10: a 3-rule fan-out with one success, one
    /// missing action, and one transport failure yields exactly 3 outcomes,
    /// in declaration order, with levels INFO/ERROR/ERROR.
    #[tokio::test]
    async fn fan_out_mixed_outcomes_in_declaration_order() {
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
        let fanout = RuleFanout::new(activation_client);

        let t = trigger(vec![
            rule("r1", RuleStatus::Active),
            rule("r2", RuleStatus::Active),
            rule("r3", RuleStatus::Active),
        ]);
        let credentials = AuthKey { uuid: "caller-uuid".into(), key: "caller-key".into() };

        let outcomes = fanout.fan_out(&t, None, &credentials).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].rule_name, "r1");
        assert_eq!(outcomes[0].level, LogLevel::Info);
        assert_eq!(outcomes[1].rule_name, "r2");
        assert_eq!(outcomes[1].level, LogLevel::Error);
        assert_eq!(outcomes[1].message, "action not found");
        assert_eq!(outcomes[2].rule_name, "r3");
        assert_eq!(outcomes[2].level, LogLevel::Error);
    }
}
