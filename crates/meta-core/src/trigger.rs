use crate::{Annotations, FullyQualifiedName, Parameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Active,
    Inactive,
}

/// One rule mapping a trigger to an action invocation (`spec.md` §3:
/// `rules: map[ruleName -> {action:FQN, status}]`).
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub action: FullyQualifiedName,
    pub status: RuleStatus,
}

/// A fully loaded trigger entity.
///
/// `rules` preserves the declaration order from the entity store document —
/// `spec.md` §4.6's "Ordering" note requires fan-out log lines to come out
/// in "rule declaration order", not completion order or a derived sort, so
/// the order rules are loaded in is significant and is carried verbatim
/// rather than collapsed into a `HashMap`.
#[derive(Debug, Clone)]
pub struct Trigger {
    pub namespace: String,
    pub name: String,
    pub parameters: Parameters,
    pub annotations: Annotations,
    pub rules: Vec<Rule>,
}

impl Trigger {
    /// Rules with `status == ACTIVE`, in declaration order.
    pub fn active_rules(&self) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.status == RuleStatus::Active).collect()
    }
}
