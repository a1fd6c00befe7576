use crate::{Annotations, FullyQualifiedName, Parameters};

/// A package document as loaded from the entity store.
#[derive(Debug, Clone)]
pub struct Package {
    pub namespace: String,
    pub name: String,
    pub parameters: Parameters,
    pub annotations: Annotations,
    pub publish: bool,
}

impl Package {
    pub fn fully_qualified_name(&self) -> FullyQualifiedName {
        FullyQualifiedName::new(self.namespace.clone(), None, self.name.clone())
    }

    /// A package is meta-routable iff it carries `meta=true` and at least
    /// one per-verb annotation among `{get, post, delete}`.
    pub fn is_meta_routable(&self) -> bool {
        self.annotations.is_truthy_bool("meta")
            && ["get", "post", "delete"]
                .iter()
                .any(|verb| self.annotations.string_value(verb).is_some())
    }

    /// Look up the action name mapped to `verb` (expected already lower-cased).
    pub fn action_for_verb(&self, verb: &str) -> Option<&str> {
        self.annotations.string_value(verb)
    }
}

/// A resolved action, as loaded from the action store — only the fields
/// `ParameterMerger` needs.
#[derive(Debug, Clone)]
pub struct Action {
    pub namespace: String,
    pub name: String,
    pub parameters: Parameters,
}
