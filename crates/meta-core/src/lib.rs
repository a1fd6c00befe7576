//! Shared domain types, error handling and tracing bootstrap for the meta
//! gateway: the pieces every other `meta-*` crate depends on.

mod activation;
mod annotations;
mod entity_path;
mod error;
mod identity;
mod logline;
mod ordered_map;
mod package;
mod parameters;
mod trigger;
mod trigger_activation;
mod tracing_init;

pub use activation::{ActivationOutcome, FailureCause};
pub use annotations::{AnnotationValue, Annotations};
pub use entity_path::{FullyQualifiedName, ParseError as EntityPathParseError};
pub use error::AppError;
pub use identity::{AuthKey, Identity};
pub use logline::{format_log_line, LogLevel};
pub use ordered_map::OrderedMap;
pub use package::{Action, Package};
pub use parameters::Parameters;
pub use tracing_init::init_tracing;
pub use trigger::{Rule, RuleStatus, Trigger};
pub use trigger_activation::TriggerActivation;
