//! Concurrent rule fan-out (C6) and trigger activation persistence (C7)
//! for the meta gateway, plus the HTTP endpoint that fires a trigger.

mod rule_fanout;
mod trigger_activation_writer;
mod trigger_handler;

pub use rule_fanout::{RuleFanout, RuleOutcome};
pub use trigger_activation_writer::TriggerActivationWriter;
pub use trigger_handler::{trigger_router, TriggerFanoutState};
