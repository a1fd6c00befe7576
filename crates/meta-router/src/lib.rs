//! Meta-package resolution (C3), parameter merging (C4), HTTP dispatch
//! (C5) and response/error translation (C8) for the meta gateway.

mod error_translator;
mod merger;
mod resolver;
mod router;

pub use error_translator::{numeric_code, translate_merge_error, translate_outcome, translate_resolve_error};
pub use merger::{MergeError, ParameterMerger, RequestParameters};
pub use resolver::{PackageResolver, ResolveError, ResolvedAction};
pub use router::{meta_router, MetaRouterState};
