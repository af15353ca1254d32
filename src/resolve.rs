//! URL resolution
//!
//! Substitutes placeholders in an operation's path template using a request
//! context and prepends the base URL.

use crate::config::Environment;
use crate::error::Result;
use crate::registry::Operation;
use crate::template::{self, RequestContext};

/// Resolve an operation against a base URL and request context into a
/// fully-qualified URL.
pub fn resolve_url(base_url: &str, operation: Operation, ctx: &RequestContext) -> Result<String> {
    let path = template::render(operation.descriptor().path, ctx)?;

    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(format!("{base}/{path}"))
}

/// Resolve an operation against a named environment's base URL.
pub fn resolve_for_environment(
    environment: Environment,
    operation: Operation,
    ctx: &RequestContext,
) -> Result<String> {
    resolve_url(environment.base_url(), operation, ctx)
}
