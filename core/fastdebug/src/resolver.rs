//! Pairing of call-site source text with evaluated values.
//!
//! Rust cannot walk back from a running frame to the expressions that
//! produced its arguments, so the source text is captured while the call is
//! compiled: [`fd!`](crate::fd) matches every argument as an `expr` fragment
//! and records it with `stringify!`. Nested calls, commas inside delimiters and
//! string literals are therefore split by the parser, and two calls on one line
//! are two separate expansions.
//!
//! This module only has to line the captured texts up with the values and
//! tidy them for display.

use crate::{error::ResolutionError, value::Value};

/// One argument of a call: its source text and its classified value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument {
    /// The argument expression as written at the call site.
    pub source: String,
    /// The evaluated argument.
    pub value: Value,
}

/// Pairs `sources` with `values` positionally.
///
/// # Errors
///
/// Fails when the two lists differ in length, or when a source text is blank.
pub fn resolve(
    sources: &[&str],
    values: Vec<Value>,
) -> Result<Vec<ResolvedArgument>, ResolutionError> {
    if sources.len() != values.len() {
        return Err(ResolutionError::ArityMismatch {
            sources: sources.len(),
            values: values.len(),
        });
    }

    sources
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (source, value))| {
            let source = normalize_source(source);
            if source.is_empty() {
                return Err(ResolutionError::EmptySource { index });
            }
            Ok(ResolvedArgument { source, value })
        })
        .collect()
}

/// Tidies captured source text.
///
/// The first line keeps its content; continuation lines lose their common
/// leading indentation. Surrounding whitespace is trimmed.
#[must_use]
pub fn normalize_source(raw: &str) -> String {
    let raw = raw.trim();
    match raw.split_once('\n') {
        None => raw.to_string(),
        Some((first, rest)) => {
            let rest = textwrap::dedent(rest);
            format!("{}\n{}", first.trim_end(), rest.trim_end())
        }
    }
}
