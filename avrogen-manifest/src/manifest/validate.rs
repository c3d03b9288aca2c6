//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest tables, so nested validation can report where a
/// name was found.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "avrogen.toml");
/// ctx.push("groupings").validate_name("integration", "grouping")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["avro", "output"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "grouping in 'groupings'" or just "language" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                find_name_span(self.source.src(), name),
            ));
        }
        Ok(())
    }

    /// Error for a name declared twice, pointing at its last occurrence.
    pub fn duplicate(&self, name: &str, kind: &str) -> Box<Error> {
        let span = find_last_quoted_span(self.source.src(), name)
            .or_else(|| find_name_span(self.source.src(), name));
        self.source.duplicate_error(name, kind, span)
    }

    /// Error for a reference to a grouping that was never declared.
    pub fn unknown_grouping(&self, name: &str) -> Box<Error> {
        self.source
            .unknown_grouping_error(name, find_name_span(self.source.src(), name))
    }
}

/// Find the span of a name in the TOML source.
///
/// Searches for table headers (`[avro.output.name]`), dotted keys
/// (`avro.output.name.source`) and quoted array entries (`"name"`).
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns_skip_1 = [format!(".{}]", name), format!(".{}.", name)];

    for pattern in &patterns_skip_1 {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            let start = pos + 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

/// Find the span of the last quoted occurrence of a name.
fn find_last_quoted_span(src: &str, name: &str) -> Option<SourceSpan> {
    ['"', '\'']
        .into_iter()
        .filter_map(|quote| src.rfind(&format!("{quote}{name}{quote}")))
        .max()
        .map(|pos| SourceSpan::from((pos + 1, name.len())))
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
///
/// Names may contain dashes (e.g., "integration-test"); they are
/// Pascal-cased when composing step names.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some(_) => return Some("name must start with a letter"),
        None => return Some("name cannot be empty"),
    }

    let mut prev_was_dash = false;

    for c in chars {
        if c == '-' {
            if prev_was_dash {
                return Some("name cannot contain consecutive dashes");
            }
            prev_was_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            prev_was_dash = false;
        } else {
            return Some("name must contain only letters, numbers, underscores, and dashes");
        }
    }

    if prev_was_dash {
        return Some("name cannot end with a dash");
    }

    None
}
