//! Configuration file parsing.
//!
//! Each non-comment line holds up to three tab-separated columns:
//!
//! ```text
//! condition<TAB>element[:attr][; style="class-or-style"]<TAB>content
//! ```

use std::borrow::Cow;

use super::{Content, Directive, GeneratedElement, Trigger};
use crate::error::HtmlVisError;

/// Parse configuration text into directives, in declaration order.
///
/// Lines starting with `#` and blank lines are skipped.
///
/// # Errors
///
/// Returns [`HtmlVisError::ConfigSyntax`] for a malformed triggering
/// condition or a missing generated element.
pub fn parse_config(text: &str) -> Result<Vec<Directive>, HtmlVisError> {
    let mut directives = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        directives.push(parse_line(index + 1, line)?);
    }

    tracing::debug!(count = directives.len(), "Parsed htmlvis config");
    Ok(directives)
}

fn parse_line(line_no: usize, line: &str) -> Result<Directive, HtmlVisError> {
    let line = normalize_first_separator(line);
    let mut fields = line.split('\t');

    let trigger_field = fields.next().unwrap_or_default();
    let trigger = Trigger::parse(trigger_field)
        .map_err(|message| HtmlVisError::config_syntax(line_no, trigger_field, message))?;

    let element_field = fields.next().unwrap_or_default();
    let element = GeneratedElement::parse(element_field).ok_or_else(|| {
        HtmlVisError::config_syntax(line_no, &line, "missing generated element")
    })?;

    let content = Content::parse(fields.next().unwrap_or_default());

    let extra = fields.filter(|f| !f.trim().is_empty()).count();
    if extra > 0 {
        tracing::warn!(line = line_no, extra, "Ignoring extra columns in htmlvis config");
    }

    Ok(Directive {
        trigger,
        element,
        content,
        line: line_no,
    })
}

/// Turn the first whitespace character into a tab.
///
/// Some configs separate the first column with a space instead of a tab.
fn normalize_first_separator(line: &str) -> Cow<'_, str> {
    match line.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) if c != '\t' => {
            Cow::Owned(format!("{}\t{}", &line[..i], &line[i + c.len_utf8()..]))
        }
        _ => Cow::Borrowed(line),
    }
}
