//! Template compiler
//!
//! Parses a template string into an ordered segment sequence ahead of
//! querying, so per-query rendering never re-scans the template.
//! Variable markers are doubled delimiter characters (`{{path}}` with
//! the defaults); a lone delimiter character is ordinary literal text.

use crate::error::SearchError;

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    Literal(String),
    /// Dot-path components addressing a value inside a record.
    Variable(Vec<String>),
}

/// Ordered segment sequence. Segments partition the template: literals
/// carry the text between variable markers verbatim, exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    segments: Vec<TemplateSegment>,
}

impl CompiledTemplate {
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// True if the template contains no variable segments.
    ///
    /// Host-facing convenience: a literal template renders identically
    /// for every record, so callers can render once and reuse the
    /// result instead of rendering per match.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, TemplateSegment::Literal(_)))
    }
}

/// Compile a template against the given delimiter characters.
///
/// Fails with `MalformedTemplate` when a variable segment is opened but
/// never closed, and when a doubled open delimiter appears inside a
/// variable segment (nesting is not supported and is reported rather
/// than silently truncated).
pub fn compile(
    template: &str,
    open_delim: char,
    close_delim: char,
) -> Result<CompiledTemplate, SearchError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        if ch == open_delim && chars.peek().map(|&(_, next)| next) == Some(open_delim) {
            chars.next();
            if !literal.is_empty() {
                segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(compile_variable(
                &mut chars,
                open_delim,
                close_delim,
                position,
            )?);
        } else {
            literal.push(ch);
        }
    }

    if !literal.is_empty() {
        segments.push(TemplateSegment::Literal(literal));
    }

    Ok(CompiledTemplate { segments })
}

/// Consume a variable segment's content up to the doubled close
/// delimiter. `open_position` is the byte offset of the opening marker,
/// used for error reporting.
fn compile_variable(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open_delim: char,
    close_delim: char,
    open_position: usize,
) -> Result<TemplateSegment, SearchError> {
    let mut content = String::new();

    while let Some((_, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, next)| next);
        if ch == close_delim && next == Some(close_delim) {
            chars.next();
            let path = content.split('.').map(str::to_string).collect();
            return Ok(TemplateSegment::Variable(path));
        }
        if ch == open_delim && next == Some(open_delim) {
            return Err(SearchError::MalformedTemplate {
                detail: "nested variable segment".to_string(),
                position: open_position,
            });
        }
        content.push(ch);
    }

    Err(SearchError::MalformedTemplate {
        detail: "unclosed variable segment".to_string(),
        position: open_position,
    })
}
