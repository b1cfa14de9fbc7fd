use thiserror::Error;

/// Errors produced while loading a survey definition or scoring answers.
///
/// Loading is fail-fast: the first invalid field aborts the whole load, and
/// the error carries the chain of enclosing scopes (scale name, scale group)
/// so the message alone pinpoints the offending part of the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurveyError {
    /// A field is missing, has the wrong type, or is out of its allowed range.
    #[error("{}invalid or missing field \"{field}\"", scope_prefix(.context))]
    InvalidField {
        field: &'static str,
        /// Enclosing scopes, innermost first (e.g. `scale "L"`, `primary_scales`).
        context: Vec<String>,
    },

    /// `correction_scale` names a scale that is not one of the additional scales.
    #[error("correction scale \"{0}\" not found among additional scales")]
    UnknownReference(String),

    /// The answer sequence does not match the survey's statement count.
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
}

impl SurveyError {
    pub(crate) fn invalid_field(field: &'static str) -> Self {
        SurveyError::InvalidField {
            field,
            context: Vec::new(),
        }
    }

    /// Wrap the error with an enclosing scope name as it propagates outward.
    /// Only `InvalidField` accumulates context; the other kinds already name
    /// their subject.
    pub(crate) fn in_scope(mut self, scope: impl Into<String>) -> Self {
        if let SurveyError::InvalidField { context, .. } = &mut self {
            context.push(scope.into());
        }
        self
    }
}

/// Render accumulated scopes outermost-first as message prefixes,
/// e.g. `primary_scales: scale "L": `.
fn scope_prefix(context: &[String]) -> String {
    context.iter().rev().fold(String::new(), |mut out, scope| {
        out.push_str(scope);
        out.push_str(": ");
        out
    })
}
