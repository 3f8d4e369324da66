use super::Error;

/// Error when an object query contains an expression the translator cannot
/// represent as SQL.
///
/// The whole translation of that query is aborted; other queries are not
/// affected.
#[derive(Debug)]
pub(super) struct TranslationUnsupported {
    what: Box<str>,
    expr: Box<str>,
}

impl std::error::Error for TranslationUnsupported {}

impl core::fmt::Display for TranslationUnsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported {} in query: {}", self.what, self.expr)
    }
}

impl Error {
    /// Creates a translation error. `what` names the offending construct and
    /// `expr` describes the expression.
    pub fn translation_unsupported(what: impl Into<String>, expr: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TranslationUnsupported(
            TranslationUnsupported {
                what: what.into().into(),
                expr: expr.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a translation error.
    pub fn is_translation_unsupported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TranslationUnsupported(_))
    }
}
