use super::Error;

/// Error when a property cannot be resolved against the assembled mappings.
///
/// Raised while generating statements, for example when a map or many-to-many
/// property points at a type that has no mapping on the data source, or when a
/// statement must be keyed by an identity that the hierarchy does not provide.
/// Only the statement being generated fails.
#[derive(Debug)]
pub(super) struct ResolutionAnomaly {
    ty: Box<str>,
    property: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ResolutionAnomaly {}

impl core::fmt::Display for ResolutionAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot resolve `{}::{}`: {}",
            self.ty, self.property, self.message
        )
    }
}

impl Error {
    /// Creates a resolution anomaly for `property` on the type named `ty`.
    pub fn resolution_anomaly(
        ty: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ResolutionAnomaly(ResolutionAnomaly {
            ty: ty.into().into(),
            property: property.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a resolution anomaly.
    pub fn is_resolution_anomaly(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ResolutionAnomaly(_))
    }
}
