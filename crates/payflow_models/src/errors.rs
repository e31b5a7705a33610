use error_stack::{Context, Report};

use crate::consts::ParamKey;

pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures the SDK recognises and reports as-is.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Gateway response is malformed")]
    MalformedResponse,
    #[error("Length tag of response parameter {key} does not match its value")]
    InvalidLengthTag { key: String },
    #[error("Response parameter {key} appears more than once")]
    DuplicateParam { key: String },
    #[error("Communication with the gateway failed with result code {code}")]
    CommunicationFailure { code: i32 },
    #[error("Response contains unrecognized parameters: {}", keys.join(", "))]
    UnrecognizedParams { keys: Vec<String> },
}

/// Failure surface of extracting a view from a response bag.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DataObjectError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Failed to map response parameter {key}")]
    Mapping { key: ParamKey },
}

impl DataObjectError {
    pub fn mapping(key: ParamKey) -> Self {
        Self::Mapping { key }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Application configuration error: {0}")]
    ConfigurationError(#[from] config::ConfigError),
}

/// Failure types a field converter may raise. Anything listed here that is not a
/// [`DomainError`] is wrapped as a mapping failure by [`FieldResultExt`].
pub trait FieldCause: Context {}

impl FieldCause for DomainError {}
impl FieldCause for std::num::ParseIntError {}
impl FieldCause for std::num::ParseFloatError {}

pub trait FieldResultExt<T> {
    /// Re-signals a [`DomainError`] found anywhere in the report unchanged, and wraps
    /// everything else into [`DataObjectError::Mapping`] for `key`.
    fn classify_field(self, key: ParamKey) -> CustomResult<T, DataObjectError>;
}

impl<T, C> FieldResultExt<T> for Result<T, Report<C>>
where
    C: FieldCause,
{
    fn classify_field(self, key: ParamKey) -> CustomResult<T, DataObjectError> {
        self.map_err(|report| match report.downcast_ref::<DomainError>().cloned() {
            Some(error) => report.change_context(DataObjectError::Domain(error)),
            None => report.change_context(DataObjectError::mapping(key)),
        })
    }
}

/// Already classified; passed through as-is.
impl<T> FieldResultExt<T> for CustomResult<T, DataObjectError> {
    fn classify_field(self, _key: ParamKey) -> CustomResult<T, DataObjectError> {
        self
    }
}
