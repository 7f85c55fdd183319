use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Errors raised while turning service options into a policy document.
///
/// Every variant is terminal for the current invocation; nothing here is transient.
#[derive(Debug, Eq, PartialEq)]
pub enum PolicyGenError {
    /// A required option was absent or empty.
    MissingField(String),

    /// An option was present but failed its validator.
    InvalidFormat {
        field: String,
        value: String,
    },

    /// An explicit action is not in the service's action catalog.
    UnknownAction {
        service: String,
        action: String,
    },

    /// A template name was not found for the service.
    UnknownTemplate {
        service: String,
        template: String,
    },

    /// A resource identifier could not be built because a component was missing.
    IncompleteAddress(String),

    /// Generation was attempted before the adapter accepted a full set of options.
    NotConfigured(String),

    /// No adapter is registered under the requested service name.
    UnknownService(String),

    /// The document could not be written out.
    Output(String),
}

impl PolicyGenError {
    pub(crate) fn invalid_format<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Display for PolicyGenError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::MissingField(field) => write!(f, "Missing required option: {}", field),
            Self::InvalidFormat {
                field,
                value,
            } => write!(f, "Invalid value for {}: {:?}", field, value),
            Self::UnknownAction {
                service,
                action,
            } => write!(f, "Unknown {} action: {}", service, action),
            Self::UnknownTemplate {
                service,
                template,
            } => write!(f, "Unknown {} template: {}", service, template),
            Self::IncompleteAddress(component) => write!(f, "Incomplete resource address: missing {}", component),
            Self::NotConfigured(service) => write!(f, "The {} service has not been configured", service),
            Self::UnknownService(service) => write!(f, "Unsupported service: {}", service),
            Self::Output(message) => write!(f, "Failed to write policy: {}", message),
        }
    }
}

impl Error for PolicyGenError {}

pub type Result<T> = std::result::Result<T, PolicyGenError>;
