use {
    crate::{display_json, serutil::StringLikeList, PolicyGenError},
    log::debug,
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

pub type ActionList = StringLikeList<Action>;

display_json!(ActionList);

/// A fully-qualified action such as `ecr:PutImage`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Action {
    service: String,
    action: String,
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, PolicyGenError> {
        let service = service.into();
        let action = action.into();
        let invalid = |service: &str, action: &str| PolicyGenError::UnknownAction {
            service: service.to_string(),
            action: action.to_string(),
        };

        if service.is_empty() {
            debug!("Action '{service}:{action}' has an empty service.");
            return Err(invalid(&service, &action));
        }

        if action.is_empty() {
            debug!("Action '{service}:{action}' has an empty action.");
            return Err(invalid(&service, &action));
        }

        if !service.is_ascii() || !action.is_ascii() {
            debug!("Action '{service}:{action}' is not ASCII.");
            return Err(invalid(&service, &action));
        }

        for (i, c) in service.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid service.");
                return Err(invalid(&service, &action));
            }
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid action.");
                return Err(invalid(&service, &action));
            }
        }

        Ok(Action {
            service,
            action,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl FromStr for Action {
    type Err = PolicyGenError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        match v.split_once(':') {
            Some((service, action)) if !action.contains(':') => Action::new(service, action),
            _ => Err(PolicyGenError::UnknownAction {
                service: String::new(),
                action: v.to_string(),
            }),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.service, self.action)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
