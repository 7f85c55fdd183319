use {
    serde::Serialize,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Generated policies only ever grant access.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    #[default]
    Allow,
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
        }
    }
}
