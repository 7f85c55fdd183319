use {
    crate::{
        permission::CapabilityAxis, ActionCatalog, EcrAdapter, PolicyGenError, S3Adapter, ServiceAdapter,
        TemplateCatalog,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const S3_AXES: &[CapabilityAxis] = &[
    CapabilityAxis::new("list", &["ListBucket"]),
    CapabilityAxis::new("read", &["GetObject"]),
    CapabilityAxis::new("write", &["PutObject", "DeleteObject"]),
];

/// Every service a policy can be generated for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ServiceKind {
    /// Object storage (S3).
    S3,

    /// Container registry (ECR).
    Ecr,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [Self::S3, Self::Ecr];

    /// The IAM namespace used to prefix action names and to build ARNs.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Ecr => "ecr",
        }
    }

    /// Positions of the bit-flag permission grammar, or an empty slice if the service does not accept flags.
    pub fn capability_axes(&self) -> &'static [CapabilityAxis] {
        match self {
            Self::S3 => S3_AXES,
            Self::Ecr => &[],
        }
    }

    /// Create an unconfigured adapter for this service.
    pub fn adapter<'a>(
        &self,
        actions: &'a ActionCatalog,
        templates: &'a TemplateCatalog,
    ) -> Box<dyn ServiceAdapter + 'a> {
        match self {
            Self::S3 => Box::new(S3Adapter::new(actions, templates)),
            Self::Ecr => Box::new(EcrAdapter::new(actions, templates)),
        }
    }
}

impl Display for ServiceKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.namespace())
    }
}

impl FromStr for ServiceKind {
    type Err = PolicyGenError;

    /// Service names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|service| service.namespace().eq_ignore_ascii_case(name))
            .ok_or_else(|| PolicyGenError::UnknownService(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{ActionCatalog, PolicyGenError, ServiceKind, TemplateCatalog},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_from_str() {
        assert_eq!(ServiceKind::from_str("s3").unwrap(), ServiceKind::S3);
        assert_eq!(ServiceKind::from_str("S3").unwrap(), ServiceKind::S3);
        assert_eq!(ServiceKind::from_str("ECR").unwrap(), ServiceKind::Ecr);
        assert_eq!(ServiceKind::from_str(" Ecr ").unwrap(), ServiceKind::Ecr);
        assert_eq!(ServiceKind::from_str("ec2").unwrap_err(), PolicyGenError::UnknownService("ec2".to_string()));
    }

    #[test_log::test]
    fn test_axes() {
        let axes = ServiceKind::S3.capability_axes();
        assert_eq!(axes.iter().map(|a| a.name()).collect::<Vec<_>>(), vec!["list", "read", "write"]);
        assert_eq!(axes[2].actions(), &["PutObject", "DeleteObject"]);
        assert!(ServiceKind::Ecr.capability_axes().is_empty());

        // Every axis action must be a catalog action.
        for axis in axes {
            for action in axis.actions() {
                assert!(ActionCatalog::builtin().is_valid_action("s3", action));
            }
        }
    }

    #[test_log::test]
    fn test_adapter_factory() {
        for service in ServiceKind::ALL {
            let adapter = service.adapter(ActionCatalog::builtin(), TemplateCatalog::builtin());
            assert_eq!(adapter.service(), service);
            assert!(!adapter.is_configured());
            assert_eq!(service.to_string(), service.namespace());
        }
    }
}
