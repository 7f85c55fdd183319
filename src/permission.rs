use {
    crate::{Action, ActionCatalog, ActionList, PolicyGenError, ServiceKind, TemplateCatalog},
    log::{debug, trace},
};

const PERMISSION: &str = "permission";

/// One position of a bit-flag permission string and the actions it grants when set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CapabilityAxis {
    name: &'static str,
    actions: &'static [&'static str],
}

impl CapabilityAxis {
    pub const fn new(name: &'static str, actions: &'static [&'static str]) -> Self {
        Self {
            name,
            actions,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn actions(&self) -> &'static [&'static str] {
        self.actions
    }
}

/// A raw permission specification, classified but not yet checked against a catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PermissionSpec {
    /// Action names in the order given; each may carry the service prefix.
    ExplicitActions(Vec<String>),

    /// One `0`/`1` character per capability axis of the service.
    BitFlags(String),

    TemplateRef {
        service: String,
        template: String,
    },
}

impl PermissionSpec {
    /// Classify a permission string for a service.
    ///
    /// A template name wins over any permission string. Otherwise a string made only of `0` and `1` is a bit-flag
    /// string when the service declares capability axes, and anything else is a comma-separated action list.
    pub fn parse(service: ServiceKind, permission: Option<&str>, template: Option<&str>) -> Result<Self, PolicyGenError> {
        if let Some(template) = template.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(Self::TemplateRef {
                service: service.namespace().to_string(),
                template: template.to_string(),
            });
        }

        let permission = match permission.map(str::trim).filter(|p| !p.is_empty()) {
            Some(permission) => permission,
            None => return Err(PolicyGenError::MissingField(PERMISSION.to_string())),
        };

        let axes = service.capability_axes();
        if !axes.is_empty() && permission.bytes().all(|c| c == b'0' || c == b'1') {
            if permission.len() != axes.len() {
                debug!("Permission flags {permission:?} do not have {} positions", axes.len());
                return Err(PolicyGenError::invalid_format(PERMISSION, permission));
            }

            return Ok(Self::BitFlags(permission.to_string()));
        }

        Ok(Self::ExplicitActions(permission.split(',').map(|token| token.trim().to_string()).collect()))
    }
}

/// Fully-qualified actions in resolution order. Duplicates are kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NormalizedActions(Vec<Action>);

impl NormalizedActions {
    #[inline]
    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    /// The qualified names, e.g. `["ecr:PutImage"]`.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<NormalizedActions> for ActionList {
    fn from(actions: NormalizedActions) -> Self {
        ActionList::List(actions.0)
    }
}

/// Expand a permission specification into qualified actions for `service`.
///
/// Explicit action lists are checked against `catalog` and fail on the first unknown token. Template contents come
/// from `templates` verbatim.
pub fn resolve(
    service: ServiceKind,
    spec: &PermissionSpec,
    catalog: &ActionCatalog,
    templates: &TemplateCatalog,
) -> Result<NormalizedActions, PolicyGenError> {
    let namespace = service.namespace();

    let actions = match spec {
        PermissionSpec::TemplateRef {
            service: template_service,
            template,
        } => {
            trace!("Resolving template {template_service}/{template}");
            templates
                .lookup(template_service, template)?
                .iter()
                .map(|name| qualify(namespace, name))
                .collect::<Result<Vec<_>, _>>()?
        }

        PermissionSpec::BitFlags(flags) => {
            let axes = service.capability_axes();
            if flags.len() != axes.len() || !flags.bytes().all(|c| c == b'0' || c == b'1') {
                return Err(PolicyGenError::invalid_format(PERMISSION, flags.as_str()));
            }

            let mut actions = Vec::new();
            for (flag, axis) in flags.bytes().zip(axes) {
                if flag == b'1' {
                    trace!("Capability {} granted", axis.name());
                    for name in axis.actions() {
                        actions.push(qualify(namespace, name)?);
                    }
                }
            }
            actions
        }

        PermissionSpec::ExplicitActions(tokens) => {
            if tokens.is_empty() {
                return Err(PolicyGenError::MissingField(PERMISSION.to_string()));
            }

            let mut actions = Vec::with_capacity(tokens.len());
            for token in tokens {
                if token.is_empty() {
                    debug!("Empty action in permission list {tokens:?}");
                    return Err(PolicyGenError::invalid_format(PERMISSION, tokens.join(",")));
                }

                let bare = strip_namespace(namespace, token);
                if !catalog.is_valid_action(namespace, bare) {
                    debug!("Action {token:?} is not a known {namespace} action");
                    return Err(PolicyGenError::UnknownAction {
                        service: namespace.to_string(),
                        action: token.clone(),
                    });
                }

                actions.push(qualify(namespace, bare)?);
            }
            actions
        }
    };

    Ok(NormalizedActions(actions))
}

fn strip_namespace<'a>(namespace: &str, name: &'a str) -> &'a str {
    match name.split_once(':') {
        Some((prefix, bare)) if prefix == namespace => bare,
        _ => name,
    }
}

fn qualify(namespace: &str, name: &str) -> Result<Action, PolicyGenError> {
    Action::new(namespace, strip_namespace(namespace, name))
}

#[cfg(test)]
mod tests {
    use {
        super::{resolve, PermissionSpec},
        crate::{ActionCatalog, PolicyGenError, ServiceKind, TemplateCatalog},
        pretty_assertions::assert_eq,
    };

    fn resolve_str(service: ServiceKind, permission: &str) -> Result<Vec<String>, PolicyGenError> {
        let spec = PermissionSpec::parse(service, Some(permission), None)?;
        resolve(service, &spec, ActionCatalog::builtin(), TemplateCatalog::builtin()).map(|a| a.names())
    }

    #[test_log::test]
    fn test_parse_classification() {
        assert_eq!(
            PermissionSpec::parse(ServiceKind::S3, Some("101"), None).unwrap(),
            PermissionSpec::BitFlags("101".to_string())
        );
        assert_eq!(
            PermissionSpec::parse(ServiceKind::Ecr, Some(" PutImage , BatchGetImage "), None).unwrap(),
            PermissionSpec::ExplicitActions(vec!["PutImage".to_string(), "BatchGetImage".to_string()])
        );
        assert_eq!(
            PermissionSpec::parse(ServiceKind::Ecr, Some("PutImage"), Some("generic")).unwrap(),
            PermissionSpec::TemplateRef {
                service: "ecr".to_string(),
                template: "generic".to_string()
            }
        );

        // ECR has no capability axes, so digits are just an (unknown) action name.
        assert_eq!(
            PermissionSpec::parse(ServiceKind::Ecr, Some("111"), None).unwrap(),
            PermissionSpec::ExplicitActions(vec!["111".to_string()])
        );
    }

    #[test_log::test]
    fn test_parse_missing() {
        for permission in [None, Some(""), Some("   ")] {
            assert_eq!(
                PermissionSpec::parse(ServiceKind::Ecr, permission, None).unwrap_err(),
                PolicyGenError::MissingField("permission".to_string())
            );
        }
        assert_eq!(
            PermissionSpec::parse(ServiceKind::S3, None, Some(" ")).unwrap_err(),
            PolicyGenError::MissingField("permission".to_string())
        );
    }

    #[test_log::test]
    fn test_flag_length() {
        for flags in ["1", "11", "1111"] {
            assert_eq!(
                PermissionSpec::parse(ServiceKind::S3, Some(flags), None).unwrap_err(),
                PolicyGenError::InvalidFormat {
                    field: "permission".to_string(),
                    value: flags.to_string()
                }
            );
        }

        let spec = PermissionSpec::BitFlags("10".to_string());
        assert!(resolve(ServiceKind::S3, &spec, ActionCatalog::builtin(), TemplateCatalog::builtin()).is_err());
    }

    #[test_log::test]
    fn test_flags() {
        assert_eq!(resolve_str(ServiceKind::S3, "000").unwrap(), Vec::<String>::new());
        assert_eq!(resolve_str(ServiceKind::S3, "100").unwrap(), vec!["s3:ListBucket"]);
        assert_eq!(resolve_str(ServiceKind::S3, "010").unwrap(), vec!["s3:GetObject"]);
        assert_eq!(resolve_str(ServiceKind::S3, "001").unwrap(), vec!["s3:PutObject", "s3:DeleteObject"]);
        assert_eq!(
            resolve_str(ServiceKind::S3, "111").unwrap(),
            vec!["s3:ListBucket", "s3:GetObject", "s3:PutObject", "s3:DeleteObject"]
        );
    }

    #[test_log::test]
    fn test_explicit_order_and_prefix() {
        assert_eq!(
            resolve_str(ServiceKind::Ecr, "BatchCheckLayerAvailability,PutImage").unwrap(),
            vec!["ecr:BatchCheckLayerAvailability", "ecr:PutImage"]
        );
        assert_eq!(resolve_str(ServiceKind::Ecr, "PutImage,ecr:PutImage").unwrap(), vec!["ecr:PutImage", "ecr:PutImage"]);
        assert_eq!(resolve_str(ServiceKind::S3, "GetObject,ListBucket").unwrap(), vec!["s3:GetObject", "s3:ListBucket"]);
    }

    #[test_log::test]
    fn test_explicit_errors() {
        assert_eq!(
            resolve_str(ServiceKind::Ecr, "PutImage,Teleport,AlsoBad").unwrap_err(),
            PolicyGenError::UnknownAction {
                service: "ecr".to_string(),
                action: "Teleport".to_string()
            }
        );
        assert_eq!(
            resolve_str(ServiceKind::Ecr, "s3:PutImage").unwrap_err(),
            PolicyGenError::UnknownAction {
                service: "ecr".to_string(),
                action: "s3:PutImage".to_string()
            }
        );
        assert_eq!(
            resolve_str(ServiceKind::Ecr, "PutImage,").unwrap_err(),
            PolicyGenError::InvalidFormat {
                field: "permission".to_string(),
                value: "PutImage,".to_string()
            }
        );
        assert_eq!(
            resolve(
                ServiceKind::Ecr,
                &PermissionSpec::ExplicitActions(vec![]),
                ActionCatalog::builtin(),
                TemplateCatalog::builtin()
            )
            .unwrap_err(),
            PolicyGenError::MissingField("permission".to_string())
        );
    }

    #[test_log::test]
    fn test_templates() {
        let spec = PermissionSpec::parse(ServiceKind::Ecr, None, Some("generic")).unwrap();
        let first = resolve(ServiceKind::Ecr, &spec, ActionCatalog::builtin(), TemplateCatalog::builtin()).unwrap();
        let second = resolve(ServiceKind::Ecr, &spec, ActionCatalog::builtin(), TemplateCatalog::builtin()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert_eq!(first.names()[4], "ecr:PutImage");

        // Template contents skip the catalog check.
        let templates = TemplateCatalog::default().with_template("ecr", "future", ["DescribeFuture"]);
        let spec = PermissionSpec::parse(ServiceKind::Ecr, Some("not,checked"), Some("future")).unwrap();
        let actions = resolve(ServiceKind::Ecr, &spec, ActionCatalog::builtin(), &templates).unwrap();
        assert_eq!(actions.names(), vec!["ecr:DescribeFuture"]);

        let spec = PermissionSpec::parse(ServiceKind::Ecr, None, Some("missing")).unwrap();
        assert_eq!(
            resolve(ServiceKind::Ecr, &spec, ActionCatalog::builtin(), TemplateCatalog::builtin()).unwrap_err(),
            PolicyGenError::UnknownTemplate {
                service: "ecr".to_string(),
                template: "missing".to_string()
            }
        );
    }
}
