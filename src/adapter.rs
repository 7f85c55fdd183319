use {
    crate::{
        assemble, locate,
        options::{parse_repositories, validate_account_id, validate_bucket, validate_region},
        resolve, ActionCatalog, PermissionSpec, Policy, PolicyGenError, ServiceKind, ServiceOptions, TemplateCatalog,
    },
    log::{debug, info},
    std::io::{self, Write},
};

/// A per-service policy generator.
///
/// An adapter starts unconfigured. [set_options](ServiceAdapter::set_options) replaces the whole configuration; when
/// it fails the adapter is left unconfigured, never partially configured.
pub trait ServiceAdapter {
    fn service(&self) -> ServiceKind;

    fn is_configured(&self) -> bool;

    fn set_options(&mut self, options: &ServiceOptions) -> Result<(), PolicyGenError>;

    fn generate_policy(&self) -> Result<Policy, PolicyGenError>;

    /// Generate the policy and write it as two-space-indented JSON followed by a newline.
    fn write_policy(&self, out: &mut dyn Write) -> Result<(), PolicyGenError> {
        let policy = self.generate_policy()?;
        writeln!(out, "{}", policy).map_err(|e| PolicyGenError::Output(e.to_string()))
    }

    /// Generate the policy and print it to standard output.
    fn execute(&self) -> Result<(), PolicyGenError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_policy(&mut lock)
    }
}

/// Configuration state shared by every adapter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum AdapterState<C> {
    #[default]
    Unconfigured,
    Configured(C),
}

impl<C> AdapterState<C> {
    #[inline]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    fn config(&self, service: ServiceKind) -> Result<&C, PolicyGenError> {
        match self {
            Self::Configured(config) => Ok(config),
            Self::Unconfigured => Err(PolicyGenError::NotConfigured(service.to_string())),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct S3Config {
    bucket: String,
    permission: PermissionSpec,
    partition: String,
}

/// Generates bucket and object access policies for S3.
pub struct S3Adapter<'a> {
    actions: &'a ActionCatalog,
    templates: &'a TemplateCatalog,
    state: AdapterState<S3Config>,
}

impl<'a> S3Adapter<'a> {
    pub fn new(actions: &'a ActionCatalog, templates: &'a TemplateCatalog) -> Self {
        Self {
            actions,
            templates,
            state: AdapterState::Unconfigured,
        }
    }

    fn configure(options: &ServiceOptions) -> Result<S3Config, PolicyGenError> {
        let bucket = options.require(ServiceOptions::BUCKET)?;
        validate_bucket(bucket)?;
        let permission = PermissionSpec::parse(
            ServiceKind::S3,
            options.get(ServiceOptions::PERMISSION),
            options.get(ServiceOptions::TEMPLATE),
        )?;
        let partition = options.partition()?;

        Ok(S3Config {
            bucket: bucket.to_string(),
            permission,
            partition: partition.to_string(),
        })
    }
}

impl<'a> ServiceAdapter for S3Adapter<'a> {
    fn service(&self) -> ServiceKind {
        ServiceKind::S3
    }

    fn is_configured(&self) -> bool {
        self.state.is_configured()
    }

    fn set_options(&mut self, options: &ServiceOptions) -> Result<(), PolicyGenError> {
        self.state = AdapterState::Unconfigured;
        let config = Self::configure(options)?;
        debug!("Configured S3 adapter: {config:?}");
        self.state = AdapterState::Configured(config);
        Ok(())
    }

    fn generate_policy(&self) -> Result<Policy, PolicyGenError> {
        let config = self.state.config(self.service())?;
        let actions = resolve(self.service(), &config.permission, self.actions, self.templates)?;
        let address = locate(self.service(), &config.partition, &[config.bucket.clone()], None, None)?;
        let policy = assemble(self.service(), actions, address)?;
        info!("Generated S3 policy with {} statement(s) for bucket {}", policy.statement().len(), config.bucket);
        Ok(policy)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct EcrConfig {
    repositories: Vec<String>,
    permission: PermissionSpec,
    region: String,
    account_id: String,
    partition: String,
}

/// Generates push/pull access policies for one or more ECR repositories.
pub struct EcrAdapter<'a> {
    actions: &'a ActionCatalog,
    templates: &'a TemplateCatalog,
    state: AdapterState<EcrConfig>,
}

impl<'a> EcrAdapter<'a> {
    pub fn new(actions: &'a ActionCatalog, templates: &'a TemplateCatalog) -> Self {
        Self {
            actions,
            templates,
            state: AdapterState::Unconfigured,
        }
    }

    fn configure(options: &ServiceOptions) -> Result<EcrConfig, PolicyGenError> {
        let repositories = parse_repositories(options.require(ServiceOptions::REPOSITORIES)?)?;
        let permission = PermissionSpec::parse(
            ServiceKind::Ecr,
            options.get(ServiceOptions::PERMISSION),
            options.get(ServiceOptions::TEMPLATE),
        )?;
        let region = options.require(ServiceOptions::REGION)?;
        validate_region(region)?;
        let account_id = options.require(ServiceOptions::ACCOUNT_ID)?;
        validate_account_id(account_id)?;
        let partition = options.partition()?;

        Ok(EcrConfig {
            repositories,
            permission,
            region: region.to_string(),
            account_id: account_id.to_string(),
            partition: partition.to_string(),
        })
    }
}

impl<'a> ServiceAdapter for EcrAdapter<'a> {
    fn service(&self) -> ServiceKind {
        ServiceKind::Ecr
    }

    fn is_configured(&self) -> bool {
        self.state.is_configured()
    }

    fn set_options(&mut self, options: &ServiceOptions) -> Result<(), PolicyGenError> {
        self.state = AdapterState::Unconfigured;
        let config = Self::configure(options)?;
        debug!("Configured ECR adapter: {config:?}");
        self.state = AdapterState::Configured(config);
        Ok(())
    }

    fn generate_policy(&self) -> Result<Policy, PolicyGenError> {
        let config = self.state.config(self.service())?;
        let actions = resolve(self.service(), &config.permission, self.actions, self.templates)?;
        let address = locate(
            self.service(),
            &config.partition,
            &config.repositories,
            Some(config.region.as_str()),
            Some(config.account_id.as_str()),
        )?;
        let policy = assemble(self.service(), actions, address)?;
        info!("Generated ECR policy for {} repositories", config.repositories.len());
        Ok(policy)
    }
}
