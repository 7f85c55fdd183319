use {
    crate::PolicyGenError,
    lazy_static::lazy_static,
    log::debug,
    regex::Regex,
    std::collections::BTreeMap,
};

lazy_static! {
    static ref BUCKET_NAME: Regex = Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").unwrap();
    static ref REPOSITORY_NAME: Regex =
        Regex::new(r"^[a-z0-9]+(?:[._-][a-z0-9]+)*(?:/[a-z0-9]+(?:[._-][a-z0-9]+)*)*$").unwrap();
    static ref REGION: Regex = Regex::new(r"^[a-z]{2}(?:-[a-z]+)+-\d+$").unwrap();
    static ref AWS_ACCOUNT_ID: Regex = Regex::new(r"^\d{12}$").unwrap();
}

const PARTITIONS: &[&str] = &["aws", "aws-cn", "aws-us-gov"];
const MAX_REPOSITORY_NAME_LEN: usize = 256;

/// The option record handed over by the host: option name to raw string value.
///
/// Values are trimmed on read and an empty value is treated as absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServiceOptions {
    values: BTreeMap<String, String>,
}

impl ServiceOptions {
    pub const BUCKET: &'static str = "bucket";
    pub const PERMISSION: &'static str = "permission";
    pub const TEMPLATE: &'static str = "template";
    pub const REPOSITORIES: &'static str = "repositories";
    pub const REGION: &'static str = "region";
    pub const ACCOUNT_ID: &'static str = "account_id";
    pub const PARTITION: &'static str = "partition";

    pub const DEFAULT_PARTITION: &'static str = "aws";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.set(name, value);
        self
    }

    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    pub fn require(&self, name: &str) -> Result<&str, PolicyGenError> {
        self.get(name).ok_or_else(|| {
            debug!("Required option {name} is missing");
            PolicyGenError::MissingField(name.to_string())
        })
    }

    /// The partition to build ARNs in, defaulting to `aws`.
    pub fn partition(&self) -> Result<&str, PolicyGenError> {
        match self.get(Self::PARTITION) {
            None => Ok(Self::DEFAULT_PARTITION),
            Some(partition) if PARTITIONS.contains(&partition) => Ok(partition),
            Some(partition) => Err(PolicyGenError::invalid_format(Self::PARTITION, partition)),
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ServiceOptions {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (name, value) in iter {
            options.set(name, value);
        }
        options
    }
}

pub(crate) fn validate_bucket(bucket: &str) -> Result<(), PolicyGenError> {
    if BUCKET_NAME.is_match(bucket) && !bucket.contains("..") {
        Ok(())
    } else {
        debug!("Bucket name {bucket:?} is not a valid S3 bucket name");
        Err(PolicyGenError::invalid_format(ServiceOptions::BUCKET, bucket))
    }
}

/// Split a comma-separated repository list, validating each name.
pub(crate) fn parse_repositories(raw: &str) -> Result<Vec<String>, PolicyGenError> {
    let mut repositories = Vec::new();
    for name in raw.split(',').map(str::trim) {
        if name.len() > MAX_REPOSITORY_NAME_LEN || !REPOSITORY_NAME.is_match(name) {
            debug!("Repository name {name:?} is not a valid ECR repository name");
            return Err(PolicyGenError::invalid_format(ServiceOptions::REPOSITORIES, name));
        }
        repositories.push(name.to_string());
    }
    Ok(repositories)
}

pub(crate) fn validate_region(region: &str) -> Result<(), PolicyGenError> {
    if REGION.is_match(region) {
        Ok(())
    } else {
        Err(PolicyGenError::invalid_format(ServiceOptions::REGION, region))
    }
}

pub(crate) fn validate_account_id(account_id: &str) -> Result<(), PolicyGenError> {
    if AWS_ACCOUNT_ID.is_match(account_id) {
        Ok(())
    } else {
        Err(PolicyGenError::invalid_format(ServiceOptions::ACCOUNT_ID, account_id))
    }
}
