use {
    lazy_static::lazy_static,
    std::collections::{BTreeMap, BTreeSet},
};

const ECR_ACTIONS: &[&str] = &[
    "BatchCheckLayerAvailability",
    "BatchDeleteImage",
    "BatchGetImage",
    "BatchGetRepositoryScanningConfiguration",
    "BatchImportUpstreamImage",
    "CompleteLayerUpload",
    "CreatePullThroughCacheRule",
    "CreateRepository",
    "CreateRepositoryCreationTemplate",
    "DeleteLifecyclePolicy",
    "DeletePullThroughCacheRule",
    "DeleteRegistryPolicy",
    "DeleteRepository",
    "DeleteRepositoryCreationTemplate",
    "DeleteRepositoryPolicy",
    "DescribeImageReplicationStatus",
    "DescribeImageScanFindings",
    "DescribeImages",
    "DescribePullThroughCacheRules",
    "DescribeRegistry",
    "DescribeRepositories",
    "DescribeRepositoryCreationTemplates",
    "GetAuthorizationToken",
    "GetDownloadUrlForLayer",
    "GetLifecyclePolicy",
    "GetLifecyclePolicyPreview",
    "GetRegistryPolicy",
    "GetRegistryScanningConfiguration",
    "GetRepositoryPolicy",
    "InitiateLayerUpload",
    "ListImages",
    "ListTagsForResource",
    "PutImage",
    "PutImageScanningConfiguration",
    "PutImageTagMutability",
    "PutLifecyclePolicy",
    "PutRegistryPolicy",
    "PutRegistryScanningConfiguration",
    "PutReplicationConfiguration",
    "ReplicateImage",
    "SetRepositoryPolicy",
    "StartImageScan",
    "StartLifecyclePolicyPreview",
    "TagResource",
    "UntagResource",
    "UpdatePullThroughCacheRule",
    "UpdateRepositoryCreationTemplate",
    "UploadLayerPart",
    "ValidatePullThroughCacheRule",
];

/// S3 actions that apply to the bucket itself rather than to the objects in it.
pub(crate) const S3_BUCKET_ACTIONS: &[&str] = &["ListBucket", "GetBucketLocation", "ListBucketMultipartUploads"];

const S3_OBJECT_ACTIONS: &[&str] = &[
    "GetObject",
    "GetObjectVersion",
    "PutObject",
    "DeleteObject",
    "DeleteObjectVersion",
    "AbortMultipartUpload",
    "ListMultipartUploadParts",
    "GetObjectTagging",
    "PutObjectTagging",
];

lazy_static! {
    static ref BUILTIN: ActionCatalog = ActionCatalog::default()
        .with_service("ecr", ECR_ACTIONS.iter().copied())
        .with_service("s3", S3_BUCKET_ACTIONS.iter().chain(S3_OBJECT_ACTIONS).copied());
}

/// The recognized action names for each service, keyed by the service namespace (`ecr`, `s3`, ...).
///
/// Names are stored bare; namespace prefixes are applied by the permission resolver.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionCatalog {
    services: BTreeMap<String, BTreeSet<String>>,
}

impl ActionCatalog {
    /// The catalog of every service this crate knows about.
    pub fn builtin() -> &'static ActionCatalog {
        &BUILTIN
    }

    /// Add (or extend) a service vocabulary.
    pub fn with_service<S, I, A>(mut self, service: S, actions: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.services.entry(service.into()).or_default().extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn is_valid_action(&self, service: &str, action: &str) -> bool {
        self.services.get(service).map(|actions| actions.contains(action)).unwrap_or(false)
    }

    /// All actions for a service in sorted order, or `None` if the service is unknown.
    pub fn actions(&self, service: &str) -> Option<impl Iterator<Item = &str>> {
        self.services.get(service).map(|actions| actions.iter().map(String::as_str))
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use {super::ActionCatalog, pretty_assertions::assert_eq};

    #[test_log::test]
    fn test_builtin() {
        let catalog = ActionCatalog::builtin();
        assert!(catalog.is_valid_action("ecr", "PutImage"));
        assert!(catalog.is_valid_action("ecr", "GetAuthorizationToken"));
        assert!(catalog.is_valid_action("s3", "ListBucket"));
        assert!(catalog.is_valid_action("s3", "DeleteObject"));

        assert!(!catalog.is_valid_action("ecr", "ecr:PutImage"));
        assert!(!catalog.is_valid_action("ecr", "putimage"));
        assert!(!catalog.is_valid_action("s3", "PutImage"));
        assert!(!catalog.is_valid_action("ec2", "RunInstances"));

        assert_eq!(catalog.services().collect::<Vec<_>>(), vec!["ecr", "s3"]);
        assert_eq!(catalog.actions("ecr").unwrap().count(), 49);
        assert_eq!(catalog.actions("ecr").unwrap().next(), Some("BatchCheckLayerAvailability"));
        assert!(catalog.actions("ec2").is_none());
    }

    #[test_log::test]
    fn test_extension() {
        let catalog = ActionCatalog::builtin().clone().with_service("sqs", ["SendMessage", "ReceiveMessage"]);
        assert!(catalog.is_valid_action("sqs", "SendMessage"));
        assert!(catalog.is_valid_action("ecr", "PutImage"));
        assert!(!ActionCatalog::builtin().is_valid_action("sqs", "SendMessage"));

        let catalog = catalog.with_service("ecr", ["DescribeFuture"]);
        assert!(catalog.is_valid_action("ecr", "DescribeFuture"));
        assert!(catalog.is_valid_action("ecr", "PutImage"));
    }
}
