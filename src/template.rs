use {
    crate::PolicyGenError,
    lazy_static::lazy_static,
    std::collections::BTreeMap,
};

lazy_static! {
    static ref BUILTIN: TemplateCatalog = TemplateCatalog::default()
        .with_template(
            "ecr",
            "generic",
            [
                "BatchCheckLayerAvailability",
                "InitiateLayerUpload",
                "UploadLayerPart",
                "CompleteLayerUpload",
                "PutImage",
                "BatchGetImage",
                "GetDownloadUrlForLayer",
            ],
        )
        .with_template("s3", "read-only", ["ListBucket", "GetObject"])
        .with_template("s3", "read-write", ["ListBucket", "GetObject", "PutObject", "DeleteObject"]);
}

/// Named, ordered action lists per service. Template contents are trusted and are not checked against the
/// [ActionCatalog](crate::ActionCatalog).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl TemplateCatalog {
    pub fn builtin() -> &'static TemplateCatalog {
        &BUILTIN
    }

    /// Add a template, replacing any existing template of the same name for the service.
    pub fn with_template<S, N, I, A>(mut self, service: S, name: N, actions: I) -> Self
    where
        S: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.templates
            .entry(service.into())
            .or_default()
            .insert(name.into(), actions.into_iter().map(Into::into).collect());
        self
    }

    pub fn lookup(&self, service: &str, name: &str) -> Result<&[String], PolicyGenError> {
        match self.templates.get(service).and_then(|templates| templates.get(name)) {
            Some(actions) => Ok(actions.as_slice()),
            None => Err(PolicyGenError::UnknownTemplate {
                service: service.to_string(),
                template: name.to_string(),
            }),
        }
    }

    /// Template names for a service in sorted order.
    pub fn names(&self, service: &str) -> Vec<&str> {
        match self.templates.get(service) {
            Some(templates) => templates.keys().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }
}
