use {
    crate::{display_json, ActionList, Effect, ResourceList},
    derive_builder::Builder,
    serde::Serialize,
};

/// One effect/action/resource triple within a policy document.
///
/// Serializes with its keys in the order `Effect`, `Action`, `Resource`.
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[builder(default)]
    effect: Effect,

    #[builder(setter(into))]
    action: ActionList,

    #[builder(setter(into))]
    resource: ResourceList,
}

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn action(&self) -> &ActionList {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &ResourceList {
        &self.resource
    }
}

display_json!(Statement);

impl StatementBuilder {
    fn validate(&self) -> Result<(), StatementBuilderError> {
        let mut errors = Vec::with_capacity(2);

        match &self.action {
            None => errors.push("Action must be set."),
            Some(action) if action.is_empty() => errors.push("Action cannot be empty."),
            _ => (),
        }

        match &self.resource {
            None => errors.push("Resource must be set."),
            Some(resource) if resource.is_empty() => errors.push("Resource cannot be empty."),
            _ => (),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatementBuilderError::ValidationError(errors.join(" ")))
        }
    }
}

pub type StatementList = Vec<Statement>;

#[cfg(test)]
mod tests {
    use {
        crate::{Action, Effect, Resource, ResourceArn, Statement},
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_builder() {
        let err = Statement::builder().build().unwrap_err();
        assert_eq!(err.to_string(), "Action must be set. Resource must be set.");

        let err = Statement::builder()
            .action(Vec::<Action>::new())
            .resource(Resource::Any)
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Action cannot be empty.");

        let err = Statement::builder()
            .action(Action::new("ecr", "PutImage").unwrap())
            .resource(Vec::<Resource>::new())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Resource cannot be empty.");

        let s = Statement::builder()
            .action(Action::new("ecr", "GetAuthorizationToken").unwrap())
            .resource(Resource::Any)
            .build()
            .unwrap();
        assert_eq!(*s.effect(), Effect::Allow);
        assert_eq!(s.action().len(), 1);
        assert!(s.resource()[0].is_any());
    }

    #[test_log::test]
    fn test_key_order() {
        let s = Statement::builder()
            .action(vec![Action::new("s3", "GetObject").unwrap(), Action::new("s3", "PutObject").unwrap()])
            .resource(vec![Resource::Arn(ResourceArn::new("aws", "s3", "", "", "my-bucket/*"))])
            .build()
            .unwrap();

        assert_eq!(
            s.to_string(),
            indoc! { r#"
            {
              "Effect": "Allow",
              "Action": [
                "s3:GetObject",
                "s3:PutObject"
              ],
              "Resource": [
                "arn:aws:s3:::my-bucket/*"
              ]
            }"# }
        );
    }
}
