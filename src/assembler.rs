use {
    crate::{
        catalog::S3_BUCKET_ACTIONS, Action, ActionList, NormalizedActions, Policy, PolicyGenError, Resource,
        ResourceAddress, ResourceList, ServiceKind, Statement,
    },
    log::trace,
};

const ECR_TOKEN_ACTION: &str = "GetAuthorizationToken";

/// Compose the statements for a service into a policy document.
///
/// ECR documents always open with a grant of `ecr:GetAuthorizationToken` on `*`, followed by one statement for the
/// requested actions on every repository; an empty action list is an error. S3 documents hold a bucket-level statement
/// (listing) and an object-level statement, each only when it has actions, so they may be empty.
pub fn assemble(
    service: ServiceKind,
    actions: NormalizedActions,
    address: ResourceAddress,
) -> Result<Policy, PolicyGenError> {
    let statements = match (service, address) {
        (ServiceKind::Ecr, ResourceAddress::Repositories(repositories)) => {
            if actions.is_empty() {
                return Err(PolicyGenError::MissingField("permission".to_string()));
            }
            if repositories.is_empty() {
                return Err(PolicyGenError::IncompleteAddress("repository".to_string()));
            }

            let token = Action::new(service.namespace(), ECR_TOKEN_ACTION)?;
            let resources: Vec<Resource> = repositories.into_iter().map(Resource::from).collect();
            vec![statement(token, Resource::Any)?, statement(actions, resources)?]
        }

        (ServiceKind::S3, ResourceAddress::Bucket {
            bucket,
            objects,
        }) => {
            let (bucket_actions, object_actions): (Vec<Action>, Vec<Action>) =
                actions.iter().cloned().partition(|action| S3_BUCKET_ACTIONS.contains(&action.action()));
            trace!("S3 bucket actions {:?}, object actions {:?}", bucket_actions, object_actions);

            let mut statements = Vec::with_capacity(2);
            if !bucket_actions.is_empty() {
                statements.push(statement(bucket_actions, vec![Resource::from(bucket)])?);
            }
            if !object_actions.is_empty() {
                statements.push(statement(object_actions, vec![Resource::from(objects)])?);
            }
            statements
        }

        (service, address) => {
            trace!("Address {address:?} does not belong to {service}");
            return Err(PolicyGenError::IncompleteAddress(match service {
                ServiceKind::S3 => "bucket".to_string(),
                ServiceKind::Ecr => "repository".to_string(),
            }));
        }
    };

    Policy::builder().statement(statements).build().map_err(|e| PolicyGenError::invalid_format("policy", e.to_string()))
}

fn statement<A: Into<ActionList>, R: Into<ResourceList>>(action: A, resource: R) -> Result<Statement, PolicyGenError> {
    Statement::builder()
        .action(action)
        .resource(resource)
        .build()
        .map_err(|e| PolicyGenError::invalid_format("statement", e.to_string()))
}
