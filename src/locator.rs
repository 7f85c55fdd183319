use {
    crate::{PolicyGenError, ResourceArn, ServiceKind},
    log::trace,
};

/// The resource identifiers a policy will be scoped to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResourceAddress {
    /// An S3 bucket: the bucket itself and every object inside it.
    Bucket {
        bucket: ResourceArn,
        objects: ResourceArn,
    },

    /// ECR repositories, in the order they were requested.
    Repositories(Vec<ResourceArn>),
}

/// Build the ARNs for `identifiers` (bucket or repository names) of a service.
///
/// S3 ARNs carry neither region nor account, so those are ignored. ECR requires both.
pub fn locate(
    service: ServiceKind,
    partition: &str,
    identifiers: &[String],
    region: Option<&str>,
    account_id: Option<&str>,
) -> Result<ResourceAddress, PolicyGenError> {
    let namespace = service.namespace();
    if partition.is_empty() {
        return Err(PolicyGenError::IncompleteAddress("partition".to_string()));
    }

    match service {
        ServiceKind::S3 => {
            let bucket = match identifiers {
                [bucket] if !bucket.is_empty() => bucket,
                [] | [_] => return Err(PolicyGenError::IncompleteAddress("bucket".to_string())),
                _ => return Err(PolicyGenError::invalid_format("bucket", identifiers.join(","))),
            };

            trace!("Locating S3 bucket {bucket} in {partition}");
            Ok(ResourceAddress::Bucket {
                bucket: ResourceArn::new(partition, namespace, "", "", bucket),
                objects: ResourceArn::new(partition, namespace, "", "", &format!("{bucket}/*")),
            })
        }

        ServiceKind::Ecr => {
            if identifiers.is_empty() || identifiers.iter().any(String::is_empty) {
                return Err(PolicyGenError::IncompleteAddress("repository".to_string()));
            }
            let region = present(region).ok_or_else(|| PolicyGenError::IncompleteAddress("region".to_string()))?;
            let account_id =
                present(account_id).ok_or_else(|| PolicyGenError::IncompleteAddress("account_id".to_string()))?;

            trace!("Locating {} ECR repositories in {region}/{account_id}", identifiers.len());
            Ok(ResourceAddress::Repositories(
                identifiers
                    .iter()
                    .map(|name| ResourceArn::new(partition, namespace, region, account_id, &format!("repository/{name}")))
                    .collect(),
            ))
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
