#![warn(clippy::all)]
//! Generate AWS IAM access-policy documents from service parameters.
//!
//! A [ServiceAdapter] (chosen through [ServiceKind]) takes a [ServiceOptions] record, resolves the requested
//! permissions against an [ActionCatalog] or [TemplateCatalog], builds the resource ARNs and assembles a [Policy].
//!
//! ```
//! # use iam_policy_gen::{ActionCatalog, ServiceKind, ServiceOptions, TemplateCatalog};
//! # use std::str::FromStr;
//! let mut adapter = ServiceKind::from_str("S3").unwrap().adapter(ActionCatalog::builtin(), TemplateCatalog::builtin());
//! adapter.set_options(&ServiceOptions::new().with("bucket", "my-bucket").with("permission", "110")).unwrap();
//! let policy = adapter.generate_policy().unwrap();
//! assert_eq!(policy.statement().len(), 2);
//! ```
pub(crate) mod action;
pub(crate) mod adapter;
pub(crate) mod assembler;
pub(crate) mod catalog;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod locator;
pub(crate) mod options;
pub(crate) mod permission;
pub(crate) mod policy;
pub(crate) mod resource;
pub(crate) mod service;
pub(crate) mod statement;
pub(crate) mod template;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::{Action, ActionList},
    adapter::{AdapterState, EcrAdapter, S3Adapter, ServiceAdapter},
    assembler::assemble,
    catalog::ActionCatalog,
    effect::Effect,
    error::{PolicyGenError, Result},
    locator::{locate, ResourceAddress},
    options::ServiceOptions,
    permission::{resolve, CapabilityAxis, NormalizedActions, PermissionSpec},
    policy::{Policy, PolicyBuilder, PolicyBuilderError, PolicyVersion},
    resource::{Resource, ResourceArn, ResourceList},
    serutil::{ListKind, StringLikeList},
    service::ServiceKind,
    statement::{Statement, StatementBuilder, StatementBuilderError, StatementList},
    template::TemplateCatalog,
};
