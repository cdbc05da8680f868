//! Per-function IAM execution roles for serverless deployment templates.
//!
//! This crate inspects a service's declared functions and event sources,
//! synthesizes least-privilege policy documents (logging, stream access,
//! VPC access), merges them with user-supplied statements, and injects the
//! resulting `AWS::IAM::Role` resources into the deployment template. Each
//! role lands under a deterministic `<FunctionLogicalId>Role` logical ID
//! and is back-referenced from the function's `role` field; functions that
//! already declare a role are never touched.
//!
//! The host deployment framework owns the service model and the packaging
//! lifecycle. It constructs [`CustomRolesPlugin`] once (which gates on the
//! framework version), maps [`CustomRolesPlugin::HOOK`] to
//! [`CustomRolesPlugin::create_roles`], and hands that call the mutable
//! [`ServiceModel`] plus its [`Naming`] conventions.

pub mod diagnostics;
mod error;
pub mod model;
pub mod naming;
mod plugin;
pub mod synthesis;

// Re-exports for a small, focused public API
pub use diagnostics::{DiagnosticSink, LogSink};
pub use error::{CustomRolesError, CustomRolesResult};
pub use model::{
    EventDeclaration, FunctionSpec, IamConfig, IamRoleConfig, ProviderConfig, ServiceModel,
    StreamConfig, StreamObject, TemplateResources, VpcConfig,
};
pub use naming::{AwsNaming, Naming};
pub use plugin::{ConfigSchemaHandler, CustomRolesPlugin};
pub use synthesis::{Effect, Policy, PolicyDocument, RoleResource, Statement};
