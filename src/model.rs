//! Service model: the host framework's in-memory configuration tree.
//!
//! These shapes mirror what the framework deserializes from service
//! configuration. Only the attributes role synthesis consumes are typed;
//! everything else is carried through untouched in flattened maps so the
//! transformation is lossless.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The mutable configuration tree for one service.
///
/// Owned by the host framework; this crate reads it and additively mutates
/// `functions[*].role` and `resources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub provider: ProviderConfig,
    pub functions: IndexMap<String, FunctionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<TemplateResources>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// The template fragment holding the resource collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateResources {
    #[serde(rename = "Resources")]
    pub resources: IndexMap<String, Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Provider-level configuration consumed by role synthesis.
///
/// Shared statements and the permissions boundary exist under two shapes:
/// the nested `iam.role.*` form and the legacy flat fields. The accessors
/// below encode the precedence between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<IamConfig>,
    /// Legacy flat shape for shared role statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_role_statements: Option<Vec<Value>>,
    /// Legacy flat shape for the permissions boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_permissions_boundary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<VpcConfig>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl ProviderConfig {
    /// Shared role statements: `iam.role.statements` wins over the legacy
    /// flat field. First non-null shape is used as-is.
    pub fn shared_statements(&self) -> Option<&Vec<Value>> {
        self.iam
            .as_ref()
            .and_then(|iam| iam.role.as_ref())
            .and_then(|role| role.statements.as_ref())
            .or(self.iam_role_statements.as_ref())
    }

    /// Permissions boundary: `iam.role.permissionsBoundary` wins over the
    /// legacy flat field.
    pub fn permissions_boundary(&self) -> Option<&Value> {
        self.iam
            .as_ref()
            .and_then(|iam| iam.role.as_ref())
            .and_then(|role| role.permissions_boundary.as_ref())
            .or(self.role_permissions_boundary.as_ref())
    }
}

/// Nested `provider.iam` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<IamRoleConfig>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Nested `provider.iam.role` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamRoleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_boundary: Option<Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// VPC attachment. Only its presence matters to role synthesis; the ids may
/// be literals or deferred template references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VpcConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<Value>>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// One declared function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionSpec {
    /// Deployed function name, used in log-group ARNs. The framework fills
    /// this in ahead of packaging, so it is normally present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_role_statements: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventDeclaration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<VpcConfig>,
    /// Execution role reference. Declared by the user (and then never
    /// overwritten) or assigned by this plugin after synthesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// One entry in a function's event list. Only stream events are inspected;
/// every other event kind passes through in `rest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamConfig>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Stream event-source declaration: a bare event-source ARN, or an object
/// carrying the ARN plus an optional explicit stream type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamConfig {
    Arn(String),
    Config(StreamObject),
}

/// Object form of a stream declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamObject {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    /// Event-source reference; a literal ARN or a deferred template
    /// expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl StreamConfig {
    /// The event-source reference, when one is configured. Empty strings
    /// count as unconfigured.
    pub fn event_source(&self) -> Option<Value> {
        match self {
            Self::Arn(arn) if !arn.is_empty() => Some(Value::String(arn.clone())),
            Self::Arn(_) => None,
            Self::Config(config) => match &config.arn {
                Some(Value::String(arn)) if arn.is_empty() => None,
                Some(Value::Null) | None => None,
                Some(arn) => Some(arn.clone()),
            },
        }
    }

    /// Explicitly declared stream type, if any. Empty strings count as
    /// undeclared and leave type resolution to ARN inference.
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Self::Arn(_) => None,
            Self::Config(config) => config
                .stream_type
                .as_deref()
                .filter(|stream_type| !stream_type.is_empty()),
        }
    }
}
