//! Inline policy shapes shared by all builders.

use serde::Serialize;
use serde_json::{json, Value};

/// IAM policy language version stamped on every synthesized document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// A named inline policy attached to a synthesized role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    pub policy_name: String,
    pub policy_document: PolicyDocument,
}

/// The document wrapped by a [`Policy`] (also used for trust policies).
///
/// Statements are raw template values: synthesized statements are converted
/// from [`Statement`], user-declared ones pass through verbatim and
/// unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Value>,
}

impl Policy {
    /// Wrap a statement list into a named policy.
    ///
    /// An absent or empty list yields no policy; a document with an empty
    /// `Statement` array is never materialized.
    pub fn from_statements(name: &str, statements: Option<Vec<Value>>) -> Option<Self> {
        let statements = statements?;
        if statements.is_empty() {
            return None;
        }

        Some(Self {
            policy_name: name.to_string(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: statements,
            },
        })
    }
}

/// Effect of a synthesized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One synthesized policy statement.
///
/// Resources are raw template values so literal ARNs and deferred
/// references can be mixed freely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    pub action: Vec<String>,
    pub resource: Vec<Value>,
}

impl Statement {
    /// Create an `Allow` statement over the given actions and resources.
    pub fn allow(action: Vec<String>, resource: Vec<Value>) -> Self {
        Self {
            effect: Effect::Allow,
            action,
            resource,
        }
    }
}

impl From<Statement> for Value {
    fn from(statement: Statement) -> Self {
        json!(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_statements_yield_no_policy() {
        assert_eq!(Policy::from_statements("custom", None), None);
        assert_eq!(Policy::from_statements("custom", Some(Vec::new())), None);
    }

    #[test]
    fn statements_pass_through_verbatim() {
        let statement = json!({ "Effect": "Allow", "Action": "xray:PutTraceSegments", "Resource": "*" });
        let policy = Policy::from_statements("custom", Some(vec![statement.clone()]))
            .expect("non-empty statements should yield a policy");

        assert_eq!(policy.policy_name, "custom");
        assert_eq!(policy.policy_document.version, POLICY_VERSION);
        assert_eq!(policy.policy_document.statement, vec![statement]);
    }

    #[test]
    fn allow_statement_converts_to_template_value() {
        let statement = Statement::allow(
            vec!["kinesis:GetRecords".to_string()],
            vec![json!("arn:aws:kinesis:us-east-1:123456789012:stream/foo")],
        );

        assert_eq!(
            Value::from(statement),
            json!({
                "Effect": "Allow",
                "Action": ["kinesis:GetRecords"],
                "Resource": ["arn:aws:kinesis:us-east-1:123456789012:stream/foo"],
            })
        );
    }
}
