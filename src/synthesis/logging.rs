//! Log-delivery policy, granted to every synthesized role.

use serde_json::{json, Value};

use super::policy::{Policy, PolicyDocument, Statement, POLICY_VERSION};

/// Build the `logging` policy for a function's log group.
///
/// Grants stream creation on `/aws/lambda/<name>:*` and event delivery on
/// `/aws/lambda/<name>:*:*`; account and region stay deferred template
/// references so the same template deploys anywhere.
pub fn logging_policy(function_name: &str) -> Policy {
    let statements = vec![
        Statement::allow(
            vec!["logs:CreateLogStream".to_string()],
            vec![log_group_arn(function_name, "*")],
        ),
        Statement::allow(
            vec!["logs:PutLogEvents".to_string()],
            vec![log_group_arn(function_name, "*:*")],
        ),
    ];

    Policy {
        policy_name: "logging".to_string(),
        policy_document: PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statement: statements.into_iter().map(Value::from).collect(),
        },
    }
}

fn log_group_arn(function_name: &str, suffix: &str) -> Value {
    json!({
        "Fn::Join": [
            ":",
            [
                "arn:aws:logs",
                { "Ref": "AWS::Region" },
                { "Ref": "AWS::AccountId" },
                format!("log-group:/aws/lambda/{function_name}:{suffix}"),
            ]
        ]
    })
}
