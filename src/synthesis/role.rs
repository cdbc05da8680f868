//! Role resource assembly: trust policy, inline policies, managed policies.

use serde::Serialize;
use serde_json::{json, Value};

use super::policy::{Policy, PolicyDocument, POLICY_VERSION};

/// Fixed managed policy granting VPC network-interface access, attached
/// when the function (or the whole provider) runs inside a VPC. Partition
/// stays a deferred reference.
pub fn vpc_access_policy_arn() -> Value {
    json!({
        "Fn::Join": [
            "",
            [
                "arn:",
                { "Ref": "AWS::Partition" },
                ":iam::aws:policy/service-role/AWSLambdaVPCAccessExecutionRole",
            ]
        ]
    })
}

/// An `AWS::IAM::Role` template resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties")]
    pub properties: RoleProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    pub assume_role_policy_document: PolicyDocument,
    pub policies: Vec<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_policy_arns: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_boundary: Option<Value>,
}

/// Assemble a role from its inline policies plus optional managed policies
/// and permissions boundary.
///
/// The trust policy unconditionally allows the compute-function execution
/// service to assume the role. Managed policies are attached only when the
/// list is non-empty, the boundary only when present and non-empty.
pub fn assemble_role(
    policies: Vec<Policy>,
    managed_policy_arns: Vec<Value>,
    permissions_boundary: Option<Value>,
) -> RoleResource {
    RoleResource {
        resource_type: "AWS::IAM::Role".to_string(),
        properties: RoleProperties {
            assume_role_policy_document: assume_role_policy(),
            policies,
            managed_policy_arns: if managed_policy_arns.is_empty() {
                None
            } else {
                Some(managed_policy_arns)
            },
            permissions_boundary: permissions_boundary
                .filter(|boundary| !boundary.is_null() && boundary.as_str() != Some("")),
        },
    }
}

fn assume_role_policy() -> PolicyDocument {
    PolicyDocument {
        version: POLICY_VERSION.to_string(),
        statement: vec![json!({
            "Effect": "Allow",
            "Principal": { "Service": ["lambda.amazonaws.com"] },
            "Action": "sts:AssumeRole",
        })],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::logging_policy;

    #[test]
    fn trust_policy_allows_the_execution_service() {
        let role = assemble_role(vec![logging_policy("foo-dev-function1")], Vec::new(), None);

        assert_eq!(role.resource_type, "AWS::IAM::Role");
        assert_eq!(
            serde_json::to_value(&role.properties.assume_role_policy_document)
                .expect("trust policy should serialize"),
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "Service": ["lambda.amazonaws.com"] },
                    "Action": "sts:AssumeRole",
                }],
            })
        );
    }

    #[test]
    fn empty_managed_policy_list_is_omitted() {
        let role = assemble_role(vec![logging_policy("fn")], Vec::new(), None);

        assert_eq!(role.properties.managed_policy_arns, None);
        let serialized = serde_json::to_value(&role).expect("role should serialize");
        assert!(serialized["Properties"].get("ManagedPolicyArns").is_none());
        assert!(serialized["Properties"].get("PermissionsBoundary").is_none());
    }

    #[test]
    fn managed_policies_are_attached_when_present() {
        let role = assemble_role(
            vec![logging_policy("fn")],
            vec![vpc_access_policy_arn()],
            None,
        );

        assert_eq!(
            role.properties.managed_policy_arns,
            Some(vec![json!({
                "Fn::Join": [
                    "",
                    [
                        "arn:",
                        { "Ref": "AWS::Partition" },
                        ":iam::aws:policy/service-role/AWSLambdaVPCAccessExecutionRole",
                    ]
                ]
            })])
        );
    }

    #[test]
    fn empty_permissions_boundary_is_dropped() {
        let blank = assemble_role(vec![logging_policy("fn")], Vec::new(), Some(json!("")));
        assert_eq!(blank.properties.permissions_boundary, None);

        let null = assemble_role(vec![logging_policy("fn")], Vec::new(), Some(Value::Null));
        assert_eq!(null.properties.permissions_boundary, None);

        let set = assemble_role(
            vec![logging_policy("fn")],
            Vec::new(),
            Some(json!("arn:aws:iam::123456789012:policy/boundary")),
        );
        assert_eq!(
            set.properties.permissions_boundary,
            Some(json!("arn:aws:iam::123456789012:policy/boundary"))
        );
    }
}
