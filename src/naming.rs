//! Naming collaborator: function logical IDs and the stack name.

/// Deterministic naming conventions provided by the host framework.
pub trait Naming {
    /// Logical ID of the compute-function resource for a function key.
    fn function_logical_id(&self, function_name: &str) -> String;

    /// Name of the deployment stack.
    fn stack_name(&self) -> String;
}

/// The AWS provider's naming conventions.
#[derive(Debug, Clone)]
pub struct AwsNaming {
    service: String,
    stage: String,
}

impl AwsNaming {
    pub fn new(service: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            stage: stage.into(),
        }
    }
}

impl Naming for AwsNaming {
    fn function_logical_id(&self, function_name: &str) -> String {
        let mut id = String::with_capacity(function_name.len() + 14);
        let mut chars = function_name.chars();
        if let Some(first) = chars.next() {
            id.extend(first.to_uppercase());
            id.push_str(chars.as_str());
        }
        id.push_str("LambdaFunction");
        id
    }

    fn stack_name(&self) -> String {
        format!("{}-{}", self.service, self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_function_key_in_logical_id() {
        let naming = AwsNaming::new("foo", "dev");
        assert_eq!(
            naming.function_logical_id("function1"),
            "Function1LambdaFunction"
        );
        assert_eq!(naming.function_logical_id("Upper"), "UpperLambdaFunction");
    }

    #[test]
    fn stack_name_joins_service_and_stage() {
        let naming = AwsNaming::new("foo", "dev");
        assert_eq!(naming.stack_name(), "foo-dev");
    }
}
