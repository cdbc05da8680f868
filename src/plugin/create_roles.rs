//! The role creation pass over the service model.

use log::debug;
use serde_json::Value;

use crate::error::CustomRolesResult;
use crate::model::{ServiceModel, TemplateResources};
use crate::naming::Naming;
use crate::synthesis::{
    assemble_role, logging_policy, streams_policy, vpc_access_policy_arn, Policy,
};

impl super::CustomRolesPlugin {
    /// Synthesize an execution role for every function that does not
    /// declare one, and inject the role resources into the service's
    /// resource collection.
    ///
    /// Runs once per packaging pass. Functions with an explicit `role` are
    /// left untouched. Inline policies attach in a fixed order (logging,
    /// shared, custom, streams) so repeated packaging produces identical
    /// templates.
    pub fn create_roles(
        &self,
        service: &mut ServiceModel,
        naming: &dyn Naming,
    ) -> CustomRolesResult<()> {
        if service.functions.is_empty() {
            self.emit("No functions to add roles to");
            return Ok(());
        }

        let shared_policy =
            Policy::from_statements("shared", service.provider.shared_statements().cloned());
        let permissions_boundary = service.provider.permissions_boundary().cloned();
        let provider_vpc = service.provider.vpc.is_some();
        let stack_name = naming.stack_name();
        debug!("creating execution roles for stack '{stack_name}'");

        let mut synthesized: Vec<(String, Value)> = Vec::new();
        for (function_name, function) in &mut service.functions {
            if function.role.is_some() {
                debug!("function '{function_name}' declares an explicit role, skipping");
                continue;
            }

            let role_id = format!("{}Role", naming.function_logical_id(function_name));

            // The framework fills in the deployed name ahead of packaging;
            // fall back to its convention if a host left it unset.
            let display_name = function
                .name
                .clone()
                .unwrap_or_else(|| format!("{stack_name}-{function_name}"));

            let mut policies = vec![logging_policy(&display_name)];
            if let Some(shared) = &shared_policy {
                policies.push(shared.clone());
            }
            if let Some(custom) =
                Policy::from_statements("custom", function.iam_role_statements.clone())
            {
                policies.push(custom);
            }
            if let Some(streams) =
                streams_policy(function_name, function.events.as_deref(), self.sink.as_ref())
            {
                policies.push(streams);
            }

            let mut managed_policy_arns = Vec::new();
            if function.vpc.is_some() || provider_vpc {
                managed_policy_arns.push(vpc_access_policy_arn());
            }

            let role = assemble_role(policies, managed_policy_arns, permissions_boundary.clone());

            function.role = Some(Value::String(role_id.clone()));
            synthesized.push((role_id, serde_json::to_value(role)?));
        }

        if !synthesized.is_empty() {
            service
                .resources
                .get_or_insert_with(TemplateResources::default)
                .resources
                .extend(synthesized);
        }

        Ok(())
    }
}
