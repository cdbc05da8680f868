//! Plugin surface: host registration, version gate, role creation entry
//! point.

mod create_roles;

use serde_json::json;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{CustomRolesError, CustomRolesResult};

/// Minimum supported host framework version (major, minor).
const MINIMUM_FRAMEWORK_VERSION: (u64, u64) = (1, 12);

/// Optional host capability for announcing configuration schema extensions.
///
/// Newer hosts validate service configuration against a registered schema;
/// older ones never call this.
pub trait ConfigSchemaHandler {
    /// Declare additional per-function configuration properties for a
    /// provider.
    fn define_function_properties(&mut self, provider: &str, schema: serde_json::Value);
}

/// Per-function execution-role synthesis, registered against one packaging
/// lifecycle event.
pub struct CustomRolesPlugin {
    sink: Box<dyn DiagnosticSink>,
}

impl CustomRolesPlugin {
    /// Lifecycle event the host should map to
    /// [`create_roles`](Self::create_roles).
    pub const HOOK: &'static str = "before:package:setupProviderConfiguration";

    /// Create the plugin, gating on the host framework version.
    ///
    /// # Errors
    /// [`CustomRolesError::UnsupportedFrameworkVersion`] when the version
    /// cannot be parsed or predates 1.12.
    pub fn new(framework_version: &str) -> CustomRolesResult<Self> {
        Self::with_sink(framework_version, Box::new(LogSink))
    }

    /// Like [`new`](Self::new), with an injected diagnostic sink.
    pub fn with_sink(
        framework_version: &str,
        sink: Box<dyn DiagnosticSink>,
    ) -> CustomRolesResult<Self> {
        match parse_major_minor(framework_version) {
            Some(version) if version >= MINIMUM_FRAMEWORK_VERSION => Ok(Self { sink }),
            _ => Err(CustomRolesError::UnsupportedFrameworkVersion(
                framework_version.to_string(),
            )),
        }
    }

    /// Announce the per-function statements field to hosts that validate
    /// configuration schemas. Declarative only; this crate never runs the
    /// validation itself.
    pub fn register_schema(&self, handler: &mut dyn ConfigSchemaHandler) {
        handler.define_function_properties(
            "aws",
            json!({
                "properties": {
                    "iamRoleStatements": { "type": "array" },
                },
            }),
        );
    }

    pub(crate) fn emit(&self, message: &str) {
        self.sink.emit(message);
    }
}

/// Parse the major and minor components from a version string, ignoring any
/// pre-release suffix.
fn parse_major_minor(version: &str) -> Option<(u64, u64)> {
    let core = version.split('-').next()?;
    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next()?.parse::<u64>().ok()?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_hosts_older_than_minimum() {
        assert!(matches!(
            CustomRolesPlugin::new("1.11.0"),
            Err(CustomRolesError::UnsupportedFrameworkVersion(version)) if version == "1.11.0"
        ));
    }

    #[test]
    fn rejects_unparseable_host_versions() {
        assert!(CustomRolesPlugin::new("latest").is_err());
        assert!(CustomRolesPlugin::new("").is_err());
    }

    #[test]
    fn accepts_minimum_and_newer_hosts() {
        assert!(CustomRolesPlugin::new("1.12.0").is_ok());
        assert!(CustomRolesPlugin::new("2.0.1").is_ok());
        assert!(CustomRolesPlugin::new("3.38.0-beta").is_ok());
    }

    #[test]
    fn parses_major_minor() {
        assert_eq!(parse_major_minor("1.12.0"), Some((1, 12)));
        assert_eq!(parse_major_minor("2.0.1-rc.1"), Some((2, 0)));
        assert_eq!(parse_major_minor("2"), None);
        assert_eq!(parse_major_minor("a.b.c"), None);
    }

    #[test]
    fn announces_the_statements_field_to_the_schema_registry() {
        #[derive(Default)]
        struct Recorder(Vec<(String, serde_json::Value)>);

        impl ConfigSchemaHandler for Recorder {
            fn define_function_properties(&mut self, provider: &str, schema: serde_json::Value) {
                self.0.push((provider.to_string(), schema));
            }
        }

        let plugin = CustomRolesPlugin::new("1.12.0").expect("version should pass the gate");
        let mut recorder = Recorder::default();
        plugin.register_schema(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![(
                "aws".to_string(),
                json!({ "properties": { "iamRoleStatements": { "type": "array" } } })
            )]
        );
    }
}
