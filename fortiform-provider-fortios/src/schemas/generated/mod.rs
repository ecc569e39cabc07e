//! FortiOS CMDB resource descriptor tables
//!
//! One module per resource kind. Each returns a `FortiosSchemaConfig` that
//! combines the descriptor table with the endpoint metadata the provider needs.

use fortiform_core::compat::CompatTable;
use fortiform_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// How the server-side key of an object is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStyle {
    /// Server-assigned numeric key, mirrored by the given config field
    Numeric { key_field: &'static str },
    /// One object per device (or vdom), addressed by a fixed literal
    Singleton { literal: &'static str },
}

/// What Delete does on the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStyle {
    /// Issue a REST delete
    Remove,
    /// Reset every settable field with an update carrying `null`s
    Reset,
}

/// FortiOS schema configuration
pub struct FortiosSchemaConfig {
    /// CMDB path (e.g., "firewall/proxy-policy")
    pub api_path: &'static str,
    pub identity: IdentityStyle,
    pub delete: DeleteStyle,
    /// Tolerated read-side type deviations
    pub compat: CompatTable,
    /// The resource schema with attribute definitions
    pub schema: ResourceSchema,
}

impl FortiosSchemaConfig {
    /// Resource type name without the provider prefix
    pub fn resource_type(&self) -> &str {
        self.schema
            .resource_type
            .strip_prefix("fortios.")
            .unwrap_or(&self.schema.resource_type)
    }

    /// Whether resources of this kind carry their own `vdomparam`
    pub fn is_vdom_scoped(&self) -> bool {
        self.schema.get(VDOM_PARAM).is_some()
    }
}

/// Local-only attribute selecting the vdom a request is scoped to
pub const VDOM_PARAM: &str = "vdomparam";

/// The `vdomparam` descriptor shared by vdom-scoped resources
pub fn vdomparam() -> AttributeSchema {
    AttributeSchema::new(VDOM_PARAM, AttributeType::String)
        .force_new()
        .local_only()
        .with_description("Virtual domain the request is scoped to. Defaults to the provider vdom.")
}

pub mod firewall_proxy_policy;
pub mod log_tacacs_accounting2_filter;
pub mod system_password_policy;

/// Returns all generated schema configs
pub fn configs() -> Vec<FortiosSchemaConfig> {
    vec![
        firewall_proxy_policy::firewall_proxy_policy_config(),
        system_password_policy::system_password_policy_config(),
        log_tacacs_accounting2_filter::log_tacacs_accounting2_filter_config(),
    ]
}

/// Returns all generated schemas
pub fn schemas() -> Vec<ResourceSchema> {
    configs().into_iter().map(|c| c.schema).collect()
}
