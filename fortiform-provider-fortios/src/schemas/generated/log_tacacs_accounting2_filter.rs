//! log_tacacs_accounting2_filter schema definition for FortiOS
//!
//! CMDB path: log.tacacs+accounting2/filter

use super::{DeleteStyle, FortiosSchemaConfig, IdentityStyle, vdomparam};
use fortiform_core::compat::CompatTable;
use fortiform_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema config for log_tacacs_accounting2_filter (log.tacacs+accounting2/filter)
pub fn log_tacacs_accounting2_filter_config() -> FortiosSchemaConfig {
    FortiosSchemaConfig {
        api_path: "log.tacacs+accounting2/filter",
        identity: IdentityStyle::Singleton {
            literal: "LogTacacsAccounting2Filter",
        },
        delete: DeleteStyle::Reset,
        compat: CompatTable::new(),
        schema: ResourceSchema::new("fortios.log_tacacs_accounting2_filter")
        .with_description("Settings for TACACS+ accounting events filter.")
        .attribute(vdomparam())
        .attribute(
            AttributeSchema::new("login_audit", AttributeType::String)
                .computed()
                .with_description("Enable/disable TACACS+ accounting for login events audit.")
                .with_provider_name("login-audit"),
        )
        .attribute(
            AttributeSchema::new("config_change_audit", AttributeType::String)
                .computed()
                .with_description("Enable/disable TACACS+ accounting for configuration change events audit.")
                .with_provider_name("config-change-audit"),
        )
        .attribute(
            AttributeSchema::new("cli_cmd_audit", AttributeType::String)
                .computed()
                .with_description("Enable/disable TACACS+ accounting for CLI commands audit.")
                .with_provider_name("cli-cmd-audit"),
        )
    }
}
