//! system_password_policy schema definition for FortiOS
//!
//! CMDB path: system/password-policy

use super::{DeleteStyle, FortiosSchemaConfig, IdentityStyle};
use fortiform_core::compat::CompatTable;
use fortiform_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for system_password_policy (system/password-policy)
pub fn system_password_policy_config() -> FortiosSchemaConfig {
    FortiosSchemaConfig {
        api_path: "system/password-policy",
        identity: IdentityStyle::Singleton {
            literal: "SystemPasswordPolicy",
        },
        delete: DeleteStyle::Remove,
        compat: CompatTable::new(),
        schema: ResourceSchema::new("fortios.system_password_policy")
        .with_description("Configure password policy for locally defined administrator passwords and IPsec VPN pre-shared keys.")
        .attribute(
            AttributeSchema::new("status", AttributeType::String)
                .computed()
                .with_description("Enable/disable setting a password policy for locally defined administrator passwords and IPsec VPN pre-shared keys.")
                .with_provider_name("status"),
        )
        .attribute(
            AttributeSchema::new("apply_to", AttributeType::String)
                .computed()
                .with_description("Apply password policy to administrator passwords or IPsec pre-shared keys or both.")
                .with_provider_name("apply-to"),
        )
        .attribute(
            types::int_between("minimum_length", 8, 128)
                .computed()
                .with_description("Minimum password length (8 - 128).")
                .with_provider_name("minimum-length"),
        )
        .attribute(
            types::int_between("min_lower_case_letter", 0, 128)
                .computed()
                .with_description("Minimum number of lowercase characters in password (0 - 128).")
                .with_provider_name("min-lower-case-letter"),
        )
        .attribute(
            types::int_between("min_upper_case_letter", 0, 128)
                .computed()
                .with_description("Minimum number of uppercase characters in password (0 - 128).")
                .with_provider_name("min-upper-case-letter"),
        )
        .attribute(
            types::int_between("min_non_alphanumeric", 0, 128)
                .computed()
                .with_description("Minimum number of non-alphanumeric characters in password (0 - 128).")
                .with_provider_name("min-non-alphanumeric"),
        )
        .attribute(
            types::int_between("min_number", 0, 128)
                .computed()
                .with_description("Minimum number of numeric characters in password (0 - 128).")
                .with_provider_name("min-number"),
        )
        .attribute(
            AttributeSchema::new("change_4_characters", AttributeType::String)
                .computed()
                .with_description("Enable/disable changing at least 4 characters for a new password.")
                .with_provider_name("change-4-characters"),
        )
        .attribute(
            AttributeSchema::new("expire_status", AttributeType::String)
                .computed()
                .with_description("Enable/disable password expiration.")
                .with_provider_name("expire-status"),
        )
        .attribute(
            types::int_between("expire_day", 1, 999)
                .computed()
                .with_description("Number of days after which passwords expire (1 - 999 days).")
                .with_provider_name("expire-day"),
        )
        .attribute(
            AttributeSchema::new("reuse_password", AttributeType::String)
                .computed()
                .with_description("Enable/disable reusing of password.")
                .with_provider_name("reuse-password"),
        )
    }
}
