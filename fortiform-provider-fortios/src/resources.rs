//! Resource type definitions for the FortiOS provider
//!
//! Each type reports its name and the descriptor table from `schemas::generated`.

use fortiform_core::provider::ResourceType;
use fortiform_core::schema::ResourceSchema;

use crate::schemas::generated::{
    firewall_proxy_policy, log_tacacs_accounting2_filter, system_password_policy,
};

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr, $config:path) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
            fn schema(&self) -> ResourceSchema {
                $config().schema
            }
        }
    };
}

define_resource_type!(
    FirewallProxyPolicyType,
    "firewall_proxy_policy",
    firewall_proxy_policy::firewall_proxy_policy_config
);
define_resource_type!(
    SystemPasswordPolicyType,
    "system_password_policy",
    system_password_policy::system_password_policy_config
);
define_resource_type!(
    LogTacacsAccounting2FilterType,
    "log_tacacs_accounting2_filter",
    log_tacacs_accounting2_filter::log_tacacs_accounting2_filter_config
);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![
        Box::new(FirewallProxyPolicyType),
        Box::new(SystemPasswordPolicyType),
        Box::new(LogTacacsAccounting2FilterType),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_schemas() {
        for rt in resource_types() {
            assert_eq!(
                rt.schema().resource_type,
                format!("fortios.{}", rt.name())
            );
        }
    }
}
