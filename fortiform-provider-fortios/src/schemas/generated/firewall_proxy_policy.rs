//! firewall_proxy_policy schema definition for FortiOS
//!
//! CMDB path: firewall/proxy-policy

use super::{DeleteStyle, FortiosSchemaConfig, IdentityStyle};
use fortiform_core::compat::CompatTable;
use fortiform_core::schema::{AttributeSchema, AttributeType, Constraint, ResourceSchema, types};

/// Returns the schema config for firewall_proxy_policy (firewall/proxy-policy)
pub fn firewall_proxy_policy_config() -> FortiosSchemaConfig {
    FortiosSchemaConfig {
        api_path: "firewall/proxy-policy",
        identity: IdentityStyle::Numeric {
            key_field: "policyid",
        },
        delete: DeleteStyle::Remove,
        compat: CompatTable::new(),
        schema: ResourceSchema::new("fortios.firewall_proxy_policy")
        .with_description("Configure proxy policies.")
        .attribute(
            AttributeSchema::new("uuid", AttributeType::String)
                .computed()
                .with_description("Universally Unique Identifier (UUID; automatically assigned but can be manually reset).")
                .with_provider_name("uuid"),
        )
        .attribute(
            AttributeSchema::new("policyid", AttributeType::Int)
                .required()
                .force_new()
                .zero_is_set()
                .with_description("Policy ID.")
                .with_provider_name("policyid"),
        )
        .attribute(
            AttributeSchema::new("proxy", AttributeType::String)
                .required()
                .with_description("Type of explicit proxy.")
                .with_provider_name("proxy"),
        )
        .attribute(
            AttributeSchema::new("srcintf", types::name_table(64))
                .with_description("Source interface names.")
                .with_provider_name("srcintf"),
        )
        .attribute(
            AttributeSchema::new("dstintf", types::name_table(64))
                .required()
                .with_description("Destination interface names.")
                .with_provider_name("dstintf"),
        )
        .attribute(
            AttributeSchema::new("srcaddr", types::name_table(64))
                .with_description("Source address objects (must be set when using Web proxy).")
                .with_provider_name("srcaddr"),
        )
        .attribute(
            AttributeSchema::new("poolname", types::name_table(64))
                .with_description("Name of IP pool object.")
                .with_provider_name("poolname"),
        )
        .attribute(
            AttributeSchema::new("dstaddr", types::name_table(64))
                .with_description("Destination address objects.")
                .with_provider_name("dstaddr"),
        )
        .attribute(
            AttributeSchema::new("internet_service", AttributeType::String)
                .computed()
                .with_description("Enable/disable use of Internet Services for this policy. If enabled, destination address and service are not used.")
                .with_provider_name("internet-service"),
        )
        .attribute(
            AttributeSchema::new("internet_service_negate", AttributeType::String)
                .computed()
                .with_description("When enabled, Internet Services match against any internet service EXCEPT the selected Internet Service.")
                .with_provider_name("internet-service-negate"),
        )
        .attribute(
            AttributeSchema::new("internet_service_id", types::id_table())
                .with_description("Internet Service ID.")
                .with_provider_name("internet-service-id"),
        )
        .attribute(
            AttributeSchema::new("internet_service_custom", types::name_table(64))
                .with_description("Custom Internet Service name.")
                .with_provider_name("internet-service-custom"),
        )
        .attribute(
            AttributeSchema::new("service", types::name_table(64))
                .with_description("Name of service objects.")
                .with_provider_name("service"),
        )
        .attribute(
            AttributeSchema::new("srcaddr_negate", AttributeType::String)
                .computed()
                .with_description("When enabled, source addresses match against any address EXCEPT the specified source addresses.")
                .with_provider_name("srcaddr-negate"),
        )
        .attribute(
            AttributeSchema::new("dstaddr_negate", AttributeType::String)
                .computed()
                .with_description("When enabled, destination addresses match against any address EXCEPT the specified destination addresses.")
                .with_provider_name("dstaddr-negate"),
        )
        .attribute(
            AttributeSchema::new("service_negate", AttributeType::String)
                .computed()
                .with_description("When enabled, services match against any service EXCEPT the specified destination services.")
                .with_provider_name("service-negate"),
        )
        .attribute(
            AttributeSchema::new("action", AttributeType::String)
                .computed()
                .with_description("Accept or deny traffic matching the policy parameters.")
                .with_provider_name("action"),
        )
        .attribute(
            AttributeSchema::new("status", AttributeType::String)
                .computed()
                .with_description("Enable/disable the active status of the policy.")
                .with_provider_name("status"),
        )
        .attribute(
            types::bounded_string("schedule", 35)
                .required()
                .with_description("Name of schedule object.")
                .with_provider_name("schedule"),
        )
        .attribute(
            AttributeSchema::new("logtraffic", AttributeType::String)
                .computed()
                .with_description("Enable/disable logging traffic through the policy.")
                .with_provider_name("logtraffic"),
        )
        .attribute(
            AttributeSchema::new("session_ttl", AttributeType::Int)
                .with_constraint(Constraint::IntRangeOrZero {
                    min: 300,
                    max: 604800,
                })
                .computed()
                .zero_is_set()
                .with_description("TTL in seconds for sessions accepted by this policy (0 means use the system default session TTL).")
                .with_provider_name("session-ttl"),
        )
        .attribute(
            AttributeSchema::new("srcaddr6", types::name_table(64))
                .with_description("IPv6 source address objects.")
                .with_provider_name("srcaddr6"),
        )
        .attribute(
            AttributeSchema::new("dstaddr6", types::name_table(64))
                .with_description("IPv6 destination address objects.")
                .with_provider_name("dstaddr6"),
        )
        .attribute(
            AttributeSchema::new("groups", types::name_table(64))
                .with_description("Names of group objects.")
                .with_provider_name("groups"),
        )
        .attribute(
            AttributeSchema::new("users", types::name_table(64))
                .with_description("Names of user objects.")
                .with_provider_name("users"),
        )
        .attribute(
            AttributeSchema::new("http_tunnel_auth", AttributeType::String)
                .computed()
                .with_description("Enable/disable HTTP tunnel authentication.")
                .with_provider_name("http-tunnel-auth"),
        )
        .attribute(
            types::bounded_string("webproxy_forward_server", 63)
                .computed()
                .with_description("Web proxy forward server name.")
                .with_provider_name("webproxy-forward-server"),
        )
        .attribute(
            types::bounded_string("webproxy_profile", 63)
                .computed()
                .with_description("Name of web proxy profile.")
                .with_provider_name("webproxy-profile"),
        )
        .attribute(
            AttributeSchema::new("transparent", AttributeType::String)
                .computed()
                .with_description("Enable to use the IP address of the client to connect to the server.")
                .with_provider_name("transparent"),
        )
        .attribute(
            AttributeSchema::new("webcache", AttributeType::String)
                .computed()
                .with_description("Enable/disable web caching.")
                .with_provider_name("webcache"),
        )
        .attribute(
            AttributeSchema::new("webcache_https", AttributeType::String)
                .computed()
                .with_description("Enable/disable web caching for HTTPS (Requires deep-inspection enabled in ssl-ssh-profile).")
                .with_provider_name("webcache-https"),
        )
        .attribute(
            AttributeSchema::new("disclaimer", AttributeType::String)
                .computed()
                .with_description("Web proxy disclaimer setting: by domain, policy, or user.")
                .with_provider_name("disclaimer"),
        )
        .attribute(
            AttributeSchema::new("utm_status", AttributeType::String)
                .computed()
                .with_description("Enable the use of UTM profiles/sensors/lists.")
                .with_provider_name("utm-status"),
        )
        .attribute(
            AttributeSchema::new("profile_type", AttributeType::String)
                .computed()
                .with_description("Determine whether the firewall policy allows security profile groups or single profiles only.")
                .with_provider_name("profile-type"),
        )
        .attribute(
            types::bounded_string("profile_group", 35)
                .computed()
                .with_description("Name of profile group.")
                .with_provider_name("profile-group"),
        )
        .attribute(
            types::bounded_string("av_profile", 35)
                .computed()
                .with_description("Name of an existing Antivirus profile.")
                .with_provider_name("av-profile"),
        )
        .attribute(
            types::bounded_string("webfilter_profile", 35)
                .computed()
                .with_description("Name of an existing Web filter profile.")
                .with_provider_name("webfilter-profile"),
        )
        .attribute(
            types::bounded_string("spamfilter_profile", 35)
                .computed()
                .with_description("Name of an existing Spam filter profile.")
                .with_provider_name("spamfilter-profile"),
        )
        .attribute(
            types::bounded_string("dlp_sensor", 35)
                .computed()
                .with_description("Name of an existing DLP sensor.")
                .with_provider_name("dlp-sensor"),
        )
        .attribute(
            types::bounded_string("ips_sensor", 35)
                .computed()
                .with_description("Name of an existing IPS sensor.")
                .with_provider_name("ips-sensor"),
        )
        .attribute(
            types::bounded_string("application_list", 35)
                .computed()
                .with_description("Name of an existing Application list.")
                .with_provider_name("application-list"),
        )
        .attribute(
            types::bounded_string("icap_profile", 35)
                .computed()
                .with_description("Name of an existing ICAP profile.")
                .with_provider_name("icap-profile"),
        )
        .attribute(
            types::bounded_string("waf_profile", 35)
                .computed()
                .with_description("Name of an existing Web application firewall profile.")
                .with_provider_name("waf-profile"),
        )
        .attribute(
            types::bounded_string("ssh_filter_profile", 35)
                .computed()
                .with_description("Name of an existing SSH filter profile.")
                .with_provider_name("ssh-filter-profile"),
        )
        .attribute(
            types::bounded_string("profile_protocol_options", 35)
                .computed()
                .with_description("Name of an existing Protocol options profile.")
                .with_provider_name("profile-protocol-options"),
        )
        .attribute(
            types::bounded_string("ssl_ssh_profile", 35)
                .computed()
                .with_description("Name of an existing SSL SSH profile.")
                .with_provider_name("ssl-ssh-profile"),
        )
        .attribute(
            types::bounded_string("replacemsg_override_group", 35)
                .computed()
                .with_description("Authentication replacement message override group.")
                .with_provider_name("replacemsg-override-group"),
        )
        .attribute(
            AttributeSchema::new("logtraffic_start", AttributeType::String)
                .computed()
                .with_description("Enable/disable policy log traffic start.")
                .with_provider_name("logtraffic-start"),
        )
        .attribute(
            types::bounded_string("label", 63)
                .computed()
                .with_description("VDOM-specific GUI visible label.")
                .with_provider_name("label"),
        )
        .attribute(
            types::bounded_string("global_label", 63)
                .computed()
                .with_description("Global web-based manager visible label.")
                .with_provider_name("global-label"),
        )
        .attribute(
            AttributeSchema::new("scan_botnet_connections", AttributeType::String)
                .computed()
                .with_description("Enable/disable scanning of connections to Botnet servers.")
                .with_provider_name("scan-botnet-connections"),
        )
        .attribute(
            types::bounded_string("comments", 1023)
                .with_description("Optional comments.")
                .with_provider_name("comments"),
        )
        .attribute(
            types::bounded_string("redirect_url", 1023)
                .with_description("Redirect URL for further explicit web proxy processing.")
                .with_provider_name("redirect-url"),
        )
    }
}
