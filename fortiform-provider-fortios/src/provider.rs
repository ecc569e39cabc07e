//! FortiOS Provider implementation
//!
//! This module contains the main provider implementation that maps config
//! trees onto the FortiOS CMDB REST API and back.

use std::sync::Arc;

use fortiform_core::mapper::{ObjectMode, ReadMode, RefreshContext, WireObject, build_object, refresh};
use fortiform_core::provider::{ProviderError, ProviderResult};
use fortiform_core::resource::{Attributes, Resource, ResourceId, State, Value};
use serde_json::Value as JsonValue;

use crate::client::{FortiosClient, RequestOptions};
use crate::config::FortiosConfig;
use crate::schemas::generated::{
    DeleteStyle, FortiosSchemaConfig, IdentityStyle, VDOM_PARAM, configs,
};
use crate::utils::{IdentifierError, decode_name_mkey, decode_numeric_mkey};

/// Get the FortiosSchemaConfig for a resource type
fn get_schema_config(id: &ResourceId) -> ProviderResult<FortiosSchemaConfig> {
    configs()
        .into_iter()
        .find(|c| c.resource_type() == id.resource_type)
        .ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })
}

/// FortiOS Provider
pub struct FortiosProvider {
    client: Arc<dyn FortiosClient>,
    config: FortiosConfig,
}

impl FortiosProvider {
    /// Create a new FortiosProvider on top of a REST client
    pub fn new(client: Arc<dyn FortiosClient>, config: FortiosConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FortiosConfig {
        &self.config
    }

    /// Options for one request: the resource's own vdom wins over the default
    fn request_options(
        &self,
        config: &FortiosSchemaConfig,
        attributes: &Attributes,
    ) -> RequestOptions {
        let vdom = config
            .is_vdom_scoped()
            .then(|| attributes.get(VDOM_PARAM).and_then(Value::as_str))
            .flatten()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.vdom.clone());

        RequestOptions::new(self.config.retries).with_vdom(vdom)
    }

    fn validate(config: &FortiosSchemaConfig, resource: &Resource) -> ProviderResult<()> {
        config.schema.validate(&resource.attributes).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            ProviderError::new(format!("Invalid configuration: {}", messages.join("; ")))
                .for_resource(resource.id.clone())
        })
    }

    /// Decode the identifier from a create/update response
    ///
    /// Singletons fall back to their fixed literal, numeric kinds to the key
    /// field of the object that was sent.
    fn decode_identifier(
        config: &FortiosSchemaConfig,
        response: &WireObject,
        sent: &WireObject,
    ) -> ProviderResult<String> {
        let mkey = response.get("mkey").unwrap_or(&JsonValue::Null);
        let invalid = |e: IdentifierError| ProviderError::new("Invalid identifier in response").with_cause(e);

        match &config.identity {
            IdentityStyle::Singleton { literal } => Ok(decode_name_mkey(mkey)
                .map_err(invalid)?
                .unwrap_or_else(|| literal.to_string())),
            IdentityStyle::Numeric { key_field } => {
                if let Some(identifier) = decode_numeric_mkey(mkey).map_err(invalid)? {
                    return Ok(identifier);
                }
                let wire_key = config
                    .schema
                    .get(key_field)
                    .and_then(|a| a.wire_name())
                    .unwrap_or(key_field);
                sent.get(wire_key)
                    .map(decode_numeric_mkey)
                    .transpose()
                    .map_err(invalid)?
                    .flatten()
                    .ok_or_else(|| ProviderError::new("No identifier returned"))
            }
        }
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource, refreshing a copy of the prior attributes
    pub async fn read_resource(&self, prior: &State, mode: ReadMode) -> ProviderResult<State> {
        let id = prior.id.clone();
        let config = get_schema_config(&id)?;

        let Some(identifier) = prior.identifier.as_deref() else {
            return Ok(State::not_found(id));
        };

        let opts = self.request_options(&config, &prior.attributes);
        log::debug!(
            "reading {} {} (vdom: {:?}, retries: {})",
            config.api_path,
            identifier,
            opts.vdom,
            opts.retries
        );

        let response = self
            .client
            .read(config.api_path, identifier, &opts)
            .await
            .map_err(|e| {
                ProviderError::new(format!("Error reading {} resource", id.resource_type))
                    .with_cause(e)
                    .for_resource(id.clone())
            })?;

        let Some(wire) = response else {
            log::warn!("resource ({}) not found, removing from state", identifier);
            return Ok(State::not_found(id));
        };

        let mut attributes = prior.attributes.clone();
        let ctx = RefreshContext::new(mode, &config.compat)
            .with_firmware(self.config.firmware_version);
        refresh(&config.schema, &wire, &mut attributes, &ctx).map_err(|e| {
            ProviderError::new(format!(
                "Error reading {} resource from API",
                id.resource_type
            ))
            .with_cause(e)
            .for_resource(id.clone())
        })?;

        Ok(State::existing(id, attributes).with_identifier(identifier))
    }

    /// Create a resource using its configuration
    pub async fn create_resource(&self, resource: Resource) -> ProviderResult<State> {
        let config = get_schema_config(&resource.id)?;
        Self::validate(&config, &resource)?;

        let object = build_object(&config.schema, &resource.attributes, ObjectMode::Write)
            .map_err(|e| {
                ProviderError::new(format!(
                    "Error creating {} resource while getting object",
                    resource.id.resource_type
                ))
                .with_cause(e)
                .for_resource(resource.id.clone())
            })?;

        let opts = self.request_options(&config, &resource.attributes);
        log::debug!("creating {} (vdom: {:?})", config.api_path, opts.vdom);

        // Singletons always exist on the device, so creating one is an update
        let result = match &config.identity {
            IdentityStyle::Numeric { .. } => {
                self.client
                    .create(config.api_path, object.clone(), &opts)
                    .await
            }
            IdentityStyle::Singleton { literal } => {
                self.client
                    .update(config.api_path, object.clone(), literal, &opts)
                    .await
            }
        };
        let response = result.map_err(|e| {
            ProviderError::new(format!(
                "Error creating {} resource",
                resource.id.resource_type
            ))
            .with_cause(e)
            .for_resource(resource.id.clone())
        })?;

        let identifier = Self::decode_identifier(&config, &response, &object)
            .map_err(|e| e.for_resource(resource.id.clone()))?;

        let prior = State::from(&resource).with_identifier(identifier);
        self.read_resource(&prior, ReadMode::Refresh).await
    }

    /// Update a resource
    pub async fn update_resource(
        &self,
        id: ResourceId,
        identifier: &str,
        to: Resource,
    ) -> ProviderResult<State> {
        let config = get_schema_config(&id)?;
        Self::validate(&config, &to)?;

        let object =
            build_object(&config.schema, &to.attributes, ObjectMode::Write).map_err(|e| {
                ProviderError::new(format!(
                    "Error updating {} resource while getting object",
                    id.resource_type
                ))
                .with_cause(e)
                .for_resource(id.clone())
            })?;

        let opts = self.request_options(&config, &to.attributes);
        log::debug!(
            "updating {} {} (vdom: {:?})",
            config.api_path,
            identifier,
            opts.vdom
        );

        let response = self
            .client
            .update(config.api_path, object.clone(), identifier, &opts)
            .await
            .map_err(|e| {
                ProviderError::new(format!("Error updating {} resource", id.resource_type))
                    .with_cause(e)
                    .for_resource(id.clone())
            })?;

        let identifier = Self::decode_identifier(&config, &response, &object)
            .map_err(|e| e.for_resource(id.clone()))?;

        let prior = State::existing(id, to.attributes).with_identifier(identifier);
        self.read_resource(&prior, ReadMode::Refresh).await
    }

    /// Delete a resource
    pub async fn delete_resource(&self, state: &State) -> ProviderResult<()> {
        let id = &state.id;
        let config = get_schema_config(id)?;

        let Some(identifier) = state.identifier.as_deref() else {
            return Ok(());
        };
        let opts = self.request_options(&config, &state.attributes);

        match config.delete {
            DeleteStyle::Remove => {
                log::debug!("deleting {} {}", config.api_path, identifier);
                self.client
                    .delete(config.api_path, identifier, &opts)
                    .await
                    .map_err(|e| {
                        ProviderError::new(format!("Error deleting {} resource", id.resource_type))
                            .with_cause(e)
                            .for_resource(id.clone())
                    })
            }
            DeleteStyle::Reset => {
                log::debug!("resetting {} {}", config.api_path, identifier);
                let object = build_object(&config.schema, &state.attributes, ObjectMode::Clear)
                    .map_err(|e| {
                        ProviderError::new(format!(
                            "Error clearing {} resource while getting object",
                            id.resource_type
                        ))
                        .with_cause(e)
                        .for_resource(id.clone())
                    })?;
                self.client
                    .update(config.api_path, object, identifier, &opts)
                    .await
                    .map(|_| ())
                    .map_err(|e| {
                        ProviderError::new(format!("Error clearing {} resource", id.resource_type))
                            .with_cause(e)
                            .for_resource(id.clone())
                    })
            }
        }
    }

    /// Import an existing object by identifier
    pub async fn import_resource(&self, id: ResourceId, identifier: &str) -> ProviderResult<State> {
        let prior = State::existing(id, Attributes::new()).with_identifier(identifier);
        self.read_resource(&prior, ReadMode::Import).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use fortiform_core::compat::FirmwareVersion;
    use fortiform_core::resource::table;
    use serde_json::json;

    use super::*;
    use crate::client::{ClientError, ClientResult};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create {
            path: String,
            object: WireObject,
            opts: RequestOptions,
        },
        Read {
            path: String,
            mkey: String,
            opts: RequestOptions,
        },
        Update {
            path: String,
            object: WireObject,
            mkey: String,
            opts: RequestOptions,
        },
        Delete {
            path: String,
            mkey: String,
            opts: RequestOptions,
        },
    }

    // Scripted client recording every call
    #[derive(Default)]
    struct MockClient {
        calls: Mutex<Vec<Call>>,
        create_response: WireObject,
        update_response: WireObject,
        read_response: Option<WireObject>,
        fail_status: Option<u16>,
    }

    impl MockClient {
        fn record(&self, call: Call) -> ClientResult<()> {
            self.calls.lock().unwrap().push(call);
            match self.fail_status {
                Some(status) => Err(ClientError::status(status, "request failed")),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FortiosClient for MockClient {
        async fn create(
            &self,
            path: &str,
            object: WireObject,
            opts: &RequestOptions,
        ) -> ClientResult<WireObject> {
            self.record(Call::Create {
                path: path.to_string(),
                object,
                opts: opts.clone(),
            })?;
            Ok(self.create_response.clone())
        }

        async fn read(
            &self,
            path: &str,
            mkey: &str,
            opts: &RequestOptions,
        ) -> ClientResult<Option<WireObject>> {
            self.record(Call::Read {
                path: path.to_string(),
                mkey: mkey.to_string(),
                opts: opts.clone(),
            })?;
            Ok(self.read_response.clone())
        }

        async fn update(
            &self,
            path: &str,
            object: WireObject,
            mkey: &str,
            opts: &RequestOptions,
        ) -> ClientResult<WireObject> {
            self.record(Call::Update {
                path: path.to_string(),
                object,
                mkey: mkey.to_string(),
                opts: opts.clone(),
            })?;
            Ok(self.update_response.clone())
        }

        async fn delete(&self, path: &str, mkey: &str, opts: &RequestOptions) -> ClientResult<()> {
            self.record(Call::Delete {
                path: path.to_string(),
                mkey: mkey.to_string(),
                opts: opts.clone(),
            })
        }
    }

    fn object(value: JsonValue) -> WireObject {
        value.as_object().cloned().unwrap()
    }

    fn provider(client: &Arc<MockClient>, config: FortiosConfig) -> FortiosProvider {
        FortiosProvider::new(client.clone(), config)
    }

    fn name_record(name: &str) -> Attributes {
        HashMap::from([("name".to_string(), Value::from(name))])
    }

    fn proxy_policy() -> Resource {
        Resource::new("firewall_proxy_policy", "web")
            .with_attribute("policyid", 3)
            .with_attribute("proxy", "explicit-web")
            .with_attribute("dstintf", table(vec![name_record("port1")]))
            .with_attribute("schedule", "always")
    }

    fn proxy_policy_response() -> WireObject {
        object(json!({
            "policyid": 3.0,
            "uuid": "9c4f2a34-5d1e-51eb-2c3f-1e2b3c4d5e6f",
            "proxy": "explicit-web",
            "srcintf": [{"name": "any", "q_origin_key": "any"}],
            "dstintf": [{"name": "port1", "q_origin_key": "port1"}],
            "schedule": "always",
            "status": "enable",
            "session-ttl": 0.0,
        }))
    }

    #[tokio::test]
    async fn create_proxy_policy() {
        let client = Arc::new(MockClient {
            create_response: object(json!({"mkey": 3.0, "status": "success"})),
            read_response: Some(proxy_policy_response()),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let state = provider.create_resource(proxy_policy()).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            Call::Create {
                path: "firewall/proxy-policy".to_string(),
                object: object(json!({
                    "policyid": 3,
                    "proxy": "explicit-web",
                    "dstintf": [{"name": "port1"}],
                    "schedule": "always",
                })),
                opts: RequestOptions::new(1),
            }
        );
        assert!(matches!(&calls[1], Call::Read { mkey, .. } if mkey == "3"));

        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("3"));
        assert_eq!(state.attributes.get("policyid"), Some(&Value::Int(3)));
        assert_eq!(state.attributes.get("session_ttl"), Some(&Value::Int(0)));
        assert_eq!(
            state.attributes.get("dstintf"),
            Some(&table(vec![name_record("port1")]))
        );
        // Never configured, so not pulled into state
        assert!(!state.attributes.contains_key("srcintf"));
    }

    #[tokio::test]
    async fn create_without_mkey_uses_key_field() {
        let client = Arc::new(MockClient {
            read_response: Some(proxy_policy_response()),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let state = provider.create_resource(proxy_policy()).await.unwrap();
        assert_eq!(state.identifier.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn create_rejects_fractional_mkey() {
        let client = Arc::new(MockClient {
            create_response: object(json!({"mkey": 3.5})),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let err = provider.create_resource(proxy_policy()).await.unwrap_err();
        assert!(err.message.contains("Invalid identifier"));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn create_singleton_is_an_update() {
        let client = Arc::new(MockClient {
            read_response: Some(object(json!({"minimum-length": 10.0, "status": "enable"}))),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let resource = Resource::new("system_password_policy", "admins")
            .with_attribute("status", "enable")
            .with_attribute("minimum_length", 10);
        let state = provider.create_resource(resource).await.unwrap();

        let calls = client.calls();
        assert_eq!(
            calls[0],
            Call::Update {
                path: "system/password-policy".to_string(),
                object: object(json!({"status": "enable", "minimum-length": 10})),
                mkey: "SystemPasswordPolicy".to_string(),
                opts: RequestOptions::new(1),
            }
        );
        assert_eq!(state.identifier.as_deref(), Some("SystemPasswordPolicy"));
        assert_eq!(state.attributes.get("minimum_length"), Some(&Value::Int(10)));
        assert!(!state.attributes.contains_key("expire_day"));
    }

    #[tokio::test]
    async fn create_validates_before_calling_api() {
        let client = Arc::new(MockClient::default());
        let provider = provider(&client, FortiosConfig::default());

        let resource = proxy_policy().with_attribute("schedule", "s".repeat(36));
        let err = provider.create_resource(resource).await.unwrap_err();

        assert!(err.message.starts_with("Invalid configuration"));
        assert!(err.message.contains("schedule"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_are_wrapped() {
        let client = Arc::new(MockClient {
            fail_status: Some(500),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let err = provider.create_resource(proxy_policy()).await.unwrap_err();
        assert_eq!(err.message, "Error creating firewall_proxy_policy resource");
        assert_eq!(
            err.resource_id,
            Some(ResourceId::new("firewall_proxy_policy", "web"))
        );
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "HTTP 500: request failed");
    }

    #[tokio::test]
    async fn read_missing_object_clears_identifier() {
        let client = Arc::new(MockClient::default());
        let provider = provider(&client, FortiosConfig::default());

        let prior = State::from(&proxy_policy()).with_identifier("3");
        let state = provider
            .read_resource(&prior, ReadMode::Refresh)
            .await
            .unwrap();

        assert!(!state.exists);
        assert_eq!(state.identifier, None);
    }

    #[tokio::test]
    async fn read_without_identifier_skips_api() {
        let client = Arc::new(MockClient::default());
        let provider = provider(&client, FortiosConfig::default());

        let state = provider
            .read_resource(&State::from(&proxy_policy()), ReadMode::Refresh)
            .await
            .unwrap();
        assert!(!state.exists);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn read_reports_fatal_commit_errors() {
        let mut response = proxy_policy_response();
        response.insert("session-ttl".to_string(), json!("0"));
        let client = Arc::new(MockClient {
            read_response: Some(response),
            ..Default::default()
        });
        let provider = provider(
            &client,
            FortiosConfig {
                firmware_version: Some(FirmwareVersion::new(6, 0, 0)),
                ..Default::default()
            },
        );

        let prior = State::from(&proxy_policy()).with_identifier("3");
        let err = provider
            .read_resource(&prior, ReadMode::Refresh)
            .await
            .unwrap_err();
        assert_eq!(
            err.message,
            "Error reading firewall_proxy_policy resource from API"
        );
        assert!(err.to_string().contains("Error reading session_ttl"));
    }

    #[tokio::test]
    async fn update_with_vanished_object_clears_identifier() {
        let client = Arc::new(MockClient {
            update_response: object(json!({"mkey": 3.0})),
            read_response: None,
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let from = State::from(&proxy_policy()).with_identifier("3");
        let to = proxy_policy().with_attribute("status", "disable");
        let state = provider
            .update_resource(from.id.clone(), "3", to)
            .await
            .unwrap();

        assert!(!state.exists);
        assert_eq!(state.identifier, None);

        let calls = client.calls();
        assert!(matches!(
            &calls[0],
            Call::Update { mkey, object, .. }
                if mkey == "3" && object.get("status") == Some(&json!("disable"))
        ));
    }

    #[tokio::test]
    async fn delete_removes_policy() {
        let client = Arc::new(MockClient::default());
        let provider = provider(
            &client,
            FortiosConfig {
                vdom: Some("root".to_string()),
                ..Default::default()
            },
        );

        let state = State::from(&proxy_policy()).with_identifier("3");
        provider.delete_resource(&state).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![Call::Delete {
                path: "firewall/proxy-policy".to_string(),
                mkey: "3".to_string(),
                opts: RequestOptions::new(1).with_vdom(Some("root".to_string())),
            }]
        );
    }

    #[tokio::test]
    async fn delete_resets_singleton_fields() {
        let client = Arc::new(MockClient::default());
        let provider = provider(
            &client,
            FortiosConfig {
                vdom: Some("root".to_string()),
                ..Default::default()
            },
        );

        let resource = Resource::new("log_tacacs_accounting2_filter", "filter")
            .with_attribute("vdomparam", "customer1")
            .with_attribute("login_audit", "enable");
        let state = State::from(&resource).with_identifier("LogTacacsAccounting2Filter");
        provider.delete_resource(&state).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![Call::Update {
                path: "log.tacacs+accounting2/filter".to_string(),
                object: object(json!({
                    "login-audit": null,
                    "config-change-audit": null,
                    "cli-cmd-audit": null,
                })),
                mkey: "LogTacacsAccounting2Filter".to_string(),
                opts: RequestOptions::new(1).with_vdom(Some("customer1".to_string())),
            }]
        );
    }

    #[tokio::test]
    async fn import_pulls_all_tables() {
        let client = Arc::new(MockClient {
            read_response: Some(proxy_policy_response()),
            ..Default::default()
        });
        let provider = provider(&client, FortiosConfig::default());

        let state = provider
            .import_resource(ResourceId::new("firewall_proxy_policy", "imported"), "3")
            .await
            .unwrap();

        assert_eq!(state.identifier.as_deref(), Some("3"));
        assert_eq!(
            state.attributes.get("srcintf"),
            Some(&table(vec![name_record("any")]))
        );
        assert_eq!(
            state.attributes.get("proxy"),
            Some(&Value::from("explicit-web"))
        );
    }

    #[tokio::test]
    async fn unknown_resource_type() {
        let client = Arc::new(MockClient::default());
        let provider = provider(&client, FortiosConfig::default());

        let err = provider
            .create_resource(Resource::new("system_dns", "dns"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Unknown resource type: system_dns");
    }
}
