//! Fortiform FortiOS Provider
//!
//! FortiOS CMDB REST API Provider implementation.
//!
//! ## Module Structure
//!
//! - `client` - REST client seam (`FortiosClient`) and per-request options
//! - `config` - Provider-level settings (default vdom, retries, firmware)
//! - `resources` - Resource type definitions
//! - `provider` - FortiosProvider implementation
//! - `schemas` - Generated descriptor tables
//! - `utils` - Identifier decoding

pub mod client;
pub mod config;
pub mod provider;
pub mod resources;
pub mod schemas;
pub mod utils;

// Re-export main types
pub use client::{ClientError, FortiosClient, RequestOptions};
pub use config::{ConfigError, FortiosConfig};
pub use provider::FortiosProvider;
pub use utils::{IdentifierError, decode_name_mkey, decode_numeric_mkey};

use fortiform_core::mapper::ReadMode;
use fortiform_core::provider::{BoxFuture, Provider, ProviderResult};
use fortiform_core::resource::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for FortiosProvider {
    fn name(&self) -> &'static str {
        "fortios"
    }

    fn resource_types(&self) -> Vec<Box<dyn fortiform_core::provider::ResourceType>> {
        resource_types()
    }

    fn read(&self, prior: &State, mode: ReadMode) -> BoxFuture<'_, ProviderResult<State>> {
        let prior = prior.clone();
        Box::pin(async move { self.read_resource(&prior, mode).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        _from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let to = to.clone();
        Box::pin(async move { self.update_resource(id, &identifier, to).await })
    }

    fn delete(&self, state: &State) -> BoxFuture<'_, ProviderResult<()>> {
        let state = state.clone();
        Box::pin(async move { self.delete_resource(&state).await })
    }

    fn import(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.import_resource(id, &identifier).await })
    }
}
