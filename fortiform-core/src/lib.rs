//! Fortiform Core
//!
//! Descriptor-driven mapping between declarative configuration trees and
//! FortiOS REST payloads, plus the provider abstraction that runs CRUD flows.

pub mod compat;
pub mod mapper;
pub mod provider;
pub mod resource;
pub mod schema;
