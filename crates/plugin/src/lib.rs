//! # Vigil Plugin
//!
//! Registry of resource types for Vigil resource packs.
//!
//! A resource pack declares each resource with
//! [`ResourceMetadata::builder`](vigil_core::ResourceMetadata::builder) and
//! registers its implementation with [`ResourceRegistry::register`]. The
//! registry keeps the platform-support index the lifecycle consults and
//! constructs instances by name from JSON arguments.
//!
//! ## Core Types
//!
//! - [`ResourceRegistry`] - registry for the loading phase
//! - [`FrozenRegistry`] - shared read-only registry for evaluation
//! - [`ResourceType`] - type-erased descriptor of one registered resource
//! - [`PluginError`] - error type for registry operations

#![warn(missing_docs)]

mod error;
mod registry;
mod resource_type;

pub use error::PluginError;
pub use registry::{FrozenRegistry, ResourceRegistry};
pub use resource_type::ResourceType;

/// Result type for registry operations.
pub type PluginResult<T> = Result<T, PluginError>;
