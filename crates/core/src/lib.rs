//! # Vigil Core
//!
//! Shared data model for the Vigil resource-plugin framework.
//!
//! - [`ResourceKey`]: validated resource type name, kept exactly as written
//! - [`ResourceMetadata`]: declarative facts about one resource type, built
//!   with [`ResourceMetadata::builder`]
//! - [`SupportCriterion`]: one platform-matching predicate
//!
//! This crate has no runtime behavior. Lifecycle and transport live in
//! `vigil-resource`; registration lives in `vigil-plugin`.

mod keys;
mod metadata;
mod support;

pub use keys::{ResourceKey, ResourceKeyError};
pub use metadata::{
    Arity, FilterCriterion, Matcher, MatcherArg, Property, RelatedResource, RequiredPermission,
    ResourceMetadata, ResourceMetadataBuilder, ResourceParam,
};
pub use support::SupportCriterion;
