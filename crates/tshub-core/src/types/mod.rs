//! Domain types for the tshub generator.
//!
//! # Module Organization
//!
//! - [`metadata`] - Host metadata as exported from the server assembly
//! - [`host`] - Classified host types
//! - [`translated`] - Translated TypeScript types
//! - [`signature`] - Method/callback signatures and the proxy descriptor
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use tshub_core::{HostType, MetadataDocument, ProxyDescriptor, TranslatedType};
//! ```

pub mod host;
pub mod metadata;
pub mod signature;
pub mod translated;

pub use host::{AliasType, ComplexType, EnumType, HostMember, HostType, Primitive};
pub use metadata::{
    MemberDefinition, MetadataDocument, MethodDefinition, ParameterDefinition, TypeDefinition,
    TypeDefinitionKind, TypeRef, TypeSource,
};
pub use signature::{CallbackSignature, MethodSignature, Parameter, Parameters, ProxyDescriptor};
pub use translated::{TranslatedType, TsType};
