//! Core types, errors, and configuration for the tshub generator.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Host metadata model read from a server assembly export ([`MetadataDocument`])
//! - Classified host types ([`HostType`]) and their translated TypeScript form
//!   ([`TranslatedType`])
//! - Method and callback signatures plus the [`ProxyDescriptor`] they feed
//! - Naming transforms shared by the type and surface generators
//! - Configuration structures and error types
//! - The `FxHashMap` alias used for name-keyed lookups

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod naming;
pub mod types;

pub use config::{Config, GeneratorConfig, OutputConfig, WireNameCasing};
pub use error::{ConfigError, MetadataError};
pub use hash::{FxHashMap, fx_hash_map_with_capacity};
pub use naming::{to_camel_case, to_pascal_case};
pub use types::{
    AliasType, CallbackSignature, ComplexType, EnumType, HostMember, HostType, MemberDefinition,
    MetadataDocument, MethodDefinition, MethodSignature, Parameter, ParameterDefinition, Parameters,
    Primitive, ProxyDescriptor, TranslatedType, TsType, TypeDefinition, TypeDefinitionKind,
    TypeRef, TypeSource,
};
