//! TypeScript code generation for SignalR hubs.
//!
//! This crate turns host metadata ([`tshub_core::MetadataDocument`]) into a
//! typed TypeScript client: one proxy class per hub plus one declaration file
//! per enum, object or named collection type reachable from the hub's
//! signatures.
//!
//! # Overview
//!
//! - [`Classifier`]: maps a type reference to exactly one host type kind
//! - [`Translator`]: walks the type graph, memoizing named types in a
//!   [`DeclarationRegistry`] and terminating on cycles
//! - [`SignatureBuilder`]: builds method and callback signatures
//! - [`render_proxy`]: renders the proxy class
//! - [`render_react_context`] / [`render_context_hook`]: optional React glue
//! - [`HubGenerator`]: discovers hubs, assembles a [`HubBundle`] per hub and
//!   rejects bundles that disagree about a shared declaration file
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use tshub_codegen::HubGenerator;
//! use tshub_core::{Config, MetadataDocument};
//!
//! let document = MetadataDocument::load(Utf8Path::new("metadata.json"))?;
//! let config = Config::default();
//!
//! for (hub, result) in HubGenerator::new(&document, &config).generate_all() {
//!     match result {
//!         Ok(bundle) => {
//!             for file in bundle.files() {
//!                 println!("{hub}: {}", file.path);
//!             }
//!         }
//!         Err(e) => eprintln!("{hub}: {e}"),
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! HubGenerator (one unit per hub, rayon)
//!     │
//!     ├── discover_hubs
//!     │
//!     ├── SignatureBuilder
//!     │       │
//!     │       └── Translator ──▶ DeclarationRegistry
//!     │               │
//!     │               └── Classifier ──▶ TypeSource
//!     │
//!     ├── render_proxy
//!     │
//!     └── render_react_context / render_context_hook
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod bundle;
mod classifier;
mod discovery;
mod error;
mod generator;
mod registry;
mod scaffold;
mod signature;
mod surface;
mod translator;

#[cfg(test)]
mod test_support;

pub use bundle::{GeneratedFile, HubBundle, Scaffold};
pub use classifier::{Classifier, primitive_for};
pub use discovery::discover_hubs;
pub use error::GenerateError;
pub use generator::HubGenerator;
pub use registry::{Declaration, DeclarationKind, DeclarationRegistry, RegistryState};
pub use scaffold::{render_context_hook, render_react_context};
pub use signature::SignatureBuilder;
pub use surface::render_proxy;
pub use translator::Translator;
