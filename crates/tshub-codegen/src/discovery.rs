//! Hub discovery.
//!
//! A hub is any type whose direct base is one of the configured generic hub
//! bases (`Hub<TClient>` by default). Discovery only filters; whether the
//! base actually exposes a usable client interface is checked during
//! generation.

use tshub_core::{GeneratorConfig, TypeDefinition, TypeSource};

/// Returns every hub definition in `source`, in document order.
///
/// # Examples
///
/// ```
/// use tshub_codegen::discover_hubs;
/// use tshub_core::{GeneratorConfig, MetadataDocument, TypeDefinition, TypeRef};
///
/// let document = MetadataDocument::new(
///     None,
///     vec![
///         TypeDefinition::class("Demo.ChatHub").with_base(TypeRef::generic(
///             "Microsoft.AspNetCore.SignalR.Hub`1",
///             vec![TypeRef::named("Demo.IChatClient")],
///         )),
///         TypeDefinition::class("Demo.Message"),
///     ],
/// )?;
///
/// let hubs = discover_hubs(&document, &GeneratorConfig::default());
/// assert_eq!(hubs.len(), 1);
/// assert_eq!(hubs[0].name, "ChatHub");
/// # Ok::<(), tshub_core::MetadataError>(())
/// ```
#[must_use]
pub fn discover_hubs<'a, S: TypeSource + ?Sized>(
    source: &'a S,
    config: &GeneratorConfig,
) -> Vec<&'a TypeDefinition> {
    source
        .definitions()
        .iter()
        .filter(|definition| {
            definition
                .base_type
                .as_ref()
                .is_some_and(|base| config.is_hub_base(&base.name))
        })
        .collect()
}
