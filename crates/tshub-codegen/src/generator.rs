//! Hub generation.
//!
//! [`HubGenerator`] drives one generation unit per hub:
//!
//! 1. Resolve the client interface from the hub's generic base type
//! 2. Build callback signatures, then method signatures, against a fresh
//!    [`DeclarationRegistry`]
//! 3. Render the proxy (and optional React scaffolding)
//! 4. Package everything into a [`HubBundle`]
//!
//! Units share nothing but the read-only metadata, so
//! [`HubGenerator::generate_all`] runs them in parallel with rayon. A failing
//! unit produces no bundle at all.
//!
//! All bundles write their declarations into the same types directory. After
//! the parallel phase, a bundle whose declaration file was already claimed by
//! an earlier bundle (in discovery order) for a different type, or with
//! different text, fails with [`GenerateError::NameCollision`].

use rayon::prelude::*;
use tracing::{debug, info, warn};
use tshub_core::{Config, FxHashMap, ProxyDescriptor, TypeDefinition, TypeRef, TypeSource};

use crate::bundle::{HubBundle, Scaffold};
use crate::classifier::Classifier;
use crate::discovery::discover_hubs;
use crate::error::GenerateError;
use crate::registry::DeclarationRegistry;
use crate::scaffold::{render_context_hook, render_react_context};
use crate::signature::SignatureBuilder;
use crate::surface::render_proxy;
use crate::translator::Translator;

/// Generates hub bundles from a metadata source.
///
/// # Examples
///
/// ```
/// use tshub_codegen::HubGenerator;
/// use tshub_core::{
///     Config, MetadataDocument, MethodDefinition, ParameterDefinition, TypeDefinition, TypeRef,
/// };
///
/// let document = MetadataDocument::new(
///     None,
///     vec![
///         TypeDefinition::interface("Demo.IChatClient").with_method(MethodDefinition::new(
///             "MessageReceived",
///             vec![ParameterDefinition::new("text", TypeRef::named("System.String"))],
///         )),
///         TypeDefinition::class("Demo.ChatHub").with_base(TypeRef::generic(
///             "Microsoft.AspNetCore.SignalR.Hub`1",
///             vec![TypeRef::named("Demo.IChatClient")],
///         )),
///     ],
/// )?;
///
/// let config = Config::default();
/// let generator = HubGenerator::new(&document, &config);
/// let results = generator.generate_all();
/// assert_eq!(results.len(), 1);
///
/// let bundle = results[0].1.as_ref().unwrap();
/// assert_eq!(bundle.class_name, "ChatHubClient");
/// assert!(bundle.proxy.contains("addMessageReceivedHandler(callback: (text: string) => void): void {"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HubGenerator<'a, S: ?Sized> {
    source: &'a S,
    config: &'a Config,
}

impl<'a, S: TypeSource + ?Sized> HubGenerator<'a, S> {
    /// Creates a generator over a metadata source.
    #[must_use]
    pub const fn new(source: &'a S, config: &'a Config) -> Self {
        Self { source, config }
    }

    /// Returns the hubs this generator would generate, in document order.
    #[must_use]
    pub fn hubs(&self) -> Vec<&'a TypeDefinition> {
        discover_hubs(self.source, &self.config.generator)
    }

    /// Resolves the client callback interface of a hub.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnresolvedAncestor`] if the hub has no
    /// configured hub base, the base does not carry exactly one type
    /// argument, or that argument is not defined in the metadata.
    pub fn client_interface(
        &self,
        hub: &TypeDefinition,
    ) -> Result<&'a TypeDefinition, GenerateError> {
        let unresolved = |reason: String| GenerateError::UnresolvedAncestor {
            hub: hub.full_name.clone(),
            reason,
        };

        let base = hub
            .base_type
            .as_ref()
            .ok_or_else(|| unresolved("it has no base type".to_owned()))?;
        if !self.config.generator.is_hub_base(&base.name) {
            return Err(unresolved(format!(
                "base type '{}' is not a configured hub base",
                base.name
            )));
        }

        let client: &TypeRef = match base.arguments.as_slice() {
            [client] => client,
            arguments => {
                return Err(unresolved(format!(
                    "base type '{}' has {} type argument(s), expected 1",
                    base.name,
                    arguments.len()
                )));
            }
        };

        self.source.definition(&client.name).ok_or_else(|| {
            unresolved(format!(
                "client interface '{}' is not defined in the metadata",
                client.name
            ))
        })
    }

    /// Generates the bundle for one hub.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] met while resolving the client
    /// interface or translating any signature; no partial bundle is produced.
    pub fn generate(&self, hub: &TypeDefinition) -> Result<HubBundle, GenerateError> {
        let client = self.client_interface(hub)?;
        debug!(hub = %hub.full_name, client = %client.full_name, "Resolved client interface");

        let generator = &self.config.generator;
        let translator = Translator::new(Classifier::new(self.source));
        let builder = SignatureBuilder::new(translator, generator.wire_casing);
        let mut registry = DeclarationRegistry::new();

        // Callbacks first: their references lead the import list.
        let mut callbacks = Vec::with_capacity(client.methods.len());
        for method in &client.methods {
            callbacks.push(builder.build_callback(&client.full_name, method, &mut registry)?);
        }

        let mut methods = Vec::with_capacity(hub.methods.len());
        for method in &hub.methods {
            methods.push(builder.build_method(&hub.full_name, method, &mut registry)?);
        }

        let class_name = generator.client_class_name(&hub.name);
        let proxy = ProxyDescriptor::new(class_name.as_str(), methods, callbacks);
        let text = render_proxy(&proxy, generator);

        let scaffold = self.config.output.create_react_context.then(|| Scaffold {
            context: render_react_context(&class_name, &generator.transport_module),
            hook: render_context_hook(&class_name),
        });

        info!(
            hub = %hub.full_name,
            class = %class_name,
            methods = proxy.methods.len(),
            callbacks = proxy.callbacks.len(),
            declarations = registry.len(),
            "Generated hub client"
        );

        Ok(HubBundle {
            hub: hub.full_name.clone(),
            class_name,
            proxy: text,
            declarations: registry.into_declarations(),
            types_dir: generator.types_dir.clone(),
            scaffold,
        })
    }
}

impl<S: TypeSource + Sync + ?Sized> HubGenerator<'_, S> {
    /// Generates every discovered hub as an independent unit, in parallel.
    ///
    /// Results keep discovery order and pair each hub's fully-qualified name
    /// with its outcome. A bundle that would overwrite another bundle's
    /// declaration file is replaced by [`GenerateError::NameCollision`].
    #[must_use]
    pub fn generate_all(&self) -> Vec<(String, Result<HubBundle, GenerateError>)> {
        let hubs = self.hubs();
        info!(count = hubs.len(), "Generating hub clients");

        let mut results: Vec<_> = hubs
            .par_iter()
            .map(|hub| {
                let result = self.generate(hub);
                if let Err(e) = &result {
                    warn!(
                        hub = %hub.full_name,
                        kind = e.kind(),
                        error = %e,
                        "Hub generation aborted"
                    );
                }
                (hub.full_name.clone(), result)
            })
            .collect();

        reject_shared_name_conflicts(&mut results);
        results
    }
}

/// Fails every bundle that disagrees with an earlier successful bundle about
/// the contents of a shared declaration file.
fn reject_shared_name_conflicts(results: &mut [(String, Result<HubBundle, GenerateError>)]) {
    // declaration name -> (qualified name, text) of its first writer
    let mut claimed: FxHashMap<String, (String, String)> = FxHashMap::default();

    for (hub, result) in results.iter_mut() {
        let Ok(bundle) = result else {
            continue;
        };

        let conflict = bundle.declarations.iter().find_map(|declaration| {
            let (qualified, text) = claimed.get(&declaration.name)?;
            (qualified != &declaration.qualified_name || text != &declaration.text).then(|| {
                GenerateError::NameCollision {
                    name: declaration.name.clone(),
                    first: qualified.clone(),
                    second: declaration.qualified_name.clone(),
                }
            })
        });
        if let Some(e) = conflict {
            warn!(hub = %hub, kind = e.kind(), error = %e, "Hub generation aborted");
            *result = Err(e);
            continue;
        }

        for declaration in &bundle.declarations {
            claimed
                .entry(declaration.name.clone())
                .or_insert_with(|| (declaration.qualified_name.clone(), declaration.text.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{int, sample_document};
    use tshub_core::{MetadataDocument, MethodDefinition, ParameterDefinition};

    fn hub(full_name: &str, base: TypeRef) -> TypeDefinition {
        TypeDefinition::class(full_name).with_base(base)
    }

    #[test]
    fn test_generate_sample_hub() {
        let document = sample_document();
        let config = Config::default();
        let generator = HubGenerator::new(&document, &config);

        let hubs = generator.hubs();
        let bundle = generator.generate(hubs[0]).unwrap();

        assert_eq!(bundle.class_name, "TestHubClient");
        assert!(bundle.scaffold.is_none());
        let names: Vec<_> = bundle.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["EventType", "SomeObjectModel"]);
        assert!(
            bundle
                .proxy
                .starts_with("import type { HubConnection } from \"@microsoft/signalr\";\n\nimport type { EventType } from \"./types/EventType\";\nimport type { SomeObjectModel } from \"./types/SomeObjectModel\";\n\n")
        );
    }

    #[test]
    fn test_imports_are_exactly_reachable_names() {
        let document = sample_document();
        let config = Config::default();
        let generator = HubGenerator::new(&document, &config);
        let bundle = generator.generate(generator.hubs()[0]).unwrap();

        for declaration in &bundle.declarations {
            let line = format!(
                "import type {{ {0} }} from \"./types/{0}\";\n",
                declaration.name
            );
            assert_eq!(bundle.proxy.matches(line.as_str()).count(), 1);
        }
        assert_eq!(bundle.proxy.matches("import type {").count(), 3);
    }

    #[test]
    fn test_react_scaffold_when_enabled() {
        let document = sample_document();
        let mut config = Config::default();
        config.output.create_react_context = true;
        let generator = HubGenerator::new(&document, &config);

        let bundle = generator.generate(generator.hubs()[0]).unwrap();
        let scaffold = bundle.scaffold.unwrap();
        assert!(scaffold.context.contains("export const TestHubClientContext = createContext"));
        assert!(scaffold.hook.contains("export const useTestHubClient = () => {"));
    }

    #[test]
    fn test_scaffold_follows_transport_module() {
        let document = sample_document();
        let mut config = Config::default();
        config.output.create_react_context = true;
        config.generator.transport_module = "@acme/realtime".to_owned();
        let generator = HubGenerator::new(&document, &config);

        let bundle = generator.generate(generator.hubs()[0]).unwrap();
        let expected = "import type { HubConnection } from \"@acme/realtime\";";
        assert!(bundle.proxy.starts_with(expected));
        let context = bundle.scaffold.unwrap().context;
        assert!(context.starts_with(
            "import { HubConnection, HubConnectionState } from \"@acme/realtime\";"
        ));
    }

    #[test]
    fn test_missing_client_interface() {
        let document = MetadataDocument::new(
            None,
            vec![hub(
                "Demo.OrphanHub",
                TypeRef::generic(
                    "Microsoft.AspNetCore.SignalR.Hub`1",
                    vec![TypeRef::named("Demo.IMissingClient")],
                ),
            )],
        )
        .unwrap();
        let config = Config::default();
        let generator = HubGenerator::new(&document, &config);

        let err = generator.generate(generator.hubs()[0]).unwrap_err();
        assert_eq!(err.kind(), "unresolved-ancestor");
        assert_eq!(err.type_name(), "Demo.OrphanHub");
    }

    #[test]
    fn test_wrong_base_arity() {
        let document = MetadataDocument::new(
            None,
            vec![hub(
                "Demo.OddHub",
                TypeRef::generic("Microsoft.AspNetCore.SignalR.Hub`1", Vec::new()),
            )],
        )
        .unwrap();
        let config = Config::default();
        let generator = HubGenerator::new(&document, &config);

        let err = generator
            .client_interface(&document.definitions()[0])
            .unwrap_err();
        assert!(err.to_string().contains("0 type argument(s)"));
    }

    #[test]
    fn test_failing_unit_does_not_affect_others() {
        let base = |client: &str| {
            TypeRef::generic(
                "Microsoft.AspNetCore.SignalR.Hub`1",
                vec![TypeRef::named(client)],
            )
        };
        let document = MetadataDocument::new(
            None,
            vec![
                TypeDefinition::interface("Demo.IClient"),
                hub("Demo.BrokenHub", base("Demo.IClient")).with_method(MethodDefinition::new(
                    "Send",
                    vec![ParameterDefinition::new("handle", TypeRef::named("System.IntPtr"))],
                )),
                hub("Demo.GoodHub", base("Demo.IClient")).with_method(MethodDefinition::new(
                    "Send",
                    vec![ParameterDefinition::new("value", int())],
                )),
            ],
        )
        .unwrap();
        let config = Config::default();

        let results = HubGenerator::new(&document, &config).generate_all();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "Demo.BrokenHub");
        assert!(matches!(
            results[0].1,
            Err(GenerateError::UnmappablePrimitive { ref type_name }) if type_name == "System.IntPtr"
        ));
        assert_eq!(results[1].0, "Demo.GoodHub");
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn test_hubs_cannot_overwrite_shared_declarations() {
        let base = TypeRef::generic(
            "Microsoft.AspNetCore.SignalR.Hub`1",
            vec![TypeRef::named("Demo.IClient")],
        );
        let save = |model: &str| {
            MethodDefinition::new(
                "Save",
                vec![ParameterDefinition::new("order", TypeRef::named(model))],
            )
        };
        let document = MetadataDocument::new(
            None,
            vec![
                TypeDefinition::interface("Demo.IClient"),
                TypeDefinition::class("Shop.Order").with_property("Id", int()),
                TypeDefinition::class("Billing.Order")
                    .with_property("Total", TypeRef::named("System.Decimal")),
                hub("Demo.ShopHub", base.clone()).with_method(save("Shop.Order")),
                hub("Demo.BillingHub", base.clone()).with_method(save("Billing.Order")),
                hub("Demo.ReportHub", base).with_method(save("Shop.Order")),
            ],
        )
        .unwrap();
        let config = Config::default();

        let results = HubGenerator::new(&document, &config).generate_all();
        assert_eq!(results.len(), 3);

        let shop = results[0].1.as_ref().unwrap();
        assert_eq!(shop.declarations[0].qualified_name, "Shop.Order");
        assert_eq!(
            results[1].1,
            Err(GenerateError::NameCollision {
                name: "Order".to_owned(),
                first: "Shop.Order".to_owned(),
                second: "Billing.Order".to_owned(),
            })
        );
        // Reusing the same type across hubs is fine.
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_self_derived_collection_parameter() {
        let document = MetadataDocument::new(
            None,
            vec![
                TypeDefinition::interface("Demo.IClient"),
                TypeDefinition::class("Demo.Folder").with_base(TypeRef::generic(
                    "System.Collections.Generic.List`1",
                    vec![TypeRef::named("Demo.Folder")],
                )),
                hub(
                    "Demo.FileHub",
                    TypeRef::generic(
                        "Microsoft.AspNetCore.SignalR.Hub`1",
                        vec![TypeRef::named("Demo.IClient")],
                    ),
                )
                .with_method(MethodDefinition::new(
                    "Save",
                    vec![ParameterDefinition::new("root", TypeRef::named("Demo.Folder"))],
                )),
            ],
        )
        .unwrap();
        let config = Config::default();

        let results = HubGenerator::new(&document, &config).generate_all();
        let bundle = results[0].1.as_ref().unwrap();
        assert_eq!(bundle.declarations.len(), 1);
        assert_eq!(bundle.declarations[0].text, "export type Folder = Folder[];\n");
        assert!(bundle.proxy.contains("async save(root: Folder) {"));
        assert!(bundle.proxy.contains("import type { Folder } from \"./types/Folder\";"));
    }

    #[test]
    fn test_each_unit_has_its_own_registry() {
        let base = TypeRef::generic(
            "Microsoft.AspNetCore.SignalR.Hub`1",
            vec![TypeRef::named("Demo.IClient")],
        );
        let model = TypeRef::named("Demo.SomeObjectModel");
        let mut types = sample_document().definitions().to_vec();
        types.retain(|d| d.full_name != "Demo.TestHub");
        types.push(TypeDefinition::interface("Demo.IClient"));
        for name in ["Demo.FirstHub", "Demo.SecondHub"] {
            types.push(hub(name, base.clone()).with_method(MethodDefinition::new(
                "Save",
                vec![ParameterDefinition::new("model", model.clone())],
            )));
        }
        let document = MetadataDocument::new(None, types).unwrap();
        let config = Config::default();

        let results = HubGenerator::new(&document, &config).generate_all();
        for (_, result) in &results {
            let bundle = result.as_ref().unwrap();
            assert_eq!(bundle.declarations.len(), 2);
        }
    }
}
