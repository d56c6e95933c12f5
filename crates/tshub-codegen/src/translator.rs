//! Type graph translation.
//!
//! [`Translator`] converts classified host types into [`TranslatedType`]s,
//! emitting a declaration for every enum, complex type and alias (a named
//! sequence or dictionary definition) it meets into the
//! [`DeclarationRegistry`] threaded through each call.
//!
//! # Termination
//!
//! Named types are expanded at most once per registry:
//!
//! 1. `Complete` → plain reference (memoized).
//! 2. `InProgress` → forward reference (cycle guard; TypeScript resolves
//!    type aliases by name, so self- and mutual references are valid).
//! 3. `Unseen` → mark in progress, translate members or the alias target,
//!    register the text.
//!
//! The recursion depth is therefore bounded by the number of distinct named
//! types in the graph, not by reference depth or cycles.
//!
//! # Nullability
//!
//! Nullability is applied to the [`TranslatedType`] at the use site and is
//! never baked into a registered declaration.

use tracing::debug;
use tshub_core::{
    AliasType, ComplexType, EnumType, HostType, TranslatedType, TypeRef, TypeSource,
    to_camel_case,
};

use crate::classifier::Classifier;
use crate::error::GenerateError;
use crate::registry::{Declaration, DeclarationKind, DeclarationRegistry, RegistryState};

/// Translates host types to TypeScript, registering named declarations.
///
/// # Examples
///
/// ```
/// use tshub_codegen::{Classifier, DeclarationRegistry, Translator};
/// use tshub_core::{MetadataDocument, TypeDefinition, TypeRef};
///
/// let document = MetadataDocument::new(
///     None,
///     vec![TypeDefinition::enumeration("Demo.EventType", ["SomeEvent", "SomeOtherEvent"])],
/// )?;
/// let translator = Translator::new(Classifier::new(&document));
/// let mut registry = DeclarationRegistry::new();
///
/// let ty = translator.translate_ref(&TypeRef::named("Demo.EventType"), true, &mut registry)?;
/// assert_eq!(ty.to_string(), "EventType | null");
/// assert_eq!(
///     registry.get("EventType").unwrap().text,
///     "export type EventType = \"SomeEvent\" | \"SomeOtherEvent\";\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a, S: ?Sized> {
    classifier: Classifier<'a, S>,
}

impl<'a, S: TypeSource + ?Sized> Translator<'a, S> {
    /// Creates a translator over a classifier.
    #[must_use]
    pub const fn new(classifier: Classifier<'a, S>) -> Self {
        Self { classifier }
    }

    /// Returns the classifier used for member types.
    #[must_use]
    pub const fn classifier(&self) -> &Classifier<'a, S> {
        &self.classifier
    }

    /// Classifies and translates a type reference.
    ///
    /// # Errors
    ///
    /// Propagates classification errors and any error from
    /// [`Translator::translate`].
    pub fn translate_ref(
        &self,
        ty: &TypeRef,
        nullable: bool,
        registry: &mut DeclarationRegistry,
    ) -> Result<TranslatedType, GenerateError> {
        let host = self.classifier.classify(ty)?;
        self.translate(&host, nullable, registry)
    }

    /// Translates a classified host type for a use site.
    ///
    /// `nullable` is the use site's own nullability; a `Nullable` wrapper
    /// always sets it, an async wrapper never does.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::NoValue`] for a no-value async result
    /// - [`GenerateError::UnnamedMember`] for a complex member without a name
    /// - [`GenerateError::NameCollision`] for two types sharing a declaration name
    /// - any classification error from a member type
    pub fn translate(
        &self,
        host: &HostType,
        nullable: bool,
        registry: &mut DeclarationRegistry,
    ) -> Result<TranslatedType, GenerateError> {
        match host {
            HostType::Primitive { primitive, .. } => {
                Ok(TranslatedType::primitive(*primitive).with_nullable(nullable))
            }
            HostType::Nullable(inner) => self.translate(inner, true, registry),
            HostType::AsyncWrapper(Some(inner)) => self.translate(inner, nullable, registry),
            HostType::AsyncWrapper(None) => Err(GenerateError::NoValue {
                type_name: host.display_name(),
            }),
            HostType::Collection(element) => {
                let element = self.translate(element, false, registry)?;
                Ok(TranslatedType::array(element).with_nullable(nullable))
            }
            HostType::Dictionary { key, value } => {
                let key = self.translate(key, false, registry)?;
                let value = self.translate(value, false, registry)?;
                Ok(TranslatedType::record(key, value).with_nullable(nullable))
            }
            HostType::Enum(enumeration) => {
                if Self::needs_expansion(registry, host) {
                    self.translate_enum(enumeration, registry)?;
                }
                Ok(TranslatedType::reference(&enumeration.name).with_nullable(nullable))
            }
            HostType::Complex(complex) => {
                if Self::needs_expansion(registry, host) {
                    self.translate_complex(complex, registry)?;
                }
                Ok(TranslatedType::reference(&complex.name).with_nullable(nullable))
            }
            HostType::Alias(alias) => {
                if Self::needs_expansion(registry, host) {
                    self.translate_alias(alias, registry)?;
                }
                Ok(TranslatedType::reference(&alias.name).with_nullable(nullable))
            }
        }
    }

    /// Translates a method result type.
    ///
    /// Returns `Ok(None)` when the result carries no value (`void`, `Task`).
    ///
    /// # Errors
    ///
    /// Same as [`Translator::translate`].
    pub fn translate_result(
        &self,
        host: &HostType,
        registry: &mut DeclarationRegistry,
    ) -> Result<Option<TranslatedType>, GenerateError> {
        match host {
            HostType::AsyncWrapper(None) => Ok(None),
            HostType::AsyncWrapper(Some(inner)) => self.translate(inner, false, registry).map(Some),
            other => self.translate(other, false, registry).map(Some),
        }
    }

    fn translate_enum(
        &self,
        enumeration: &EnumType,
        registry: &mut DeclarationRegistry,
    ) -> Result<(), GenerateError> {
        registry.begin(&enumeration.qualified_name, &enumeration.name)?;

        registry.complete(Declaration {
            name: enumeration.name.clone(),
            qualified_name: enumeration.qualified_name.clone(),
            kind: DeclarationKind::Enum,
            references: Vec::new(),
            text: render_enum(&enumeration.name, &enumeration.literals),
        });
        Ok(())
    }

    fn translate_complex(
        &self,
        complex: &ComplexType,
        registry: &mut DeclarationRegistry,
    ) -> Result<(), GenerateError> {
        registry.begin(&complex.qualified_name, &complex.name)?;

        let mut fields = Vec::with_capacity(complex.members.len());
        let mut references = Vec::new();
        for (position, member) in complex.members.iter().enumerate() {
            let name = member
                .name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| GenerateError::UnnamedMember {
                    owner: complex.qualified_name.clone(),
                    position,
                })?;

            let ty = self.translate_ref(&member.ty, false, registry)?;
            ty.collect_references(&mut references);
            fields.push((to_camel_case(name), ty));
        }
        references.retain(|reference| reference != &complex.name);

        registry.complete(Declaration {
            name: complex.name.clone(),
            qualified_name: complex.qualified_name.clone(),
            kind: DeclarationKind::Object,
            text: render_object(&complex.name, &references, &fields),
            references,
        });
        Ok(())
    }

    /// Translates the target of a named sequence or dictionary. The target
    /// is classified only now, after the alias is marked in progress, so a
    /// definition containing itself resolves to a forward reference.
    fn translate_alias(
        &self,
        alias: &AliasType,
        registry: &mut DeclarationRegistry,
    ) -> Result<(), GenerateError> {
        registry.begin(&alias.qualified_name, &alias.name)?;

        let target = self.translate_ref(&alias.target, false, registry)?;
        let mut references = target.references();
        references.retain(|reference| reference != &alias.name);

        registry.complete(Declaration {
            name: alias.name.clone(),
            qualified_name: alias.qualified_name.clone(),
            kind: DeclarationKind::Alias,
            text: render_alias(&alias.name, &references, &target),
            references,
        });
        Ok(())
    }

    /// Returns `true` if the named type still has to be expanded.
    fn needs_expansion(registry: &DeclarationRegistry, host: &HostType) -> bool {
        let Some(qualified_name) = host.qualified_name() else {
            return false;
        };
        match registry.state(qualified_name) {
            RegistryState::Unseen => true,
            RegistryState::Complete => false,
            RegistryState::InProgress => {
                debug!(qualified_name, "Forward reference to type still being translated");
                false
            }
        }
    }
}

/// Renders `export type Name = "A" | "B";`.
fn render_enum(name: &str, literals: &[String]) -> String {
    let union = if literals.is_empty() {
        "never".to_owned()
    } else {
        literals
            .iter()
            .map(|literal| format!("\"{literal}\""))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    format!("export type {name} = {union};\n")
}

/// Renders type-only imports of `references`, followed by a blank line if
/// there are any.
fn render_imports(references: &[String]) -> String {
    let mut output = String::new();
    for reference in references {
        output.push_str(&format!(
            "import type {{ {reference} }} from \"./{reference}\";\n"
        ));
    }
    if !references.is_empty() {
        output.push('\n');
    }
    output
}

/// Renders an object declaration preceded by its imports.
fn render_object(name: &str, references: &[String], fields: &[(String, TranslatedType)]) -> String {
    let mut output = render_imports(references);
    output.push_str(&format!("export type {name} = {{\n"));
    for (field, ty) in fields {
        output.push_str(&format!("  {field}: {ty};\n"));
    }
    output.push_str("};\n");
    output
}

/// Renders `export type Name = Target;` preceded by its imports.
fn render_alias(name: &str, references: &[String], target: &TranslatedType) -> String {
    let mut output = render_imports(references);
    output.push_str(&format!("export type {name} = {target};\n"));
    output
}
