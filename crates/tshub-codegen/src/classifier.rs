//! Type classification.
//!
//! [`Classifier`] turns one [`TypeRef`] into exactly one [`HostType`] kind.
//! Rules are applied in priority order:
//!
//! | Rule | Matches | Result |
//! |------|---------|--------|
//! | async | `Task`, `Task<T>`, `ValueTask`, `ValueTask<T>`, `void` | `AsyncWrapper` |
//! | nullable | `Nullable<T>`, or a `?`-annotated reference | `Nullable` |
//! | primitive | boolean, numeric, text, date/time, `Guid`, `Uri`, `byte[]` | `Primitive` |
//! | enum | enumeration definitions | `Enum` |
//! | dictionary | string- or enum-keyed associative types | `Dictionary` |
//! | sequence | arrays and sequence interfaces/classes | `Collection` |
//! | alias | definitions deriving from or implementing either of the above | `Alias` |
//! | complex | known definitions with at least one property | `Complex` |
//!
//! Anything else is an [`GenerateError::UnmappablePrimitive`]; there is no
//! silent fallback to `any`.

use tshub_core::{
    AliasType, ComplexType, EnumType, HostMember, HostType, Primitive, TypeDefinition, TypeRef,
    TypeSource,
};

use crate::error::GenerateError;

const NULLABLE: &str = "System.Nullable`1";

const NO_VALUE_TYPES: &[&str] = &[
    "System.Void",
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.ValueTask",
];

const ASYNC_TYPES: &[&str] = &[
    "System.Threading.Tasks.Task`1",
    "System.Threading.Tasks.ValueTask`1",
];

const DICTIONARY_TYPES: &[&str] = &[
    "System.Collections.Generic.Dictionary`2",
    "System.Collections.Generic.IDictionary`2",
    "System.Collections.Generic.IReadOnlyDictionary`2",
    "System.Collections.Generic.SortedDictionary`2",
    "System.Collections.Concurrent.ConcurrentDictionary`2",
    "System.Collections.Immutable.ImmutableDictionary`2",
    "System.Collections.Immutable.IImmutableDictionary`2",
];

const SEQUENCE_TYPES: &[&str] = &[
    "System.Collections.Generic.List`1",
    "System.Collections.Generic.IList`1",
    "System.Collections.Generic.ICollection`1",
    "System.Collections.Generic.IEnumerable`1",
    "System.Collections.Generic.IReadOnlyList`1",
    "System.Collections.Generic.IReadOnlyCollection`1",
    "System.Collections.Generic.HashSet`1",
    "System.Collections.Generic.ISet`1",
    "System.Collections.Immutable.ImmutableList`1",
    "System.Collections.Immutable.ImmutableArray`1",
    "System.Collections.Immutable.IImmutableList`1",
];

/// Looks up the TypeScript primitive for a host scalar.
///
/// # Examples
///
/// ```
/// use tshub_codegen::primitive_for;
/// use tshub_core::Primitive;
///
/// assert_eq!(primitive_for("System.Int64"), Some(Primitive::Number));
/// assert_eq!(primitive_for("System.Guid"), Some(Primitive::String));
/// assert_eq!(primitive_for("System.Byte[]"), Some(Primitive::String));
/// assert_eq!(primitive_for("System.IntPtr"), None);
/// ```
#[must_use]
pub fn primitive_for(host_name: &str) -> Option<Primitive> {
    let primitive = match host_name {
        "System.Boolean" => Primitive::Boolean,

        "System.Byte" | "System.SByte" | "System.Int16" | "System.UInt16" | "System.Int32"
        | "System.UInt32" | "System.Int64" | "System.UInt64" | "System.Int128"
        | "System.UInt128" | "System.Half" | "System.Single" | "System.Double"
        | "System.Decimal" => Primitive::Number,

        // Dates and identifiers travel as ISO/canonical strings; blobs as base64.
        "System.String" | "System.Char" | "System.DateTime" | "System.DateTimeOffset"
        | "System.DateOnly" | "System.TimeOnly" | "System.TimeSpan" | "System.Guid"
        | "System.Uri" | "System.Byte[]" => Primitive::String,

        _ => return None,
    };
    Some(primitive)
}

/// Classifies host type references against a metadata source.
///
/// # Examples
///
/// ```
/// use tshub_codegen::Classifier;
/// use tshub_core::{HostType, MetadataDocument, Primitive, TypeRef};
///
/// let document = MetadataDocument::default();
/// let classifier = Classifier::new(&document);
///
/// let host = classifier.classify(&TypeRef::named("System.String").into_nullable())?;
/// assert!(matches!(
///     host,
///     HostType::Nullable(inner) if matches!(*inner, HostType::Primitive { primitive: Primitive::String, .. })
/// ));
/// # Ok::<(), tshub_codegen::GenerateError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: TypeSource + ?Sized> Classifier<'a, S> {
    /// Creates a classifier over the given metadata source.
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Returns the underlying metadata source.
    #[must_use]
    pub const fn source(&self) -> &'a S {
        self.source
    }

    /// Classifies one type reference.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::MalformedGenericShape`] if the argument count does
    ///   not match the generic arity anywhere in the wrapper chain
    /// - [`GenerateError::UnmappablePrimitive`] if no rule matches
    pub fn classify(&self, ty: &TypeRef) -> Result<HostType, GenerateError> {
        check_arity(ty)?;

        if NO_VALUE_TYPES.contains(&ty.name.as_str()) {
            return Ok(HostType::AsyncWrapper(None));
        }
        if ASYNC_TYPES.contains(&ty.name.as_str()) {
            let inner = self.classify(single_argument(ty)?)?;
            return Ok(HostType::AsyncWrapper(Some(Box::new(inner))));
        }

        if ty.name == NULLABLE {
            let inner = self.classify(single_argument(ty)?)?;
            return Ok(HostType::Nullable(Box::new(inner)));
        }
        if ty.nullable {
            let inner = self.classify(&ty.without_nullable())?;
            return Ok(HostType::Nullable(Box::new(inner)));
        }

        if let Some(primitive) = primitive_for(&ty.name) {
            return Ok(HostType::Primitive {
                host_name: ty.name.clone(),
                primitive,
            });
        }

        let definition = self.source.definition(&ty.name);

        if let Some(definition) = definition.filter(|d| d.is_enum()) {
            return Ok(HostType::Enum(EnumType {
                qualified_name: definition.full_name.clone(),
                name: definition.name.clone(),
                literals: definition.enum_literals.clone(),
            }));
        }

        if let Some((key, value)) = dictionary_pair(ty) {
            if let Some(host) = self.classify_dictionary(key, value)? {
                return Ok(host);
            }
        }

        if let Some(element) = sequence_element(ty) {
            let element = self.classify(&element)?;
            return Ok(HostType::Collection(Box::new(element)));
        }

        let Some(definition) = definition else {
            return Err(GenerateError::UnmappablePrimitive {
                type_name: ty.name.clone(),
            });
        };

        if let Some(target) = self.shape_base(definition)? {
            return Ok(HostType::Alias(AliasType {
                qualified_name: definition.full_name.clone(),
                name: definition.name.clone(),
                target: target.clone(),
            }));
        }

        if definition.properties.is_empty() {
            return Err(GenerateError::UnmappablePrimitive {
                type_name: ty.name.clone(),
            });
        }
        Ok(HostType::Complex(complex_type(definition)))
    }

    /// Classifies an associative type whose key is text or an enumeration.
    ///
    /// Returns `Ok(None)` when the key is not eligible, so later rules still
    /// get a chance.
    fn classify_dictionary(
        &self,
        key: &TypeRef,
        value: &TypeRef,
    ) -> Result<Option<HostType>, GenerateError> {
        let key = self.classify(key)?;
        if !is_dictionary_key(&key) {
            return Ok(None);
        }

        let value = self.classify(value)?;
        Ok(Some(HostType::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }))
    }

    /// Finds the dictionary or sequence base a definition derives from or
    /// implements. Dictionaries win over the key/value sequence they also
    /// implement.
    ///
    /// Only the key is classified here; the value or element is left to the
    /// translator so that `class Folder : List<Folder>` stays finite.
    fn shape_base<'d>(
        &self,
        definition: &'d TypeDefinition,
    ) -> Result<Option<&'d TypeRef>, GenerateError> {
        let bases = move || definition.base_type.iter().chain(&definition.interfaces);

        for base in bases() {
            if let Some((key, _)) = dictionary_pair(base) {
                if is_dictionary_key(&self.classify(key)?) {
                    return Ok(Some(base));
                }
            }
        }
        Ok(bases().find(|base| sequence_element(base).is_some()))
    }
}

fn is_dictionary_key(key: &HostType) -> bool {
    matches!(
        key,
        HostType::Primitive {
            primitive: Primitive::String,
            ..
        } | HostType::Enum(_)
    )
}

fn check_arity(ty: &TypeRef) -> Result<(), GenerateError> {
    let expected = match ty.generic_arity() {
        Some(arity) => arity,
        None if ty.is_array() => {
            if ty.arguments.len() > 1 {
                return Err(malformed(ty, 1));
            }
            return Ok(());
        }
        None => 0,
    };
    if ty.arguments.len() != expected {
        return Err(malformed(ty, expected));
    }
    Ok(())
}

fn malformed(ty: &TypeRef, expected: usize) -> GenerateError {
    GenerateError::MalformedGenericShape {
        type_name: ty.name.clone(),
        expected,
        found: ty.arguments.len(),
    }
}

fn single_argument(ty: &TypeRef) -> Result<&TypeRef, GenerateError> {
    match ty.arguments.as_slice() {
        [argument] => Ok(argument),
        _ => Err(malformed(ty, 1)),
    }
}

/// Returns `(key, value)` for a well-known associative type.
fn dictionary_pair(ty: &TypeRef) -> Option<(&TypeRef, &TypeRef)> {
    match ty.arguments.as_slice() {
        [key, value] if DICTIONARY_TYPES.contains(&ty.name.as_str()) => Some((key, value)),
        _ => None,
    }
}

/// Returns the element type of an array or a well-known sequence type.
fn sequence_element(ty: &TypeRef) -> Option<TypeRef> {
    if let Some(element) = ty.array_element() {
        return Some(element);
    }
    match ty.arguments.as_slice() {
        [element] if SEQUENCE_TYPES.contains(&ty.name.as_str()) => Some(element.clone()),
        _ => None,
    }
}

fn complex_type(definition: &TypeDefinition) -> ComplexType {
    ComplexType {
        qualified_name: definition.full_name.clone(),
        name: definition.name.clone(),
        members: definition
            .properties
            .iter()
            .map(|member| HostMember {
                name: member.name.clone(),
                ty: member.ty.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{int, list_of, sample_document, string};
    use tshub_core::{MetadataDocument, TypeDefinition};

    fn classify(ty: &TypeRef) -> Result<HostType, GenerateError> {
        let document = sample_document();
        Classifier::new(&document).classify(ty)
    }

    #[test]
    fn test_task_unwraps_to_argument() {
        let task = TypeRef::generic("System.Threading.Tasks.Task`1", vec![int()]);
        let host = classify(&task).unwrap();
        assert!(matches!(host, HostType::AsyncWrapper(Some(inner))
            if matches!(*inner, HostType::Primitive { primitive: Primitive::Number, .. })));
    }

    #[test]
    fn test_plain_task_is_no_value() {
        let host = classify(&TypeRef::named("System.Threading.Tasks.Task")).unwrap();
        assert_eq!(host, HostType::AsyncWrapper(None));
    }

    #[test]
    fn test_nullable_value_type() {
        let nullable = TypeRef::generic(NULLABLE, vec![int()]);
        let host = classify(&nullable).unwrap();
        assert!(matches!(host, HostType::Nullable(_)));
    }

    #[test]
    fn test_nullable_reference_annotation() {
        let host = classify(&string().into_nullable()).unwrap();
        assert!(matches!(host, HostType::Nullable(inner)
            if matches!(*inner, HostType::Primitive { primitive: Primitive::String, .. })));
    }

    #[test]
    fn test_enum_definition() {
        let host = classify(&TypeRef::named("Demo.EventType")).unwrap();
        let HostType::Enum(enumeration) = host else {
            panic!("expected enum");
        };
        assert_eq!(enumeration.name, "EventType");
        assert_eq!(enumeration.literals, vec!["SomeEvent", "SomeOtherEvent"]);
    }

    #[test]
    fn test_string_is_not_a_sequence() {
        let host = classify(&string()).unwrap();
        assert!(matches!(host, HostType::Primitive { primitive: Primitive::String, .. }));
    }

    #[test]
    fn test_byte_array_is_binary_blob() {
        let host = classify(&TypeRef::named("System.Byte[]")).unwrap();
        assert!(matches!(host, HostType::Primitive { primitive: Primitive::String, .. }));
    }

    #[test]
    fn test_list_and_array_are_collections() {
        assert!(matches!(
            classify(&list_of(TypeRef::named("Demo.EventType"))).unwrap(),
            HostType::Collection(_)
        ));
        assert!(matches!(
            classify(&TypeRef::named("System.Int32[]")).unwrap(),
            HostType::Collection(_)
        ));
    }

    #[test]
    fn test_enum_keyed_dictionary() {
        let dict = TypeRef::generic(
            "System.Collections.Generic.Dictionary`2",
            vec![TypeRef::named("Demo.EventType"), string()],
        );
        let host = classify(&dict).unwrap();
        assert!(
            matches!(host, HostType::Dictionary { key, .. } if matches!(*key, HostType::Enum(_)))
        );
    }

    #[test]
    fn test_int_keyed_dictionary_is_unmappable() {
        let dict = TypeRef::generic(
            "System.Collections.Generic.Dictionary`2",
            vec![int(), string()],
        );
        let err = classify(&dict).unwrap_err();
        assert!(matches!(err, GenerateError::UnmappablePrimitive { .. }));
    }

    #[test]
    fn test_dictionary_is_not_a_pair_sequence() {
        let document = MetadataDocument::new(
            None,
            vec![
                TypeDefinition::class("Demo.Lookup")
                    .with_base(TypeRef::generic(
                        "System.Collections.Generic.Dictionary`2",
                        vec![string(), int()],
                    ))
                    .with_interface(TypeRef::generic(
                        "System.Collections.Generic.IEnumerable`1",
                        vec![TypeRef::named("System.Collections.Generic.KeyValuePair`2")],
                    )),
            ],
        )
        .unwrap();
        let host = Classifier::new(&document)
            .classify(&TypeRef::named("Demo.Lookup"))
            .unwrap();
        let HostType::Alias(alias) = host else {
            panic!("expected alias");
        };
        assert_eq!(alias.name, "Lookup");
        assert_eq!(alias.target.name, "System.Collections.Generic.Dictionary`2");
    }

    #[test]
    fn test_custom_sequence_via_interface() {
        let document = MetadataDocument::new(
            None,
            vec![TypeDefinition::class("Demo.Tags").with_interface(TypeRef::generic(
                "System.Collections.Generic.IEnumerable`1",
                vec![string()],
            ))],
        )
        .unwrap();
        let host = Classifier::new(&document)
            .classify(&TypeRef::named("Demo.Tags"))
            .unwrap();
        assert!(matches!(host, HostType::Alias(alias) if alias.qualified_name == "Demo.Tags"));
    }

    #[test]
    fn test_self_derived_sequence_is_not_expanded() {
        let folder = TypeRef::named("Demo.Folder");
        let node = TypeRef::named("Demo.Node");
        let document = MetadataDocument::new(
            None,
            vec![
                TypeDefinition::class("Demo.Folder").with_base(list_of(folder.clone())),
                TypeDefinition::class("Demo.Node").with_base(TypeRef::generic(
                    "System.Collections.Generic.Dictionary`2",
                    vec![string(), node.clone()],
                )),
            ],
        )
        .unwrap();
        let classifier = Classifier::new(&document);

        let HostType::Alias(alias) = classifier.classify(&folder).unwrap() else {
            panic!("expected alias");
        };
        assert_eq!(alias.target, list_of(folder));

        let host = classifier.classify(&node).unwrap();
        assert!(matches!(host, HostType::Alias(alias) if alias.name == "Node"));
    }

    #[test]
    fn test_complex_keeps_member_order() {
        let host = classify(&TypeRef::named("Demo.SomeObjectModel")).unwrap();
        let HostType::Complex(complex) = host else {
            panic!("expected complex type");
        };
        assert_eq!(complex.name, "SomeObjectModel");
        assert_eq!(complex.members[0].name.as_deref(), Some("SomeBoolean"));
    }

    #[test]
    fn test_memberless_definition_is_unmappable() {
        let document =
            MetadataDocument::new(None, vec![TypeDefinition::class("Demo.Marker")]).unwrap();
        let err = Classifier::new(&document)
            .classify(&TypeRef::named("Demo.Marker"))
            .unwrap_err();
        assert_eq!(err.type_name(), "Demo.Marker");
    }

    #[test]
    fn test_unknown_primitive_fails() {
        let err = classify(&TypeRef::named("System.IntPtr")).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnmappablePrimitive {
                type_name: "System.IntPtr".to_owned()
            }
        );
    }

    #[test]
    fn test_malformed_arity() {
        let err = classify(&TypeRef::generic(NULLABLE, vec![])).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MalformedGenericShape { expected: 1, found: 0, .. }
        ));

        let err = classify(&TypeRef::generic("System.Int32", vec![string()])).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MalformedGenericShape { expected: 0, found: 1, .. }
        ));
    }
}
