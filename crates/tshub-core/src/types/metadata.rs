//! Host metadata model.
//!
//! A [`MetadataDocument`] is the JSON export of a server assembly: every type
//! definition with its base type, implemented interfaces, public instance
//! properties and declared methods. Types refer to each other through
//! [`TypeRef`] by fully-qualified name, so cyclic object graphs are expressed
//! without cyclic data.
//!
//! ```
//! use tshub_core::{MetadataDocument, TypeSource};
//!
//! let json = r#"{
//!   "types": [
//!     { "fullName": "Demo.EventType", "name": "EventType", "kind": "enum",
//!       "enumLiterals": ["SomeEvent", "SomeOtherEvent"] }
//!   ]
//! }"#;
//!
//! let document = MetadataDocument::from_json(json)?;
//! let event = document.definition("Demo.EventType").unwrap();
//! assert!(event.is_enum());
//! # Ok::<(), tshub_core::MetadataError>(())
//! ```

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::MetadataError;
use crate::hash::{FxHashMap, fx_hash_map_with_capacity};

/// Read access to type definitions by fully-qualified name.
///
/// This is the metadata-provider capability the classifier is built on.
/// [`MetadataDocument`] is the shipped implementation; tests can supply
/// hand-built fixtures through the same trait.
pub trait TypeSource {
    /// Returns the definition with the given fully-qualified name, if known.
    fn definition(&self, full_name: &str) -> Option<&TypeDefinition>;

    /// Returns every definition in declaration order.
    fn definitions(&self) -> &[TypeDefinition];
}

/// A reference to a host type, as it appears at a use site.
///
/// Generic definitions carry their arity suffix (`List`1`) and list their
/// arguments; arrays end with `[]`.
///
/// # Examples
///
/// ```
/// use tshub_core::TypeRef;
///
/// let list = TypeRef::generic(
///     "System.Collections.Generic.List`1",
///     vec![TypeRef::named("Demo.EventType")],
/// );
/// assert_eq!(list.generic_arity(), Some(1));
/// assert_eq!(list.to_string(), "System.Collections.Generic.List`1<Demo.EventType>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Fully-qualified host type name.
    pub name: String,

    /// Generic type arguments in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeRef>,

    /// Host-level nullable-reference annotation at this use site.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeRef {
    /// Creates a non-generic, non-nullable reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// Creates a reference to a constructed generic type.
    #[must_use]
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            arguments,
            nullable: false,
        }
    }

    /// Returns this reference with the nullable annotation set.
    #[must_use]
    pub fn into_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns a copy of this reference without the nullable annotation.
    #[must_use]
    pub fn without_nullable(&self) -> Self {
        Self {
            nullable: false,
            ..self.clone()
        }
    }

    /// Returns the arity encoded in the name's backtick suffix, if any.
    #[must_use]
    pub fn generic_arity(&self) -> Option<usize> {
        let (_, arity) = self.name.rsplit_once('`')?;
        arity.parse().ok()
    }

    /// Returns `true` if this is an array reference (`T[]`).
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    /// Returns the element type of an array reference.
    ///
    /// The element is the single argument when given, otherwise the name with
    /// the `[]` suffix removed.
    #[must_use]
    pub fn array_element(&self) -> Option<TypeRef> {
        let element_name = self.name.strip_suffix("[]")?;
        match self.arguments.as_slice() {
            [element] => Some(element.clone()),
            _ => Some(Self::named(element_name)),
        }
    }

    /// Returns the simple (namespace-free) name without arity suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use tshub_core::TypeRef;
    ///
    /// assert_eq!(TypeRef::named("Demo.Models.Order").simple_name(), "Order");
    /// assert_eq!(TypeRef::named("System.Nullable`1").simple_name(), "Nullable");
    /// ```
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let name = self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, n)| n);
        name.split_once('`').map_or(name, |(n, _)| n)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.arguments.split_first() {
            write!(f, "<{first}")?;
            for argument in rest {
                write!(f, ", {argument}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// The declaration kind of a host type definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypeDefinitionKind {
    /// A reference type.
    #[default]
    Class,
    /// A value type.
    Struct,
    /// An interface.
    Interface,
    /// An enumeration.
    Enum,
}

/// A public instance property of a host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDefinition {
    /// Member name; missing names are rejected during translation.
    #[serde(default)]
    pub name: Option<String>,

    /// Declared member type, including its nullable annotation.
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl MemberDefinition {
    /// Creates a named member.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    /// Parameter name; missing names are rejected during translation.
    #[serde(default)]
    pub name: Option<String>,

    /// Declared parameter type, including its nullable annotation.
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl ParameterDefinition {
    /// Creates a named parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// A public instance method declared directly on a host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDefinition {
    /// Method name as declared on the host.
    pub name: String,

    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,

    /// Declared return type; `None` means the method returns no value.
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

impl MethodDefinition {
    /// Creates a method with the given parameters and no return value.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDefinition>) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: None,
        }
    }

    /// Sets the declared return type.
    #[must_use]
    pub fn returning(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }
}

/// A type defined in the host assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Fully-qualified name, unique within a document.
    pub full_name: String,

    /// Simple name used for generated declarations and files.
    pub name: String,

    /// Declaration kind.
    #[serde(default)]
    pub kind: TypeDefinitionKind,

    /// Direct base type, if any.
    #[serde(default)]
    pub base_type: Option<TypeRef>,

    /// Implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,

    /// Public instance properties in declaration order.
    #[serde(default)]
    pub properties: Vec<MemberDefinition>,

    /// Public instance methods declared on this type, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,

    /// Enumeration literal names in declaration order.
    #[serde(default)]
    pub enum_literals: Vec<String>,
}

impl TypeDefinition {
    /// Creates an empty class definition.
    #[must_use]
    pub fn class(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = TypeRef::named(full_name.as_str()).simple_name().to_owned();
        Self {
            full_name,
            name,
            kind: TypeDefinitionKind::Class,
            base_type: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            enum_literals: Vec::new(),
        }
    }

    /// Creates an enumeration definition with the given literals.
    #[must_use]
    pub fn enumeration<I, S>(full_name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut definition = Self::class(full_name);
        definition.kind = TypeDefinitionKind::Enum;
        definition.enum_literals = literals.into_iter().map(Into::into).collect();
        definition
    }

    /// Creates an interface definition.
    #[must_use]
    pub fn interface(full_name: impl Into<String>) -> Self {
        let mut definition = Self::class(full_name);
        definition.kind = TypeDefinitionKind::Interface;
        definition
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base_type: TypeRef) -> Self {
        self.base_type = Some(base_type);
        self
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(MemberDefinition::new(name, ty));
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends an implemented interface.
    #[must_use]
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Returns `true` if this definition is an enumeration.
    #[inline]
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeDefinitionKind::Enum)
    }
}

/// A loaded host metadata document, indexed by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct MetadataDocument {
    assembly: Option<String>,
    types: Vec<TypeDefinition>,
    index: FxHashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    assembly: Option<String>,
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

impl MetadataDocument {
    /// Builds a document from definitions, rejecting duplicate full names.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::DuplicateType`] if two definitions share a
    /// fully-qualified name.
    pub fn new(
        assembly: Option<String>,
        types: Vec<TypeDefinition>,
    ) -> Result<Self, MetadataError> {
        let mut index = fx_hash_map_with_capacity(types.len());
        for (position, definition) in types.iter().enumerate() {
            if index.insert(definition.full_name.clone(), position).is_some() {
                return Err(MetadataError::DuplicateType(definition.full_name.clone()));
            }
        }
        Ok(Self {
            assembly,
            types,
            index,
        })
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] for malformed JSON and
    /// [`MetadataError::DuplicateType`] for repeated definitions.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::new(raw.assembly, raw.types)
    }

    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotFound`] if the file does not exist, and
    /// otherwise any error from reading or [`MetadataDocument::from_json`].
    pub fn load(path: &Utf8Path) -> Result<Self, MetadataError> {
        if !path.exists() {
            return Err(MetadataError::NotFound(path.to_owned()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Returns the assembly name recorded by the exporter, if any.
    #[must_use]
    pub fn assembly(&self) -> Option<&str> {
        self.assembly.as_deref()
    }

    /// Returns the number of type definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the document has no type definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSource for MetadataDocument {
    fn definition(&self, full_name: &str) -> Option<&TypeDefinition> {
        self.index.get(full_name).and_then(|&i| self.types.get(i))
    }

    fn definitions(&self) -> &[TypeDefinition] {
        &self.types
    }
}
