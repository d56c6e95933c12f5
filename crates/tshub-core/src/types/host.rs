//! Classified host types.
//!
//! A [`HostType`] is the result of classifying one [`TypeRef`]: exactly one of
//! a closed set of kinds, so consumers match exhaustively instead of
//! re-deriving classification from names. Wrapper kinds hold their already
//! classified inner type; complex members and alias targets stay as
//! [`TypeRef`]s and are classified lazily, which keeps cyclic graphs finite.

use serde::{Deserialize, Serialize};

use super::metadata::TypeRef;

/// A TypeScript primitive that host scalars map onto.
///
/// # Examples
///
/// ```
/// use tshub_core::Primitive;
///
/// assert_eq!(Primitive::Number.as_str(), "number");
/// assert_eq!(Primitive::String.to_string(), "string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
}

impl Primitive {
    /// Returns the TypeScript keyword for this primitive.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of a complex host type, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMember {
    /// Member name as declared on the host, if the metadata provides one.
    pub name: Option<String>,
    /// Declared member type, including its nullable annotation.
    pub ty: TypeRef,
}

/// An enumeration with its literals in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Fully-qualified host name; the registry identity.
    pub qualified_name: String,
    /// Simple name used for the generated declaration.
    pub name: String,
    /// Literal names in declared order.
    pub literals: Vec<String>,
}

/// A member-bearing object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    /// Fully-qualified host name; the registry identity.
    pub qualified_name: String,
    /// Simple name used for the generated declaration.
    pub name: String,
    /// Members in declared order.
    pub members: Vec<HostMember>,
}

/// A named definition whose shape is a sequence or dictionary, such as
/// `class Folder : List<Folder>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasType {
    /// Fully-qualified host name; the registry identity.
    pub qualified_name: String,
    /// Simple name used for the generated declaration.
    pub name: String,
    /// The sequence or dictionary base the definition derives from or
    /// implements.
    pub target: TypeRef,
}

/// One classified host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostType {
    /// A scalar governed by the primitive lookup table.
    Primitive {
        /// Host name of the scalar.
        host_name: String,
        /// The TypeScript primitive it maps to.
        primitive: Primitive,
    },
    /// A value that may be absent; translation appends `| null`.
    Nullable(Box<HostType>),
    /// An enumeration.
    Enum(EnumType),
    /// A homogeneous sequence.
    Collection(Box<HostType>),
    /// A string- or enum-keyed associative type.
    Dictionary {
        /// Key type (string primitive or enumeration).
        key: Box<HostType>,
        /// Value type.
        value: Box<HostType>,
    },
    /// An asynchronous result; `None` for the no-value case.
    AsyncWrapper(Option<Box<HostType>>),
    /// A member-bearing object.
    Complex(ComplexType),
    /// A named sequence or dictionary definition.
    Alias(AliasType),
}

impl HostType {
    /// Returns the name used for diagnostics about this type.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Primitive { host_name, .. } => host_name.clone(),
            Self::Nullable(inner) => format!("{}?", inner.display_name()),
            Self::Enum(e) => e.qualified_name.clone(),
            Self::Complex(c) => c.qualified_name.clone(),
            Self::Alias(a) => a.qualified_name.clone(),
            Self::Collection(element) => format!("{}[]", element.display_name()),
            Self::Dictionary { key, value } => {
                format!("Dictionary<{}, {}>", key.display_name(), value.display_name())
            }
            Self::AsyncWrapper(Some(inner)) => format!("Task<{}>", inner.display_name()),
            Self::AsyncWrapper(None) => "Task".to_owned(),
        }
    }

    /// Returns the registry identity for kinds that get their own
    /// declaration.
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Self::Enum(e) => Some(&e.qualified_name),
            Self::Complex(c) => Some(&c.qualified_name),
            Self::Alias(a) => Some(&a.qualified_name),
            _ => None,
        }
    }
}
