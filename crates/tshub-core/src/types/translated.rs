//! Translated TypeScript types.
//!
//! A [`TranslatedType`] is what a use site sees: a [`TsType`] shape plus a
//! nullability flag. Nullability belongs to the use site, so the same named
//! declaration can be referenced as `Order` in one place and `Order | null`
//! in another.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::host::Primitive;

/// The shape of a translated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsType {
    /// `boolean`, `number` or `string`.
    Primitive(Primitive),
    /// A reference by name to a generated enum or object declaration.
    Reference(String),
    /// `Element[]`
    Array(Box<TranslatedType>),
    /// `Record<Key, Value>`
    Record {
        /// Key type.
        key: Box<TranslatedType>,
        /// Value type.
        value: Box<TranslatedType>,
    },
}

/// A translated type at a specific use site.
///
/// # Examples
///
/// ```
/// use tshub_core::{Primitive, TranslatedType};
///
/// let plain = TranslatedType::primitive(Primitive::Number);
/// assert_eq!(plain.to_string(), "number");
/// assert_eq!(plain.with_nullable(true).to_string(), "number | null");
///
/// let list = TranslatedType::array(TranslatedType::reference("EventType"));
/// assert_eq!(list.to_string(), "EventType[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslatedType {
    /// The type shape.
    pub ty: TsType,
    /// Whether `| null` is appended at this use site.
    pub nullable: bool,
}

impl TranslatedType {
    /// Creates a non-nullable primitive.
    #[inline]
    #[must_use]
    pub const fn primitive(primitive: Primitive) -> Self {
        Self {
            ty: TsType::Primitive(primitive),
            nullable: false,
        }
    }

    /// Creates a non-nullable reference to a named declaration.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            ty: TsType::Reference(name.into()),
            nullable: false,
        }
    }

    /// Creates a non-nullable array of `element`.
    #[must_use]
    pub fn array(element: TranslatedType) -> Self {
        Self {
            ty: TsType::Array(Box::new(element)),
            nullable: false,
        }
    }

    /// Creates a non-nullable `Record<key, value>`.
    #[must_use]
    pub fn record(key: TranslatedType, value: TranslatedType) -> Self {
        Self {
            ty: TsType::Record {
                key: Box::new(key),
                value: Box::new(value),
            },
            nullable: false,
        }
    }

    /// Returns this type with nullability set (never cleared) by `nullable`.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable |= nullable;
        self
    }

    /// Appends every declaration name referenced by this type to `out`,
    /// skipping names already present.
    pub fn collect_references(&self, out: &mut Vec<String>) {
        match &self.ty {
            TsType::Primitive(_) => {}
            TsType::Reference(name) => {
                if !out.iter().any(|seen| seen == name) {
                    out.push(name.clone());
                }
            }
            TsType::Array(element) => element.collect_references(out),
            TsType::Record { key, value } => {
                key.collect_references(out);
                value.collect_references(out);
            }
        }
    }

    /// Returns the distinct declaration names referenced by this type, in
    /// first-seen order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tshub_core::TranslatedType;
    ///
    /// let record = TranslatedType::record(
    ///     TranslatedType::reference("EventType"),
    ///     TranslatedType::array(TranslatedType::reference("EventType")),
    /// );
    /// assert_eq!(record.references(), vec!["EventType".to_owned()]);
    /// ```
    #[must_use]
    pub fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.as_str()),
            Self::Reference(name) => f.write_str(name),
            Self::Array(element) if element.nullable => write!(f, "({element})[]"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Record { key, value } => write!(f, "Record<{key}, {value}>"),
        }
    }
}

impl fmt::Display for TranslatedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{} | null", self.ty)
        } else {
            write!(f, "{}", self.ty)
        }
    }
}
