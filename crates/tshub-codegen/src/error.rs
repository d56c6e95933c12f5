//! Error types for the tshub-codegen crate.
//!
//! This module provides the [`GenerateError`] type for structural failures
//! found while translating a hub's type graph.

/// Errors that abort generation of one hub.
///
/// Every variant is deterministic and unrecoverable for the affected type
/// graph: the hub's bundle is discarded as a whole, never partially written.
/// Each variant carries the name of the type that triggered it.
///
/// # Examples
///
/// ```
/// use tshub_codegen::GenerateError;
///
/// let err = GenerateError::UnmappablePrimitive {
///     type_name: "System.IntPtr".to_owned(),
/// };
/// assert_eq!(err.type_name(), "System.IntPtr");
/// assert!(err.to_string().contains("System.IntPtr"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// A host type matched no classification rule and is not in the
    /// primitive lookup table.
    #[error("type '{type_name}' has no TypeScript mapping")]
    UnmappablePrimitive {
        /// The unmapped host type.
        type_name: String,
    },

    /// A member or parameter has no usable identifier.
    #[error("{owner} has a member or parameter without a name (position {position})")]
    UnnamedMember {
        /// The type or method declaring the member.
        owner: String,
        /// Zero-based position of the member within its owner.
        position: usize,
    },

    /// A generic wrapper has an unexpected number of type arguments.
    #[error("type '{type_name}' expects {expected} type argument(s) but has {found}")]
    MalformedGenericShape {
        /// The malformed generic type.
        type_name: String,
        /// Arity declared by the generic definition.
        expected: usize,
        /// Number of arguments actually supplied.
        found: usize,
    },

    /// A hub candidate's base type does not expose a usable client interface.
    #[error("hub '{hub}' does not expose a resolvable client interface: {reason}")]
    UnresolvedAncestor {
        /// The hub type.
        hub: String,
        /// What was wrong with the base type.
        reason: String,
    },

    /// Two distinct host types would emit declarations with the same name.
    #[error("types '{first}' and '{second}' both map to declaration '{name}'")]
    NameCollision {
        /// The shared declaration name.
        name: String,
        /// Qualified name registered first.
        first: String,
        /// Qualified name that collided.
        second: String,
    },

    /// A "no value" async result appeared where a value type is required.
    #[error("type '{type_name}' carries no value and cannot be used here")]
    NoValue {
        /// The offending host type.
        type_name: String,
    },
}

impl GenerateError {
    /// Returns the name of the type that triggered this error.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::UnmappablePrimitive { type_name }
            | Self::MalformedGenericShape { type_name, .. }
            | Self::NoValue { type_name } => type_name,
            Self::UnnamedMember { owner, .. } => owner,
            Self::UnresolvedAncestor { hub, .. } => hub,
            Self::NameCollision { second, .. } => second,
        }
    }

    /// Returns a short, stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnmappablePrimitive { .. } => "unmappable-primitive",
            Self::UnnamedMember { .. } => "unnamed-member",
            Self::MalformedGenericShape { .. } => "malformed-generic-shape",
            Self::UnresolvedAncestor { .. } => "unresolved-ancestor",
            Self::NameCollision { .. } => "name-collision",
            Self::NoValue { .. } => "no-value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_generic_display() {
        let err = GenerateError::MalformedGenericShape {
            type_name: "System.Nullable`1".to_owned(),
            expected: 1,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "type 'System.Nullable`1' expects 1 type argument(s) but has 0"
        );
        assert_eq!(err.kind(), "malformed-generic-shape");
    }

    #[test]
    fn test_unnamed_member_type_name() {
        let err = GenerateError::UnnamedMember {
            owner: "Demo.TestHub.DoStuff".to_owned(),
            position: 1,
        };
        assert_eq!(err.type_name(), "Demo.TestHub.DoStuff");
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_name_collision_reports_second() {
        let err = GenerateError::NameCollision {
            name: "Order".to_owned(),
            first: "Shop.Order".to_owned(),
            second: "Billing.Order".to_owned(),
        };
        assert_eq!(err.type_name(), "Billing.Order");
        assert_eq!(err.kind(), "name-collision");
    }
}
