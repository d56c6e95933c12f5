//! Declaration registry.
//!
//! [`DeclarationRegistry`] is the single source of truth for which named
//! types have been translated during one generation run. Each
//! fully-qualified type is in exactly one [`RegistryState`]:
//!
//! ```text
//! Unseen ──begin()──▶ InProgress ──complete()──▶ Complete
//! ```
//!
//! A reference requested while a type is `InProgress` resolves to a forward
//! reference by name; the registry never holds two declarations for one type.
//!
//! Identity is the fully-qualified host name. Output files are named by the
//! simple name, so two distinct qualified types with the same simple name are
//! rejected with [`GenerateError::NameCollision`] instead of silently
//! overwriting each other.

use tracing::debug;
use tshub_core::FxHashMap;

use crate::error::GenerateError;

/// Translation state of one named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Not yet requested in this run.
    Unseen,
    /// Translation started but has not finished; references are forward
    /// references.
    InProgress,
    /// Declaration text is available.
    Complete,
}

/// The kind of a generated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// A union of string literals.
    Enum,
    /// A structural object type.
    Object,
    /// A named array or record type.
    Alias,
}

/// A generated declaration, destined for its own file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration (and file) name.
    pub name: String,
    /// Fully-qualified host name the declaration was generated from.
    pub qualified_name: String,
    /// Enum or object.
    pub kind: DeclarationKind,
    /// Other declarations this one imports, in first-seen order.
    pub references: Vec<String>,
    /// Complete file text.
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    InProgress,
    Complete(usize),
}

/// Registry of generated declarations for one generation run.
///
/// # Examples
///
/// ```
/// use tshub_codegen::{Declaration, DeclarationKind, DeclarationRegistry, RegistryState};
///
/// let mut registry = DeclarationRegistry::new();
/// registry.begin("Demo.EventType", "EventType")?;
/// assert_eq!(registry.state("Demo.EventType"), RegistryState::InProgress);
///
/// registry.complete(Declaration {
///     name: "EventType".to_owned(),
///     qualified_name: "Demo.EventType".to_owned(),
///     kind: DeclarationKind::Enum,
///     references: Vec::new(),
///     text: "export type EventType = \"A\";\n".to_owned(),
/// });
/// assert_eq!(registry.state("Demo.EventType"), RegistryState::Complete);
/// assert_eq!(registry.len(), 1);
/// # Ok::<(), tshub_codegen::GenerateError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    slots: FxHashMap<String, Slot>,
    names: FxHashMap<String, String>,
    declarations: Vec<Declaration>,
}

impl DeclarationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of a qualified type.
    #[must_use]
    pub fn state(&self, qualified_name: &str) -> RegistryState {
        match self.slots.get(qualified_name) {
            None => RegistryState::Unseen,
            Some(Slot::InProgress) => RegistryState::InProgress,
            Some(Slot::Complete(_)) => RegistryState::Complete,
        }
    }

    /// Marks a type as in progress, claiming its declaration name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NameCollision`] if `name` is already claimed
    /// by a different qualified type.
    pub fn begin(&mut self, qualified_name: &str, name: &str) -> Result<(), GenerateError> {
        if let Some(owner) = self.names.get(name) {
            if owner != qualified_name {
                return Err(GenerateError::NameCollision {
                    name: name.to_owned(),
                    first: owner.clone(),
                    second: qualified_name.to_owned(),
                });
            }
        }

        self.names.insert(name.to_owned(), qualified_name.to_owned());
        self.slots
            .entry(qualified_name.to_owned())
            .or_insert(Slot::InProgress);
        Ok(())
    }

    /// Replaces the in-progress marker with the finished declaration.
    ///
    /// Entries are written once: returns `false` and keeps the existing
    /// declaration if the type was already complete.
    pub fn complete(&mut self, declaration: Declaration) -> bool {
        if let Some(Slot::Complete(_)) = self.slots.get(&declaration.qualified_name) {
            return false;
        }

        debug!(
            name = %declaration.name,
            qualified = %declaration.qualified_name,
            kind = ?declaration.kind,
            "Registered declaration"
        );

        let index = self.declarations.len();
        self.names.insert(declaration.name.clone(), declaration.qualified_name.clone());
        self.slots.insert(declaration.qualified_name.clone(), Slot::Complete(index));
        self.declarations.push(declaration);
        true
    }

    /// Returns the declaration generated under `name`, if complete.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        let qualified = self.names.get(name)?;
        match self.slots.get(qualified)? {
            Slot::Complete(index) => self.declarations.get(*index),
            Slot::InProgress => None,
        }
    }

    /// Returns all completed declarations in completion order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Consumes the registry, returning its declarations in completion order.
    #[must_use]
    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }

    /// Returns the number of completed declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if no declaration has been completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Returns the number of types currently in progress.
    #[must_use]
    pub fn in_progress_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::InProgress))
            .count()
    }
}
