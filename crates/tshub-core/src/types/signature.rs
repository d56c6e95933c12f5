//! Method and callback signatures and the proxy they compose into.
//!
//! Signatures are the typed intermediate representation between type
//! translation and text rendering: every name is already casing-transformed
//! and every type already translated.

use smallvec::SmallVec;

use super::translated::TranslatedType;

/// A translated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Target-language identifier (`lowerCamel`).
    pub name: String,
    /// Translated type, nullability applied.
    pub ty: TranslatedType,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TranslatedType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Parameter lists are short; four inline slots cover nearly every hub method.
pub type Parameters = SmallVec<[Parameter; 4]>;

/// An invokable server method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name as declared on the host.
    pub host_name: String,
    /// Token passed to the transport's invoke primitive.
    pub wire_name: String,
    /// Generated method identifier.
    pub target_name: String,
    /// Parameters in declaration order.
    pub parameters: Parameters,
    /// Translated result type; `None` when the method returns no value.
    pub return_type: Option<TranslatedType>,
}

impl MethodSignature {
    /// Returns the distinct declaration names referenced by parameters and
    /// return type, in first-seen order.
    #[must_use]
    pub fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        for parameter in &self.parameters {
            parameter.ty.collect_references(&mut out);
        }
        if let Some(return_type) = &self.return_type {
            return_type.collect_references(&mut out);
        }
        out
    }
}

/// A server-to-client event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackSignature {
    /// Method name as declared on the client interface.
    pub host_name: String,
    /// Event-channel token used to subscribe and unsubscribe.
    pub wire_name: String,
    /// `PascalCase` segment used in `add<Name>Handler`/`remove<Name>Handler`.
    pub handler_name: String,
    /// Parameters in declaration order.
    pub parameters: Parameters,
}

impl CallbackSignature {
    /// Returns the subscribe method name.
    #[must_use]
    pub fn add_handler_name(&self) -> String {
        format!("add{}Handler", self.handler_name)
    }

    /// Returns the unsubscribe method name.
    #[must_use]
    pub fn remove_handler_name(&self) -> String {
        format!("remove{}Handler", self.handler_name)
    }

    /// Returns the distinct declaration names referenced by parameters, in
    /// first-seen order.
    #[must_use]
    pub fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        for parameter in &self.parameters {
            parameter.ty.collect_references(&mut out);
        }
        out
    }
}

/// Everything needed to render one proxy class.
///
/// # Examples
///
/// ```
/// use tshub_core::{CallbackSignature, Parameter, ProxyDescriptor, TranslatedType};
/// use smallvec::smallvec;
///
/// let callback = CallbackSignature {
///     host_name: "OrderPlaced".to_owned(),
///     wire_name: "orderPlaced".to_owned(),
///     handler_name: "OrderPlaced".to_owned(),
///     parameters: smallvec![Parameter::new("order", TranslatedType::reference("Order"))],
/// };
///
/// let proxy = ProxyDescriptor::new("ShopHubClient", Vec::new(), vec![callback]);
/// assert_eq!(proxy.imports, vec!["Order".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    /// Generated class name.
    pub class_name: String,
    /// Invokable methods in declaration order.
    pub methods: Vec<MethodSignature>,
    /// Event callbacks in declaration order.
    pub callbacks: Vec<CallbackSignature>,
    /// Distinct referenced declaration names: callbacks first, then methods,
    /// each in first-seen order.
    pub imports: Vec<String>,
}

impl ProxyDescriptor {
    /// Creates a descriptor and derives its import set.
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        methods: Vec<MethodSignature>,
        callbacks: Vec<CallbackSignature>,
    ) -> Self {
        let mut imports: Vec<String> = Vec::new();
        let referenced = callbacks
            .iter()
            .flat_map(CallbackSignature::references)
            .chain(methods.iter().flat_map(MethodSignature::references));
        for name in referenced {
            if !imports.contains(&name) {
                imports.push(name);
            }
        }

        Self {
            class_name: class_name.into(),
            methods,
            callbacks,
            imports,
        }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::types::host::Primitive;

    fn method(name: &str, parameters: Parameters, ret: Option<TranslatedType>) -> MethodSignature {
        MethodSignature {
            host_name: name.to_owned(),
            wire_name: name.to_owned(),
            target_name: name.to_owned(),
            parameters,
            return_type: ret,
        }
    }

    #[test]
    fn test_method_references_include_return_type() {
        let signature = method(
            "place",
            smallvec![Parameter::new("id", TranslatedType::primitive(Primitive::Number))],
            Some(TranslatedType::reference("Receipt")),
        );
        assert_eq!(signature.references(), vec!["Receipt".to_owned()]);
    }

    #[test]
    fn test_handler_names() {
        let callback = CallbackSignature {
            host_name: "SomethingHappened".to_owned(),
            wire_name: "somethingHappened".to_owned(),
            handler_name: "SomethingHappened".to_owned(),
            parameters: Parameters::new(),
        };
        assert_eq!(callback.add_handler_name(), "addSomethingHappenedHandler");
        assert_eq!(callback.remove_handler_name(), "removeSomethingHappenedHandler");
    }

    #[test]
    fn test_proxy_imports_deduplicated_callbacks_first() {
        let methods = vec![method(
            "save",
            smallvec![
                Parameter::new("order", TranslatedType::reference("Order")),
                Parameter::new("kind", TranslatedType::reference("Kind")),
            ],
            None,
        )];
        let callbacks = vec![CallbackSignature {
            host_name: "Changed".to_owned(),
            wire_name: "changed".to_owned(),
            handler_name: "Changed".to_owned(),
            parameters: smallvec![Parameter::new(
                "kinds",
                TranslatedType::array(TranslatedType::reference("Kind"))
            )],
        }];

        let proxy = ProxyDescriptor::new("ShopHubClient", methods, callbacks);
        assert_eq!(proxy.imports, vec!["Kind".to_owned(), "Order".to_owned()]);
    }
}
