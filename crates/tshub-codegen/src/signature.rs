//! Method and callback signature building.
//!
//! [`SignatureBuilder`] turns host method definitions into the typed
//! [`MethodSignature`]/[`CallbackSignature`] intermediate form. Parameter and
//! return types go through the [`Translator`], so every named type they reach
//! is registered as a side effect.

use tracing::debug;
use tshub_core::{
    CallbackSignature, MethodDefinition, MethodSignature, Parameter, Parameters, TypeSource,
    WireNameCasing, to_camel_case, to_pascal_case,
};

use crate::error::GenerateError;
use crate::registry::DeclarationRegistry;
use crate::translator::Translator;

/// Builds signatures for invokable methods and client callbacks.
///
/// # Examples
///
/// ```
/// use tshub_codegen::{Classifier, DeclarationRegistry, SignatureBuilder, Translator};
/// use tshub_core::{
///     MetadataDocument, MethodDefinition, ParameterDefinition, TypeRef, WireNameCasing,
/// };
///
/// let document = MetadataDocument::default();
/// let translator = Translator::new(Classifier::new(&document));
/// let builder = SignatureBuilder::new(translator, WireNameCasing::Camel);
/// let mut registry = DeclarationRegistry::new();
///
/// let method = MethodDefinition::new(
///     "SendMessage",
///     vec![ParameterDefinition::new("Text", TypeRef::named("System.String"))],
/// );
/// let signature = builder.build_method("Demo.ChatHub", &method, &mut registry)?;
/// assert_eq!(signature.target_name, "sendMessage");
/// assert_eq!(signature.wire_name, "sendMessage");
/// assert_eq!(signature.parameters[0].name, "text");
/// assert!(signature.return_type.is_none());
/// # Ok::<(), tshub_codegen::GenerateError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SignatureBuilder<'a, S: ?Sized> {
    translator: Translator<'a, S>,
    casing: WireNameCasing,
}

impl<'a, S: TypeSource + ?Sized> SignatureBuilder<'a, S> {
    /// Creates a builder using `casing` for wire tokens.
    #[must_use]
    pub const fn new(translator: Translator<'a, S>, casing: WireNameCasing) -> Self {
        Self { translator, casing }
    }

    /// Builds the signature of an invokable method declared on `owner`.
    ///
    /// A declared result that carries no value (or no declared result at
    /// all) yields a signature without a return type.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnnamedMember`] for a parameter without a
    /// name, and any translation error from parameter or return types.
    pub fn build_method(
        &self,
        owner: &str,
        method: &MethodDefinition,
        registry: &mut DeclarationRegistry,
    ) -> Result<MethodSignature, GenerateError> {
        let parameters = self.parameters(owner, method, registry)?;

        let return_type = match &method.return_type {
            Some(ty) => {
                let host = self.translator.classifier().classify(ty)?;
                self.translator.translate_result(&host, registry)?
            }
            None => None,
        };

        let signature = MethodSignature {
            host_name: method.name.clone(),
            wire_name: self.casing.apply(&method.name),
            target_name: to_camel_case(&method.name),
            parameters,
            return_type,
        };
        debug!(
            owner,
            method = %signature.host_name,
            wire = %signature.wire_name,
            parameters = signature.parameters.len(),
            "Built method signature"
        );
        Ok(signature)
    }

    /// Builds the signature of a client callback declared on `owner`.
    ///
    /// The callback's declared result is ignored; events carry no reply.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnnamedMember`] for a parameter without a
    /// name, and any translation error from parameter types.
    pub fn build_callback(
        &self,
        owner: &str,
        method: &MethodDefinition,
        registry: &mut DeclarationRegistry,
    ) -> Result<CallbackSignature, GenerateError> {
        let parameters = self.parameters(owner, method, registry)?;

        let signature = CallbackSignature {
            host_name: method.name.clone(),
            wire_name: self.casing.apply(&method.name),
            handler_name: to_pascal_case(&method.name),
            parameters,
        };
        debug!(
            owner,
            callback = %signature.host_name,
            wire = %signature.wire_name,
            parameters = signature.parameters.len(),
            "Built callback signature"
        );
        Ok(signature)
    }

    fn parameters(
        &self,
        owner: &str,
        method: &MethodDefinition,
        registry: &mut DeclarationRegistry,
    ) -> Result<Parameters, GenerateError> {
        method
            .parameters
            .iter()
            .enumerate()
            .map(|(position, parameter)| {
                let name = parameter
                    .name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| GenerateError::UnnamedMember {
                        owner: format!("{owner}.{}", method.name),
                        position,
                    })?;
                let ty = self.translator.translate_ref(&parameter.ty, false, registry)?;
                Ok(Parameter::new(to_camel_case(name), ty))
            })
            .collect()
    }
}
