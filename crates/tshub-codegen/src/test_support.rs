//! Shared fixtures for unit tests.
//!
//! `sample_document()` mirrors a small SignalR server: one `TestHub`
//! deriving from `Hub<ITestHubClient>`, an `EventType` enum and a
//! `SomeObjectModel` covering primitives, nullables and dictionaries.

use tshub_core::{
    MetadataDocument, MethodDefinition, ParameterDefinition, TypeDefinition, TypeRef,
};

pub(crate) fn string() -> TypeRef {
    TypeRef::named("System.String")
}

pub(crate) fn int() -> TypeRef {
    TypeRef::named("System.Int32")
}

pub(crate) fn list_of(element: TypeRef) -> TypeRef {
    TypeRef::generic("System.Collections.Generic.List`1", vec![element])
}

fn nullable(inner: TypeRef) -> TypeRef {
    TypeRef::generic("System.Nullable`1", vec![inner])
}

fn task() -> TypeRef {
    TypeRef::named("System.Threading.Tasks.Task")
}

fn task_of(inner: TypeRef) -> TypeRef {
    TypeRef::generic("System.Threading.Tasks.Task`1", vec![inner])
}

fn dictionary(key: TypeRef, value: TypeRef) -> TypeRef {
    TypeRef::generic("System.Collections.Generic.Dictionary`2", vec![key, value])
}

fn parameter(name: &str, ty: TypeRef) -> ParameterDefinition {
    ParameterDefinition::new(name, ty)
}

pub(crate) fn sample_document() -> MetadataDocument {
    let event_type = || TypeRef::named("Demo.EventType");
    let model = || TypeRef::named("Demo.SomeObjectModel");
    let boolean = || TypeRef::named("System.Boolean");
    let date_time = || TypeRef::named("System.DateTime");

    let types = vec![
        TypeDefinition::enumeration("Demo.EventType", ["SomeEvent", "SomeOtherEvent"]),
        TypeDefinition::class("Demo.SomeObjectModel")
            .with_property("SomeBoolean", boolean())
            .with_property("SomeNullableBoolean", nullable(boolean()))
            .with_property("SomeString", string())
            .with_property("SomeNullableString", string().into_nullable())
            .with_property("SomeInt", int())
            .with_property("SomeNullableInt", nullable(int()))
            .with_property("SomeDateTime", date_time())
            .with_property("SomeNullableDateTime", nullable(date_time()))
            .with_property("SomeEvent", event_type())
            .with_property("SomeStringDictionary", dictionary(string(), string()))
            .with_property("SomeEnumDictionary", dictionary(event_type(), string())),
        TypeDefinition::interface("Demo.ITestHubClient")
            .with_method(MethodDefinition::new("Pong", Vec::new()).returning(task()))
            .with_method(
                MethodDefinition::new(
                    "SomethingHappened",
                    vec![parameter("message", string().into_nullable())],
                )
                .returning(task()),
            )
            .with_method(
                MethodDefinition::new(
                    "SomethingHappenedNullable",
                    vec![parameter("message", string().into_nullable())],
                )
                .returning(task()),
            )
            .with_method(
                MethodDefinition::new(
                    "SomethingHappenedModel",
                    vec![parameter("someEvent", event_type())],
                )
                .returning(task()),
            )
            .with_method(
                MethodDefinition::new(
                    "SomethingHappenedModelList",
                    vec![parameter("someEventsList", list_of(event_type()))],
                )
                .returning(task()),
            ),
        TypeDefinition::class("Demo.TestHub")
            .with_base(TypeRef::generic(
                "Microsoft.AspNetCore.SignalR.Hub`1",
                vec![TypeRef::named("Demo.ITestHubClient")],
            ))
            .with_method(
                MethodDefinition::new("DoStuffObject", vec![parameter("someObject", model())])
                    .returning(task_of(model())),
            )
            .with_method(
                MethodDefinition::new(
                    "DoStuffObjectNullable",
                    vec![parameter("someObject", model().into_nullable())],
                )
                .returning(task_of(model())),
            )
            .with_method(
                MethodDefinition::new(
                    "DoStuffNullableInt",
                    vec![parameter("number", nullable(int())), parameter("otherNumber", int())],
                )
                .returning(task()),
            )
            .with_method(
                MethodDefinition::new(
                    "DoStuffWithEnum",
                    vec![
                        parameter("someNullableEnum", nullable(event_type())),
                        parameter("someEnum", event_type()),
                    ],
                )
                .returning(task_of(event_type())),
            ),
    ];

    MetadataDocument::new(Some("Demo.Server".to_owned()), types).unwrap()
}
