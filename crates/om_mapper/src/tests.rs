use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use om_value::{AccessorInfo, ConstructError, FieldInfo, Key, Symbol, Value, class, record};
use serde_json::json;

use crate::extract::{DeepPath, DeserializeOnly, OverrideName, SnakeCase, Straight, Transform};
use crate::validate::{NumberRange, Required, StringLength, TypeOf};
use crate::{
    MapError, MappedClass, MappedObject, Registry, TypeResolveError, Validator, clone, create,
    deserialize, deserialize_array, serialize, serialize_value, validate,
};

fn raw(json: serde_json::Value) -> Value {
    serde_json::from_value(json).unwrap()
}

fn to_json(value: impl Into<Value>) -> serde_json::Value {
    serde_json::to_value(value.into()).unwrap()
}

fn paths(errors: &[crate::ValidationError]) -> Vec<String> {
    errors.iter().map(|error| error.path().to_string()).collect()
}

// -----------------------------------------------------------------------------
// Classes

class! {
    static ADDRESS = "Address" {}
}

class! {
    static USER = "User" {
        fields: [
            FieldInfo::new("role").with_default(|| Value::from("guest")),
            FieldInfo::new("address").with_type(&ADDRESS),
        ],
    }
}

class! {
    static ADMIN = "Admin" extends USER {}
}

class! {
    static GUEST = "Guest" extends USER {}
}

class! {
    static COMPUTED = "Computed" {
        accessors: [
            AccessorInfo::new("display").with_getter(|this| this.get("name")),
            AccessorInfo::new("shout").with_setter(|this, value| {
                this.insert("name", value.as_str().map(str::to_uppercase));
            }),
        ],
    }
}

class! {
    static LABELED = "Labeled" {}
}

class! {
    static COMPUTED_LABEL = "ComputedLabel" extends LABELED {
        accessors: [AccessorInfo::new("label").with_getter(|_| Value::from("computed"))],
    }
}

class! {
    static BROKEN = "Broken" {
        params: ["required"],
        init: |this| Err(ConstructError::missing_arguments(this.class())),
    }
}

class! {
    static INNER = "Inner" {}
}

class! {
    static MIDDLE = "Middle" {}
}

class! {
    static OUTER = "Outer" {}
}

fn user_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .declare(&ADDRESS)
        .property("city")
        .unwrap()
        .property_with("zipCode", SnakeCase::new())
        .unwrap();
    registry
        .declare(&USER)
        .property("name")
        .unwrap()
        .property_with("lastName", SnakeCase::new())
        .unwrap()
        .property("role")
        .unwrap()
        .property("address")
        .unwrap()
        .property("tags")
        .unwrap();
    registry
}

fn nested_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property("property")
        .unwrap()
        .validator("property", Required)
        .validator("property", TypeOf::String);
    registry
        .declare(&MIDDLE)
        .property("deepNested")
        .unwrap()
        .ty("deepNested", &INNER);
    registry
        .declare(&OUTER)
        .property("nested")
        .unwrap()
        .ty("nested", &MIDDLE);
    registry
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn deserialize_then_serialize_restores_raw_data() {
    let registry = user_registry();
    let input = json!({
        "name": "John",
        "last_name": "Doe",
        "role": "admin",
        "address": { "city": "Paris", "zip_code": "75001" },
        "tags": ["a", "b"],
    });

    let user = deserialize(&registry, &USER, &raw(input.clone()));
    let user = user.as_instance().unwrap();

    assert_eq!(user.get("lastName"), Value::from("Doe"));
    let address = user.get("address");
    let address = address.as_instance().unwrap();
    assert!(address.is_instance_of(&ADDRESS));
    assert_eq!(address.get("zipCode"), Value::from("75001"));

    assert_eq!(to_json(serialize(&registry, user)), input);
}

#[test]
fn unmapped_raw_keys_are_ignored() {
    let registry = user_registry();
    let user = deserialize(&registry, &USER, &raw(json!({ "name": "Ann", "password": "x" })));
    let user = user.as_instance().unwrap();

    assert!(!user.has_own(&Key::from("password")));
    assert_eq!(to_json(serialize(&registry, user)), json!({ "name": "Ann", "role": "guest" }));
}

// -----------------------------------------------------------------------------
// Defaults

#[test]
fn defaults_survive_absent_and_undefined_values() {
    let registry = user_registry();

    let absent = USER.deserialize(&registry, &raw(json!({})));
    assert_eq!(absent.as_instance().unwrap().get("role"), Value::from("guest"));

    let undefined = USER.deserialize(&registry, &Value::from(record! { "role" => Value::Undefined }));
    assert_eq!(undefined.as_instance().unwrap().get("role"), Value::from("guest"));

    let null = USER.deserialize(&registry, &raw(json!({ "role": null })));
    assert_eq!(null.as_instance().unwrap().get("role"), Value::Null);
}

#[test]
fn falsy_values_are_assigned_as_they_are() {
    let registry = user_registry();
    let user = deserialize(
        &registry,
        &USER,
        &raw(json!({ "name": "", "role": 0, "address": false })),
    );
    let user = user.as_instance().unwrap();

    assert_eq!(user.get("name"), Value::from(""));
    assert_eq!(user.get("role"), Value::from(0));
    assert_eq!(user.get("address"), Value::Bool(false));
}

#[test]
fn create_keeps_defaults_for_absent_keys_only() {
    let registry = user_registry();

    let user = create(&registry, &USER, &Value::from(record! { "name" => "Ann" })).unwrap();
    assert_eq!(user.get("role"), Value::from("guest"));

    let user = create(&registry, &USER, &Value::from(record! { "role" => Value::Undefined })).unwrap();
    assert!(user.has_own(&Key::from("role")));
    assert_eq!(user.get("role"), Value::Undefined);

    let user = create(&registry, &USER, &Value::from(7)).unwrap();
    assert_eq!(user.get("role"), Value::from("guest"));
}

#[test]
fn create_maps_nested_records() {
    let registry = user_registry();
    let user = create(
        &registry,
        &USER,
        &Value::from(record! {
            "address" => record! { "city" => "Oslo" },
            "tags" => vec![Value::from("x"), Value::Null],
        }),
    )
    .unwrap();

    let address = user.get("address");
    assert!(address.as_instance().unwrap().is_instance_of(&ADDRESS));
    assert_eq!(
        user.get("tags"),
        Value::Array(vec![Value::from("x"), Value::Null])
    );
}

#[test]
fn create_from_an_instance_copies_it() {
    let registry = user_registry();
    let admin = create(&registry, &ADMIN, &Value::from(record! { "name" => "Root" })).unwrap();

    let copy = create(&registry, &USER, &Value::from(admin.clone())).unwrap();

    assert!(copy.is_instance_of(&ADMIN));
    assert_eq!(copy, admin);
}

// -----------------------------------------------------------------------------
// Inheritance

#[test]
fn subclasses_inherit_without_leaking_into_siblings() {
    let mut registry = user_registry();
    registry.declare(&ADMIN).property("permissions").unwrap();
    registry.declare(&GUEST).property("expiresAt").unwrap();

    let admin = registry.properties(&ADMIN).unwrap();
    let guest = registry.properties(&GUEST).unwrap();
    let user = registry.properties(&USER).unwrap();

    assert!(admin.contains(&Key::from("name")));
    assert!(admin.contains(&Key::from("permissions")));
    assert!(!admin.contains(&Key::from("expiresAt")));
    assert!(guest.contains(&Key::from("expiresAt")));
    assert!(!guest.contains(&Key::from("permissions")));
    assert_eq!(user.len(), 5);

    let admin = deserialize(
        &registry,
        &ADMIN,
        &raw(json!({ "name": "Root", "permissions": ["all"], "expiresAt": 1 })),
    );
    let admin = admin.as_instance().unwrap();
    assert_eq!(admin.get("role"), Value::from("guest"));
    assert!(!admin.has_own(&Key::from("expiresAt")));
}

#[test]
fn subclass_can_override_a_property_extractor() {
    let mut registry = user_registry();
    registry
        .declare(&ADMIN)
        .property_with("name", OverrideName::new("login"))
        .unwrap();

    let admin = deserialize(&registry, &ADMIN, &raw(json!({ "login": "root", "name": "x" })));
    assert_eq!(admin.as_instance().unwrap().get("name"), Value::from("root"));

    let user = deserialize(&registry, &USER, &raw(json!({ "login": "root", "name": "x" })));
    assert_eq!(user.as_instance().unwrap().get("name"), Value::from("x"));
}

// -----------------------------------------------------------------------------
// Nested types

#[test]
fn explicit_type_wins_over_declared_type() {
    let mut registry = user_registry();
    registry.declare(&INNER).property("city").unwrap();
    registry.declare(&ADMIN).ty("address", &INNER);

    let admin = deserialize(&registry, &ADMIN, &raw(json!({ "address": { "city": "Rome" } })));
    let address = admin.as_instance().unwrap().get("address");
    assert!(address.as_instance().unwrap().is_instance_of(&INNER));

    let user = deserialize(&registry, &USER, &raw(json!({ "address": { "city": "Rome" } })));
    let address = user.as_instance().unwrap().get("address");
    assert!(address.as_instance().unwrap().is_instance_of(&ADDRESS));
}

#[test]
fn conditional_types_resolve_per_item() {
    let mut registry = nested_registry();
    registry.declare(&ADDRESS).property("city").unwrap();
    registry
        .declare(&MIDDLE)
        .property("items")
        .unwrap()
        .conditional_ty("items", |item| match item.get("kind") {
            Some(Value::String(kind)) if kind == "address" => Some(&ADDRESS),
            Some(_) => Some(&INNER),
            None => None,
        });

    let middle = deserialize(
        &registry,
        &MIDDLE,
        &raw(json!({
            "items": [
                { "kind": "address", "city": "Lima" },
                { "kind": "inner", "property": "p" },
                { "other": true },
            ],
        })),
    );
    let items = middle.as_instance().unwrap().get("items");
    let items = items.as_array().unwrap();

    assert!(items[0].as_instance().unwrap().is_instance_of(&ADDRESS));
    assert!(items[1].as_instance().unwrap().is_instance_of(&INNER));
    assert!(items[2].as_record().is_some());
}

#[test]
fn failing_conditional_type_leaves_value_unmapped() {
    let mut registry = user_registry();
    registry
        .declare(&GUEST)
        .try_conditional_ty("address", |_| Err(TypeResolveError::new("ambiguous")));

    let guest = deserialize(&registry, &GUEST, &raw(json!({ "address": { "city": "Bern" } })));
    let address = guest.as_instance().unwrap().get("address");

    assert_eq!(address, Value::from(record! { "city" => "Bern" }));
}

#[test]
fn unmapped_types_are_not_instantiated() {
    let mut registry = Registry::new();
    registry.declare(&USER).property("address").unwrap();

    let user = deserialize(&registry, &USER, &raw(json!({ "address": { "city": "Kyiv" } })));
    let address = user.as_instance().unwrap().get("address");

    assert!(address.as_record().is_some());
}

// -----------------------------------------------------------------------------
// Arrays

#[test]
fn deserialize_array_maps_each_item() {
    let registry = user_registry();
    let users = deserialize_array(
        &registry,
        &USER,
        &raw(json!([{ "name": "a" }, { "name": "b" }, null])),
    )
    .unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[1].as_instance().unwrap().get("name"), Value::from("b"));
    assert!(users[2].as_instance().is_some());
}

#[test]
fn deserialize_array_rejects_other_values() {
    let registry = user_registry();

    assert_eq!(
        USER.deserialize_array(&registry, &raw(json!({ "name": "a" }))),
        Err(MapError::NotAnArray("record"))
    );
}

// -----------------------------------------------------------------------------
// Accessors and construction

#[test]
fn accessors_control_assignment() {
    let mut registry = Registry::new();
    registry
        .declare(&COMPUTED)
        .property("display")
        .unwrap()
        .property("shout")
        .unwrap();

    let computed = deserialize(
        &registry,
        &COMPUTED,
        &raw(json!({ "display": "ignored", "shout": "hey" })),
    );
    let computed = computed.as_instance().unwrap();

    assert!(!computed.has_own(&Key::from("display")));
    assert!(!computed.has_own(&Key::from("shout")));
    assert_eq!(computed.get("name"), Value::from("HEY"));
    assert_eq!(computed.get("display"), Value::from("HEY"));

    assert_eq!(to_json(serialize(&registry, computed)), json!({ "display": "HEY" }));
}

#[test]
fn inherited_properties_respect_subclass_accessors() {
    let mut registry = Registry::new();
    registry.declare(&LABELED).property("label").unwrap();

    let input = raw(json!({ "label": "from-raw" }));
    let check = |registry: &Registry| {
        let sub = deserialize(registry, &COMPUTED_LABEL, &input);
        let sub = sub.as_instance().unwrap();

        assert!(!sub.has_own(&Key::from("label")));
        assert_eq!(sub.get("label"), Value::from("computed"));
    };

    // Nothing declared for the subclass.
    check(&registry);

    // Only a type declared for the subclass.
    registry.declare(&COMPUTED_LABEL).ty("other", &INNER);
    check(&registry);

    let base = deserialize(&registry, &LABELED, &input);
    assert_eq!(base.as_instance().unwrap().get("label"), Value::from("from-raw"));
}

#[test]
fn failing_construction_returns_raw_data() {
    let mut registry = Registry::new();
    registry.declare(&BROKEN).param(0).unwrap();

    let input = raw(json!({ "required": 1 }));

    assert_eq!(deserialize(&registry, &BROKEN, &input), input);
    assert!(validate(&registry, &BROKEN, &raw(json!({}))).is_empty());
    assert!(matches!(
        create(&registry, &BROKEN, &input),
        Err(MapError::Construct(_))
    ));
}

// -----------------------------------------------------------------------------
// Serialization

#[test]
fn serialize_omits_undefined_entries() {
    let registry = user_registry();
    let user = create(
        &registry,
        &USER,
        &Value::from(record! {
            "name" => "Ann",
            "lastName" => Value::Undefined,
            "address" => record! { "city" => Value::Undefined },
        }),
    )
    .unwrap();

    assert_eq!(
        to_json(user.serialize(&registry)),
        json!({ "name": "Ann", "role": "guest", "address": {} })
    );
}

#[test]
fn serialize_transform_to_null_is_kept() {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property_with(
            "property",
            Straight::new().transform(Transform::new().on_serialize(|_| Value::Null)),
        )
        .unwrap();

    let inner = create(&registry, &INNER, &Value::Undefined).unwrap();

    assert_eq!(to_json(serialize(&registry, &inner)), json!({ "property": null }));
}

#[test]
fn serialize_walks_arrays_of_instances() {
    let registry = user_registry();
    let address = create(&registry, &ADDRESS, &Value::from(record! { "zipCode" => "1" })).unwrap();
    let mut user = create(&registry, &USER, &Value::Undefined).unwrap();
    user.insert("tags", vec![Value::from(address), Value::from(record! { "raw" => true })]);

    assert_eq!(
        to_json(serialize(&registry, &user)),
        json!({ "role": "guest", "tags": [{ "zip_code": "1" }, {}] })
    );
}

#[test]
fn serialize_value_empties_unmapped_objects_and_keeps_scalars() {
    let registry = user_registry();
    let nested = Value::Array(vec![Value::from(1), Value::from("a")]);

    assert_eq!(
        to_json(serialize_value(&registry, &Value::from(record! { "raw" => true }))),
        json!({})
    );
    assert_eq!(to_json(serialize_value(&registry, &nested)), json!({}));
    assert_eq!(serialize_value(&registry, &Value::from("a")), Value::from("a"));
    assert_eq!(serialize_value(&registry, &Value::Null), Value::Null);

    let mut user = create(&registry, &USER, &Value::Undefined).unwrap();
    user.insert("tags", vec![nested, Value::from(2)]);

    assert_eq!(
        to_json(serialize(&registry, &user)),
        json!({ "role": "guest", "tags": [{}, 2] })
    );
}

#[test]
fn deserialize_only_properties_are_not_written() {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property_with("secret", DeserializeOnly::new(Straight::new()))
        .unwrap()
        .property("visible")
        .unwrap();

    let inner = deserialize(&registry, &INNER, &raw(json!({ "secret": "s", "visible": 1 })));
    let inner = inner.as_instance().unwrap();

    assert_eq!(inner.get("secret"), Value::from("s"));
    assert_eq!(to_json(serialize(&registry, inner)), json!({ "visible": 1 }));
}

#[test]
fn deep_path_reads_and_writes_nested_records() {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property_with("city", DeepPath::new("address.city"))
        .unwrap();

    let inner = deserialize(&registry, &INNER, &raw(json!({ "address": { "city": "Turin" } })));
    let inner = inner.as_instance().unwrap();

    assert_eq!(inner.get("city"), Value::from("Turin"));
    assert_eq!(
        to_json(serialize(&registry, inner)),
        json!({ "address": { "city": "Turin" } })
    );
}

#[test]
fn symbol_keys_reject_renaming_strategies() {
    static TOKEN: Symbol = Symbol::new("token");

    let mut registry = Registry::new();
    let error = registry
        .declare(&INNER)
        .property_with(&TOKEN, SnakeCase::new())
        .err();

    assert_eq!(error, Some(MapError::NotStringPropertyKey(Key::from(&TOKEN))));
    assert!(registry.declare(&INNER).property(&TOKEN).is_ok());
}

// -----------------------------------------------------------------------------
// Cloning

#[test]
fn clones_are_independent() {
    let registry = user_registry();
    let original = create(
        &registry,
        &USER,
        &Value::from(record! {
            "name" => "Ann",
            "address" => record! { "city" => "Riga" },
            "extra" => "kept",
        }),
    )
    .unwrap();

    let mut copy = clone(&registry, &original).unwrap();
    assert_eq!(copy, original);
    assert_eq!(copy.get("extra"), Value::from("kept"));

    if let Some(address) = copy.own_mut(&Key::from("address")).and_then(Value::as_instance_mut) {
        address.set("city", "Tartu");
    }
    copy.set("name", "Bob");

    let address = original.get("address");
    assert_eq!(address.as_instance().unwrap().get("city"), Value::from("Riga"));
    assert_eq!(original.get("name"), Value::from("Ann"));

    let again = original.clone_mapped(&registry).unwrap();
    assert_eq!(again, original);
}

// -----------------------------------------------------------------------------
// Validation

#[test]
fn validation_reports_array_indexes() {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property("p")
        .unwrap()
        .validator("p", Required);

    let errors = validate(&registry, &INNER, &raw(json!([{ "p": 1 }, {}, null])));

    assert_eq!(paths(&errors), ["[1].p", "[2].p"]);
    assert_eq!(errors[0].message(), "Property is required");
}

#[test]
fn validation_reports_nested_paths() {
    let registry = nested_registry();

    let errors = OUTER.validate(
        &registry,
        &raw(json!({
            "nested": [
                { "deepNested": { "property": "ok" } },
                { "deepNested": {} },
                { "deepNested": { "property": 5 } },
            ],
        })),
    );

    assert_eq!(
        paths(&errors),
        [
            "nested.[1].deepNested.property",
            "nested.[2].deepNested.property",
        ]
    );
    assert_eq!(errors[1].message(), "Value must be of type String");
}

#[test]
fn validation_uses_raw_paths_of_extractors() {
    let mut registry = Registry::new();
    registry
        .declare(&INNER)
        .property_with("firstName", SnakeCase::new())
        .unwrap()
        .property_with("age", DeepPath::new("profile.age"))
        .unwrap()
        .validator("firstName", StringLength::between(2, 10))
        .validator("age", NumberRange::at_least(18.0));

    let errors = validate(
        &registry,
        &INNER,
        &raw(json!({ "first_name": "A", "profile": { "age": 12 } })),
    );

    assert_eq!(paths(&errors), ["first_name", "profile.age"]);
    assert!(validate(&registry, &INNER, &raw(json!({ "first_name": "Al" }))).is_empty());
}

#[test]
fn validators_inherit_and_accumulate() {
    let mut registry = Registry::new();
    registry
        .declare(&USER)
        .property("name")
        .unwrap()
        .validator("name", Required);
    registry
        .declare(&ADMIN)
        .validator("name", StringLength::at_least(4));

    assert_eq!(validate(&registry, &ADMIN, &raw(json!({}))).len(), 1);
    assert_eq!(validate(&registry, &ADMIN, &raw(json!({ "name": "ab" }))).len(), 1);
    assert!(validate(&registry, &USER, &raw(json!({ "name": "ab" }))).is_empty());
    assert!(validate(&registry, &ADDRESS, &raw(json!({ "name": "ab" }))).is_empty());
}

#[test]
fn base_validators_run_before_subclass_validators() {
    let mut registry = Registry::new();
    registry
        .declare(&USER)
        .property("name")
        .unwrap()
        .validator("name", TypeOf::String);
    registry
        .declare(&ADMIN)
        .validator("name", NumberRange::at_least(5.0));

    let errors = validate(&registry, &ADMIN, &raw(json!({ "name": 1 })));
    let messages: Vec<&str> = errors.iter().map(|error| error.message()).collect();

    assert_eq!(
        messages,
        ["Value must be of type String", "Value should be greater than or equal to 5"]
    );
    assert_eq!(paths(&errors), ["name", "name"]);
    assert_eq!(validate(&registry, &USER, &raw(json!({ "name": 1 }))).len(), 1);
}

#[test]
fn param_validators_use_parameter_names() {
    class! {
        static POINT = "Point" {
            params: ["x", "y"],
        }
    }

    let required: Arc<dyn Validator> = Arc::new(Required);

    let mut registry = Registry::new();
    registry
        .declare(&POINT)
        .param(0)
        .unwrap()
        .param(1)
        .unwrap()
        .param_validators(1, [required])
        .unwrap();

    let errors = validate(&registry, &POINT, &raw(json!({ "x": 1 })));
    assert_eq!(paths(&errors), ["y"]);
    assert!(matches!(
        registry.declare(&POINT).param_validators(2, Vec::new()),
        Err(MapError::UnknownParameter { class: "Point", index: 2 })
    ));
}

// -----------------------------------------------------------------------------
// Auto registration

#[cfg(feature = "auto_register")]
mod auto_registered {
    use super::{ADDRESS, raw};
    use crate::{MapError, Registry, deserialize, submit_declaration};
    use om_value::Value;
    use serde_json::json;

    fn declare_address(registry: &mut Registry) -> Result<(), MapError> {
        registry.declare(&ADDRESS).property("street")?;
        Ok(())
    }

    submit_declaration!(declare_address);

    #[test]
    fn submitted_declarations_run_once() {
        let mut registry = Registry::new();

        assert_eq!(registry.auto_register(), Ok(true));
        assert_eq!(registry.auto_register(), Ok(true));
        assert_eq!(registry.properties(&ADDRESS).map(|map| map.len()), Some(1));

        let address = deserialize(&registry, &ADDRESS, &raw(json!({ "street": "Main" })));
        assert_eq!(address.as_instance().unwrap().get("street"), Value::from("Main"));
    }
}
