//! End-to-end scenarios: schema and data values written as YAML, compiled
//! and checked through the public API.

use tyml_core::{Document, DocumentSet, Value};
use tyml_schema::{select_schema, DocumentSchema, Schema, SchemaConfig, SchemaError};

fn schema(src: &str) -> DocumentSchema {
    let doc = Document::from_yaml_str(src, Some("schema.yml")).unwrap();
    DocumentSchema::new(doc).unwrap()
}

fn values(src: &str) -> Document {
    Document::from_yaml_str(src, Some("values.yml")).unwrap()
}

fn build_error(src: &str) -> SchemaError {
    let doc = Document::from_yaml_str(src, Some("schema.yml")).unwrap();
    DocumentSchema::new(doc).unwrap_err()
}

fn keys(value: &Value) -> Vec<String> {
    value.as_map().unwrap().keys().map(ToString::to_string).collect()
}

fn yaml(src: &str) -> serde_yaml::Value {
    serde_yaml::from_str(src).unwrap()
}

#[test]
fn empty_values_are_completed_from_schema() {
    let schema = schema("a: 1\nb: x\n");
    let mut target = values("{}");

    let check = schema.assign_type(&mut target);
    assert!(check.is_ok(), "{check}");
    assert_eq!(keys(&target.value), vec!["a", "b"]);
    assert_eq!(target.to_yaml(), yaml("a: 1\nb: x\n"));
}

#[test]
fn undeclared_key_is_reported_and_declared_key_appended() {
    let schema = schema("a: 1\n");
    let mut target = values("c: 2\n");

    let check = schema.assign_type(&mut target);
    assert_eq!(
        check.messages(),
        vec!["map item 'c' at values.yml:? is not defined in schema"]
    );
    assert_eq!(keys(&target.value), vec!["c", "a"]);
    assert_eq!(target.to_yaml(), yaml("c: 2\na: 1\n"));
}

#[test]
fn array_element_kind_mismatch_is_reported() {
    let schema = schema("list: [1]\n");
    let mut target = values("list: [x]\n");

    let check = schema.assign_type(&mut target);
    assert_eq!(
        check.messages(),
        vec!["array item was type string when integer was expected (at values.yml:?)"]
    );
    assert_eq!(target.to_yaml(), yaml("list: [x]\n"));
}

#[test]
fn nullable_entry_defaults_to_null() {
    let schema = schema("port: !schema/nullable 5\nhost: localhost\n");

    let mut omitted = values("host: example.org\n");
    assert!(schema.assign_type(&mut omitted).is_ok());
    assert_eq!(keys(&omitted.value), vec!["host", "port"]);
    assert_eq!(omitted.to_yaml(), yaml("host: example.org\nport: null\n"));

    let mut explicit = values("port: null\n");
    assert!(schema.assign_type(&mut explicit).is_ok());
    assert_eq!(explicit.to_yaml(), yaml("port: null\nhost: localhost\n"));

    let mut set = values("port: 8080\n");
    assert!(schema.assign_type(&mut set).is_ok());
    assert_eq!(set.to_yaml(), yaml("port: 8080\nhost: localhost\n"));
}

#[test]
fn nullable_array_entry_defaults_to_null() {
    let schema = schema("hosts: !schema/nullable [a]\n");
    let allowed = schema.allowed().value_type.as_ref().unwrap().as_map().unwrap();
    assert_eq!(allowed.items[0].default_value, None);

    let mut target = values("{}");
    assert!(schema.assign_type(&mut target).is_ok());
    assert_eq!(target.to_yaml(), yaml("hosts: null\n"));
}

#[test]
fn nested_maps_are_completed_depth_first() {
    let schema = schema(
        "\
app:
  name: demo
  ports: [80]
  db:
    host: localhost
    port: 5432
",
    );
    let mut target = values(
        "\
app:
  ports: [8080, x]
  db:
    port: 6543
    user: admin
",
    );

    let check = schema.assign_type(&mut target);
    assert_eq!(
        check.messages(),
        vec![
            "array item was type string when integer was expected (at values.yml:?)",
            "map item 'user' at values.yml:? is not defined in schema",
        ]
    );

    let app = &target.value.as_map().unwrap().items[0].value;
    assert_eq!(keys(app), vec!["ports", "db", "name"]);
    let db = &app.as_map().unwrap().items[1].value;
    assert_eq!(keys(db), vec!["port", "user", "host"]);
    assert_eq!(
        target.to_yaml(),
        yaml(
            "\
app:
  ports: [8080, x]
  db:
    port: 6543
    user: admin
    host: localhost
  name: demo
"
        )
    );
}

#[test]
fn default_values_empty_every_array() {
    let schema = schema("name: app\nports: [80]\ndb:\n  hosts: [h]\n");
    let defaults = schema.as_data_values().unwrap();
    assert_eq!(
        defaults.to_yaml(),
        yaml("name: app\nports: []\ndb:\n  hosts: []\n")
    );
}

#[test]
fn injected_nested_defaults_keep_the_schema_literal() {
    let schema = schema("db:\n  hosts: [h]\n  port: 1\nports: [80]\n");
    let mut target = values("{}");
    assert!(schema.assign_type(&mut target).is_ok());
    assert_eq!(
        target.to_yaml(),
        yaml("db:\n  hosts: [h]\n  port: 1\nports: []\n")
    );
}

#[test]
fn second_assignment_changes_nothing() {
    let schema = schema("a: 1\nb: [x]\nc:\n  d: true\n");
    let mut target = values("z: 0\nb: [y]\n");

    let first = schema.assign_type(&mut target);
    let completed = target.clone();
    let second = schema.assign_type(&mut target);

    assert_eq!(first, second);
    assert_eq!(target, completed);
    assert_eq!(keys(&target.value), vec!["z", "b", "a", "c"]);
}

#[test]
fn schema_shape_errors_abort_the_build() {
    assert!(matches!(
        build_error("k: []\n"),
        SchemaError::ArrayWithoutItem { .. }
    ));
    assert!(matches!(
        build_error("k: [1, 2, 3]\n"),
        SchemaError::ArrayWithManyItems { count: 3, .. }
    ));
    assert!(matches!(
        build_error("k: [!schema/nullable 1]\n"),
        SchemaError::NullableArrayItem { .. }
    ));
    assert!(matches!(
        build_error("k: null\n"),
        SchemaError::NullValue { .. }
    ));
    assert!(matches!(
        build_error("k: 1.5\n"),
        SchemaError::UnknownKind { kind: "float", .. }
    ));

    let err = build_error("outer:\n  inner: [a, b]\n");
    assert_eq!(
        err.to_string(),
        "expected one item (found 2) in array (describing the type of its elements) at schema.yml:?"
    );
}

#[test]
fn nullable_map_entry_keeps_its_shape() {
    let schema = schema("cfg: !schema/nullable\n  a: 1\n");

    let mut omitted = values("{}");
    assert!(schema.assign_type(&mut omitted).is_ok());
    assert_eq!(omitted.to_yaml(), yaml("cfg: null\n"));

    let mut given = values("cfg:\n  b: 2\n");
    let check = schema.assign_type(&mut given);
    assert_eq!(
        check.messages(),
        vec!["map item 'b' at values.yml:? is not defined in schema"]
    );
    assert_eq!(given.to_yaml(), yaml("cfg:\n  b: 2\n  a: 1\n"));
}

#[test]
fn schema_selection_from_a_document_stream() {
    let stream = DocumentSet::from_yaml_str("a: 1\n", Some("schema.yml")).unwrap();
    let schema = select_schema(&SchemaConfig::enabled(), stream.items).unwrap();
    assert!(schema.validate_with_values(2).is_ok());

    let mut target = values("{}");
    assert!(schema.assign_type(&mut target).is_ok());
    assert_eq!(target.to_yaml(), yaml("a: 1\n"));

    let two = DocumentSet::from_yaml_str("a: 1\n---\nb: 2\n", Some("schema.yml")).unwrap();
    assert!(matches!(
        select_schema(&SchemaConfig::enabled(), two.items),
        Err(SchemaError::MultipleSchemaDocuments { count: 2 })
    ));
}

#[test]
fn violations_can_be_made_fatal() {
    let schema = schema("a: 1\n");
    let mut target = values("b: 1\nc: 2\n");
    let err: SchemaError = schema
        .assign_type(&mut target)
        .into_result()
        .unwrap_err()
        .into();
    let message = err.to_string();
    assert!(message.starts_with("type check found 2 violation(s):"));
    assert!(message.contains("- map item 'b'"));
    assert!(message.contains("- map item 'c'"));
}
