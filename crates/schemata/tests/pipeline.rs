use rstest::rstest;
use schemata::jsonschema::{CompiledSchemaExt as _, DRAFT_2020_12, JsonSchemaBundleExt};
use schemata::openapi::{CompiledOpenApiSchema, OpenApiBundleExt};
use schemata::serde_json::{self, json};
use schemata::{
    AnnotationData, Error, PrimitiveKind, PropertyData, RefType, SchemaBundleExt, TitleType,
    TypeBundleExt, TypeCatalog, TypeData, TypeGraphBuilder, TypeGraphConfig, TypeId, TypeShape,
    annotations,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn id(text: &str) -> TypeId {
    TypeId::parse(text).unwrap()
}

fn shop_catalog() -> TypeCatalog {
    [
        TypeData::object(id("shop.Order"))
            .annotated(
                AnnotationData::new(annotations::DESCRIPTION)
                    .with_value(annotations::DESCRIPTION_VALUE, "A placed order"),
            )
            .member(PropertyData::new("id", id("kotlin.Long")))
            .member(
                PropertyData::new("status", id("shop.Status")).annotated(
                    AnnotationData::new(annotations::DEFAULT)
                        .with_value(annotations::DEFAULT_VALUE, "OPEN"),
                ),
            )
            .member(PropertyData::new("lines", id("kotlin.collections.List<shop.Line>")))
            .member(
                PropertyData::new("placed", id("java.time.Instant"))
                    .annotated(AnnotationData::new(annotations::OPTIONAL))
                    .annotated(
                        AnnotationData::new(annotations::EXAMPLE)
                            .with_value(annotations::EXAMPLE_VALUE, "2024-01-01T00:00:00Z"),
                    ),
            ),
        TypeData::object(id("shop.Line"))
            .member(PropertyData::new("sku", id("kotlin.String")))
            .member(
                PropertyData::new("quantity", id("kotlin.Int")).annotated(
                    AnnotationData::new(annotations::DEFAULT)
                        .with_value(annotations::DEFAULT_VALUE, 1.0),
                ),
            ),
        TypeData::enumeration(id("shop.Status"), vec!["OPEN".into(), "SHIPPED".into()]),
        TypeData::collection(id("kotlin.collections.List<shop.Line>"), id("shop.Line")),
        TypeData::primitive(id("kotlin.Long"), PrimitiveKind::Int64),
        TypeData::primitive(id("kotlin.Int"), PrimitiveKind::Int32),
        TypeData::primitive(id("kotlin.String"), PrimitiveKind::String),
    ]
    .into_iter()
    .collect()
}

fn shop_config() -> TypeGraphConfig {
    TypeGraphConfig::default().redirect(id("java.time.Instant"), id("kotlin.String"))
}

#[test]
fn openapi_inlining_for_a_built_graph() {
    init_tracing();
    let compiled: CompiledOpenApiSchema = TypeGraphBuilder::new(shop_config())
        .build(&shop_catalog(), &[id("shop.Order")])
        .and_then(|b| b.handle_optional_annotation())
        .and_then(|b| b.generate_openapi_schema())
        .and_then(|b| b.handle_core_annotations())
        .and_then(|b| b.compile_inlining())
        .unwrap()
        .into();

    assert!(compiled.components.is_empty());
    assert_eq!(
        serde_json::to_value(&compiled.root).unwrap(),
        json!({
            "type": "object",
            "description": "A placed order",
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "status": {
                    "type": "string",
                    "enum": ["OPEN", "SHIPPED"],
                    "default": "OPEN"
                },
                "lines": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sku": { "type": "string" },
                            "quantity": { "type": "integer", "format": "int32", "default": 1 }
                        },
                        "required": ["sku", "quantity"]
                    }
                },
                "placed": {
                    "type": "string",
                    "examples": ["2024-01-01T00:00:00Z"]
                }
            },
            "required": ["id", "status", "lines"]
        })
    );
}

#[test]
fn openapi_referencing_with_simple_names() {
    init_tracing();
    let (root, components) = TypeGraphBuilder::new(shop_config())
        .build(&shop_catalog(), &[id("shop.Order")])
        .and_then(|b| b.generate_openapi_schema())
        .and_then(|b| b.with_auto_title(TitleType::Simple))
        .and_then(|b| b.compile_referencing(RefType::Simple))
        .map(CompiledOpenApiSchema::from)
        .unwrap()
        .into_components();

    assert_eq!(root.title.as_deref(), Some("Order"));
    let properties = root.properties.unwrap();
    assert_eq!(
        properties["lines"].ref_path.as_deref(),
        Some("#/components/schemas/List%3CLine%3E")
    );

    let schemas = components.schemas.unwrap();
    let names: Vec<&str> = schemas.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Int", "Line", "List<Line>", "Long", "Status", "String"]);
    assert_eq!(
        serde_json::to_value(&schemas["List<Line>"]).unwrap(),
        json!({
            "type": "array",
            "title": "List<Line>",
            "items": { "$ref": "#/components/schemas/Line" }
        })
    );
}

#[test]
fn openapi_referencing_root_lists_every_root() {
    let catalog = shop_catalog().with(
        TypeData::object(id("shop.Customer"))
            .member(PropertyData::new("name", id("kotlin.String"))),
    );
    let compiled: CompiledOpenApiSchema = TypeGraphBuilder::new(shop_config())
        .build(&catalog, &[id("shop.Customer"), id("shop.Order")])
        .and_then(|b| b.generate_openapi_schema())
        .and_then(|b| b.compile_referencing_root(RefType::Full))
        .unwrap()
        .into();

    assert_eq!(
        compiled.root.ref_path.as_deref(),
        Some("#/components/schemas/shop.Customer")
    );
    assert!(compiled.components.contains_key("shop.Customer"));
    assert!(compiled.components.contains_key("shop.Order"));
    assert!(compiled.components.contains_key("shop.Line"));
}

fn tree_graph() -> TypeCatalog {
    [
        TypeData::object(id("Tree"))
            .member(PropertyData::new("children", id("List<Tree>")))
            .member(PropertyData::new("parent", id("Tree")).nullable().optional()),
        TypeData::collection(id("List<Tree>"), id("Tree")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn json_schema_inlining_breaks_cycles_with_defs() {
    init_tracing();
    let document = TypeGraphBuilder::default()
        .build(&tree_graph(), &[id("Tree")])
        .and_then(|b| b.generate_json_schema())
        .and_then(|b| b.compile_inlining())
        .unwrap()
        .into_document();

    let tree = json!({
        "type": "object",
        "properties": {
            "children": {
                "type": "array",
                "items": { "$ref": "#/$defs/Tree" }
            },
            "parent": {
                "anyOf": [{ "$ref": "#/$defs/Tree" }, { "type": "null" }]
            }
        },
        "required": ["children"]
    });
    let mut expected = tree.clone();
    expected["$schema"] = json!(DRAFT_2020_12);
    expected["$defs"] = json!({ "Tree": tree });
    assert_eq!(serde_json::to_value(document).unwrap(), expected);
}

#[test]
fn json_schema_referencing_emits_a_self_referencing_root() {
    let document = TypeGraphBuilder::default()
        .build(&tree_graph(), &[id("Tree")])
        .and_then(|b| b.generate_json_schema())
        .and_then(|b| b.compile_referencing(RefType::Full))
        .unwrap()
        .into_document();

    let defs = document.defs.unwrap();
    let names: Vec<&str> = defs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["List<Tree>", "Tree"]);
    let children = &document.properties.unwrap()["children"];
    assert_eq!(children.ref_path.as_deref(), Some("#/$defs/List%3CTree%3E"));
}

#[rstest]
#[case(RefType::Full, true)]
#[case(RefType::Simple, false)]
fn simple_names_can_collide(#[case] ref_type: RefType, #[case] succeeds: bool) {
    let catalog: TypeCatalog = [
        TypeData::object(id("app.Holder"))
            .member(PropertyData::new("left", id("left.Item")))
            .member(PropertyData::new("right", id("right.Item"))),
        TypeData::object(id("left.Item")),
        TypeData::object(id("right.Item")),
    ]
    .into_iter()
    .collect();

    let result = TypeGraphBuilder::default()
        .build(&catalog, &[id("app.Holder")])
        .and_then(|b| b.generate_json_schema())
        .and_then(|b| b.compile_referencing(ref_type));

    match result {
        Ok(compiled) => {
            assert!(succeeds);
            assert_eq!(compiled.definitions.len(), 2);
        }
        Err(err) => {
            assert!(!succeeds);
            assert_eq!(
                err,
                Error::NamingCollision {
                    name: "Item".to_string(),
                    first: id("left.Item"),
                    second: id("right.Item"),
                }
            );
        }
    }
}

#[test]
fn generic_titles_follow_the_title_policy() {
    let catalog: TypeCatalog = [
        TypeData::object(id("api.Page<api.User>"))
            .member(PropertyData::new("items", id("java.util.Set<api.User>")))
            .member(PropertyData::new(
                "index",
                id("kotlin.collections.Map<kotlin.String,kotlin.Int>"),
            )),
        TypeData::new(
            id("java.util.Set<api.User>"),
            TypeShape::Collection {
                item: id("api.User"),
                unique: true,
            },
        ),
        TypeData::map(
            id("kotlin.collections.Map<kotlin.String,kotlin.Int>"),
            id("kotlin.Int"),
        ),
        TypeData::object(id("api.User")).annotated(AnnotationData::new(annotations::DEPRECATED)),
        TypeData::primitive(id("kotlin.Int"), PrimitiveKind::Int32),
    ]
    .into_iter()
    .collect();

    let compiled = TypeGraphBuilder::default()
        .build(&catalog, &[id("api.Page<api.User>")])
        .and_then(|b| b.generate_json_schema())
        .and_then(|b| b.handle_core_annotations())
        .and_then(|b| b.with_auto_title(TitleType::Simple))
        .and_then(|b| b.compile_inlining())
        .unwrap();

    let root = serde_json::to_value(&compiled.root).unwrap();
    assert_eq!(root["title"], json!("Page<User>"));
    assert_eq!(root["properties"]["items"]["uniqueItems"], json!(true));
    assert_eq!(root["properties"]["items"]["title"], json!("Set<User>"));
    assert_eq!(root["properties"]["items"]["items"]["deprecated"], json!(true));
    assert_eq!(
        root["properties"]["index"]["additionalProperties"],
        json!({ "type": "integer", "format": "int32", "title": "Int" })
    );
}

#[test]
fn missing_types_fail_the_build() {
    let catalog: TypeCatalog = [TypeData::object(id("Lonely"))
        .member(PropertyData::new("friend", id("Ghost")))]
    .into_iter()
    .collect();

    let err = TypeGraphBuilder::default()
        .build(&catalog, &[id("Lonely")])
        .unwrap_err();
    assert_eq!(err, Error::UnresolvedType { id: id("Ghost") });
}
