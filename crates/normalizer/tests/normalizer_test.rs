//! Integration tests for Swagger normalization

use provider_codegen_normalizer::{fix_swagger_file, normalize, SwaggerDocument};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn swagger_fixture() -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "API", "version": "1.0"},
        "paths": {
            "/route/list": {
                "get": {
                    "x-id": "routes",
                    "summary": "List routes",
                    "responses": {
                        "200": {"x-id": "nested", "description": "OK"}
                    }
                }
            },
            "/health": {
                "get": {"operationId": "legacy", "x-id": "health"}
            }
        },
        "definitions": {
            "Route": {
                "type": "object",
                "required": ["alias", "port"],
                "properties": {
                    "alias": {"type": "string"},
                    "port": {
                        "type": "object",
                        "properties": {
                            "listening": {"type": "integer"},
                            "proxy": {"type": "integer", "x-nullable": true}
                        }
                    },
                    "homepage": {"type": "object"}
                }
            },
            "Tags": {
                "type": "array",
                "items": [{}, {"type": "string"}]
            }
        }
    })
}

#[test]
fn test_end_to_end_scenario() {
    let mut document = json!({
        "definitions": {
            "Foo": {"type": "object", "properties": {"x": {"type": "string"}}}
        }
    });

    normalize(&mut document).unwrap();

    assert_eq!(
        document,
        json!({
            "definitions": {
                "Foo": {
                    "type": "object",
                    "properties": {
                        "x": {"type": "string", "x-nullable": false, "x-omitempty": false}
                    },
                    "x-nullable": false,
                    "x-omitempty": false
                }
            }
        })
    );
}

#[test]
fn test_required_gates_recursion() {
    let mut document = swagger_fixture();
    normalize(&mut document).unwrap();

    let route = &document["definitions"]["Route"];
    assert_eq!(route["x-nullable"], json!(false));
    assert_eq!(route["properties"]["alias"]["x-nullable"], json!(false));
    assert_eq!(route["properties"]["alias"]["x-omitempty"], json!(false));

    // not listed in `required`, so never visited
    let homepage = route["properties"]["homepage"].as_object().unwrap();
    assert!(!homepage.contains_key("x-nullable"));
    assert!(!homepage.contains_key("x-omitempty"));
}

#[test]
fn test_without_required_all_properties_visited() {
    let mut document = swagger_fixture();
    normalize(&mut document).unwrap();

    let port = &document["definitions"]["Route"]["properties"]["port"];
    assert_eq!(port["properties"]["listening"]["x-nullable"], json!(false));
    assert_eq!(port["properties"]["listening"]["x-omitempty"], json!(false));

    // explicitly nullable: flag kept, no omitempty added
    let proxy = port["properties"]["proxy"].as_object().unwrap();
    assert_eq!(proxy["x-nullable"], json!(true));
    assert!(!proxy.contains_key("x-omitempty"));
}

#[test]
fn test_array_items_are_visited() {
    let mut document = swagger_fixture();
    normalize(&mut document).unwrap();

    let items = document["definitions"]["Tags"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["x-nullable"], json!(false));
        assert_eq!(item["x-omitempty"], json!(false));
    }
}

#[test]
fn test_operation_id_promotion_stops_descent() {
    let mut document = swagger_fixture();
    normalize(&mut document).unwrap();

    let get = &document["paths"]["/route/list"]["get"];
    assert_eq!(get["operationId"], json!("routes"));
    assert!(get["responses"]["200"].get("operationId").is_none());

    // x-id wins over an existing operationId
    assert_eq!(
        document["paths"]["/health"]["get"]["operationId"],
        json!("health")
    );
}

#[test]
fn test_definitions_not_promoted() {
    let mut document = json!({
        "definitions": {"Foo": {"x-id": "foo"}},
        "paths": {}
    });
    normalize(&mut document).unwrap();

    assert!(document["definitions"]["Foo"].get("operationId").is_none());
}

#[test]
fn test_normalize_is_idempotent() {
    let mut document = swagger_fixture();
    let first = normalize(&mut document).unwrap();
    assert!(!first.is_unchanged());

    let once = document.clone();
    let second = normalize(&mut document).unwrap();

    assert!(second.is_unchanged(), "second run changed: {:?}", second);
    assert_eq!(document, once);
}

#[test]
fn test_field_order_preserved() {
    let mut doc = SwaggerDocument::from_json(
        r#"{"zeta": {}, "definitions": {"B": {"type": "string"}, "A": {}}, "alpha": 1}"#,
    )
    .unwrap();
    doc.normalize().unwrap();

    let keys: Vec<&String> = doc.document().as_object().unwrap().keys().collect();
    assert_eq!(keys, ["zeta", "definitions", "alpha"]);

    let definitions: Vec<&String> = doc.document()["definitions"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(definitions, ["B", "A"]);

    let b: Vec<&String> = doc.document()["definitions"]["B"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(b, ["type", "x-nullable", "x-omitempty"]);
}

#[test]
fn test_fix_swagger_file_rewrites_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("swagger.json");
    fs::write(&path, serde_json::to_string(&swagger_fixture()).unwrap()).unwrap();

    let report = fix_swagger_file(&path).unwrap();
    assert_eq!(report.operation_ids, 2);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("{\n  \"swagger\": \"2.0\","));
    let parsed: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["definitions"]["Route"]["x-nullable"], json!(false));

    // running again on its own output changes nothing
    let again = fix_swagger_file(&path).unwrap();
    assert!(again.is_unchanged());
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn test_fix_swagger_file_leaves_original_on_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("swagger.json");
    let original = r#"{"definitions": {"Broken": {"type": "array"}}}"#;
    fs::write(&path, original).unwrap();

    let result = fix_swagger_file(&path);

    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("/definitions/Broken"), "{}", message);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_fix_swagger_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let result = fix_swagger_file(temp_dir.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn test_large_numbers_preserved() {
    let json = r#"{"info": {"n": 100000000000000000000, "f": 0.10000000000000000555}}"#;
    let mut doc = SwaggerDocument::from_json(json).unwrap();
    doc.normalize().unwrap();

    let out = doc.to_json_string().unwrap();

    assert!(out.contains("\"n\": 100000000000000000000"), "{}", out);
    assert!(out.contains("\"f\": 0.10000000000000000555"), "{}", out);
}

#[test]
fn test_fix_swagger_file_writes_raw_utf8() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("swagger.json");
    fs::write(&path, r#"{"info": {"description": "Café ✓"}, "definitions": {}}"#).unwrap();

    fix_swagger_file(&path).unwrap();

    let written = fs::read(&path).unwrap();
    let expected = concat!(
        "{\n",
        "  \"info\": {\n",
        "    \"description\": \"Café ✓\"\n",
        "  },\n",
        "  \"definitions\": {}\n",
        "}"
    );
    assert_eq!(written, expected.as_bytes());
}
