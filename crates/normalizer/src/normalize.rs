//! Recursive rewrite passes over a Swagger document

use provider_codegen_common::{GeneratorError, Result};
use serde_json::{Map, Value};
use tracing::debug;

pub const DEFINITIONS: &str = "definitions";
pub const X_NULLABLE: &str = "x-nullable";
pub const X_OMITEMPTY: &str = "x-omitempty";
pub const X_ID: &str = "x-id";
pub const OPERATION_ID: &str = "operationId";

const TYPE: &str = "type";
const PROPERTIES: &str = "properties";
const REQUIRED: &str = "required";
const ITEMS: &str = "items";

/// Counts of what a normalization run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Schema nodes that received a default `x-nullable`
    pub nullable_defaulted: usize,
    /// Schema nodes that received a default `x-omitempty`
    pub omitempty_defaulted: usize,
    /// Nodes whose `operationId` was set from `x-id`
    pub operation_ids: usize,
}

impl NormalizeReport {
    /// True when the run did not modify the document
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalize a whole Swagger document in place
///
/// Every direct child of `definitions` gets nullable defaults; every other
/// top-level value gets `x-id` promoted to `operationId`.
pub fn normalize(document: &mut Value) -> Result<NormalizeReport> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| GeneratorError::schema("", "document root is not an object"))?;

    let mut walker = Walker::default();
    for (key, value) in root.iter_mut() {
        let path = pointer_push("", key);
        if key == DEFINITIONS {
            let definitions = value
                .as_object_mut()
                .ok_or_else(|| GeneratorError::schema(&path, "definitions is not an object"))?;
            for (name, schema) in definitions.iter_mut() {
                walker.non_nullable(schema, &pointer_push(&path, name))?;
            }
        } else {
            walker.operation_id(value, &path);
        }
    }

    Ok(walker.report)
}

/// Default `x-nullable`/`x-omitempty` on a schema node and its visited children
pub fn set_non_nullable(node: &mut Value) -> Result<NormalizeReport> {
    let mut walker = Walker::default();
    walker.non_nullable(node, "")?;
    Ok(walker.report)
}

/// Copy `x-id` into `operationId` on every node reachable from `node`
pub fn set_operation_id(node: &mut Value) -> NormalizeReport {
    let mut walker = Walker::default();
    walker.operation_id(node, "");
    walker.report
}

#[derive(Default)]
struct Walker {
    report: NormalizeReport,
}

impl Walker {
    fn non_nullable(&mut self, node: &mut Value, path: &str) -> Result<()> {
        let Value::Object(map) = node else {
            return Ok(());
        };

        if !map.contains_key(X_NULLABLE) {
            map.insert(X_NULLABLE.to_string(), Value::Bool(false));
            self.report.nullable_defaulted += 1;
        }
        // must run after the x-nullable default above
        if !map.contains_key(X_OMITEMPTY) && map.get(X_NULLABLE) == Some(&Value::Bool(false)) {
            map.insert(X_OMITEMPTY.to_string(), Value::Bool(false));
            self.report.omitempty_defaulted += 1;
        }

        let kind = map.get(TYPE).and_then(Value::as_str).map(str::to_string);
        match kind.as_deref() {
            Some("object") => self.properties(map, path),
            Some("array") => self.items(map, path),
            _ => Ok(()),
        }
    }

    fn properties(&mut self, map: &mut Map<String, Value>, path: &str) -> Result<()> {
        if !map.contains_key(PROPERTIES) {
            return Ok(());
        }

        let required: Option<Vec<String>> = match map.get(REQUIRED) {
            None => None,
            Some(Value::Array(names)) => Some(
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            Some(_) => {
                return Err(GeneratorError::schema(
                    pointer_push(path, REQUIRED),
                    "required is not a list of property names",
                ))
            }
        };

        let properties_path = pointer_push(path, PROPERTIES);
        let Some(Value::Object(properties)) = map.get_mut(PROPERTIES) else {
            return Err(GeneratorError::schema(
                properties_path,
                "properties is not an object",
            ));
        };

        for (name, child) in properties.iter_mut() {
            if let Some(required) = &required {
                if !required.iter().any(|r| r == name) {
                    debug!(path = %pointer_push(&properties_path, name), "skipping optional property");
                    continue;
                }
            }
            self.non_nullable(child, &pointer_push(&properties_path, name))?;
        }

        Ok(())
    }

    fn items(&mut self, map: &mut Map<String, Value>, path: &str) -> Result<()> {
        let items_path = pointer_push(path, ITEMS);
        match map.get_mut(ITEMS) {
            None => Err(GeneratorError::schema(path, "array schema has no items")),
            Some(Value::Array(items)) => {
                for (i, item) in items.iter_mut().enumerate() {
                    self.non_nullable(item, &pointer_push(&items_path, &i.to_string()))?;
                }
                Ok(())
            }
            // the entries of a single-schema `items` are keywords, not schemas
            Some(Value::Object(_)) => {
                debug!(path = %items_path, "items is a single schema, not descending");
                Ok(())
            }
            Some(_) => Err(GeneratorError::schema(
                items_path,
                "items is neither a list of schemas nor a schema object",
            )),
        }
    }

    fn operation_id(&mut self, node: &mut Value, path: &str) {
        let Value::Object(map) = node else {
            return;
        };

        if let Some(id) = map.get(X_ID).cloned() {
            if map.get(OPERATION_ID) != Some(&id) {
                debug!(path, operation_id = %id, "promoting x-id");
                map.insert(OPERATION_ID.to_string(), id);
                self.report.operation_ids += 1;
            }
            return;
        }

        for (key, child) in map.iter_mut() {
            self.operation_id(child, &pointer_push(path, key));
        }
    }
}

/// Append one reference token to a JSON pointer (RFC 6901 escaping)
fn pointer_push(base: &str, token: &str) -> String {
    format!("{}/{}", base, token.replace('~', "~0").replace('/', "~1"))
}
