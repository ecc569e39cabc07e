//! Mapper - Conversion between config trees and wire objects
//!
//! `expand` turns config-tree values into wire values, `flatten` does the
//! reverse. `build_object` and `refresh` apply them across a whole
//! descriptor table.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::compat::{CompatTable, FirmwareVersion};
use crate::resource::{Attributes, Value, lookup};
use crate::schema::{AttributeSchema, AttributeType, ResourceSchema, TypeError};

/// REST payload keyed by hyphenated field names
pub type WireObject = serde_json::Map<String, JsonValue>;

/// How list-of-record fields are handled on read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// Only commit tables the config tree already declares
    #[default]
    Refresh,
    /// Commit every table (bulk import, no prior config)
    Import,
}

/// How `build_object` fills the wire object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMode {
    /// Include fields that are set, omit the rest
    Write,
    /// Send `null` for every settable field so the server resets it
    Clear,
}

#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("Expected a list of records for '{field}'")]
    NotAList { field: String },

    #[error("Malformed list '{field}': element {index} is not a record")]
    MalformedList { field: String, index: usize },

    #[error("Error reading {field}: {source}")]
    Commit {
        field: String,
        #[source]
        source: TypeError,
    },
}

/// Expand the config value at `path` into its wire form
///
/// Returns `None` when the path is absent (the field is left out of the wire
/// object). Table records only carry sub-fields that are explicitly set.
pub fn expand(
    attr: &AttributeSchema,
    attributes: &Attributes,
    path: &str,
) -> Result<Option<JsonValue>, MapperError> {
    let Some(value) = lookup(attributes, path) else {
        return Ok(None);
    };

    match &attr.attr_type {
        AttributeType::Table(fields) => expand_table(fields, value, attributes, path),
        _ => Ok(Some(value.to_json())),
    }
}

fn expand_table(
    fields: &[AttributeSchema],
    value: &Value,
    attributes: &Attributes,
    path: &str,
) -> Result<Option<JsonValue>, MapperError> {
    let Value::List(items) = value else {
        return Err(MapperError::NotAList {
            field: path.to_string(),
        });
    };
    if items.is_empty() {
        return Ok(None);
    }

    let mut result = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if !matches!(item, Value::Map(_)) {
            return Err(MapperError::MalformedList {
                field: path.to_string(),
                index: i,
            });
        }

        let mut record = WireObject::new();
        for field in fields {
            let Some(wire_name) = field.wire_name() else {
                continue;
            };
            let sub_path = format!("{}.{}.{}", path, i, field.name);
            if field.is_set(attributes, &sub_path)
                && let Some(v) = expand(field, attributes, &sub_path)?
            {
                record.insert(wire_name.to_string(), v);
            }
        }
        result.push(JsonValue::Object(record));
    }

    Ok(Some(JsonValue::Array(result)))
}

/// Flatten a raw wire value into its config form (still JSON, keyed by config keys)
///
/// Scalars pass through. Tables that are null, empty, or start with null are
/// absent; record fields missing on the wire are left out.
pub fn flatten(attr: &AttributeSchema, raw: &JsonValue) -> Option<JsonValue> {
    match &attr.attr_type {
        AttributeType::Table(fields) => flatten_table(fields, raw),
        _ if raw.is_null() => None,
        _ => Some(raw.clone()),
    }
}

fn flatten_table(fields: &[AttributeSchema], raw: &JsonValue) -> Option<JsonValue> {
    let items = raw.as_array()?;
    if items.first().is_none_or(JsonValue::is_null) {
        return None;
    }

    let records = items
        .iter()
        .map(|item| {
            let mut record = serde_json::Map::new();
            if let Some(wire_record) = item.as_object() {
                for field in fields {
                    if let Some(wire_name) = field.wire_name()
                        && let Some(v) = wire_record.get(wire_name)
                        && let Some(flat) = flatten(field, v)
                    {
                        record.insert(field.name.clone(), flat);
                    }
                }
            }
            JsonValue::Object(record)
        })
        .collect();

    Some(JsonValue::Array(records))
}

/// Coerce a flattened value into a typed config-tree value
pub fn commit(attr_type: &AttributeType, flattened: &JsonValue) -> Result<Value, TypeError> {
    let mismatch = || TypeError::TypeMismatch {
        expected: attr_type.to_string(),
        got: json_type_name(flattened).to_string(),
    };

    match attr_type {
        AttributeType::String => flattened
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(mismatch),
        AttributeType::Bool => flattened.as_bool().map(Value::Bool).ok_or_else(mismatch),
        AttributeType::Int => json_to_int(flattened).map(Value::Int).ok_or_else(mismatch),
        AttributeType::Table(fields) => {
            let items = flattened.as_array().ok_or_else(mismatch)?;
            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let object = item.as_object().ok_or_else(|| TypeError::ListItemError {
                    index,
                    inner: Box::new(TypeError::TypeMismatch {
                        expected: "Map".to_string(),
                        got: json_type_name(item).to_string(),
                    }),
                })?;
                let mut record = Attributes::new();
                for field in fields {
                    if let Some(v) = object.get(&field.name) {
                        let value = commit(&field.attr_type, v).map_err(|e| {
                            TypeError::ListItemError {
                                index,
                                inner: Box::new(TypeError::MapValueError {
                                    key: field.name.clone(),
                                    inner: Box::new(e),
                                }),
                            }
                        })?;
                        record.insert(field.name.clone(), value);
                    }
                }
                records.push(Value::Map(record));
            }
            Ok(Value::List(records))
        }
    }
}

/// Integers arrive as JSON numbers, often in floating-point form (3.0)
fn json_to_int(value: &JsonValue) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "Null",
        JsonValue::Bool(_) => "Bool",
        JsonValue::Number(_) => "Number",
        JsonValue::String(_) => "String",
        JsonValue::Array(_) => "List",
        JsonValue::Object(_) => "Map",
    }
}

/// Assemble the wire object for a write or reset request
pub fn build_object(
    schema: &ResourceSchema,
    attributes: &Attributes,
    mode: ObjectMode,
) -> Result<WireObject, MapperError> {
    let mut obj = WireObject::new();

    for attr in schema.wired() {
        let Some(wire_name) = attr.wire_name() else {
            continue;
        };
        match mode {
            ObjectMode::Clear => {
                if attr.is_settable() {
                    obj.insert(wire_name.to_string(), JsonValue::Null);
                }
            }
            ObjectMode::Write => {
                if attr.read_only || !attr.is_set(attributes, &attr.name) {
                    continue;
                }
                if let Some(v) = expand(attr, attributes, &attr.name)? {
                    obj.insert(wire_name.to_string(), v);
                }
            }
        }
    }

    Ok(obj)
}

/// Read-side settings threaded through `refresh`
#[derive(Debug, Clone, Copy)]
pub struct RefreshContext<'a> {
    pub mode: ReadMode,
    pub compat: &'a CompatTable,
    pub firmware: Option<FirmwareVersion>,
}

impl<'a> RefreshContext<'a> {
    pub fn new(mode: ReadMode, compat: &'a CompatTable) -> Self {
        Self {
            mode,
            compat,
            firmware: None,
        }
    }

    pub fn with_firmware(mut self, firmware: Option<FirmwareVersion>) -> Self {
        self.firmware = firmware;
        self
    }
}

/// Flatten a wire object and commit each field into the config tree
pub fn refresh(
    schema: &ResourceSchema,
    wire: &WireObject,
    attributes: &mut Attributes,
    ctx: &RefreshContext<'_>,
) -> Result<(), MapperError> {
    for attr in schema.wired() {
        let Some(wire_name) = attr.wire_name() else {
            continue;
        };

        // Tables the user never declared stay out of state unless importing
        if attr.attr_type.is_table()
            && ctx.mode == ReadMode::Refresh
            && !attr.is_set(attributes, &attr.name)
        {
            continue;
        }

        let raw = wire.get(wire_name).unwrap_or(&JsonValue::Null);
        let Some(flattened) = flatten(attr, raw) else {
            attributes.remove(&attr.name);
            continue;
        };

        match commit(&attr.attr_type, &flattened) {
            Ok(value) => {
                attributes.insert(attr.name.clone(), value);
            }
            Err(e) if ctx.compat.tolerates(wire_name, raw, ctx.firmware) => {
                log::debug!(
                    "ignoring {} value for {} on firmware {:?}: {}",
                    json_type_name(raw),
                    attr.name,
                    ctx.firmware,
                    e
                );
            }
            Err(e) => {
                return Err(MapperError::Commit {
                    field: attr.name.clone(),
                    source: e,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::compat::{CompatRule, JsonKind};
    use crate::resource::table;
    use crate::schema::types;

    fn name_record(name: &str) -> Attributes {
        HashMap::from([("name".to_string(), Value::from(name))])
    }

    fn policy_schema() -> ResourceSchema {
        ResourceSchema::new("firewall_proxy_policy")
            .attribute(
                AttributeSchema::new("policyid", AttributeType::Int)
                    .required()
                    .force_new(),
            )
            .attribute(AttributeSchema::new("proxy", AttributeType::String).required())
            .attribute(AttributeSchema::new("srcintf", types::name_table(64)))
            .attribute(AttributeSchema::new("dstintf", types::name_table(64)).required())
            .attribute(AttributeSchema::new("internet_service_id", types::id_table()))
            .attribute(AttributeSchema::new("session_ttl", AttributeType::Int).zero_is_set())
            .attribute(AttributeSchema::new("schedule", AttributeType::String).required())
            .attribute(AttributeSchema::new("uuid", AttributeType::String).computed())
            .attribute(AttributeSchema::new("vdomparam", AttributeType::String).local_only())
    }

    fn dstintf_attr() -> AttributeSchema {
        AttributeSchema::new("dstintf", types::name_table(64))
    }

    #[test]
    fn expand_scalar_passes_value_through() {
        let attr = AttributeSchema::new("proxy", AttributeType::String);
        let mut attrs = Attributes::new();
        attrs.insert("proxy".to_string(), Value::from("explicit-web"));

        assert_eq!(
            expand(&attr, &attrs, "proxy").unwrap(),
            Some(json!("explicit-web"))
        );
        assert_eq!(expand(&attr, &Attributes::new(), "proxy").unwrap(), None);
    }

    #[test]
    fn expand_table_omits_unset_subfields() {
        let mut attrs = Attributes::new();
        attrs.insert(
            "dstintf".to_string(),
            table(vec![name_record("port1"), name_record(""), Attributes::new()]),
        );

        let wire = expand(&dstintf_attr(), &attrs, "dstintf").unwrap();
        assert_eq!(wire, Some(json!([{"name": "port1"}, {}, {}])));
    }

    #[test]
    fn expand_empty_table_is_absent() {
        let mut attrs = Attributes::new();
        attrs.insert("dstintf".to_string(), Value::List(vec![]));
        assert_eq!(expand(&dstintf_attr(), &attrs, "dstintf").unwrap(), None);
    }

    #[test]
    fn expand_malformed_table_names_field() {
        let mut attrs = Attributes::new();
        attrs.insert(
            "dstintf".to_string(),
            Value::List(vec![Value::Map(name_record("port1")), Value::from("port2")]),
        );

        match expand(&dstintf_attr(), &attrs, "dstintf") {
            Err(MapperError::MalformedList { field, index }) => {
                assert_eq!(field, "dstintf");
                assert_eq!(index, 1);
            }
            other => panic!("Expected MalformedList, got {:?}", other),
        }

        attrs.insert("dstintf".to_string(), Value::from("port1"));
        assert!(matches!(
            expand(&dstintf_attr(), &attrs, "dstintf"),
            Err(MapperError::NotAList { .. })
        ));
    }

    #[test]
    fn flatten_scalar_passes_value_through() {
        let attr = AttributeSchema::new("minimum_length", AttributeType::Int);
        assert_eq!(flatten(&attr, &json!(8.0)), Some(json!(8.0)));
        assert_eq!(flatten(&attr, &json!("bogus")), Some(json!("bogus")));
        assert_eq!(flatten(&attr, &JsonValue::Null), None);
    }

    #[test]
    fn flatten_absent_tables() {
        let attr = dstintf_attr();
        assert_eq!(flatten(&attr, &JsonValue::Null), None);
        assert_eq!(flatten(&attr, &json!([])), None);
        assert_eq!(flatten(&attr, &json!([null])), None);
        assert_eq!(flatten(&attr, &json!([null, {"name": "port1"}])), None);
    }

    #[test]
    fn flatten_table_omits_missing_fields() {
        let attr = dstintf_attr();
        let raw = json!([{"name": "port1", "q_origin_key": "port1"}, {}]);
        let flat = flatten(&attr, &raw).unwrap();
        assert_eq!(flat, json!([{"name": "port1"}, {}]));
        // Input untouched
        assert_eq!(raw, json!([{"name": "port1", "q_origin_key": "port1"}, {}]));
    }

    #[test]
    fn table_round_trip_preserves_order() {
        let attr = dstintf_attr();
        let records = table(vec![
            name_record("port3"),
            name_record("port1"),
            name_record("port2"),
        ]);
        let mut attrs = Attributes::new();
        attrs.insert("dstintf".to_string(), records.clone());

        let wire = expand(&attr, &attrs, "dstintf").unwrap().unwrap();
        let flat = flatten(&attr, &wire).unwrap();
        assert_eq!(commit(&attr.attr_type, &flat).unwrap(), records);
    }

    #[test]
    fn commit_coerces_integral_floats() {
        assert_eq!(
            commit(&AttributeType::Int, &json!(3.0)).unwrap(),
            Value::Int(3)
        );
        assert!(commit(&AttributeType::Int, &json!(3.5)).is_err());
        assert!(commit(&AttributeType::Int, &json!("3")).is_err());
        assert!(commit(&AttributeType::String, &json!(3)).is_err());

        let ids = commit(&types::id_table(), &json!([{"id": 4.0}, {"id": 7}])).unwrap();
        assert_eq!(
            ids,
            Value::List(vec![
                Value::Map(HashMap::from([("id".to_string(), Value::Int(4))])),
                Value::Map(HashMap::from([("id".to_string(), Value::Int(7))])),
            ])
        );
    }

    #[test]
    fn build_object_includes_only_set_fields() {
        let mut attrs = Attributes::new();
        attrs.insert("policyid".to_string(), Value::Int(3));
        attrs.insert("proxy".to_string(), Value::from("explicit-web"));
        attrs.insert("dstintf".to_string(), table(vec![name_record("port1")]));
        attrs.insert("schedule".to_string(), Value::from("always"));
        attrs.insert("srcintf".to_string(), Value::List(vec![]));
        attrs.insert("uuid".to_string(), Value::from(""));
        attrs.insert("vdomparam".to_string(), Value::from("root"));

        let obj = build_object(&policy_schema(), &attrs, ObjectMode::Write).unwrap();
        assert_eq!(
            JsonValue::Object(obj),
            json!({
                "policyid": 3,
                "proxy": "explicit-web",
                "dstintf": [{"name": "port1"}],
                "schedule": "always",
            })
        );
    }

    #[test]
    fn build_object_keeps_zero_for_exists_presence() {
        let mut attrs = Attributes::new();
        attrs.insert("session_ttl".to_string(), Value::Int(0));
        let obj = build_object(&policy_schema(), &attrs, ObjectMode::Write).unwrap();
        assert_eq!(obj.get("session-ttl"), Some(&json!(0)));
    }

    #[test]
    fn build_object_clear_nulls_every_settable_field() {
        let schema = policy_schema();
        let mut attrs = Attributes::new();
        attrs.insert("proxy".to_string(), Value::from("explicit-web"));

        let obj = build_object(&schema, &attrs, ObjectMode::Clear).unwrap();
        let settable = schema.attributes.iter().filter(|a| a.is_settable()).count();
        assert_eq!(settable, 8);
        assert_eq!(obj.len(), settable);
        assert!(obj.values().all(JsonValue::is_null));
        assert!(!obj.contains_key("vdomparam"));
    }

    fn wire_policy() -> WireObject {
        json!({
            "policyid": 3.0,
            "proxy": "explicit-web",
            "srcintf": [{"name": "port9"}],
            "dstintf": [{"name": "port1"}],
            "schedule": "always",
            "uuid": "2b1c0c4e-0000-0000-0000-000000000000",
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn refresh_skips_undeclared_tables() {
        let compat = CompatTable::new();
        let mut attrs = Attributes::new();
        attrs.insert("dstintf".to_string(), table(vec![name_record("old")]));
        attrs.insert("vdomparam".to_string(), Value::from("root"));

        refresh(
            &policy_schema(),
            &wire_policy(),
            &mut attrs,
            &RefreshContext::new(ReadMode::Refresh, &compat),
        )
        .unwrap();

        assert_eq!(attrs.get("policyid"), Some(&Value::Int(3)));
        assert_eq!(attrs.get("dstintf"), Some(&table(vec![name_record("port1")])));
        assert!(!attrs.contains_key("srcintf"));
        assert_eq!(attrs.get("vdomparam"), Some(&Value::from("root")));
    }

    #[test]
    fn refresh_import_commits_all_tables() {
        let compat = CompatTable::new();
        let mut attrs = Attributes::new();

        refresh(
            &policy_schema(),
            &wire_policy(),
            &mut attrs,
            &RefreshContext::new(ReadMode::Import, &compat),
        )
        .unwrap();

        assert_eq!(attrs.get("srcintf"), Some(&table(vec![name_record("port9")])));
        assert_eq!(attrs.get("dstintf"), Some(&table(vec![name_record("port1")])));
        assert!(!attrs.contains_key("internet_service_id"));
    }

    #[test]
    fn refresh_removes_fields_missing_on_wire() {
        let compat = CompatTable::new();
        let mut attrs = Attributes::new();
        attrs.insert("session_ttl".to_string(), Value::Int(600));

        refresh(
            &policy_schema(),
            &wire_policy(),
            &mut attrs,
            &RefreshContext::new(ReadMode::Refresh, &compat),
        )
        .unwrap();

        assert!(!attrs.contains_key("session_ttl"));
    }

    #[test]
    fn refresh_commit_failure_is_fatal_without_rule() {
        let compat = CompatTable::new();
        let mut wire = wire_policy();
        wire.insert("session-ttl".to_string(), json!("0"));

        let err = refresh(
            &policy_schema(),
            &wire,
            &mut Attributes::new(),
            &RefreshContext::new(ReadMode::Refresh, &compat),
        )
        .unwrap_err();

        assert!(matches!(&err, MapperError::Commit { field, .. } if field == "session_ttl"));
        assert!(err.to_string().starts_with("Error reading session_ttl"));
    }

    #[test]
    fn refresh_commit_failure_tolerated_by_rule() {
        let compat = CompatTable::new().rule(
            CompatRule::new("session-ttl", JsonKind::String).until(FirmwareVersion::new(6, 2, 0)),
        );
        let mut wire = wire_policy();
        wire.insert("session-ttl".to_string(), json!("0"));
        let mut attrs = Attributes::new();

        let ctx = RefreshContext::new(ReadMode::Refresh, &compat)
            .with_firmware(Some(FirmwareVersion::new(6, 0, 0)));
        refresh(&policy_schema(), &wire, &mut attrs, &ctx).unwrap();
        assert!(!attrs.contains_key("session_ttl"));
        assert_eq!(attrs.get("proxy"), Some(&Value::from("explicit-web")));

        let ctx = ctx.with_firmware(Some(FirmwareVersion::new(7, 0, 0)));
        assert!(refresh(&policy_schema(), &wire, &mut attrs, &ctx).is_err());
    }
}
