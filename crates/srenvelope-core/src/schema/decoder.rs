//! Avro datum decoder producing generic values.
//!
//! Union values keep their branch: a non-null branch decodes to a one-entry
//! object keyed by the branch type name (`{"string": "x"}`,
//! `{"com.acme.Point": {...}}`), a null branch decodes to `Null`. Branch names
//! come from walking the schema JSON next to the decoded datum.

use std::collections::HashMap;

use apache_avro::types::Value as AvroValue;
use apache_avro::{from_avro_datum, Schema};
use serde_json::Value as JsonValue;

use crate::envelope::text::{self, PAYLOAD_OFFSET};
use crate::error::{Result, SrEnvelopeError};
use crate::value::{Object, Value};

const PRIMITIVES: [&str; 8] = [
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

/// Compiled, reusable schema.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: Schema,
    tree: SchemaTree,
}

impl CompiledSchema {
    /// Parse Avro schema text.
    pub fn compile(schema_text: &str) -> Result<Self> {
        let schema = Schema::parse_str(schema_text)
            .map_err(|e| SrEnvelopeError::SchemaCompile(e.to_string()))?;
        let root: JsonValue = serde_json::from_str(schema_text)
            .map_err(|e| SrEnvelopeError::SchemaCompile(e.to_string()))?;
        Ok(Self {
            schema,
            tree: SchemaTree::new(root),
        })
    }

    /// Decode one datum of any shape.
    ///
    /// Bytes left after the datum are ignored.
    pub fn decode(&self, payload: &[u8]) -> Result<Value> {
        let mut reader = payload;
        let datum = from_avro_datum(&self.schema, &mut reader, None)
            .map_err(|e| SrEnvelopeError::PayloadDecode(e.to_string()))?;

        if !reader.is_empty() {
            tracing::debug!(
                trailing = reader.len(),
                consumed = payload.len() - reader.len(),
                "ignoring bytes after datum"
            );
        }

        tracing::trace!(payload_len = payload.len(), "payload decoded");
        self.tree.to_value(datum, &self.tree.root, "")
    }

    /// Decode one datum and require it to be a record.
    pub fn decode_record(&self, payload: &[u8]) -> Result<Object> {
        match self.decode(payload)? {
            Value::Object(o) => Ok(o),
            other => Err(SrEnvelopeError::UnexpectedShape(format!(
                "expected record, got {}",
                other.kind()
            ))),
        }
    }
}

/// Compile `schema_text` and decode `payload` into a record.
pub fn decode_payload(schema_text: &str, payload: &[u8]) -> Result<Object> {
    CompiledSchema::compile(schema_text)?.decode_record(payload)
}

/// Decode a quoted base64 message whose schema was resolved out-of-band.
///
/// The first [`PAYLOAD_OFFSET`] bytes (the prefix) are dropped before decoding.
pub fn decode(schema_text: &str, raw_message: &[u8]) -> Result<Object> {
    let schema = CompiledSchema::compile(schema_text)?;
    let text = std::str::from_utf8(raw_message)
        .map_err(|e| SrEnvelopeError::Base64(format!("message is not utf-8: {e}")))?;
    let payload = text::unwrap(text, PAYLOAD_OFFSET)?;
    schema.decode_record(&payload)
}

/// Schema JSON plus its named types (full name -> definition, enclosing namespace).
#[derive(Debug, Clone)]
struct SchemaTree {
    root: JsonValue,
    named: HashMap<String, (JsonValue, String)>,
}

impl SchemaTree {
    fn new(root: JsonValue) -> Self {
        let mut named = HashMap::new();
        collect_named(&root, "", &mut named);
        Self { root, named }
    }

    /// Follow named references and `{"type": ...}` wrappers to the defining node.
    fn resolve<'a>(&'a self, mut node: &'a JsonValue, ns: &str) -> (&'a JsonValue, String) {
        let mut ns = ns.to_string();
        loop {
            match node {
                JsonValue::String(s) if !PRIMITIVES.contains(&s.as_str()) => {
                    match self.lookup(s, &ns) {
                        Some((def, def_ns)) => {
                            node = def;
                            ns = def_ns.clone();
                        }
                        None => return (node, ns),
                    }
                }
                JsonValue::Object(obj) => match obj.get("type") {
                    Some(JsonValue::String(t)) if is_complex(t) => return (node, ns),
                    Some(inner) => node = inner,
                    None => return (node, ns),
                },
                _ => return (node, ns),
            }
        }
    }

    fn lookup(&self, name: &str, ns: &str) -> Option<&(JsonValue, String)> {
        self.named
            .get(&full_name(name, None, ns))
            .or_else(|| self.named.get(name))
    }

    /// Type name a union branch is reported under.
    fn branch_name(&self, branch: &JsonValue, ns: &str) -> String {
        match branch {
            JsonValue::String(s) if PRIMITIVES.contains(&s.as_str()) => s.clone(),
            JsonValue::String(s) => match self.named.get(&full_name(s, None, ns)) {
                Some(_) => full_name(s, None, ns),
                None => s.clone(),
            },
            JsonValue::Object(obj) => match obj.get("type") {
                Some(JsonValue::String(t)) if is_named(t) => declared_name(obj, ns),
                Some(JsonValue::String(t)) => match obj.get("logicalType").and_then(JsonValue::as_str) {
                    Some(logical) => format!("{t}.{logical}"),
                    None => t.clone(),
                },
                Some(inner) => self.branch_name(inner, ns),
                None => "unknown".into(),
            },
            _ => "unknown".into(),
        }
    }

    fn to_value(&self, datum: AvroValue, node: &JsonValue, ns: &str) -> Result<Value> {
        let (node, ns) = self.resolve(node, ns);
        let value = match datum {
            AvroValue::Null => Value::Null,
            AvroValue::Boolean(b) => Value::Boolean(b),
            AvroValue::Int(n) | AvroValue::Date(n) | AvroValue::TimeMillis(n) => {
                Value::Int(i64::from(n))
            }
            AvroValue::Long(n)
            | AvroValue::TimeMicros(n)
            | AvroValue::TimestampMillis(n)
            | AvroValue::TimestampMicros(n) => Value::Int(n),
            AvroValue::Float(f) => Value::Float(f64::from(f)),
            AvroValue::Double(f) => Value::Float(f),
            AvroValue::String(s) => Value::String(s),
            AvroValue::Bytes(b) | AvroValue::Fixed(_, b) => Value::Bytes(b),
            AvroValue::Enum(_, symbol) => Value::String(symbol),
            AvroValue::Union(_, inner) if matches!(*inner, AvroValue::Null) => Value::Null,
            AvroValue::Union(idx, inner) => {
                let branch = node
                    .as_array()
                    .and_then(|branches| branches.get(idx as usize))
                    .ok_or_else(|| mismatch("union branch", idx))?;
                let mut wrapped = Object::new();
                wrapped.insert(
                    self.branch_name(branch, &ns),
                    self.to_value(*inner, branch, &ns)?,
                );
                Value::Object(wrapped)
            }
            AvroValue::Array(items) => {
                let item = node.get("items").ok_or_else(|| mismatch("array items", 0))?;
                Value::Array(
                    items
                        .into_iter()
                        .map(|v| self.to_value(v, item, &ns))
                        .collect::<Result<_>>()?,
                )
            }
            AvroValue::Map(entries) => {
                let values = node.get("values").ok_or_else(|| mismatch("map values", 0))?;
                // Avro maps carry no order; sort keys so output is deterministic.
                let mut entries: Vec<_> = entries.into_iter().collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                Value::Object(
                    entries
                        .into_iter()
                        .map(|(k, v)| -> Result<(String, Value)> {
                            Ok((k, self.to_value(v, values, &ns)?))
                        })
                        .collect::<Result<_>>()?,
                )
            }
            AvroValue::Record(fields) => {
                let obj = node.as_object().ok_or_else(|| mismatch("record", 0))?;
                let record_ns = namespace_of(&declared_name(obj, &ns)).to_string();
                let defs = obj
                    .get("fields")
                    .and_then(JsonValue::as_array)
                    .ok_or_else(|| mismatch("record fields", 0))?;
                Value::Object(
                    fields
                        .into_iter()
                        .enumerate()
                        .map(|(i, (k, v))| -> Result<(String, Value)> {
                            let ty = defs
                                .get(i)
                                .and_then(|f| f.get("type"))
                                .ok_or_else(|| mismatch("record field", i as u32))?;
                            Ok((k, self.to_value(v, ty, &record_ns)?))
                        })
                        .collect::<Result<_>>()?,
                )
            }
            other => serde_json::Value::try_from(other)
                .map(Value::from)
                .map_err(|e| SrEnvelopeError::PayloadDecode(e.to_string()))?,
        };
        Ok(value)
    }
}

fn collect_named(node: &JsonValue, ns: &str, out: &mut HashMap<String, (JsonValue, String)>) {
    match node {
        JsonValue::Array(branches) => {
            for b in branches {
                collect_named(b, ns, out);
            }
        }
        JsonValue::Object(obj) => match obj.get("type") {
            Some(JsonValue::String(t)) if is_named(t) => {
                let full = declared_name(obj, ns);
                if let Some(fields) = obj.get("fields").and_then(JsonValue::as_array) {
                    let record_ns = namespace_of(&full);
                    for f in fields {
                        if let Some(ty) = f.get("type") {
                            collect_named(ty, record_ns, out);
                        }
                    }
                }
                out.insert(full, (node.clone(), ns.to_string()));
            }
            Some(JsonValue::String(t)) if t == "array" => {
                if let Some(items) = obj.get("items") {
                    collect_named(items, ns, out);
                }
            }
            Some(JsonValue::String(t)) if t == "map" => {
                if let Some(values) = obj.get("values") {
                    collect_named(values, ns, out);
                }
            }
            Some(JsonValue::String(_)) | None => {}
            Some(inner) => collect_named(inner, ns, out),
        },
        _ => {}
    }
}

fn is_named(t: &str) -> bool {
    matches!(t, "record" | "error" | "enum" | "fixed")
}

fn is_complex(t: &str) -> bool {
    is_named(t) || matches!(t, "array" | "map")
}

/// Full name of a named type definition.
fn declared_name(obj: &serde_json::Map<String, JsonValue>, ns: &str) -> String {
    let name = obj.get("name").and_then(JsonValue::as_str).unwrap_or_default();
    let namespace = obj.get("namespace").and_then(JsonValue::as_str);
    full_name(name, namespace, ns)
}

fn full_name(name: &str, namespace: Option<&str>, enclosing: &str) -> String {
    if name.contains('.') {
        return name.to_string();
    }
    match namespace.unwrap_or(enclosing) {
        "" => name.to_string(),
        ns => format!("{ns}.{name}"),
    }
}

fn namespace_of(full: &str) -> &str {
    full.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
}

fn mismatch(what: &str, at: u32) -> SrEnvelopeError {
    SrEnvelopeError::PayloadDecode(format!("decoded value does not match schema ({what} {at})"))
}
