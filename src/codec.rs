// 🧬 Canonical Codec - the bytes every replica must agree on
//
// Endorsing nodes compare write sets byte-for-byte, so an entity must encode
// to exactly one byte string. The format is compact JSON with keys sorted by
// byte order and no whitespace. Each entity maps its fields by hand through
// FieldWriter / FieldReader; nothing here depends on struct layout or derive
// order.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{CodecError, CodecResult};
use crate::keys::EntityKind;

// ============================================================================
// RECORD CONTRACT
// ============================================================================

/// An entity kind that can be stored on the ledger.
pub trait Record: Sized {
    /// Kind this record belongs to (prefix + error labels)
    const KIND: EntityKind;

    /// Everything except the identifier, as supplied to create
    type Fields;

    /// Build the record under its namespaced ledger key
    fn from_fields(id: String, fields: Self::Fields) -> Self;

    /// Namespaced ledger key stored in the record itself
    fn id(&self) -> &str;

    /// Emit every field. Order of calls does not matter.
    fn write_fields<'a>(&'a self, out: &mut FieldWriter<'a>);

    /// Take every field. Fields left unread make decoding fail.
    fn read_fields(input: &mut FieldReader) -> CodecResult<Self>;
}

// ============================================================================
// WRITER
// ============================================================================

enum FieldValue<'a> {
    Str(&'a str),
    UInt(u64),
}

/// Collects wire fields and renders them in canonical order.
pub struct FieldWriter<'a> {
    fields: BTreeMap<&'static str, FieldValue<'a>>,
}

impl<'a> FieldWriter<'a> {
    fn new() -> Self {
        FieldWriter {
            fields: BTreeMap::new(),
        }
    }

    pub fn string(&mut self, name: &'static str, value: &'a str) {
        let previous = self.fields.insert(name, FieldValue::Str(value));
        debug_assert!(previous.is_none(), "field {name} written twice");
    }

    pub fn uint(&mut self, name: &'static str, value: u64) {
        let previous = self.fields.insert(name, FieldValue::UInt(value));
        debug_assert!(previous.is_none(), "field {name} written twice");
    }

    fn render(&self, out: &mut String) {
        out.push('{');
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_json_string(out, name);
            out.push(':');
            match value {
                FieldValue::Str(s) => push_json_string(out, s),
                FieldValue::UInt(n) => out.push_str(&n.to_string()),
            }
        }
        out.push('}');
    }
}

fn push_json_string(out: &mut String, s: &str) {
    // serde_json's escaping is fixed: same input, same output on every node
    out.push_str(&Value::from(s).to_string());
}

// ============================================================================
// READER
// ============================================================================

/// Hands out the fields of a decoded JSON object, one by one.
pub struct FieldReader {
    kind: EntityKind,
    fields: Map<String, Value>,
}

impl FieldReader {
    fn parse(kind: EntityKind, bytes: &[u8]) -> CodecResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|source| CodecError::Malformed { kind, source })?;

        match value {
            Value::Object(fields) => Ok(FieldReader { kind, fields }),
            _ => Err(CodecError::NotAnObject { kind }),
        }
    }

    pub fn string(&mut self, name: &'static str) -> CodecResult<String> {
        match self.fields.remove(name) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(CodecError::InvalidField {
                kind: self.kind,
                field: name,
                expected: "a string",
            }),
            None => Err(self.missing(name)),
        }
    }

    pub fn uint(&mut self, name: &'static str) -> CodecResult<u64> {
        match self.fields.remove(name) {
            Some(value) => value.as_u64().ok_or(CodecError::InvalidField {
                kind: self.kind,
                field: name,
                expected: "a non-negative integer",
            }),
            None => Err(self.missing(name)),
        }
    }

    fn missing(&self, name: &'static str) -> CodecError {
        CodecError::MissingField {
            kind: self.kind,
            field: name,
        }
    }

    fn finish(self) -> CodecResult<()> {
        match self.fields.into_iter().next() {
            Some((field, _)) => Err(CodecError::UnknownField {
                kind: self.kind,
                field,
            }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Canonical bytes of a record
pub fn encode<R: Record>(record: &R) -> Vec<u8> {
    let mut out = String::new();
    render(record, &mut out);
    out.into_bytes()
}

/// Decode bytes stored for kind `R`
pub fn decode<R: Record>(bytes: &[u8]) -> CodecResult<R> {
    let mut reader = FieldReader::parse(R::KIND, bytes)?;
    let record = R::read_fields(&mut reader)?;
    reader.finish()?;
    Ok(record)
}

/// JSON array of canonical records, in the given order
pub fn encode_list<R: Record>(records: &[R]) -> Vec<u8> {
    let mut out = String::from("[");
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        render(record, &mut out);
    }
    out.push(']');
    out.into_bytes()
}

/// Lowercase hex SHA-256 of arbitrary bytes
pub fn digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn render<R: Record>(record: &R, out: &mut String) {
    let mut writer = FieldWriter::new();
    record.write_fields(&mut writer);
    writer.render(out);
}

// ============================================================================
// TESTS
// ============================================================================
