//! Small helpers over the lopdf object model

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::HashSet;

use crate::errors::FormError;

/// Follow one level of indirection.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, FormError> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Look up `key` in `dict` and resolve it; absent or dangling entries are `None`.
pub(crate) fn dict_get<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let obj = dict.get(key).ok()?;
    resolve(doc, obj).ok()
}

pub(crate) fn dict_get_dict<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    dict_get(doc, dict, key)?.as_dict().ok()
}

/// Decode a PDF text string: UTF-16BE when it carries a BOM, otherwise UTF-8
/// with a Latin-1 fallback for PDFDocEncoding bytes.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode `text` as a PDF text string, UTF-16BE with BOM when it is not ASCII.
pub(crate) fn encode_text(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

pub(crate) fn name_text(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Text of a string or name entry (names without their slash).
pub(crate) fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict_get(doc, dict, key)? {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(name_text(name)),
        _ => None,
    }
}

/// Partial field name (`/T`).
pub(crate) fn partial_name(doc: &Document, dict: &Dictionary) -> Option<String> {
    text_entry(doc, dict, b"T")
}

/// Render a field value the way it is reported to callers: names keep their
/// leading slash, strings are decoded, arrays are comma-joined.
pub(crate) fn render_value(doc: &Document, obj: &Object) -> String {
    let Ok(obj) = resolve(doc, obj) else {
        return String::new();
    };
    match obj {
        Object::String(bytes, _) => decode_text(bytes),
        Object::Name(name) => format!("/{}", name_text(name)),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Array(items) => items
            .iter()
            .map(|item| render_value(doc, item))
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Walk a node and its `/Parent` chain, nearest first.
pub(crate) fn ancestry(doc: &Document, id: ObjectId) -> Result<Vec<&Dictionary>, FormError> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(id);
    while let Some(node_id) = current {
        if !visited.insert(node_id) {
            break;
        }
        let dict = doc.get_dictionary(node_id)?;
        chain.push(dict);
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    Ok(chain)
}

/// Fully-qualified field name (`parent.child`) built from the `/T` entries
/// along the `/Parent` chain.
pub(crate) fn qualified_name(doc: &Document, id: ObjectId) -> Result<Option<String>, FormError> {
    let mut parts: Vec<String> = ancestry(doc, id)?
        .into_iter()
        .filter_map(|dict| partial_name(doc, dict))
        .collect();
    if parts.is_empty() {
        return Ok(None);
    }
    parts.reverse();
    Ok(Some(parts.join(".")))
}

/// Field type (`/FT`) of a node, inherited from the nearest ancestor that has one.
pub(crate) fn inherited_field_type(doc: &Document, id: ObjectId) -> Result<Option<String>, FormError> {
    Ok(ancestry(doc, id)?.into_iter().find_map(|dict| match dict_get(doc, dict, b"FT") {
        Some(Object::Name(name)) => Some(name_text(name)),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_handles_utf16_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9];
        assert_eq!(decode_text(&bytes), "Hé");
    }

    #[test]
    fn test_decode_text_falls_back_to_latin1() {
        assert_eq!(decode_text(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn test_encode_text_round_trips_non_ascii() {
        let Object::String(bytes, StringFormat::Hexadecimal) = encode_text("Mähdrescher") else {
            panic!("expected hex string");
        };
        assert_eq!(decode_text(&bytes), "Mähdrescher");
    }

    #[test]
    fn test_encode_text_keeps_ascii_literal() {
        let Object::String(bytes, StringFormat::Literal) = encode_text("Jane") else {
            panic!("expected literal string");
        };
        assert_eq!(bytes, b"Jane");
    }
}
