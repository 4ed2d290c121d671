//! Enumeration of the interactive-form field tree

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::errors::FormError;
use crate::objects::{decode_text, dict_get, dict_get_dict, name_text, partial_name, render_value, resolve};
use crate::preflight::load_document;

/// Message reported alongside an empty field listing
pub const NO_FIELDS_MESSAGE: &str = "No fillable form fields found in this PDF.";

/// One entry of a choice field's `/Opt` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceOption {
    Plain(String),
    /// `[export value, display text]`
    Pair(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub current_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
}

/// JSON document printed by the field lister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldListing {
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldListing {
    pub fn new(fields: Vec<FormField>) -> Self {
        let message = fields.is_empty().then(|| NO_FIELDS_MESSAGE.to_string());
        FieldListing { fields, message }
    }
}

/// List every named field of the PDF at `path`.
pub fn list_fields(path: &Path) -> Result<Vec<FormField>, FormError> {
    let doc = load_document(path)?;
    collect_fields(&doc)
}

/// The catalog's `/AcroForm` dictionary, if the document has one.
pub(crate) fn acroform(doc: &Document) -> Option<&Dictionary> {
    let root = dict_get(doc, &doc.trailer, b"Root")?.as_dict().ok()?;
    dict_get_dict(doc, root, b"AcroForm")
}

/// Walk `/AcroForm /Fields` and its `/Kids`, producing one record per named node.
///
/// Kids without `/T` are widget annotations of their parent and are not
/// fields. The first node wins when a fully-qualified name repeats.
pub(crate) fn collect_fields(doc: &Document) -> Result<Vec<FormField>, FormError> {
    let Some(form) = acroform(doc) else {
        debug!("Document has no AcroForm dictionary");
        return Ok(Vec::new());
    };
    let Some(roots) = dict_get(doc, form, b"Fields").and_then(|f| f.as_array().ok()) else {
        debug!("AcroForm has no Fields array");
        return Ok(Vec::new());
    };

    let mut walker = FieldWalker {
        doc,
        visited: HashSet::new(),
        names: HashSet::new(),
        fields: Vec::new(),
    };
    for root in roots {
        walker.walk(root, None, None)?;
    }
    debug!("Collected {} form field(s)", walker.fields.len());
    Ok(walker.fields)
}

struct FieldWalker<'a> {
    doc: &'a Document,
    visited: HashSet<ObjectId>,
    names: HashSet<String>,
    fields: Vec<FormField>,
}

impl<'a> FieldWalker<'a> {
    fn walk(
        &mut self,
        node: &'a Object,
        parent_name: Option<&str>,
        inherited_type: Option<&str>,
    ) -> Result<(), FormError> {
        if let Object::Reference(id) = node {
            if !self.visited.insert(*id) {
                return Ok(());
            }
        }
        let dict = resolve(self.doc, node)?.as_dict()?;

        let own_type = match dict_get(self.doc, dict, b"FT") {
            Some(Object::Name(name)) => Some(format!("/{}", name_text(name))),
            _ => None,
        };
        let field_type = own_type.as_deref().or(inherited_type);

        let name = partial_name(self.doc, dict).map(|partial| match parent_name {
            Some(parent) => format!("{}.{}", parent, partial),
            None => partial,
        });

        if let Some(ref name) = name {
            if self.names.insert(name.clone()) {
                self.fields.push(FormField {
                    name: name.clone(),
                    field_type: field_type.unwrap_or("unknown").to_string(),
                    current_value: dict
                        .get(b"V")
                        .map(|v| render_value(self.doc, v))
                        .unwrap_or_default(),
                    options: self.options(dict),
                });
            }
        }

        if let Some(kids) = dict_get(self.doc, dict, b"Kids").and_then(|k| k.as_array().ok()) {
            let kid_parent = name.as_deref().or(parent_name);
            for kid in kids {
                self.walk(kid, kid_parent, field_type)?;
            }
        }
        Ok(())
    }

    fn options(&self, dict: &Dictionary) -> Option<Vec<ChoiceOption>> {
        let entries = dict_get(self.doc, dict, b"Opt")?.as_array().ok()?;
        let options = entries
            .iter()
            .filter_map(|entry| match resolve(self.doc, entry).ok()? {
                Object::Array(pair) if pair.len() == 2 => Some(ChoiceOption::Pair(
                    self.option_text(&pair[0]),
                    self.option_text(&pair[1]),
                )),
                other => Some(ChoiceOption::Plain(self.option_text(other))),
            })
            .collect();
        Some(options)
    }

    fn option_text(&self, obj: &Object) -> String {
        match resolve(self.doc, obj) {
            Ok(Object::String(bytes, _)) => decode_text(bytes),
            Ok(other) => render_value(self.doc, other),
            Err(_) => String::new(),
        }
    }
}
