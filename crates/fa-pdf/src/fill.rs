//! Form filling
//!
//! Values are written in two passes over the widget annotations:
//!
//! 1. every page, matching widgets that carry their own `/T`;
//! 2. the first page again, also resolving `/T`-less widgets through their
//!    `/Parent`. This pass is best effort and its failures are discarded.
//!
//! Match statistics in the [`FillReport`] come from the original field
//! names, not from the writes. `fields_written` lists what was actually
//! written.

use lopdf::{Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::errors::FormError;
use crate::fields::collect_fields;
use crate::mapping::{FieldValue, FieldValueMapping};
use crate::objects::{
    dict_get, dict_get_dict, encode_text, inherited_field_type, partial_name, qualified_name,
    resolve,
};
use crate::preflight::load_document;

const BUTTON_FIELD: &str = "Btn";
const OFF_STATE: &[u8] = b"Off";
const WIDGET_SUBTYPE: &[u8] = b"Widget";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    pub output: String,
    pub total_form_fields: usize,
    pub fields_filled: usize,
    pub fields_not_found_in_pdf: Vec<String>,
    pub available_fields: Vec<String>,
    pub fields_written: Vec<String>,
}

impl FillReport {
    fn new(
        output: &Path,
        field_names: &BTreeSet<String>,
        mapping: &FieldValueMapping,
        written: BTreeSet<String>,
    ) -> Self {
        let (matched, not_found): (Vec<&str>, Vec<&str>) =
            mapping.keys().partition(|key| field_names.contains(*key));

        FillReport {
            output: output.display().to_string(),
            total_form_fields: field_names.len(),
            fields_filled: matched.len(),
            fields_not_found_in_pdf: not_found.into_iter().map(str::to_string).collect(),
            available_fields: field_names.iter().cloned().collect(),
            fields_written: written.into_iter().collect(),
        }
    }
}

/// Fill the form at `input` with `mapping` and write the result to `output`.
///
/// Unknown mapping keys are reported, never fatal. The output file is
/// created or truncated; failing to write it is an error.
pub fn fill_form(
    input: &Path,
    output: &Path,
    mapping: &FieldValueMapping,
) -> Result<FillReport, FormError> {
    let doc = load_document(input)?;
    let field_names: BTreeSet<String> = collect_fields(&doc)?
        .into_iter()
        .map(|field| field.name)
        .collect();

    let mut filler = FormFiller::new(doc, mapping);
    filler.fill_pages()?;

    // Best effort: catches widgets the page pass cannot see. Never fatal.
    if let Err(e) = filler.fill_first_page() {
        debug!("Fallback update of first page skipped: {}", e);
    }

    filler.save(output)?;
    Ok(FillReport::new(output, &field_names, mapping, filler.written))
}

struct FormFiller<'m> {
    doc: Document,
    mapping: &'m FieldValueMapping,
    written: BTreeSet<String>,
}

impl<'m> FormFiller<'m> {
    fn new(doc: Document, mapping: &'m FieldValueMapping) -> Self {
        FormFiller {
            doc,
            mapping,
            written: BTreeSet::new(),
        }
    }

    /// Mapping entry for a field, by fully-qualified name first, then by `/T`.
    fn lookup(
        &self,
        qualified: Option<&str>,
        partial: Option<&str>,
    ) -> Option<(&'m String, &'m FieldValue)> {
        let mapping = self.mapping;
        qualified
            .and_then(|name| mapping.get_key_value(name))
            .or_else(|| partial.and_then(|name| mapping.get_key_value(name)))
    }

    fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    /// Widget annotations of a page. Markup annotations also carry `/T`
    /// (their author) and must never be treated as fields.
    fn widget_ids(&self, page_id: ObjectId) -> Result<Vec<ObjectId>, FormError> {
        let page = self.doc.get_dictionary(page_id)?;
        let Ok(annots) = page.get(b"Annots") else {
            return Ok(Vec::new());
        };
        let annots = resolve(&self.doc, annots)?.as_array()?;
        Ok(annots
            .iter()
            .filter_map(|annot| annot.as_reference().ok())
            .filter(|&id| self.is_widget(id))
            .collect())
    }

    fn is_widget(&self, annot_id: ObjectId) -> bool {
        self.doc
            .get_dictionary(annot_id)
            .ok()
            .and_then(|annot| dict_get(&self.doc, annot, b"Subtype"))
            .is_some_and(|subtype| {
                matches!(subtype, Object::Name(name) if name.as_slice() == WIDGET_SUBTYPE)
            })
    }

    /// Page-scoped pass: each page's occurrence of a field is written on its own.
    fn fill_pages(&mut self) -> Result<(), FormError> {
        for (index, page_id) in self.page_ids().into_iter().enumerate() {
            for annot_id in self.widget_ids(page_id)? {
                let annot = self.doc.get_dictionary(annot_id)?;
                let Some(partial) = partial_name(&self.doc, annot) else {
                    continue;
                };
                let qualified = qualified_name(&self.doc, annot_id)?;
                if let Some((key, value)) = self.lookup(qualified.as_deref(), Some(partial.as_str())) {
                    debug!("Page {}: setting '{}'", index + 1, key);
                    self.write_field(annot_id, key, value)?;
                }
            }
        }
        Ok(())
    }

    /// Re-apply the whole mapping to the first page, resolving widgets
    /// without `/T` through their `/Parent`.
    fn fill_first_page(&mut self) -> Result<(), FormError> {
        let Some(first_page) = self.page_ids().first().copied() else {
            return Ok(());
        };
        for annot_id in self.widget_ids(first_page)? {
            let annot = self.doc.get_dictionary(annot_id)?;
            let field_id = if annot.has(b"T") {
                annot_id
            } else {
                match annot.get(b"Parent").and_then(Object::as_reference) {
                    Ok(parent_id) => parent_id,
                    Err(_) => continue,
                }
            };
            let field = self.doc.get_dictionary(field_id)?;
            let partial = partial_name(&self.doc, field);
            let qualified = qualified_name(&self.doc, field_id)?;
            if let Some((key, value)) = self.lookup(qualified.as_deref(), partial.as_deref()) {
                self.write_field(field_id, key, value)?;
            }
        }
        Ok(())
    }

    fn write_field(
        &mut self,
        field_id: ObjectId,
        key: &str,
        value: &FieldValue,
    ) -> Result<(), FormError> {
        let text = value.to_text();
        let is_button = inherited_field_type(&self.doc, field_id)?.as_deref() == Some(BUTTON_FIELD);

        if is_button {
            let state = text.trim_start_matches('/').as_bytes().to_vec();
            let widgets = self.widget_states(field_id, &state)?;
            self.doc
                .get_object_mut(field_id)?
                .as_dict_mut()?
                .set("V", Object::Name(state.clone()));
            for (widget_id, has_state) in widgets {
                let appearance = if has_state { state.clone() } else { OFF_STATE.to_vec() };
                self.doc
                    .get_object_mut(widget_id)?
                    .as_dict_mut()?
                    .set("AS", Object::Name(appearance));
            }
        } else {
            self.doc
                .get_object_mut(field_id)?
                .as_dict_mut()?
                .set("V", encode_text(&text));
        }

        self.written.insert(key.to_string());
        Ok(())
    }

    /// Widgets of a field (the field itself when merged, plus its kids) and
    /// whether each defines `state` among its normal appearances.
    fn widget_states(
        &self,
        field_id: ObjectId,
        state: &[u8],
    ) -> Result<Vec<(ObjectId, bool)>, FormError> {
        let field = self.doc.get_dictionary(field_id)?;
        let mut widgets = Vec::new();
        if field.has(b"Rect") {
            widgets.push(field_id);
        }
        if let Some(kids) = dict_get(&self.doc, field, b"Kids").and_then(|k| k.as_array().ok()) {
            widgets.extend(kids.iter().filter_map(|kid| kid.as_reference().ok()));
        }

        widgets
            .into_iter()
            .map(|widget_id| -> Result<(ObjectId, bool), FormError> {
                let widget = self.doc.get_dictionary(widget_id)?;
                let has_state = dict_get_dict(&self.doc, widget, b"AP")
                    .and_then(|ap| dict_get_dict(&self.doc, ap, b"N"))
                    .is_some_and(|normal| normal.has(state));
                Ok((widget_id, has_state))
            })
            .collect()
    }

    /// Ask viewers to regenerate appearance streams for the new values.
    fn mark_need_appearances(&mut self) -> Result<(), FormError> {
        let catalog_id = self.doc.trailer.get(b"Root")?.as_reference()?;
        let acroform = self
            .doc
            .get_dictionary(catalog_id)?
            .get(b"AcroForm")
            .ok()
            .map(Object::as_reference);

        match acroform {
            Some(Ok(form_id)) => {
                self.doc
                    .get_object_mut(form_id)?
                    .as_dict_mut()?
                    .set("NeedAppearances", true);
            }
            Some(Err(_)) => {
                self.doc
                    .get_object_mut(catalog_id)?
                    .as_dict_mut()?
                    .get_mut(b"AcroForm")?
                    .as_dict_mut()?
                    .set("NeedAppearances", true);
            }
            None => {}
        }
        Ok(())
    }

    fn save(&mut self, output: &Path) -> Result<(), FormError> {
        if !self.written.is_empty() {
            self.mark_need_appearances()?;
        }
        let mut writer = BufWriter::new(File::create(output)?);
        self.doc.save_to(&mut writer)?;
        writer.flush()?;
        debug!("Wrote {}", output.display());
        Ok(())
    }
}
