//! In-memory AcroForm documents for tests

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::path::PathBuf;
use tempfile::TempDir;

pub(crate) struct FormBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_annots: Vec<Vec<Object>>,
    fields: Vec<Object>,
}

fn widget(name: Option<&str>) -> Dictionary {
    let mut dict = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![72.into(), 700.into(), 272.into(), 720.into()],
    };
    if let Some(name) = name {
        dict.set("T", Object::string_literal(name));
    }
    dict
}

impl FormBuilder {
    pub(crate) fn new(page_count: usize) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        FormBuilder {
            doc,
            pages_id,
            page_annots: vec![Vec::new(); page_count],
            fields: Vec::new(),
        }
    }

    fn add_field(&mut self, page: usize, dict: Dictionary) -> ObjectId {
        let id = self.doc.add_object(dict);
        self.page_annots[page].push(id.into());
        self.fields.push(id.into());
        id
    }

    /// Text field merged with its widget
    pub(crate) fn text_field(&mut self, page: usize, name: &str, value: Option<&str>) -> ObjectId {
        let mut dict = widget(Some(name));
        dict.set("FT", "Tx");
        if let Some(value) = value {
            dict.set("V", Object::string_literal(value));
        }
        self.add_field(page, dict)
    }

    /// Check box with an `on_state` / `Off` pair of normal appearances
    pub(crate) fn checkbox(&mut self, page: usize, name: &str, on_state: &str) -> ObjectId {
        let on = self.doc.add_object(lopdf::Stream::new(Dictionary::new(), Vec::new()));
        let off = self.doc.add_object(lopdf::Stream::new(Dictionary::new(), Vec::new()));
        let mut normal = Dictionary::new();
        normal.set(on_state, on);
        normal.set("Off", off);

        let mut dict = widget(Some(name));
        dict.set("FT", "Btn");
        dict.set("V", Object::Name(b"Off".to_vec()));
        dict.set("AS", Object::Name(b"Off".to_vec()));
        dict.set("AP", dictionary! { "N" => normal });
        self.add_field(page, dict)
    }

    pub(crate) fn choice_field(&mut self, page: usize, name: &str, options: Vec<Object>) -> ObjectId {
        let mut dict = widget(Some(name));
        dict.set("FT", "Ch");
        dict.set("Opt", options);
        self.add_field(page, dict)
    }

    /// Field whose only widget is a kid without `/T`
    pub(crate) fn split_field(&mut self, page: usize, name: &str) -> ObjectId {
        let field_id = self.doc.new_object_id();
        let mut kid = widget(None);
        kid.set("Parent", field_id);
        let kid_id = self.doc.add_object(kid);

        self.doc.objects.insert(
            field_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal(name),
                "FT" => "Tx",
                "Kids" => vec![Object::from(kid_id)],
            }),
        );
        self.page_annots[page].push(kid_id.into());
        self.fields.push(field_id.into());
        field_id
    }

    /// Non-terminal `parent` field with one terminal `child` widget
    pub(crate) fn hierarchical_field(&mut self, page: usize, parent: &str, child: &str) -> ObjectId {
        let parent_id = self.doc.new_object_id();
        let mut kid = widget(Some(child));
        kid.set("Parent", parent_id);
        let kid_id = self.doc.add_object(kid);

        self.doc.objects.insert(
            parent_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal(parent),
                "FT" => "Tx",
                "Kids" => vec![Object::from(kid_id)],
            }),
        );
        self.page_annots[page].push(kid_id.into());
        self.fields.push(parent_id.into());
        kid_id
    }

    /// Sticky note whose `/T` holds the author, not a field name
    pub(crate) fn note(&mut self, page: usize, author: &str) -> ObjectId {
        let id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "T" => Object::string_literal(author),
            "Contents" => Object::string_literal("Check the acreage"),
            "Rect" => vec![300.into(), 700.into(), 320.into(), 720.into()],
        });
        self.page_annots[page].push(id.into());
        id
    }

    /// Widget without `/T` whose `/Parent` points at a missing object
    pub(crate) fn orphan_widget(&mut self, page: usize) -> ObjectId {
        let mut dict = widget(None);
        dict.set("Parent", Object::Reference((9999, 0)));
        let id = self.doc.add_object(dict);
        self.page_annots[page].push(id.into());
        id
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.finish(true)
    }

    pub(crate) fn build_without_acroform(self) -> Vec<u8> {
        self.finish(false)
    }

    fn finish(mut self, with_acroform: bool) -> Vec<u8> {
        let mut kids = Vec::new();
        for annots in std::mem::take(&mut self.page_annots) {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            if !annots.is_empty() {
                page.set("Annots", annots);
            }
            kids.push(Object::from(self.doc.add_object(page)));
        }
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        if with_acroform {
            let form_id = self.doc.add_object(dictionary! {
                "Fields" => std::mem::take(&mut self.fields),
            });
            catalog.set("AcroForm", form_id);
        }
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }
}

pub(crate) fn write_pdf(dir: &TempDir, name: &str, bytes: Vec<u8>) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write test PDF");
    path
}
