use fa_logger as logger;
use fa_pdf::FieldListing;
use std::path::Path;

/// Print the form fields of `input` as JSON on stdout.
pub fn handle_list_fields(input: &Path) -> anyhow::Result<()> {
    logger::debug(&format!("Listing form fields of {}", input.display()));
    let listing = FieldListing::new(fa_pdf::list_fields(input)?);
    println!("{}", render_listing(&listing)?);
    Ok(())
}

/// An empty listing is a single line; a populated one is pretty-printed.
pub fn render_listing(listing: &FieldListing) -> serde_json::Result<String> {
    if listing.fields.is_empty() {
        serde_json::to_string(listing)
    } else {
        serde_json::to_string_pretty(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_pdf::FormField;

    #[test]
    fn test_empty_listing_is_compact_with_message() {
        let rendered = render_listing(&FieldListing::new(Vec::new())).expect("json");
        assert_eq!(
            rendered,
            r#"{"fields":[],"message":"No fillable form fields found in this PDF."}"#
        );
    }

    #[test]
    fn test_populated_listing_is_pretty() {
        let listing = FieldListing::new(vec![FormField {
            name: "farm_name".to_string(),
            field_type: "/Tx".to_string(),
            current_value: String::new(),
            options: None,
        }]);
        let rendered = render_listing(&listing).expect("json");
        assert!(rendered.starts_with("{\n  \"fields\": ["));
        assert!(rendered.contains("\"type\": \"/Tx\""));
        assert!(!rendered.contains("message"));
    }
}
