use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Concatenate the pages of `inputs`, in order, into one document.
///
/// The same file may appear more than once; each occurrence contributes
/// its own copy of the pages.
pub fn merge_files<P: AsRef<Path>>(inputs: &[P], password: Option<&str>) -> Result<Document> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let mut merged = Document::with_version("1.5");
    let mut kids = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let mut source = PdfDocument::open(input, password)?;
        if source.page_count() == 0 {
            anyhow::bail!("PDF has no pages: {}", input.display());
        }

        source
            .inline_inherited_attributes()
            .with_context(|| format!("Malformed page tree: {}", source.path))?;

        // Shift every object id past what we already hold
        source.doc.renumber_objects_with(merged.max_id + 1);
        kids.extend(source.page_ids().into_iter().map(|(_, id)| id));
        merged.max_id = merged.max_id.max(source.doc.max_id);
        merged.objects.extend(source.doc.objects);
    }

    let pages_id = merged.new_object_id();
    for &kid in &kids {
        merged
            .get_dictionary_mut(kid)
            .context("Page object missing after merge")?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        (
            "Kids",
            Object::Array(kids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    merged.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = merged.add_object(catalog);
    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Drops the source catalogs and page trees
    merged.prune_objects();

    Ok(merged)
}
