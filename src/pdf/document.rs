use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use std::io::Read;
use std::path::Path;

/// Attributes a page may pick up from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Self::unlock(doc, path_str, password)
    }

    /// Load from an already open reader; `name` is only used in messages.
    pub fn load_from<R: Read>(source: R, name: &str, password: Option<&str>) -> Result<Self> {
        let doc =
            Document::load_from(source).with_context(|| format!("Failed to read PDF: {}", name))?;
        Self::unlock(doc, name.to_string(), password)
    }

    fn unlock(mut doc: Document, path: String, password: Option<&str>) -> Result<Self> {
        if doc.is_encrypted() {
            if let Some(password) = password {
                doc.decrypt(password)
                    .with_context(|| format!("Failed to decrypt PDF: {}", path))?;
            }
        }
        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Extract specific pages to a new document
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let mut new_doc = self.doc.clone();
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{})", page, total);
            }
        }

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .filter(|(num, _)| !pages.contains(num))
            .map(|(num, _)| *num)
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }

    /// Copy inherited attributes onto every page so a page can be moved
    /// under a different page tree without losing them.
    pub fn inline_inherited_attributes(&mut self) -> Result<()> {
        for (_, page_id) in self.page_ids() {
            let mut inherited = Vec::new();
            {
                let page = self.doc.get_dictionary(page_id)?;
                let mut missing: Vec<&[u8]> =
                    INHERITABLE.iter().copied().filter(|k| !page.has(k)).collect();
                let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
                let mut depth = 0;

                // Malformed trees can loop; real ones are shallow.
                while let Some(parent_id) = parent {
                    if missing.is_empty() || depth > 64 {
                        break;
                    }
                    let node = self.doc.get_dictionary(parent_id)?;
                    missing.retain(|key| match node.get(key) {
                        Ok(value) => {
                            inherited.push((key.to_vec(), value.clone()));
                            false
                        }
                        Err(_) => true,
                    });
                    parent = node.get(b"Parent").and_then(Object::as_reference).ok();
                    depth += 1;
                }
            }

            if !inherited.is_empty() {
                let page = self.doc.get_dictionary_mut(page_id)?;
                for (key, value) in inherited {
                    page.set(key, value);
                }
            }
        }
        Ok(())
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{create_test_pdf, page_labels};

    #[test]
    fn test_open_and_count() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("three.pdf");
        std::fs::write(&path, create_test_pdf(3)).unwrap();

        let doc = PdfDocument::open(&path, None).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page_ids().len(), 3);
    }

    #[test]
    fn test_load_from_reader() {
        let bytes = create_test_pdf(2);
        let doc = PdfDocument::load_from(bytes.as_slice(), "memory", None).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.path, "memory");
    }

    #[test]
    fn test_open_missing_file() {
        let err = PdfDocument::open("/nonexistent/missing.pdf", None)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Failed to open PDF: /nonexistent/missing.pdf");
    }

    #[test]
    fn test_extract_single_page() {
        let doc = PdfDocument::load_from(create_test_pdf(4).as_slice(), "memory", None).unwrap();
        let extracted = doc.extract_pages(&[3]).unwrap();
        assert_eq!(extracted.get_pages().len(), 1);
        assert_eq!(page_labels(&extracted), vec!["Page 3"]);
    }

    #[test]
    fn test_extract_out_of_range() {
        let doc = PdfDocument::load_from(create_test_pdf(2).as_slice(), "memory", None).unwrap();
        assert!(doc.extract_pages(&[0]).is_err());
        assert!(doc.extract_pages(&[3]).is_err());
    }

    #[test]
    fn test_inline_inherited_media_box() {
        let mut doc =
            PdfDocument::load_from(create_test_pdf(2).as_slice(), "memory", None).unwrap();
        let (_, page_id) = doc.page_ids()[0];
        let root_pages = doc
            .doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Parent")
            .and_then(Object::as_reference)
            .unwrap();

        // Move the media box up to the page tree root
        let media_box = doc
            .doc
            .get_dictionary_mut(page_id)
            .unwrap()
            .remove(b"MediaBox")
            .unwrap();
        doc.doc
            .get_dictionary_mut(root_pages)
            .unwrap()
            .set("MediaBox", media_box.clone());

        doc.inline_inherited_attributes().unwrap();
        let page = doc.doc.get_dictionary(page_id).unwrap();
        assert_eq!(
            format!("{:?}", page.get(b"MediaBox").unwrap()),
            format!("{:?}", media_box)
        );
    }
}
