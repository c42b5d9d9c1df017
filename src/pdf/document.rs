use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::ops::RangeInclusive;
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(Self::from_document(doc, path_str))
    }

    pub fn from_document(doc: Document, path: impl Into<String>) -> Self {
        PdfDocument {
            doc,
            path: path.into(),
        }
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

    /// Copy a contiguous page range (1-based, inclusive) into a new document.
    ///
    /// Every other page is deleted from a clone of the source and the objects
    /// only they referenced are pruned. Page content streams are carried over
    /// untouched.
    pub fn extract_range(&self, pages: RangeInclusive<u32>) -> Document {
        let mut new_doc = self.doc.clone();

        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|num| !pages.contains(num))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        new_doc
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> lopdf::Result<()> {
        doc.save(path)?;
        Ok(())
    }
}
