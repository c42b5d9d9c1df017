pub mod plan;
pub mod split;

use anyhow::Result;

use crate::cli::InputArgs;
use crate::names::NameSource;
use crate::pdf::PdfDocument;

/// How a command ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

pub fn load_inputs(input: &InputArgs) -> Result<(PdfDocument, NameSource)> {
    let names = NameSource::load(&input.names, input.sheet.as_deref(), !input.no_header)?;
    let doc = PdfDocument::open(&input.path)?;
    Ok((doc, names))
}
