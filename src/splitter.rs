use serde::Serialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

use crate::chunks::{Chunk, ChunkPlan};
use crate::error::SplitError;
use crate::names::{output_file_name, NameSource};
use crate::pdf::PdfDocument;

/// Receives the completion percentage after each chunk is written.
pub trait ProgressSink {
    fn report(&self, percent: f64);
}

impl<F: Fn(f64)> ProgressSink for F {
    fn report(&self, percent: f64) {
        self(percent)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// Refuse to run when two chunks resolve to the same filename
    pub strict_names: bool,
}

/// One chunk paired with the name it will be written under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    #[serde(flatten)]
    pub chunk: Chunk,
    /// The cell value as read from the name source
    pub name: String,
    pub file_name: String,
}

/// Several chunks that resolve to one filename. The last one wins on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    pub file_name: String,
    pub chunks: Vec<usize>,
}

/// A validated run: every chunk has a name.
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub total_pages: u32,
    pub pages_per_file: u32,
    pub files: Vec<PlannedFile>,
    pub collisions: Vec<NameCollision>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source: String,
    pub total_pages: u32,
    pub pages_per_file: u32,
    pub files: Vec<WrittenFile>,
    pub collisions: Vec<NameCollision>,
}

#[derive(Debug)]
pub enum SplitOutcome {
    Completed(SplitReport),
    /// Stopped at a chunk boundary. `written` files remain on disk.
    Cancelled { written: usize, total: usize },
}

/// Validate the names against the document and pair every chunk with its
/// output filename. Nothing is written.
pub fn plan(
    document: &PdfDocument,
    names: &NameSource,
    pages_per_file: NonZeroU32,
) -> Result<SplitPlan, SplitError> {
    let names = names.validate()?;

    let chunks = ChunkPlan::new(document.page_count(), pages_per_file);
    if names.len() < chunks.file_count() {
        return Err(SplitError::InsufficientNames {
            available: names.len(),
            required: chunks.file_count(),
        });
    }

    let files: Vec<PlannedFile> = chunks
        .iter()
        .zip(names.iter())
        .map(|(chunk, name)| PlannedFile {
            chunk,
            name: name.to_string(),
            file_name: output_file_name(name),
        })
        .collect();

    let collisions = find_collisions(&files);

    Ok(SplitPlan {
        total_pages: chunks.total_pages(),
        pages_per_file: pages_per_file.get(),
        files,
        collisions,
    })
}

/// Write one PDF per chunk of `document` into `output_dir`.
///
/// Validation happens before the first write. `cancel` is checked before
/// each chunk; on cancellation or a failed write, files already written are
/// left in place.
pub fn split(
    document: &PdfDocument,
    names: &NameSource,
    pages_per_file: NonZeroU32,
    output_dir: &Path,
    options: SplitOptions,
    progress: &dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<SplitOutcome, SplitError> {
    let plan = plan(document, names, pages_per_file)?;

    for collision in &plan.collisions {
        if options.strict_names {
            return Err(SplitError::NameCollision {
                file_name: collision.file_name.clone(),
                first: collision.chunks[0],
                second: collision.chunks[1],
            });
        }
        warn!(
            file = %collision.file_name,
            chunks = ?collision.chunks,
            "several chunks share one filename; later chunks overwrite earlier ones"
        );
    }

    let total = plan.files.len();
    info!(
        source = %document.path,
        pages = plan.total_pages,
        pages_per_file = plan.pages_per_file,
        files = total,
        output_dir = %output_dir.display(),
        "starting split"
    );

    if total == 0 {
        progress.report(100.0);
    }

    let mut written = Vec::with_capacity(total);
    for planned in &plan.files {
        if cancel.load(Ordering::SeqCst) {
            info!(written = written.len(), total, "split cancelled by user");
            return Ok(SplitOutcome::Cancelled {
                written: written.len(),
                total,
            });
        }

        let chunk = planned.chunk;
        let path = output_dir.join(&planned.file_name);

        let mut new_doc = document.extract_range(chunk.pages());
        if let Err(e) = PdfDocument::save(&mut new_doc, &path) {
            error!(file = %planned.file_name, error = %e, "failed to write file");
            return Err(SplitError::WriteFailed {
                chunk_index: chunk.index,
                name: planned.file_name.clone(),
                source: e,
            });
        }
        info!(
            file = %planned.file_name,
            first_page = chunk.first_page,
            last_page = chunk.last_page,
            pages = chunk.page_count(),
            "file created"
        );

        written.push(WrittenFile { chunk, path });
        progress.report((chunk.index + 1) as f64 / total as f64 * 100.0);
    }

    info!(files = written.len(), "split completed");

    Ok(SplitOutcome::Completed(SplitReport {
        source: document.path.clone(),
        total_pages: plan.total_pages,
        pages_per_file: plan.pages_per_file,
        files: written,
        collisions: plan.collisions,
    }))
}

fn find_collisions(files: &[PlannedFile]) -> Vec<NameCollision> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for file in files {
        by_name
            .entry(file.file_name.as_str())
            .or_default()
            .push(file.chunk.index);
    }

    let mut collisions: Vec<NameCollision> = by_name
        .into_iter()
        .filter(|(_, chunks)| chunks.len() > 1)
        .map(|(file_name, chunks)| NameCollision {
            file_name: file_name.to_string(),
            chunks,
        })
        .collect();
    collisions.sort_by_key(|c| c.chunks[0]);
    collisions
}
