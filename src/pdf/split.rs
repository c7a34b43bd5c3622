use log::{debug, info, warn};
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::assemble::{assemble, save_atomic};
use super::PdfDocument;
use crate::conflict::{ConflictPolicy, Decision};
use crate::error::SplitError;
use crate::page_range::PageSet;

/// Where split outputs go: a directory and the file-name stem they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub dir: PathBuf,
    pub stem: String,
}

impl OutputSpec {
    /// Derive the output location from an optional base path and the source.
    ///
    /// Without a base, outputs sit next to the source and reuse its stem. A
    /// base without a directory part (`out.pdf`) also lands next to the source.
    pub fn resolve(base: Option<&Path>, source: &Path) -> Self {
        let source_dir = non_empty_parent(source).unwrap_or_else(|| PathBuf::from("."));
        let source_stem = file_stem(source).unwrap_or_else(|| "output".to_string());

        match base {
            None => OutputSpec {
                dir: source_dir,
                stem: source_stem,
            },
            Some(base) => OutputSpec {
                dir: non_empty_parent(base).unwrap_or(source_dir),
                stem: file_stem(base).unwrap_or(source_stem),
            },
        }
    }

    /// `<stem>_page_<N>.pdf` for one-page chunks, `<stem>_pages_<a>-<b>.pdf` otherwise.
    pub fn chunk_path(&self, chunk: &Chunk, chunk_size: u32) -> PathBuf {
        let name = if chunk_size == 1 {
            format!("{}_page_{}.pdf", self.stem, chunk.first_page())
        } else {
            format!(
                "{}_pages_{}-{}.pdf",
                self.stem,
                chunk.first_page(),
                chunk.last_page()
            )
        };
        self.dir.join(name)
    }
}

fn non_empty_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// A run of consecutive pages, as 0-based half-open indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub pages: Range<u32>,
}

impl Chunk {
    /// 1-based number of the first page.
    pub fn first_page(&self) -> u32 {
        self.pages.start + 1
    }

    /// 1-based number of the last page (inclusive).
    pub fn last_page(&self) -> u32 {
        self.pages.end
    }
}

/// Partition `page_count` pages into consecutive chunks of at most `chunk_size`.
pub fn chunk_plan(page_count: u32, chunk_size: u32) -> Vec<Chunk> {
    if chunk_size == 0 {
        return Vec::new();
    }
    (0..page_count.div_ceil(chunk_size))
        .map(|i| {
            let start = i * chunk_size;
            Chunk {
                pages: start..start.saturating_add(chunk_size).min(page_count),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    Written,
    Skipped,
    /// Not attempted because the batch was aborted.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    pub path: PathBuf,
    pub first_page: u32,
    pub last_page: u32,
    pub outcome: ChunkOutcome,
}

/// One entry per planned chunk, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub chunks: Vec<ChunkReport>,
}

impl SplitReport {
    pub fn count(&self, outcome: ChunkOutcome) -> usize {
        self.chunks.iter().filter(|c| c.outcome == outcome).count()
    }

    pub fn written(&self) -> usize {
        self.count(ChunkOutcome::Written)
    }

    /// False when every output was skipped or aborted; that is a valid result, not an error.
    pub fn any_written(&self) -> bool {
        self.written() > 0
    }

    pub fn aborted(&self) -> bool {
        self.count(ChunkOutcome::Aborted) > 0
    }
}

/// Split `doc` into files of `chunk_size` consecutive pages each.
///
/// Every existing output is put to `policy` on its own. A skip only affects
/// that file; an abort marks it and every later chunk as aborted and stops.
/// When a write fails, files already written stay on disk.
pub fn split_document(
    doc: &PdfDocument,
    chunk_size: u32,
    output: &OutputSpec,
    policy: &mut dyn ConflictPolicy,
) -> Result<SplitReport, SplitError> {
    if chunk_size == 0 {
        return Err(SplitError::ZeroChunkSize);
    }
    let page_count = doc.page_count();
    if page_count == 0 {
        return Err(SplitError::EmptyDocument);
    }

    std::fs::create_dir_all(&output.dir).map_err(|source| SplitError::OutputDir {
        path: output.dir.clone(),
        source,
    })?;

    let plan = chunk_plan(page_count, chunk_size);
    debug!(
        "splitting {} ({} pages) into {} file(s)",
        doc.path().display(),
        page_count,
        plan.len()
    );

    let mut report = SplitReport::default();
    let mut aborted = false;

    for chunk in &plan {
        let path = output.chunk_path(chunk, chunk_size);

        let outcome = if aborted {
            ChunkOutcome::Aborted
        } else if !path.exists() {
            ChunkOutcome::Written
        } else {
            match policy.decide(&path) {
                Decision::Overwrite => {
                    warn!("overwriting {}", path.display());
                    ChunkOutcome::Written
                }
                Decision::Skip => ChunkOutcome::Skipped,
                Decision::Abort => {
                    aborted = true;
                    ChunkOutcome::Aborted
                }
            }
        };

        if outcome == ChunkOutcome::Written {
            let pages: PageSet = chunk.pages.clone().collect();
            let mut new_doc = assemble(doc, &pages);
            save_atomic(&mut new_doc, &path).map_err(|source| SplitError::Write {
                path: path.clone(),
                written: report.written(),
                source,
            })?;
            info!("wrote {}", path.display());
        } else {
            info!("{:?}: {}", outcome, path.display());
        }

        report.chunks.push(ChunkReport {
            path,
            first_page: chunk.first_page(),
            last_page: chunk.last_page(),
            outcome,
        });
    }

    Ok(report)
}
