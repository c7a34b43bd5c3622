use log::{info, warn};
use std::path::{Path, PathBuf};

use super::assemble::{assemble, save_atomic};
use super::PdfDocument;
use crate::conflict::{ConflictPolicy, Decision};
use crate::error::ExtractError;
use crate::page_range::PageSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Written { path: PathBuf, page_count: usize },
    /// The output existed and the policy chose to leave it alone.
    Skipped { path: PathBuf },
    Aborted { path: PathBuf },
}

/// Write the pages in `pages` to `output` as a single PDF.
///
/// Pages are emitted in ascending order and the source metadata is copied.
/// If `output` exists, `policy` decides whether it is replaced; nothing is
/// assembled or written unless the answer is to overwrite.
pub fn extract_pages(
    doc: &PdfDocument,
    pages: &PageSet,
    output: &Path,
    policy: &mut dyn ConflictPolicy,
) -> Result<ExtractOutcome, ExtractError> {
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }
    let page_count = doc.page_count();
    if let Some(index) = pages.iter().find(|&index| doc.page_at(index).is_none()) {
        return Err(ExtractError::IndexOutOfBounds { index, page_count });
    }

    if output.exists() {
        match policy.decide(output) {
            Decision::Overwrite => warn!("overwriting {}", output.display()),
            Decision::Skip => {
                info!("skipped existing {}", output.display());
                return Ok(ExtractOutcome::Skipped {
                    path: output.to_path_buf(),
                });
            }
            Decision::Abort => {
                return Ok(ExtractOutcome::Aborted {
                    path: output.to_path_buf(),
                })
            }
        }
    }

    let mut new_doc = assemble(doc, pages);
    save_atomic(&mut new_doc, output).map_err(|source| ExtractError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("wrote {} page(s) to {}", pages.len(), output.display());

    Ok(ExtractOutcome::Written {
        path: output.to_path_buf(),
        page_count: pages.len(),
    })
}
