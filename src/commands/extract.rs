use crate::cli::ConflictArgs;
use crate::page_range::parse_page_set;
use crate::pdf::extract::{extract_pages, ExtractOutcome};
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: &str,
    output: Q,
    conflict: &ConflictArgs,
) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let page_set = parse_page_set(pages, doc.page_count())
        .with_context(|| format!("Invalid page range: {:?}", pages))?;

    let mut policy = super::conflict_policy(conflict);
    match extract_pages(&doc, &page_set, output.as_ref(), policy.as_mut())? {
        ExtractOutcome::Written { path, page_count } => {
            println!(
                "Extracted {} page(s) ({}) to {}",
                page_count,
                page_set,
                path.display()
            );
        }
        ExtractOutcome::Skipped { path } => {
            println!("Skipped {}: file exists", path.display());
        }
        ExtractOutcome::Aborted { path } => {
            println!("Aborted: {} was not written", path.display());
        }
    }

    Ok(())
}
