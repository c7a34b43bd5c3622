use crate::cli::ConflictArgs;
use crate::pdf::split::{split_document, ChunkOutcome, OutputSpec};
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(
    input: P,
    pages_per_file: u32,
    output: Option<&Path>,
    conflict: &ConflictArgs,
) -> Result<()> {
    let input = input.as_ref();
    let doc = PdfDocument::open(input)?;
    let spec = OutputSpec::resolve(output, input);

    let mut policy = super::conflict_policy(conflict);
    let report = split_document(&doc, pages_per_file, &spec, policy.as_mut())?;

    for chunk in &report.chunks {
        let status = match chunk.outcome {
            ChunkOutcome::Written => "wrote",
            ChunkOutcome::Skipped => "skipped",
            ChunkOutcome::Aborted => "aborted",
        };
        println!("{:>8} {}", status, chunk.path.display());
    }

    if report.aborted() {
        println!("Aborted: remaining files were not written");
    }
    if report.any_written() {
        println!(
            "Split {} pages into {} file(s) in {}",
            doc.page_count(),
            report.written(),
            spec.dir.display()
        );
    } else {
        println!("No files written (all outputs skipped or aborted)");
    }

    Ok(())
}
