use crate::page_range::parse_page_set;
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, pages: &str) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let page_set = parse_page_set(pages, doc.page_count())
        .with_context(|| format!("Invalid page range: {:?}", pages))?;

    println!("{}", page_set);
    println!(
        "{} of {} page(s) selected",
        page_set.len(),
        doc.page_count()
    );

    Ok(())
}
