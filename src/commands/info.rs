use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let info = doc.get_info();

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = &info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("Author: {}", author);
    }
    if let Some(subject) = &info.subject {
        println!("Subject: {}", subject);
    }
    if let Some(keywords) = &info.keywords {
        println!("Keywords: {}", keywords);
    }
    if let Some(creator) = &info.creator {
        println!("Creator: {}", creator);
    }
    if let Some(producer) = &info.producer {
        println!("Producer: {}", producer);
    }
    if let Some(creation_date) = &info.creation_date {
        println!("Created: {}", format_pdf_date(creation_date));
    }
    if let Some(mod_date) = &info.mod_date {
        println!("Modified: {}", format_pdf_date(mod_date));
    }

    Ok(())
}

/// Turn "D:YYYYMMDDHHmmSS..." into "YYYY-MM-DD HH:mm:SS"; anything else is returned as-is.
pub fn format_pdf_date(date: &str) -> String {
    let Some(d) = date.strip_prefix("D:") else {
        return date.to_string();
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    // Byte ranges are only sliced once they are known to be ASCII digits
    let Some(day) = d.get(..8).filter(|s| all_digits(*s)) else {
        return date.to_string();
    };

    let mut out = format!("{}-{}-{}", &day[0..4], &day[4..6], &day[6..8]);
    if let Some(time) = d.get(8..14).filter(|s| all_digits(*s)) {
        out.push_str(&format!(" {}:{}:{}", &time[0..2], &time[2..4], &time[4..6]));
    }
    out
}
