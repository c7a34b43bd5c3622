use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::conflict::Decision;
use crate::page_range::parse_page_set;
use crate::pdf::extract::{extract_pages, ExtractOutcome};
use crate::pdf::split::{split_document, ChunkOutcome, OutputSpec};
use crate::pdf::PdfDocument;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfPagesRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1,3-5')")]
    pub pages: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1,3-5')")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
    #[schemars(description = "Replace the output if it exists (default: false, existing files are skipped)")]
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages per output file (default: 1)")]
    #[serde(default = "default_pages_per_file")]
    pub pages_per_file: u32,
    #[schemars(description = "Base output path whose directory and stem name the parts (default: next to the source)")]
    #[serde(default)]
    pub output: Option<String>,
    #[schemars(description = "Replace outputs that exist (default: false, existing files are skipped)")]
    #[serde(default)]
    pub overwrite: bool,
}

fn default_pages_per_file() -> u32 {
    1
}

fn fixed_policy(overwrite: bool) -> Decision {
    if overwrite {
        Decision::Overwrite
    } else {
        Decision::Skip
    }
}

// Alternate formatting keeps the whole cause chain, e.g. the io error behind a failed write
fn error_text<E>(e: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("Error: {:#}", anyhow::Error::from(e))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(error_text)
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get PDF metadata including title, author, creator, producer, creation and modification dates, and page count")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let info = doc.get_info();
                to_json(&PdfInfoResult {
                    path,
                    page_count: info.page_count,
                    title: info.title,
                    author: info.author,
                    creator: info.creator,
                    producer: info.producer,
                    creation_date: info.creation_date,
                    mod_date: info.mod_date,
                    subject: info.subject,
                    keywords: info.keywords,
                })
            }
            Err(e) => error_text(e),
        }
    }

    #[tool(description = "Validate a page range expression against a PDF and return its canonical form and 1-based page list")]
    fn pdf_pages(&self, Parameters(req): Parameters<PdfPagesRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return error_text(e),
        };

        match parse_page_set(&req.pages, doc.page_count()) {
            Ok(pages) => to_json(&PagesResult {
                canonical: pages.to_string(),
                pages: pages.iter().map(|i| i + 1).collect(),
                page_count: doc.page_count(),
            }),
            Err(e) => error_text(e),
        }
    }

    #[tool(description = "Extract specific pages from a PDF and save them, in page order, to a new file")]
    fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return error_text(e),
        };
        let pages = match parse_page_set(&req.pages, doc.page_count()) {
            Ok(p) => p,
            Err(e) => return error_text(e),
        };

        let mut policy = fixed_policy(req.overwrite);
        let (status, page_count) =
            match extract_pages(&doc, &pages, Path::new(&req.output), &mut policy) {
                Ok(ExtractOutcome::Written { page_count, .. }) => ("written", page_count as u32),
                Ok(ExtractOutcome::Skipped { .. }) => ("skipped", 0),
                Ok(ExtractOutcome::Aborted { .. }) => ("aborted", 0),
                Err(e) => return error_text(e),
            };

        to_json(&ExtractResult {
            output_path: req.output,
            status: status.to_string(),
            pages: pages.to_string(),
            page_count,
        })
    }

    #[tool(description = "Split a PDF into files of N consecutive pages named <stem>_page_<N>.pdf or <stem>_pages_<a>-<b>.pdf")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let source = Path::new(&req.path);
        let doc = match PdfDocument::open(source) {
            Ok(d) => d,
            Err(e) => return error_text(e),
        };
        let spec = OutputSpec::resolve(req.output.as_deref().map(Path::new), source);

        let mut policy = fixed_policy(req.overwrite);
        match split_document(&doc, req.pages_per_file, &spec, &mut policy) {
            Ok(report) => to_json(&SplitResult {
                written: report.written() as u32,
                files: report
                    .chunks
                    .iter()
                    .map(|c| SplitFileResult {
                        path: c.path.display().to_string(),
                        first_page: c.first_page,
                        last_page: c.last_page,
                        status: match c.outcome {
                            ChunkOutcome::Written => "written",
                            ChunkOutcome::Skipped => "skipped",
                            ChunkOutcome::Aborted => "aborted",
                        }
                        .to_string(),
                    })
                    .collect(),
            }),
            Err(e) => error_text(e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PagesResult {
    pub canonical: String,
    pub pages: Vec<u32>,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractResult {
    pub output_path: String,
    pub status: String,
    pub pages: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitFileResult {
    pub path: String,
    pub first_page: u32,
    pub last_page: u32,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub written: u32,
    pub files: Vec<SplitFileResult>,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page selection tools. Use pdf_info for page count and metadata, pdf_pages to \
                 check a page range like '1,3-5', pdf_extract to save selected pages to a new PDF, \
                 and pdf_split to cut a PDF into files of N pages. Existing outputs are skipped \
                 unless overwrite is set."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{page_marks_at, sample_pdf, write_sample};

    #[test]
    fn test_pages_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 10);
        let out = PdfServer::new().pdf_pages(Parameters(PdfPagesRequest {
            path: path.display().to_string(),
            pages: "5,1,2,3".into(),
        }));
        let result: PagesResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.canonical, "1-3,5");
        assert_eq!(result.pages, vec![1, 2, 3, 5]);
        assert_eq!(result.page_count, 10);
    }

    #[test]
    fn test_pages_tool_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 3);
        let out = PdfServer::new().pdf_pages(Parameters(PdfPagesRequest {
            path: path.display().to_string(),
            pages: "1,3-5".into(),
        }));
        assert!(out.starts_with("Error: "), "{out}");
    }

    #[test]
    fn test_extract_tool_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 4);
        let output = dir.path().join("picked.pdf");
        let request = |overwrite| PdfExtractRequest {
            path: path.display().to_string(),
            pages: "4,2".into(),
            output: output.display().to_string(),
            overwrite,
        };
        let server = PdfServer::new();

        let first: ExtractResult =
            serde_json::from_str(&server.pdf_extract(Parameters(request(false)))).unwrap();
        assert_eq!(first.status, "written");
        assert_eq!(first.pages, "2,4");
        assert_eq!(page_marks_at(&output), vec![1, 3]);

        let second: ExtractResult =
            serde_json::from_str(&server.pdf_extract(Parameters(request(false)))).unwrap();
        assert_eq!(second.status, "skipped");

        let third: ExtractResult =
            serde_json::from_str(&server.pdf_extract(Parameters(request(true)))).unwrap();
        assert_eq!(third.status, "written");
    }

    #[test]
    fn test_extract_tool_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 2);
        let output = dir.path().join("missing").join("out.pdf");
        let out = PdfServer::new().pdf_extract(Parameters(PdfExtractRequest {
            path: path.display().to_string(),
            pages: "1".into(),
            output: output.display().to_string(),
            overwrite: false,
        }));
        assert!(out.starts_with("Error: failed to write PDF"), "{out}");
        assert!(out.contains("os error"), "{out}");
    }

    #[test]
    fn test_info_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dated.pdf");
        let mut raw = sample_pdf(2, true);
        let info_id = raw.trailer.get(b"Info").unwrap().as_reference().unwrap();
        raw.get_dictionary_mut(info_id).unwrap().set(
            "ModDate",
            lopdf::Object::string_literal("D:20240131235959Z"),
        );
        raw.save(&path).unwrap();

        let out = PdfServer::new().pdf_info(Parameters(PathRequest {
            path: path.display().to_string(),
        }));
        let result: PdfInfoResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.page_count, 2);
        assert_eq!(result.title.as_deref(), Some("Sample"));
        assert_eq!(result.mod_date.as_deref(), Some("D:20240131235959Z"));
        assert_eq!(result.creation_date, None);
    }

    #[test]
    fn test_split_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "doc.pdf", 5);
        let out = PdfServer::new().pdf_split(Parameters(PdfSplitRequest {
            path: path.display().to_string(),
            pages_per_file: 2,
            output: None,
            overwrite: false,
        }));
        let result: SplitResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.written, 3);
        assert!(result.files[2].path.ends_with("doc_pages_5-5.pdf"));
        assert_eq!(
            (result.files[2].first_page, result.files[2].last_page),
            (5, 5)
        );
    }
}
