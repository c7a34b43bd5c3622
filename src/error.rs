use std::path::PathBuf;

/// A page-range expression that cannot be turned into a page set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageRangeError {
    #[error("malformed page token: {token:?}")]
    Malformed { token: String },

    #[error("page {page} is out of range (1-{page_count})")]
    OutOfRange { page: u64, page_count: u32 },

    #[error("range {token}: start {start} exceeds end {end}")]
    InvertedRange { token: String, start: u64, end: u64 },

    #[error("range {token} is out of range (1-{page_count})")]
    RangeOutOfBounds { token: String, page_count: u32 },
}

/// The source document cannot be used for assembly.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("encrypted PDFs are not supported: {}", path.display())]
    Encrypted { path: PathBuf },

    #[error("failed to open PDF: {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no pages selected")]
    NoPages,

    #[error("page index {index} is out of bounds (document has {page_count} pages)")]
    IndexOutOfBounds { index: u32, page_count: u32 },

    #[error("failed to write PDF: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("pages per file must be at least 1")]
    ZeroChunkSize,

    #[error("document has no pages")]
    EmptyDocument,

    #[error("failed to create output directory: {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write PDF: {} ({written} file(s) already written)", path.display())]
    Write {
        path: PathBuf,
        written: usize,
        #[source]
        source: WriteError,
    },
}

/// Failure while assembling or persisting a single output file.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Pdf(#[from] lopdf::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
