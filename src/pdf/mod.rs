pub mod assemble;
pub mod document;
pub mod extract;
pub mod split;

#[cfg(test)]
pub(crate) mod testing;

pub use document::PdfDocument;
