pub mod document;
pub mod merge;
#[cfg(test)]
pub mod test_support;

pub use document::PdfDocument;
pub use merge::merge_files;
