//! Presentation of whodunit kits.
//!
//! HTML pages for the web front end, printable PDF documents, and zip
//! packaging of those documents.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod clean;
mod documents;
mod html;
mod pdf;

pub use archive::{
    ARCHIVE_FILE_NAME, archive_download_name, export_timestamp, package_archive, write_documents,
};
pub use clean::{
    MAX_TOKEN_CHARS, break_long_tokens, clean_text, join_hard_wraps, normalize_punctuation,
    strip_source_references,
};
pub use documents::{
    Block, Document, character_document, clues_document, last_day_document, menu_document,
    printable_documents, safe_name, solution_document,
};
pub use html::{
    DEFAULT_LOCATION, DEFAULT_THEME, PLACEHOLDER_IMAGE, render_error_page, render_index_page,
    render_index_page_with, render_results_page,
};
pub use pdf::{pdf_safe, render_pdf, wrap_words};
