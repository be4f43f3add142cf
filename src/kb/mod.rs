//! Knowledge base: text normalization, TF-IDF retrieval, and CSV ingestion.

mod index;
mod loader;
pub(crate) mod text;

pub use index::{Document, Hit, Retrieval, TfidfIndex};
pub use loader::load_corpus;

#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("knowledge base CSV not found at: {0}")]
    NotFound(String),

    #[error("knowledge base needs columns: {0}")]
    MissingColumns(String),

    #[error("failed to read knowledge base: {0}")]
    Csv(#[from] csv::Error),
}
