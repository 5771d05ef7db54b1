//! Natural language processing building blocks.

pub mod embeddings;
pub mod highlight;
pub mod phrases;
pub mod text;

pub use embeddings::EmbeddingModel;
pub use highlight::highlight_gendered_words;
pub use phrases::Phraser;
pub use text::{read_text, stem_phrase, ProcessedToken, TextProcessor};
