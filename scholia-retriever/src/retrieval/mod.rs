pub mod engine;
pub mod fusion;
pub mod indexing;
pub mod lexical;
pub mod rerank;
pub mod types;
pub mod vector;
