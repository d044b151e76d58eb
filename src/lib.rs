pub mod consumer;
pub mod context;
pub mod defs;
pub mod error;
pub mod file;
pub mod lexer;
pub mod queue;
pub mod span;
pub mod tree;

pub use context::{Context, SourceDialect};
pub use error::{Result, ScanError};
pub use file::FileParser;
pub use span::Span;
pub use tree::TreeParser;
