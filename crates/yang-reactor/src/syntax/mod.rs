//! Input side of the compiler: the generic statement trees handed over by the
//! lexer/grammar layer, one per source file.

pub mod tree;

pub use tree::{RawStatement, SourceRef};
