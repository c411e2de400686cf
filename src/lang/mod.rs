/// Module for tracking locations in the original source lines.
#[macro_use]
pub mod source_buffer;

/// Module for turning a sequence of line sources into a lazy stream of tokens for a compiler.
pub mod tokenizing;

/// Module for defining the instructions that make up the bodies of secondary words.
pub mod code;
