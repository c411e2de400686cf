/// Module for managing source lines, tokens and the instructions that make up word bodies.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the inner interpreters.  As well as the
/// inner interpreters themselves.
#[macro_use]
pub mod runtime;
