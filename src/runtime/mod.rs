/// All of the core data structures used by the runtime.
pub mod data_structures;

/// Module for defining the built-in primitive words.
pub mod built_ins;

/// Module for defining the error reporting of the runtime.
pub mod error;

/// Runtime configuration read from the environment.
pub mod config;

/// Module for the execution contexts, the inner interpreters and the runtime object that ties
/// them to the dictionary.
#[macro_use]
pub mod interpreter;
