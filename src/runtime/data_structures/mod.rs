/// Module contains the Value enumeration and it's implementation.  Values are what tasks keep on
/// their stacks, in their status slot and in variable bindings.
pub mod value;

/// The dictionary module provides the vocabularies and word definitions, along with the search,
/// create and forget operations over them.
pub mod dictionary;
