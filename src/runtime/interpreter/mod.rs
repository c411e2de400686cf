use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{data_structures::value::Value, error},
};
use std::fmt::{self, Display, Formatter};

/// The per task execution state: stacks, variables, status and instruction pointers.
pub mod context;

/// The runtime object that owns the dictionary, the task registry and the process wide variables.
pub mod forth_runtime;

/// The two inner interpreters that walk the bodies of secondary words.
pub mod threading;

/// A call stack item is a record of the executing word's name and the location it was defined at.
/// These items are read-only and the fields are accessed by member functions.
#[derive(Clone)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where was the executing word defined?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// The secondaries a task is currently inside of, outermost first.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by a task.
pub type ValueStack = Vec<Value>;

/// Trait for managing a task's data stack.  Primitive words reach it through the runtime's active
/// context.
pub trait InterpreterStack {
    /// What has the maximum depth the stack as reached so far?
    fn stack_max_depth(&self) -> usize;

    /// Use to examine the full data stack when required.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value as a variable name.  Fails on an empty stack, or if the value isn't a
    /// string.
    fn pop_as_name(&mut self) -> error::Result<String>;
}

/// Simplify registering a primitive word with the runtime.  The word is created in the current
/// definition vocabulary.
///
/// Required parameters are, the runtime instance to register with.  The name of the word to
/// register.  The primitive function to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_primitive {
    (
        $runtime:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use $crate::runtime::data_structures::dictionary::Handler;

        // Record where in the Rust source the word was registered from.
        let id = $runtime
            .dictionary_mut()
            .create($name, Handler::Primitive($function), Vec::new());

        $runtime.dictionary_mut().word_mut(id).set_info(
            $crate::location_here!(),
            $description.to_string(),
            $signature.to_string(),
        );

        id
    }};
}
