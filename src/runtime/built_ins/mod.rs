/// Words that write to the runtime's output.
pub mod io_words;

/// Words that read and write variables.
pub mod variable_words;

/// Words that work with the return stack.
pub mod stack_words;

use crate::runtime::{
    built_ins::{
        io_words::register_io_words, stack_words::register_stack_words,
        variable_words::register_variable_words,
    },
    data_structures::dictionary::ROOT_VOCABULARY,
    interpreter::forth_runtime::Runtime,
};

/// Register all of the primitive words.  They always go into the root vocabulary, whatever the
/// current definition vocabulary is.
pub fn register_builtin_words(runtime: &mut Runtime) {
    let definitions = runtime.dictionary().definition_vocabulary();

    if runtime.dictionary_mut().set_definition_vocabulary(ROOT_VOCABULARY).is_ok() {
        register_io_words(runtime);
        register_variable_words(runtime);
        register_stack_words(runtime);
    }

    let name = runtime.dictionary().vocabulary(definitions).name().clone();
    let _ = runtime.dictionary_mut().set_definition_vocabulary(&name);
}
