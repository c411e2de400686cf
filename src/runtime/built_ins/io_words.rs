use crate::{
    add_primitive,
    runtime::{
        data_structures::value::Value,
        error,
        interpreter::{InterpreterStack, forth_runtime::Runtime},
    },
};

/// Pop the top value and print it followed by a space.
///
/// Signature: `value -- `
fn word_print(runtime: &mut Runtime) -> error::Result<Value> {
    let value = runtime.pop()?;

    runtime.write_output(&format!("{} ", value))?;
    Ok(Value::None)
}

/// Print a line break.
///
/// Signature: ` -- `
fn word_newline(runtime: &mut Runtime) -> error::Result<Value> {
    runtime.write_output("\n")?;
    Ok(Value::None)
}

/// Print the active task's data stack, top first, without changing it.
///
/// Signature: ` -- `
fn word_print_stack(runtime: &mut Runtime) -> error::Result<Value> {
    let mut text = {
        let context = runtime.context()?;
        format!("Depth: {}\n", context.stack().len())
    };

    for value in runtime.context()?.stack().iter().rev() {
        text += &format!("{:?}\n", value);
    }

    runtime.write_output(&text)?;
    Ok(Value::None)
}

/// Print the words visible from the search vocabulary.
///
/// Signature: ` -- `
fn word_print_dictionary(runtime: &mut Runtime) -> error::Result<Value> {
    let listing = runtime.dictionary().to_string();

    runtime.write_output(&listing)?;
    Ok(Value::None)
}

/// Register the output words.
pub fn register_io_words(runtime: &mut Runtime) {
    add_primitive!(
        runtime,
        ".",
        word_print,
        "Pop the top value and print it followed by a space.",
        "value -- "
    );

    add_primitive!(runtime, "cr", word_newline, "Print a line break.", " -- ");

    add_primitive!(
        runtime,
        ".s",
        word_print_stack,
        "Print the data stack, top first.",
        " -- "
    );

    add_primitive!(
        runtime,
        ".w",
        word_print_dictionary,
        "Print the words visible from the search vocabulary.",
        " -- "
    );
}
