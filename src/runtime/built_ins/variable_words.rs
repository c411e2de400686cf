use crate::{
    add_primitive,
    runtime::{data_structures::value::Value, error, interpreter::forth_runtime::Runtime},
};

/// Pop a variable name and push the variable's value.  The task's own bindings are checked before
/// the process wide ones.
///
/// Signature: `name -- value`
fn word_fetch(runtime: &mut Runtime) -> error::Result<Value> {
    let name = runtime.pop_as_name()?;
    let value = runtime.fetch_variable(&name)?;

    runtime.push(value.clone())?;
    Ok(value)
}

/// Pop a variable name, then the value to store in it.  An existing task binding is written first,
/// then an existing process wide one.  Otherwise the variable is created for the task.
///
/// Signature: `value name -- `
fn word_store(runtime: &mut Runtime) -> error::Result<Value> {
    let name = runtime.pop_as_name()?;
    let value = runtime.pop()?;

    runtime.store_variable(&name, value.clone())?;
    Ok(value)
}

/// Register the variable access words.
pub fn register_variable_words(runtime: &mut Runtime) {
    add_primitive!(
        runtime,
        "=:",
        word_fetch,
        "Read the variable named on top of the stack.",
        "name -- value"
    );

    add_primitive!(
        runtime,
        ":=",
        word_store,
        "Write the value under the name into the named variable.",
        "value name -- "
    );
}
