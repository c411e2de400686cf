use crate::{
    add_primitive,
    runtime::{data_structures::value::Value, error, interpreter::forth_runtime::Runtime},
};

/// Move the top of the data stack onto the return stack.
///
/// Signature: `value -- `
fn word_to_return_stack(runtime: &mut Runtime) -> error::Result<Value> {
    let value = runtime.pop()?;

    runtime.context_mut()?.rpush(value);
    Ok(Value::None)
}

/// Move the top of the return stack onto the data stack.  An empty return stack gives none.
///
/// Signature: ` -- value`
fn word_from_return_stack(runtime: &mut Runtime) -> error::Result<Value> {
    let value = runtime.context_mut()?.rpop();

    runtime.push(value.clone())?;
    Ok(value)
}

pub fn register_stack_words(runtime: &mut Runtime) {
    add_primitive!(
        runtime,
        ">r",
        word_to_return_stack,
        "Move the top value to the return stack.",
        "value -- "
    );

    add_primitive!(
        runtime,
        "r>",
        word_from_return_stack,
        "Move the top of the return stack to the data stack.",
        " -- value"
    );
}
