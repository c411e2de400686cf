use iceoryx2_bb_log::info;
use std::env::args;
use tforth::{
    lang::{
        code::Instruction,
        tokenizing::{LineSource, tokenize},
    },
    runtime::{
        built_ins::register_builtin_words,
        config::RuntimeConfig,
        data_structures::{
            dictionary::{Handler, USER_VOCABULARY},
            value::Value,
        },
        error,
        interpreter::{InterpreterStack, forth_runtime::Runtime},
    },
};

/// Print the tokens found in each of the given files.
fn dump_tokens(paths: &[String]) -> error::Result<()> {
    let sources = paths
        .iter()
        .map(|path| LineSource::from_file(path))
        .collect::<error::Result<Vec<LineSource>>>()?;

    for token in tokenize(sources) {
        println!("{:?}", token?);
    }

    Ok(())
}

/// Build a small four level program by hand and run it.  The innermost word reads back a variable
/// that the level above it stored, the outer levels print what is left on the stack.
fn run_demo(runtime: &mut Runtime) -> error::Result<()> {
    runtime.dictionary_mut().use_vocabulary(USER_VOCABULARY)?;

    let fetch = runtime.dictionary().find_word("=:")?;
    let store = runtime.dictionary().find_word(":=")?;
    let print = runtime.dictionary().find_word(".")?;
    let newline = runtime.dictionary().find_word("cr")?;

    let dictionary = runtime.dictionary_mut();

    let level4 = dictionary.create(
        "level4",
        Handler::AtomicSecondary,
        vec![Instruction::execute(fetch)],
    );

    let level3 = dictionary.create(
        "level3",
        Handler::CompositeSecondary,
        vec![Instruction::execute(store), Instruction::execute(level4)],
    );

    let level2 = dictionary.create(
        "level2",
        Handler::CompositeSecondary,
        vec![
            Instruction::execute(level3),
            Instruction::execute(print),
            Instruction::execute(newline),
        ],
    );

    let level1 = dictionary.create(
        "level1",
        Handler::CompositeSecondary,
        vec![
            Instruction::execute(level2),
            Instruction::execute(print),
            Instruction::execute(print),
            Instruction::execute(newline),
        ],
    );

    let task = runtime.init("demo", level1);
    let context = runtime.task_mut(&task)?;

    for value in [
        Value::from(5_i64),
        Value::from("hello world"),
        Value::from("ONE"),
        Value::from(1_i64),
        Value::from("ONE"),
    ] {
        context.push(value);
    }

    let finished = runtime.run(&task)?;

    info!("task {} finished with status {:?}", task, finished.status());

    let listing = runtime.dictionary().describe(level1);
    runtime.write_output(&listing)?;

    Ok(())
}

fn main() -> error::Result<()> {
    let config = RuntimeConfig::from_env();

    config.apply_log_level();

    let mut runtime = Runtime::with_config(&config);
    register_builtin_words(&mut runtime);

    let args: Vec<String> = args().collect();

    if args.len() >= 2 {
        dump_tokens(&args[1..])?;
    } else {
        run_demo(&mut runtime)?;
        print!("{}", runtime.take_output());
    }

    Ok(())
}
