// Runtime configuration read through a key lookup.

use iceoryx2_bb_log::LogLevel;
use std::collections::HashMap;
use test_case::test_case;
use tforth::runtime::{
    config::{CAPTURE_OUTPUT_VARIABLE, LOG_LEVEL_VARIABLE, RuntimeConfig, parse_log_level},
    data_structures::value::Value,
    interpreter::forth_runtime::Runtime,
};

fn config_from(pairs: &[(&str, &str)]) -> RuntimeConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    RuntimeConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = config_from(&[]);

    assert!(matches!(config.log_level, LogLevel::Warn));
    assert!(!config.capture_output);
}

#[test_case("trace"; "trace")]
#[test_case(" DEBUG "; "case and whitespace")]
fn log_level_is_read(text: &str) {
    let config = config_from(&[(LOG_LEVEL_VARIABLE, text)]);

    assert!(matches!(config.log_level, LogLevel::Trace | LogLevel::Debug));
}

#[test]
fn unknown_log_level_falls_back() {
    assert!(parse_log_level("chatty").is_none());

    let config = config_from(&[(LOG_LEVEL_VARIABLE, "chatty")]);
    assert!(matches!(config.log_level, LogLevel::Warn));
}

#[test_case("1", true; "one")]
#[test_case("TRUE", true; "true")]
#[test_case("yes", true; "yes")]
#[test_case("0", false; "zero")]
#[test_case("off", false; "off")]
fn capture_output_flag(text: &str, expected: bool) {
    let config = config_from(&[(CAPTURE_OUTPUT_VARIABLE, text)]);

    assert_eq!(config.capture_output, expected);
}

#[test]
fn captured_runtime_collects_output() {
    let config = config_from(&[(CAPTURE_OUTPUT_VARIABLE, "1")]);
    let mut runtime = Runtime::with_config(&config);

    runtime.write_output("text").unwrap();

    assert_eq!(runtime.take_output(), "text");
    assert_eq!(runtime.take_output(), "");

    runtime.define_global("flag", Value::from(true));
    assert_eq!(runtime.global("flag"), Some(&Value::from(true)));
}
