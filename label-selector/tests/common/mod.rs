//! Shared helpers for the label-selector integration tests

#![allow(dead_code)]

use label_selector::{parse, Requirement};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn parse_ok(input: &str) -> Vec<Requirement> {
    match parse(input) {
        Ok(requirements) => requirements,
        Err(errors) => panic!("expected {:?} to parse, got {}", input, errors),
    }
}

pub fn parse_err(input: &str) -> Vec<String> {
    match parse(input) {
        Ok(requirements) => panic!("expected {:?} to fail, got {:?}", input, requirements),
        Err(errors) => errors.messages(),
    }
}

/// Splits a `<<token>>`-annotated input into the raw selector.
pub fn strip_markers(annotated: &str) -> String {
    annotated.replacen("<<", "", 1).replacen(">>", "", 1)
}
