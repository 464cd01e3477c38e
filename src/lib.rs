// Library target exists for criterion benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// harnesses can import types via `cluesmith::engine::*` / `cluesmith::oracle::*`.
#![allow(dead_code)]

pub mod board;
pub mod config;
pub mod engine;
pub mod oracle;
pub mod vocab;
