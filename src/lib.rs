//! Host runtime for programs lowered from a dynamically typed,
//! JavaScript-like source language: a closed dynamic value type, the
//! coercions and operator tables over it, a single-hop prototype object
//! model, and a receiver-plus-arguments call convention.

pub mod config;
pub mod demos;
pub mod error;
pub mod runtime;
pub mod types;

pub use config::Config;
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{
    Args, Heap, JsFunction, Runtime, execute, execute_with_output, ops, to_boolean, to_js_string,
    to_number,
};
pub use types::{ArrayId, JsValue, ObjectId, Tag};
