#![deny(rust_2018_idioms)]
#![deny(proc_macro_derive_resolution_fallback)]

pub mod config;
// generated
#[allow(rust_2018_idioms)]
pub mod proto;
pub mod tracing;

pub use anyhow;
pub use futures;
pub use tonic;
