#![deny(rust_2018_idioms)]
#![deny(proc_macro_derive_resolution_fallback)]

mod app;
mod completion;
mod observer;
#[cfg(test)]
mod testing;

pub use crate::{
    app::{ClientApp, StatusIter, SHUTDOWN_GRACE},
    completion::{Completion, StreamOutcome, WaitOutcome},
    observer::{LoggingObserver, StatusObserver},
};
