//! Defines the [`Termination`] trait and the [`run`] entry point used by `#[handsign::main]`.

use std::{convert::Infallible, fmt::Debug, process};

/// This trait extends the [`std::process::Termination`] trait for use in handsign.
///
/// It allows [`run`] to introspect the value returned by the user's `main` function, so that a
/// failure can be logged before the standard library reports it and sets the exit code.
pub trait Termination: process::Termination {
    fn is_success(&self) -> bool;
}

impl Termination for Infallible {
    fn is_success(&self) -> bool {
        match *self {}
    }
}

impl Termination for () {
    fn is_success(&self) -> bool {
        true
    }
}

impl<T: Termination, E: Debug> Termination for Result<T, E> {
    fn is_success(&self) -> bool {
        match self {
            Ok(term) => term.is_success(),
            Err(_) => false,
        }
    }
}

/// Runs a `main` function and hands its result back to the standard library.
///
/// This is invoked by the code generated by `#[handsign::main]`; it is not normally called
/// directly.
pub fn run<T: Termination>(main: impl FnOnce() -> T) -> T {
    let term = main();
    if !term.is_success() {
        log::error!("exiting with failure status");
    }
    term
}
