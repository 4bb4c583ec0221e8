//! fastdebug prints what you are looking at.
//!
//! [`fd!`] takes any number of expressions and prints, for each one, its source
//! text, its type and its value. Sequences and maps get one row per element:
//!
//! ```text
//! fd |  i32  | answer: 42
//! fd |  Vec  |  3  | numbers
//!  ╟ |  i32  |  0  | 1
//!  ╟ |  i32  |  1  | 2
//!  ╚ |  i32  |  2  | 3
//! ```
//!
//! # Overview
//!
//! - [`resolver`]: pairs the source text captured by the macro with the values
//! - [`value`]: classifies values into rendering categories ([`Inspect`], [`Value`])
//! - [`render`]: lays out and tints the report lines
//! - [`inspector`]: the entry point, which never lets a failure escape
//! - [`config`]: the flags, per inspector and process-wide
//!
//! # Example
//!
//! ```rust,no_run
//! use fastdebug::fd;
//!
//! let numbers = vec![1, 2, 3];
//! let name = "Ada";
//!
//! fd!(numbers, name, numbers.len() * 2);
//!
//! // A blank line after every row, none after the call.
//! fd!(numbers; nl = true, end_nl = false);
//!
//! // Just the time.
//! fd!();
//!
//! // Print, then end the process.
//! fd!(name; exit = true);
//! ```
//!
//! Output goes to standard output. Calls are silent after [`disable`] and
//! print again after [`enable`]. A call that cannot be printed, for example
//! because a value is [unsupported](Value::Unsupported), prints nothing and
//! never panics.

#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod config;
pub mod error;
pub mod inspector;
pub mod render;
pub mod resolver;
pub mod value;

pub use config::{Config, Overrides, Settings, SharedConfig};
pub use error::{InspectError, InspectResult, ResolutionError};
pub use inspector::{CallSite, Inspector, Outcome, Report, Request, dispatch};
pub use render::{RenderedVariable, Renderer, Tint};
pub use resolver::ResolvedArgument;
pub use value::{Brackets, Category, Inspect, Value};

/// Turns output of [`fd!`] on.
pub fn enable() {
    config::shared().enable();
}

/// Turns output of [`fd!`] off; every call is silent until [`enable`].
pub fn disable() {
    config::shared().disable();
}

/// Returns whether [`fd!`] prints anything.
#[must_use]
pub fn is_enabled() -> bool {
    config::shared().is_enabled()
}

/// Changes the defaults used by [`fd!`].
///
/// ```rust
/// fastdebug::configure(fastdebug::Settings {
///     end_nl: Some(false),
///     color: Some(false),
///     ..Default::default()
/// });
/// assert!(!fastdebug::config().end_nl);
/// ```
pub fn configure(settings: Settings) {
    config::shared().configure(settings);
}

/// A snapshot of the defaults used by [`fd!`].
#[must_use]
pub fn config() -> Config {
    config::shared().load()
}

/// Borrows an argument of [`fd!`] as a trait object.
#[doc(hidden)]
#[must_use]
pub fn __inspectable<T: Inspect>(value: &T) -> &dyn Inspect {
    value
}

/// Expands to the [`CallSite`] of the macro invocation.
#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {
        $crate::CallSite {
            file: ::core::file!(),
            line: ::core::line!(),
            column: ::core::column!(),
            module: ::core::module_path!(),
        }
    };
}

/// Builds the [`Request`] for a set of arguments and options.
#[doc(hidden)]
#[macro_export]
macro_rules! __request {
    ([$($arg:expr),*] [$($opt:ident = $val:expr),*]) => {
        $crate::Request {
            call_site: $crate::__call_site!(),
            sources: &[$(::core::stringify!($arg)),*],
            values: &[$($crate::__inspectable(&$arg)),*],
            overrides: {
                #[allow(unused_mut)]
                let mut overrides = $crate::Overrides::default();
                $(overrides.$opt = ::core::option::Option::Some($val);)*
                overrides
            },
        }
    };
}

/// Prints the source text, type and value of each argument.
///
/// Arguments are borrowed, not moved. Per-call options follow a `;`:
///
/// - `nl = bool`: an empty line after every printed line
/// - `end_nl = bool`: an empty line after the whole call
/// - `exit = bool`: end the process once the report is printed
///
/// Without arguments, prints the current time instead.
///
/// ```rust
/// use fastdebug::fd;
///
/// let scores = std::collections::BTreeMap::from([("ada", 3), ("alan", 2)]);
/// fd!(scores, scores.len(); end_nl = false);
/// ```
#[macro_export]
macro_rules! fd {
    ($($arg:expr),* $(,)? $(; $($opt:ident = $val:expr),* $(,)?)?) => {
        $crate::dispatch($crate::__request!([$($arg),*] [$($($opt = $val),*)?]))
    };
}

/// Like [`fd!`], but with an explicit [`Inspector`] and writer.
///
/// Evaluates to the [`Outcome`] of the call; the process is never ended, even
/// when `exit` is set.
///
/// ```rust
/// use fastdebug::{Config, Inspector, fd_with};
///
/// let inspector = Inspector::new(Config { color: false, ..Config::default() });
/// let mut out = Vec::new();
/// let answer = 42;
/// fd_with!(inspector, out, answer; end_nl = false);
/// assert_eq!(String::from_utf8(out).unwrap(), "fd |  i32  | answer: 42\n");
/// ```
#[macro_export]
macro_rules! fd_with {
    ($inspector:expr, $out:expr $(, $arg:expr)* $(,)? $(; $($opt:ident = $val:expr),* $(,)?)?) => {
        $inspector.inspect(
            &mut $out,
            $crate::__request!([$($arg),*] [$($($opt = $val),*)?]),
        )
    };
}
