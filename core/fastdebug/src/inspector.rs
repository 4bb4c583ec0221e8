//! The inspection entry point.
//!
//! An [`Inspector`] turns one [`Request`] into a report and writes it out.
//! Whatever goes wrong on the way, the program being debugged never sees it:
//! errors and panics are logged at `debug` level and the call prints nothing.

use crate::{
    config::{self, Config, Overrides},
    error::{InspectError, InspectResult},
    render::{PREFIX, Renderer},
    resolver,
    value::Inspect,
};
use std::{
    fmt::Write as _,
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    path::Path,
    process,
};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// Format of the line printed for a call without arguments.
const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] - [hour]:[minute]:[second]");

/// Source of the current time.
pub type Clock = fn() -> OffsetDateTime;

/// The local time, or UTC when the local offset cannot be determined.
#[must_use]
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Location of an [`fd!`](crate::fd) invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file, as given by `file!()`.
    pub file: &'static str,
    /// Line, as given by `line!()`.
    pub line: u32,
    /// Column, as given by `column!()`.
    pub column: u32,
    /// Module path, as given by `module_path!()`.
    pub module: &'static str,
}

impl CallSite {
    /// The file name without its directories.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

/// Everything one call hands to the inspector.
#[derive(Clone, Copy)]
pub struct Request<'a> {
    /// Where the call was made.
    pub call_site: CallSite,
    /// The source text of each argument.
    pub sources: &'a [&'static str],
    /// The arguments, in order.
    pub values: &'a [&'a dyn Inspect],
    /// Presentation flags set for this call only.
    pub overrides: Overrides,
}

impl std::fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("call_site", &self.call_site)
            .field("sources", &self.sources)
            .field("values", &self.values.len())
            .field("overrides", &self.overrides)
            .finish()
    }
}

/// What became of one call.
#[derive(Debug)]
pub enum Outcome {
    /// The inspector is disabled; nothing was printed.
    Disabled,
    /// The report was printed.
    Printed,
    /// The report was printed and the caller asked for the process to end.
    ExitRequested,
    /// Inspection failed; nothing was printed.
    Suppressed(InspectError),
}

/// A finished report, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The report text, including trailing blank lines.
    pub text: String,
    /// Whether the process should end once the report is out.
    pub exit: bool,
}

/// Builds and prints reports according to a [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Inspector {
    config: Config,
    clock: Clock,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Inspector {
    /// Creates an inspector using `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: local_now,
        }
    }

    /// Replaces the source of the time printed for calls without arguments.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Turns output on.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Turns output off. Every call is then silent.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Returns whether output is on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Applies a partial configuration update.
    pub fn configure(&mut self, settings: config::Settings) {
        settings.apply(&mut self.config);
    }

    /// Builds the report for `request`, or `None` when disabled.
    ///
    /// # Errors
    ///
    /// Fails when the arguments cannot be resolved or rendered.
    pub fn report(&self, request: &Request<'_>) -> InspectResult<Option<Report>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let config = self.config.with_overrides(request.overrides);
        let mut text = String::new();

        if request.values.is_empty() {
            let stamp = (self.clock)().format(TIMESTAMP)?;
            writeln!(text, "{PREFIX} | {stamp}")?;
            if config.end_nl {
                text.push('\n');
            }
            return Ok(Some(Report { text, exit: false }));
        }

        let renderer = Renderer::new(&config);

        if config.context {
            let site = request.call_site;
            renderer.note(
                &mut text,
                format_args!(
                    "{}:{}:{} in {}",
                    site.file_name(),
                    site.line,
                    site.column,
                    site.module
                ),
            )?;
        }

        let values = request.values.iter().map(|value| value.inspect()).collect();
        for argument in resolver::resolve(request.sources, values)? {
            renderer.render(&argument, &mut text)?;
        }

        if config.end_nl {
            text.push('\n');
        }

        Ok(Some(Report {
            text,
            exit: config.exit,
        }))
    }

    /// Prints the report for `request` to `out`.
    ///
    /// Never fails and never panics: any problem is logged and reported as
    /// [`Outcome::Suppressed`], with nothing written.
    pub fn inspect<W: Write + ?Sized>(&self, out: &mut W, request: Request<'_>) -> Outcome {
        let report = panic::catch_unwind(AssertUnwindSafe(|| self.report(&request)))
            .unwrap_or_else(|payload| Err(InspectError::from_panic(payload.as_ref())));

        let result = report.and_then(|report| {
            let Some(report) = report else {
                return Ok(Outcome::Disabled);
            };
            out.write_all(report.text.as_bytes())?;
            out.flush()?;
            Ok(if report.exit {
                Outcome::ExitRequested
            } else {
                Outcome::Printed
            })
        });

        result.unwrap_or_else(|err| {
            log::debug!(
                "fd! at {}:{} suppressed: {err}",
                request.call_site.file,
                request.call_site.line
            );
            Outcome::Suppressed(err)
        })
    }
}

/// Prints `request` to standard output using the process-wide configuration.
///
/// This is what [`fd!`](crate::fd) expands to. When the call asks for it, the
/// process exits with status 0 once the report is flushed; destructors do not
/// run.
pub fn dispatch(request: Request<'_>) {
    let inspector = Inspector::new(config::shared().load());
    let outcome = inspector.inspect(&mut io::stdout().lock(), request);
    if matches!(outcome, Outcome::ExitRequested) {
        process::exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn fixed() -> OffsetDateTime {
        datetime!(2026-03-07 09:05:01 UTC)
    }

    const SITE: CallSite = CallSite {
        file: "src/demo/main.rs",
        line: 12,
        column: 5,
        module: "demo::main",
    };

    fn plain() -> Inspector {
        Inspector::new(Config {
            color: false,
            ..Config::default()
        })
        .with_clock(fixed)
    }

    fn request<'a>(sources: &'a [&'static str], values: &'a [&'a dyn Inspect]) -> Request<'a> {
        Request {
            call_site: SITE,
            sources,
            values,
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn call_site_file_name() {
        assert_eq!(SITE.file_name(), "main.rs");
        let bare = CallSite {
            file: "lib.rs",
            ..SITE
        };
        assert_eq!(bare.file_name(), "lib.rs");
    }

    #[test]
    fn timestamp_for_empty_call() {
        let report = plain()
            .report(&request(&[], &[]))
            .expect("formats")
            .expect("enabled");
        assert_eq!(report.text, "fd | 07/03/2026 - 09:05:01\n\n");
        assert!(!report.exit);
    }

    #[test]
    fn empty_call_ignores_nl_and_exit() {
        let mut req = request(&[], &[]);
        req.overrides = Overrides {
            nl: Some(true),
            end_nl: Some(false),
            exit: Some(true),
        };
        let report = plain().report(&req).expect("formats").expect("enabled");
        assert_eq!(report.text, "fd | 07/03/2026 - 09:05:01\n");
        assert!(!report.exit);
    }

    #[test]
    fn disabled_is_silent() {
        let mut inspector = plain();
        inspector.disable();
        assert!(inspector.report(&request(&[], &[])).expect("no error").is_none());

        let mut out = Vec::new();
        let outcome = inspector.inspect(&mut out, request(&["x"], &[&1_i32]));
        assert!(matches!(outcome, Outcome::Disabled));
        assert!(out.is_empty());
    }

    #[test]
    fn context_line() {
        let mut inspector = plain();
        inspector.configure(config::Settings {
            context: Some(true),
            end_nl: Some(false),
            ..config::Settings::default()
        });
        let report = inspector
            .report(&request(&["x"], &[&true]))
            .expect("renders")
            .expect("enabled");
        assert_eq!(
            report.text,
            "fd | main.rs:12:5 in demo::main\nfd |  bool | x: true\n"
        );
    }

    #[test]
    fn exit_flag_is_reported() {
        let mut req = request(&["x"], &[&1_u8]);
        req.overrides.exit = Some(true);
        let report = plain().report(&req).expect("renders").expect("enabled");
        assert!(report.exit);

        let mut out = Vec::new();
        assert!(matches!(
            plain().inspect(&mut out, req),
            Outcome::ExitRequested
        ));
        assert!(!out.is_empty());
    }

    #[test]
    fn failures_print_nothing() {
        let mut out = Vec::new();
        let outcome = plain().inspect(&mut out, request(&["a", "b"], &[&1_i32, &()]));
        assert!(matches!(
            outcome,
            Outcome::Suppressed(InspectError::UnsupportedType { type_name: "()" })
        ));
        assert!(out.is_empty());

        let outcome = plain().inspect(&mut out, request(&["a"], &[&1_i32, &2_i32]));
        assert!(matches!(
            outcome,
            Outcome::Suppressed(InspectError::Resolution(_))
        ));
        assert!(out.is_empty());
    }

    struct Exploding;

    impl Inspect for Exploding {
        fn inspect(&self) -> crate::Value {
            panic!("cannot inspect this");
        }
    }

    #[test]
    fn panics_are_contained() {
        let mut out = Vec::new();
        let outcome = plain().inspect(&mut out, request(&["boom"], &[&Exploding]));
        assert!(matches!(
            outcome,
            Outcome::Suppressed(InspectError::Panicked(message)) if message == "cannot inspect this"
        ));
        assert!(out.is_empty());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_swallowed() {
        let outcome = plain().inspect(&mut Broken, request(&["x"], &[&1_i32]));
        assert!(matches!(outcome, Outcome::Suppressed(InspectError::Io(_))));
    }
}
