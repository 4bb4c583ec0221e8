//! `fd-demo` inspects a fixed set of sample values with `fd!`.
//!
//! Flags map onto the inspector configuration, which makes the binary a
//! convenient way to look at the output and to check that `exit` really ends
//! the process.

#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::collections::BTreeMap;

use clap::Parser;
use fastdebug::{Inspect, Settings, Value, fd};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(Debug, Parser)]
#[command(author, version, about, name = "fd-demo")]
struct Opt {
    /// Print an empty line after every line of a report.
    #[arg(long)]
    nl: bool,

    /// Do not print an empty line after each report.
    #[arg(long)]
    no_end_nl: bool,

    /// End the process right after the report.
    #[arg(long)]
    exit: bool,

    /// Disable the inspector before inspecting.
    #[arg(long)]
    disable: bool,

    /// Start the report with the location of the call.
    #[arg(long)]
    context: bool,

    /// Print without terminal colours.
    #[arg(long)]
    no_color: bool,

    /// Call `fd!()` without arguments, which prints the time.
    #[arg(long)]
    empty: bool,
}

/// A user type made printable by implementing `Inspect`.
struct Point {
    x: i32,
    y: i32,
}

impl Inspect for Point {
    fn inspect(&self) -> Value {
        Value::mapping(
            "Point",
            [
                ("x".inspect(), self.x.inspect()),
                ("y".inspect(), self.y.inspect()),
            ],
        )
    }
}

#[allow(clippy::print_stdout)]
fn main() {
    let args = Opt::parse();

    if let Err(err) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        log::error!("cannot install logger: {err}");
    }

    fastdebug::configure(Settings {
        nl: Some(args.nl),
        end_nl: Some(!args.no_end_nl),
        exit: Some(args.exit),
        context: Some(args.context),
        color: args.no_color.then_some(false),
        ..Settings::default()
    });
    if args.disable {
        fastdebug::disable();
    }

    if args.empty {
        fd!();
    } else {
        let numbers = vec![1, 2, 3];
        let name = "fastdebug";
        let ready = true;
        let scores = BTreeMap::from([("ada", 9.5), ("alan", 8.0)]);
        let origin = Point { x: 0, y: -1 };

        fd!(numbers, name, ready, numbers.len() * 2, scores, origin);
    }

    println!("after fd!");
}
