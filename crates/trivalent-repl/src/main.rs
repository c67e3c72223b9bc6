use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use exec::{Bindings, ExecContext, Mode};

mod exec;
mod repl;

/// Evaluates boolean and fuzzy logic expressions.
#[derive(Parser, Debug)]
#[clap(name = "trivalent", version)]
struct Args {
    /// Script to execute line by line instead of starting the REPL
    #[clap(value_parser)]
    file: Option<PathBuf>,

    /// Evaluate in fuzzy logic over degrees of truth in [0, 1]
    #[clap(long)]
    fuzzy: bool,

    /// Log more, repeat for more detail
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Could not start logger: {err}");
    }

    let mode = if args.fuzzy { Mode::Fuzzy } else { Mode::Bool };
    let mut bindings = Bindings::default();

    match args.file {
        Some(path) => {
            let mut exec_ctx = ExecContext {
                mode,
                ..Default::default()
            };
            exec::exec_file(&path, &mut exec_ctx, &mut bindings)
        }
        None => {
            repl::repl(mode, &mut bindings);
            Ok(())
        }
    }
}
