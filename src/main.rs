use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::LevelFilter;
use openmat::{interpreter::evaluator::core::Session, selftest::run_self_tests};
use simple_logger::SimpleLogger;

/// openmat runs OpenMat scripts, a small language for scalar and matrix
/// arithmetic.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run. Without one, the built-in self-tests are run instead.
    script: Option<PathBuf>,

    /// Raises the log level; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Does not print the banners around a script's output.
    #[arg(short, long)]
    quiet: bool,
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = SimpleLogger::new().with_level(level_for(args.verbose)).init() {
        eprintln!("Failed to start the logger: {e}");
    }

    let Some(path) = args.script else {
        return match run_self_tests(&mut io::stdout().lock()) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Failed to report self-test results: {e}");
                ExitCode::FAILURE
            },
        };
    };

    let Ok(file) = File::open(&path) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        return ExitCode::FAILURE;
    };

    if !args.quiet {
        println!("Beginning execution\n");
    }

    let mut session = Session::new(io::stdout().lock());
    let result = session.run(BufReader::new(file));
    drop(session);

    match result {
        Ok(()) => {
            if !args.quiet {
                println!("Execution over");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            for diagnostic in e.diagnostics() {
                eprintln!("{diagnostic}");
            }
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
