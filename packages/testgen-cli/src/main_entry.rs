// Main Entry Point
//
// Builds the command line, drops flags the command does not know, picks the
// log level and hands the target to the driver.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use ng_testgen::{GeneratorOptions, TestGenerator};

use crate::driver::{self, DriverOptions};
use crate::logging::{ConsoleLogger, LogLevel, Logger};

pub fn build_command() -> Command {
    Command::new("ng-testgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate Jest spec files for Angular components, services, pipes and directives")
        .arg(
            Arg::new("target")
                .value_name("PATH")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Source file to test, or a directory together with --all"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Process every TypeScript file under a directory"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Overwrite spec files that already exist"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print generated specs instead of writing them"),
        )
        .arg(
            Arg::new("print-analysis")
                .long("print-analysis")
                .action(ArgAction::SetTrue)
                .help("Print the class description as JSON and write nothing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log debug output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
}

/// Drop flags `command` does not declare, with a warning for each.
pub fn filter_known_args(args: Vec<String>, command: &Command, logger: &dyn Logger) -> Vec<String> {
    let mut known: Vec<String> = vec![
        "--help".to_string(),
        "-h".to_string(),
        "--version".to_string(),
        "-V".to_string(),
    ];
    for arg in command.get_arguments() {
        if let Some(long) = arg.get_long() {
            known.push(format!("--{}", long));
        }
        if let Some(short) = arg.get_short() {
            known.push(format!("-{}", short));
        }
    }

    args.into_iter()
        .enumerate()
        .filter(|(index, arg)| {
            if *index == 0 || !arg.starts_with('-') || arg == "-" || arg == "--" {
                return true;
            }
            let flag = arg.split('=').next().unwrap_or(arg);
            if known.iter().any(|name| name == flag) {
                true
            } else {
                logger.warn(&format!("Ignoring unknown option {}", arg));
                false
            }
        })
        .map(|(_, arg)| arg)
        .collect()
}

fn level_for(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        LogLevel::Debug
    } else if quiet {
        LogLevel::Warn
    } else {
        LogLevel::Info
    }
}

/// Run the CLI on `args` (program name first) and return the exit code.
pub fn main(args: Vec<String>) -> anyhow::Result<i32> {
    let command = build_command();
    let bootstrap = ConsoleLogger::new(LogLevel::Warn);
    let args = filter_known_args(args, &command, &bootstrap);

    let matches = match command.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            err.print()?;
            return Ok(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let logger = ConsoleLogger::new(level_for(matches.get_flag("verbose"), matches.get_flag("quiet")));
    let options = DriverOptions {
        all: matches.get_flag("all"),
        force: matches.get_flag("force"),
        dry_run: matches.get_flag("dry-run"),
        print_analysis: matches.get_flag("print-analysis"),
    };
    let target = matches
        .get_one::<PathBuf>("target")
        .ok_or_else(|| anyhow::anyhow!("missing target path"))?;

    let generator = TestGenerator::new(GeneratorOptions::default());
    Ok(driver::run(target, &options, &generator, &logger))
}
