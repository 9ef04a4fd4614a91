use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use sixpair_usb::controller::Sixaxis;
use sixpair_usb::devices::find_controllers;
use std::io;
use std::io::Write;
use std::process::ExitCode;

use crate::bluetooth::HciTool;
use crate::cli::Cli;
use crate::pairing::Pairer;

mod bluetooth;
mod cli;
mod pairing;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                let status = report_parse_error(&error, &mut io::stderr(), &mut io::stdout());
                return ExitCode::from(status);
            }
        },
    };

    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .context("Could not configure the logger")
    {
        eprintln!("{:#}", error);
    }

    let outcome = run(args);
    ExitCode::from(report_outcome(outcome, &mut io::stdout(), &mut io::stderr()))
}

fn run(args: Cli) -> Result<usize> {
    let controllers = find_controllers()?;
    let mut pairer = Pairer::new(args.address, HciTool, io::stdout());

    let mut paired = 0;
    for found in controllers {
        debug!("Processing {:?}", found);

        let mut controller = Sixaxis::open(&found)?;
        pairer.pair(&mut controller)?;
        paired += 1;
    }

    Ok(paired)
}

// Anything other than help / version lands here. A bad address also gets the usage line.
fn report_parse_error<E: Write, O: Write>(error: &clap::Error, err: &mut E, out: &mut O) -> u8 {
    let _ = write!(err, "{}", error.render());
    if error.kind() == ErrorKind::ValueValidation {
        let _ = writeln!(out, "{}", Cli::command().render_usage());
    }
    EXIT_FAILURE
}

fn report_outcome<O: Write, E: Write>(outcome: Result<usize>, out: &mut O, err: &mut E) -> u8 {
    match outcome {
        Ok(0) => {
            let _ = writeln!(
                out,
                "No controller found on USB busses. Please connect your joystick via USB."
            );
            EXIT_FAILURE
        }
        Ok(paired) => {
            info!("Updated {} controller interface(s)", paired);
            EXIT_SUCCESS
        }
        Err(error) => {
            let _ = writeln!(err, "Error: {:#}", error);
            EXIT_FAILURE
        }
    }
}
