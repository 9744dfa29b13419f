#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;

use clap::Parser;

use got::args::Args;
use got::commands;

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            log::warn!("could not load .env file: {}", e);
        }
    }

    let args = Args::parse_from(wild::args_os());

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("could not get current directory: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match commands::execute_command(&args.command, &root) {
        Ok(message) => {
            if !message.is_empty() {
                println!("{}", message)
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{:?}", error);
            ExitCode::FAILURE
        }
    }
}
