//! `bearcalc` - everyday calculators from the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use chrono::Local;
use clap::Parser;

use bearcalc_cli::cli::{Cli, Command};
use bearcalc_cli::{handlers, init_logging, Config, Error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let result = Config::load_from(cli.config.clone()).and_then(|config| execute(&cli, &config));
    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            if let Error::Calculation(calc) = &err {
                eprintln!("{}", serde_json::to_string_pretty(calc)?);
            }
            Err(err.into())
        }
    }
}

fn execute(cli: &Cli, config: &Config) -> bearcalc_cli::Result<String> {
    let json = config.output.json;
    match &cli.command {
        Command::List(cmd) => handlers::list(cmd, cmd.json || json),
        Command::Show(cmd) => handlers::show(cmd, cmd.json || json),
        Command::Run(cmd) => handlers::run(cmd, config, Local::now().date_naive()),
        Command::Convert(cmd) => handlers::convert(cmd, config),
        Command::Keys(cmd) => handlers::keys(cmd),
        Command::Config(cmd) => handlers::config(cmd, config),
    }
}
