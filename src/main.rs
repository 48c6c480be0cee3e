use std::io::{self, IsTerminal};
use std::process;

use bunt::termcolor::ColorChoice;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vcf2addressbook::Config;

// Colours only when writing to a terminal, piped output stays plain text
fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn main() {
    let config = Config::parse();

    bunt::set_stdout_color_choice(color_choice(io::stdout().is_terminal()));
    bunt::set_stderr_color_choice(color_choice(io::stderr().is_terminal()));

    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    if let Err(err) = vcf2addressbook::run(config) {
        bunt::eprintln!("{$red}Error:{/$} {:#}", err);
        process::exit(1);
    }
}
