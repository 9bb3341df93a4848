//! Corvid CLI.

use corvidc::commands::{self, USAGE};
use corvidc::{init_tracing, CliError, ServicesConfig};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match commands::run(&args, ServicesConfig::from_env()) {
        Ok(report) => {
            print!("{}", report.output);
            for diagnostic in &report.diagnostics {
                eprint!("{diagnostic}");
            }
        }
        Err(error @ (CliError::Usage(_) | CliError::UnknownCommand(_))) => {
            eprintln!("error: {error}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}
