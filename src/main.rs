use clap::{Arg, Command};
use cyclecount::app_logic;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("cyclecount")
        .version("0.1.0")
        .about("Rainflow cycle counting of recorded load signals (Downing's Method 1)")
        .arg(
            Arg::new("run")
                .short('r')
                .long("run")
                .value_name("CONFIG")
                .help("Run with the given YAML or TOML configuration")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Write the report here instead of the configured output"),
        )
        .after_help(
            "The report lists one (range, mean) pair per counted cycle. \
             Set RUST_LOG to change the log level.",
        )
        .get_matches();

    if let Some(config) = matches.get_one::<String>("run") {
        let output = matches.get_one::<String>("output").map(String::as_str);
        if let Err(err) = app_logic::run(config, output) {
            error!("{:#}", err);
            std::process::exit(1);
        }
    }
}
