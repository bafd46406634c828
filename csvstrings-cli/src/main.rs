use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use csvstrings::{Config, Error, csv_to_strings, strings_to_csv};
use csvstrings_cli::{Mode, expand_input_globs, setup_logger};

/// Convert between a CSV translation matrix and per-locale `.strings` files.
///
/// Given `.strings` files (or none, to use the configured locales) the tool
/// writes one CSV with a column per language. Given a single `.csv` file it
/// writes `<locale>.lproj/Localizable.strings` for every configured locale.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input `.strings` files, or a single `.csv` file
    files: Vec<String>,

    /// Log every processed row
    #[arg(short, long)]
    verbose: bool,

    /// Also append log output to FILE
    #[arg(short, long, value_name = "FILE")]
    logfile: Option<PathBuf>,

    /// Configuration file (defaults to ./csvstrings.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn usage_error(message: &str, code: i32) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", Args::command().render_usage());
    process::exit(code);
}

fn load_config(explicit: Option<&PathBuf>, mode: &Mode) -> Config {
    if let Some(path) = explicit {
        return Config::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}: {}", path.display(), e);
            process::exit(1);
        });
    }

    match Config::load_default() {
        Ok(Some(config)) => config,
        Ok(None) if mode.needs_config() => usage_error(&Error::MissingConfig.to_string(), 1),
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logger(args.verbose, args.logfile.as_deref()) {
        eprintln!("Error: failed to set up logging: {}", e);
        process::exit(1);
    }

    let files = match expand_input_globs(&args.files) {
        Ok(files) => files,
        Err(e) => usage_error(&e, 2),
    };
    let mode = match Mode::from_args(&files) {
        Ok(mode) => mode,
        Err(e) => usage_error(&e, 2),
    };

    let config = load_config(args.config.as_ref(), &mode);
    for warning in config.validate() {
        log::warn!("{}", warning);
    }

    let result = match mode {
        Mode::StringsToCsv(paths) => strings_to_csv(&config, &paths).map(|s| s.to_string()),
        Mode::CsvToStrings(path) => csv_to_strings(&config, &path).map(|s| s.to_string()),
    };

    match result {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
