use chain_map::freq::{self, FreqConfig, EXIT_USAGE};
use chain_map::logger::initialize_logger;
use chain_map::{DumpMode, DEFAULT_LOAD_FACTOR};
use clap::{CommandFactory, Parser};
use log::error;
use std::io::{self, BufWriter};
use std::process::ExitCode;

/// Count whitespace-delimited words read from standard input.
#[derive(Parser, Debug)]
#[command(name = "freq", version, about, long_about = None)]
struct Args {
    /// Output format (KEY, KEY_VALUE, VALUE, VALUE_KEY)
    #[arg(short = 'f', value_name = "FORMAT", default_value_t = DumpMode::ValueKey)]
    format: DumpMode,

    /// Load factor for hash table
    #[arg(
        short = 'l',
        value_name = "LOAD_FACTOR",
        default_value_t = DEFAULT_LOAD_FACTOR,
        value_parser = parse_load_factor
    )]
    load_factor: f64,
}

fn parse_load_factor(s: &str) -> Result<f64, String> {
    let lf: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if lf.is_finite() && lf > 0.0 {
        Ok(lf)
    } else {
        Err(format!("`{}` must be a positive, finite number", s))
    }
}

fn main() -> ExitCode {
    initialize_logger();
    let args = match Args::try_parse() {
        Ok(args) => args,
        // -h / --version print to stdout and exit 0.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let rendered = e.render().to_string();
            eprint!("{}", rendered);
            if !rendered.contains("Usage:") {
                eprintln!("\n{}", Args::command().render_usage());
            }
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let config = FreqConfig {
        mode: args.format,
        load_factor: args.load_factor,
    };

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    match freq::run(stdin, stdout, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("freq: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
