extern crate depsampler;
#[macro_use]
extern crate slog;
extern crate structopt;

use std::error::Error;
use std::io as std_io;
use std::path::PathBuf;
use std::process;

use depsampler::dataset::conll;
use depsampler::io::{Format, Serializer, Write as RecordWrite};
use depsampler::logging::{AppLogger, Config as LogConfig, FileConfig, Level};
use depsampler::syntax::{self, Algorithm, ParseGraph};
use depsampler::validation::{Config, ValidationReport, Validator};
use slog::Logger;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "depsampler", about = "Heuristic dependency parsing and sampling validation")]
struct Args {
    #[structopt(flatten)]
    common: CommonArgs,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug, Clone)]
struct CommonArgs {
    /// Verbose mode (-v, -vv)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,
    /// Only report warnings and errors
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,
    /// Directory for log files (no file logging when omitted)
    #[structopt(long = "logdir", parse(from_os_str))]
    logdir: Option<PathBuf>,
}

impl From<CommonArgs> for LogConfig {
    fn from(c: CommonArgs) -> LogConfig {
        let verbosity = if c.quiet {
            Level::Warning
        } else {
            match c.verbose {
                0 => Level::Info,
                1 => Level::Debug,
                _ => Level::Trace,
            }
        };
        let file = c.logdir.map(|dir| {
            let mut fc = FileConfig::new(dir);
            fc.mkdir = true;
            fc
        });
        LogConfig {
            verbosity: verbosity,
            file: file,
            ..LogConfig::default()
        }
    }
}

#[derive(StructOpt, Debug)]
enum Command {
    #[structopt(name = "parse", about = "Parses every sentence of a CoNLL file")]
    Parse(Parse),
    #[structopt(name = "validate", about = "Compares sampled parses against the full corpus")]
    Validate(Validate),
}

#[derive(StructOpt, Debug)]
struct Parse {
    /// A CoNLL-X file of tagged sentences
    #[structopt(name = "INPUT", parse(from_os_str))]
    input: PathBuf,
    /// Parsing algorithm: projective, greedy or arcstandard
    #[structopt(long = "algorithm", default_value = "projective")]
    algorithm: Algorithm,
    /// Pretty-print the JSON output
    #[structopt(long = "pretty")]
    pretty: bool,
}

#[derive(StructOpt, Debug)]
struct Validate {
    /// A CoNLL-X file of tagged sentences
    #[structopt(name = "INPUT", parse(from_os_str))]
    input: PathBuf,
    /// Parsing algorithm: projective, greedy or arcstandard
    #[structopt(long = "algorithm", default_value = "projective")]
    algorithm: Algorithm,
    /// Comma-separated sample fractions of the corpus
    #[structopt(long = "fractions", use_delimiter = true, default_value = "0.1,0.25,0.5,0.75,0.9")]
    fractions: Vec<f64>,
    /// Number of trials per fraction
    #[structopt(long = "runs", default_value = "5")]
    runs: usize,
    /// Seed of the sampler (defaults to the SEED environment variable)
    #[structopt(long = "seed")]
    seed: Option<u64>,
    /// Pretty-print the JSON output
    #[structopt(long = "pretty")]
    pretty: bool,
}

fn output_format(pretty: bool) -> Format {
    if pretty {
        Format::JsonPretty
    } else {
        Format::Json
    }
}

fn parse(c: &Parse, logger: &Logger) -> Result<(), Box<dyn Error + Send + Sync>> {
    let dataset = conll::load(&c.input)?;
    info!(logger, "loaded {} sentences from {}", dataset.len(), c.input.display());
    let stdout = std_io::stdout();
    let mut writer = Serializer::<_, ParseGraph>::new(stdout.lock(), output_format(c.pretty));
    for sentence in dataset.iter() {
        let graph = syntax::parse(c.algorithm, sentence);
        writer.write(&[graph])?;
    }
    writer.flush()?;
    Ok(())
}

fn validate(c: &Validate, logger: &Logger) -> Result<(), Box<dyn Error + Send + Sync>> {
    let dataset = conll::load(&c.input)?;
    info!(logger, "loaded {} sentences from {}", dataset.len(), c.input.display());
    let mut config = Config::from_env()?;
    if c.seed.is_some() {
        config.seed = c.seed;
    }
    let report = Validator::new(config)
        .logger(logger.new(o!("command" => "validate")))
        .run(dataset.items(), &c.fractions, c.runs, c.algorithm);
    match report.smallest_acceptable_fraction() {
        Some(f) => info!(logger, "smallest acceptable fraction: {}", f),
        None => warn!(logger, "no sample fraction was structurally acceptable"),
    }
    let stdout = std_io::stdout();
    let mut writer =
        Serializer::<_, ValidationReport>::new(stdout.lock(), output_format(c.pretty));
    writer.write(&[report])?;
    writer.flush()?;
    Ok(())
}

fn main() {
    let args = Args::from_args();
    let code = match AppLogger::new(args.common.clone()) {
        Ok(app_logger) => {
            let logger = app_logger.create();
            debug!(logger, "args: {:?}", args);
            let result = match args.command {
                Command::Parse(ref c) => parse(c, &logger),
                Command::Validate(ref c) => validate(c, &logger),
            };
            let code = match result {
                Ok(()) => 0,
                Err(e) => {
                    error!(logger, "{}", e);
                    1
                }
            };
            info!(logger, "application finished (code: {})", code);
            drop(logger);
            drop(app_logger);
            code
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };
    process::exit(code);
}
