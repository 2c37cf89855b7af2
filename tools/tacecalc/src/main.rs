use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tace_factors::PatientInput;
use tacecalc::{
    factors_report, load_engine, parse_assignment, parse_document, project_report, read_input,
    CliError, OutputFormat, ReportOptions,
};

#[derive(Debug, Parser)]
#[command(
    name = "tacecalc",
    version,
    about = "Projects survival with and without TACE from eight clinical risk factors",
    long_about = "tacecalc scores a patient on eight categorical risk factors and projects\n\
        survival time and 3/5-year survival rates with and without TACE.\n\n\
        This is an illustrative fixed-coefficient formula, not a validated clinical model.\n\n\
        EXAMPLES:\n\
        \n  tacecalc project patient.json                 Project from a JSON file\n\
        \n  tacecalc project --format json < patient.json Read stdin, print JSON\n\
        \n  tacecalc project --lenient --set childPugh=B  Score a partial selection\n\
        \n  tacecalc factors                              List factors and weights"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project survival for one patient
    #[command(
        about = "Project survival for one patient",
        long_about = "Reads a JSON object of factor selections, e.g.\n\
            {\"portalHypertension\": \"no\", \"tumorNumber\": \"2\", ...}\n\
            from FILE or stdin and prints the projection.\n\n\
            Unknown keys and values are ignored. All eight factors are required\n\
            unless --lenient is given."
    )]
    Project(ProjectArgs),

    /// List factors, accepted values and their weights
    Factors(FactorsArgs),
}

#[derive(Debug, Args, Clone)]
struct ProjectArgs {
    /// JSON input file (reads from stdin if not provided and no --set is given)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Factor selection as key=value, applied over the input document
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// JSON coefficient set replacing the built-in tables
    #[arg(long, value_name = "FILE")]
    coefficients: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Score even when some factors are missing
    #[arg(long)]
    lenient: bool,

    /// Include the per-factor breakdown of the risk score
    #[arg(long)]
    explain: bool,
}

#[derive(Debug, Args, Clone)]
struct FactorsArgs {
    /// JSON coefficient set replacing the built-in tables
    #[arg(long, value_name = "FILE")]
    coefficients: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn run_project(args: &ProjectArgs) -> Result<String, CliError> {
    let engine = load_engine(args.coefficients.as_deref())?;

    let mut pairs = if args.input.is_none() && !args.set.is_empty() {
        Vec::new()
    } else {
        parse_document(&read_input(args.input.as_deref())?)?
    };
    for assignment in &args.set {
        pairs.push(parse_assignment(assignment)?);
    }
    let input = PatientInput::from_pairs(pairs);

    let options = ReportOptions {
        format: args.format,
        lenient: args.lenient,
        explain: args.explain,
    };
    project_report(&engine, &input, &options)
}

fn run_factors(args: &FactorsArgs) -> Result<String, CliError> {
    let engine = load_engine(args.coefficients.as_deref())?;
    factors_report(engine.coefficients(), args.format)
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Project(args) => run_project(args),
        Command::Factors(args) => run_factors(args),
    };

    match result {
        Ok(out) => {
            print!("{out}");
            if !out.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            let rc = e.exit_code();
            log::info!("exiting with code {rc}");
            rc
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
