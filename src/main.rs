use clap::{Parser as ClapParser, Subcommand};
use schema_query::EvalLimits;
use schema_query::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sq")]
#[command(about = "sq - check JSON records against schema-guided queries")]
#[command(version)]
struct Cli {
    /// TOML file with evaluator limits (max_depth, max_path_len)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the maximum query nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a JSON record matches a query
    Check {
        /// The query, as JSON (e.g. '["eq", ["resolve", "id"], "abc"]')
        query: String,

        /// JSON-Schema file describing the record
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Only decode the query, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the raw value a query evaluates to
    Eval {
        /// The query, as JSON
        query: String,

        /// JSON-Schema file describing the record
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sq docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_limits(cli.config.as_ref(), cli.max_depth).and_then(|limits| {
        match cli.command {
            Commands::Check {
                query,
                schema,
                input,
                syntax_only,
            } => run_check(query, schema, input, syntax_only, limits),
            Commands::Eval {
                query,
                schema,
                input,
                pretty,
            } => run_eval(query, schema, input, pretty, limits),
            Commands::Docs => {
                print!("{}", cli::get_docs_overview());
                Ok(())
            }
            Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
                print!("{}", content);
            }),
        }
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_limits(config: Option<&PathBuf>, max_depth: Option<usize>) -> Result<EvalLimits, CliError> {
    let limits = match config {
        Some(path) => EvalLimits::from_file(path)?,
        None => EvalLimits::default(),
    };
    Ok(match max_depth {
        Some(depth) => limits.with_max_depth(depth),
        None => limits,
    })
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    query: String,
    schema: Option<PathBuf>,
    input: Option<String>,
    syntax_only: bool,
    limits: EvalLimits,
) -> Result<(), CliError> {
    let (schema, input) = if syntax_only {
        (String::new(), None)
    } else {
        let path = schema.ok_or(CliError::MissingSchema)?;
        (std::fs::read_to_string(path)?, read_input(input)?)
    };

    let options = CheckOptions {
        query,
        schema,
        input,
        raw: false,
        syntax_only,
        limits,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("Syntax is valid: {}", canonical),
        CheckResult::Matched(matched) => println!("{}", matched),
        CheckResult::Evaluated(value) => println!("{}", value),
    }
    Ok(())
}

fn run_eval(
    query: String,
    schema: PathBuf,
    input: Option<String>,
    pretty: bool,
    limits: EvalLimits,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query,
        schema: std::fs::read_to_string(schema)?,
        input: read_input(input)?,
        raw: true,
        syntax_only: false,
        limits,
    };

    if let CheckResult::Evaluated(value) = cli::execute_check(&options)? {
        let json = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }?;
        println!("{}", json);
    }
    Ok(())
}
