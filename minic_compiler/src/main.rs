use clap::Parser;
use minic_compiler::config::{self, RuntimeConfig};
use minic_compiler::logging::{self, LogLevel};
use minic_compiler::pipeline::{self, PipelineError, PipelineOutput};
use minic_compiler::utils::SourceMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Check a MiniC program for lexical and syntax errors
#[derive(Debug, Parser)]
#[command(name = "minic", version)]
struct Cli {
    /// Source file to check
    #[arg(default_value = "input.txt")]
    file: PathBuf,

    /// Print every token as the parser accepts it
    #[arg(long)]
    echo: bool,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log to the console at this level (error, warn, info, debug)
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Print the compiled-in limits and runtime preferences, then exit
    #[arg(long)]
    show_config: bool,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn main() {
    let cli = Cli::parse();

    let mut runtime = RuntimeConfig::from_env();
    if let Some(level) = cli.log_level {
        runtime.logging.min_log_level = level;
        runtime.logging.enable_console_logging = true;
    }
    if cli.echo {
        runtime.syntax.echo_consumed_tokens = true;
    }

    if cli.show_config {
        show_config(&runtime);
        return;
    }

    if let Err(message) = init_logging(&runtime) {
        eprintln!("Internal Error: {}", message);
        std::process::exit(4);
    }

    let outcome = pipeline::process_file_with_config(&cli.file, &runtime);

    if cli.json {
        let output = PipelineOutput::from_outcome(&cli.file.display().to_string(), &outcome);
        match output.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Internal Error: {}", e);
                std::process::exit(4);
            }
        }
    } else {
        match &outcome {
            Ok(_) => println!("Code is syntactically correct."),
            Err(error) => report_error(&cli.file, error),
        }
    }

    logging::print_cargo_style_summary();

    if let Err(error) = outcome {
        std::process::exit(error.exit_code());
    }
}

fn init_logging(runtime: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()
}

fn show_config(runtime: &RuntimeConfig) {
    println!("{}", config::limits_summary());
    println!("{}", config::build_info::source_info());
    match runtime.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to render runtime preferences: {}", e),
    }
}

/// The one-line diagnostic, then an excerpt of the offending line if the
/// file can still be read
fn report_error(file: &Path, error: &PipelineError) {
    let diagnostic = error.diagnostic();
    println!("{}", diagnostic.headline());

    let Some(span) = error.span() else {
        return;
    };
    if let Ok(source) = fs::read_to_string(file) {
        let source_map = SourceMap::new(source);
        eprint!("{}", source_map.format_error(&span, &diagnostic.message));
    }
}
