// build.rs - bakes the limits from config/<profile>.toml into the binary
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Limits {
    file_processing: FileProcessing,
    lexical: Lexical,
    syntax: Syntax,
    logging: Logging,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FileProcessing {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Lexical {
    max_identifier_length: usize,
    max_token_count: usize,
    max_comment_length: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Syntax {
    max_parse_depth: usize,
    max_expression_depth: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Logging {
    log_buffer_size: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
    max_error_collection: usize,
}

/// Each nested block costs a few stack frames in the recursive parser
const PARSE_DEPTH_CEILING: usize = 4_096;
const FILE_SIZE_CEILING: u64 = 1_000_000_000;

fn main() {
    if let Err(message) = run() {
        panic!("minic_compiler build: {}", message);
    }
}

fn run() -> Result<(), String> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MINIC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=MINIC_CONFIG_DIR");

    let profile = env::var("MINIC_BUILD_PROFILE").unwrap_or_else(|_| "development".into());
    let config_dir = env::var("MINIC_CONFIG_DIR").unwrap_or_else(|_| "config".into());
    let path = profile_path(&config_dir, &profile)?;
    println!("cargo:rerun-if-changed={}", path.display());

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let limits: Limits =
        toml::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?;

    let problems = check(&limits, &profile);
    if !problems.is_empty() {
        return Err(format!(
            "profile '{}' has invalid limits:\n  {}",
            profile,
            problems.join("\n  ")
        ));
    }

    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR: {}", e))?;
    let target = Path::new(&out_dir).join("constants.rs");
    fs::write(&target, render(&limits, &profile))
        .map_err(|e| format!("cannot write {}: {}", target.display(), e))
}

/// Profiles live in the workspace root, next to this crate's directory
fn profile_path(config_dir: &str, profile: &str) -> Result<PathBuf, String> {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").map_err(|e| format!("CARGO_MANIFEST_DIR: {}", e))?;
    let root = Path::new(&manifest_dir)
        .parent()
        .ok_or("crate has no parent directory")?;

    let path = root.join(config_dir).join(format!("{}.toml", profile));
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("no limits file at {}", path.display()))
    }
}

fn check(limits: &Limits, profile: &str) -> Vec<String> {
    let files = &limits.file_processing;
    let rules = [
        (files.max_file_size <= FILE_SIZE_CEILING, "max_file_size above 1 GB"),
        (
            files.large_file_threshold <= files.max_file_size,
            "large_file_threshold above max_file_size",
        ),
        (
            (1..=PARSE_DEPTH_CEILING).contains(&limits.syntax.max_parse_depth),
            "max_parse_depth outside 1..=4096",
        ),
        (
            (1..=PARSE_DEPTH_CEILING).contains(&limits.syntax.max_expression_depth),
            "max_expression_depth outside 1..=4096",
        ),
        (
            limits.lexical.max_identifier_length > 0 && limits.lexical.max_token_count > 0,
            "lexical limits must be positive",
        ),
        (
            limits.logging.max_log_events_per_file <= limits.logging.log_buffer_size,
            "max_log_events_per_file above log_buffer_size",
        ),
        (
            profile != "production" || files.max_file_size <= 50_000_000,
            "production max_file_size above 50 MB",
        ),
    ];

    rules
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, problem)| problem.to_string())
        .collect()
}

fn render(limits: &Limits, profile: &str) -> String {
    let groups: [(&str, Vec<(&str, &str, String)>); 4] = [
        (
            "file_processing",
            vec![
                ("MAX_FILE_SIZE", "u64", limits.file_processing.max_file_size.to_string()),
                (
                    "LARGE_FILE_THRESHOLD",
                    "u64",
                    limits.file_processing.large_file_threshold.to_string(),
                ),
                ("MAX_LINE_COUNT", "usize", limits.file_processing.max_line_count.to_string()),
            ],
        ),
        (
            "lexical",
            vec![
                (
                    "MAX_IDENTIFIER_LENGTH",
                    "usize",
                    limits.lexical.max_identifier_length.to_string(),
                ),
                ("MAX_TOKEN_COUNT", "usize", limits.lexical.max_token_count.to_string()),
                ("MAX_COMMENT_LENGTH", "usize", limits.lexical.max_comment_length.to_string()),
            ],
        ),
        (
            "syntax",
            vec![
                ("MAX_PARSE_DEPTH", "usize", limits.syntax.max_parse_depth.to_string()),
                (
                    "MAX_EXPRESSION_DEPTH",
                    "usize",
                    limits.syntax.max_expression_depth.to_string(),
                ),
            ],
        ),
        (
            "logging",
            vec![
                ("LOG_BUFFER_SIZE", "usize", limits.logging.log_buffer_size.to_string()),
                (
                    "MAX_LOG_EVENTS_PER_FILE",
                    "usize",
                    limits.logging.max_log_events_per_file.to_string(),
                ),
                (
                    "MAX_LOG_MESSAGE_LENGTH",
                    "usize",
                    limits.logging.max_log_message_length.to_string(),
                ),
                (
                    "MAX_ERROR_COLLECTION",
                    "usize",
                    limits.logging.max_error_collection.to_string(),
                ),
            ],
        ),
    ];

    let mut out = format!("// Generated by build.rs from the '{}' profile\n\n", profile);
    out.push_str("pub mod compile_time {\n");
    for (module, constants) in &groups {
        let _ = writeln!(out, "    pub mod {} {{", module);
        for (name, ty, value) in constants {
            let _ = writeln!(out, "        pub const {}: {} = {};", name, ty, value);
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}
