//! uijar-doc: generate component API documentation from TypeScript sources.
//!
//! `uijar-doc src/app -o docs/api.json --root-dir src/app`

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uijar::render::{self, Report};
use uijar::syntax::{parse_source, Program};
use uijar::{Options, OverridePolicy, SourceParser};

#[derive(Parser)]
#[command(
    name = "uijar-doc",
    about = "Generate API documentation for Angular components from TypeScript sources"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Directory reported file names are relative to
    #[arg(long, default_value = "./")]
    root_dir: String,

    /// Prefix for navigation link paths
    #[arg(long, default_value = "")]
    url_prefix: String,

    /// Decorator that registers a component. Repeatable.
    #[arg(long = "component-decorator", default_values_t = vec!["Component".to_string()])]
    component_decorators: Vec<String>,

    /// Decorator that registers a module with `declarations`. Repeatable.
    #[arg(long = "module-decorator", default_values_t = vec!["NgModule".to_string()])]
    module_decorators: Vec<String>,

    /// How inherited members redeclared by a subclass are reported
    #[arg(long, value_enum, default_value_t = OverridePolicy::Concatenate)]
    override_policy: OverridePolicy,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let renderer = render::create_renderer(&cli.format)?;
    let input_files = expand_globs(&cli.files)?;
    tracing::info!(files = input_files.len(), "analyzing");

    let mut sources = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match parse_source(&path.to_string_lossy(), &content) {
            Ok(file) => sources.push(file),
            Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
        }
    }
    let program = Program::new(sources);

    let options = Options {
        root_dir: cli.root_dir.clone(),
        files: Vec::new(),
        component_decorators: cli.component_decorators.clone(),
        module_decorators: cli.module_decorators.clone(),
        override_policy: cli.override_policy,
    };
    let docs = SourceParser::new(options, &program)
        .project_source_documentation()
        .context("failed to build documentation")?;

    let output = renderer.render(&Report::new(&docs, &cli.url_prefix))?;

    match cli.output {
        Some(ref path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create directory: {}", dir.display()))?;
            }
            fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write stdout")?,
    }

    Ok(())
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts"];

/// Expand files, directories (recursively) and glob patterns into a sorted
/// list of real file paths.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let pattern = if path.is_dir() {
            directory_pattern(pattern)
        } else {
            pattern.clone()
        };
        let matches: Vec<_> = glob::glob(&pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn directory_pattern(dir: &str) -> String {
    format!("{}/**/*.ts", dir.trim_end_matches(['/', '\\']))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
