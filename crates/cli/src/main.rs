use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use fmtimports_core::{
    format_report, format_source, CategoryPolicy, FormatEngine, FormatError, Language,
    OutputFormat, RunConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fmtimports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite JavaScript/TypeScript import blocks into a canonical grouped layout")]
#[command(long_about = "A Rust-based tool that reorders and regroups the import statements at the \
    top of JavaScript/TypeScript files. Imports are classified against a configurable policy \
    (named package first, then absolute, custom prefix buckets and relative imports), sorted \
    within each group and re-emitted as blocks separated by blank lines. Supports JavaScript \
    (.js, .mjs, .cjs, .jsx) and TypeScript (.ts, .tsx) files.\n\n\
    By default files are rewritten in place. Use --check to only report files that would change.")]
pub struct Args {
    /// File or directory to format
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Report files that need rewriting without modifying anything
    #[arg(long)]
    pub check: bool,

    /// Print the formatted source of a single file to stdout instead of writing
    #[arg(long)]
    pub stdout: bool,

    /// Classification policy file (TOML, JSON or YAML)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Summary)]
    pub format: OutputFormatArg,

    /// Report file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only format specific language
    #[arg(long, value_enum)]
    pub language: Option<LanguageFilter>,

    /// Additional ignore patterns (gitignore style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Ignore file path (defaults to .gitignore)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Only report files that produced warnings
    #[arg(long)]
    pub warnings_only: bool,

    /// Only report files whose import block needed rewriting
    #[arg(long)]
    pub changed_only: bool,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Parallel threads (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LanguageFilter {
    JavaScript,
    TypeScript,
    Tsx,
    /// Alias for JS + TS + TSX
    Node,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load policy
    let policy = match args.policy {
        Some(ref path) => CategoryPolicy::from_file(path)
            .with_context(|| format!("failed to load policy from {}", path.display()))?,
        None => CategoryPolicy::default(),
    };

    // Single-file stdout mode
    if args.stdout {
        return format_to_stdout(&args, &policy);
    }

    // Convert language filter
    let language_filter = args.language.map(|l| match l {
        LanguageFilter::JavaScript => vec![Language::JavaScript],
        LanguageFilter::TypeScript => vec![Language::TypeScript],
        LanguageFilter::Tsx => vec![Language::Tsx],
        LanguageFilter::Node => vec![Language::JavaScript, Language::TypeScript, Language::Tsx],
    });

    // Build config
    let mut config = RunConfig::new(args.path.clone())
        .with_ignore_patterns(args.ignore.clone())
        .with_check(args.check)
        .with_threads(args.threads);

    if let Some(languages) = language_filter {
        config = config.with_language_filter(languages);
    }

    if let Some(ignore_file) = args.ignore_file {
        config = config.with_ignore_file(ignore_file);
    }

    // Show progress if verbose
    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Formatting imports...");
        Some(pb)
    } else {
        None
    };

    // Create engine and run
    let engine = FormatEngine::new(config, policy)?;
    let report = engine.run()?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Processed {} files in {}ms",
            report.stats.total_files, report.metadata.duration_ms
        ));
    }

    // Apply filters
    let filtered_report = if args.warnings_only {
        report.filter_to_warnings()
    } else if args.changed_only {
        report.filter_to_changed()
    } else {
        report.clone()
    };

    // Format report
    let output = format_report(&filtered_report, args.format.into())?;

    // Write report
    if let Some(path) = args.output {
        fs::write(&path, &output)?;
        if args.verbose {
            eprintln!("Report written to: {}", path.display());
        }
    } else {
        println!("{}", output);
    }

    // Check mode fails when any file still needs rewriting
    if args.check && report.stats.changed_files > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn format_to_stdout(args: &Args, policy: &CategoryPolicy) -> anyhow::Result<()> {
    if !args.path.is_file() {
        bail!("--stdout requires a single file, got {}", args.path.display());
    }

    let ext = args
        .path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let Some(language) = Language::from_extension(&ext) else {
        bail!("unsupported file extension: {}", args.path.display());
    };

    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    match format_source(&content, language, policy) {
        Ok(result) => {
            for warning in &result.warnings {
                eprintln!("warning: {}: {:?}", warning.specifier, warning.kind);
            }
            print!("{}", result.source);
        }
        // A file without imports passes through unchanged
        Err(FormatError::NoImportsFound) => print!("{}", content),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
