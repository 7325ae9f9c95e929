use clap::Parser;
use removed_remover::{ProcessOptions, Stats, find_tf_files, process_files};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Recursively scans Terraform files, removes all `removed` blocks,
/// and applies standard Terraform formatting to the files.
#[derive(Debug, Parser)]
#[command(name = "removed-remover", version, about)]
struct Cli {
	/// Directory to scan. Defaults to the current directory.
	#[arg(default_value = ".")]
	directory: PathBuf,

	/// Run without modifying files
	#[arg(long)]
	dry_run: bool,

	/// Normalize whitespace after removing removed blocks
	#[arg(long)]
	normalize_whitespace: bool,

	/// Enable verbose output
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let options = ProcessOptions::default()
		.with_dry_run(cli.dry_run)
		.with_normalize_whitespace(cli.normalize_whitespace);

	let root = cli.directory.to_string_lossy().to_string();
	println!("Scanning directory: {root}");

	let mut stats = Stats::new(&options);
	let files = match find_tf_files(root.as_str()) {
		Ok(files) => files,
		Err(err) => {
			eprintln!("Error finding Terraform files: {err}");
			return ExitCode::FAILURE;
		}
	};
	println!("Found {} Terraform files", files.len());

	// Per-file errors are logged by `process_files` as they happen.
	let status = process_files(&files, &options, &mut stats);
	stats.finish();

	println!("\n{stats}");
	if status.has_failures() {
		println!("Files with errors: {}", status.failures().count());
		for item in status.failures() {
			println!("  - {}", item.file_path());
		}
	}

	ExitCode::SUCCESS
}

// region:    --- Support

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	// Ignore a second init (subscriber already set by the host).
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

// endregion: --- Support
