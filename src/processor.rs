use crate::{
	Error, FileStatus, ProcessOptions, ProcessStatus, Result, Stats, find_tf_files, format_hcl, locate_blocks,
	normalize_blank_lines, splice,
};
use simple_fs::SPath;
use std::fs;
use tracing::{debug, info, warn};

/// The transformed content of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
	pub content: Vec<u8>,
	pub blocks_removed: usize,
	/// Blocks were removed, or formatting alone changed the bytes.
	pub modified: bool,
}

/// What `process_file` did with one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
	pub blocks_removed: usize,
	pub modified: bool,
	pub written: bool,
}

/// Result of a directory run.
#[derive(Debug, Clone)]
pub struct ProcessReport {
	pub files: Vec<SPath>,
	pub status: ProcessStatus,
	pub stats: Stats,
}

/// Runs locate, splice, format, normalize on `source` without touching the disk.
///
/// `file_label` only identifies the source in parse errors.
pub fn compute_edit(file_label: &str, source: &[u8], options: &ProcessOptions) -> Result<EditResult> {
	let ranges = locate_blocks(file_label, source, &options.block_type)?;
	let blocks_removed = ranges.len();

	let mut content = if blocks_removed > 0 {
		format_hcl(&splice(source, &ranges))
	} else {
		format_hcl(source)
	};

	// Formatting-only changes never trigger normalization.
	if blocks_removed > 0 && options.normalize_whitespace {
		content = normalize_blank_lines(&content);
	}

	let modified = blocks_removed > 0 || content != source;

	Ok(EditResult {
		content,
		blocks_removed,
		modified,
	})
}

/// Processes one file in place and reports into `stats`.
///
/// On error nothing was written and only `files_processed` may have moved
/// (a file counts as processed once it parsed).
pub fn process_file(path: &SPath, options: &ProcessOptions, stats: &mut Stats) -> Result<FileOutcome> {
	debug!("Processing: {path}");

	let source = fs::read(path.std_path()).map_err(|err| Error::io_read_file(path.as_str(), err))?;
	let edit = compute_edit(path.as_str(), &source, options)?;
	stats.record_processed();

	if !edit.modified {
		return Ok(FileOutcome {
			blocks_removed: 0,
			modified: false,
			written: false,
		});
	}

	let written = !options.dry_run;
	if written {
		fs::write(path.std_path(), &edit.content).map_err(|err| Error::io_write_file(path.as_str(), err))?;
	}
	stats.record_modified(edit.blocks_removed);

	info!(
		path = %path,
		blocks_removed = edit.blocks_removed,
		dry_run = options.dry_run,
		"file modified"
	);

	Ok(FileOutcome {
		blocks_removed: edit.blocks_removed,
		modified: true,
		written,
	})
}

/// Processes every file, one after the other. A failing file is logged right
/// away, recorded in the returned status, and the run moves on to the next one.
pub fn process_files(files: &[SPath], options: &ProcessOptions, stats: &mut Stats) -> ProcessStatus {
	let mut items = Vec::with_capacity(files.len());

	for file in files {
		let mut info = FileStatus::from(file);

		match process_file(file, options, stats) {
			Ok(outcome) => {
				info.success = true;
				info.modified = outcome.modified;
				info.blocks_removed = outcome.blocks_removed;
			}
			Err(err) => {
				warn!("Error processing {file}: {err}");
				info.error_msg = Some(err.to_string());
			}
		}

		items.push(info);
	}

	ProcessStatus { items }
}

/// Finds all `.tf` files under `root` and processes them.
pub fn process_dir(root: impl Into<SPath>, options: &ProcessOptions) -> Result<ProcessReport> {
	let mut stats = Stats::new(options);
	let files = find_tf_files(root)?;

	let status = process_files(&files, options, &mut stats);
	stats.finish();

	Ok(ProcessReport { files, status, stats })
}

// region:    --- Tests


// endregion: --- Tests
