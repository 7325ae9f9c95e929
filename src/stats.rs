use crate::ProcessOptions;
use std::fmt;
use std::time::{Duration, Instant};

/// Run-wide counters, updated once per processed file.
#[derive(Debug, Clone)]
pub struct Stats {
	pub files_processed: usize,
	pub files_modified: usize,
	pub removed_blocks_removed: usize,
	pub dry_run: bool,
	pub normalize_whitespace: bool,
	pub started_at: Instant,
	pub ended_at: Option<Instant>,
}

impl Stats {
	pub fn new(options: &ProcessOptions) -> Self {
		Self {
			files_processed: 0,
			files_modified: 0,
			removed_blocks_removed: 0,
			dry_run: options.dry_run,
			normalize_whitespace: options.normalize_whitespace,
			started_at: Instant::now(),
			ended_at: None,
		}
	}

	pub fn record_processed(&mut self) {
		self.files_processed += 1;
	}

	pub fn record_modified(&mut self, blocks_removed: usize) {
		self.files_modified += 1;
		self.removed_blocks_removed += blocks_removed;
	}

	pub fn finish(&mut self) {
		self.ended_at = Some(Instant::now());
	}

	/// Time from start to `finish`, or to now while still running.
	pub fn elapsed(&self) -> Duration {
		self.ended_at.unwrap_or_else(Instant::now).duration_since(self.started_at)
	}
}

impl fmt::Display for Stats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Statistics:")?;
		if self.dry_run {
			writeln!(f, "DRY RUN MODE: No files were modified")?;
		}
		writeln!(f, "Files processed: {}", self.files_processed)?;
		writeln!(f, "Files modified: {}", self.files_modified)?;
		writeln!(f, "Removed blocks removed: {}", self.removed_blocks_removed)?;
		write!(f, "Processing time: {:?}", self.elapsed())
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_stats_record_and_display() -> Result<()> {
		// -- Setup & Fixtures
		let mut stats = Stats::new(&ProcessOptions::default().with_dry_run(true));

		// -- Exec
		stats.record_processed();
		stats.record_processed();
		stats.record_modified(3);
		stats.finish();

		// -- Check
		assert_eq!(stats.files_processed, 2);
		assert_eq!(stats.files_modified, 1);
		assert_eq!(stats.removed_blocks_removed, 3);
		let summary = stats.to_string();
		assert!(summary.contains("DRY RUN MODE"));
		assert!(summary.contains("Files modified: 1"));
		assert!(summary.contains("Removed blocks removed: 3"));

		Ok(())
	}
}

// endregion: --- Tests
