use super::TestResult;
use simple_fs::SPath;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn new_out_dir_path(prefix: &str) -> TestResult<SPath> {
	let now_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
	let dir = PathBuf::from("tests/.out").join(format!("{prefix}_{now_ms}"));
	std::fs::create_dir_all(&dir)?;
	let dir = SPath::try_from(dir)?;

	Ok(dir)
}

/// Writes `content` to `dir/name` (creating parent dirs) and returns the file path.
pub fn write_file(dir: &SPath, name: &str, content: &str) -> TestResult<SPath> {
	let path = dir.join(name);
	if let Some(parent) = path.std_path().parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path.std_path(), content)?;

	Ok(path)
}

pub fn read_file(path: &SPath) -> TestResult<String> {
	Ok(std::fs::read_to_string(path.std_path())?)
}

/// Longest run of consecutive blank lines between non-blank lines.
pub fn max_blank_run(content: &str) -> usize {
	let mut max = 0;
	let mut run = 0;
	for line in content.lines() {
		if line.trim().is_empty() {
			run += 1;
		} else {
			max = max.max(run);
			run = 0;
		}
	}
	max
}

/// Number of blank lines after the last non-blank line.
pub fn trailing_blank_lines(content: &str) -> usize {
	content.split('\n').rev().take_while(|line| line.trim().is_empty()).count()
}
