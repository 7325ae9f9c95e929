/// Block type the tool removes.
pub const REMOVED_BLOCK_TYPE: &str = "removed";

/// Settings for one processing run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
	/// Compute everything, write nothing.
	pub dry_run: bool,
	/// Collapse blank-line runs left behind by removed blocks.
	pub normalize_whitespace: bool,
	pub block_type: String,
}

impl Default for ProcessOptions {
	fn default() -> Self {
		Self {
			dry_run: false,
			normalize_whitespace: false,
			block_type: REMOVED_BLOCK_TYPE.to_string(),
		}
	}
}

impl ProcessOptions {
	pub fn with_dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}

	pub fn with_normalize_whitespace(mut self, normalize_whitespace: bool) -> Self {
		self.normalize_whitespace = normalize_whitespace;
		self
	}
}
