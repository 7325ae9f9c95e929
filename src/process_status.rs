use simple_fs::SPath;

/// Outcome of one batch run, one entry per input file in input order.
#[derive(Debug, Clone, Default)]
pub struct ProcessStatus {
	pub items: Vec<FileStatus>,
}

#[derive(Debug, Clone)]
pub struct FileStatus {
	pub file_path: String,
	pub success: bool,
	pub modified: bool,
	pub blocks_removed: usize,
	pub error_msg: Option<String>,
}

impl FileStatus {
	pub fn file_path(&self) -> &str {
		&self.file_path
	}

	pub fn error_msg(&self) -> Option<&str> {
		self.error_msg.as_deref()
	}
}

impl ProcessStatus {
	pub fn failures(&self) -> impl Iterator<Item = &FileStatus> {
		self.items.iter().filter(|item| !item.success)
	}

	pub fn has_failures(&self) -> bool {
		self.failures().next().is_some()
	}
}

// region:    --- Froms

impl From<&SPath> for FileStatus {
	fn from(path: &SPath) -> Self {
		Self {
			file_path: path.to_string(),
			success: false,
			modified: false,
			blocks_removed: 0,
			error_msg: None,
		}
	}
}

// endregion: --- Froms
