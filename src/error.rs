use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	// -- Scan
	#[display("Directory not found: '{path}'")]
	DirNotFound { path: String },

	#[display("Not a directory: '{path}'")]
	NotADirectory { path: String },

	// -- File
	#[display("Error reading file '{path}'. Cause: {cause}")]
	ReadFile { path: String, cause: std::io::Error },

	#[display("Error writing file '{path}'. Cause: {cause}")]
	WriteFile { path: String, cause: std::io::Error },

	// -- Hcl
	#[display("Error parsing '{path}': {diagnostic}")]
	Parse { path: String, diagnostic: String },

	// -- Externals
	#[from]
	SimpleFs(simple_fs::Error),
}

// region:    --- Constructors

impl Error {
	pub fn io_read_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::ReadFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_write_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::WriteFile {
			path: path.into(),
			cause,
		}
	}

	pub fn parse(path: impl Into<String>, diagnostic: impl std::fmt::Display) -> Self {
		Self::Parse {
			path: path.into(),
			diagnostic: diagnostic.to_string(),
		}
	}

	pub fn simple_fs(err: simple_fs::Error) -> Self {
		Self::SimpleFs(err)
	}

	/// True for the per-file failure kinds (read, parse, write).
	pub fn is_file_error(&self) -> bool {
		matches!(
			self,
			Self::ReadFile { .. } | Self::WriteFile { .. } | Self::Parse { .. }
		)
	}
}

// endregion: --- Constructors

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
