use crate::{Error, Result};
use simple_fs::{SPath, list_files};

const TF_GLOBS: &[&str] = &["**/*.tf"];

/// Lists every `.tf` file under `root`, recursively, sorted by path.
pub fn find_tf_files(root: impl Into<SPath>) -> Result<Vec<SPath>> {
	let root = root.into();

	if !root.exists() {
		return Err(Error::DirNotFound { path: root.to_string() });
	}
	if !root.is_dir() {
		return Err(Error::NotADirectory { path: root.to_string() });
	}

	let mut files: Vec<SPath> = list_files(&root, Some(TF_GLOBS), None)
		.map_err(Error::simple_fs)?
		.into_iter()
		.map(|file| SPath::new(file.path().as_str()))
		.filter(|path| path.as_str().ends_with(".tf"))
		.collect();
	files.sort_by(|a, b| a.as_str().cmp(b.as_str()));

	Ok(files)
}

// region:    --- Tests


// endregion: --- Tests
