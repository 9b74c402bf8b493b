use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ModelError;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
///
/// # Errors
/// Any I/O failure is reported as `ModelError::SourceUnavailable`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, ModelError> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| ModelError::SourceUnavailable { path: path.to_path_buf(), source })?;
	Ok(contents.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_is_source_unavailable() {
		let err = read_file("does/not/exist.txt").unwrap_err();
		assert!(matches!(err, ModelError::SourceUnavailable { .. }));
		assert!(err.to_string().contains("does/not/exist.txt"));
	}

	#[test]
	fn reads_lines() {
		let path = std::env::temp_dir().join("wordgen_io_read_lines.txt");
		std::fs::write(&path, "cat\r\ncar\ncan\n").unwrap();
		let lines = read_file(&path).unwrap();
		assert_eq!(lines, vec!["cat", "car", "can"]);
		let _ = std::fs::remove_file(&path);
	}
}
