//! Reading the source file. Failures here are file errors, never lexical
//! or syntax ones.

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes::{self, file_processing};
use std::path::Path;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Read a file with preferences taken from the environment
pub fn process_file(
    file_path: impl AsRef<Path>,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::from_preferences(&FileProcessorPreferences::default()).process_file(file_path)
}

pub fn init_file_processor_logging() -> Result<(), String> {
    for code in [
        file_processing::FILE_NOT_FOUND,
        file_processing::PERMISSION_DENIED,
        file_processing::FILE_TOO_LARGE,
        file_processing::INVALID_ENCODING,
        file_processing::IO_ERROR,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("File error code {} has no metadata", code));
        }
    }

    crate::log_debug!("File limits loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");
        fs::write(&file_path, "void main(){}\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.source, "void main(){}\n");
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_threshold_below_limit() {
        assert!(LARGE_FILE_THRESHOLD <= MAX_FILE_SIZE);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
