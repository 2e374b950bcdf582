use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File has too many lines: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        use codes::file_processing::*;
        match self {
            Self::FileNotFound { .. } => FILE_NOT_FOUND,
            Self::PermissionDenied { .. } => PERMISSION_DENIED,
            // Both are size limits
            Self::FileTooLarge { .. } | Self::TooManyLines { .. } => FILE_TOO_LARGE,
            Self::InvalidEncoding { .. } => INVALID_ENCODING,
            Self::Io { .. } => IO_ERROR,
        }
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io {
                path,
                message: error.to_string(),
            },
        }
    }

    /// Log under this error's code and hand it back for `?`
    fn logged(self, path: &Path) -> Self {
        log_error!(self.error_code(), &self.to_string(), "file" => path.display());
        self
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
}

impl FileMetadata {
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// `"812 B"`, `"1.50 KB"` and so on
    pub fn human_readable_size(&self) -> String {
        let units = ["KB", "MB", "GB"];
        if self.size < 1024 {
            return format!("{} B", self.size);
        }

        let mut size = self.size as f64 / 1024.0;
        let mut unit = 0;
        while size >= 1024.0 && unit + 1 < units.len() {
            size /= 1024.0;
            unit += 1;
        }
        format!("{:.2} {}", size, units[unit])
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

/// Reads one source file under the compiled-in size limits
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    pub enable_performance_logging: bool,
    pub warn_on_large_files: bool,
}

impl FileProcessor {
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            enable_performance_logging: prefs.enable_performance_logging,
            warn_on_large_files: prefs.warn_on_large_files,
        }
    }

    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = file_path.as_ref();
        let started = Instant::now();
        log_debug!("Reading source file", "file" => path.display());

        let size = Self::checked_size(path).map_err(|e| e.logged(path))?;
        let source = Self::read_utf8(path).map_err(|e| e.logged(path))?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            return Err(FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            }
            .logged(path));
        }

        let result = FileProcessingResult {
            source,
            metadata: FileMetadata {
                path: path.to_path_buf(),
                size,
                line_count,
            },
            processing_duration: started.elapsed(),
        };

        if self.warn_on_large_files && result.metadata.is_large_file() {
            log_warning!("Large source file",
                "file" => path.display(),
                "size" => result.metadata.human_readable_size(),
                "threshold_bytes" => LARGE_FILE_THRESHOLD
            );
        }
        self.log_read(&result);

        Ok(result)
    }

    fn checked_size(path: &Path) -> Result<u64, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_io(&e, path))?;

        if !metadata.is_file() {
            return Err(FileProcessorError::Io {
                path: path.display().to_string(),
                message: "not a regular file".to_string(),
            });
        }

        match metadata.len() {
            size if size > MAX_FILE_SIZE => Err(FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            }),
            size => Ok(size),
        }
    }

    fn read_utf8(path: &Path) -> Result<String, FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| FileProcessorError::from_io(&e, path))?;
        String::from_utf8(bytes).map_err(|_| FileProcessorError::InvalidEncoding {
            path: path.display().to_string(),
        })
    }

    fn log_read(&self, result: &FileProcessingResult) {
        let metadata = &result.metadata;
        if self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Source file read",
                "file" => metadata.path.display(),
                "size" => metadata.human_readable_size(),
                "lines" => metadata.line_count,
                "duration_ms" => format!("{:.3}", result.processing_duration.as_secs_f64() * 1000.0)
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Source file read",
                "file" => metadata.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn processor() -> FileProcessor {
        FileProcessor {
            enable_performance_logging: true,
            warn_on_large_files: true,
        }
    }

    #[test]
    fn test_reads_source_and_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "int main(){\n  return 0;\n}\n").unwrap();

        let result = processor().process_file(&path).unwrap();
        assert_eq!(result.metadata.line_count, 3);
        assert_eq!(result.metadata.size, 26);
        assert_eq!(result.metadata.path, path);
        assert!(!result.metadata.is_large_file());
        assert!(result.source.starts_with("int main"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let error = processor()
            .process_file(dir.path().join("absent.txt"))
            .unwrap_err();
        assert_matches!(error, FileProcessorError::FileNotFound { .. });
        assert_eq!(error.error_code(), codes::file_processing::FILE_NOT_FOUND);
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0x69u8, 0x6e, 0x74, 0xff, 0xfe]).unwrap();

        assert_matches!(
            processor().process_file(&path),
            Err(FileProcessorError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let error = processor().process_file(dir.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::Io { .. });
        assert_eq!(error.category(), "FileProcessing");
    }

    #[test]
    fn test_empty_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let result = FileProcessor::default().process_file(&path).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("x"),
            size: 2048,
            line_count: 0,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
        assert_eq!(FileMetadata { size: 12, ..metadata.clone() }.human_readable_size(), "12 B");
        assert_eq!(
            FileMetadata { size: 3 * 1024 * 1024, ..metadata }.human_readable_size(),
            "3.00 MB"
        );
    }
}
