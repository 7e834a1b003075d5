//! File dialogs, file streams, and the file actions built on them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::language::Language;
use crate::surface::{GridSurface, TextSurface};
use crate::widgets::SpreadsheetFormat;

/// A dialog filter. An empty extension list means any file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub description: &'static str,
    pub extensions: &'static [&'static str],
}

pub const SPREADSHEET_FILES: FileFilter = FileFilter {
    description: "Excel workbook",
    extensions: &["xlsx", "xls"],
};

pub const ALL_FILES: FileFilter = FileFilter {
    description: "All files",
    extensions: &[],
};

/// Open/save dialogs. `None` means the user cancelled.
pub trait FilePicker {
    fn pick_open(&mut self, filter: &FileFilter) -> Option<PathBuf>;
    fn pick_save(&mut self, filter: &FileFilter) -> Option<PathBuf>;
}

pub trait FileStreams {
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()>;
    /// Fails if `path` cannot be created or overwritten.
    fn check_writable(&self, path: &Path) -> io::Result<()>;
}

/// [`FileStreams`] over the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileStreams;

impl FileStreams for StdFileStreams {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !fs::metadata(parent)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "parent is not a directory",
            ));
        }
        match fs::metadata(path) {
            Ok(meta) if meta.permissions().readonly() => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file is read-only",
            )),
            Ok(meta) if meta.is_dir() => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path is a directory",
            )),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Failure of an open, save or export. Recovered as a notification.
#[derive(Debug, thiserror::Error)]
pub enum ExternalIoError {
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("access to {} was denied", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("{} is not UTF-8 text", .path.display())]
    NotText { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExternalIoError {
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ExternalIoError::NotFound { path },
            io::ErrorKind::PermissionDenied => ExternalIoError::PermissionDenied { path },
            io::ErrorKind::InvalidData => ExternalIoError::NotText { path },
            _ => ExternalIoError::Io { path, source: err },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExternalIoError::NotFound { path }
            | ExternalIoError::PermissionDenied { path }
            | ExternalIoError::NotText { path }
            | ExternalIoError::Io { path, .. } => path,
        }
    }
}

/// User-invoked file operations on a surface.
///
/// Each action returns `Ok(None)` when the user cancels the dialog.
pub struct FileActions {
    picker: Box<dyn FilePicker>,
    streams: Box<dyn FileStreams>,
}

impl FileActions {
    pub fn new(picker: Box<dyn FilePicker>, streams: Box<dyn FileStreams>) -> Self {
        Self { picker, streams }
    }

    /// Dialogs from `picker`, files from the local file system.
    pub fn local(picker: Box<dyn FilePicker>) -> Self {
        Self::new(picker, Box::new(StdFileStreams))
    }

    /// Replaces the text surface's content with a file. The language follows
    /// the file extension.
    pub fn open(&mut self, surface: &mut TextSurface) -> Result<Option<PathBuf>, ExternalIoError> {
        let Some(path) = self.picker.pick_open(&ALL_FILES) else {
            return Ok(None);
        };
        let text = self
            .streams
            .read_text(&path)
            .map_err(|e| ExternalIoError::from_io(&path, e))?;
        let language = Language::from_path(&path);
        debug!(path = %path.display(), %language, bytes = text.len(), "opened file");
        surface.load_document(&path, &text, language);
        Ok(Some(path))
    }

    /// Writes the text surface to its document path, asking for one if the
    /// content did not come from a file.
    pub fn save(&mut self, surface: &mut TextSurface) -> Result<Option<PathBuf>, ExternalIoError> {
        let path = match surface.document_path() {
            Some(path) => path.to_path_buf(),
            None => match self.picker.pick_save(&ALL_FILES) {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        let text = surface.text();
        self.streams
            .check_writable(&path)
            .and_then(|()| self.streams.write_text(&path, &text))
            .map_err(|e| ExternalIoError::from_io(&path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "saved file");
        surface.mark_saved(&path);
        Ok(Some(path))
    }

    /// Exports the grid; `.xls` picks the legacy format, anything else `.xlsx`.
    pub fn export(&mut self, surface: &mut GridSurface) -> Result<Option<PathBuf>, ExternalIoError> {
        let Some(path) = self.picker.pick_save(&SPREADSHEET_FILES) else {
            return Ok(None);
        };
        let format = SpreadsheetFormat::from_path(&path);
        self.streams
            .check_writable(&path)
            .and_then(|()| surface.export(format, &path))
            .map_err(|e| ExternalIoError::from_io(&path, e))?;
        debug!(path = %path.display(), format = format.extension(), "exported grid");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified() {
        let path = Path::new("/nowhere/file.txt");
        let err = ExternalIoError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ExternalIoError::NotFound { .. }));
        assert_eq!(err.to_string(), "/nowhere/file.txt does not exist");
        assert_eq!(err.path(), path);

        let err = ExternalIoError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ExternalIoError::PermissionDenied { .. }));
    }

    #[test]
    fn std_streams_roundtrip_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let streams = StdFileStreams;
        streams.check_writable(&path).unwrap();
        streams.write_text(&path, "héllo\n").unwrap();
        assert_eq!(streams.read_text(&path).unwrap(), "héllo\n");
    }

    #[test]
    fn std_streams_reject_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        let err = StdFileStreams.check_writable(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn std_streams_reject_binary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();
        let err = StdFileStreams.read_text(&path).unwrap_err();
        assert!(matches!(
            ExternalIoError::from_io(&path, err),
            ExternalIoError::NotText { .. }
        ));
    }
}
