use crate::models::{Note, NoteFile};
use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path is outside the notes directory: {0}")]
    OutsideNotesDir(PathBuf),
}

/// Read a note file and return its HTML
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write HTML to a note file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for `.html` note files in the notes directory, sorted
pub fn scan_note_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Path of `path` relative to `notes_root`
pub fn relative_to_root(path: &Path, notes_root: &Path) -> Result<RelativePathBuf, IoError> {
    let stripped = path
        .strip_prefix(notes_root)
        .map_err(|_| IoError::OutsideNotesDir(path.to_path_buf()))?;
    contained_relative(stripped).map_err(|_| IoError::OutsideNotesDir(path.to_path_buf()))
}

/// A user-supplied relative note path, normalized. Fails when the path
/// climbs out of the notes directory with `..`.
pub fn contained_relative(path: &Path) -> Result<RelativePathBuf, IoError> {
    let relative = RelativePathBuf::from_path(path)
        .map_err(|_| IoError::OutsideNotesDir(path.to_path_buf()))?
        .normalize();
    if matches!(relative.components().next(), Some(Component::ParentDir)) {
        return Err(IoError::OutsideNotesDir(path.to_path_buf()));
    }
    Ok(relative)
}

/// Load a note file: its relative path is the note id, its file name the title
pub fn load_note(file: &NoteFile, notes_root: &Path) -> Result<Note, IoError> {
    let content = read_file(file.relative_path(), notes_root)?;
    log::debug!("loaded note {}", file.relative_path());
    Ok(Note::from_html(
        file.relative_path().as_str(),
        file.display_name(),
        content,
    ))
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "html"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
