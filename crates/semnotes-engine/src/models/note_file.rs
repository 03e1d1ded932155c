use relative_path::{RelativePath, RelativePathBuf};

const NOTE_EXTENSION: &str = ".html";

/// An HTML note file addressed relative to the notes root
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    relative_path: RelativePathBuf,
    display_name: String,
}

impl NoteFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = Self::extract_display_name(&relative_path);
        Self {
            relative_path,
            display_name,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the `.html` extension, used as the note title
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn extract_display_name(path: &RelativePath) -> String {
        path.file_name()
            .map(|name| name.strip_suffix(NOTE_EXTENSION).unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string()
    }
}

impl From<&str> for NoteFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_extension_and_folders() {
        let file = NoteFile::from("projects/alpha.html");
        assert_eq!(file.display_name(), "alpha");
        assert_eq!(file.relative_path().as_str(), "projects/alpha.html");
    }

    #[test]
    fn display_name_keeps_other_extensions() {
        assert_eq!(NoteFile::from("notes.txt").display_name(), "notes.txt");
    }
}
