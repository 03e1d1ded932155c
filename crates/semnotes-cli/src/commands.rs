use anyhow::{Context, Result};
use semnotes_config::Config;
use semnotes_engine::models::{Note, NoteFile, Property};
use semnotes_engine::{
    assign_missing_ids, extract_semantics, filter_notes, io, match_notes, parse_document,
    serialize_document,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A notes directory plus the exclusion rules from config.
pub struct NotesDir {
    root: PathBuf,
    config: Option<Config>,
}

impl NotesDir {
    pub fn new(root: PathBuf, config: Option<Config>) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a user-supplied note path, absolute or relative to the root.
    pub fn note_file(&self, path: &Path) -> Result<NoteFile> {
        let relative = if path.is_absolute() {
            io::relative_to_root(path, &self.root)?
        } else {
            io::contained_relative(path).with_context(|| {
                format!("Note path escapes the notes directory: {}", path.display())
            })?
        };
        Ok(NoteFile::new(relative))
    }

    pub fn load(&self, path: &Path) -> Result<Note> {
        let file = self.note_file(path)?;
        Ok(io::load_note(&file, &self.root)?)
    }

    /// Every note under the root that is not excluded, in path order.
    pub fn load_all(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for path in io::scan_note_files(&self.root)? {
            let file = NoteFile::new(io::relative_to_root(&path, &self.root)?);
            if self
                .config
                .as_ref()
                .is_some_and(|c| c.is_excluded(file.relative_path().as_str()))
            {
                log::info!("Skipping excluded note {}", file.relative_path());
                continue;
            }
            notes.push(io::load_note(&file, &self.root)?);
        }
        log::info!("Loaded {} notes from {}", notes.len(), self.root.display());
        Ok(notes)
    }
}

pub fn semantics(dir: &NotesDir, path: &Path, json: bool, out: &mut impl Write) -> Result<()> {
    let file = dir.note_file(path)?;
    let html = io::read_file(file.relative_path(), dir.root())?;
    let semantics = extract_semantics(&html);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&semantics)?)?;
        return Ok(());
    }
    writeln!(out, "tags: {}", semantics.tags.join(", "))?;
    for prop in &semantics.properties {
        writeln!(out, "property: {}", describe_property(prop))?;
    }
    writeln!(out, "imaginary: {}", semantics.is_imaginary)?;
    Ok(())
}

/// Rewrites a note in canonical form, giving property widgets ids.
pub fn normalize(dir: &NotesDir, path: &Path, out: &mut impl Write) -> Result<()> {
    let file = dir.note_file(path)?;
    let html = io::read_file(file.relative_path(), dir.root())?;
    let mut blocks = parse_document(&html);
    let assigned = assign_missing_ids(&mut blocks);
    let canonical = serialize_document(&blocks);

    if canonical == html {
        writeln!(out, "{}: already canonical", file.relative_path())?;
        return Ok(());
    }
    io::write_file(file.relative_path(), dir.root(), &canonical)?;
    writeln!(
        out,
        "{}: normalized {} blocks, assigned {} ids",
        file.relative_path(),
        blocks.len(),
        assigned
    )?;
    Ok(())
}

pub fn list(dir: &NotesDir, out: &mut impl Write) -> Result<()> {
    for note in dir.load_all()? {
        write_note_line(&note, out)?;
    }
    Ok(())
}

pub fn search(dir: &NotesDir, term: &str, out: &mut impl Write) -> Result<()> {
    let notes = dir.load_all()?;
    for note in filter_notes(&notes, term) {
        write_note_line(note, out)?;
    }
    Ok(())
}

/// Lists concrete notes whose properties satisfy the query note.
pub fn matches(dir: &NotesDir, query_path: &Path, out: &mut impl Write) -> Result<()> {
    let query = dir.load(query_path)?;
    if !query.is_imaginary {
        log::warn!("{} is not a query note; matching on equality only", query.id);
    }
    for note in dir.load_all()? {
        if note.id == query.id || note.is_imaginary {
            continue;
        }
        if match_notes(&note.properties, &query.properties) {
            write_note_line(&note, out)?;
        }
    }
    Ok(())
}

fn write_note_line(note: &Note, out: &mut impl Write) -> Result<()> {
    let marker = if note.is_imaginary { "?" } else { " " };
    let tags: Vec<String> = note.tags.iter().map(|t| format!("#{t}")).collect();
    writeln!(out, "{marker} {}  {}  {}", note.id, note.title, tags.join(" "))?;
    Ok(())
}

fn describe_property(prop: &Property) -> String {
    format!(
        "{} {} {}",
        prop.key,
        prop.operator.as_str(),
        prop.values.join(", ")
    )
}
