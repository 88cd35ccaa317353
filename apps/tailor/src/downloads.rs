//! Saving the tailored resume to disk.
//!
//! Each download is staged in a transient file inside the target directory and
//! then persisted under its final name. The transient file is removed if
//! anything fails before the rename.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::info;

pub const TEXT_FILE_NAME: &str = "tailored_resume.txt";
pub const DOCX_FILE_NAME: &str = "tailored_resume.docx";

#[derive(Debug, Clone)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes the raw text as `tailored_resume.txt`.
    pub fn save_text(&self, text: &str) -> std::io::Result<PathBuf> {
        self.save(TEXT_FILE_NAME, text.as_bytes())
    }

    /// Writes the server-generated document as `tailored_resume.docx`.
    pub fn save_docx(&self, bytes: &[u8]) -> std::io::Result<PathBuf> {
        self.save(DOCX_FILE_NAME, bytes)
    }

    fn save(&self, file_name: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(contents)?;
        staged.flush()?;

        let target = self.dir.join(file_name);
        staged.persist(&target).map_err(|e| e.error)?;

        info!("Saved {} ({} bytes)", target.display(), contents.len());
        Ok(target)
    }
}
