use std::fs::{self, File};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::OpenError;

/// Classified result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AlreadyUnencrypted,
    PasswordRemoved,
    WrongPassword,
    Failed(String),
}

/// The PDF primitives the unlock algorithm needs.
///
/// `open` must report a locked document as [`OpenError::Authentication`] and
/// nothing else as that variant; the algorithm relies on it to tell a wrong
/// password apart from a broken file.
pub trait PdfEngine: Send + Sync + 'static {
    type Document;

    /// Open `path`, optionally unlocking it with `password`.
    fn open(&self, path: &Path, password: Option<&str>) -> Result<Self::Document, OpenError>;

    /// Serialize an opened document, without encryption, into `out`.
    fn write_to(&self, document: &mut Self::Document, out: &mut File) -> Result<(), OpenError>;
}

/// Strip the password from one file.
///
/// Opens without a password first so unencrypted files are never rewritten.
/// Only a successful unlock touches the file, and then only by replacing it
/// with the decrypted copy.
pub fn process<E: PdfEngine>(engine: &E, path: &Path, password: &str) -> Outcome {
    match engine.open(path, None) {
        Ok(_) => return Outcome::AlreadyUnencrypted,
        Err(OpenError::Authentication) => {}
        Err(e) => return Outcome::Failed(reason(&e)),
    }

    match engine.open(path, Some(password)) {
        Ok(mut document) => match overwrite(engine, &mut document, path) {
            Ok(()) => Outcome::PasswordRemoved,
            Err(e) => Outcome::Failed(reason(&e)),
        },
        Err(OpenError::Authentication) => Outcome::WrongPassword,
        Err(e) => Outcome::Failed(reason(&e)),
    }
}

/// Write the document next to `path`, then move it over the original.
fn overwrite<E: PdfEngine>(
    engine: &E,
    document: &mut E::Document,
    path: &Path,
) -> Result<(), OpenError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let original = fs::metadata(path)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    engine.write_to(document, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    fs::set_permissions(staged.path(), original.permissions())?;
    staged.persist(path).map_err(|e| OpenError::Io(e.error))?;
    Ok(())
}

fn reason(err: &OpenError) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        format!("{err:?}")
    } else {
        text
    }
}
