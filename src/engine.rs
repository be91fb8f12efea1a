use std::fs::{self, File};
use std::path::Path;

use lopdf::encryption::DecryptionError;
use lopdf::Document;

use crate::decrypt::PdfEngine;
use crate::error::OpenError;

/// [`PdfEngine`] backed by `lopdf`.
///
/// A document whose user password is empty opens without a password, same as
/// any unencrypted file. Only a rejected password is an authentication
/// failure; encryption lopdf cannot handle (AES, a damaged `/Encrypt`
/// dictionary, a missing `/ID`) is reported as corrupt.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    type Document = Document;

    fn open(&self, path: &Path, password: Option<&str>) -> Result<Document, OpenError> {
        let bytes = fs::read(path)?;
        let mut document =
            Document::load_mem(&bytes).map_err(|e| OpenError::Corrupt(e.to_string()))?;

        if document.is_encrypted() {
            document.decrypt(password.unwrap_or("")).map_err(classify)?;
        }
        Ok(document)
    }

    fn write_to(&self, document: &mut Document, out: &mut File) -> Result<(), OpenError> {
        document.save_to(out).map_err(|e| classify(lopdf::Error::IO(e)))
    }
}

fn classify(e: lopdf::Error) -> OpenError {
    match e {
        lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => OpenError::Authentication,
        lopdf::Error::IO(e) => OpenError::Io(e),
        other => OpenError::Corrupt(other.to_string()),
    }
}
