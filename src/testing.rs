//! In-memory stand-in for a PDF library, used by unit tests.
//!
//! Files are plain text: `PLAIN\n<body>` is an open document,
//! `LOCKED <password>\n<body>` is an encrypted one, `PANIC` makes the engine
//! panic, and anything else is treated as corrupt.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::decrypt::PdfEngine;
use crate::error::OpenError;

pub struct MarkerEngine;

pub fn plain(body: &str) -> String {
    format!("PLAIN\n{body}")
}

pub fn locked(password: &str, body: &str) -> String {
    format!("LOCKED {password}\n{body}")
}

impl PdfEngine for MarkerEngine {
    type Document = String;

    fn open(&self, path: &Path, password: Option<&str>) -> Result<String, OpenError> {
        let contents = fs::read_to_string(path)?;
        if contents == "PANIC" {
            panic!("engine blew up on {}", path.display());
        }
        if let Some(body) = contents.strip_prefix("PLAIN\n") {
            return Ok(body.to_string());
        }
        let Some(rest) = contents.strip_prefix("LOCKED ") else {
            return Err(OpenError::Corrupt("unrecognized file header".to_string()));
        };
        let Some((expected, body)) = rest.split_once('\n') else {
            return Err(OpenError::Corrupt("truncated encryption header".to_string()));
        };
        match password {
            Some(given) if given == expected => Ok(body.to_string()),
            _ => Err(OpenError::Authentication),
        }
    }

    fn write_to(&self, document: &mut String, out: &mut File) -> Result<(), OpenError> {
        out.write_all(plain(document).as_bytes())?;
        Ok(())
    }
}
