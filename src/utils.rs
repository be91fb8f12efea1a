use std::any::Any;
use std::path::Path;

/// File name shown in log messages, falling back to the full path.
pub fn file_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// True if the file name ends in `.pdf`, ignoring case.
pub fn has_pdf_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

/// Extract the message from a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected panic".to_string()
    }
}

/// Format a percentage for display ("42.9%").
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::panic;
    use std::path::PathBuf;

    #[test]
    fn pdf_suffix_is_case_insensitive() {
        assert!(has_pdf_suffix(Path::new("/tmp/report.pdf")));
        assert!(has_pdf_suffix(Path::new("/tmp/REPORT.PDF")));
        assert!(has_pdf_suffix(Path::new("Scan.Pdf")));
        assert!(!has_pdf_suffix(Path::new("/tmp/report.pdf.txt")));
        assert!(!has_pdf_suffix(Path::new("/tmp/notes.txt")));
        assert!(!has_pdf_suffix(Path::new("/")));
    }

    #[test]
    fn label_is_the_file_name() {
        let path = PathBuf::from("/some/dir/invoice.pdf");
        assert_eq!(file_label(&path), "invoice.pdf");
        assert_eq!(file_label(Path::new("/")), "/");
    }

    #[test]
    fn panic_message_handles_both_payload_kinds() {
        let caught = panic::catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "static message");

        let caught = panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "formatted 42");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(200.0 / 3.0), "66.7%");
    }
}
