/// Validate an uploaded image filename.
///
/// Filenames are stored verbatim and echoed into HTML, so anything that
/// could smuggle a path component or a header/control character is
/// rejected outright.
pub fn validate_upload_filename(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Filename cannot be empty");
    }

    if trimmed.contains('\0') || trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err("Filename contains invalid characters");
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err("Filename must not contain path separators");
    }

    if trimmed == ".." {
        return Err("Filename must not be '..'");
    }

    if trimmed.starts_with('.') {
        return Err("Hidden filenames are not allowed");
    }

    if trimmed.chars().count() > 255 {
        return Err("Filename is too long");
    }

    Ok(trimmed)
}
