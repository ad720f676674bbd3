//! Loading an attached resource file from disk.

use std::path::Path;

use lesson_pro_core::ResourceFile;

use crate::error::CliError;

/// Guesses a MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Reads `path` into a `ResourceFile`. Only images are actually read; other
/// files are referenced by name.
pub fn load_resource(path: &Path) -> Result<ResourceFile, CliError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Internal(format!("Not a file path: {}", path.display())))?;
    let mime_type = guess_mime_type(path);

    let bytes = if mime_type.starts_with("image/") {
        std::fs::read(path)?
    } else if path.is_file() {
        Vec::new()
    } else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Resource file not found: {}", path.display()),
        )
        .into());
    };

    Ok(ResourceFile::from_bytes(name, mime_type, &bytes))
}
