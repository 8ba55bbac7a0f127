// SPDX-License-Identifier: LGPL-3.0-only
//! Icon names for filesystem entries.

use crate::filesystem::entry::FileEntry;

/// Icon name for an entry.
///
/// Links to directories, directories and other links get fixed names;
/// everything else is looked up by suffix, falling back to `"file"`.
pub fn icon_name_for(entry: &FileEntry) -> String {
    if entry.is_symlink_to_dir() {
        return "folder-link".to_string();
    }
    if entry.is_dir() {
        return "folder".to_string();
    }
    if entry.is_symlink() {
        return "link".to_string();
    }

    entry
        .extension()
        .and_then(suffix_to_icon_name)
        .unwrap_or_else(|| "file".to_string())
}

/// Map a file suffix to an icon name through its guessed MIME type.
///
/// Returns `None` for suffixes without a known MIME type.
pub fn suffix_to_icon_name(suffix: &str) -> Option<String> {
    let mime_type = mime_guess2::from_ext(&suffix.to_lowercase()).first()?;
    Some(mime_to_icon_name(mime_type.essence_str()))
}

/// Map MIME type to icon name.
fn mime_to_icon_name(mime_type: &str) -> String {
    let Some((main_type, sub_type)) = mime_type.split_once('/') else {
        return "file".to_string();
    };

    match main_type {
        "text" => match sub_type {
            "html" => "text-html".to_string(),
            "markdown" | "x-markdown" => "text-markdown".to_string(),
            _ => "text-x-generic".to_string(),
        },
        "image" => "image-x-generic".to_string(),
        "video" => "video-x-generic".to_string(),
        "audio" => "audio-x-generic".to_string(),
        "application" => match sub_type {
            "pdf" => "application-pdf".to_string(),
            "zip" | "x-zip-compressed" => "application-zip".to_string(),
            "x-tar" => "application-x-tar".to_string(),
            "gzip" | "x-gzip" => "application-x-gzip".to_string(),
            "x-bzip2" => "application-x-bzip".to_string(),
            "x-7z-compressed" => "application-x-7z-compressed".to_string(),
            "x-rar-compressed" | "vnd.rar" => "application-x-rar".to_string(),
            "json" => "application-json".to_string(),
            "xml" => "application-xml".to_string(),
            "javascript" | "x-javascript" => "application-x-javascript".to_string(),
            "x-sh" | "x-shellscript" => "application-x-shellscript".to_string(),
            "x-executable" | "x-sharedlib" => "application-x-executable".to_string(),
            _ => "application-x-generic".to_string(),
        },
        _ => format!("{}-x-generic", main_type),
    }
}
