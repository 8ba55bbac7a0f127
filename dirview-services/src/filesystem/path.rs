// SPDX-License-Identifier: LGPL-3.0-only
//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically: drop `.` components, resolve `..` against
/// the preceding component, and never climb above the root.
///
/// The filesystem is not consulted, so symbolic links are not resolved.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {},
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            },
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            },
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `name` against `dir` and make the result absolute.
///
/// An absolute `name` is returned as is (cleaned); a relative `dir` is taken
/// relative to the process working directory.
pub fn absolute_file_path(dir: &Path, name: &Path) -> PathBuf {
    let joined = dir.join(name);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&joined))
            .unwrap_or(joined)
    };
    clean_path(&absolute)
}
