use derive_more::Display;

const SEPARATOR: char = '/';
const ROOT: &str = "/";

/// One immediate child of a remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{path}")]
pub struct Entry {
    path: String,
    is_directory: bool,
}

impl Entry {
    pub fn new(path: impl AsRef<str>, is_directory: bool) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            is_directory,
        }
    }

    /// Builds the directory entry `name` inside `parent`.
    pub fn directory(parent: &str, name: &str) -> Self {
        Self::new(join_path(parent, name), true)
    }

    /// Builds the file entry `name` inside `parent`.
    pub fn file(parent: &str, name: &str) -> Self {
        Self::new(join_path(parent, name), false)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn name(&self) -> &str {
        basename(&self.path)
    }
}

/// Joins a child name onto a parent path and normalizes the result.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        return normalize_path(name);
    }
    normalize_path(&format!("{parent}{SEPARATOR}{name}"))
}

/// Collapses repeated separators, drops `.` segments, resolves `..` without
/// climbing above the root and strips the trailing separator.
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push(segment);
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join(ROOT);
    if absolute {
        format!("{SEPARATOR}{joined}")
    } else {
        joined
    }
}

/// Last segment of a path, or the path itself for the root.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return if path.is_empty() { path } else { ROOT };
    }
    trimmed
        .rsplit(SEPARATOR)
        .next()
        .unwrap_or(trimmed)
}
