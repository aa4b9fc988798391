use thiserror::Error;

/// One step from the root sample down to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Raised when inference meets a value it refuses to describe (a callable).
///
/// `key` is the innermost object property that led to the value, `path` the
/// full route from the root. Both are empty for a bare top-level callable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Functions are not supported for type inference{}", location(.key, .path))]
pub struct UnsupportedTypeError {
    key: Option<String>,
    path: Vec<PathSegment>,
}

pub type InferResult<T> = Result<T, UnsupportedTypeError>;

impl UnsupportedTypeError {
    pub fn function() -> Self {
        Self { key: None, path: Vec::new() }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Record that the failure happened under `key`. The innermost key wins.
    pub(crate) fn within_key(mut self, key: &str) -> Self {
        if self.key.is_none() {
            self.key = Some(key.to_string());
        }
        self.path.insert(0, PathSegment::Key(key.to_string()));
        self
    }

    pub(crate) fn within_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// `$.user.handlers[1]` style rendering of the path.
    pub fn path_string(&self) -> String {
        path_string(&self.path)
    }
}

fn location(key: &Option<String>, path: &[PathSegment]) -> String {
    match key {
        Some(key) => format!(" (property `{key}` at {}).", path_string(path)),
        None if !path.is_empty() => format!(" (at {}).", path_string(path)),
        None => ".".to_string(),
    }
}

fn path_string(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for seg in path {
        match seg {
            PathSegment::Key(k) => {
                out.push('.');
                out.push_str(k);
            }
            PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
        }
    }
    out
}
