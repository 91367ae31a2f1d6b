// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::export;
use crate::parser;
use crate::value::Value;
use crate::CtxError;

mod access;
mod conversion;
mod validation;

/// A hierarchical, path-addressable store of typed values.
///
/// A context owns a path label, an ordered set of named variables, and an
/// ordered collection of nested child contexts. Ownership is strictly
/// tree-shaped: merging and extraction always deep-copy, so no two trees
/// ever share storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    path: String,
    variables: IndexMap<String, Value>,
    children: Vec<Context>,
}

impl Context {
    /// Create an empty, unattached context. The path label starts empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a context tree from an XML file.
    ///
    /// # Example
    /// ```ignore
    /// let ctx = Context::from_file("ctx_example.xml")?;
    /// ```
    ///
    /// # Errors
    /// Returns a `FileError` when the file cannot be read, or a parse error
    /// when the document is malformed. A malformed document never yields a
    /// partial tree.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CtxError> {
        let resolved = resolve_file_path(path.as_ref())?;
        let content = fs::read_to_string(&resolved).map_err(|e| CtxError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;
        Self::from_str(&content)
    }

    /// Parse a context tree from a string (no file I/O).
    pub fn from_str(content: &str) -> Result<Self, CtxError> {
        let mut parser = parser::Parser::new(content)?;
        parser.parse_document()
    }

    /// The node's current path label.
    pub fn get_path(&self) -> &str {
        &self.path
    }

    /// Assign the node's path label.
    ///
    /// Always succeeds; uniqueness against siblings is the caller's concern.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Insert or overwrite a named variable. Last write wins.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }

    /// Merge `other` into the receiver as a nested subtree, keyed by its
    /// path label (subtrees with an empty label are reachable only by
    /// iteration). The merge is a deep copy: later mutation of `other`
    /// never shows through the receiver.
    ///
    /// An existing child with the same label is kept; the new subtree lands
    /// after it as a sibling, and path lookups return the first match.
    pub fn add_context(&mut self, other: &Context) {
        self.children.push(other.clone());
    }

    pub(crate) fn attach_child(&mut self, child: Context) {
        self.children.push(child);
    }

    /// Nested subtrees, in insertion order.
    pub fn children(&self) -> &[Context] {
        &self.children
    }

    /// Local variables, in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of local variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Serialize the full tree to the canonical XML document.
    pub fn to_xml_string(&self) -> String {
        export::context_to_xml(self)
    }

    /// Serialize the full tree and write it to `filename`, truncating any
    /// existing file.
    pub fn save_xml<P: AsRef<Path>>(&self, filename: P) -> Result<(), CtxError> {
        let resolved = resolve_file_path(filename.as_ref())?;
        fs::write(&resolved, self.to_xml_string()).map_err(|e| CtxError::FileError {
            message: format!("Failed to write file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the target directory exists and is writable".into()),
            code: Some(302),
        })
    }
}

/// Expand "~/" against the home directory; other paths pass through.
fn resolve_file_path(path: &Path) -> Result<PathBuf, CtxError> {
    if let Ok(rest) = path.strip_prefix("~") {
        let home = dirs::home_dir().ok_or_else(|| CtxError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: path.to_string_lossy().to_string(),
            hint: Some("Set HOME or use an absolute path".into()),
            code: Some(303),
        })?;
        return Ok(home.join(rest));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests;
