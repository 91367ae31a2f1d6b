use super::*;
use crate::path;

impl Context {
    /// Get a typed value using slash notation.
    ///
    /// Intermediate segments descend through child contexts (or
    /// context-valued variables); the final segment names a variable.
    ///
    /// # Examples
    /// ```no_run
    /// # use ctxtree::Context;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let ctx = Context::from_file("params.xml")?;
    /// let dt: f64 = ctx.get("dt")?;
    /// let states: Vec<i32> = ctx.get("electronic/active_states")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't resolve or the stored value can't
    /// be converted to type T.
    pub fn get<T>(&self, path_str: &str) -> Result<T, CtxError>
    where
        T: TryFrom<Value, Error = CtxError>,
    {
        let value = self.lookup_value(path_str)?;
        T::try_from(value)
    }

    /// Get an optional typed value - returns `None` if the key doesn't exist.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_optional<T>(&self, path_str: &str) -> Result<Option<T>, CtxError>
    where
        T: TryFrom<Value, Error = CtxError>,
    {
        match self.lookup_value(path_str) {
            Ok(value) => Ok(Some(T::try_from(value)?)),
            Err(CtxError::SyntaxError { code: Some(304), .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// Missing keys and type mismatches both resolve to `default`,
    /// returned unchanged - requesting an absent key is never an error.
    ///
    /// # Examples
    /// ```no_run
    /// # use ctxtree::Context;
    /// # let ctx = Context::from_file("params.xml").unwrap();
    /// let dt = ctx.get_or("dt", 0.01);
    /// let method = ctx.get_or("method", "verlet".to_string());
    /// ```
    pub fn get_or<T>(&self, path_str: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = CtxError>,
    {
        self.get(path_str).unwrap_or(default)
    }

    /// Check if a variable exists at the given path.
    pub fn has(&self, path_str: &str) -> bool {
        self.lookup_value(path_str).is_ok()
    }

    /// Names of the local variables, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    /// Extract the subtree at `path_str` as an independent deep copy, or a
    /// copy of `default` when nothing resolves.
    ///
    /// The empty path resolves to the node itself. An absolute path
    /// (leading '/') anchors at the receiver as tree root: its first
    /// segment must match the receiver's own path label.
    pub fn get_context(&self, path_str: &str, default: &Context) -> Context {
        match self.find_node(path_str) {
            Some(node) => node.clone(),
            None => default.clone(),
        }
    }

    fn find_node(&self, path_str: &str) -> Option<&Context> {
        let segments = path::split(path_str);
        self.descend(path::is_absolute(path_str), &segments)
    }

    fn lookup_value(&self, path_str: &str) -> Result<Value, CtxError> {
        let segments = path::split(path_str);
        let (name, node_segments) = segments
            .split_last()
            .ok_or_else(|| missing_key(path_str))?;

        let node = self
            .descend(path::is_absolute(path_str), node_segments)
            .ok_or_else(|| missing_key(path_str))?;

        node.variables
            .get(*name)
            .cloned()
            .ok_or_else(|| missing_key(path_str))
    }

    /// Walk down through children and context-valued variables. An absolute
    /// path consumes its first segment against the receiver's own label.
    fn descend(&self, absolute: bool, segments: &[&str]) -> Option<&Context> {
        let mut segments = segments;
        if absolute {
            if let Some((first, rest)) = segments.split_first() {
                if *first != self.path {
                    return None;
                }
                segments = rest;
            }
        }

        let mut node = self;
        for seg in segments {
            node = node.child_node(seg)?;
        }
        Some(node)
    }

    /// First child with the given path label, else a context-valued
    /// variable under that name. Both attachment modes resolve identically.
    fn child_node(&self, name: &str) -> Option<&Context> {
        if let Some(child) = self.children.iter().find(|c| c.path == name) {
            return Some(child);
        }
        self.variables.get(name).and_then(Value::as_sub)
    }
}

fn missing_key(path_str: &str) -> CtxError {
    CtxError::SyntaxError {
        message: format!("Path '{}' not found in context", path_str),
        line: 0,
        column: 0,
        hint: Some("Check that the variable exists, or pass a default via get_or".into()),
        code: Some(304),
    }
}
