use super::*;

impl Context {
    /// Get a value with validation - returns a detailed error when the
    /// stored value fails the check
    pub fn get_validated<T, F>(
        &self,
        path_str: &str,
        validator: F,
        valid_values: &str,
    ) -> Result<T, CtxError>
    where
        T: TryFrom<Value, Error = CtxError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(path_str)?;

        if !validator(&typed_value) {
            return Err(CtxError::ValidationError {
                message: format!("Invalid value for `{}`", path_str),
                hint: Some(format!("Valid values are: {}", valid_values)),
                code: Some(450),
            });
        }

        Ok(typed_value)
    }

    /// Get a text value and validate it's one of the allowed spellings
    pub fn get_text_enum(&self, path_str: &str, allowed_values: &[&str]) -> Result<String, CtxError> {
        let value: String = self.get(path_str)?;
        let lower_value = value.to_lowercase();

        if !allowed_values.iter().any(|&v| v.to_lowercase() == lower_value) {
            return Err(CtxError::ValidationError {
                message: format!("Invalid value '{}' for `{}`", value, path_str),
                hint: Some(format!("Expected one of: {}", allowed_values.join(", "))),
                code: Some(451),
            });
        }

        Ok(value)
    }

    /// Check the stored variables against declared defaults and critical keys.
    ///
    /// Every critical key must already be present. Keys named in `defaults`
    /// that are missing are filled in from the given values; keys that are
    /// present are left untouched.
    pub fn check_input(
        &mut self,
        defaults: &[(&str, Value)],
        critical: &[&str],
    ) -> Result<(), CtxError> {
        for key in critical {
            if !self.has(key) {
                return Err(CtxError::ValidationError {
                    message: format!("Critical parameter `{}` must be defined", key),
                    hint: Some("Add the parameter to the input context".into()),
                    code: Some(452),
                });
            }
        }

        for (key, value) in defaults {
            if !self.has(key) {
                self.add(key, value.clone());
            }
        }

        Ok(())
    }
}
