use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// One failed validation rule.
///
/// This is data returned by [`validate`](crate::validate), not an error
/// raised by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: Cow<'static, str>,
    path: String,
}

impl ValidationError {
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The dotted location of the invalid value, such as `items.[2].name`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Collapses repeated `.` separators and trims them from both ends.
    pub(crate) fn sanitized(mut self) -> Self {
        self.path = sanitize_path(&self.path);
        self
    }

    /// Prepends `prefix` and a separator to the path.
    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        let mut path = String::with_capacity(prefix.len() + 1 + self.path.len());
        path.push_str(prefix);
        path.push('.');
        path.push_str(&self.path);
        self.path = sanitize_path(&path);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn sanitize_path(path: &str) -> String {
    let mut sanitized = String::with_capacity(path.len());
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        if !sanitized.is_empty() {
            sanitized.push('.');
        }
        sanitized.push_str(segment);
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, sanitize_path};
    use alloc::string::ToString;

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_path("a..b"), "a.b");
        assert_eq!(sanitize_path(".a.b."), "a.b");
        assert_eq!(sanitize_path("...."), "");
        assert_eq!(sanitize_path("[0].name"), "[0].name");
    }

    #[test]
    fn prefixes_join_with_one_separator() {
        let error = ValidationError::new("Property is required", "property").prefixed("nested.[0]");

        assert_eq!(error.path(), "nested.[0].property");
        assert_eq!(error.to_string(), "nested.[0].property: Property is required");

        let awkward = ValidationError::new("bad", ".deep.").prefixed("outer.");
        assert_eq!(awkward.path(), "outer.deep");
    }
}
