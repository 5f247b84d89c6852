//! Update masks for partial updates.

use std::fmt;

/// Ordered set of field paths touched by a partial update.
///
/// Sent as the comma-joined `updateMask` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    /// Mask over the given paths, keeping their order.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mask = Self::default();
        for path in paths {
            mask.push(path);
        }
        mask
    }

    /// Append a path. Duplicates are ignored.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Whether `path` is part of the mask.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// The paths, in insertion order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Number of paths in the mask.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the mask is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mask_keeps_order() {
        let mask = FieldMask::new(["expire_time", "ttl", "ttl"]);
        assert_eq!(mask.paths(), ["expire_time", "ttl"]);
        assert_eq!(mask.to_string(), "expire_time,ttl");
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn test_empty_mask() {
        let mask = FieldMask::default();
        assert!(mask.is_empty());
        assert_eq!(mask.to_string(), "");
    }
}
