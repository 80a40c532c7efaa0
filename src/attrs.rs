//! Path attribute grammar for chezmoi source trees.
//! Source paths encode file semantics in fixed-order segment prefixes
//! (`exact_`, `private_`, `empty_`, `executable_`, `symlink_`, `dot_`) and
//! an optional template suffix. This module strips those markers and
//! produces the logical destination path plus the parsed attribute set.

use crate::constants::{SOURCE_TEMPLATE_SUFFIX, TARGET_TEMPLATE_SUFFIX};
use std::path::{Path, PathBuf};

/// File-system and rendering properties encoded into a source path.
///
/// All six flags are independent and may co-occur; they are derived only
/// from markers present in the original path and never change afterwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSet {
    /// File body is a template and must be transpiled
    pub template: bool,
    /// Owner-only permissions at the destination
    pub private: bool,
    /// Execute bits at the destination
    pub executable: bool,
    /// File is meaningful even with empty content
    pub empty: bool,
    /// File content names a symlink target
    pub symlink: bool,
    /// Directory contents are managed exactly
    pub exact: bool,
}

impl AttributeSet {
    /// Combines two attribute sets; a flag is set in the result when it is
    /// set in either operand.
    pub fn union(self, other: AttributeSet) -> AttributeSet {
        AttributeSet {
            template: self.template || other.template,
            private: self.private || other.private,
            executable: self.executable || other.executable,
            empty: self.empty || other.empty,
            symlink: self.symlink || other.symlink,
            exact: self.exact || other.exact,
        }
    }

    /// Returns true when no marker was present on the path.
    pub fn is_plain(&self) -> bool {
        *self == AttributeSet::default()
    }
}

/// A source entry resolved to its destination.
///
/// `target_path` is the logical destination with all markers removed. For
/// templates the physical output path re-appends the destination template
/// suffix; for everything else logical and physical paths are identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Path relative to the source root, markers intact
    pub source_path: PathBuf,
    /// Logical destination path relative to the destination root
    pub target_path: PathBuf,
    /// Union of the attribute flags across all path segments
    pub attributes: AttributeSet,
}

impl TargetDescriptor {
    /// Physical destination path: the logical path, with the destination
    /// template suffix re-appended when the entry is a template.
    pub fn physical_path(&self) -> PathBuf {
        if self.attributes.template {
            let mut raw = self.target_path.clone().into_os_string();
            raw.push(TARGET_TEMPLATE_SUFFIX);
            PathBuf::from(raw)
        } else {
            self.target_path.clone()
        }
    }
}

/// Strips the attribute markers from one path segment.
///
/// Prefixes are checked and stripped in a fixed order: `exact_`,
/// `private_`, `empty_`, `executable_`, `symlink_`, then `dot_`, which
/// rewrites the remainder to a leading `.` instead of stripping outright.
/// A trailing template suffix is stripped last. Any combination of
/// markers, including none, is valid.
pub fn parse_segment(segment: &str) -> (String, AttributeSet) {
    let mut attrs = AttributeSet::default();
    let mut rest = segment;

    if let Some(stripped) = rest.strip_prefix("exact_") {
        attrs.exact = true;
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_prefix("private_") {
        attrs.private = true;
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_prefix("empty_") {
        attrs.empty = true;
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_prefix("executable_") {
        attrs.executable = true;
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_prefix("symlink_") {
        attrs.symlink = true;
        rest = stripped;
    }

    let mut name = match rest.strip_prefix("dot_") {
        Some(stripped) => format!(".{}", stripped),
        None => rest.to_string(),
    };

    if let Some(stripped) = name.strip_suffix(SOURCE_TEMPLATE_SUFFIX) {
        attrs.template = true;
        name = stripped.to_string();
    }

    (name, attrs)
}

/// Builds a [`TargetDescriptor`] for a path relative to the source root.
///
/// Every segment is parsed with [`parse_segment`]; the attribute flags are
/// the union across segments. In practice only the leaf carries the
/// template suffix, but directory segments can carry any of the other
/// markers (a file under `private_dot_ssh/` is private).
pub fn parse_relative_path(relative: &Path) -> TargetDescriptor {
    let mut attrs = AttributeSet::default();
    let mut target = PathBuf::new();

    for component in relative.components() {
        let segment = component.as_os_str().to_string_lossy();
        let (name, segment_attrs) = parse_segment(&segment);
        attrs = attrs.union(segment_attrs);
        target.push(name);
    }

    TargetDescriptor {
        source_path: relative.to_path_buf(),
        target_path: target,
        attributes: attrs,
    }
}
