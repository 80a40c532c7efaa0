//! Common constants used throughout the dotforge importer.

/// Template suffix carried by template files in the source tree
pub const SOURCE_TEMPLATE_SUFFIX: &str = ".tmpl";

/// Template suffix dotforge appends to transpiled template files
pub const TARGET_TEMPLATE_SUFFIX: &str = ".hbs";

/// Namespace prefix chezmoi templates use for built-in variables
pub const SOURCE_NAMESPACE: &str = ".chezmoi.";

/// Entries never imported: version-control metadata and chezmoi's own
/// internal config/state files
pub const RESERVED_ENTRY_PATTERNS: [&str; 4] = [".git", ".hg", ".svn", ".chezmoi*"];

/// File name of the variable table written at the destination root
pub const VARS_FILE_NAME: &str = "vars.toml";
