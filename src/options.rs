use serde::{Deserialize, Serialize};

pub const DEFAULT_PACKAGE_NAME: &str = "kaori.js";
pub const DEFAULT_PACKAGE_HINT: &str = "kaori";

/// Per-run compiler configuration. Every field has a default, so hosts may
/// pass `{}` or only the keys they care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Module specifier used for the synthesized import.
    pub package_name: String,
    /// An existing import whose source contains this string is treated as a
    /// support import even if it is not exactly `package_name`.
    pub package_hint: String,
    /// Keep whitespace-only text children that have no line break.
    pub preserve_inline_whitespace: bool,
    pub source_map: bool,
    /// Print warnings through `tracing` as well as returning them.
    pub log_warnings: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            package_hint: DEFAULT_PACKAGE_HINT.to_string(),
            preserve_inline_whitespace: true,
            source_map: true,
            log_warnings: true,
        }
    }
}

impl CompileOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_support_source(&self, source: &str) -> bool {
        source == self.package_name
            || (!self.package_hint.is_empty() && source.contains(&self.package_hint))
    }
}
