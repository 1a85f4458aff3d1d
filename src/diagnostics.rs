#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// WARNING CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const WARN_CHILDREN_CONFLICT: &str = "KAORI-W001";
pub const WARN_CLASS_CONFLICT: &str = "KAORI-W002";

/// What the compiler did about the condition a warning code names.
pub fn get_resolution(code: &str) -> &'static str {
    match code {
        WARN_CHILDREN_CONFLICT => "Children content is passed; the 'children' attribute is dropped.",
        WARN_CLASS_CONFLICT => "Both attributes are emitted and may override each other at runtime.",
        _ => "Compilation continued.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WARNINGS (non-fatal, attached to the output)
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerWarning {
    pub code: String,
    pub message: String,
    pub resolution: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl CompilerWarning {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        CompilerWarning {
            code: code.to_string(),
            message: message.to_string(),
            resolution: get_resolution(code).to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for CompilerWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}:{}:{})",
            self.code, self.message, self.file, self.line, self.column
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FATAL ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to parse {file}: {}", messages.join("; "))]
    Parse { file: String, messages: Vec<String> },

    #[error("invalid compiler options: {0}")]
    Options(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE POSITIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Byte offset to line/column lookup for one source text.
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    fn line_of(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// 1-based line and column, column counted in characters.
    pub fn location(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_of(offset);
        let start = self.line_starts[line] as usize;
        let column = source[start..offset as usize].chars().count();
        (line as u32 + 1, column as u32 + 1)
    }

    /// 0-based line and UTF-16 column, as source maps expect.
    pub fn utf16_position(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_of(offset);
        let start = self.line_starts[line] as usize;
        let column = source[start..offset as usize].encode_utf16().count();
        (line as u32, column as u32)
    }
}
