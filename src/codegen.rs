//! Output assembly.
//!
//! The compiled module is the original text with each outermost markup span
//! replaced and, when needed, one import inserted. Copied text keeps a
//! mapping per line; each replacement maps back to the start of its markup.

use crate::diagnostics::LineIndex;
use oxc_sourcemap::SourceMapBuilder;
use oxc_span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub code: String,
}

impl Replacement {
    pub fn new(span: Span, code: String) -> Self {
        Self { span, code }
    }
}

/// Text of `span` with `replacements` (absolute, non-overlapping, inside
/// `span`) applied.
pub fn splice(source: &str, span: Span, mut replacements: Vec<Replacement>) -> String {
    let base = span.start;
    let mut result = source[span.start as usize..span.end as usize].to_string();
    replacements.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    for replacement in replacements {
        let start = (replacement.span.start - base) as usize;
        let end = (replacement.span.end - base) as usize;
        result.replace_range(start..end, &replacement.code);
    }
    result
}

pub struct GeneratedModule {
    pub code: String,
    pub map: Option<String>,
}

/// Statement inserted at `offset` of the original source.
pub struct HeaderInsertion {
    pub offset: u32,
    pub statement: String,
}

pub fn generate_module(
    source: &str,
    file_path: &str,
    lines: &LineIndex,
    header: Option<HeaderInsertion>,
    mut replacements: Vec<Replacement>,
    with_map: bool,
) -> GeneratedModule {
    let mut writer = OutputWriter::new(source, file_path, lines, with_map);
    let mut cursor = 0u32;

    if let Some(header) = header {
        writer.push_original(0, header.offset);
        let rest = &source[header.offset as usize..];
        let ends_line = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");
        let statement = match (header.offset == 0, ends_line) {
            (true, _) => format!("{}\n", header.statement),
            (false, true) => format!("\n{}", header.statement),
            (false, false) => format!("\n{}\n", header.statement),
        };
        writer.push_generated(&statement, None);
        cursor = header.offset;
    }

    replacements.sort_by(|a, b| a.span.start.cmp(&b.span.start));
    for replacement in &replacements {
        writer.push_original(cursor, replacement.span.start);
        writer.push_generated(&replacement.code, Some(replacement.span.start));
        cursor = replacement.span.end;
    }
    writer.push_original(cursor, source.len() as u32);

    writer.finish()
}

struct OutputWriter<'s> {
    source: &'s str,
    lines: &'s LineIndex,
    code: String,
    line: u32,
    column: u32,
    map: Option<(SourceMapBuilder, u32)>,
}

impl<'s> OutputWriter<'s> {
    fn new(source: &'s str, file_path: &str, lines: &'s LineIndex, with_map: bool) -> Self {
        let map = with_map.then(|| {
            let mut builder = SourceMapBuilder::default();
            builder.set_file(file_path);
            let source_id = builder.set_source_and_content(file_path, source);
            (builder, source_id)
        });
        Self {
            source,
            lines,
            code: String::with_capacity(source.len()),
            line: 0,
            column: 0,
            map,
        }
    }

    fn add_mapping(&mut self, origin: u32) {
        let (src_line, src_col) = self.lines.utf16_position(self.source, origin);
        if let Some((builder, source_id)) = &mut self.map {
            builder.add_token(self.line, self.column, src_line, src_col, Some(*source_id), None);
        }
    }

    fn push_original(&mut self, start: u32, end: u32) {
        if start >= end {
            return;
        }
        let source = self.source;
        let text = &source[start as usize..end as usize];
        self.add_mapping(start);
        let mut copied = 0usize;
        for (i, _) in text.match_indices('\n') {
            self.append(&text[copied..=i]);
            copied = i + 1;
            if copied < text.len() {
                self.add_mapping(start + copied as u32);
            }
        }
        self.append(&text[copied..]);
    }

    fn push_generated(&mut self, text: &str, origin: Option<u32>) {
        if let Some(origin) = origin {
            self.add_mapping(origin);
        }
        self.append(text);
    }

    fn append(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += c.len_utf16() as u32;
            }
        }
        self.code.push_str(text);
    }

    fn finish(self) -> GeneratedModule {
        GeneratedModule {
            code: self.code,
            map: self
                .map
                .map(|(builder, _)| builder.into_sourcemap().to_json_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_relative_to_span() {
        let source = "let a = f(<x/>, <y/>);";
        let start = source.find('f').unwrap() as u32;
        let end = source.rfind(')').unwrap() as u32 + 1;
        let x = source.find("<x/>").unwrap() as u32;
        let y = source.find("<y/>").unwrap() as u32;
        let out = splice(
            source,
            Span::new(start, end),
            vec![
                Replacement::new(Span::new(x, x + 4), "X".to_string()),
                Replacement::new(Span::new(y, y + 4), "Y".to_string()),
            ],
        );
        assert_eq!(out, "f(X, Y)");
    }

    #[test]
    fn test_generate_module_inserts_header_and_replacements() {
        let source = "#!/usr/bin/env node\nconst a = <b/>;\n";
        let lines = LineIndex::new(source);
        let hashbang_end = source.find('\n').unwrap() as u32;
        let b = source.find("<b/>").unwrap() as u32;
        let module = generate_module(
            source,
            "a.jsx",
            &lines,
            Some(HeaderInsertion {
                offset: hashbang_end,
                statement: "import { html } from \"kaori.js\";".to_string(),
            }),
            vec![Replacement::new(Span::new(b, b + 4), "html`<b />`".to_string())],
            true,
        );
        assert_eq!(
            module.code,
            "#!/usr/bin/env node\nimport { html } from \"kaori.js\";\nconst a = html`<b />`;\n"
        );
        let map = module.map.expect("source map requested");
        assert!(map.contains("a.jsx"));
        assert!(map.contains("\"mappings\""));
    }

    #[test]
    fn test_header_mid_line_keeps_statements_apart() {
        let source = "'use client'; x;";
        let lines = LineIndex::new(source);
        let module = generate_module(
            source,
            "a.js",
            &lines,
            Some(HeaderInsertion {
                offset: 13,
                statement: "import { html } from \"kaori.js\";".to_string(),
            }),
            Vec::new(),
            false,
        );
        assert_eq!(
            module.code,
            "'use client';\nimport { html } from \"kaori.js\";\n x;"
        );
    }

    #[test]
    fn test_no_map_when_disabled() {
        let source = "x;";
        let lines = LineIndex::new(source);
        let module = generate_module(source, "a.js", &lines, None, Vec::new(), false);
        assert_eq!(module.code, "x;");
        assert!(module.map.is_none());
    }
}
