use crate::codegen::{generate_module, HeaderInsertion};
use crate::diagnostics::{CompileError, CompilerWarning, LineIndex};
use crate::imports::{BindingTable, SupportSymbol};
use crate::jsx_lowerer::JsxLowerer;
use crate::options::CompileOptions;
#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// INPUT/OUTPUT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg_attr(feature = "napi", napi(object))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    /// Source map JSON, when enabled.
    pub map: Option<String>,
    pub warnings: Vec<CompilerWarning>,
    /// Canonical names of the support symbols the added import brings in.
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub code: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-MODULE CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything one module transform shares across its recursive compilers.
pub struct TransformContext<'s> {
    pub source: &'s str,
    pub file_path: &'s str,
    pub options: &'s CompileOptions,
    pub bindings: BindingTable,
    pub warnings: Vec<CompilerWarning>,
    pub compiled_nodes: usize,
    lines: LineIndex,
}

impl<'s> TransformContext<'s> {
    pub fn new(
        source: &'s str,
        file_path: &'s str,
        options: &'s CompileOptions,
        bindings: BindingTable,
    ) -> Self {
        Self {
            source,
            file_path,
            options,
            bindings,
            warnings: Vec::new(),
            compiled_nodes: 0,
            lines: LineIndex::new(source),
        }
    }

    /// Local name of a support symbol, marking it for import.
    pub fn symbol(&mut self, symbol: SupportSymbol) -> String {
        self.bindings.use_symbol(symbol)
    }

    pub fn warn(&mut self, code: &str, message: String, span: Span) {
        let (line, column) = self.lines.location(self.source, span.start);
        let warning = CompilerWarning::new(code, &message, self.file_path, line, column);
        if self.options.log_warnings {
            tracing::warn!(
                code = %warning.code,
                file = %warning.file,
                line = warning.line,
                column = warning.column,
                "{}",
                warning.message
            );
        }
        self.warnings.push(warning);
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

fn source_type_for(file_path: &str) -> SourceType {
    let source_type = SourceType::from_path(file_path)
        .unwrap_or_default()
        .with_module(true);
    if source_type.is_typescript() && !file_path.ends_with(".tsx") {
        // `.ts` keeps angle-bracket casts unambiguous.
        source_type
    } else {
        source_type.with_jsx(true)
    }
}

/// Compiles every JSX node in one module.
pub fn transform(
    source: &str,
    file_path: &str,
    options: &CompileOptions,
) -> Result<TransformOutput, CompileError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type_for(file_path)).parse();
    if !ret.errors.is_empty() {
        return Err(CompileError::Parse {
            file: file_path.to_string(),
            messages: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }
    let program = ret.program;

    let bindings = BindingTable::resolve(&program, options);
    let mut ctx = TransformContext::new(source, file_path, options, bindings);

    let mut lowerer = JsxLowerer::new(&mut ctx);
    lowerer.visit_program(&program);
    let replacements = lowerer.replacements;

    let pending = ctx.bindings.pending();
    let header = ctx
        .bindings
        .import_statement(&options.package_name)
        .map(|statement| HeaderInsertion {
            offset: import_insertion_offset(source, &program),
            statement,
        });

    tracing::debug!(
        file = file_path,
        nodes = ctx.compiled_nodes,
        imports = pending.len(),
        warnings = ctx.warnings.len(),
        "compiled module"
    );

    let module = generate_module(
        source,
        file_path,
        ctx.lines(),
        header,
        replacements,
        options.source_map,
    );

    Ok(TransformOutput {
        code: module.code,
        map: module.map,
        warnings: ctx.warnings,
        imports: pending.iter().map(|s| s.canonical().to_string()).collect(),
    })
}

/// After the hashbang and the directive prologue.
fn import_insertion_offset(source: &str, program: &Program<'_>) -> u32 {
    let mut offset = program.hashbang.as_ref().map_or(0, |h| h.span.end);
    if let Some(directive) = program.directives.last() {
        offset = offset.max(directive.span.end);
    }
    if offset == 0 {
        return 0;
    }
    // A directive's terminating `;` may sit outside its span.
    let rest = &source[offset as usize..];
    match rest.trim_start_matches([' ', '\t']).strip_prefix(';') {
        Some(after) => offset + (rest.len() - after.len()) as u32,
        None => offset,
    }
}

/// Compiles independent modules in parallel; results keep input order.
pub fn transform_batch(
    files: &[SourceFile],
    options: &CompileOptions,
) -> Vec<Result<TransformOutput, CompileError>> {
    files
        .par_iter()
        .map(|file| transform(&file.code, &file.path, options))
        .collect()
}

#[cfg(feature = "napi")]
#[napi(js_name = "transformJsx")]
pub fn transform_jsx_native(
    code: String,
    file_path: String,
    options_json: Option<String>,
) -> napi::Result<TransformOutput> {
    let options = match options_json {
        Some(json) => CompileOptions::from_json(&json).map_err(CompileError::from),
        None => Ok(CompileOptions::default()),
    }
    .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    transform(&code, &file_path, &options).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_for(source: &str) -> u32 {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type_for("a.jsx")).parse();
        assert!(ret.errors.is_empty());
        import_insertion_offset(source, &ret.program)
    }

    #[test]
    fn test_source_types() {
        assert!(source_type_for("a.jsx").is_jsx());
        assert!(source_type_for("a.js").is_jsx());
        assert!(source_type_for("a.tsx").is_jsx());
        assert!(!source_type_for("a.ts").is_jsx());
        assert!(source_type_for("a.ts").is_typescript());
    }

    #[test]
    fn test_import_insertion_offsets() {
        assert_eq!(offset_for("const a = 1;"), 0);
        let source = "'use strict';\n'use client';\nx();";
        assert_eq!(offset_for(source) as usize, source.find("\nx").unwrap());
        let source = "#!/usr/bin/env node\nx();";
        assert_eq!(offset_for(source) as usize, source.find('\n').unwrap());
    }

    #[test]
    fn test_output_serializes_camel_case() {
        let output = transform(
            "const a = <A children=\"x\">y</A>;",
            "a.jsx",
            &CompileOptions {
                log_warnings: false,
                ..CompileOptions::default()
            },
        )
        .unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["map"].is_string());
        assert_eq!(json["imports"], serde_json::json!(["html", "component"]));
        assert_eq!(json["warnings"][0]["code"], "KAORI-W001");
        assert_eq!(json["warnings"][0]["line"], 1);
    }
}
