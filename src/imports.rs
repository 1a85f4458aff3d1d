use crate::options::CompileOptions;
use crate::scope::collect_identifiers;
use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleExportName, Program, Statement};
use std::collections::HashSet;

/// Runtime helpers the generated code calls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportSymbol {
    Html,
    Component,
    Ref,
    StyleMap,
    ClassMap,
    MergeProps,
    Spread,
}

impl SupportSymbol {
    /// Import order of the synthesized statement.
    pub const ALL: [SupportSymbol; 7] = [
        SupportSymbol::Html,
        SupportSymbol::Component,
        SupportSymbol::Ref,
        SupportSymbol::StyleMap,
        SupportSymbol::ClassMap,
        SupportSymbol::MergeProps,
        SupportSymbol::Spread,
    ];

    pub fn canonical(self) -> &'static str {
        match self {
            SupportSymbol::Html => "html",
            SupportSymbol::Component => "component",
            SupportSymbol::Ref => "ref",
            SupportSymbol::StyleMap => "styleMap",
            SupportSymbol::ClassMap => "classMap",
            SupportSymbol::MergeProps => "mergeProps",
            SupportSymbol::Spread => "spread",
        }
    }

    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|symbol| symbol.canonical() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
struct Binding {
    local: String,
    /// Already imported by the module itself.
    existing: bool,
    needed: bool,
}

/// Canonical support symbol to local name, built once per module.
#[derive(Debug, Clone)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn resolve(program: &Program<'_>, options: &CompileOptions) -> Self {
        let mut taken = collect_identifiers(program);
        let existing = collect_support_imports(program, options);
        Self::from_parts(&mut taken, &existing)
    }

    fn from_parts(taken: &mut HashSet<String>, existing: &[(SupportSymbol, String)]) -> Self {
        let bindings = SupportSymbol::ALL
            .into_iter()
            .map(|symbol| {
                if let Some((_, local)) = existing.iter().find(|(s, _)| *s == symbol) {
                    return Binding {
                        local: local.clone(),
                        existing: true,
                        needed: false,
                    };
                }
                let local = allocate_free_name(symbol.canonical(), taken);
                taken.insert(local.clone());
                Binding {
                    local,
                    existing: false,
                    needed: false,
                }
            })
            .collect();
        Self { bindings }
    }

    /// Local name for `symbol`, marking it needed.
    pub fn use_symbol(&mut self, symbol: SupportSymbol) -> String {
        let binding = &mut self.bindings[symbol.index()];
        binding.needed = true;
        binding.local.clone()
    }

    pub fn local_name(&self, symbol: SupportSymbol) -> &str {
        &self.bindings[symbol.index()].local
    }

    pub fn is_existing(&self, symbol: SupportSymbol) -> bool {
        self.bindings[symbol.index()].existing
    }

    /// Needed symbols the module does not import yet, in import order.
    pub fn pending(&self) -> Vec<SupportSymbol> {
        SupportSymbol::ALL
            .into_iter()
            .filter(|symbol| self.bindings[symbol.index()].needed && !self.is_existing(*symbol))
            .collect()
    }

    pub fn import_statement(&self, package_name: &str) -> Option<String> {
        let pending = self.pending();
        if pending.is_empty() {
            return None;
        }
        let specifiers: Vec<String> = pending
            .iter()
            .map(|symbol| {
                let canonical = symbol.canonical();
                let local = self.local_name(*symbol);
                if local == canonical {
                    canonical.to_string()
                } else {
                    format!("{} as {}", canonical, local)
                }
            })
            .collect();
        Some(format!(
            "import {{ {} }} from {};",
            specifiers.join(", "),
            quote_specifier(package_name)
        ))
    }
}

fn quote_specifier(package_name: &str) -> String {
    serde_json::to_string(package_name).unwrap_or_else(|_| format!("\"{}\"", package_name))
}

/// `name`, or `name1`, `name2`, ... until unused.
pub fn allocate_free_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{}{}", name, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Support symbols already imported by value, with their local aliases.
pub fn collect_support_imports(
    program: &Program<'_>,
    options: &CompileOptions,
) -> Vec<(SupportSymbol, String)> {
    let mut found = Vec::new();
    for stmt in &program.body {
        let Statement::ImportDeclaration(decl) = stmt else {
            continue;
        };
        if decl.import_kind.is_type() || !options.is_support_source(decl.source.value.as_str()) {
            continue;
        }
        let Some(specifiers) = &decl.specifiers else {
            continue;
        };
        for spec in specifiers {
            let ImportDeclarationSpecifier::ImportSpecifier(spec) = spec else {
                continue;
            };
            if spec.import_kind.is_type() {
                continue;
            }
            let imported = match &spec.imported {
                ModuleExportName::IdentifierName(id) => id.name.as_str(),
                ModuleExportName::IdentifierReference(id) => id.name.as_str(),
                ModuleExportName::StringLiteral(s) => s.value.as_str(),
            };
            if let Some(symbol) = SupportSymbol::from_canonical(imported) {
                if !found.iter().any(|(s, _)| *s == symbol) {
                    found.push((symbol, spec.local.name.to_string()));
                }
            }
        }
    }
    found
}
