use oxc_ast::ast::{BindingIdentifier, IdentifierName, IdentifierReference, LabelIdentifier, Program};
use oxc_ast_visit::Visit;
use std::collections::HashSet;

/// Every identifier spelled anywhere in the module, bound or referenced.
/// Generated names must avoid all of them, including property names, so
/// collection is deliberately broader than scope analysis would be.
pub struct IdentifierCollector<'s> {
    pub names: &'s mut HashSet<String>,
}

impl<'s> IdentifierCollector<'s> {
    pub fn new(names: &'s mut HashSet<String>) -> Self {
        Self { names }
    }
}

impl<'a, 's> Visit<'a> for IdentifierCollector<'s> {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.names.insert(ident.name.to_string());
    }

    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.names.insert(ident.name.to_string());
    }

    fn visit_identifier_name(&mut self, ident: &IdentifierName<'a>) {
        self.names.insert(ident.name.to_string());
    }

    fn visit_label_identifier(&mut self, ident: &LabelIdentifier<'a>) {
        self.names.insert(ident.name.to_string());
    }
}

pub fn collect_identifiers(program: &Program<'_>) -> HashSet<String> {
    let mut names = HashSet::new();
    IdentifierCollector::new(&mut names).visit_program(program);
    names
}
