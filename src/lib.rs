//! # Kaori JSX Compiler
//!
//! Rewrites JSX in a JavaScript/TypeScript module into tagged templates and
//! component calls for the `kaori.js` runtime:
//!
//! ```js
//! // Input
//! <button class="btn" onClick={save} disabled={!ready()}>Save</button>
//! <Card title={post.title}>{body}</Card>
//!
//! // Output
//! html`<button class="btn" @click=${save} disabled=${!ready()}>Save</button>`
//! html`${component(Card, { get title() { return post.title; }, children: body })}`
//! ```
//!
//! ## Pipeline
//!
//! 1. **Import resolution**: every identifier in the module is collected and
//!    existing `kaori` imports are read, so helper names never collide.
//! 2. **Lowering**: each outermost JSX node becomes markup IR and is compiled;
//!    lowercase tags into `html` templates, capitalized tags into
//!    `component(Name, props)`, fragments into templates or arrays.
//! 3. **Output**: compiled code is spliced over the JSX spans and one import
//!    for the helpers actually used is added.
//!
//! Each module compiles against its own context, so [`transform_batch`] can
//! run modules in parallel.

mod analysis;
mod attributes;
mod children;
mod codegen;
mod component;
mod diagnostics;
mod element;
mod imports;
mod ir;
mod jsx_lowerer;
mod options;
mod scope;
mod template;
mod transform;
mod visitor;

#[cfg(test)]
mod lowering_tests;

pub use analysis::{classify_shape, needs_getter_wrapping, ExprShape};
pub use attributes::AttributeKind;
pub use diagnostics::{CompileError, CompilerWarning, WARN_CHILDREN_CONFLICT, WARN_CLASS_CONFLICT};
pub use imports::SupportSymbol;
pub use options::CompileOptions;
pub use transform::{transform, transform_batch, SourceFile, TransformOutput};

#[cfg(feature = "napi")]
pub use transform::transform_jsx_native;
