//! # Single-File Component Assembly
//!
//! Turns one schema into one `.vue` document:
//!
//! 1. normalize the config (the caller's value is never touched);
//! 2. resolve imports into the package and block import maps;
//! 3. seed a fresh [`GenerationContext`] from copies of the schema's state,
//!    methods and css;
//! 4. let the template renderer walk the schema, contributing through hooks;
//! 5. join template, script and style sections.
//!
//! Each call owns its context, so concurrent assemblies never interfere.

use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::{GenerateError, LogEntry};
use crate::imports::{resolve_imports, ImportPaths};
use crate::schema::{RegistryEntry, SchemaNode};
use crate::script::{EmptyScript, ScriptRenderer, SetupScript};
use crate::style::generate_style_tag;
use crate::template::{DefaultTemplateRenderer, TemplateRenderer};

/// Builtin names that never need a registry entry.
const BUILTIN_COMPONENTS: [&str; 7] = ["Page", "Block", "Text", "Img", "Slot", "Icon", "Template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
    pub content: String,
    /// Non-fatal findings such as components missing from the registry.
    pub warnings: Vec<LogEntry>,
}

pub fn assemble(
    schema: &SchemaNode,
    registry: &[RegistryEntry],
    config: &GeneratorConfig,
) -> Result<AssembledDocument, Vec<GenerateError>> {
    assemble_with(schema, registry, config, &DefaultTemplateRenderer)
}

#[tracing::instrument(skip_all, fields(component = %schema.component_name))]
pub fn assemble_with(
    schema: &SchemaNode,
    registry: &[RegistryEntry],
    config: &GeneratorConfig,
    renderer: &dyn TemplateRenderer,
) -> Result<AssembledDocument, Vec<GenerateError>> {
    let config = config.normalized();
    let paths = ImportPaths {
        fragment_base_path: &config.fragment_base_path,
        fragment_suffix: &config.fragment_suffix,
    };

    let resolved = resolve_imports(schema, registry, &paths);
    let warnings = resolved
        .unresolved
        .iter()
        .filter(|name| needs_registry_entry(name))
        .map(|name| {
            GenerateError::UnknownComponent { name: name.clone() }
                .to_log_entry(Some(&schema.component_name))
        })
        .collect::<Vec<_>>();

    let mut ctx = GenerationContext::new(schema, resolved, &config);

    let template = renderer.render(schema, &mut ctx)?;

    let script = if config.emit_script {
        SetupScript.render(&ctx)
    } else {
        EmptyScript.render(&ctx)
    };
    let style = generate_style_tag(&ctx.css, &ctx.style_config);

    tracing::debug!(
        packages = ctx.package_imports.len(),
        blocks = ctx.fragment_imports.len(),
        warnings = warnings.len(),
        "assembled document"
    );

    Ok(AssembledDocument {
        content: format!("{}\n{}\n{}", template, script, style),
        warnings,
    })
}

/// PascalCase names that are not builtins are expected in the registry;
/// lowercase names are plain HTML tags.
fn needs_registry_entry(name: &str) -> bool {
    !BUILTIN_COMPONENTS.contains(&name)
        && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
