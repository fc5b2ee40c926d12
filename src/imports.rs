//! Import resolution
//!
//! Walks a schema tree, collects the distinct component and block names it
//! references, and maps them to package imports:
//! - registered components are grouped by `package`, keeping registry order;
//! - blocks become default imports from `${fragment_base_path}/${name}${fragment_suffix}`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::schema::{RegistryEntry, SchemaNode};

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT MAP
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportGroup {
    pub package: String,
    pub imports: Vec<RegistryEntry>,
}

/// Package → import descriptors, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMap {
    groups: Vec<ImportGroup>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, package: &str) -> Option<&[RegistryEntry]> {
        self.groups
            .iter()
            .find(|g| g.package == package)
            .map(|g| g.imports.as_slice())
    }

    pub fn get_mut(&mut self, package: &str) -> Option<&mut Vec<RegistryEntry>> {
        self.groups
            .iter_mut()
            .find(|g| g.package == package)
            .map(|g| &mut g.imports)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.get(package).is_some()
    }

    /// Append to the group for `package`, creating it if needed.
    pub fn push(&mut self, package: &str, entry: RegistryEntry) {
        match self.get_mut(package) {
            Some(imports) => imports.push(entry),
            None => self.groups.push(ImportGroup {
                package: package.to_string(),
                imports: vec![entry],
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPaths<'a> {
    pub fragment_base_path: &'a str,
    pub fragment_suffix: &'a str,
}

/// Distinct names referenced below a schema root, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencedNames {
    pub components: Vec<String>,
    pub blocks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedImports {
    pub package_imports: ImportMap,
    pub fragment_imports: ImportMap,
    /// Component names with no registry entry.
    pub unresolved: Vec<String>,
}

/// Pre-order walk over `schema.children` (the root itself is not collected).
pub fn collect_names(schema: &SchemaNode) -> ReferencedNames {
    let mut names = ReferencedNames::default();
    let mut seen_components = HashSet::new();
    let mut seen_blocks = HashSet::new();

    let mut stack: Vec<&SchemaNode> = schema.children.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !node.component_name.is_empty() {
            let name = &node.component_name;
            if node.is_block() {
                if seen_blocks.insert(name.as_str()) {
                    names.blocks.push(name.clone());
                }
            } else if seen_components.insert(name.as_str()) {
                names.components.push(name.clone());
            }
        }
        stack.extend(node.children.iter().rev());
    }

    names
}

/// `{base}/{name}{suffix}`; a root base path yields `/{name}{suffix}`.
pub fn block_import_path(paths: &ImportPaths<'_>, name: &str) -> String {
    let base = paths.fragment_base_path.trim_end_matches('/');
    format!("{}/{}{}", base, name, paths.fragment_suffix)
}

pub fn resolve_imports(
    schema: &SchemaNode,
    registry: &[RegistryEntry],
    paths: &ImportPaths<'_>,
) -> ResolvedImports {
    let names = collect_names(schema);
    let wanted: HashSet<&str> = names.components.iter().map(String::as_str).collect();

    let mut package_imports = ImportMap::new();
    let mut registered = HashSet::new();
    for entry in registry {
        if wanted.contains(entry.component_name.as_str()) {
            registered.insert(entry.component_name.as_str());
            package_imports.push(&entry.package, entry.clone());
        }
    }

    let mut fragment_imports = ImportMap::new();
    for name in &names.blocks {
        let source = block_import_path(paths, name);
        fragment_imports.push(&source, RegistryEntry::default_import(name, &source));
    }

    let unresolved = names
        .components
        .iter()
        .filter(|name| !registered.contains(name.as_str()))
        .cloned()
        .collect();

    ResolvedImports {
        package_imports,
        fragment_imports,
        unresolved,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATEMENT RENDERING
// ═══════════════════════════════════════════════════════════════════════════════

/// One `import` line per package: default binding first, then named bindings.
pub fn render_import_statements(map: &ImportMap) -> Vec<String> {
    map.iter().map(render_group).collect()
}

fn render_group(group: &ImportGroup) -> String {
    let default = group.imports.iter().find(|i| !i.destructuring);

    let mut named: Vec<String> = Vec::new();
    for import in group.imports.iter().filter(|i| i.destructuring) {
        let binding = if import.export_name() == import.component_name {
            import.component_name.clone()
        } else {
            format!("{} as {}", import.export_name(), import.component_name)
        };
        if !named.contains(&binding) {
            named.push(binding);
        }
    }

    let mut clause = Vec::new();
    if let Some(default) = default {
        clause.push(default.component_name.clone());
    }
    if !named.is_empty() {
        clause.push(format!("{{ {} }}", named.join(", ")));
    }

    if clause.is_empty() {
        format!("import '{}'", group.package)
    } else {
        format!("import {} from '{}'", clause.join(", "), group.package)
    }
}
