//! Multi-module compiles ordered by imports.

use anyhow::Context;
use serpent_ast::{arena::SourceTree, nodes::NodeKind};
use serpent_graph::DirectedGraph;
use tracing::debug;

use crate::{CompileOptions, CompiledUnit, SourceUnit, compile};

/// Modules named by the `import` and `from ... import` statements of `tree`.
///
/// Leading dots of relative imports are dropped. For `from pkg import name`
/// both `pkg` and `pkg.name` are reported, since either may be a module.
#[must_use]
pub fn imports_of(tree: &SourceTree) -> Vec<String> {
    let mut modules = Vec::new();
    for statement in tree.filter_nodes(|node| {
        node.is(NodeKind::ImportStatement) || node.is(NodeKind::ImportFromStatement)
    }) {
        if statement.is(NodeKind::ImportStatement) {
            for name in statement.fields("name") {
                let name = &tree[name];
                let dotted = match name.kind {
                    NodeKind::AliasedImport => name.field("name").map(|id| &tree[id]),
                    _ => Some(name),
                };
                if let Some(dotted) = dotted {
                    modules.push(dotted.text.clone());
                }
            }
            continue;
        }
        let Some(module) = statement.field("module_name") else {
            continue;
        };
        let module = tree[module].text.trim_start_matches('.');
        if module.is_empty() {
            continue;
        }
        modules.push(module.to_string());
        for name in statement.fields("name") {
            let name = &tree[name];
            let name = match name.kind {
                NodeKind::AliasedImport => name.field("name").map(|id| &tree[id]),
                _ => Some(name),
            };
            if let Some(name) = name {
                modules.push(format!("{module}.{}", name.text));
            }
        }
    }
    modules
}

/// Compiles `units` so that every module comes after the modules it imports.
///
/// Imports of modules outside `units` are ignored. Mapping ids continue from
/// one unit to the next, starting at `options.first_mapping_id`.
///
/// # Errors
///
/// Returns an error if a unit fails to parse or compile, or if the imports
/// between units form a cycle.
pub fn compile_project(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> anyhow::Result<Vec<CompiledUnit>> {
    let mut graph = DirectedGraph::new();
    for unit in units {
        graph.add_node(unit.module.clone());
    }
    for unit in units {
        let tree = crate::parse(&unit.code)
            .with_context(|| format!("failed to parse module `{}`", unit.module))?;
        for import in imports_of(&tree) {
            if import != unit.module && graph.contains(&import) {
                graph.add_arc(unit.module.clone(), import);
            }
        }
    }

    let order = graph.topological_ordering()?;
    debug!(?order, "module order");

    let mut options = options.clone();
    let mut compiled = Vec::with_capacity(units.len());
    for module in order {
        let Some(unit) = units.iter().find(|unit| unit.module == module) else {
            continue;
        };
        let result = compile(unit, &options)?;
        options.first_mapping_id = result.line_map.next_id();
        compiled.push(result);
    }
    Ok(compiled)
}
