//! Script section rendering
//!
//! The base pipeline emits no script ([`EmptyScript`]). [`SetupScript`] turns the
//! generation context into a `<script setup>` block: imports, statement buckets
//! in position order, a `reactive` state object, methods and lifecycle hooks.

use serde_json::Value;

use crate::context::{GenerationContext, StatementPosition};
use crate::imports::{render_import_statements, ImportMap};
use crate::schema::{PropValue, RegistryEntry};
use crate::template::strip_this;

const VUE_LIFECYCLES: [&str; 9] = [
    "onBeforeMount",
    "onMounted",
    "onBeforeUpdate",
    "onUpdated",
    "onBeforeUnmount",
    "onUnmounted",
    "onErrorCaptured",
    "onActivated",
    "onDeactivated",
];

pub trait ScriptRenderer: Send + Sync {
    fn render(&self, ctx: &GenerationContext) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScript;

impl ScriptRenderer for EmptyScript {
    fn render(&self, _ctx: &GenerationContext) -> String {
        String::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetupScript;

impl ScriptRenderer for SetupScript {
    fn render(&self, ctx: &GenerationContext) -> String {
        let lifecycles: Vec<(&str, &Value)> = ctx
            .life_cycles
            .iter()
            .filter_map(|(hook, body)| {
                if VUE_LIFECYCLES.contains(&hook.as_str()) {
                    Some((hook.as_str(), body))
                } else {
                    tracing::debug!(hook = %hook, "skipping unsupported lifecycle");
                    None
                }
            })
            .collect();

        let mut sections: Vec<String> = Vec::new();

        // imports
        let mut vue = ImportMap::new();
        if !ctx.state.is_empty() {
            vue.push("vue", RegistryEntry::named("reactive", "vue", "reactive"));
        }
        for (hook, _) in &lifecycles {
            vue.push("vue", RegistryEntry::named(hook, "vue", hook));
        }
        let mut imports = render_import_statements(&vue);
        imports.extend(render_import_statements(&ctx.package_imports));
        imports.extend(render_import_statements(&ctx.fragment_imports));
        push_lines(&mut sections, imports);

        let bucket = |position: StatementPosition| ctx.statements.get(position).to_vec();

        push_lines(&mut sections, bucket(StatementPosition::AfterImport));
        push_lines(&mut sections, bucket(StatementPosition::BeforeProps));
        push_lines(&mut sections, bucket(StatementPosition::AfterProps));
        push_lines(&mut sections, bucket(StatementPosition::BeforeState));

        if !ctx.state.is_empty() {
            let mut state = String::from("const state = reactive({\n");
            for (key, value) in &ctx.state {
                state.push_str(&format!("  {}: {},\n", key, js_value(value)));
            }
            state.push_str("})");
            sections.push(state);
        }

        push_lines(&mut sections, bucket(StatementPosition::AfterState));
        push_lines(&mut sections, bucket(StatementPosition::BeforeMethods));

        push_lines(
            &mut sections,
            ctx.methods
                .iter()
                .map(|(key, value)| format!("const {} = {}", key, code_value(value)))
                .collect(),
        );

        push_lines(&mut sections, bucket(StatementPosition::AfterMethods));

        push_lines(
            &mut sections,
            lifecycles
                .iter()
                .map(|(hook, body)| format!("{}({})", hook, code_value(body)))
                .collect(),
        );

        let mut open = String::from("<script");
        if ctx.script_config.setup {
            open.push_str(" setup");
        }
        if !ctx.script_config.lang.is_empty() {
            open.push_str(&format!(" lang=\"{}\"", ctx.script_config.lang));
        }
        open.push('>');

        format!("{}\n{}\n</script>", open, sections.join("\n\n"))
    }
}

fn push_lines(sections: &mut Vec<String>, lines: Vec<String>) {
    if !lines.is_empty() {
        sections.push(lines.join("\n"));
    }
}

/// Source text for a state initializer.
fn js_value(value: &Value) -> String {
    match PropValue::classify(value) {
        PropValue::Expression(code) | PropValue::Function(code) => strip_this(code),
        PropValue::Literal(Value::String(s)) => format!("'{}'", s.replace('\'', "\\'")),
        PropValue::Literal(other) => other.to_string(),
    }
}

/// Method and lifecycle bodies: plain strings are already code.
fn code_value(value: &Value) -> String {
    match value {
        Value::String(code) => strip_this(code),
        other => js_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{GenerationHooks, Statement};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_script_renders_nothing() {
        assert_eq!(EmptyScript.render(&GenerationContext::default()), "");
    }

    #[test]
    fn test_sections_follow_statement_positions() {
        let mut ctx = GenerationContext::default();
        ctx.add_statement(Statement::new(StatementPosition::AfterMethods, "done()"));
        ctx.add_statement(Statement::new(StatementPosition::BeforeState, "const t = 1"));
        ctx.add_state("name", json!("it's"));
        ctx.add_method("go", json!("function go() { this.state.name = '' }"));
        ctx.life_cycles.insert("onMounted".to_string(), json!("() => {}"));
        ctx.life_cycles.insert("setup".to_string(), json!("() => {}"));
        ctx.set_script_config(&json!({ "lang": "ts" }));

        let expected = "<script setup lang=\"ts\">
import { reactive, onMounted } from 'vue'

const t = 1

const state = reactive({
  name: 'it\\'s',
})

const go = function go() { state.name = '' }

done()

onMounted(() => {})
</script>";
        assert_eq!(SetupScript.render(&ctx), expected);
    }

    #[test]
    fn test_setup_attribute_follows_config() {
        let mut ctx = GenerationContext::default();
        ctx.set_script_config(&json!({ "setup": false }));
        assert_eq!(SetupScript.render(&ctx), "<script>\n\n</script>");
    }
}
