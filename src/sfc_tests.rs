#[cfg(test)]
mod tests {
    use crate::config::GeneratorConfig;
    use crate::error::{GenerateError, GEN_WARN_UNKNOWN_COMPONENT};
    use crate::schema::{RegistryEntry, SchemaNode};
    use crate::sfc::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;

    fn schema(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    fn tiny_registry() -> Vec<RegistryEntry> {
        vec![RegistryEntry::named("TinyButton", "@opentiny/vue", "Button")]
    }

    fn with_script() -> GeneratorConfig {
        GeneratorConfig {
            emit_script: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_template_and_style_without_script() {
        let page = schema(json!({
            "componentName": "Page",
            "css": ".page { padding: 8px; }",
            "children": [
                { "componentName": "TinyButton", "props": { "text": "Save", "type": "primary" } }
            ]
        }));

        let doc = assemble(&page, &tiny_registry(), &GeneratorConfig::default()).unwrap();

        let expected = "<template>
  <div>
    <TinyButton text=\"Save\" type=\"primary\" />
  </div>
</template>

<style scoped>
.page { padding: 8px; }
</style>";
        assert_eq!(doc.content, expected);
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_setup_script_from_hooks() {
        let page = schema(json!({
            "componentName": "Page",
            "state": { "count": 0 },
            "children": [
                {
                    "componentName": "TinyButton",
                    "props": {
                        "onClick": {
                            "type": "JSFunction",
                            "value": "function onClick() { this.state.count++ }"
                        }
                    }
                },
                {
                    "componentName": "Text",
                    "props": { "text": { "type": "JSExpression", "value": "this.state.count" } }
                }
            ]
        }));

        let doc = assemble(&page, &tiny_registry(), &with_script()).unwrap();

        let expected = "<template>
  <div>
    <TinyButton @click=\"onClick\" />
    <span>{{ state.count }}</span>
  </div>
</template>
<script setup>
import { reactive } from 'vue'
import { Button as TinyButton } from '@opentiny/vue'

const state = reactive({
  count: 0,
})

const onClick = function onClick() { state.count++ }
</script>
<style scoped></style>";
        assert_eq!(doc.content, expected);
    }

    #[test]
    fn test_loop_and_condition_directives() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [
                {
                    "componentName": "div",
                    "condition": { "type": "JSExpression", "value": "this.state.show" },
                    "loop": { "type": "JSExpression", "value": "this.state.items" },
                    "loopArgs": ["row"],
                    "children": [{ "componentName": "Text", "props": { "text": "hi" } }]
                },
                { "componentName": "p", "condition": false }
            ]
        }));

        let doc = assemble(&page, &[], &GeneratorConfig::default()).unwrap();

        assert!(doc.content.contains(
            "    <div v-if=\"state.show\" v-for=\"(row, index) in state.items\" :key=\"index\">\n      <span>hi</span>\n    </div>\n"
        ));
        assert!(!doc.content.contains("<p"));
    }

    #[test]
    fn test_icon_builtin_contributes_import_and_statement() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [
                { "componentName": "Icon", "props": { "name": "IconDel" } },
                { "componentName": "Icon", "props": { "name": "IconDel" } }
            ]
        }));

        let doc = assemble(&page, &[], &with_script()).unwrap();

        assert_eq!(doc.content.matches("<TinyIconDel />").count(), 2);
        assert!(doc
            .content
            .contains("import { iconDel } from '@opentiny/vue-icon'\n\nconst TinyIconDel = iconDel()"));
        assert_eq!(doc.content.matches("const TinyIconDel").count(), 1);
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_block_imports_use_normalized_base_path() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [{ "componentName": "Header", "componentType": "Block" }]
        }));
        let config = GeneratorConfig {
            fragment_base_path: "../blocks/".to_string(),
            emit_script: true,
            ..Default::default()
        };

        let doc = assemble(&page, &[], &config).unwrap();

        assert!(doc.content.contains("import Header from '../blocks/Header.vue'"));
        assert!(doc.content.contains("    <Header />\n"));
        assert_eq!(config.fragment_base_path, "../blocks/");
    }

    #[test]
    fn test_root_base_path_imports_from_root() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [{ "componentName": "Header", "componentType": "Block" }]
        }));
        let config = GeneratorConfig {
            fragment_base_path: "/".to_string(),
            emit_script: true,
            ..Default::default()
        };

        let doc = assemble(&page, &[], &config).unwrap();

        assert!(doc.content.contains("import Header from '/Header.vue'"));
        assert!(!doc.content.contains("//Header.vue"));
    }

    #[test]
    #[traced_test]
    fn test_unknown_components_become_warnings() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [
                { "componentName": "TinyGrid" },
                { "componentName": "div" },
                { "componentName": "Text", "props": { "text": "x" } }
            ]
        }));

        let doc = assemble(&page, &[], &GeneratorConfig::default()).unwrap();

        assert_eq!(doc.warnings.len(), 1);
        assert_eq!(doc.warnings[0].code, GEN_WARN_UNKNOWN_COMPONENT);
        assert_eq!(doc.warnings[0].source.as_deref(), Some("Page"));
        assert!(logs_contain("assembled document"));
    }

    #[test]
    fn test_nodes_without_name_fail_the_document() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [
                { "id": "a1" },
                { "componentName": "div", "children": [{}] }
            ]
        }));

        let errors = assemble(&page, &[], &GeneratorConfig::default()).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], GenerateError::Render { node, .. } if node == "a1"));
        assert!(matches!(&errors[1], GenerateError::Render { node, .. } if node == "<anonymous>"));
    }

    #[test]
    fn test_quotes_in_expressions_stay_inside_attributes() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [{
                "componentName": "div",
                "condition": { "type": "JSExpression", "value": "this.state.mode === \"edit\"" },
                "props": { "title": { "type": "JSExpression", "value": "this.state.a + \"x\"" } }
            }, {
                "componentName": "li",
                "loop": { "type": "JSExpression", "value": "this.state.rows[\"open\"]" }
            }]
        }));

        let doc = assemble(&page, &[], &GeneratorConfig::default()).unwrap();

        assert!(doc.content.contains(
            "    <div v-if=\"state.mode === &quot;edit&quot;\" :title=\"state.a + &quot;x&quot;\" />\n"
        ));
        assert!(doc.content.contains(
            "    <li v-for=\"(item, index) in state.rows[&quot;open&quot;]\" :key=\"index\" />\n"
        ));
    }

    #[test]
    fn test_nameless_descendants_are_all_reported() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [{
                "id": "outer",
                "children": [{ "id": "inner" }, { "componentName": "span", "children": [{ "id": "deep" }] }]
            }]
        }));

        let errors = assemble(&page, &[], &GeneratorConfig::default()).unwrap_err();
        let nodes: Vec<&str> = errors
            .iter()
            .map(|e| match e {
                GenerateError::Render { node, .. } => node.as_str(),
                _ => "",
            })
            .collect();

        assert_eq!(nodes, vec!["outer", "inner", "deep"]);
    }

    #[test]
    fn test_concurrent_assemblies_are_independent() {
        let page = schema(json!({
            "componentName": "Page",
            "children": [{
                "componentName": "TinyButton",
                "props": { "onClick": { "type": "JSFunction", "value": "function () {}" } }
            }]
        }));
        let registry = tiny_registry();
        let config = with_script();
        let reference = assemble(&page, &registry, &config).unwrap();

        let outputs: Vec<AssembledDocument> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| assemble(&page, &registry, &config).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for output in outputs {
            assert_eq!(output, reference);
        }
        assert_eq!(reference.content.matches("const handleClick =").count(), 1);
    }
}
