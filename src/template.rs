//! Template section rendering
//!
//! A [`TemplateRenderer`] walks a schema and emits the `<template>` markup,
//! contributing imports, methods and statements through [`GenerationHooks`].
//! [`DefaultTemplateRenderer`] covers registered components, blocks, plain
//! HTML tags and a few builtins (`Text`, `Img`, `Slot`, `Icon`).

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use crate::context::{GenerationHooks, Statement, StatementPosition};
use crate::error::GenerateError;
use crate::schema::{PropValue, RegistryEntry, SchemaNode};

pub const ICON_PACKAGE: &str = "@opentiny/vue-icon";

// props consumed by builtins instead of becoming attributes
const NO_PROPS: &[&str] = &[];
const TEXT_PROPS: &[&str] = &["text"];
const ICON_PROPS: &[&str] = &["name"];

lazy_static! {
    static ref THIS_RE: Regex = Regex::new(r"\bthis\.").unwrap();
    static ref FUNCTION_NAME_RE: Regex =
        Regex::new(r"^\s*(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)").unwrap();
}

pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        schema: &SchemaNode,
        hooks: &mut dyn GenerationHooks,
    ) -> Result<String, Vec<GenerateError>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplateRenderer;

enum Frame<'a> {
    Open(&'a SchemaNode, usize),
    Close(String, usize),
}

/// What to do after a node's opening markup.
enum Visit {
    Done,
    /// Render children, then close the tag.
    Close(String),
    /// Walk children for diagnostics only; the document is already failing.
    Inspect,
}

impl TemplateRenderer for DefaultTemplateRenderer {
    fn render(
        &self,
        schema: &SchemaNode,
        hooks: &mut dyn GenerationHooks,
    ) -> Result<String, Vec<GenerateError>> {
        let mut walker = Walker {
            hooks,
            errors: Vec::new(),
            icons: HashSet::new(),
        };
        let mut out = String::from("<template>\n");

        // the root renders as a plain wrapper element
        let root_attrs = walker.attributes(schema, NO_PROPS);
        out.push_str(&format!("  <div{}>\n", root_attrs));

        let mut stack: Vec<Frame> = schema
            .children
            .iter()
            .rev()
            .map(|child| Frame::Open(child, 2))
            .collect();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Close(tag, depth) => {
                    out.push_str(&format!("{}</{}>\n", indent(depth), tag));
                }
                Frame::Open(node, depth) => match walker.open(node, depth, &mut out) {
                    Visit::Done => {}
                    Visit::Close(tag) => {
                        stack.push(Frame::Close(tag, depth));
                        stack.extend(
                            node.children
                                .iter()
                                .rev()
                                .map(|child| Frame::Open(child, depth + 1)),
                        );
                    }
                    Visit::Inspect => {
                        stack.extend(
                            node.children
                                .iter()
                                .rev()
                                .map(|child| Frame::Open(child, depth)),
                        );
                    }
                },
            }
        }

        out.push_str("  </div>\n</template>");

        if walker.errors.is_empty() {
            Ok(out)
        } else {
            Err(walker.errors)
        }
    }
}

struct Walker<'h> {
    hooks: &'h mut dyn GenerationHooks,
    errors: Vec<GenerateError>,
    icons: HashSet<String>,
}

impl Walker<'_> {
    /// Emit the opening markup for `node`.
    fn open(&mut self, node: &SchemaNode, depth: usize, out: &mut String) -> Visit {
        if node.component_name.is_empty() {
            self.errors.push(GenerateError::Render {
                node: if node.id.is_empty() {
                    "<anonymous>".to_string()
                } else {
                    node.id.clone()
                },
                reason: "missing componentName".to_string(),
            });
            return Visit::Inspect;
        }

        if matches!(node.condition, Some(Value::Bool(false))) {
            return Visit::Done;
        }

        let (tag, skip) = match node.component_name.as_str() {
            "Text" => ("span".to_string(), TEXT_PROPS),
            "Img" => ("img".to_string(), NO_PROPS),
            "Slot" => ("slot".to_string(), NO_PROPS),
            "Icon" => (self.icon_tag(node), ICON_PROPS),
            name => (name.to_string(), NO_PROPS),
        };

        let mut attrs = directives(node);
        attrs.push_str(&self.attributes(node, skip));

        let text = if node.component_name == "Text" {
            node.props.get("text").map(text_content)
        } else {
            None
        };

        let pad = indent(depth);
        match (node.children.is_empty(), text) {
            (true, None) => {
                out.push_str(&format!("{}<{}{} />\n", pad, tag, attrs));
                Visit::Done
            }
            (true, Some(text)) => {
                out.push_str(&format!("{}<{}{}>{}</{}>\n", pad, tag, attrs, text, tag));
                Visit::Done
            }
            (false, text) => {
                out.push_str(&format!("{}<{}{}>\n", pad, tag, attrs));
                if let Some(text) = text {
                    out.push_str(&format!("{}{}\n", indent(depth + 1), text));
                }
                Visit::Close(tag)
            }
        }
    }

    fn icon_tag(&mut self, node: &SchemaNode) -> String {
        let name = node
            .props
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Icon");
        let factory = lower_first(name);
        let tag = format!("Tiny{}", name);

        if self.icons.insert(name.to_string()) {
            self.hooks.add_import(
                ICON_PACKAGE,
                RegistryEntry::named(&factory, ICON_PACKAGE, &factory),
            );
            self.hooks.add_statement(Statement::new(
                StatementPosition::AfterImport,
                format!("const {} = {}()", tag, factory),
            ));
        }

        tag
    }

    fn attributes(&mut self, node: &SchemaNode, skip: &[&str]) -> String {
        let mut attrs = String::new();

        for (key, value) in &node.props {
            if skip.contains(&key.as_str()) {
                continue;
            }
            let name = if key == "className" { "class" } else { key.as_str() };
            let event = event_name(key);

            match PropValue::classify(value) {
                PropValue::Expression(code) => {
                    let prefix = if event.is_some() { "@" } else { ":" };
                    let attr = event.as_deref().unwrap_or(name);
                    attrs.push_str(&format!(" {}{}=\"{}\"", prefix, attr, attr_code(code)));
                }
                PropValue::Function(code) => {
                    let method = self.register_method(key, value, code);
                    match event {
                        Some(event) => attrs.push_str(&format!(" @{}=\"{}\"", event, method)),
                        None => attrs.push_str(&format!(" :{}=\"{}\"", name, method)),
                    }
                }
                PropValue::Literal(Value::Null) => {}
                PropValue::Literal(Value::String(s)) => {
                    attrs.push_str(&format!(" {}=\"{}\"", name, escape_attr(s)));
                }
                PropValue::Literal(other) => {
                    attrs.push_str(&format!(" :{}=\"{}\"", name, literal_binding(other)));
                }
            }
        }

        attrs
    }

    /// Register an inline function as a method, picking a free name.
    fn register_method(&mut self, key: &str, value: &Value, code: &str) -> String {
        let base = FUNCTION_NAME_RE
            .captures(code)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| match event_name(key) {
                Some(event) => format!("handle{}", upper_first(&event.replace(':', "_"))),
                None => format!("{}Fn", key),
            });

        let mut candidate = base.clone();
        let mut suffix = 1;
        while !self.hooks.add_method(&candidate, value.clone()) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

fn directives(node: &SchemaNode) -> String {
    let mut out = String::new();

    if let Some(condition) = &node.condition {
        if let PropValue::Expression(code) = PropValue::classify(condition) {
            out.push_str(&format!(" v-if=\"{}\"", attr_code(code)));
        }
    }

    if let Some(source) = &node.loop_source {
        let item = node.loop_args.first().map(String::as_str).unwrap_or("item");
        let index = node.loop_args.get(1).map(String::as_str).unwrap_or("index");
        let source = match PropValue::classify(source) {
            PropValue::Expression(code) => attr_code(code),
            _ => literal_binding(source),
        };
        out.push_str(&format!(" v-for=\"({}, {}) in {}\"", item, index, source));
        if !node.props.contains_key("key") {
            out.push_str(&format!(" :key=\"{}\"", index));
        }
    }

    out
}

fn text_content(value: &Value) -> String {
    match PropValue::classify(value) {
        PropValue::Expression(code) => format!("{{{{ {} }}}}", strip_this(code)),
        PropValue::Literal(Value::String(s)) => escape_text(s),
        PropValue::Literal(Value::Null) => String::new(),
        PropValue::Literal(other) => other.to_string(),
        PropValue::Function(_) => String::new(),
    }
}

/// `onClick` → `click`, `onUpdate:modelValue` → `update:modelValue`.
pub fn event_name(key: &str) -> Option<String> {
    let rest = key.strip_prefix("on")?;
    if rest.chars().next()?.is_ascii_uppercase() {
        Some(lower_first(rest))
    } else {
        None
    }
}

pub fn strip_this(code: &str) -> String {
    THIS_RE.replace_all(code, "").into_owned()
}

/// Expression code placed inside a double-quoted attribute.
fn attr_code(code: &str) -> String {
    escape_attr(&strip_this(code))
}

fn literal_binding(value: &Value) -> String {
    value.to_string().replace('"', "'")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(event_name("onClick").as_deref(), Some("click"));
        assert_eq!(event_name("onUpdate:modelValue").as_deref(), Some("update:modelValue"));
        assert_eq!(event_name("once"), None);
        assert_eq!(event_name("on"), None);
    }

    #[test]
    fn test_strip_this() {
        assert_eq!(strip_this("this.state.a + this.props.b"), "state.a + props.b");
        assert_eq!(strip_this("athis.x"), "athis.x");
    }

    #[test]
    fn test_literal_props_bind_as_json() {
        assert_eq!(literal_binding(&serde_json::json!({ "a": "b" })), "{'a':'b'}");
        assert_eq!(escape_attr("a \"b\" & c"), "a &quot;b&quot; &amp; c");
    }
}
