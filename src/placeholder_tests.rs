#[cfg(test)]
mod tests {
    use crate::placeholder::{lookup, substitute};
    use serde_json::json;

    #[test]
    fn test_nested_path_is_resolved() {
        let ctx = json!({ "a": { "b": 1 } });
        assert_eq!(substitute(&ctx, "x MARK{a.b}END y"), "x 1 y");
    }

    #[test]
    fn test_missing_path_resolves_to_empty() {
        assert_eq!(substitute(&json!({}), "MARK{missing.path}END"), "");
        assert_eq!(substitute(&json!({ "a": 1 }), "[MARK{a.b.c}END]"), "[]");
    }

    #[test]
    fn test_empty_path_resolves_to_empty() {
        assert_eq!(substitute(&json!({ "": "nope" }), "<MARK{}END>"), "<>");
    }

    #[test]
    fn test_multiple_markers_on_one_line() {
        let ctx = json!({ "meta": { "name": "demo", "version": "1.2.0" } });
        assert_eq!(
            substitute(&ctx, "MARK{meta.name}END@MARK{meta.version}END"),
            "demo@1.2.0"
        );
    }

    #[test]
    fn test_value_coercion() {
        let ctx = json!({ "flag": true, "none": null, "list": ["a", "b"] });
        assert_eq!(substitute(&ctx, "MARK{flag}END"), "true");
        assert_eq!(substitute(&ctx, "MARK{none}END"), "");
        assert_eq!(substitute(&ctx, "MARK{list.1}END"), "b");
        assert_eq!(substitute(&ctx, "MARK{list}END"), r#"["a","b"]"#);
    }

    #[test]
    fn test_idempotent_once_markers_are_gone() {
        let ctx = json!({ "name": "app", "i18n": { "enabled": false } });
        let template = "# MARK{name}END\ni18n: MARK{i18n.enabled}END\nMARK{nope}END";

        let once = substitute(&ctx, template);
        assert_eq!(substitute(&ctx, &once), once);
    }

    #[test]
    fn test_text_without_markers_is_untouched() {
        let template = "const a = { b: 1 }; // MARK without braces END";
        assert_eq!(substitute(&json!({ "b": 2 }), template), template);
    }

    #[test]
    fn test_lookup_through_non_container_fails() {
        let ctx = json!({ "a": "text" });
        assert!(lookup(&ctx, "a.length").is_none());
        assert_eq!(lookup(&ctx, "a"), Some(&json!("text")));
    }
}
