use crate::config::StyleConfig;

/// `<style scoped lang="less">` block around the accumulated css.
pub fn generate_style_tag(css: &str, config: &StyleConfig) -> String {
    let mut attrs = String::new();
    if config.scoped {
        attrs.push_str(" scoped");
    }
    if !config.lang.is_empty() {
        attrs.push_str(&format!(" lang=\"{}\"", config.lang));
    }

    let css = css.trim();
    if css.is_empty() {
        format!("<style{}></style>", attrs)
    } else {
        format!("<style{}>\n{}\n</style>", attrs, css)
    }
}
