//! Project scaffold: the fixed set of files every generated application ships
//! with. Templates are embedded at compile time and stamped with
//! [`substitute`] against the template context.

use serde_json::Value;

use crate::manifest::package_json;
use crate::placeholder::substitute;
use crate::schema::{OutputFile, RegistryEntry};

const ROOT: &str = ".";
const SRC: &str = "./src";
const LOWCODE_CONFIG: &str = "./src/lowcodeConfig";
const HTTP: &str = "./src/http";

/// How a template's body is turned into file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stamp {
    /// Placeholders are replaced from the context.
    Substitute,
    /// Copied unchanged.
    Verbatim,
}

struct ScaffoldFile {
    file_name: &'static str,
    path: &'static str,
    body: &'static str,
    stamp: Stamp,
}

const FILES: &[ScaffoldFile] = &[
    ScaffoldFile {
        file_name: "README.md",
        path: ROOT,
        body: include_str!("scaffold/files/README.md"),
        stamp: Stamp::Substitute,
    },
    ScaffoldFile {
        file_name: "vite.config.js",
        path: ROOT,
        body: include_str!("scaffold/files/vite.config.js"),
        stamp: Stamp::Substitute,
    },
    ScaffoldFile {
        file_name: ".gitignore",
        path: ROOT,
        body: include_str!("scaffold/files/gitignore.txt"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "index.html",
        path: ROOT,
        body: include_str!("scaffold/files/index.html"),
        stamp: Stamp::Substitute,
    },
    ScaffoldFile {
        file_name: "main.js",
        path: SRC,
        body: include_str!("scaffold/files/src/main.js"),
        stamp: Stamp::Substitute,
    },
    ScaffoldFile {
        file_name: "App.vue",
        path: SRC,
        body: include_str!("scaffold/files/src/App.vue"),
        stamp: Stamp::Substitute,
    },
    ScaffoldFile {
        file_name: "bridge.js",
        path: LOWCODE_CONFIG,
        body: include_str!("scaffold/files/src/lowcodeConfig/bridge.js"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "dataSource.js",
        path: LOWCODE_CONFIG,
        body: include_str!("scaffold/files/src/lowcodeConfig/dataSource.js"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "lowcode.js",
        path: LOWCODE_CONFIG,
        body: include_str!("scaffold/files/src/lowcodeConfig/lowcode.js"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "axios.js",
        path: HTTP,
        body: include_str!("scaffold/files/src/http/axios.js"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "config.js",
        path: HTTP,
        body: include_str!("scaffold/files/src/http/config.js"),
        stamp: Stamp::Verbatim,
    },
    ScaffoldFile {
        file_name: "index.js",
        path: HTTP,
        body: include_str!("scaffold/files/src/http/index.js"),
        stamp: Stamp::Verbatim,
    },
];

/// Emit the scaffold for one application. `package.json` is built from the
/// context and the registry rather than from a template.
pub fn generate_template(context: &Value, registry: &[RegistryEntry]) -> Vec<OutputFile> {
    let mut files: Vec<OutputFile> = FILES
        .iter()
        .map(|file| {
            let content = match file.stamp {
                Stamp::Substitute => substitute(context, file.body),
                Stamp::Verbatim => file.body.to_string(),
            };
            OutputFile::new(file.file_name, file.path, content)
        })
        .collect();

    files.insert(
        1,
        OutputFile::new("package.json", ROOT, package_json(context, registry)),
    );

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn find<'a>(files: &'a [OutputFile], path: &str, name: &str) -> &'a OutputFile {
        files
            .iter()
            .find(|f| f.path == path && f.file_name == name)
            .unwrap_or_else(|| panic!("missing {}/{}", path, name))
    }

    #[test]
    fn test_scaffold_file_set() {
        let files = generate_template(&json!({}), &[]);
        assert_eq!(files.len(), 13);

        let mut seen: Vec<String> = files
            .iter()
            .map(|f| format!("{}/{}", f.path, f.file_name))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 13, "scaffold paths must be unique");

        find(&files, ".", ".gitignore");
        find(&files, ".", "package.json");
        find(&files, "./src/http", "axios.js");
        find(&files, "./src/lowcodeConfig", "lowcode.js");
    }

    #[test]
    fn test_meta_is_stamped_into_templates() {
        let context = json!({ "meta": { "name": "portal", "description": "Admin portal" } });
        let files = generate_template(&context, &[]);

        let readme = find(&files, ".", "README.md");
        assert!(readme.file_content.starts_with("## portal\n"));
        assert!(readme.file_content.contains("Admin portal"));

        let html = find(&files, ".", "index.html");
        assert!(html.file_content.contains("<title>portal</title>"));
        assert!(!files.iter().any(|f| f.file_content.contains("MARK{")));
    }

    #[test]
    fn test_verbatim_files_are_untouched() {
        let files = generate_template(&json!({ "meta": { "name": "x" } }), &[]);
        let config = find(&files, "./src/http", "config.js");
        assert_eq!(
            config.file_content,
            include_str!("scaffold/files/src/http/config.js")
        );
    }
}
