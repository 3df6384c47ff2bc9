//! Import canonicalization
//!
//! Members record their dependencies as either fully qualified or short
//! class names. Before a member is frozen, every short name is mapped to the
//! package it lives in, relative to the node the member was generated for.

use regex::Regex;
use std::sync::OnceLock;

use crate::codegen::collector::OrderedSet;
use crate::codegen::model::{Field, FieldBuilder, Method, MethodBuilder};
use crate::codegen::names::JAVA_UTIL;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Import resolution context of one node
#[derive(Debug, Clone)]
pub struct ImportScope {
    /// Short name of the module's root class
    pub root: String,
    /// Package of the root class
    pub root_package: String,
    /// Package of the node's own class
    pub package: String,
    /// The node's own class name
    pub own_class: String,
    /// Package holding the classes of the node's children
    pub child_package: String,
    /// Class names of the node's element children
    pub children: Vec<String>,
    pub runtime_package: String,
}

impl ImportScope {
    /// First package segment; anything under it is already canonical
    fn base_package(&self) -> &str {
        self.package.split('.').next().unwrap_or("")
    }

    /// Fully qualified form of a short class name.
    ///
    /// With `child` set the node's own class resolves to its own package,
    /// which is what access methods generated into the parent need.
    pub fn canonical_import(&self, import: &str, child: bool) -> String {
        if import == self.root {
            join(&self.root_package, import)
        } else if self.children.iter().any(|c| c == import) {
            join(&self.child_package, import)
        } else if child && import == self.own_class {
            join(&self.package, import)
        } else {
            self.default_import(import)
        }
    }

    /// Package lookup that knows nothing about the data model
    pub fn default_import(&self, import: &str) -> String {
        let runtime_prefix = format!("{}.", self.runtime_package);
        if import.starts_with("java.math") || import.starts_with("java.util") || import.starts_with(&runtime_prefix) {
            import.to_string()
        } else if import == "BigInteger" || import == "BigDecimal" {
            format!("java.math.{}", import)
        } else if JAVA_UTIL.contains(&import) {
            format!("java.util.{}", import)
        } else {
            format!("{}.{}", self.runtime_package, import)
        }
    }

    /// Canonicalize every recorded dependency
    pub fn fix_imports(&self, imports: &OrderedSet<String>, child: bool) -> OrderedSet<String> {
        let runtime_prefix = format!("{}.", self.runtime_package);
        let base = self.base_package();
        let mut res = OrderedSet::new();
        for dependency in imports {
            let canonical = dependency.starts_with("java.math")
                || dependency.starts_with("java.util")
                || dependency.starts_with(&runtime_prefix)
                || (!base.is_empty() && dependency.starts_with(&format!("{}.", base)));
            if canonical {
                res.add(dependency.clone());
            } else if dependency.ends_with('>') {
                for token in word_pattern().find_iter(dependency) {
                    res.add(self.canonical_import(token.as_str(), child));
                }
            } else if let Some(element) = dependency.strip_suffix("[]") {
                res.add(self.canonical_import(element, child));
            } else {
                res.add(self.canonical_import(dependency, child));
            }
        }
        res
    }

    /// Canonicalize imports and freeze the method
    pub fn seal(&self, mut builder: MethodBuilder, child: bool) -> Method {
        let imports = self.fix_imports(builder.imports(), child);
        builder.replace_imports(imports);
        builder.finish()
    }

    pub fn seal_field(&self, mut builder: FieldBuilder, child: bool) -> Field {
        let imports = self.fix_imports(builder.imports(), child);
        builder.replace_imports(imports);
        builder.finish()
    }
}

fn join(package: &str, class: &str) -> String {
    if package.is_empty() {
        class.to_string()
    } else {
        format!("{}.{}", package, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> ImportScope {
        ImportScope {
            root: "M".to_string(),
            root_package: "gen.m".to_string(),
            package: "gen.m".to_string(),
            own_class: "Top".to_string(),
            child_package: "gen.m.top".to_string(),
            children: vec!["Items".to_string()],
            runtime_package: "com.tailf.jnc".to_string(),
        }
    }

    #[test]
    fn test_canonical_import() {
        let scope = scope();
        assert_eq!(scope.canonical_import("M", false), "gen.m.M");
        assert_eq!(scope.canonical_import("Items", false), "gen.m.top.Items");
        assert_eq!(scope.canonical_import("Top", true), "gen.m.Top");
        assert_eq!(scope.canonical_import("Top", false), "com.tailf.jnc.Top");
        assert_eq!(scope.canonical_import("BigDecimal", false), "java.math.BigDecimal");
        assert_eq!(scope.canonical_import("Map", false), "java.util.Map");
        assert_eq!(scope.canonical_import("Leaf", false), "com.tailf.jnc.Leaf");
    }

    #[test]
    fn test_fix_imports_handles_generics_and_arrays() {
        let scope = scope();
        let imports: OrderedSet<String> = [
            "Map<Tagpath, SchemaNode>",
            "Items[]",
            "gen.m.top.items.Sub",
            "java.math.BigInteger",
            "JNCException",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let fixed: Vec<String> = scope.fix_imports(&imports, false).into_iter().collect();
        assert_eq!(
            fixed,
            vec![
                "java.util.Map",
                "com.tailf.jnc.Tagpath",
                "com.tailf.jnc.SchemaNode",
                "gen.m.top.Items",
                "gen.m.top.items.Sub",
                "java.math.BigInteger",
                "com.tailf.jnc.JNCException",
            ]
        );
    }

    #[test]
    fn test_seal_canonicalizes_builder_imports() {
        let scope = scope();
        let mut m = MethodBuilder::new("addItems");
        m.returns("Items").param("Items", "items").exception("JNCException");
        let method = scope.seal(m, false);
        assert_eq!(method.return_type.as_deref(), Some("Items"));
        assert!(method.imports.contains(&"gen.m.top.Items".to_string()));
        assert!(method.imports.contains(&"com.tailf.jnc.JNCException".to_string()));
    }
}
