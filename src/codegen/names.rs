//! Identifier Normalization
//!
//! Turns raw schema identifiers into Java identifiers:
//! - `camelize`: lower camel case, used for fields, variables and packages
//! - `normalize`: upper camel case, used for class names
//!
//! Both are total and deterministic. Results are memoized in a [`NameCache`]
//! owned by the compilation session, since ancestor identifiers are
//! renormalized for every descendant.

use std::collections::HashMap;

// =============================================================================
// Java Identifier Sets
// =============================================================================

/// Identifiers reserved by the Java language
pub const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "double", "do", "else", "enum",
    "extends", "false", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native",
    "new", "null", "package", "private", "protected", "public", "return",
    "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Boolean and null literals
pub const JAVA_LITERALS: &[&str] = &["true", "false", "null"];

/// The java.lang classes that never need an import
pub const JAVA_LANG: &[&str] = &[
    "Appendable", "CharSequence", "Cloneable", "Comparable", "Iterable",
    "Readable", "Runnable", "Boolean", "Byte", "Character", "Class",
    "ClassLoader", "Compiler", "Double", "Enum", "Float", "Integer", "Long",
    "Math", "Number", "Object", "Package", "Process", "ProcessBuilder",
    "Runtime", "RuntimePermission", "SecurityManager", "Short",
    "StackTraceElement", "StrictMath", "String", "StringBuffer",
    "StringBuilder", "System", "Thread", "ThreadGroup", "ThreadLocal",
    "Throwable", "Void",
];

/// The java.util interfaces and classes imports may resolve to
pub const JAVA_UTIL: &[&str] = &[
    "Collection", "Enumeration", "Iterator", "List", "ListIterator", "Map",
    "Queue", "Set", "ArrayList", "Arrays", "HashMap", "HashSet", "Hashtable",
    "LinkedList", "Properties", "Random", "Scanner", "Stack",
    "StringTokenizer", "Timer", "TreeMap", "TreeSet", "UUID", "Vector",
];

/// Reserved word or literal
pub fn is_reserved(ident: &str) -> bool {
    JAVA_RESERVED_WORDS.contains(&ident) || JAVA_LITERALS.contains(&ident)
}

/// Names that are never imported: keywords, literals, primitives and java.lang
pub fn is_java_builtin(ident: &str) -> bool {
    is_reserved(ident) || JAVA_LANG.contains(&ident)
}

// =============================================================================
// Case Helpers
// =============================================================================

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Camelize / Normalize
// =============================================================================

/// Convert a schema identifier to lower camel case.
///
/// `-` and `.` are dropped and the next character upper-cased; a trailing
/// separator stays. An upper-case character followed by another upper-case
/// character or a non-letter is lowered. Reserved words get a trailing `_`,
/// digit-leading results a leading `_`.
pub fn camelize(raw: &str) -> String {
    let chars: Vec<char> = decapitalize_first(raw).chars().collect();
    let mut out = String::with_capacity(raw.len() + 1);

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match chars.get(i + 1).copied() {
            None if chars.len() > 1 => out.push(c),
            None => {
                // A lone character keeps the case of the input
                let upper = raw.chars().any(char::is_uppercase)
                    && !raw.chars().any(char::is_lowercase);
                if upper {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
            }
            Some(next) if c == '-' || c == '.' => {
                out.extend(next.to_uppercase());
                i += 1;
            }
            Some(next) if c.is_uppercase() && (next.is_uppercase() || !next.is_alphabetic()) => {
                out.extend(c.to_lowercase());
            }
            Some(_) => out.push(c),
        }
        i += 1;
    }

    let digit_leading = out.starts_with(|c: char| c.is_ascii_digit());
    if is_reserved(&out) {
        out.push('_');
    }
    if digit_leading {
        out.insert(0, '_');
    }
    out
}

/// Convert a schema identifier to a class name.
///
/// `capitalize_first(camelize(raw))`, except that a single leading and/or
/// trailing `_` of the camelized form is replaced by a leading `J`.
pub fn normalize(raw: &str) -> String {
    let camel = camelize(raw);
    let start = usize::from(camel.starts_with('_'));
    let end = if camel.len() > start && camel.ends_with('_') {
        camel.len() - 1
    } else {
        camel.len()
    };

    if start == 1 || end < camel.len() {
        format!("J{}", capitalize_first(&camel[start..end]))
    } else {
        capitalize_first(&camel)
    }
}

// =============================================================================
// Name Cache
// =============================================================================

/// Memoizes `camelize` and `normalize` per input string
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    camelized: HashMap<String, String>,
    normalized: HashMap<String, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camelize(&mut self, raw: &str) -> String {
        if let Some(hit) = self.camelized.get(raw) {
            return hit.clone();
        }
        let res = camelize(raw);
        self.camelized.insert(raw.to_string(), res.clone());
        res
    }

    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(hit) = self.normalized.get(raw) {
            return hit.clone();
        }
        let res = normalize(raw);
        self.normalized.insert(raw.to_string(), res.clone());
        res
    }

    /// Number of distinct inputs seen by either function
    pub fn len(&self) -> usize {
        self.camelized.len() + self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camelized.is_empty() && self.normalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize_separators() {
        assert_eq!(camelize("foo-bar"), "fooBar");
        assert_eq!(camelize("foo.bar-baz"), "fooBarBaz");
        assert_eq!(camelize("Interface-name"), "interfaceName");
        assert_eq!(camelize("trailing-"), "trailing-");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn test_camelize_collapses_upper_runs() {
        assert_eq!(camelize("IPv4"), "iPv4");
        assert_eq!(camelize("ABC"), "abC");
        assert_eq!(camelize("mtu-IPv6"), "mtuIPv6");
    }

    #[test]
    fn test_camelize_single_character() {
        assert_eq!(camelize("A"), "A");
        assert_eq!(camelize("a"), "a");
    }

    #[test]
    fn test_reserved_words_get_suffix() {
        for word in JAVA_RESERVED_WORDS.iter().chain(JAVA_LITERALS) {
            let camel = camelize(word);
            assert_eq!(camel, format!("{}_", word));
            assert_ne!(&camel, word);
        }
    }

    #[test]
    fn test_digit_leading_gets_prefix() {
        for raw in ["1st", "802-1q", "9"] {
            let camel = camelize(raw);
            assert!(camel.starts_with('_'), "{} -> {}", raw, camel);
            assert!(!camel.starts_with(|c: char| c.is_ascii_digit()));
        }
        assert_eq!(camelize("802-1q"), "_8021q");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("top"), "Top");
        assert_eq!(normalize("ietf-interfaces"), "IetfInterfaces");
        assert_eq!(normalize("class"), "JClass");
        assert_eq!(normalize("boolean"), "JBoolean");
        assert_eq!(normalize("1st"), "J1st");
        assert_eq!(normalize("foo_"), "JFoo");
        assert_eq!(normalize("jFoo"), "JFoo");
        assert_eq!(normalize("_"), "J");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["top", "foo-bar", "IPv4", "ABC", "x", "class", "1st", "if-up"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "raw = {}", raw);
        }
    }

    #[test]
    fn test_cache_matches_pure_functions() {
        let mut cache = NameCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.camelize("if"), camelize("if"));
        assert_eq!(cache.camelize("if"), "if_");
        assert_eq!(cache.normalize("if"), "JIf");
        assert_eq!(cache.len(), 2);
    }
}
