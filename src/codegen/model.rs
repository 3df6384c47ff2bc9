//! Class Model
//!
//! In-memory model of the generated classes, handed to an external renderer.
//!
//! Members are built in two phases. A [`MethodBuilder`] is mutable and
//! compares by identity, so two builders never merge while still diverging.
//! [`MethodBuilder::finish`] freezes it into a [`Method`], which compares by
//! value (modifiers, name, return type, parameters, body) so identical
//! artifacts collapse in an [`OrderedSet`]. [`FieldBuilder`] / [`Field`] work
//! the same way.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use super::collector::OrderedSet;
use super::names::is_java_builtin;

static NEXT_BUILDER_ID: AtomicU64 = AtomicU64::new(1);

fn next_builder_id() -> u64 {
    NEXT_BUILDER_ID.fetch_add(1, Ordering::Relaxed)
}

// =============================================================================
// Building Blocks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Static => "static",
            Self::Final => "final",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

/// Record `import` as a dependency unless it never needs importing, and
/// return the name to use in code.
fn add_dependency(imports: &mut OrderedSet<String>, import: &str) -> String {
    match import.rsplit_once('.') {
        Some((_, class)) => {
            if !is_java_builtin(class) {
                imports.add(import.to_string());
            }
            class.to_string()
        }
        None => {
            let element = import.strip_suffix("[]").unwrap_or(import);
            if !is_java_builtin(import) && !is_java_builtin(element) {
                imports.add(import.to_string());
            }
            import.to_string()
        }
    }
}

// =============================================================================
// Methods
// =============================================================================

/// A frozen method or constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub modifiers: Vec<Modifier>,
    /// `None` for constructors
    pub return_type: Option<String>,
    pub name: String,
    pub params: Vec<Param>,
    pub exceptions: Vec<String>,
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub javadoc: Vec<String>,
    /// Fully qualified classes this method needs
    pub imports: OrderedSet<String>,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn param_types(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.ty.as_str()).collect()
    }

    /// Java signature line, without body
    pub fn signature(&self) -> String {
        let mut header: Vec<&str> = self.modifiers.iter().map(Modifier::as_str).collect();
        if let Some(ret) = &self.return_type {
            header.push(ret);
        }
        header.push(&self.name);
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sig = format!("{}({})", header.join(" "), params);
        if !self.exceptions.is_empty() {
            sig.push_str(" throws ");
            sig.push_str(&self.exceptions.join(", "));
        }
        sig
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.modifiers == other.modifiers
            && self.name == other.name
            && self.return_type == other.return_type
            && self.params == other.params
            && self.body == other.body
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.modifiers.hash(state);
        self.name.hash(state);
        self.return_type.hash(state);
        self.params.hash(state);
        self.body.hash(state);
    }
}

/// Mutable method under construction. Public and `void` unless told otherwise.
#[derive(Debug)]
pub struct MethodBuilder {
    id: u64,
    modifiers: Vec<Modifier>,
    return_type: Option<String>,
    name: String,
    params: Vec<Param>,
    exceptions: OrderedSet<String>,
    body: Vec<String>,
    javadoc: Vec<String>,
    imports: OrderedSet<String>,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_builder_id(),
            modifiers: vec![Modifier::Public],
            return_type: Some("void".to_string()),
            name: name.into(),
            params: Vec::new(),
            exceptions: OrderedSet::new(),
            body: Vec::new(),
            javadoc: Vec::new(),
            imports: OrderedSet::new(),
        }
    }

    /// A public constructor of `class`
    pub fn constructor(class: impl Into<String>) -> Self {
        let mut builder = Self::new(class);
        builder.return_type = None;
        builder
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&mut self, modifiers: &[Modifier]) -> &mut Self {
        self.modifiers = modifiers.to_vec();
        self
    }

    /// Set the return type, recording it as a dependency
    pub fn returns(&mut self, ty: &str) -> &mut Self {
        let short = add_dependency(&mut self.imports, ty);
        self.return_type = Some(short);
        self
    }

    /// Set the return type verbatim, without a dependency
    pub fn returns_raw(&mut self, ty: impl Into<String>) -> &mut Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn param(&mut self, ty: &str, name: impl Into<String>) -> &mut Self {
        let short = add_dependency(&mut self.imports, ty);
        self.params.push(Param {
            ty: short,
            name: name.into(),
        });
        self
    }

    pub fn exception(&mut self, exception: &str) -> &mut Self {
        let short = add_dependency(&mut self.imports, exception);
        self.exceptions.add(short);
        self
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.body.push(line.into());
        self
    }

    pub fn doc(&mut self, line: impl Into<String>) -> &mut Self {
        self.javadoc.push(line.into());
        self
    }

    /// Record a dependency; returns the name to use in code
    pub fn depend(&mut self, import: &str) -> String {
        add_dependency(&mut self.imports, import)
    }

    /// Dependencies recorded so far
    pub fn imports(&self) -> &OrderedSet<String> {
        &self.imports
    }

    pub(crate) fn replace_imports(&mut self, imports: OrderedSet<String>) {
        self.imports = imports;
    }

    /// Freeze into a value-equal [`Method`]
    pub fn finish(self) -> Method {
        Method {
            modifiers: self.modifiers,
            return_type: self.return_type,
            name: self.name,
            params: self.params,
            exceptions: self.exceptions.into_iter().collect(),
            body: self.body,
            javadoc: self.javadoc,
            imports: self.imports,
        }
    }
}

/// A clone is a new builder: it gets its own identity.
impl Clone for MethodBuilder {
    fn clone(&self) -> Self {
        Self {
            id: next_builder_id(),
            modifiers: self.modifiers.clone(),
            return_type: self.return_type.clone(),
            name: self.name.clone(),
            params: self.params.clone(),
            exceptions: self.exceptions.clone(),
            body: self.body.clone(),
            javadoc: self.javadoc.clone(),
            imports: self.imports.clone(),
        }
    }
}

impl PartialEq for MethodBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MethodBuilder {}

impl Hash for MethodBuilder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Fields
// =============================================================================

/// A frozen field declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub javadoc: Vec<String>,
    pub imports: OrderedSet<String>,
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.modifiers == other.modifiers
            && self.ty == other.ty
            && self.name == other.name
            && self.value == other.value
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.modifiers.hash(state);
        self.ty.hash(state);
        self.name.hash(state);
        self.value.hash(state);
    }
}

#[derive(Debug)]
pub struct FieldBuilder {
    id: u64,
    modifiers: Vec<Modifier>,
    ty: String,
    name: String,
    value: Option<String>,
    javadoc: Vec<String>,
    imports: OrderedSet<String>,
}

impl FieldBuilder {
    /// A public field of type `ty`, recorded as a dependency
    pub fn new(ty: &str, name: impl Into<String>) -> Self {
        let mut imports = OrderedSet::new();
        let ty = add_dependency(&mut imports, ty);
        Self {
            id: next_builder_id(),
            modifiers: vec![Modifier::Public],
            ty,
            name: name.into(),
            value: None,
            javadoc: Vec::new(),
            imports,
        }
    }

    pub fn modifiers(&mut self, modifiers: &[Modifier]) -> &mut Self {
        self.modifiers = modifiers.to_vec();
        self
    }

    pub fn value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn doc(&mut self, line: impl Into<String>) -> &mut Self {
        self.javadoc.push(line.into());
        self
    }

    pub fn imports(&self) -> &OrderedSet<String> {
        &self.imports
    }

    pub(crate) fn replace_imports(&mut self, imports: OrderedSet<String>) {
        self.imports = imports;
    }

    pub fn finish(self) -> Field {
        Field {
            modifiers: self.modifiers,
            ty: self.ty,
            name: self.name,
            value: self.value,
            javadoc: self.javadoc,
            imports: self.imports,
        }
    }
}

impl Clone for FieldBuilder {
    fn clone(&self) -> Self {
        Self {
            id: next_builder_id(),
            modifiers: self.modifiers.clone(),
            ty: self.ty.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            javadoc: self.javadoc.clone(),
            imports: self.imports.clone(),
        }
    }
}

impl PartialEq for FieldBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FieldBuilder {}

impl Hash for FieldBuilder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Generated Class
// =============================================================================

/// What a class was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Root,
    Container,
    List,
    Typedef,
}

/// Access methods contributed by one child, behind a structuring comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodGroup {
    pub comment: Option<String>,
    pub methods: OrderedSet<Method>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedClass {
    pub name: String,
    pub package: String,
    pub kind: ClassKind,
    pub superclass: Option<String>,
    pub description: String,
    /// Module and revision the class came from
    pub source: String,
    pub fields: OrderedSet<Field>,
    pub constructors: OrderedSet<Method>,
    pub cloners: OrderedSet<Method>,
    pub enablers: OrderedSet<Method>,
    pub schema_registrators: OrderedSet<Method>,
    /// `keyNames` and `childrenNames`
    pub name_getters: OrderedSet<Method>,
    /// Keyed by the originating child identifier
    pub access_methods: IndexMap<String, MethodGroup>,
    pub support_methods: OrderedSet<Method>,
    pub imports: OrderedSet<String>,
    /// `None` is the "no keys" sentinel
    pub key_names: Option<Vec<String>>,
    pub children_names: Vec<String>,
}

impl GeneratedClass {
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            superclass: None,
            description: String::new(),
            source: String::new(),
            fields: OrderedSet::new(),
            constructors: OrderedSet::new(),
            cloners: OrderedSet::new(),
            enablers: OrderedSet::new(),
            schema_registrators: OrderedSet::new(),
            name_getters: OrderedSet::new(),
            access_methods: IndexMap::new(),
            support_methods: OrderedSet::new(),
            imports: OrderedSet::new(),
            key_names: None,
            children_names: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Set the structuring comment of a child's group
    pub fn comment_access(&mut self, key: &str, comment: impl Into<String>) {
        self.access_methods.entry(key.to_string()).or_default().comment = Some(comment.into());
    }

    /// Append a method to a child's group
    pub fn append_access(&mut self, key: &str, method: Method) -> bool {
        self.access_methods.entry(key.to_string()).or_default().methods.add(method)
    }

    pub fn group(&self, key: &str) -> Option<&MethodGroup> {
        self.access_methods.get(key)
    }

    /// Every method of the class in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.constructors
            .iter()
            .chain(self.cloners.iter())
            .chain(self.enablers.iter())
            .chain(self.schema_registrators.iter())
            .chain(self.name_getters.iter())
            .chain(self.access_methods.values().flat_map(|g| g.methods.iter()))
            .chain(self.support_methods.iter())
    }

    /// Methods with the given name, constructors included
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods().filter(move |m| m.name == name)
    }

    /// Sorted import list for the renderer.
    ///
    /// Collects member imports and exceptions, drops the class itself and
    /// runtime classes the runtime does not provide, and keeps one import
    /// per short name.
    pub fn import_list(&self, runtime_package: &str, runtime_classes: &[&str]) -> Vec<String> {
        let mut all: OrderedSet<String> = self.imports.iter().cloned().collect();
        for method in self.methods() {
            all.extend(method.imports.iter().cloned());
            all.extend(method.exceptions.iter().map(|e| format!("{}.{}", runtime_package, e)));
        }
        for field in &self.fields {
            all.extend(field.imports.iter().cloned());
        }
        if let Some(superclass) = &self.superclass {
            let suffix = format!(".{}", superclass);
            if !superclass.contains('.') && !all.iter().any(|i| i.ends_with(&suffix)) {
                all.add(format!("{}.{}", runtime_package, superclass));
            }
        }

        let mut seen = Vec::new();
        let mut res = Vec::new();
        for import in all.sorted() {
            let (package, class) = import.rsplit_once('.').unwrap_or(("", import.as_str()));
            if class == self.name {
                continue;
            }
            if package == runtime_package && !runtime_classes.contains(&class) && class != "*" {
                continue;
            }
            if seen.contains(&class) {
                continue;
            }
            seen.push(class);
            res.push(import.clone());
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn getter(name: &str) -> MethodBuilder {
        let mut m = MethodBuilder::new(name);
        m.returns("com.tailf.jnc.YangString")
            .exception("JNCException")
            .line("return (YangString)getValue(\"name\");");
        m
    }

    #[test]
    fn test_builders_compare_by_identity() {
        let a = getter("getNameValue");
        let b = getter("getNameValue");
        assert_ne!(a, b);
        assert_eq!(a, a);

        let mut pending: OrderedSet<MethodBuilder> = OrderedSet::new();
        assert!(pending.add(a));
        assert!(pending.add(b));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_cloned_builders_never_merge() {
        let a = getter("getNameValue");
        let mut copy = a.clone();
        assert_ne!(a, copy);
        assert_ne!(a.id(), copy.id());
        copy.line("// diverged");

        let mut pending: OrderedSet<MethodBuilder> = OrderedSet::new();
        assert!(pending.add(a));
        assert!(pending.add(copy));
        assert_eq!(pending.len(), 2);

        let field = FieldBuilder::new("com.tailf.jnc.YangString", "name");
        let field_copy = field.clone();
        assert_ne!(field, field_copy);
        assert_eq!(field.finish(), field_copy.finish());
    }

    #[test]
    fn test_finished_methods_compare_by_value() {
        let mut set = OrderedSet::new();
        assert!(set.add(getter("getNameValue").finish()));
        assert!(!set.add(getter("getNameValue").finish()));

        let mut other = getter("getNameValue");
        other.line("// differs");
        assert!(set.add(other.finish()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_javadoc_does_not_affect_equality() {
        let mut a = getter("x");
        a.doc("one");
        let mut b = getter("x");
        b.doc("two");
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn test_dependencies_skip_builtins() {
        let mut m = MethodBuilder::new("setValue");
        m.param("String", "value").param("long", "n").param("String[]", "names");
        m.param("java.math.BigInteger", "mask");
        assert_eq!(m.depend("com.tailf.jnc.Leaf"), "Leaf");

        let method = m.finish();
        assert_eq!(method.param_types(), vec!["String", "long", "String[]", "BigInteger"]);
        assert_eq!(
            method.imports.iter().cloned().collect::<Vec<_>>(),
            vec!["java.math.BigInteger".to_string(), "com.tailf.jnc.Leaf".to_string()]
        );
        assert_eq!(method.signature(), "public void setValue(String value, long n, String[] names, BigInteger mask)");
    }

    #[test]
    fn test_constructor_signature() {
        let mut c = MethodBuilder::constructor("Items");
        c.param("String", "idValue").exception("JNCException");
        let c = c.finish();
        assert!(c.is_constructor());
        assert_eq!(c.signature(), "public Items(String idValue) throws JNCException");
    }

    #[test]
    fn test_fields_collapse_by_value() {
        let mut set = OrderedSet::new();
        let mut a = FieldBuilder::new("gen.m.top.Inner", "inner");
        a.value("null");
        let mut b = FieldBuilder::new("gen.m.top.Inner", "inner");
        b.value("null");
        assert_ne!(a, b);
        assert!(set.add(a.finish()));
        assert!(!set.add(b.finish()));
    }

    #[test]
    fn test_import_list_filters_and_sorts() {
        let mut class = GeneratedClass::new("Top", "gen.m", ClassKind::Container);
        class.superclass = Some("YangElement".to_string());
        class.imports.add("gen.m.top.Items".to_string());
        class.imports.add("gen.m.Top".to_string());
        class.imports.add("com.tailf.jnc.NotARuntimeClass".to_string());
        class.append_access("name", getter("getNameValue").finish());

        let imports = class.import_list("com.tailf.jnc", &["JNCException", "YangElement", "YangString"]);
        assert_eq!(
            imports,
            vec![
                "com.tailf.jnc.JNCException",
                "com.tailf.jnc.YangElement",
                "com.tailf.jnc.YangString",
                "gen.m.top.Items",
            ]
        );
    }
}
