//! Class Assembly
//!
//! Walks a module and builds one [`GeneratedClass`] per eligible node: the
//! root class, a class per container, list and notification, and a class per
//! module-scope typedef. Element classes are generated children first, so a
//! parent never refers to a class that does not exist yet.

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use super::collector::OrderedSet;
use super::model::{ClassKind, Field, FieldBuilder, GeneratedClass, Method, MethodBuilder, Modifier};
use super::paths::{module_package, resolve_module, DATA_KINDS};
use super::synth::{classify, element, leaf, root_class_name, typedef, NodeContext, NodeShape};
use crate::schema::{NodeId, NodeKind, SchemaTree, TypeRefKind};
use crate::session::Session;

/// Classes of one module, in generation order
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    pub classes: Vec<GeneratedClass>,
    /// Package to the names of the classes generated into it
    pub class_hierarchy: IndexMap<String, OrderedSet<String>>,
}

impl ClassModel {
    fn push(&mut self, class: GeneratedClass) {
        debug!(class = %class.qualified_name(), kind = ?class.kind, "Generated class");
        self.class_hierarchy
            .entry(class.package.clone())
            .or_default()
            .add(class.name.clone());
        self.classes.push(class);
    }

    pub fn find(&self, qualified_name: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|c| c.qualified_name() == qualified_name)
    }
}

/// Build every class of `module`.
///
/// The module must carry a namespace and a prefix; the compiler checks that
/// before calling in.
pub fn generate_classes(tree: &SchemaTree, module: NodeId, session: &mut Session) -> ClassModel {
    let mut generator = ClassGenerator {
        tree,
        module,
        session,
        model: ClassModel::default(),
    };
    generator.root_class();
    generator.typedef_classes();
    for child in generator.data_children(module) {
        if tree[child].kind.is_element() {
            generator.element_class(child);
        }
    }
    generator.model
}

struct ClassGenerator<'a> {
    tree: &'a SchemaTree,
    module: NodeId,
    session: &'a mut Session,
    model: ClassModel,
}

impl ClassGenerator<'_> {
    fn data_children(&mut self, id: NodeId) -> Vec<NodeId> {
        super::paths::data_children(self.tree, id, DATA_KINDS, self.session)
    }

    fn namespace(&self) -> &str {
        self.tree[self.module].namespace.as_deref().unwrap_or_default()
    }

    fn source(&self) -> String {
        let node = &self.tree[self.module];
        match &node.revision {
            Some(revision) => format!("module \"{}\", revision: \"{}\".", node.name, revision),
            None => format!("module \"{}\".", node.name),
        }
    }

    fn description(&self, id: NodeId) -> String {
        let node = &self.tree[id];
        let mut description = format!(
            "This class represents an element from the namespace {} generated to \"{}/{}\"",
            self.namespace(),
            self.session.config.output.directory.display(),
            node.name
        );
        if let Some(position) = &node.position {
            description.push_str(&format!(" See line {} in {}", position.line, position.file));
        }
        description
    }

    // =========================================================================
    // Root
    // =========================================================================

    fn root_class(&mut self) {
        let tree = self.tree;
        let module = &tree[self.module];
        let root = root_class_name(tree, self.module, self.session);
        let package = module_package(tree, self.module, self.session);
        let namespace = self.namespace().to_string();
        let prefix = module.prefix.clone().unwrap_or_default();

        let mut class = GeneratedClass::new(&root, &package, ClassKind::Root);
        class.source = self.source();
        class.description = format!(
            "The root class for namespace {} (accessible from {}.NAMESPACE) with prefix \"{}\" ({}.PREFIX).",
            namespace, root, prefix, root
        );

        for (name, value) in [("NAMESPACE", &namespace), ("PREFIX", &prefix)] {
            let mut field = FieldBuilder::new("String", name);
            field.modifiers(&[Modifier::Public, Modifier::Static, Modifier::Final]);
            field.value(format!("\"{}\"", value));
            class.fields.add(field.finish());
        }

        let mut enable = MethodBuilder::new("enable");
        enable.modifiers(&[Modifier::Public, Modifier::Static]);
        enable.exception("JNCException");
        enable.doc("Enable the elements in this namespace to be aware");
        enable.doc("of the data model and use the generated classes.");
        enable.depend(&self.session.runtime("YangElement"));
        enable.line(format!("YangElement.setPackage(NAMESPACE, \"{}\");", package));
        enable.line(format!("{}.registerSchema();", root));
        class.enablers.add(enable.finish());

        class.schema_registrators.add(self.register_schema(&root));
        self.model.push(class);
    }

    fn register_schema(&mut self, root: &str) -> Method {
        let mut method = MethodBuilder::new("registerSchema");
        method.modifiers(&[Modifier::Public, Modifier::Static]);
        method.exception("JNCException");
        method.doc("Register the schema for this namespace in the global");
        method.doc("schema table (CsTree) making it possible to lookup");
        method.doc("CsNode entries for all tagpaths");
        for class in ["SchemaParser", "SchemaTree", "Tagpath", "SchemaNode"] {
            method.depend(&self.session.runtime(class));
        }
        method.depend("java.util.Map");
        method.line("SchemaParser parser = new SchemaParser();");
        method.line("Map<Tagpath, SchemaNode> h = SchemaTree.create(NAMESPACE);");
        if self.session.config.output.classpath_schema_loading {
            method.line(format!("parser.findAndReadFile(\"{}.schema\", h, {}.class);", root, root));
        } else {
            let directory = self.session.config.output.directory.display().to_string();
            let module = self.session.camelize(&self.tree[self.module].name);
            method.line(format!(
                "parser.readFile(\"{}/{}/{}.schema\", h);",
                directory.replace('\\', "/"),
                module,
                root
            ));
        }
        method.finish()
    }

    // =========================================================================
    // Typedefs
    // =========================================================================

    /// Module-scope typedefs of the module and its submodules, each preceded
    /// by the part of its derivation chain defined in the same module
    fn typedef_order(&self) -> OrderedSet<NodeId> {
        let tree = self.tree;
        let mut scopes = vec![self.module];
        scopes.extend(tree.submodules_of(&tree[self.module].name));

        let mut order = OrderedSet::new();
        for scope in scopes {
            for &child in &tree[scope].children {
                if tree[child].kind != NodeKind::Typedef {
                    continue;
                }
                let mut chain = vec![child];
                let mut current = child;
                while let Some(base) = self.local_base(current) {
                    if chain.contains(&base) {
                        break;
                    }
                    chain.push(base);
                    current = base;
                }
                for id in chain.into_iter().rev() {
                    order.add(id);
                }
            }
        }
        order
    }

    /// Module-scope typedef `id` derives from, when defined in this module
    fn local_base(&self, id: NodeId) -> Option<NodeId> {
        let tree = self.tree;
        let type_ref = tree[id].type_ref.as_ref()?;
        if type_ref.kind != TypeRefKind::Derived {
            return None;
        }
        let base = type_ref.target?;
        let module_scope = tree[base]
            .parent
            .map(|p| tree[p].kind.is_module_like())
            .unwrap_or(false);
        (tree[base].kind == NodeKind::Typedef && module_scope && resolve_module(tree, base) == self.module).then_some(base)
    }

    fn typedef_classes(&mut self) {
        for id in self.typedef_order() {
            self.typedef_class(id);
        }
    }

    fn typedef_class(&mut self, id: NodeId) {
        let tree = self.tree;
        let ctx = NodeContext::new(tree, id, self.session);
        let info = match classify(tree, id, self.session) {
            Some(NodeShape::Typedef(info)) => info,
            _ => return,
        };
        let shape = NodeShape::Typedef(info.clone());

        let mut class = GeneratedClass::new(&ctx.class_name, &ctx.package, ClassKind::Typedef);
        class.superclass = Some(info.resolved.wrapper.class_name().to_string());
        class.description = self.description(id);
        class.source = self.source();
        class.imports.extend(typedef::class_imports(tree, id, &info, self.session));

        class.constructors.extend(element::constructors(&ctx, &shape, self.session));
        for setter in typedef::setters(&ctx, &info) {
            class.append_access("setValue", setter);
        }
        if let Some(checker) = typedef::checker(&ctx, &info) {
            class.append_access("check", checker);
        }
        self.model.push(class);
    }

    // =========================================================================
    // Containers and lists
    // =========================================================================

    /// Generate the class of `id` and everything below it
    fn element_class(&mut self, id: NodeId) {
        let tree = self.tree;
        let ctx = NodeContext::new(tree, id, self.session);
        let Some(shape) = classify(tree, id, self.session) else {
            return;
        };
        let kind = match shape {
            NodeShape::List(_) => ClassKind::List,
            _ => ClassKind::Container,
        };

        let mut class = GeneratedClass::new(&ctx.class_name, &ctx.package, kind);
        class.superclass = Some("YangElement".to_string());
        class.description = self.description(id);
        class.source = self.source();

        let children = self.data_children(id);
        let mut dispatch: Vec<(String, String)> = Vec::new();
        for &child in &children {
            let child_ctx = NodeContext::new(tree, child, self.session);
            let Some(child_shape) = classify(tree, child, self.session) else {
                continue;
            };
            let key = child_ctx.raw.clone();
            match &child_shape {
                NodeShape::Leaf(info) => {
                    class.comment_access(&key, child_ctx.access_comment(info.optional));
                    for method in leaf::member_methods(&child_ctx, info, self.session) {
                        class.append_access(&key, method);
                    }
                }
                NodeShape::Container | NodeShape::List(_) => {
                    self.element_class(child);

                    let qualified = format!("{}.{}", child_ctx.package, child_ctx.class_name);
                    let same_name = child_ctx.class_name == ctx.class_name;
                    let qualifier = if same_name { word_pattern(&child_ctx.class_name) } else { None };

                    if matches!(child_shape, NodeShape::Container) {
                        let mut field = element::child_field(&child_ctx);
                        if let Some(pattern) = &qualifier {
                            field = qualify_field(field, pattern, &qualified);
                        }
                        let dispatch_class = if same_name { qualified.clone() } else { child_ctx.class_name.clone() };
                        dispatch.push((dispatch_class, child_ctx.var.clone()));
                        class.fields.add(field);
                    }

                    class.comment_access(&key, child_ctx.access_comment(false));
                    for method in element::parent_access_methods(&child_ctx, &child_shape, self.session) {
                        let method = match &qualifier {
                            Some(pattern) => qualify_method(method, pattern, &qualified),
                            None => method,
                        };
                        class.append_access(&key, method);
                    }
                    class.imports.add(qualified);
                }
                NodeShape::Root | NodeShape::Typedef(_) => {}
            }
        }

        self.report_ambiguous_dispatch(&ctx.class_name, &dispatch);

        let children_names: Vec<String> = children.iter().map(|&c| tree[c].name.clone()).collect();
        class.constructors.extend(element::constructors(&ctx, &shape, self.session));
        class.cloners.extend(element::cloners(&ctx, &shape));
        if let Some(add_child) = element::add_child(&ctx, &shape, &dispatch) {
            class.support_methods.add(add_child);
        }
        if let Some(method) = element::key_names_method(&ctx, &shape) {
            class.name_getters.add(method);
        }
        if let Some(method) = element::children_names_method(&ctx, &shape, &children_names) {
            class.name_getters.add(method);
        }
        class.key_names = element::key_names(&shape);
        class.children_names = children_names;

        self.model.push(class);
    }

    /// Two `addChild` branches testing the same class: only the later field
    /// can ever be assigned
    fn report_ambiguous_dispatch(&mut self, class: &str, dispatch: &[(String, String)]) {
        let mut by_class: IndexMap<&str, Vec<String>> = IndexMap::new();
        for (child_class, field) in dispatch {
            by_class.entry(child_class.as_str()).or_default().push(field.clone());
        }
        for (child_class, fields) in by_class {
            if fields.len() > 1 {
                self.session.diagnostics.ambiguous_child_dispatch(class, child_class, &fields);
            }
        }
    }
}

// =============================================================================
// Same-name qualification
// =============================================================================

fn word_pattern(class: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(class))).ok()
}

/// Replace whole-word references to a child class that shares the parent's
/// name by its qualified name
fn qualify_method(mut method: Method, pattern: &Regex, qualified: &str) -> Method {
    if let Some(ret) = &method.return_type {
        method.return_type = Some(pattern.replace_all(ret, qualified).into_owned());
    }
    for param in &mut method.params {
        param.ty = pattern.replace_all(&param.ty, qualified).into_owned();
    }
    for line in &mut method.body {
        *line = pattern.replace_all(line, qualified).into_owned();
    }
    method
}

fn qualify_field(mut field: Field, pattern: &Regex, qualified: &str) -> Field {
    field.ty = pattern.replace_all(&field.ty, qualified).into_owned();
    field
}
