//! Container and list members
//!
//! Methods generated into the class of a container or list, and the access
//! methods such a node contributes to its parent's class.

use super::{typedef, KeyInfo, ListInfo, NodeContext, NodeShape};
use crate::codegen::model::{Field, FieldBuilder, Method, MethodBuilder};
use crate::session::Session;

/// Constructor calling the superclass constructor, without parameters
pub fn constructor_template(ctx: &NodeContext, shape: &NodeShape) -> MethodBuilder {
    let mut constructor = MethodBuilder::constructor(&ctx.class_name);
    match shape {
        NodeShape::Container | NodeShape::List(_) => {
            constructor.depend(&ctx.root);
            constructor.line(format!("super{}", ctx.root_namespace(&ctx.raw)));
            if ctx.top_level || ctx.augmented {
                constructor.line("setDefaultPrefix();");
                constructor.line(format!("setPrefix({}.PREFIX);", ctx.root));
            }
        }
        NodeShape::Typedef(info) => {
            constructor.line(typedef::super_call(info));
        }
        NodeShape::Root | NodeShape::Leaf(_) => {}
    }
    constructor
}

/// Constructors of the node's own class
pub fn constructors(ctx: &NodeContext, shape: &NodeShape, session: &Session) -> Vec<Method> {
    match shape {
        NodeShape::Container => vec![empty_constructor(ctx, shape)],
        NodeShape::List(info) => {
            let mut res = vec![empty_constructor(ctx, shape)];
            if info.config {
                res.extend(value_constructors(ctx, shape, info, session));
            }
            res
        }
        NodeShape::Typedef(info) => typedef::constructors(ctx, shape, info, session),
        NodeShape::Root | NodeShape::Leaf(_) => Vec::new(),
    }
}

fn empty_constructor(ctx: &NodeContext, shape: &NodeShape) -> Method {
    let mut constructor = constructor_template(ctx, shape);
    constructor.doc(format!("Constructor for an empty {} object.", ctx.class_name));
    ctx.scope.seal(constructor, false)
}

/// One constructor per key encoding: wrapper, String and, unless some key
/// is string-backed, the host primitive
fn value_constructors(ctx: &NodeContext, shape: &NodeShape, info: &ListInfo, session: &Session) -> Vec<Method> {
    let count = 2 + usize::from(!info.is_string());
    let encodings = ["", "with String keys.", "with keys of built in Java types."];

    (0..count)
        .map(|i| {
            let mut constructor = constructor_template(ctx, shape);
            constructor.doc(format!("Constructor for an initialized {} object,", ctx.class_name));
            constructor.doc(encodings[i]);
            constructor.exception("JNCException");
            constructor.depend("Leaf");
            for key in &info.keys {
                let wrapper = key_wrapper(key, session);
                let wrapper_short = constructor.depend(&wrapper);
                constructor.doc(format!("@param {}Value Key argument of child.", key.var));
                constructor.line(format!("Leaf {} = new Leaf{}", key.var, ctx.root_namespace(&key.name)));
                let value = format!("{}Value", key.var);
                let param_type = match i {
                    0 => {
                        constructor.line(format!("{}.setValue({});", key.var, value));
                        wrapper_short.clone()
                    }
                    _ => {
                        for dependency in key.args.dependencies() {
                            constructor.depend(dependency);
                        }
                        constructor.line(format!("{}.setValue({});", key.var, key.args.construct(&wrapper_short, &value)));
                        if i == 1 {
                            "String".to_string()
                        } else {
                            key.resolved.primitive.java_name().to_string()
                        }
                    }
                };
                constructor.param(&param_type, value);
                constructor.line(format!("insertChild({}, childrenNames());", key.var));
            }
            ctx.scope.seal(constructor, false)
        })
        .collect()
}

fn key_wrapper(key: &KeyInfo, session: &Session) -> String {
    key.resolved.wrapper.qualified(&session.config.output.runtime_package)
}

/// `clone` and `cloneShallow`
pub fn cloners(ctx: &NodeContext, shape: &NodeShape) -> Vec<Method> {
    let keys = match shape {
        NodeShape::Container => String::new(),
        NodeShape::List(info) => info
            .keys
            .iter()
            .map(|k| format!("get{}Value().toString()", capitalized(&k.var)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => return Vec::new(),
    };
    let keyed = matches!(shape, NodeShape::List(info) if info.config);

    [("an exact", "", ""), ("a shallow", " Children are not included.", "Shallow")]
        .into_iter()
        .map(|(kind, note, suffix)| {
            let mut cloner = MethodBuilder::new(format!("clone{}", suffix));
            cloner.doc(format!("Clones this object, returning {} copy.", kind));
            cloner.doc(format!("@return A clone of the object.{}", note));
            cloner.returns_raw(ctx.class_name.clone());
            let mut copy = format!("new {}({})", ctx.class_name, keys);
            if keyed {
                cloner.line(format!("{} copy;", ctx.class_name));
                cloner.line("try {");
                cloner.line(format!("    copy = {};", copy));
                cloner.line("} catch (JNCException e) {");
                cloner.line("    copy = null;");
                cloner.line("}");
                cloner.depend("JNCException");
                copy = "copy".to_string();
            }
            cloner.line(format!("return ({})clone{}Content({});", ctx.class_name, suffix, copy));
            ctx.scope.seal(cloner, false)
        })
        .collect()
}

/// Key identifiers for `keyNames()`; `None` is the "no keys" sentinel
pub fn key_names(shape: &NodeShape) -> Option<Vec<String>> {
    match shape {
        NodeShape::List(info) if info.config => Some(info.keys.iter().map(|k| k.name.clone()).collect()),
        _ => None,
    }
}

/// `String[] keyNames()`
pub fn key_names_method(ctx: &NodeContext, shape: &NodeShape) -> Option<Method> {
    if !shape.is_element() {
        return None;
    }
    let mut method = MethodBuilder::new("keyNames");
    method.returns_raw("String[]");
    method.doc("@return An array with the identifiers of any key children");
    match key_names(shape) {
        Some(keys) => {
            method.line("return new String[] {");
            for key in keys {
                method.line(format!("    \"{}\",", key));
            }
            method.line("};");
        }
        None => {
            method.line("return null;");
        }
    }
    Some(ctx.scope.seal(method, false))
}

/// `String[] childrenNames()` over the raw identifiers of the data children
pub fn children_names_method(ctx: &NodeContext, shape: &NodeShape, children: &[String]) -> Option<Method> {
    if !shape.is_element() {
        return None;
    }
    let mut method = MethodBuilder::new("childrenNames");
    method.returns_raw("String[]");
    method.doc("@return An array with the identifiers of any children, in order.");
    method.line("return new String[] {");
    for child in children {
        method.line(format!("    \"{}\",", child));
    }
    method.line("};");
    Some(ctx.scope.seal(method, false))
}

/// `addChild` testing the container fields in reverse declaration order.
///
/// `fields` holds (class name, field name) pairs in declaration order.
pub fn add_child(ctx: &NodeContext, shape: &NodeShape, fields: &[(String, String)]) -> Option<Method> {
    if !shape.is_element() {
        return None;
    }
    let mut method = MethodBuilder::new("addChild");
    method.param("Element", "child");
    method.doc("Support method for addChild.");
    method.doc("Adds a child to this object.");
    method.doc("");
    method.doc("@param child The child to add");
    method.line("super.addChild(child);");
    let mut cond = "";
    for (class, field) in fields.iter().rev() {
        method.line(format!("{}if (child instanceof {}) {} = ({})child;", cond, class, field, class));
        method.depend(class);
        cond = "else ";
    }
    Some(ctx.scope.seal(method, false))
}

/// `public <N> <n2> = null;` in the parent, for a container child
pub fn child_field(ctx: &NodeContext) -> Field {
    let mut field = FieldBuilder::new(&ctx.class_name, ctx.var.clone());
    field.value("null");
    field.doc(format!("Field for child {} \"{}\".", ctx.keyword(), ctx.raw));
    ctx.scope.seal_field(field, true)
}

/// Access methods a container or list contributes to its parent, in order
pub fn parent_access_methods(ctx: &NodeContext, shape: &NodeShape, session: &Session) -> Vec<Method> {
    match shape {
        NodeShape::Container => {
            let mut res = adders(ctx, shape, session);
            res.push(container_deleter(ctx));
            res
        }
        NodeShape::List(info) => {
            let mut res = list_lookups(ctx, info, "get", session);
            res.push(child_iterator(ctx));
            res.extend(adders(ctx, shape, session));
            res.extend(list_lookups(ctx, info, "delete", session));
            res
        }
        NodeShape::Root | NodeShape::Leaf(_) | NodeShape::Typedef(_) => Vec::new(),
    }
}

/// By-reference, (when keyed) native-key and String-key, and filter adders
fn adders(ctx: &NodeContext, shape: &NodeShape, session: &Session) -> Vec<Method> {
    let keyed = match shape {
        NodeShape::List(info) if info.config => Some(info),
        _ => None,
    };
    let count = if keyed.is_some() { 4 } else { 2 };
    let container = matches!(shape, NodeShape::Container);

    (0..count)
        .map(|i| {
            let mut method = ctx.parent_template("add", true);
            let mut intro = format!("Adds {} entry \"{}\"", ctx.keyword(), ctx.var);
            let mut docs = Vec::new();
            let by_keys = keyed.filter(|_| i == 1 || i == 2);

            if i == 0 {
                intro.push_str(", using an existing object.");
                docs.push(format!("@param {} The object to add.", ctx.var));
                method.param(&ctx.class_name, ctx.var.clone());
            } else if let Some(info) = by_keys {
                intro.push_str(", with specified keys.");
                if i == 2 {
                    docs.push("The keys are specified as strings.".to_string());
                }
                for key in &info.keys {
                    docs.push(format!("@param {}Value Key argument of child.", key.var));
                    let param_type = if i == 2 { "String".to_string() } else { key_wrapper(key, session) };
                    method.param(&param_type, format!("{}Value", key.var));
                }
                let values = info.keys.iter().map(|k| format!("{}Value", k.var)).collect::<Vec<_>>();
                method.line(format!(
                    "{} {} = new {}({});",
                    ctx.class_name,
                    ctx.var,
                    ctx.class_name,
                    values.join(", ")
                ));
            } else {
                intro.push('.');
                docs.push("This method is used for creating subtree filters.".to_string());
                method.line(format!("{} {} = new {}();", ctx.class_name, ctx.var, ctx.class_name));
            }

            method.doc(intro);
            for doc in docs {
                method.doc(doc);
            }
            method.doc("@return The added child.");
            if container {
                method.line(format!("this.{} = {};", ctx.var, ctx.var));
            }
            if by_keys.is_some() {
                let name = method.name().to_string();
                method.line(format!("return {}({});", name, ctx.var));
            } else {
                method.line(format!("insertChild({}, childrenNames());", ctx.var));
                method.line(format!("return {};", ctx.var));
            }
            ctx.scope.seal(method, true)
        })
        .collect()
}

fn container_deleter(ctx: &NodeContext) -> Method {
    let mut method = ctx.parent_template("delete", false);
    method.doc(format!("Deletes {} entry \"{}\".", ctx.keyword(), ctx.var));
    method.doc("@return An array of the deleted element nodes.");
    method.returns("NodeSet");
    method.line(format!("this.{} = null;", ctx.var));
    method.line(format!("String path = \"{}\";", ctx.raw));
    method.line("return delete(path);");
    ctx.scope.seal(method, true)
}

/// `get<N>` or `delete<N>` by key: native-key and String-key overloads when
/// keyed, a single keyless one otherwise
fn list_lookups(ctx: &NodeContext, info: &ListInfo, prefix: &str, session: &Session) -> Vec<Method> {
    let count = if info.config { 2 } else { 1 };
    let getter = prefix == "get";

    (0..count)
        .map(|i| {
            let mut method = ctx.parent_template(prefix, getter);
            method.doc(format!(
                "{}s {} entry \"{}\", with specified keys.",
                capitalized(prefix),
                ctx.keyword(),
                ctx.var
            ));
            if i == 1 {
                method.doc("The keys are specified as strings.");
            }
            let mut path = format!("String path = \"{}", ctx.raw);
            for key in &info.keys {
                method.doc(format!("@param {}Value Key argument of child.", key.var));
                let param_type = if i == 0 { key_wrapper(key, session) } else { "String".to_string() };
                method.param(&param_type, format!("{}Value", key.var));
                path.push_str(&format!("[{}='\" + {}Value + \"']", key.name, key.var));
            }
            path.push_str("\";");
            method.line(path);
            if getter {
                method.line(format!("return ({})searchOne(path);", ctx.class_name));
            } else {
                method.line("delete(path);");
            }
            ctx.scope.seal(method, true)
        })
        .collect()
}

/// `ElementChildrenIterator <n2>Iterator()`
fn child_iterator(ctx: &NodeContext) -> Method {
    let mut method = MethodBuilder::new(format!("{}Iterator", ctx.var));
    method.doc(format!("Iterator method for the {} \"{}\".", ctx.keyword(), ctx.raw));
    method.doc(format!("@return An iterator for the {}.", ctx.keyword()));
    method.returns("ElementChildrenIterator");
    method.line(format!("return new ElementChildrenIterator(children, \"{}\");", ctx.raw));
    ctx.scope.seal(method, true)
}

fn capitalized(s: &str) -> String {
    crate::codegen::names::capitalize_first(s)
}
