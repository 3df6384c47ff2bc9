//! Leaf and leaf-list members
//!
//! Leaves get no class of their own. Each contributes a method group to its
//! parent's class: getter, setters, unsetter, filter adder and operation
//! markers for a leaf; iterator, setters, deleters, filter adder and markers
//! for a leaf-list.

use super::{LeafInfo, NodeContext};
use crate::codegen::model::{Method, MethodBuilder};
use crate::codegen::names::normalize;
use crate::session::Session;

const OPERATIONS: [&str; 4] = ["replace", "merge", "create", "delete"];

/// Every member a leaf or leaf-list contributes, in declaration order
pub fn member_methods(ctx: &NodeContext, info: &LeafInfo, session: &Session) -> Vec<Method> {
    let mut res = Vec::new();
    if info.list {
        res.push(value_iterator(ctx));
        res.extend(setters(ctx, info, session));
        res.extend(deleters(ctx, info, session));
        res.push(filter_adder(ctx));
    } else {
        res.push(getter(ctx, info, session));
        res.extend(setters(ctx, info, session));
        if info.optional {
            res.push(unsetter(ctx));
        }
        res.push(filter_adder(ctx));
    }
    if info.optional {
        res.extend(markers(ctx, info, session));
    }
    res
}

fn wrapper(info: &LeafInfo, session: &Session) -> String {
    info.resolved.wrapper.qualified(&session.config.output.runtime_package)
}

/// `get<N>Value`, constructing the declared default when the value is unset
fn getter(ctx: &NodeContext, info: &LeafInfo, session: &Session) -> Method {
    let mut method = MethodBuilder::new(format!("get{}Value", ctx.class_name));
    method.returns(&wrapper(info, session));
    method.exception("JNCException");
    let ret = info.resolved.wrapper.class_name().to_string();

    if info.is_empty_type() {
        method.doc(format!("Searches for {} \"{}\".", ctx.keyword(), ctx.raw));
        method.doc(format!(
            "@return A YangEmpty object if {} exists; <code>null</code> otherwise.",
            ctx.keyword()
        ));
    } else {
        method.doc(format!("Gets the value for child {} \"{}\".", ctx.keyword(), ctx.raw));
        method.doc(format!("@return The value of the {}.", ctx.keyword()));
    }

    match &info.default {
        Some(default) => {
            for dependency in info.args.dependencies() {
                method.depend(dependency);
            }
            method.line(format!("{} {} = ({})getValue(\"{}\");", ret, ctx.var, ret, ctx.raw));
            method.line(format!("if ({} == null) {{", ctx.var));
            let value = format!("\"{}\"", default);
            method.line(format!("    {} = {};  // default", ctx.var, info.args.construct(&ret, &value)));
            method.line("}");
            method.line(format!("return {};", ctx.var));
        }
        None => {
            method.line(format!("return ({})getValue(\"{}\");", ret, ctx.raw));
        }
    }
    ctx.scope.seal(method, true)
}

/// `set<N>Value` overloads: wrapper, String and, for primitive-backed
/// values, the host primitive
fn setters(ctx: &NodeContext, info: &LeafInfo, session: &Session) -> Vec<Method> {
    let name = format!("set{}Value", ctx.class_name);
    let count = 2 + usize::from(!info.resolved.is_string());
    let param = format!("{}Value", ctx.var);
    let generated = info.resolved.wrapper.builtin().is_none();

    (0..count)
        .map(|i| {
            let mut method = MethodBuilder::new(name.clone());
            method.exception("JNCException");
            method.doc(format!("Sets the value for child {} \"{}\",", ctx.keyword(), ctx.raw));

            if i == 0 {
                if generated {
                    method.doc("using instance of generated typedef class.");
                } else {
                    method.doc("using a JNC type value.");
                }
                method.doc(format!("@param {} The value to set.", param));
                method.param(&wrapper(info, session), param.clone());
                method.depend(&ctx.root);
                method.line(format!("set{}Value({}.NAMESPACE,", normalize(ctx.keyword()), ctx.root));
                method.line(format!("    \"{}\",", ctx.raw));
                method.line(format!("    {},", param));
                method.line("    childrenNames());");
            } else if info.is_empty_type() {
                method.doc("by instantiating it (value n/a).");
                method.doc(format!("@param {} ignored.", param));
                method.param("String", param.clone());
                let empty = method.depend(&wrapper(info, session));
                method.line(format!("{}(new {}());", name, empty));
            } else {
                let param_type = if i == 1 && !info.resolved.is_string() {
                    method.doc("using Java primitive values.");
                    info.resolved.primitive.java_name().to_string()
                } else {
                    method.doc("using a String value.");
                    "String".to_string()
                };
                method.doc(format!("@param {} used during instantiation.", param));
                method.param(&param_type, param.clone());
                let short = method.depend(&wrapper(info, session));
                for dependency in info.args.dependencies() {
                    method.depend(dependency);
                }
                method.line(format!("{}({});", name, info.args.construct(&short, &param)));
            }
            ctx.scope.seal(method, true)
        })
        .collect()
}

fn unsetter(ctx: &NodeContext) -> Method {
    let mut method = MethodBuilder::new(format!("unset{}Value", ctx.class_name));
    method.doc(format!("Unsets the value for child {} \"{}\".", ctx.keyword(), ctx.raw));
    method.exception("JNCException");
    method.line(format!("delete(\"{}\");", ctx.raw));
    ctx.scope.seal(method, true)
}

/// `add<N>()`: an unvalued leaf for subtree filters
fn filter_adder(ctx: &NodeContext) -> Method {
    let mut method = MethodBuilder::new(format!("add{}", ctx.class_name));
    method.exception("JNCException");
    method.doc("This method is used for creating a subtree filter.");
    method.doc(format!("The added \"{}\" {} will not have a value.", ctx.raw, ctx.keyword()));
    method.depend(&ctx.root);
    method.line(format!("set{}Value({}.NAMESPACE,", normalize(ctx.keyword()), ctx.root));
    method.line(format!("    \"{}\",", ctx.raw));
    method.line("    null,");
    method.line("    childrenNames());");
    ctx.scope.seal(method, true)
}

/// `ElementLeafListValueIterator <n2>Iterator()`
fn value_iterator(ctx: &NodeContext) -> Method {
    let mut method = MethodBuilder::new(format!("{}Iterator", ctx.var));
    method.doc(format!("Iterator method for the {} \"{}\".", ctx.keyword(), ctx.raw));
    method.doc(format!("@return An iterator for the {}.", ctx.keyword()));
    method.returns("ElementLeafListValueIterator");
    method.line(format!(
        "return new ElementLeafListValueIterator(children, \"{}\");",
        ctx.raw
    ));
    ctx.scope.seal(method, true)
}

/// Path selecting one leaf-list entry by value
fn entry_path(ctx: &NodeContext) -> String {
    format!("{}[name='\" + {}Value + \"']", ctx.var, ctx.var)
}

/// `delete<N>` by wrapper value and by String
fn deleters(ctx: &NodeContext, info: &LeafInfo, session: &Session) -> Vec<Method> {
    (0..2)
        .map(|i| {
            let mut method = ctx.parent_template("delete", false);
            method.doc(format!("Deletes {} entry \"{}\".", ctx.keyword(), ctx.var));
            if i == 1 {
                method.doc("The value is specified as a string.");
            }
            method.doc(format!("@param {}Value Value to delete.", ctx.var));
            let param_type = if i == 0 { wrapper(info, session) } else { "String".to_string() };
            method.param(&param_type, format!("{}Value", ctx.var));
            method.line(format!("String path = \"{}\";", entry_path(ctx)));
            method.line("delete(path);");
            ctx.scope.seal(method, true)
        })
        .collect()
}

/// `mark<N><Op>` for each pending operation. Leaf-lists select the entry by
/// value and get a String overload when not string-backed.
fn markers(ctx: &NodeContext, info: &LeafInfo, session: &Session) -> Vec<Method> {
    let overloads = if info.list && !info.resolved.is_string() { 2 } else { 1 };
    let mut res = Vec::new();
    for op in OPERATIONS {
        let op_name = normalize(op);
        for i in 0..overloads {
            let mut method = MethodBuilder::new(format!("mark{}{}", ctx.class_name, op_name));
            method.exception("JNCException");
            method.doc(format!(
                "Marks the {} \"{}\" with operation \"{}\".",
                ctx.keyword(),
                ctx.raw,
                op
            ));
            let path = if info.list {
                let mut javadoc = format!("@param {}Value The value to mark", ctx.var);
                let param_type = if i == 1 {
                    javadoc.push_str(", given as a String");
                    "String".to_string()
                } else {
                    wrapper(info, session)
                };
                method.param(&param_type, format!("{}Value", ctx.var));
                method.doc(javadoc);
                entry_path(ctx)
            } else {
                ctx.var.clone()
            };
            method.line(format!("markLeaf{}(\"{}\");", op_name, path));
            res.push(ctx.scope.seal(method, true));
        }
    }
    res
}
