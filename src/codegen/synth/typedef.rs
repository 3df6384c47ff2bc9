//! Typedef classes
//!
//! A module-scope typedef becomes a subclass of its resolved wrapper, with
//! String and (when not string-backed) host-primitive constructors and
//! setters. `check()` only exists when the derivation chain restricts values.

use super::element::constructor_template;
use super::{NodeContext, NodeShape, TypedefInfo};
use crate::codegen::model::{Method, MethodBuilder};
use crate::codegen::types::Builtin;
use crate::schema::{NodeId, SchemaTree, TypeRefKind};
use crate::session::Session;

fn overloads(info: &TypedefInfo) -> usize {
    1 + usize::from(!info.resolved.is_string())
}

/// `super(value[, <args>]);`, with arguments only for a runtime composite
/// superclass
pub fn super_call(info: &TypedefInfo) -> String {
    let runtime_composite = info
        .resolved
        .wrapper
        .builtin()
        .map(|b| b.is_composite())
        .unwrap_or(false);
    match info.args.render() {
        Some(args) if runtime_composite => format!("super(value, {});", args),
        _ => "super(value);".to_string(),
    }
}

pub fn constructors(ctx: &NodeContext, shape: &NodeShape, info: &TypedefInfo, _session: &Session) -> Vec<Method> {
    let primitive = info.resolved.primitive.java_name();
    (0..overloads(info))
        .map(|i| {
            let mut constructor = constructor_template(ctx, shape);
            if i == 0 {
                constructor.doc(format!("Constructor for {} object from a string.", ctx.class_name));
                constructor.param("String", "value");
            } else {
                constructor.doc(format!("Constructor for {} object from a {}.", ctx.class_name, primitive));
                constructor.param(primitive, "value");
            }
            constructor.doc(format!("@param value Value to construct the {} from.", ctx.class_name));
            for dependency in info.args.dependencies() {
                constructor.depend(dependency);
            }
            if info.checked {
                constructor.line("check();");
                constructor.exception("YangException");
            }
            ctx.scope.seal(constructor, false)
        })
        .collect()
}

/// `setValue` overloads
pub fn setters(ctx: &NodeContext, info: &TypedefInfo) -> Vec<Method> {
    let primitive = info.resolved.primitive.java_name();
    (0..overloads(info))
        .map(|i| {
            let mut setter = MethodBuilder::new("setValue");
            if i == 0 {
                setter.doc("Sets the value using a string value.");
                setter.param("String", "value");
            } else {
                setter.doc(format!("Sets the value using a value of type {}.", primitive));
                setter.param(primitive, "value");
            }
            setter.doc("@param value The value to set.");
            setter.line("super.setValue(value);");
            if info.checked {
                setter.line("check();");
                setter.exception("YangException");
            }
            ctx.scope.seal(setter, true)
        })
        .collect()
}

/// `check()`, only for restricted derivation chains
pub fn checker(ctx: &NodeContext, info: &TypedefInfo) -> Option<Method> {
    if !info.checked {
        return None;
    }
    let mut checker = MethodBuilder::new("check");
    checker.doc("Checks all restrictions (if any).");
    checker.exception("YangException");
    if info.delegates_check {
        checker.line("super.check();");
    }
    Some(ctx.scope.seal(checker, false))
}

/// Imports of a typedef class beyond its members: the superclass and the
/// value types its signatures mention
pub fn class_imports(tree: &SchemaTree, id: NodeId, info: &TypedefInfo, session: &Session) -> Vec<String> {
    let runtime = &session.config.output.runtime_package;
    let mut res = vec![info.resolved.wrapper.qualified(runtime)];
    match info.resolved.wrapper.builtin() {
        Some(Builtin::Decimal64) => res.push("java.math.BigDecimal".to_string()),
        Some(Builtin::Bits) | Some(Builtin::UInt64) => res.push("java.math.BigInteger".to_string()),
        _ => {}
    }
    let referencing = tree[id]
        .type_ref
        .as_ref()
        .map(|t| t.kind == TypeRefKind::CrossReference || t.local_name() == "identityref")
        .unwrap_or(false);
    if referencing {
        res.push(format!("{}.Element", runtime));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::synth::classify;
    use crate::schema::{SchemaNode, TypeRef};

    struct Fixture {
        tree: SchemaTree,
        id: NodeId,
        ctx: NodeContext,
        shape: NodeShape,
        info: TypedefInfo,
        session: Session,
    }

    fn typedef(type_ref: TypeRef) -> Fixture {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let id = tree.add_child(m, SchemaNode::typedef("my-type", type_ref));
        let mut session = Session::default();
        let ctx = NodeContext::new(&tree, id, &mut session);
        let shape = classify(&tree, id, &mut session).unwrap();
        let info = match &shape {
            NodeShape::Typedef(info) => info.clone(),
            other => panic!("Expected Typedef, got {:?}", other),
        };
        Fixture {
            tree,
            id,
            ctx,
            shape,
            info,
            session,
        }
    }

    #[test]
    fn test_unrestricted_integer_typedef() {
        let f = typedef(TypeRef::builtin("int64"));
        let ctors = constructors(&f.ctx, &f.shape, &f.info, &f.session);
        assert_eq!(ctors.len(), 2);
        assert_eq!(ctors[0].body, vec!["super(value);"]);
        assert_eq!(ctors[1].param_types(), vec!["long"]);
        assert!(ctors[1].exceptions.is_empty());
        assert_eq!(setters(&f.ctx, &f.info).len(), 2);
        assert!(checker(&f.ctx, &f.info).is_none());
    }

    #[test]
    fn test_restricted_string_typedef() {
        let f = typedef(TypeRef::builtin("string").with_pattern("[a-z]+"));
        let ctors = constructors(&f.ctx, &f.shape, &f.info, &f.session);
        assert_eq!(ctors.len(), 1);
        assert_eq!(ctors[0].body, vec!["super(value);", "check();"]);
        assert_eq!(ctors[0].exceptions, vec!["YangException"]);

        let check = checker(&f.ctx, &f.info).unwrap();
        assert!(check.body.is_empty());
        assert_eq!(setters(&f.ctx, &f.info)[0].body, vec!["super.setValue(value);", "check();"]);
    }

    #[test]
    fn test_enumeration_typedef_passes_names_to_super() {
        let f = typedef(TypeRef::builtin("enumeration").with_enums(["up", "down"]));
        let ctors = constructors(&f.ctx, &f.shape, &f.info, &f.session);
        assert_eq!(ctors.len(), 1);
        assert_eq!(
            ctors[0].body,
            vec!["super(value, new String[] {\"up\", \"down\"});", "check();"]
        );
        assert_eq!(checker(&f.ctx, &f.info).unwrap().body, vec!["super.check();"]);
    }

    #[test]
    fn test_class_imports() {
        let f = typedef(TypeRef::builtin("decimal64").with_fraction_digits(2));
        assert_eq!(
            class_imports(&f.tree, f.id, &f.info, &f.session),
            vec!["com.tailf.jnc.YangDecimal64", "java.math.BigDecimal"]
        );

        let f = typedef(TypeRef::builtin("identityref"));
        assert_eq!(
            class_imports(&f.tree, f.id, &f.info, &f.session),
            vec!["com.tailf.jnc.YangIdentityref", "com.tailf.jnc.Element"]
        );
    }
}
