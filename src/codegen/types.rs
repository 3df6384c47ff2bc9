//! Type Resolution
//!
//! Maps schema type references to a (wrapper, host primitive) pair:
//! - builtin scalars go through a fixed table
//! - leafrefs dereference the target leaf's own type
//! - typedefs resolve through their declared type; module-scope typedefs
//!   become the wrapper themselves (a generated class)
//!
//! Nothing here fails. Unknown and dangling references fall back to the
//! string pair and leave a diagnostic behind.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::{module_package, resolve_module, resolve_package, resolve_parent, schema_path};
use crate::schema::{NodeId, SchemaTree, TypeRef, TypeRefKind};
use crate::session::Session;

// =============================================================================
// Builtin Types
// =============================================================================

/// Builtin schema types with a runtime wrapper class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    Boolean,
    String,
    Enumeration,
    Binary,
    Union,
    Empty,
    InstanceIdentifier,
    Identityref,
    Bits,
    Decimal64,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "enumeration" => Self::Enumeration,
            "binary" => Self::Binary,
            "union" => Self::Union,
            "empty" => Self::Empty,
            "instance-identifier" => Self::InstanceIdentifier,
            "identityref" => Self::Identityref,
            "bits" => Self::Bits,
            "decimal64" => Self::Decimal64,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            _ => return None,
        };
        Some(builtin)
    }

    /// Runtime wrapper class name
    pub fn wrapper(&self) -> &'static str {
        match self {
            Self::Boolean => "YangBoolean",
            Self::String => "YangString",
            Self::Enumeration => "YangEnumeration",
            Self::Binary => "YangBinary",
            Self::Union => "YangUnion",
            Self::Empty => "YangEmpty",
            Self::InstanceIdentifier => "YangInstanceIdentifier",
            Self::Identityref => "YangIdentityref",
            Self::Bits => "YangBits",
            Self::Decimal64 => "YangDecimal64",
            Self::Int8 => "YangInt8",
            Self::Int16 => "YangInt16",
            Self::Int32 => "YangInt32",
            Self::Int64 => "YangInt64",
            Self::UInt8 => "YangUInt8",
            Self::UInt16 => "YangUInt16",
            Self::UInt32 => "YangUInt32",
            Self::UInt64 => "YangUInt64",
        }
    }

    /// Narrowest host type holding every value. Unsigned types widen one
    /// step; uint64 needs arbitrary precision.
    pub fn primitive(&self) -> HostPrimitive {
        match self {
            Self::Boolean => HostPrimitive::Boolean,
            Self::String
            | Self::Enumeration
            | Self::Binary
            | Self::Union
            | Self::Empty
            | Self::InstanceIdentifier
            | Self::Identityref => HostPrimitive::String,
            Self::Bits => HostPrimitive::BigInteger,
            Self::Decimal64 => HostPrimitive::BigDecimal,
            Self::Int8 => HostPrimitive::Byte,
            Self::Int16 | Self::UInt8 => HostPrimitive::Short,
            Self::Int32 | Self::UInt16 => HostPrimitive::Int,
            Self::Int64 | Self::UInt32 => HostPrimitive::Long,
            Self::UInt64 => HostPrimitive::BigInteger,
        }
    }

    /// Wrappers that take extra construction arguments
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Enumeration | Self::Union | Self::Bits | Self::Decimal64)
    }
}

/// Host-language value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostPrimitive {
    Boolean,
    String,
    BigInteger,
    BigDecimal,
    Byte,
    Short,
    Int,
    Long,
}

impl HostPrimitive {
    pub fn java_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::BigInteger => "BigInteger",
            Self::BigDecimal => "BigDecimal",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for HostPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.java_name())
    }
}

// =============================================================================
// Resolved Types
// =============================================================================

/// The class a value is wrapped in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum WrapperType {
    /// A runtime library class
    Runtime { builtin: Builtin },
    /// A typedef class generated by this compiler
    Generated { package: String, name: String },
}

impl WrapperType {
    pub fn runtime(builtin: Builtin) -> Self {
        Self::Runtime { builtin }
    }

    /// Unqualified class name
    pub fn class_name(&self) -> &str {
        match self {
            Self::Runtime { builtin } => builtin.wrapper(),
            Self::Generated { name, .. } => name,
        }
    }

    /// Fully qualified class name
    pub fn qualified(&self, runtime_package: &str) -> String {
        match self {
            Self::Runtime { builtin } => format!("{}.{}", runtime_package, builtin.wrapper()),
            Self::Generated { package, name } => format!("{}.{}", package, name),
        }
    }

    /// The runtime builtin, if this is a runtime wrapper
    pub fn builtin(&self) -> Option<Builtin> {
        match self {
            Self::Runtime { builtin } => Some(*builtin),
            Self::Generated { .. } => None,
        }
    }

    pub fn is_runtime(&self, builtin: Builtin) -> bool {
        self.builtin() == Some(builtin)
    }
}

/// Result of [`resolve_types`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedType {
    pub wrapper: WrapperType,
    pub primitive: HostPrimitive,
    /// The wrapper is a generated module-scope typedef class
    pub exported: bool,
}

impl ResolvedType {
    pub fn builtin(builtin: Builtin) -> Self {
        Self {
            wrapper: WrapperType::runtime(builtin),
            primitive: builtin.primitive(),
            exported: false,
        }
    }

    /// The fallback pair
    pub fn string() -> Self {
        Self::builtin(Builtin::String)
    }

    /// String-backed values need no primitive overloads
    pub fn is_string(&self) -> bool {
        self.primitive.is_string()
    }

    /// Wrapper is a runtime composite class or the `empty` marker
    pub fn composite(&self) -> bool {
        self.wrapper
            .builtin()
            .map(|b| b.is_composite() || b == Builtin::Empty)
            .unwrap_or(false)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Follow typedef links from `type_ref` to the first non-derived type.
///
/// A union is returned as-is. A derived type without a resolvable target is
/// its own base. Stops at the configured depth with a diagnostic.
pub fn resolve_base_type<'t>(tree: &'t SchemaTree, type_ref: &'t TypeRef, session: &mut Session) -> &'t TypeRef {
    let max_depth = session.config.resolver.max_derivation_depth;
    let mut current = type_ref;
    let mut depth = 0;

    while current.kind == TypeRefKind::Derived {
        let Some(next) = current.target.and_then(|t| tree[t].type_ref.as_ref()) else {
            break;
        };
        if depth >= max_depth {
            session.diagnostics.derivation_depth(&type_ref.name, max_depth);
            break;
        }
        depth += 1;
        current = next;
    }
    current
}

/// The type reference carrying the value restrictions of `type_ref`:
/// its base type, with leafrefs followed to their target's base type
pub fn resolve_value_base<'t>(tree: &'t SchemaTree, type_ref: &'t TypeRef, session: &mut Session) -> &'t TypeRef {
    let mut current = resolve_base_type(tree, type_ref, session);
    for _ in 0..session.config.resolver.max_derivation_depth {
        if current.kind != TypeRefKind::CrossReference {
            break;
        }
        match current.target.and_then(|t| tree[t].type_ref.as_ref()) {
            Some(next) => current = resolve_base_type(tree, next, session),
            None => break,
        }
    }
    current
}

/// Map the type of the node `at` to its wrapper and host primitive
pub fn resolve_types(tree: &SchemaTree, type_ref: &TypeRef, at: NodeId, session: &mut Session) -> ResolvedType {
    resolve_at_depth(tree, type_ref, at, session, 0)
}

/// Resolve the declared type of a leaf, leaf-list or typedef node
pub fn resolve_node_type(tree: &SchemaTree, node: NodeId, session: &mut Session) -> ResolvedType {
    match &tree[node].type_ref {
        Some(type_ref) => resolve_types(tree, type_ref, node, session),
        None => ResolvedType::string(),
    }
}

fn resolve_at_depth(
    tree: &SchemaTree,
    type_ref: &TypeRef,
    at: NodeId,
    session: &mut Session,
    depth: usize,
) -> ResolvedType {
    let max_depth = session.config.resolver.max_derivation_depth;
    if depth > max_depth {
        session.diagnostics.derivation_depth(&type_ref.name, max_depth);
        return ResolvedType::string();
    }

    match type_ref.kind {
        TypeRefKind::CrossReference => {
            let target = type_ref.target.and_then(|t| tree[t].type_ref.as_ref().map(|tr| (t, tr)));
            match target {
                Some((leaf, target_type)) => resolve_at_depth(tree, target_type, leaf, session, depth + 1),
                None => {
                    let subject = super::paths::schema_path(tree, at);
                    let path = type_ref.restrictions.path.as_deref().unwrap_or(&type_ref.name);
                    session.diagnostics.dangling_reference(&subject, path);
                    ResolvedType::string()
                }
            }
        }
        TypeRefKind::Derived => {
            let typedef = type_ref.target.filter(|&t| tree[t].type_ref.is_some());
            let Some(typedef) = typedef else {
                return unknown(tree, type_ref, at, session);
            };
            let declared = tree[typedef].type_ref.as_ref().map(|declared| resolve_base_type(tree, declared, session));
            let mut resolved = match declared {
                Some(base) => resolve_at_depth(tree, base, typedef, session, depth + 1),
                None => ResolvedType::string(),
            };

            let module_scope = resolve_parent(tree, typedef)
                .map(|p| tree[p].kind.is_module_like())
                .unwrap_or(false);
            if module_scope {
                resolved.wrapper = WrapperType::Generated {
                    package: resolve_package(tree, typedef, session),
                    name: session.normalize(&tree[typedef].name),
                };
                resolved.exported = true;
            } else {
                resolved.exported = false;
            }
            resolved
        }
        TypeRefKind::Builtin | TypeRefKind::Enumeration | TypeRefKind::Union | TypeRefKind::Bits => {
            match Builtin::from_name(type_ref.local_name()) {
                Some(builtin) => ResolvedType::builtin(builtin),
                None => unknown(tree, type_ref, at, session),
            }
        }
    }
}

fn unknown(tree: &SchemaTree, type_ref: &TypeRef, at: NodeId, session: &mut Session) -> ResolvedType {
    let module = resolve_module(tree, at);
    let package = module_package(tree, module, session);
    let name = session.normalize(type_ref.local_name());
    session.diagnostics.unknown_type(&format!("{}.{}", package, name));
    ResolvedType::string()
}

// =============================================================================
// Composite Construction Arguments
// =============================================================================

/// Extra constructor arguments of the runtime composite wrappers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeArgs {
    None,
    /// Enum names
    Enumeration(Vec<String>),
    /// Fully qualified member wrapper classes
    Union(Vec<String>),
    Bits {
        mask: BigUint,
        names: Vec<String>,
        positions: Vec<u32>,
    },
    Decimal64 { fraction_digits: u8 },
}

/// Bit positions are rendered into a Java `int[]`
const MAX_BIT_POSITION: u64 = i32::MAX as u64;

impl CompositeArgs {
    /// Arguments for `wrapper`, read from the restrictions of `base`
    pub fn for_wrapper(tree: &SchemaTree, wrapper: &WrapperType, base: &TypeRef, at: NodeId, session: &mut Session) -> Self {
        let restrictions = &base.restrictions;
        match wrapper.builtin() {
            Some(Builtin::Enumeration) => Self::Enumeration(restrictions.enums.clone()),
            Some(Builtin::Union) => {
                let runtime = session.config.output.runtime_package.clone();
                let members = restrictions
                    .members
                    .iter()
                    .map(|member| resolve_types(tree, member, at, session).wrapper.qualified(&runtime))
                    .collect();
                Self::Union(members)
            }
            Some(Builtin::Bits) => {
                let mut mask = BigUint::from(0u8);
                let mut names = Vec::new();
                let mut positions = Vec::new();
                let mut next = 0u64;
                for bit in &restrictions.bits {
                    let position = bit.position.map_or(next, u64::from);
                    if position > MAX_BIT_POSITION {
                        let subject = format!("{}:{}", schema_path(tree, at), bit.name);
                        session.diagnostics.bit_position_out_of_range(&subject, &bit.name, position);
                        break;
                    }
                    names.push(bit.name.clone());
                    positions.push(position as u32);
                    mask.set_bit(position, true);
                    next = position + 1;
                }
                Self::Bits { mask, names, positions }
            }
            Some(Builtin::Decimal64) => Self::Decimal64 {
                fraction_digits: restrictions.fraction_digits.unwrap_or(1),
            },
            _ => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Arguments rendered after the value argument, on one line
    pub fn render(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Enumeration(names) | Self::Union(names) => Some(format!("new String[] {{{}}}", quoted(names))),
            Self::Bits { mask, names, positions } => Some(format!(
                "new BigInteger(\"{}\"), new String[] {{{}}}, new int[] {{{}}}",
                mask,
                quoted(names),
                positions.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
            )),
            Self::Decimal64 { fraction_digits } => Some(fraction_digits.to_string()),
        }
    }

    /// `new <Wrapper>(<value>[, <args>])`
    pub fn construct(&self, wrapper: &str, value: &str) -> String {
        match self.render() {
            Some(args) => format!("new {}({}, {})", wrapper, value, args),
            None => format!("new {}({})", wrapper, value),
        }
    }

    /// Short class names the rendered arguments refer to
    pub fn dependencies(&self) -> &'static [&'static str] {
        match self {
            Self::Bits { .. } => &["BigInteger"],
            _ => &[],
        }
    }
}

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::schema::{NodeKind, SchemaNode};

    fn module() -> (SchemaTree, NodeId) {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        (tree, m)
    }

    #[test]
    fn test_builtin_table() {
        let cases = [
            ("boolean", "YangBoolean", "Boolean"),
            ("string", "YangString", "String"),
            ("enumeration", "YangEnumeration", "String"),
            ("identityref", "YangIdentityref", "String"),
            ("bits", "YangBits", "BigInteger"),
            ("decimal64", "YangDecimal64", "BigDecimal"),
            ("int8", "YangInt8", "byte"),
            ("int64", "YangInt64", "long"),
            ("uint8", "YangUInt8", "short"),
            ("uint16", "YangUInt16", "int"),
            ("uint32", "YangUInt32", "long"),
        ];
        for (name, wrapper, primitive) in cases {
            let builtin = Builtin::from_name(name).unwrap();
            assert_eq!(builtin.wrapper(), wrapper);
            assert_eq!(builtin.primitive().java_name(), primitive);
        }
        assert!(Builtin::from_name("leafref").is_none());
    }

    #[test]
    fn test_uint64_is_arbitrary_precision() {
        let (mut tree, m) = module();
        let leaf = tree.add_child(m, SchemaNode::leaf("counter", TypeRef::builtin("uint64")));
        let mut session = Session::default();

        let resolved = resolve_node_type(&tree, leaf, &mut session);
        assert_eq!(resolved.wrapper.class_name(), "YangUInt64");
        assert_eq!(resolved.primitive, HostPrimitive::BigInteger);
        assert!(!resolved.is_string());
    }

    #[test]
    fn test_module_scope_typedef_is_exported() {
        let (mut tree, m) = module();
        let percent = tree.add_child(m, SchemaNode::typedef("percent", TypeRef::builtin("uint8").with_range("0..100")));
        let leaf = tree.add_child(m, SchemaNode::leaf("load", TypeRef::derived("percent", Some(percent))));
        let mut session = Session::default();

        let resolved = resolve_node_type(&tree, leaf, &mut session);
        assert!(resolved.exported);
        assert_eq!(resolved.wrapper.qualified("com.tailf.jnc"), "gen.m.Percent");
        assert_eq!(resolved.primitive, HostPrimitive::Short);
    }

    #[test]
    fn test_nested_typedef_is_inlined() {
        let (mut tree, m) = module();
        let top = tree.add_child(m, SchemaNode::new(NodeKind::Container, "top"));
        let local = tree.add_child(top, SchemaNode::typedef("local", TypeRef::builtin("int32")));
        let leaf = tree.add_child(top, SchemaNode::leaf("x", TypeRef::derived("local", Some(local))));
        let mut session = Session::default();

        let resolved = resolve_node_type(&tree, leaf, &mut session);
        assert!(!resolved.exported);
        assert!(resolved.wrapper.is_runtime(Builtin::Int32));
    }

    #[test]
    fn test_leafref_follows_chain() {
        let (mut tree, m) = module();
        let id = tree.add_child(m, SchemaNode::leaf("id", TypeRef::builtin("uint32")));
        let r1 = tree.add_child(m, SchemaNode::leaf("r1", TypeRef::leafref("../id", Some(id))));
        let r2 = tree.add_child(m, SchemaNode::leaf("r2", TypeRef::leafref("../r1", Some(r1))));
        let mut session = Session::default();

        let resolved = resolve_node_type(&tree, r2, &mut session);
        assert!(resolved.wrapper.is_runtime(Builtin::UInt32));
        assert!(session.diagnostics.is_empty());
    }

    #[test]
    fn test_dangling_leafref_falls_back_to_string() {
        let (mut tree, m) = module();
        let leaf = tree.add_child(m, SchemaNode::leaf("r", TypeRef::leafref("/nowhere", None)));
        let mut session = Session::default();

        assert_eq!(resolve_node_type(&tree, leaf, &mut session), ResolvedType::string());
        assert_eq!(session.diagnostics.with_code(DiagnosticCode::DanglingReference).count(), 1);
    }

    #[test]
    fn test_unknown_type_warns_once_per_identifier() {
        let (mut tree, m) = module();
        let a = tree.add_child(m, SchemaNode::leaf("a", TypeRef::derived("x:mystery", None)));
        let b = tree.add_child(m, SchemaNode::leaf("b", TypeRef::derived("x:mystery", None)));
        let mut session = Session::default();

        assert_eq!(resolve_node_type(&tree, a, &mut session), ResolvedType::string());
        assert_eq!(resolve_node_type(&tree, b, &mut session), ResolvedType::string());
        let items: Vec<_> = session.diagnostics.with_code(DiagnosticCode::UnknownType).collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subject, "gen.m.Mystery");
    }

    #[test]
    fn test_derivation_cycle_terminates() {
        let (mut tree, m) = module();
        let a = tree.add_child(m, SchemaNode::typedef("a", TypeRef::builtin("string")));
        let b = tree.add_child(m, SchemaNode::typedef("b", TypeRef::derived("a", Some(a))));
        tree[a].type_ref = Some(TypeRef::derived("b", Some(b)));
        let leaf = tree.add_child(m, SchemaNode::leaf("x", TypeRef::derived("a", Some(a))));
        let mut session = Session::default();
        session.config.resolver.max_derivation_depth = 4;

        let base = resolve_base_type(&tree, tree[leaf].type_ref.as_ref().unwrap(), &mut session);
        assert_eq!(base.kind, TypeRefKind::Derived);
        let resolved = resolve_node_type(&tree, leaf, &mut session);
        assert_eq!(resolved.wrapper.class_name(), "A");
        assert!(session.diagnostics.with_code(DiagnosticCode::DerivationDepthExceeded).count() >= 1);
    }

    #[test]
    fn test_bits_mask_and_positions() {
        let (mut tree, m) = module();
        let bits = TypeRef::builtin("bits")
            .with_bit("a", None)
            .with_bit("b", Some(4))
            .with_bit("c", None)
            .with_bit("huge", Some(70));
        let leaf = tree.add_child(m, SchemaNode::leaf("flags", bits.clone()));
        let mut session = Session::default();

        let args = CompositeArgs::for_wrapper(&tree, &WrapperType::runtime(Builtin::Bits), &bits, leaf, &mut session);
        let expected_mask = (BigUint::from(1u8) << 70u32) + BigUint::from(1u32 + 16 + 32);
        match &args {
            CompositeArgs::Bits { mask, positions, .. } => {
                assert_eq!(mask, &expected_mask);
                assert_eq!(positions, &vec![0, 4, 5, 70]);
            }
            other => panic!("Expected Bits, got {:?}", other),
        }
        assert_eq!(
            args.render().unwrap(),
            format!("new BigInteger(\"{}\"), new String[] {{\"a\", \"b\", \"c\", \"huge\"}}, new int[] {{0, 4, 5, 70}}", expected_mask)
        );
    }

    #[test]
    fn test_bit_positions_past_int_range_stop() {
        let (mut tree, m) = module();
        let bits = TypeRef::builtin("bits")
            .with_bit("a", Some(100))
            .with_bit("last", Some(u32::MAX - 1))
            .with_bit("next", None);
        let leaf = tree.add_child(m, SchemaNode::leaf("flags", bits.clone()));
        let mut session = Session::default();

        let args = CompositeArgs::for_wrapper(&tree, &WrapperType::runtime(Builtin::Bits), &bits, leaf, &mut session);
        match &args {
            CompositeArgs::Bits { mask, names, positions } => {
                assert_eq!(mask, &(BigUint::from(1u8) << 100u32));
                assert_eq!(names, &vec!["a".to_string()]);
                assert_eq!(positions, &vec![100]);
            }
            other => panic!("Expected Bits, got {:?}", other),
        }

        let out_of_range: Vec<_> = session
            .diagnostics
            .with_code(DiagnosticCode::BitPositionOutOfRange)
            .collect();
        assert_eq!(out_of_range.len(), 1);
        assert_eq!(out_of_range[0].subject, "/m/flags:last");
    }

    #[test]
    fn test_union_and_enum_args() {
        let (mut tree, m) = module();
        let union = TypeRef::builtin("union")
            .with_member(TypeRef::builtin("int32"))
            .with_member(TypeRef::builtin("string"));
        let leaf = tree.add_child(m, SchemaNode::leaf("u", union.clone()));
        let mut session = Session::default();

        let args = CompositeArgs::for_wrapper(&tree, &WrapperType::runtime(Builtin::Union), &union, leaf, &mut session);
        assert_eq!(
            args.construct("YangUnion", "uValue"),
            "new YangUnion(uValue, new String[] {\"com.tailf.jnc.YangInt32\", \"com.tailf.jnc.YangString\"})"
        );

        let colors = TypeRef::builtin("enumeration").with_enums(["red", "green"]);
        let args = CompositeArgs::for_wrapper(&tree, &WrapperType::runtime(Builtin::Enumeration), &colors, leaf, &mut session);
        assert_eq!(args.render().as_deref(), Some("new String[] {\"red\", \"green\"}"));

        let plain = CompositeArgs::for_wrapper(&tree, &WrapperType::runtime(Builtin::String), &colors, leaf, &mut session);
        assert!(plain.is_none());
        assert_eq!(plain.construct("YangString", "v"), "new YangString(v)");
    }
}
