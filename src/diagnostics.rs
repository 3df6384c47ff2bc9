//! Diagnostics
//!
//! Collects recoverable problems found while compiling a module. Every item is
//! keyed by a stable identity (code + subject) so that the same condition hit
//! from many nodes is reported once.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Diagnostic Codes
// =============================================================================

/// Diagnostic code for categorizing issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // === Types ===
    /// Type identifier not in the builtin table and not a known typedef
    UnknownType,
    /// Cross-reference or derived type pointing at nothing
    DanglingReference,
    /// Derivation chain longer than the configured cap
    DerivationDepthExceeded,
    /// Typedefs deriving from each other in a loop
    DerivationCycle,
    /// Bit position that does not fit the generated `int[]` positions
    BitPositionOutOfRange,

    // === Structure ===
    /// List key naming a leaf that does not exist
    DanglingKey,
    /// Augment statement without a resolvable target
    MissingAugmentTarget,
    /// Augmented module could not be compiled
    AugmentedModuleSkipped,

    // === Generation ===
    /// Two fields of one class accept the same child class in addChild
    AmbiguousChildDispatch,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownType => "W001",
            Self::DanglingReference => "W002",
            Self::DerivationDepthExceeded => "W003",
            Self::DerivationCycle => "W004",
            Self::DanglingKey => "W005",
            Self::MissingAugmentTarget => "W006",
            Self::AugmentedModuleSkipped => "W007",
            Self::BitPositionOutOfRange => "W008",
            Self::AmbiguousChildDispatch => "I001",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::AmbiguousChildDispatch => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

// =============================================================================
// Diagnostic Item
// =============================================================================

/// A single diagnostic item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticItem {
    /// What the diagnostic is about (type name, node path, module name)
    pub subject: String,
    /// Diagnostic code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Additional context lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

impl DiagnosticItem {
    pub fn new(subject: impl Into<String>, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }
}

impl fmt::Display for DiagnosticItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.code,
            self.code.severity(),
            self.message,
            self.subject
        )?;

        for ctx in &self.context {
            write!(f, "\n  - {}", ctx)?;
        }

        Ok(())
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Deduplicating collection of diagnostics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "StoredDiagnostics")]
pub struct Diagnostics {
    items: Vec<DiagnosticItem>,
    #[serde(skip)]
    seen: HashSet<(DiagnosticCode, String)>,
}

/// Serialized form; the identity set is rebuilt on load
#[derive(Deserialize)]
struct StoredDiagnostics {
    #[serde(default)]
    items: Vec<DiagnosticItem>,
}

impl From<StoredDiagnostics> for Diagnostics {
    fn from(stored: StoredDiagnostics) -> Self {
        let seen = stored
            .items
            .iter()
            .map(|item| (item.code, item.subject.clone()))
            .collect();
        Self {
            items: stored.items,
            seen,
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic unless one with the same code and subject exists.
    ///
    /// Returns `true` if the item was new.
    pub fn push(&mut self, item: DiagnosticItem) -> bool {
        if !self.seen.insert((item.code, item.subject.clone())) {
            return false;
        }
        tracing::warn!(code = %item.code, subject = %item.subject, "{}", item.message);
        self.items.push(item);
        true
    }

    /// Unknown type identifier, falls back to string
    pub fn unknown_type(&mut self, qualified_name: &str) -> bool {
        self.push(DiagnosticItem::new(
            qualified_name,
            DiagnosticCode::UnknownType,
            format!("No support for type \"{}\", defaulting to string.", qualified_name),
        ))
    }

    /// Reference whose target node is missing
    pub fn dangling_reference(&mut self, subject: &str, type_name: &str) -> bool {
        self.push(DiagnosticItem::new(
            subject,
            DiagnosticCode::DanglingReference,
            format!("Type \"{}\" refers to a node that does not exist, defaulting to string.", type_name),
        ))
    }

    /// Derivation chain hit the depth cap
    pub fn derivation_depth(&mut self, type_name: &str, depth: usize) -> bool {
        self.push(DiagnosticItem::new(
            type_name,
            DiagnosticCode::DerivationDepthExceeded,
            format!("Derivation of \"{}\" is deeper than {} levels, stopped resolving.", type_name, depth),
        ))
    }

    /// Typedefs deriving from each other
    pub fn derivation_cycle(&mut self, members: &[String]) -> bool {
        let mut sorted = members.to_vec();
        sorted.sort();
        self.push(
            DiagnosticItem::new(
                sorted.join(","),
                DiagnosticCode::DerivationCycle,
                format!("Typedefs derive from each other: {}", members.join(" -> ")),
            )
            .with_context(format!("{} typedef(s) in cycle", members.len())),
        )
    }

    /// List key that does not name a leaf of the list
    pub fn dangling_key(&mut self, list_path: &str, key: &str) -> bool {
        self.push(
            DiagnosticItem::new(
                list_path,
                DiagnosticCode::DanglingKey,
                format!("Key \"{}\" of list \"{}\" not found, generating as non-configuration list.", key, list_path),
            ),
        )
    }

    /// Augment with no target
    pub fn missing_augment_target(&mut self, augment_path: &str) -> bool {
        self.push(DiagnosticItem::new(
            augment_path,
            DiagnosticCode::MissingAugmentTarget,
            "Target missing from augment statement",
        ))
    }

    /// Augmented module dropped
    pub fn augmented_module_skipped(&mut self, module: &str, reason: &str) -> bool {
        self.push(
            DiagnosticItem::new(
                module,
                DiagnosticCode::AugmentedModuleSkipped,
                format!("Augmented module \"{}\" was not generated", module),
            )
            .with_context(reason.to_string()),
        )
    }

    /// Bit position past the last representable one; the remaining bits are dropped
    pub fn bit_position_out_of_range(&mut self, subject: &str, bit: &str, position: u64) -> bool {
        self.push(
            DiagnosticItem::new(
                subject,
                DiagnosticCode::BitPositionOutOfRange,
                format!("Bit \"{}\" has position {}, bits from here on are not generated", bit, position),
            )
            .with_context(format!("Largest supported position is {}", i32::MAX)),
        )
    }

    /// Several addChild branches test the same class
    pub fn ambiguous_child_dispatch(&mut self, class: &str, child_class: &str, fields: &[String]) -> bool {
        self.push(
            DiagnosticItem::new(
                format!("{}.{}", class, child_class),
                DiagnosticCode::AmbiguousChildDispatch,
                format!(
                    "addChild in {} tests {} for several fields, the last declared field wins",
                    class, child_class
                ),
            )
            .with_context(format!("Fields: {}", fields.join(", "))),
        )
    }

    /// Get all warnings
    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticItem> {
        self.items.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// Items with a given code
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &DiagnosticItem> {
        self.items.iter().filter(move |i| i.code == code)
    }

    /// Get all items
    pub fn all(&self) -> &[DiagnosticItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Format all diagnostics for display
    pub fn format_all(&self) -> String {
        let mut output = String::new();

        for item in &self.items {
            output.push_str(&format!("{}\n", item));
        }

        if !self.is_empty() {
            output.push_str(&format!("\n{} warning(s)\n", self.warning_count()));
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_all())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticItem;
    type IntoIter = std::slice::Iter<'a, DiagnosticItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
