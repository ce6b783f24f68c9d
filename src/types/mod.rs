use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(NonZeroU32);

/// Category of a documented entity. One qualified name may carry up to one
/// record per kind (companion `Object` + `Class` pairs are two records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolKind {
    Class,
    Trait,
    Object,
    CaseClass,
}

impl SymbolId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }

    /// Convert to the underlying u32 value
    pub fn to_u32(self) -> u32 {
        self.0.get()
    }
}

impl PackageId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }

    /// Convert to the underlying u32 value
    pub fn to_u32(self) -> u32 {
        self.0.get()
    }
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 4] = [
        SymbolKind::Class,
        SymbolKind::Trait,
        SymbolKind::Object,
        SymbolKind::CaseClass,
    ];

    /// Stable lowercase name, matching the raw listing marker spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Trait => "trait",
            SymbolKind::Object => "object",
            SymbolKind::CaseClass => "case-class",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = UnknownKindName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(SymbolKind::Class),
            "trait" | "interface" => Ok(SymbolKind::Trait),
            "object" => Ok(SymbolKind::Object),
            "case-class" | "case class" | "record" => Ok(SymbolKind::CaseClass),
            other => Err(UnknownKindName(other.to_string())),
        }
    }
}

/// Raised by `SymbolKind::from_str` for names outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKindName(pub String);

impl std::fmt::Display for UnknownKindName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown symbol kind: '{}'", self.0)
    }
}

impl std::error::Error for UnknownKindName {}

pub type CompactString = Box<str>;

pub fn compact_string(s: &str) -> CompactString {
    s.into()
}
