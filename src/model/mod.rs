//! Core data model: state categories and digested spec records.
//!
//! A `SpecRecord` is one fully digested row: an ordered mapping from
//! canonical attribute to emitted value, in column order, with the derived
//! attributes (mangled name, internal name) inserted where the short name
//! appeared and the rank carried as a typed field. Records are built by the
//! digestion step and consumed read-only by the emission step.

use serde::Serialize;

use crate::schema::{self, AttrId};

/// The three kinds of state-variable specs a component declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Import,
    Export,
    Internal,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Import, Category::Export, Category::Internal];

    /// Category keyword as it appears in the spec file.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Import => "IMPORT",
            Category::Export => "EXPORT",
            Category::Internal => "INTERNAL",
        }
    }

    /// The state argument passed to the generated retrieval call.
    pub fn state_name(self) -> &'static str {
        match self {
            Category::Import => "import",
            Category::Export => "export",
            Category::Internal => "internal",
        }
    }

    /// The registration procedure for this category.
    pub fn add_spec_call(self) -> &'static str {
        match self {
            Category::Import => "MAPL_AddImportSpec",
            Category::Export => "MAPL_AddExportSpec",
            Category::Internal => "MAPL_AddInternalSpec",
        }
    }

    pub fn parse(token: &str) -> Option<Category> {
        match token.trim().to_uppercase().as_str() {
            "IMPORT" => Some(Category::Import),
            "EXPORT" => Some(Category::Export),
            "INTERNAL" => Some(Category::Internal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One digested spec row. Attribute order is the input column order; the
/// emission step relies on it for stable argument order.
#[derive(Debug, Clone)]
pub struct SpecRecord {
    pub category: Category,
    values: Vec<(AttrId, Option<String>)>,
    rank: u32,
}

impl SpecRecord {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            values: Vec::new(),
            rank: 0,
        }
    }

    /// Present, non-absent value for `id`.
    pub fn get(&self, id: AttrId) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == id)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Insert a value, or overwrite in place if the attribute was already
    /// set (a row naming the same option under two aliases keeps the first
    /// position).
    pub fn set(&mut self, id: AttrId, value: Option<String>) {
        match self.values.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((id, value)),
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }

    pub fn condition(&self) -> Option<&str> {
        self.get(AttrId::Condition)
    }

    pub fn mangled_name(&self) -> &str {
        self.get(AttrId::MangledName)
            .expect("digestion derives mangled_name from the short name")
    }

    pub fn internal_name(&self) -> &str {
        self.get(AttrId::InternalName)
            .expect("digestion derives internal_name from the short name")
    }

    /// `(name_key, value)` pairs for the registration call: attributes that
    /// are flagged for output and actually carry a value, in input order.
    pub fn output_args(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().filter_map(|(id, value)| {
            let def = schema::def(*id);
            match value {
                Some(v) if def.output => Some((id.name_key(), v.as_str())),
                _ => None,
            }
        })
    }

    pub fn view(&self) -> RecordView {
        RecordView {
            category: self.category.as_str(),
            rank: self.rank,
            attributes: self
                .values
                .iter()
                .map(|(id, value)| AttrView {
                    key: id.name_key(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Serializable snapshot of a record, for the digest dump stream.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub category: &'static str,
    pub rank: u32,
    pub attributes: Vec<AttrView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttrView {
    pub key: &'static str,
    pub value: Option<String>,
}
