//! Length-keyed layout table
//!
//! A [`LayoutTable`] maps a text length to an ordered list of
//! [`LayoutRule`]s. Applying the rules to a text slices it, front to back,
//! into one [`LayoutDescriptor`] per rule. Short texts fit on a single face;
//! longer ones are split across several.
//!
//! Tables can be assembled in code or loaded from JSON:
//!
//! ```json
//! { "1": [{ "category": "round", "columns": 1, "rows": 1, "take": 1 }] }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Result, StampError};
use crate::traits::LayoutLookup;
use crate::types::{Category, LayoutDescriptor, MAX_TEXT_LEN, MIN_TEXT_LEN};

/// One stamp face: its shape, its grid, and how many characters it consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRule {
    pub category: Category,
    pub columns: u32,
    pub rows: u32,
    pub take: usize,
}

impl LayoutRule {
    pub const fn new(category: Category, columns: u32, rows: u32, take: usize) -> Self {
        Self {
            category,
            columns,
            rows,
            take,
        }
    }

    /// A round face taking as many characters as it has cells
    pub const fn round(columns: u32, rows: u32) -> Self {
        Self::new(Category::Round, columns, rows, (columns * rows) as usize)
    }

    /// A rectangular face taking as many characters as it has cells
    pub const fn rect(columns: u32, rows: u32) -> Self {
        Self::new(Category::Rect, columns, rows, (columns * rows) as usize)
    }

    /// Consume fewer characters than the grid has cells
    pub const fn taking(mut self, take: usize) -> Self {
        self.take = take;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(StampError::InvalidLayout(format!(
                "grid must have at least one row and column, got {}x{}",
                self.columns, self.rows
            )));
        }
        let cells = self.columns as usize * self.rows as usize;
        if self.take == 0 || self.take > cells {
            return Err(StampError::InvalidLayout(format!(
                "a {}x{} grid cannot hold {} characters",
                self.columns, self.rows, self.take
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawRule {
    category: String,
    columns: u32,
    rows: u32,
    take: Option<usize>,
}

impl TryFrom<RawRule> for LayoutRule {
    type Error = StampError;

    fn try_from(raw: RawRule) -> Result<Self> {
        let category = raw.category.parse()?;
        let cells = raw.columns as usize * raw.rows as usize;
        Ok(Self::new(category, raw.columns, raw.rows, raw.take.unwrap_or(cells)))
    }
}

/// Text length to stamp faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTable {
    entries: BTreeMap<usize, Vec<LayoutRule>>,
}

impl LayoutTable {
    /// An empty table
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The conventional seal layouts for one to nine characters
    pub fn standard() -> Self {
        Self::new()
            .with_entry(1, [LayoutRule::round(1, 1)])
            .with_entry(2, [LayoutRule::round(1, 2)])
            .with_entry(3, [LayoutRule::round(1, 3)])
            .with_entry(4, [LayoutRule::rect(2, 2)])
            .with_entry(5, [LayoutRule::rect(3, 2).taking(5)])
            .with_entry(6, [LayoutRule::rect(3, 2)])
            .with_entry(7, [LayoutRule::rect(2, 2), LayoutRule::round(1, 3)])
            .with_entry(8, [LayoutRule::rect(2, 2), LayoutRule::rect(2, 2)])
            .with_entry(9, [LayoutRule::rect(3, 3)])
    }

    /// Load a table from JSON keyed by text length
    ///
    /// `take` may be omitted, in which case a rule consumes one character
    /// per cell.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<usize, Vec<RawRule>> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (length, rules) in raw {
            let rules = rules
                .into_iter()
                .map(LayoutRule::try_from)
                .collect::<Result<Vec<_>>>()?;
            table.insert(length, rules)?;
        }
        Ok(table)
    }

    /// Register the faces for `length`, checking that they consume exactly
    /// `length` characters
    pub fn insert(&mut self, length: usize, rules: Vec<LayoutRule>) -> Result<()> {
        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&length) {
            return Err(StampError::InvalidLayout(format!(
                "text length {length} is outside {MIN_TEXT_LEN}..={MAX_TEXT_LEN}"
            )));
        }
        if rules.is_empty() {
            return Err(StampError::InvalidLayout(format!(
                "no faces given for length {length}"
            )));
        }
        for rule in &rules {
            rule.validate()?;
        }
        let consumed: usize = rules.iter().map(|rule| rule.take).sum();
        if consumed != length {
            return Err(StampError::InvalidLayout(format!(
                "faces for length {length} consume {consumed} characters"
            )));
        }
        self.entries.insert(length, rules);
        Ok(())
    }

    fn with_entry<const N: usize>(mut self, length: usize, rules: [LayoutRule; N]) -> Self {
        self.entries.insert(length, rules.to_vec());
        self
    }

    /// The faces registered for `length`
    pub fn rules(&self, length: usize) -> Option<&[LayoutRule]> {
        self.entries.get(&length).map(Vec::as_slice)
    }

    /// Lengths that have an entry, ascending
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Slice `text` into one descriptor per face
    pub fn apply(&self, text: &str) -> Result<Vec<LayoutDescriptor>> {
        let length = text.chars().count();
        let rules = self
            .rules(length)
            .ok_or(StampError::MissingLayout { length })?;

        let mut chars = text.chars();
        Ok(rules
            .iter()
            .map(|rule| {
                let word: String = chars.by_ref().take(rule.take).collect();
                LayoutDescriptor::new(rule.category, rule.columns, rule.rows, word)
            })
            .collect())
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayoutLookup for LayoutTable {
    fn layouts(&self, text: &str) -> Result<Vec<LayoutDescriptor>> {
        self.apply(text)
    }
}
