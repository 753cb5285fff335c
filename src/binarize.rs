//! Activity binarization.
//!
//! Screens report activity as levels (`low`, `medium`, `high` and mixed
//! readings such as `low, high`). The splitter stratifies on a binary
//! label, so levels are collapsed to active/inactive before splitting.

use crate::model::Label;
use crate::table::Table;
use crate::{Error, Result};

/// Maps a raw activity value to a binary label.
pub trait LabelBinarizer {
    fn binarize(&self, raw: &str) -> Label;
}

/// Any listed level is active; everything else, including blanks, is inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLevels {
    active: Vec<String>,
}

impl Default for ActivityLevels {
    fn default() -> Self {
        Self::new(["low", "medium", "high", "low, high", "low, medium", "medium, high"])
    }
}

impl ActivityLevels {
    pub fn new(active: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { active: active.into_iter().map(Into::into).collect() }
    }

    pub fn active_levels(&self) -> &[String] {
        &self.active
    }
}

impl LabelBinarizer for ActivityLevels {
    fn binarize(&self, raw: &str) -> Label {
        let raw = raw.trim();
        Label::from(self.active.iter().any(|level| level == raw))
    }
}

/// Derive a `0`/`1` column `target` from column `source`, overwriting
/// `target` if it already exists. Returns the number of active rows.
pub fn binarize_column<B: LabelBinarizer + ?Sized>(
    table: &mut Table,
    source: &str,
    target: &str,
    binarizer: &B,
) -> Result<usize> {
    let src = table
        .column_index(source)
        .ok_or_else(|| Error::MalformedInput(format!("missing column '{source}'")))?;

    let labels: Vec<Label> = table
        .records()
        .iter()
        .map(|record| binarizer.binarize(record.get(src).map_or("", String::as_str)))
        .collect();
    let active = labels.iter().filter(|l| **l == Label::Active).count();

    table.set_column(target, labels.iter().map(|l| l.to_string()).collect())?;
    tracing::debug!(source, target, active, rows = labels.len(), "activity binarized");
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let b = ActivityLevels::default();
        assert_eq!(b.binarize("high"), Label::Active);
        assert_eq!(b.binarize("low, medium"), Label::Active);
        assert_eq!(b.binarize(" medium "), Label::Active);
        assert_eq!(b.binarize("none"), Label::Inactive);
        assert_eq!(b.binarize(""), Label::Inactive);
        assert_eq!(b.binarize("High"), Label::Inactive);
    }

    #[test]
    fn test_binarize_column() {
        let mut t = Table::new(vec!["UGT".into(), "substrate".into(), "activity".into()]);
        t.push_record(vec!["A".into(), "x".into(), "high".into()]).unwrap();
        t.push_record(vec!["B".into(), "y".into(), "none".into()]).unwrap();
        let active = binarize_column(&mut t, "activity", "is_active", &ActivityLevels::default()).unwrap();
        assert_eq!(active, 1);
        assert_eq!(t.column("is_active").unwrap().collect::<Vec<_>>(), vec!["1", "0"]);
    }

    #[test]
    fn test_missing_source_column() {
        let mut t = Table::new(vec!["a".into()]);
        let err = binarize_column(&mut t, "activity", "is_active", &ActivityLevels::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
