//! String tables and CSV I/O.
//!
//! The splitter core only sees an [`InteractionTable`]. This module is the
//! boundary: it reads a CSV with arbitrary columns, pulls out the three
//! columns the splitter needs, and writes the per-row `split` column back
//! next to the untouched originals.
//!
//! ```text
//! CSV → Table → interactions() → Splitter → RowSplit → with_split_column() → CSV
//! ```

use std::io::{Read, Write};
use std::path::Path;

use crate::model::{InteractionRow, InteractionTable, Label, Tier};
use crate::split::RowSplit;
use crate::{Error, Result};

/// Cells pandas-style exports use for missing values.
const NULL_MARKERS: [&str; 4] = ["", "NA", "NaN", "nan"];

fn is_null(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell.trim())
}

/// Rectangular table of string cells with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, records: Vec::new() }
    }

    // ========================================================================
    // CSV
    // ========================================================================

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Read a headed CSV. Every record must have as many fields as the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut table = Self::new(headers);
        for record in rdr.records() {
            let record = record?;
            table.records.push(record.iter().map(str::to_string).collect());
        }
        tracing::debug!(rows = table.len(), columns = table.headers.len(), "table loaded");
        Ok(table)
    }

    pub fn to_csv_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for record in &self.records {
            wtr.write_record(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    // ========================================================================
    // Access
    // ========================================================================

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.column_index(name)?;
        Some(self.records.iter().map(move |r| r.get(idx).map_or("", String::as_str)))
    }

    pub fn push_record(&mut self, record: Vec<String>) -> Result<()> {
        if record.len() != self.headers.len() {
            return Err(Error::MalformedInput(format!(
                "record has {} fields, header has {}",
                record.len(),
                self.headers.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace column `name`, appending it if absent.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.records.len() {
            return Err(Error::MalformedInput(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.records.len()
            )));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (record, value) in self.records.iter_mut().zip(values) {
                    record[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (record, value) in self.records.iter_mut().zip(values) {
                    record.push(value);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Splitter boundary
    // ========================================================================

    /// Extract the interaction rows, in table order.
    ///
    /// Fails on a missing column, an empty table, a null key or a label
    /// that is not binary.
    pub fn interactions(
        &self,
        protein_col: &str,
        substrate_col: &str,
        label_col: &str,
    ) -> Result<InteractionTable> {
        let require = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| Error::MalformedInput(format!("missing column '{name}'")))
        };
        let (p, s, l) = (require(protein_col)?, require(substrate_col)?, require(label_col)?);

        if self.is_empty() {
            return Err(Error::MalformedInput("table has no rows".into()));
        }

        let mut rows = Vec::with_capacity(self.records.len());
        for (idx, record) in self.records.iter().enumerate() {
            let protein = &record[p];
            let substrate = &record[s];
            if is_null(protein) {
                return Err(Error::MalformedInput(format!("row {idx}: null {protein_col}")));
            }
            if is_null(substrate) {
                return Err(Error::MalformedInput(format!("row {idx}: null {substrate_col}")));
            }
            let label = Label::parse(&record[l]).ok_or_else(|| {
                Error::MalformedInput(format!(
                    "row {idx}: {label_col} '{}' is not a binary label",
                    record[l]
                ))
            })?;
            rows.push(InteractionRow::new(protein.trim(), substrate.trim(), label));
        }
        Ok(InteractionTable::new(rows))
    }

    /// Copy of this table with a split column appended (or replaced).
    pub fn with_split_column(&self, name: &str, split: &RowSplit) -> Result<Table> {
        let mut out = self.clone();
        out.set_column(name, split.labels().map(str::to_string).collect())?;
        Ok(out)
    }

    /// Rows whose split column equals `tier`.
    pub fn filter_split(&self, name: &str, tier: Tier) -> Result<Table> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::MalformedInput(format!("missing column '{name}'")))?;
        let records = self
            .records
            .iter()
            .filter(|r| r.get(idx).is_some_and(|v| v == tier.as_str()))
            .cloned()
            .collect();
        Ok(Table { headers: self.headers.clone(), records })
    }
}
