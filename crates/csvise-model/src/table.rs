#![deny(unsafe_code)]

use serde::Serialize;

use crate::inference::infer_schema;
use crate::types::{TypeTag, classify, parse_finite};

/// A normalized value together with its classified type.
///
/// The tag is always derived from the value, so a field can never disagree
/// with its own text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    value: String,
    tag: TypeTag,
}

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let tag = classify(&value);
        Self { value, tag }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// The value as a finite number when it classifies as `int` or `float`.
    pub fn as_f64(&self) -> Option<f64> {
        if self.tag.is_numeric() {
            parse_finite(&self.value)
        } else {
            None
        }
    }

    /// True when the value is blank.
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

}

/// One data record and its original 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub position: usize,
    pub fields: Vec<Field>,
}

impl Row {
    pub fn new(position: usize, fields: Vec<Field>) -> Self {
        Self { position, fields }
    }

    pub fn from_values<I, S>(position: usize, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position,
            fields: values.into_iter().map(Field::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Value at `index`, or `None` when the row is too short.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(Field::value)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::value)
    }

    /// True when the field at `index` is blank or absent.
    pub fn is_missing(&self, index: usize) -> bool {
        self.fields.get(index).is_none_or(Field::is_empty)
    }

    /// Replace the value at `index`, padding the row with empty fields if needed.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if self.fields.len() <= index {
            self.fields.resize_with(index + 1, Field::empty);
        }
        self.fields[index] = Field::new(value);
    }
}

/// A header column with its inferred expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub index: usize,
    pub expected: TypeTag,
}

/// Expected type per column index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    types: Vec<TypeTag>,
}

impl Schema {
    pub fn new(types: Vec<TypeTag>) -> Self {
        Self { types }
    }

    pub fn expected(&self, index: usize) -> Option<TypeTag> {
        self.types.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[TypeTag] {
        &self.types
    }
}

/// The in-memory parsed dataset.
///
/// The columns are fixed at construction. Replacing the body leaves the
/// expected types alone until [`Table::reinfer_schema`] recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
    delimiter: String,
}

impl Table {
    /// Build a table from header names and a schema of the same length.
    ///
    /// Extra header names without a schema entry default to `str`.
    pub fn new(
        header: Vec<String>,
        schema: &Schema,
        rows: Vec<Row>,
        delimiter: impl Into<String>,
    ) -> Self {
        let columns = header
            .into_iter()
            .enumerate()
            .map(|(index, name)| Column {
                name,
                index,
                expected: schema.expected(index).unwrap_or(TypeTag::Str),
            })
            .collect();
        Self {
            columns,
            rows,
            delimiter: delimiter.into(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn schema(&self) -> Schema {
        Schema::new(self.columns.iter().map(|c| c.expected).collect())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Replace the row body in place.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Same columns and delimiter with a new body.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
            delimiter: self.delimiter.clone(),
        }
    }

    /// Recompute every column's expected type from the current body.
    ///
    /// Returns the `(index, previous, current)` of each column whose type changed.
    pub fn reinfer_schema(&mut self) -> Vec<(usize, TypeTag, TypeTag)> {
        let schema = infer_schema(&self.rows, self.columns.len());
        let mut changed = Vec::new();
        for column in &mut self.columns {
            let current = schema.expected(column.index).unwrap_or(TypeTag::Str);
            if current != column.expected {
                changed.push((column.index, column.expected, current));
                column.expected = current;
            }
        }
        changed
    }

    /// Display width per column: the widest of the header and every present value.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .collect();
        for row in &self.rows {
            for (width, field) in widths.iter_mut().zip(&row.fields) {
                *width = (*width).max(field.value().chars().count());
            }
        }
        widths
    }

    /// `(row position, field)` for every row; the field is `None` when the row is too short.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = (usize, Option<&Field>)> {
        self.rows.iter().map(move |row| (row.position, row.get(index)))
    }
}
