//! Client-side tabular view over fetched collections.
//!
//! A [`Table`] holds column definitions plus view state (sort, filters,
//! paging). It never owns the records; every query takes the data slice
//! and returns borrowed rows, so the same view can be re-applied after a
//! refresh.

use std::cmp::Ordering;
use std::fmt::Write as _;

use thiserror::Error;

const EMPTY_CELL: &str = "\u{2014}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("unknown column \"{0}\"")]
    UnknownColumn(String),

    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A single cell value produced by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// `Empty` when `value` is `None`, otherwise the mapped cell.
    pub fn optional<V>(value: Option<V>, map: impl FnOnce(V) -> CellValue) -> Self {
        value.map_or(CellValue::Empty, map)
    }

    fn render(&self, precision: Option<usize>) -> String {
        match self {
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) => match precision {
                Some(p) => format!("{n:.p$}"),
                None => n.to_string(),
            },
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => EMPTY_CELL.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Integer(_) | CellValue::Number(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Empty => 2,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) | CellValue::Empty => None,
        }
    }

    /// Ordering for ascending sort. Numbers compare numerically, text
    /// lexically (case-insensitive), and numbers sort before text.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

/// Column definition: a stable id, a header, and an accessor.
pub struct Column<'a, T> {
    id: String,
    header: String,
    precision: Option<usize>,
    accessor: Box<dyn Fn(&T) -> CellValue + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'a,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            precision: None,
            accessor: Box::new(accessor),
        }
    }

    /// Fixed number of decimals when rendering `Number` cells.
    #[must_use]
    pub fn with_precision(mut self, decimals: usize) -> Self {
        self.precision = Some(decimals);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    fn display(&self, row: &T) -> String {
        self.value(row).render(self.precision)
    }

    fn matches_name(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name) || self.header.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-column tri-state sort: unsorted, ascending, descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: Some((column.into(), direction)),
        }
    }

    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|(c, _)| c.as_str())
    }

    #[must_use]
    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, d)| *d)
    }

    /// Advances the cycle for `column`. A different column restarts at
    /// ascending.
    pub fn toggle(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((current, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column.to_string(), SortDirection::Ascending)),
        };
    }
}

pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
    sort: SortState,
    filters: Vec<(usize, String)>,
    global_filter: Option<String>,
    page_size: Option<usize>,
}

impl<'a, T> Table<'a, T> {
    #[must_use]
    pub fn new(columns: Vec<Column<'a, T>>) -> Self {
        Self {
            columns,
            sort: SortState::default(),
            filters: Vec::new(),
            global_filter: None,
            page_size: None,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<'a, T>] {
        &self.columns
    }

    #[must_use]
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c.matches_name(name))
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Cycles the sort state of the named column (id or header).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if no column matches `name`.
    pub fn toggle_sort(&mut self, name: &str) -> Result<(), TableError> {
        let idx = self.column_index(name)?;
        let id = self.columns[idx].id.clone();
        self.sort.toggle(&id);
        Ok(())
    }

    /// Sets the sort directly. `None` clears sorting.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if no column matches `name`.
    pub fn set_sort(&mut self, name: &str, direction: Option<SortDirection>) -> Result<(), TableError> {
        let idx = self.column_index(name)?;
        self.sort = match direction {
            Some(dir) => SortState::by(self.columns[idx].id.clone(), dir),
            None => SortState::unsorted(),
        };
        Ok(())
    }

    /// Sets a case-insensitive substring filter on one column. An empty
    /// needle removes the filter.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if no column matches `name`.
    pub fn set_filter(&mut self, name: &str, needle: &str) -> Result<(), TableError> {
        let idx = self.column_index(name)?;
        self.filters.retain(|(i, _)| *i != idx);
        if !needle.is_empty() {
            self.filters.push((idx, needle.to_lowercase()));
        }
        Ok(())
    }

    /// Substring filter matched against every column.
    pub fn set_global_filter(&mut self, needle: &str) {
        self.global_filter = (!needle.is_empty()).then(|| needle.to_lowercase());
    }

    /// Enables page chunking. `None` shows all rows on one page.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroPageSize`] for `Some(0)`.
    pub fn set_page_size(&mut self, page_size: Option<usize>) -> Result<(), TableError> {
        if page_size == Some(0) {
            return Err(TableError::ZeroPageSize);
        }
        self.page_size = page_size;
        Ok(())
    }

    fn row_matches(&self, row: &T) -> bool {
        let column_ok = self.filters.iter().all(|(idx, needle)| {
            self.columns[*idx]
                .display(row)
                .to_lowercase()
                .contains(needle.as_str())
        });
        let global_ok = self.global_filter.as_ref().is_none_or(|needle| {
            self.columns
                .iter()
                .any(|c| c.display(row).to_lowercase().contains(needle.as_str()))
        });
        column_ok && global_ok
    }

    /// Filtered and sorted rows, all pages.
    pub fn rows<'r>(&self, data: &'r [T]) -> Vec<&'r T> {
        let mut rows: Vec<&T> = data.iter().filter(|row| self.row_matches(row)).collect();

        if let Some((id, direction)) = &self.sort.active {
            if let Some(column) = self.columns.iter().find(|c| &c.id == id) {
                rows.sort_by(|a, b| {
                    let (va, vb) = (column.value(a), column.value(b));
                    // Empty cells stay at the bottom in both directions.
                    match (&va, &vb) {
                        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
                        (CellValue::Empty, _) => Ordering::Greater,
                        (_, CellValue::Empty) => Ordering::Less,
                        _ => match direction {
                            SortDirection::Ascending => va.compare(&vb),
                            SortDirection::Descending => vb.compare(&va),
                        },
                    }
                });
            }
        }

        rows
    }

    /// Number of pages for `data` under the current filters. Always at
    /// least one.
    pub fn page_count(&self, data: &[T]) -> usize {
        match self.page_size {
            Some(size) => self.rows(data).len().div_ceil(size).max(1),
            None => 1,
        }
    }

    /// Rows on zero-based `page`. Out-of-range pages are empty.
    pub fn page<'r>(&self, data: &'r [T], page: usize) -> Vec<&'r T> {
        let rows = self.rows(data);
        match self.page_size {
            Some(size) => match page.checked_mul(size) {
                Some(start) => rows.into_iter().skip(start).take(size).collect(),
                None => Vec::new(),
            },
            None if page == 0 => rows,
            None => Vec::new(),
        }
    }

    /// Renders `page` as aligned plain text with a header row. The header
    /// of the sorted column carries an arrow.
    pub fn render(&self, data: &[T], page: usize) -> String {
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| match (self.sort.column(), self.sort.direction()) {
                (Some(id), Some(SortDirection::Ascending)) if id == c.id => {
                    format!("{} \u{2191}", c.header)
                }
                (Some(id), Some(SortDirection::Descending)) if id == c.id => {
                    format!("{} \u{2193}", c.header)
                }
                _ => c.header.clone(),
            })
            .collect();

        let body: Vec<Vec<String>> = self
            .page(data, page)
            .into_iter()
            .map(|row| self.columns.iter().map(|c| c.display(row)).collect())
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                body.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for cells in &body {
            push_line(&mut out, cells, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(line, "{cell}{}", " ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
