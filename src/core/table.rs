//! Sortable, filterable table model used by every listing page.
//!
//! Rows expose their cells through [`TableRow`]; the page supplies the column
//! set, a global filter string and a [`SortState`] decoded from the query
//! string (`sort=Ticker,-Name`).

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => n.is_nan(),
        }
    }

    fn search_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.to_lowercase()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Empty => None,
        }
    }
}

pub trait TableRow {
    fn cell(&self, column: &str) -> CellValue;
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub filterable: bool,
}

impl Column {
    pub const fn data(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: true,
            filterable: true,
        }
    }

    /// Rendered column that takes no part in sorting or filtering.
    pub const fn display(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: false,
            filterable: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Decodes `Ticker,-Name`. Unknown or unsortable columns and repeats are dropped.
    pub fn parse(raw: Option<&str>, columns: &[Column]) -> Self {
        let mut keys: Vec<SortKey> = Vec::new();

        for part in raw.unwrap_or_default().split(',') {
            let part = part.trim();
            let (name, direction) = match part.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (part, SortDirection::Asc),
            };
            let known = columns.iter().any(|c| c.sortable && c.key == name);
            if known && !keys.iter().any(|k| k.column == name) {
                keys.push(SortKey {
                    column: name.to_string(),
                    direction,
                });
            }
        }

        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn to_query(&self) -> String {
        self.keys
            .iter()
            .map(|k| match k.direction {
                SortDirection::Asc => k.column.clone(),
                SortDirection::Desc => format!("-{}", k.column),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    /// Header click: sort by this column alone, ascending unless it already was.
    pub fn toggled(&self, column: &str) -> Self {
        let direction = match self.direction_of(column) {
            Some(SortDirection::Asc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self {
            keys: vec![SortKey {
                column: column.to_string(),
                direction,
            }],
        }
    }

    /// Multi-sort: flip the column in place if present, otherwise append it.
    pub fn then_by(&self, column: &str) -> Self {
        let mut keys = self.keys.clone();
        match keys.iter_mut().find(|k| k.column == column) {
            Some(key) => {
                key.direction = match key.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                }
            }
            None => keys.push(SortKey {
                column: column.to_string(),
                direction: SortDirection::Asc,
            }),
        }
        Self { keys }
    }
}

/// Filters then sorts `rows`; the result borrows from the input.
pub fn apply<'a, R: TableRow>(
    rows: &'a [R],
    columns: &[Column],
    filter: &str,
    sort: &SortState,
) -> Vec<&'a R> {
    let needle = filter.trim().to_lowercase();
    let mut visible: Vec<&R> = rows
        .iter()
        .filter(|row| needle.is_empty() || matches_filter(*row, columns, &needle))
        .collect();

    if !sort.is_empty() {
        // sort_by is stable, so equal rows keep their upstream order
        visible.sort_by(|a, b| compare_rows(*a, *b, sort));
    }
    visible
}

fn matches_filter<R: TableRow>(row: &R, columns: &[Column], needle: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.filterable)
        .filter_map(|c| row.cell(c.key).search_text())
        .any(|text| text.contains(needle))
}

fn compare_rows<R: TableRow>(a: &R, b: &R, sort: &SortState) -> Ordering {
    for key in sort.keys() {
        let left = a.cell(&key.column);
        let right = b.cell(&key.column);

        let ordering = match (left.is_empty(), right.is_empty()) {
            (true, true) => Ordering::Equal,
            // empty cells stay at the bottom in both directions
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => compare_cells(&left, &right),
        };
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_cells(left: &CellValue, right: &CellValue) -> Ordering {
    match (left, right) {
        (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (CellValue::Text(a), CellValue::Text(b)) => compare_alphanumeric(a, b),
        (CellValue::Number(a), CellValue::Text(b)) => compare_alphanumeric(&a.to_string(), b),
        (CellValue::Text(a), CellValue::Number(b)) => compare_alphanumeric(a, &b.to_string()),
        _ => Ordering::Equal,
    }
}

/// Case-insensitive comparison where digit runs compare by numeric value,
/// so `Tier2` sorts before `Tier10`.
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digit_runs(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

#[derive(Debug)]
enum Chunk {
    Digits(String),
    Text(String),
}

fn chunks(s: &str) -> Vec<Chunk> {
    let mut out: Vec<Chunk> = Vec::new();
    for ch in s.chars() {
        let is_digit = ch.is_ascii_digit();
        let continues_run = matches!(
            (out.last(), is_digit),
            (Some(Chunk::Digits(_)), true) | (Some(Chunk::Text(_)), false)
        );

        if !continues_run {
            out.push(if is_digit {
                Chunk::Digits(String::new())
            } else {
                Chunk::Text(String::new())
            });
        }
        match out.last_mut() {
            Some(Chunk::Digits(run)) => run.push(ch),
            Some(Chunk::Text(run)) => run.extend(ch.to_lowercase()),
            None => {}
        }
    }
    out
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
