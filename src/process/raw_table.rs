use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    collections::{HashMap, HashSet},
    io::Read,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTable {
    /// Column names as the provider file claims them, in file order.
    pub headers: Vec<String>,
    /// Each data row, one cell per header. Short rows read as empty cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse a headed CSV stream. Header names are trimmed; cells are kept raw.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .context("reading CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (`row`, `col`), empty when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Append `other` below `self`, matching cells by header name.
    /// Headers only `other` has are added; earlier rows read them as empty.
    pub fn append(&mut self, other: RawTable) {
        if self.headers.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        let mut positions: HashMap<String, usize> = HashMap::new();
        for (i, h) in self.headers.iter().enumerate() {
            positions.entry(h.clone()).or_insert(i);
        }
        // `None` marks a repeated header in `other`; only its first column is kept.
        let mut targets: Vec<Option<usize>> = Vec::with_capacity(other.headers.len());
        let mut seen = HashSet::new();
        for h in &other.headers {
            if !seen.insert(h.as_str()) {
                targets.push(None);
                continue;
            }
            let next = self.headers.len();
            let target = *positions.entry(h.clone()).or_insert_with(|| {
                self.headers.push(h.clone());
                next
            });
            targets.push(Some(target));
        }

        let width = self.headers.len();
        for row in other.rows {
            let mut out = vec![String::new(); width];
            for (cell, target) in row.into_iter().zip(&targets) {
                if let Some(t) = *target {
                    out[t] = cell;
                }
            }
            self.rows.push(out);
        }
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain_rows<F: FnMut(&[String]) -> bool>(&mut self, mut keep: F) {
        self.rows.retain(|r| keep(r));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_headed_csv() -> Result<()> {
        let content = "season, week ,team\n2023,1,KC\n2023,2,\"BUF\"\n";
        let table = RawTable::from_csv_reader(Cursor::new(content))?;

        assert_eq!(table.headers, vec!["season", "week", "team"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 2), "BUF");
        assert_eq!(table.cell(5, 0), "");
        Ok(())
    }

    #[test]
    fn short_rows_read_as_empty() -> Result<()> {
        let table = RawTable::from_csv_reader(Cursor::new("a,b,c\n1,2\n"))?;
        assert_eq!(table.cell(0, 1), "2");
        assert_eq!(table.cell(0, 2), "");
        Ok(())
    }

    #[test]
    fn append_unions_headers() {
        let mut a = RawTable::new(
            vec!["season".into(), "team".into()],
            vec![vec!["2022".into(), "KC".into()]],
        );
        let b = RawTable::new(
            vec!["team".into(), "season".into(), "sacks".into()],
            vec![vec!["BUF".into(), "2023".into(), "4".into()]],
        );
        a.append(b);

        assert_eq!(a.headers, vec!["season", "team", "sacks"]);
        assert_eq!(a.rows[1], vec!["2023", "BUF", "4"]);
        assert_eq!(a.cell(0, 2), "");
    }

    #[test]
    fn append_keeps_first_of_duplicate_headers() {
        let mut a = RawTable::new(vec!["season".into()], vec![vec!["2022".into()]]);
        let b = RawTable::new(
            vec!["season".into(), "team".into(), "team".into(), "season".into()],
            vec![vec!["2023".into(), "".into(), "BUF".into(), "1999".into()]],
        );
        a.append(b);

        assert_eq!(a.headers, vec!["season", "team"]);
        assert_eq!(a.rows[1], vec!["2023", ""]);
        assert_eq!(a.cell(0, 1), "");
    }

    #[test]
    fn append_into_empty_takes_other() {
        let mut a = RawTable::default();
        let b = RawTable::new(vec!["x".into()], vec![vec!["1".into()]]);
        a.append(b.clone());
        assert_eq!(a, b);
    }
}
