//! Line-oriented store input: an owner line followed by a sales line, repeated.
//!
//! Both lines are trimmed. Input ends cleanly at EOF or at a trailing empty
//! owner line; an owner with no sales line or an unparsable sales value is a
//! [`LoadError`] carrying the 1-based line number.

use crate::error::LoadError;
use crate::store::Store;
use crate::table::StoreTable;
use core::hash::BuildHasher;
use std::io::{BufRead, Lines};
use tracing::debug;

/// Iterator of parsed stores. Yields at most one error, then ends.
pub struct StoreLines<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> StoreLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }

    fn next_line(&mut self) -> Option<std::io::Result<String>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    fn read_store(&mut self) -> Option<Result<Store, LoadError>> {
        let owner = match self.next_line()? {
            Ok(l) => l.trim().to_string(),
            Err(e) => return Some(Err(e.into())),
        };
        let owner_line = self.line_no;
        let sales_line = match self.next_line() {
            Some(Ok(l)) => l,
            Some(Err(e)) => return Some(Err(e.into())),
            None if owner.is_empty() => return None,
            None => {
                return Some(Err(LoadError::MissingSales {
                    line: owner_line,
                    owner,
                }))
            }
        };
        let text = sales_line.trim();
        Some(
            text.parse::<f64>()
                .map(|sales| Store::new(owner, sales))
                .map_err(|source| LoadError::InvalidSales {
                    line: self.line_no,
                    text: text.to_string(),
                    source,
                }),
        )
    }
}

impl<R: BufRead> Iterator for StoreLines<R> {
    type Item = Result<Store, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.read_store();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

pub fn load_stores<R: BufRead>(reader: R) -> Result<Vec<Store>, LoadError> {
    StoreLines::new(reader).collect()
}

/// Insert every parsed store into `table`, returning how many were added.
///
/// Stops at the first malformed record; stores parsed before it stay in the
/// table.
pub fn populate_table<R, S>(reader: R, table: &mut StoreTable<S>) -> Result<usize, LoadError>
where
    R: BufRead,
    S: BuildHasher,
{
    let mut added = 0;
    for store in StoreLines::new(reader) {
        let store = store?;
        debug!(%store, "adding store");
        table.insert(&store);
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_trims() {
        let input = "Walmart\n1000.50\n  Target \n 850.25\n";
        let stores = load_stores(input.as_bytes()).unwrap();
        assert_eq!(
            stores,
            vec![Store::new("Walmart", 1000.5), Store::new("Target", 850.25)]
        );
    }

    #[test]
    fn trailing_empty_owner_ends_input() {
        let stores = load_stores("Aldi\n400\n\n".as_bytes()).unwrap();
        assert_eq!(stores, vec![Store::new("Aldi", 400.0)]);
        assert!(load_stores("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_sales_reports_owner_line() {
        match load_stores("Aldi\n400\nLidl".as_bytes()) {
            Err(LoadError::MissingSales { line, owner }) => {
                assert_eq!(line, 3);
                assert_eq!(owner, "Lidl");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_sales_reports_value_line() {
        match load_stores("Aldi\nlots\n".as_bytes()) {
            Err(LoadError::InvalidSales { line, text, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "lots");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Invariant: the iterator stops after the first error.
    #[test]
    fn iterator_fuses_after_error() {
        let mut it = StoreLines::new("a\nx\nb\n2\n".as_bytes());
        assert!(matches!(it.next(), Some(Err(LoadError::InvalidSales { .. }))));
        assert!(it.next().is_none());
    }

    /// Invariant: a partial load keeps what was parsed before the error.
    #[test]
    fn populate_stops_at_first_error() {
        let mut t = StoreTable::new();
        let res = populate_table("Aldi\n400\nLidl\nnope\nKroger\n1\n".as_bytes(), &mut t);
        assert!(matches!(res, Err(LoadError::InvalidSales { line: 4, .. })));
        assert_eq!(t.len(), 1);
        assert!(t.contains_key("Aldi"));

        let mut ok = StoreTable::new();
        assert_eq!(populate_table("a\n1\nb\n2\n".as_bytes(), &mut ok).unwrap(), 2);
        assert_eq!(ok.len(), 2);
    }
}
