//! Fixed-capacity record tables
//!
//! A table holds up to [`RECORD_COUNT`] text records, populated once at
//! startup and read-only afterwards. Records keep their embedded line
//! endings; they go out over the wire verbatim.

/// Records a table holds at most. The journal ships exactly this many.
pub const RECORD_COUNT: usize = 10;

/// Largest record payload in bytes. The first firmware revision reserved
/// 100-byte slots including a trailing NUL, so the text itself tops out at 99.
pub const MAX_RECORD_LEN: usize = 99;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TableError {
    #[error("record {index} is {len} bytes, limit is {MAX_RECORD_LEN}")]
    RecordTooLong { index: usize, len: usize },
    #[error("table holds at most {RECORD_COUNT} records, got {0}")]
    TooManyRecords(usize),
}

/// Ordered, fixed-size sequence of text records, indexed by the transfer
/// cursor.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: Vec<Vec<u8>>,
}

impl RecordTable {
    /// Table with no records. Paging it terminates immediately.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, enforcing the record count and size limits.
    pub fn new<I>(records: I) -> Result<Self, TableError>
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        let mut out = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let record = record.into();
            if record.len() > MAX_RECORD_LEN {
                return Err(TableError::RecordTooLong {
                    index,
                    len: record.len(),
                });
            }
            out.push(record);
        }
        if out.len() > RECORD_COUNT {
            return Err(TableError::TooManyRecords(out.len()));
        }
        Ok(Self { records: out })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, or `None` past the end of the table. Running off
    /// the end signals exhaustion, not an error.
    pub fn record(&self, index: usize) -> Option<&[u8]> {
        self.records.get(index).map(Vec::as_slice)
    }
}

/// The compiled-in journal shipped with this version: ten CRLF-terminated
/// placeholder entries. Dynamic record storage comes later.
pub fn default_journal() -> RecordTable {
    RecordTable::new((1..=RECORD_COUNT).map(|n| format!("journal string {n}\r\n")))
        .expect("default journal fits the table limits")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_journal_matches_firmware_table() {
        let journal = default_journal();
        assert_eq!(journal.len(), RECORD_COUNT);
        assert_eq!(journal.record(0), Some(&b"journal string 1\r\n"[..]));
        assert_eq!(journal.record(9), Some(&b"journal string 10\r\n"[..]));
        assert_eq!(journal.record(10), None);
    }

    #[test]
    fn rejects_oversized_record() {
        let err = RecordTable::new([vec![b'x'; MAX_RECORD_LEN + 1]]).unwrap_err();
        assert_eq!(
            err,
            TableError::RecordTooLong {
                index: 0,
                len: MAX_RECORD_LEN + 1
            }
        );
    }

    #[test]
    fn accepts_record_at_the_limit() {
        let table = RecordTable::new([vec![b'x'; MAX_RECORD_LEN]]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_too_many_records() {
        let records = (0..RECORD_COUNT + 1).map(|n| format!("entry {n}"));
        assert_eq!(
            RecordTable::new(records).unwrap_err(),
            TableError::TooManyRecords(RECORD_COUNT + 1)
        );
    }

    #[test]
    fn empty_table_has_no_records() {
        let table = RecordTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.record(0), None);
    }
}
