//! Pipeline orchestration
//!
//! This module provides the public API for trialtab: raw NDJSON experiment
//! logs in, the three concatenated trial tables out.

use crate::error::TabulateError;
use crate::schema::{RecordAdapter, SubjectRecord};
use crate::tables::TrialTables;
use crate::timeline::parse_subject;

/// Tabulate already-parsed subject records.
///
/// Subjects are processed in input order and their row-sets appended onto the
/// growing tables; each row's `uid` is the subject's 0-based position.
pub fn tabulate(records: &[SubjectRecord]) -> TrialTables {
    let mut tables = TrialTables::default();
    for (idx, record) in records.iter().enumerate() {
        tables.extend(parse_subject(record, idx as i32));
    }
    tables
}

/// Parse an NDJSON experiment log (one subject per line) and tabulate it.
///
/// Any line that is not valid JSON aborts the whole run; there is no
/// per-subject recovery.
pub fn tabulate_ndjson(ndjson: &str) -> Result<TrialTables, TabulateError> {
    let records = RecordAdapter::parse_ndjson(ndjson)?;
    Ok(tabulate(&records))
}
