//! Append-only effective-dated record store.
//!
//! Salary profiles, component assignments, and recurring adjustments all
//! follow the same lifecycle: a changed state is represented by closing
//! the old record (end-dating it) and inserting a new one, never by
//! overwriting. `Timeline` implements that supersession pattern once,
//! with a materialized "current" pointer.

use chrono::NaiveDate;

/// A record that carries effective-dating fields.
pub trait Effective {
    /// The date this record takes effect.
    fn effective_date(&self) -> NaiveDate;
    /// The date this record stops applying, if closed.
    fn end_date(&self) -> Option<NaiveDate>;
    /// Closes or reopens the record.
    fn set_end_date(&mut self, end: Option<NaiveDate>);
    /// The raw active flag.
    fn is_active(&self) -> bool;
    /// Sets the raw active flag.
    fn set_active(&mut self, active: bool);
}

/// Returns true if a record is effective as of `today`.
///
/// "Effective" for totals and queries means active AND not yet past its
/// end date — distinct from the raw `is_active` flag, which a superseded
/// record loses immediately.
pub fn is_effective_on<T: Effective>(record: &T, today: NaiveDate) -> bool {
    record.is_active() && record.end_date().is_none_or(|end| end >= today)
}

/// An append-only timeline of effective-dated records.
///
/// Invariant: at most one record is active with no end date (the
/// "current" record) at any time. `supersede` and `close_current` are
/// the only mutations that touch the flags, so the invariant holds by
/// construction.
#[derive(Debug, Clone)]
pub struct Timeline<T: Effective> {
    records: Vec<T>,
    current: Option<usize>,
}

impl<T: Effective> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Effective> Timeline<T> {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            current: None,
        }
    }

    /// The current record: active with no end date, if any.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current.map(|i| &self.records[i])
    }

    /// Mutable access to the current record, for in-place cosmetic edits
    /// that do not constitute supersession.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.current.map(|i| &mut self.records[i])
    }

    /// Appends `record` as the new current record, closing any prior one.
    ///
    /// The prior record's end date is stamped to the new record's
    /// effective date and its active flag is cleared, preserving history
    /// for audit and back-pay reconstruction.
    pub fn supersede(&mut self, record: T) {
        let effective = record.effective_date();
        if let Some(prev) = self.current_mut() {
            prev.set_end_date(Some(effective));
            prev.set_active(false);
        }
        self.records.push(record);
        self.current = Some(self.records.len() - 1);
    }

    /// Soft-closes the current record with `end_date = today`.
    ///
    /// Returns true if there was a current record to close.
    pub fn close_current(&mut self, today: NaiveDate) -> bool {
        match self.current_mut() {
            Some(rec) => {
                rec.set_end_date(Some(today));
                rec.set_active(false);
                self.current = None;
                true
            }
            None => false,
        }
    }

    /// All records, insertion-ordered (oldest first).
    #[must_use]
    pub fn history(&self) -> &[T] {
        &self.records
    }

    /// Records effective as of `today` (see [`is_effective_on`]).
    pub fn effective_on(&self, today: NaiveDate) -> impl Iterator<Item = &T> {
        self.records.iter().filter(move |r| is_effective_on(*r, today))
    }

    /// Number of records ever inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks the timeline invariant: at most one open active record.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.records
            .iter()
            .filter(|r| r.is_active() && r.end_date().is_none())
            .count()
            <= 1
    }
}
