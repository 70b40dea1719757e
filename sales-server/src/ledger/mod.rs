//! Sales Ledger - authoritative set of sales records
//!
//! Owns every [`SalesRecord`] in memory and writes the whole set through to
//! its [`RecordStore`] after each successful mutation.
//!
//! # Invariants
//!
//! - At most one record per `(tenantId, period)`.
//! - `tenantId` and `period` never change after insertion; only `amount` does.
//! - Validation runs before any mutation, so a failed call leaves the set untouched.
//! - A failed write-through does not roll back memory; it is reported through
//!   [`Committed::persist_error`].
//!
//! The ledger itself is synchronous. The server keeps it behind a
//! `tokio::sync::RwLock` so check-then-insert runs inside one write lock.

pub mod aggregate;
pub mod error;


pub use error::{LedgerError, LedgerResult};

use std::sync::Arc;

use shared::models::{AmountInput, Period, SalesRecord, TenantSummary};
use shared::util::snowflake_id;

use crate::store::{Committed, RecordStore, write_through};

pub struct SalesLedger {
    records: Vec<SalesRecord>,
    store: Arc<dyn RecordStore<SalesRecord>>,
}

impl std::fmt::Debug for SalesLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesLedger")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl SalesLedger {
    /// Load the record set from the store (called once at startup)
    pub fn open(store: Arc<dyn RecordStore<SalesRecord>>) -> LedgerResult<Self> {
        let records = store.load().map_err(LedgerError::Load)?;
        tracing::info!(count = records.len(), "Sales ledger loaded");
        Ok(Self { records, store })
    }

    // ========== Mutations ==========

    /// Insert a record for `(tenant_id, period)`
    ///
    /// Fails with `DuplicatePeriod` when the tenant already has a record for
    /// the period, or `InvalidAmount` when the amount does not validate.
    pub fn insert(
        &mut self,
        tenant_id: &str,
        user_id: &str,
        period: Period,
        amount: impl Into<AmountInput>,
    ) -> LedgerResult<Committed<SalesRecord>> {
        let amount = amount.into().parse()?;

        if self.find_by_period(tenant_id, period).is_some() {
            return Err(LedgerError::DuplicatePeriod {
                tenant_id: tenant_id.to_string(),
                period,
            });
        }

        let record = SalesRecord {
            id: self.next_id(),
            tenant_id: tenant_id.to_string(),
            user_id: user_id.to_string(),
            period,
            amount,
        };
        self.records.push(record.clone());

        tracing::info!(
            id = %record.id,
            tenant_id = %record.tenant_id,
            period = %record.period,
            amount = record.amount,
            "Sales record inserted"
        );
        Ok(self.commit(record))
    }

    /// Replace the amount of an existing record
    pub fn update(
        &mut self,
        record_id: &str,
        amount: impl Into<AmountInput>,
    ) -> LedgerResult<Committed<SalesRecord>> {
        let amount = amount.into().parse()?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| LedgerError::NotFound(record_id.to_string()))?;
        let previous = record.amount;
        record.amount = amount;
        let updated = record.clone();

        tracing::info!(
            id = %updated.id,
            tenant_id = %updated.tenant_id,
            period = %updated.period,
            previous,
            amount,
            "Sales record updated"
        );
        Ok(self.commit(updated))
    }

    /// Remove a record permanently, returning it
    pub fn delete(&mut self, record_id: &str) -> LedgerResult<Committed<SalesRecord>> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| LedgerError::NotFound(record_id.to_string()))?;
        let removed = self.records.remove(index);

        tracing::info!(
            id = %removed.id,
            tenant_id = %removed.tenant_id,
            period = %removed.period,
            "Sales record deleted"
        );
        Ok(self.commit(removed))
    }

    /// Load demo records into an empty ledger; ignored when records exist
    pub fn seed(&mut self, records: Vec<SalesRecord>) -> Committed<usize> {
        if !self.records.is_empty() {
            return Committed::new(0, Ok(()));
        }
        let count = records.len();
        self.records = records;
        tracing::info!(count, "Seeded demo sales records");
        self.commit(count)
    }

    // ========== Queries ==========

    /// All records in insertion order
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, record_id: &str) -> Option<&SalesRecord> {
        self.records.iter().find(|r| r.id == record_id)
    }

    /// Records of one tenant, newest period first
    pub fn records_for_tenant(&self, tenant_id: &str) -> Vec<SalesRecord> {
        let mut records: Vec<SalesRecord> = self
            .records
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.period.cmp(&a.period));
        records
    }

    pub fn current_period_total(&self, tenant_id: &str, period: Period) -> u64 {
        aggregate::saturating_sum(
            self.records
                .iter()
                .filter(|r| r.tenant_id == tenant_id && r.period == period)
                .map(|r| r.amount),
        )
    }

    /// Total of the month before `period`
    pub fn previous_period_total(&self, tenant_id: &str, period: Period) -> u64 {
        self.current_period_total(tenant_id, period.previous())
    }

    pub fn percentage_change(&self, tenant_id: &str, reference: Period, previous: Period) -> f64 {
        aggregate::percentage_change(
            self.current_period_total(tenant_id, reference),
            self.current_period_total(tenant_id, previous),
        )
    }

    /// Per-period totals of the listed tenants, ascending by period
    pub fn monthly_breakdown<S: AsRef<str>>(
        &self,
        tenant_ids: &[S],
    ) -> Vec<shared::models::MonthlyTotals> {
        aggregate::monthly_breakdown(&self.records, tenant_ids)
    }

    /// Overview row for one tenant at `reference` against the month before
    pub fn tenant_summary(&self, tenant_id: &str, reference: Period) -> TenantSummary {
        let previous = reference.previous();
        let current_total = self.current_period_total(tenant_id, reference);
        let previous_total = self.current_period_total(tenant_id, previous);
        TenantSummary {
            tenant_id: tenant_id.to_string(),
            tenant_name: None,
            current_total,
            previous_total,
            percentage_change: aggregate::percentage_change(current_total, previous_total),
            current_record: self.find_by_period(tenant_id, reference).cloned(),
        }
    }

    // ========== Internals ==========

    fn find_by_period(&self, tenant_id: &str, period: Period) -> Option<&SalesRecord> {
        self.records
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.period == period)
    }

    fn next_id(&self) -> String {
        loop {
            let id = snowflake_id().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        Committed::new(value, write_through(self.store.as_ref(), &self.records))
    }
}
