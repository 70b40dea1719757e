//! Derived views over sales records

use shared::models::{MonthlyTotals, Period, SalesRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Month-over-month change in percent
///
/// A previous total of zero yields `100.0` whatever the current total is,
/// including zero. This conflates "no data" with "+100%" and is kept for
/// compatibility with existing reports.
pub fn percentage_change(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 100.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Sum that clamps at `u64::MAX` instead of overflowing
pub fn saturating_sum(amounts: impl IntoIterator<Item = u64>) -> u64 {
    amounts.into_iter().fold(0, u64::saturating_add)
}

/// Group records by period, summing per listed tenant and overall
///
/// Only records of `tenant_ids` are counted. Every listed tenant appears in
/// every returned period, zero when it has no record there. Periods come
/// out in ascending order.
pub fn monthly_breakdown<'a, I, S>(records: I, tenant_ids: &[S]) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    S: AsRef<str>,
{
    let wanted: BTreeSet<&str> = tenant_ids.iter().map(AsRef::as_ref).collect();
    let mut by_period: BTreeMap<Period, BTreeMap<String, u64>> = BTreeMap::new();

    for record in records {
        if !wanted.contains(record.tenant_id.as_str()) {
            continue;
        }
        let totals = by_period.entry(record.period).or_insert_with(|| {
            wanted.iter().map(|id| (id.to_string(), 0)).collect()
        });
        let total = totals.entry(record.tenant_id.clone()).or_insert(0);
        *total = total.saturating_add(record.amount);
    }

    by_period
        .into_iter()
        .map(|(period, per_tenant_total)| MonthlyTotals {
            period,
            grand_total: saturating_sum(per_tenant_total.values().copied()),
            per_tenant_total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tenant: &str, period: &str, amount: u64) -> SalesRecord {
        SalesRecord {
            id: format!("{tenant}-{period}"),
            tenant_id: tenant.to_string(),
            user_id: String::new(),
            period: period.parse().unwrap(),
            amount,
        }
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(150000, 140000), (10000.0 / 140000.0) * 100.0);
        assert_eq!(percentage_change(50, 100), -50.0);
        assert_eq!(percentage_change(100, 100), 0.0);
    }

    #[test]
    fn test_percentage_change_zero_previous_is_hundred() {
        assert_eq!(percentage_change(200000, 0), 100.0);
        assert_eq!(percentage_change(0, 0), 100.0);
    }

    #[test]
    fn test_monthly_breakdown_sorted_and_summed() {
        let records = vec![
            record("1", "2024-03", 150000),
            record("2", "2024-03", 200000),
            record("1", "2023-12", 90000),
            record("1", "2024-02", 140000),
        ];
        let rows = monthly_breakdown(&records, &["1", "2"]);

        let periods: Vec<String> = rows.iter().map(|r| r.period.to_string()).collect();
        assert_eq!(periods, vec!["2023-12", "2024-02", "2024-03"]);

        let march = &rows[2];
        assert_eq!(march.per_tenant_total["1"], 150000);
        assert_eq!(march.per_tenant_total["2"], 200000);
        assert_eq!(march.grand_total, 350000);

        let february = &rows[1];
        assert_eq!(february.per_tenant_total["2"], 0);
        assert_eq!(february.grand_total, 140000);
    }

    #[test]
    fn test_monthly_breakdown_ignores_unlisted_tenants() {
        let records = vec![record("1", "2024-03", 10), record("9", "2024-04", 99)];
        let rows = monthly_breakdown(&records, &["1"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].grand_total, 10);
        assert!(!rows[0].per_tenant_total.contains_key("9"));
    }

    #[test]
    fn test_grand_total_saturates_instead_of_overflowing() {
        let records = vec![record("1", "2024-03", u64::MAX), record("2", "2024-03", 1)];
        let rows = monthly_breakdown(&records, &["1", "2"]);
        assert_eq!(rows[0].grand_total, u64::MAX);
        assert_eq!(saturating_sum([3, 4]), 7);
    }
}
