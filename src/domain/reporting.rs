//! Read-side aggregates over bookings.
//!
//! Repositories hand back thin [`BookingStatRow`] projections; everything
//! here is plain folding so the numbers can be checked without a database.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use super::booking::{BookingStatus, BookingView, ServiceKind};
use super::celebrity::Celebrity;

/// Columns of a booking that the reports need
#[derive(Debug, Clone, PartialEq)]
pub struct BookingStatRow {
    pub status: BookingStatus,
    pub service: ServiceKind,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Summary shown above the admin booking list
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[schema(value_type = f64)]
    pub avg_amount: Decimal,
    pub pending: u64,
    pub approved: u64,
    pub completed: u64,
    pub rejected: u64,
}

impl ListingStats {
    pub fn from_rows(rows: &[BookingStatRow]) -> Self {
        let mut stats = rows.iter().fold(Self::default(), |mut acc, row| {
            acc.total_amount += row.amount;
            match row.status {
                BookingStatus::Pending => acc.pending += 1,
                BookingStatus::Approved => acc.approved += 1,
                BookingStatus::Completed => acc.completed += 1,
                BookingStatus::Rejected => acc.rejected += 1,
            }
            acc
        });
        if !rows.is_empty() {
            stats.avg_amount = round_money(stats.total_amount / Decimal::from(rows.len()));
        }
        stats
    }
}

/// Count and revenue for one group
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Bucket {
    pub count: u64,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
}

impl Bucket {
    fn add(&mut self, amount: Decimal) {
        self.count += 1;
        self.revenue += amount;
    }
}

/// Bookings created on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyBucket {
    #[schema(value_type = String, example = "2025-01-31")]
    pub date: NaiveDate,
    pub count: u64,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
}

/// Booking statistics over an optional scheduled-date range
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatsReport {
    pub total_bookings: u64,
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub by_status: BTreeMap<String, Bucket>,
    pub by_service: BTreeMap<String, Bucket>,
    /// Last 30 days by creation date, oldest first
    pub daily: Vec<DailyBucket>,
}

impl BookingStatsReport {
    /// `in_range` drives the totals and groupings, `recent` the daily series.
    pub fn build(in_range: &[BookingStatRow], recent: &[BookingStatRow]) -> Self {
        let mut by_status = BTreeMap::new();
        let mut by_service = BTreeMap::new();
        let mut total_revenue = Decimal::ZERO;

        for row in in_range {
            total_revenue += row.amount;
            by_status
                .entry(row.status.to_string())
                .or_insert_with(Bucket::default)
                .add(row.amount);
            by_service
                .entry(row.service.to_string())
                .or_insert_with(Bucket::default)
                .add(row.amount);
        }

        let mut days: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
        for row in recent {
            days.entry(row.created_at.date_naive())
                .or_default()
                .add(row.amount);
        }

        Self {
            total_bookings: in_range.len() as u64,
            total_revenue,
            by_status,
            by_service,
            daily: days
                .into_iter()
                .map(|(date, bucket)| DailyBucket {
                    date,
                    count: bucket.count,
                    revenue: bucket.revenue,
                })
                .collect(),
        }
    }
}

/// Per-status totals on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub count: u64,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
}

/// Fold rows into per-status totals. Every status is present, even at zero.
pub fn status_totals(rows: &[BookingStatRow]) -> BTreeMap<String, StatusTotals> {
    let mut totals: BTreeMap<String, StatusTotals> = BookingStatus::ALL
        .iter()
        .map(|status| (status.to_string(), StatusTotals::default()))
        .collect();

    for row in rows {
        let entry = totals.entry(row.status.to_string()).or_default();
        entry.count += 1;
        entry.total_amount += row.amount;
    }
    totals
}

/// Admin dashboard payload
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_celebrities: u64,
    pub total_bookings: u64,
    pub recent_bookings: Vec<BookingView>,
    pub recent_celebrities: Vec<Celebrity>,
    pub bookings_by_status: BTreeMap<String, StatusTotals>,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
