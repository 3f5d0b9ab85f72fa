//! # Sales Aggregation
//!
//! Read-only money figures for the admin screen.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current_session = Σ total of OCCUPIED + WAITING_PAYMENT tables        │
//! │                    (FREE is always 0; RESERVED is excluded even when   │
//! │                     it carries a pre-order)                            │
//! │                                                                         │
//! │  estimated_daily = current_session + historical_baseline               │
//! │                    (baseline comes from outside the engine)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Table;

/// Admin sales figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub current_session: Money,
    pub historical_baseline: Money,
    pub estimated_daily: Money,
    /// Number of tables whose totals make up `current_session`.
    pub contributing_tables: usize,
}

/// Sum of table totals that count toward the running session.
pub fn session_sales<'a, I>(tables: I) -> Money
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .filter(|table| table.status().counts_toward_sales())
        .map(Table::total)
        .sum()
}

/// Session sales combined with an externally supplied historical baseline.
pub fn sales_summary<'a, I>(tables: I, historical_baseline: Money) -> SalesSummary
where
    I: IntoIterator<Item = &'a Table>,
{
    let (current_session, contributing_tables) = tables
        .into_iter()
        .filter(|table| table.status().counts_toward_sales())
        .fold((Money::zero(), 0), |(sum, count), table| {
            (sum + table.total(), count + 1)
        });

    SalesSummary {
        current_session,
        historical_baseline,
        estimated_daily: current_session + historical_baseline,
        contributing_tables,
    }
}
