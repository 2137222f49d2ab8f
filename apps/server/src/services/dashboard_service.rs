//! Dashboard service.
//!
//! One snapshot of the floor for the manager screen. "Today" is the current
//! UTC calendar day.

use bistro_core::{DiningTable, Order, OrderStatus};
use bistro_db::Database;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::ApiResult;

const RECENT_ORDERS: i64 = 10;

/// Statuses counted as "pending" on the quick stats tile.
const PENDING_STATUSES: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::InPreparation];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaysSales {
    /// Final amount of today's READY and SERVED orders.
    pub total_revenue_cents: i64,
    /// Every order created today, whatever its status.
    pub total_orders: i64,
    pub average_order_value_cents: i64,
    /// Revenue growth against yesterday in percent, two decimals.
    pub compared_to_yesterday: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTable {
    #[serde(flatten)]
    pub table: DiningTable,
    pub current_order: Option<Order>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTables {
    pub count: usize,
    pub tables: Vec<ActiveTable>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub pending_orders: i64,
    pub low_stock_items: i64,
    pub todays_revenue_cents: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub todays_sales: TodaysSales,
    pub active_tables: ActiveTables,
    pub recent_orders: Vec<Order>,
    pub quick_stats: QuickStats,
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    db: Database,
}

impl DashboardService {
    pub fn new(db: Database) -> Self {
        DashboardService { db }
    }

    pub async fn snapshot(&self, now: DateTime<Utc>) -> ApiResult<Dashboard> {
        let repo = self.db.dashboard();

        let today_start = start_of_day(now);
        let today_end = today_start + Duration::days(1);
        let yesterday_start = today_start - Duration::days(1);

        let revenue = repo.revenue_between(today_start, today_end).await?;
        let yesterday_revenue = repo.revenue_between(yesterday_start, today_start).await?;
        let total_orders = repo.count_orders_between(today_start, today_end).await?;

        let tables: Vec<ActiveTable> = repo
            .active_tables()
            .await?
            .into_iter()
            .map(|(table, current_order)| ActiveTable {
                table,
                current_order,
            })
            .collect();

        Ok(Dashboard {
            todays_sales: TodaysSales {
                total_revenue_cents: revenue,
                total_orders,
                average_order_value_cents: average(revenue, total_orders),
                compared_to_yesterday: growth_percentage(revenue, yesterday_revenue),
            },
            active_tables: ActiveTables {
                count: tables.len(),
                tables,
            },
            recent_orders: repo.recent_orders(RECENT_ORDERS).await?,
            quick_stats: QuickStats {
                pending_orders: repo.count_by_statuses(&PENDING_STATUSES).await?,
                low_stock_items: repo.count_low_stock().await?,
                todays_revenue_cents: revenue,
            },
        })
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// Revenue per order, rounded half-up to the cent. Zero without orders.
fn average(revenue_cents: i64, orders: i64) -> i64 {
    if orders <= 0 {
        return 0;
    }
    (revenue_cents * 2 + orders) / (orders * 2)
}

/// Percentage change, two decimals. Zero when yesterday had no revenue.
fn growth_percentage(today_cents: i64, yesterday_cents: i64) -> f64 {
    if yesterday_cents <= 0 {
        return 0.0;
    }
    let growth = (today_cents - yesterday_cents) as f64 / yesterday_cents as f64 * 100.0;
    (growth * 100.0).round() / 100.0
}
