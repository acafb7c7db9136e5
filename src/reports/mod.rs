//! Reports module for fintrack
//!
//! Terminal-ready views over the aggregation service: the dashboard,
//! budget overview, category breakdowns and the monthly trend.

pub mod budget_overview;
pub mod dashboard;
pub mod spending;
pub mod trend;

pub use budget_overview::BudgetOverviewReport;
pub use dashboard::DashboardReport;
pub use spending::{CategoryReport, CategoryShare};
pub use trend::{TotalsReport, TrendReport};
