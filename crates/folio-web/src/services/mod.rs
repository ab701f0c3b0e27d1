//! 조회/차트 생성 서비스.

pub mod dashboard;

pub use dashboard::{export_dashboard, load_dashboard, render_dashboard, DashboardData};
