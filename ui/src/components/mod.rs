//! Reusable pieces shared by the screens.

mod app_header;
mod chart_card;

pub use app_header::AppHeader;
pub use chart_card::ChartCard;
