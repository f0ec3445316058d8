//! Data-side building blocks: value coercion, series normalization, display
//! formatting and the statistics record itself. Nothing here touches the UI.

pub mod coerce;
pub mod format;
pub mod record;
pub mod series;
