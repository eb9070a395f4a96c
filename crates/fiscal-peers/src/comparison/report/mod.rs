mod panels;
mod summary;
pub mod views;

pub use panels::build_panel;
pub use summary::{build_profile, build_report};
pub use views::{
    ComparisonReport, EntityProfileView, NoticeKind, PanelNotice, PanelView, ScatterView,
};
