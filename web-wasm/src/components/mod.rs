//! UIコンポーネント

pub mod header;
pub mod intro;
pub mod dashboard;
pub mod search_filters;
pub mod status_banner;
pub mod clinic_list;
pub mod map_panel;
pub mod clinic_detail;
pub mod summary_footer;
