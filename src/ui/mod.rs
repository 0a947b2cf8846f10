pub mod dashboard;
pub mod doc;
pub mod footer;
pub mod health_view;
pub mod help;
pub mod iostat_view;
pub mod lists;
pub mod mapping;
pub mod popup;
pub mod search;
pub mod theme;
pub mod volume_view;
