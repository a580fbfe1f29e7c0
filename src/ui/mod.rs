pub mod elements;
pub mod popup;
pub mod sidebar;
pub mod style;
pub mod widget;
