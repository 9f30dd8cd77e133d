//! UI components for Worldbook

pub mod data_view;
pub mod editor;
pub mod forms;
pub mod sidebar;
