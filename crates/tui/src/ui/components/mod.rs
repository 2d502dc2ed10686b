pub mod menu;
pub mod modal;
