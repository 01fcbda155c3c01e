pub mod catalog;
pub mod creation;
pub mod dropdown;
pub mod filter;
pub mod keys;
pub mod selection;
pub mod widget;
