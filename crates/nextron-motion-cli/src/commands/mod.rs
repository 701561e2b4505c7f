pub mod catalog;
pub mod simulate;
pub mod timeline;
pub mod validate;
