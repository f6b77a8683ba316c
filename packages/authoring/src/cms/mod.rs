//! CMS implementations.

pub mod wordpress;

pub use wordpress::WordPressCms;
