//! Driver layer for browser automation.
//!
//! This crate exposes the page capability trait the assemblers drive and
//! its WebDriver implementation.
//!
//! - [`traits::PageDriver`]: the abstract page capability
//! - [`browser::session::BrowserSession`]: fantoccini-backed implementation
//! - [`browser::typing::InputCadence`]: human-like input timings
//! - [`browser::launch`]: Chrome capability construction

pub mod browser;
pub mod traits;

pub use traits::PageDriver;
