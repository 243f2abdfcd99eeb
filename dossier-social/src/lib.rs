//! Core extraction pipeline: session, assemblers, and field extractors.
//!
//! A run owns one authenticated [`session::Session`] wrapping the single
//! browser page. Assembler methods on the session sequence navigations and
//! hand each settled page source to the pure extractors in [`extract`],
//! which build the normalized records in [`records`]. Nothing in this crate
//! touches a live DOM: extraction always works on serialized snapshots.

pub mod dates;
pub mod extract;
pub mod group;
pub mod members;
pub mod profile;
pub mod records;
pub mod session;

pub use session::{NavigationPolicy, Session, SessionOptions};
