//! Core types shared across rowbind facilities
//!
//! - **Schema constants**: canonical field keys and event names used by the
//!   logging facility and error reporting

pub mod schema;
