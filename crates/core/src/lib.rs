//! tablekit_core - record model and store contracts for tablekit.
//!
//! Everything in this crate is pure: no I/O, no clients. Backends live in the
//! `tablekit` crate and implement [`store::RecordStore`].

pub mod record;
pub mod store;
