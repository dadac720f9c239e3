//! Journal Core - Trading Journal Entry Engine
//!
//! The product logic behind a trading journal's trade-entry form: numeric
//! validation, identifier sanitization, derived metrics (duration and
//! estimated P&L), strategy association, and a submission pipeline that
//! persists the trade through an external store and then broadcasts the
//! creation to every other open view of the application.
//!
//! Persistence, authentication, and strategy storage are external
//! collaborators consumed through the traits in [`providers`].

pub mod error;
pub mod form;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod providers;
pub mod storage;
pub mod strategies;
