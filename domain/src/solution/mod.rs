//! Solution catalog domain.
//!
//! - [`entities::Solution`]: a recommendable follow-up offer
//! - [`entities::Cta`]: call to action attached to a solution

pub mod entities;
