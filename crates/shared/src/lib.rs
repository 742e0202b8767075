//! Domain types shared by the tracker controller and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod workout;
