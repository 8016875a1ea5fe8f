//! Scoring and matching core for the collaboration platform.
//!
//! Two engines live here: [`compatibility`] quantifies how well two members fit as
//! collaborators, and [`badges`] evaluates cumulative activity against the achievement
//! catalog and grants new badges at most once per member.

pub mod badges;
pub mod compatibility;
pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;

pub use domain::UserId;
