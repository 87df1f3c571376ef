//! rivera - draw git history as a river of lanes
//!
//! The [`graph`] engine is independent of git: it consumes anything that
//! implements [`graph::GraphCommit`] and emits one text line at a time.
//! The [`git`], [`reporters`] and [`config`] modules wire it to a real
//! repository and a terminal.

pub mod cli;
pub mod config;
pub mod git;
pub mod graph;
pub mod reporters;
