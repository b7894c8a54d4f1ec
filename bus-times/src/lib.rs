//! Bus arrival times with favourite stops.
//!
//! A single-page transit app: search for a stop, see the next buses at it,
//! and keep a list of favourite stops in per-origin storage.

pub mod app;
pub mod board;
pub mod config;
pub mod domain;
pub mod favourites;
pub mod gtfs;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod web;
