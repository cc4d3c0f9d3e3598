#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation layer for the housing map dashboard.
//!
//! Each renderer is a pure function of a [`FilteredView`]: the summary
//! line, the scatter map, the value histogram, the raw table and the debug
//! panel. Renderers that cannot draw an empty view return a [`Panel`]
//! carrying a warning or notice instead. [`render_cycle`] runs the whole
//! pipeline for one set of sidebar selections and assembles a [`Page`],
//! which [`html`] and [`text`] turn into a browser page or terminal output.
//!
//! [`FilteredView`]: housing_map_filter::FilteredView

pub mod controls;
pub mod debug;
pub mod histogram;
pub mod html;
pub mod map;
pub mod page;
pub mod panel;
pub mod summary;
pub mod table;
pub mod text;

pub use controls::{Sidebar, resolve_criteria};
pub use page::{Page, render_cycle};
pub use panel::Panel;
