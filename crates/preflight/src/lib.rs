//! `preflight` - Drone operations checklist generator
//!
//! This library loads a directory of JSON checklist documents, filters their
//! procedures by three facets (operation type, drone platform, drone count),
//! and renders the result as two paginated PDFs: a compact summary checklist
//! and a detailed procedure manual.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod archive;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod error;
pub mod facet;
pub mod generator;
pub mod interactive;
pub mod logging;
pub mod render;

pub use checklist::Checklist;
pub use config::Config;
pub use error::{Error, Result};
pub use facet::{FacetCatalog, Selection};
pub use generator::Generator;
pub use logging::init_logging;
