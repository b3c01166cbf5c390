//! Document rendering.
//!
//! The canvas trait and its PDF backend, the static font metrics used for
//! text measurement, and the page geometry / pagination estimator.

pub mod canvas;
pub mod layout;
pub mod metrics;
pub mod pdf;

pub use canvas::Canvas;
pub use pdf::PdfCanvas;
