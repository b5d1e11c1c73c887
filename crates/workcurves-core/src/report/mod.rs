//! Reporting utilities that sit outside the aggregator.
//!
//! Surface export and color mapping for plotting, an ASCII chart for the
//! terminal, and an independent verification pass over emitted curves.

mod ascii;
mod surface;
mod verify;

pub use ascii::{render_ascii, shade_char};
pub use surface::{color_scale, surface, LevelAxis, Rgb, SurfacePoint};
pub use verify::{verify_curves, VerificationReport, DEFAULT_TOLERANCE};
