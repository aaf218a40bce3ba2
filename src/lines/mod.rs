//! Line-number provenance for assembled programs.
//!
//! Every line of a fragment is tagged with a trailing `//#N` comment before it is
//! reordered into a program. The markers ride along with their chunks, so once the
//! program is assembled the tracker can map each physical line back to the
//! fragment line it came from, then strip the markers before compilation.

mod markers;
mod remap;

pub use markers::{embed_line_numbers, extract_line_numbers, marker_line, strip_markers, LineMap};
pub use remap::remap_diagnostic;
