mod measurement;
mod throughputs;
mod trial;

// Re-exports.
pub use measurement::{load_from_reader, load_throughputs, Measurement};
pub use throughputs::Throughputs;
pub use trial::Trial;
