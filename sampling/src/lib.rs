pub mod distributions;
pub mod source;

pub use distributions::Residues;
pub use source::Source;
