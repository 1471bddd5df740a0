//! Small pure helpers shared by the model and serialization layers.

pub mod date;
