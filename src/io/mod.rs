// Purpose - external interfaces: byte transport seam, input staging,
// MIDI wire-format classification

pub mod buffer;
pub mod midi;
pub mod transport;

pub use buffer::InputBuffer;
pub use transport::ByteSource;
