pub mod io; // Byte transport, input staging, wire-format parsing
pub mod patch; // Patch data and bank management
pub mod synth; // Voice pool, message dispatch, render loop

/// Samples rendered per inner block. Voices contribute audio in
/// chunks of this size; a request that is not a multiple of it is
/// finished with one shorter block.
pub const RENDER_BLOCK_SIZE: usize = 64;

/// Maximum number of simultaneously sounding voices.
pub const MAX_ACTIVE_VOICES: usize = 16;

/// Capacity of the input staging buffer. Must exceed the largest
/// single message (a 4102-byte bulk dump) or that message could
/// never complete.
pub const INPUT_BUFFER_CAPACITY: usize = 8192;
