// Purpose - voice management and the control/render cycle
// This layer sits between the byte transport and the per-voice engines

pub mod pool;
pub mod unit;
pub mod voice;

pub use pool::VoicePool;
pub use unit::SynthUnit;
pub use voice::{VoiceEngine, VoiceFactory};
