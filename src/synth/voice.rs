use crate::patch::Patch;

/// One sounding note's synthesis engine.
///
/// The engine is constructed at note-on from a patch block and lives in
/// exactly one voice slot until that slot is stolen or the unit is torn
/// down. The oscillator/envelope mathematics behind `render_block` is
/// entirely the implementor's business; the pool only needs mixing and
/// release semantics.
pub trait VoiceEngine: Send {
    /// Key-up: begin the release phase. The engine decides for itself
    /// when it has faded to silence; the slot keeps holding it either way.
    fn release(&mut self);

    /// Add (not overwrite) this voice's next `accumulator.len()` samples
    /// into the mix. Accumulator samples are wide on purpose - several
    /// voices sum here before the output stage scales and clips.
    fn render_block(&mut self, accumulator: &mut [i32]);
}

/// Builds a voice engine from the raw ingredients of a note-on.
///
/// This is the instrument-design seam: the unit stays generic over what
/// actually makes sound, and a pooled/preallocated engine supply can be
/// dropped in without touching dispatch.
pub trait VoiceFactory: Send {
    fn create_voice(&self, patch: &Patch, note: u8, velocity: u8) -> Box<dyn VoiceEngine>;
}

impl<F> VoiceFactory for F
where
    F: Fn(&Patch, u8, u8) -> Box<dyn VoiceEngine> + Send,
{
    fn create_voice(&self, patch: &Patch, note: u8, velocity: u8) -> Box<dyn VoiceEngine> {
        self(patch, note, velocity)
    }
}

/// Engine that contributes nothing. Placeholder for wiring up the unit
/// before a real engine exists, and handy in tests.
#[derive(Debug, Default)]
pub struct SilentVoice;

impl VoiceEngine for SilentVoice {
    fn release(&mut self) {}

    fn render_block(&mut self, _accumulator: &mut [i32]) {}
}
