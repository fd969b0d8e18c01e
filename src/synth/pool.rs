use crate::synth::voice::VoiceEngine;

/// One slot of the pool: the note it was allocated for and the engine
/// sounding it. The engine is exclusively owned here; replacing it on a
/// steal drops the previous one.
struct VoiceSlot {
    note: u8,
    engine: Option<Box<dyn VoiceEngine>>,
}

/// Fixed-size pool of voice slots with round-robin allocation.
///
/// Allocation is O(1) and unconditional: the cursor's slot is always
/// reused, even if it is still sounding. That matches the original DX7
/// hardware and keeps note-on time bounded; a least-recently-released
/// policy would steal more musically but needs a search. Note-off scans
/// every slot because overlapping clients can legitimately put the same
/// note number in more than one slot, and all of them must release.
pub struct VoicePool {
    slots: Vec<VoiceSlot>,
    cursor: usize,
}

impl VoicePool {
    pub fn new(max_voices: usize) -> Self {
        assert!(max_voices > 0, "voice pool needs at least one slot");
        let slots = (0..max_voices)
            .map(|_| VoiceSlot {
                note: 0,
                engine: None,
            })
            .collect();
        Self { slots, cursor: 0 }
    }

    /// Install `engine` for `note` in the cursor's slot, dropping any
    /// engine that was still there, then advance the cursor.
    pub fn note_on(&mut self, note: u8, engine: Box<dyn VoiceEngine>) {
        let slot = &mut self.slots[self.cursor];
        slot.note = note;
        slot.engine = Some(engine);
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Signal key-up to every live voice holding `note`. Slots are not
    /// freed - the engines ring out and the slots stay occupied until
    /// stolen.
    pub fn note_off(&mut self, note: u8) {
        for slot in &mut self.slots {
            if slot.note == note {
                if let Some(engine) = slot.engine.as_mut() {
                    engine.release();
                }
            }
        }
    }

    /// Sum every live voice's next block into `accumulator`.
    pub fn render_block(&mut self, accumulator: &mut [i32]) {
        for slot in &mut self.slots {
            if let Some(engine) = slot.engine.as_mut() {
                engine.render_block(accumulator);
            }
        }
    }

    /// Number of slots currently holding an engine.
    pub fn active_voices(&self) -> usize {
        self.slots.iter().filter(|s| s.engine.is_some()).count()
    }

    /// Slot index the next note-on will (re)use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
