use crate::{
    io::{
        midi::{scan_message, MidiMessage, Scan},
        transport::ByteSource,
        InputBuffer,
    },
    patch::PatchBank,
    synth::{
        pool::VoicePool,
        voice::VoiceFactory,
    },
    INPUT_BUFFER_CAPACITY, MAX_ACTIVE_VOICES, RENDER_BLOCK_SIZE,
};

/*
The control/render cycle
========================

One `render` call is one cycle of the realtime unit, driven by the host
audio callback:

  1. refill   - pull whatever bytes the transport has ready into the
                staging buffer (bounded, non-blocking)
  2. drain    - scan complete messages off the front and dispatch them
                into the patch bank and voice pool; a trailing partial
                message stays buffered for the next cycle
  3. render   - for each block of up to RENDER_BLOCK_SIZE samples, sum
                every live voice into a 32-bit accumulator, then scale
                and hard-clip down to 16-bit mono

Nothing here blocks and no step does work proportional to anything but
bytes buffered plus samples requested, so the call always returns in
time for the deadline. The only "suspension" in the protocol is the
partial message left in the staging buffer.
*/

/// Accumulator pre-shift before the clip test.
const HEADROOM_SHIFT: u32 = 4;
/// Final shift from the clipped accumulator down to 16-bit.
const OUTPUT_SHIFT: u32 = 9;
/// Accumulator values at or beyond this magnitude (after the headroom
/// shift) saturate instead of shifting through.
const CLIP_THRESHOLD: i32 = 1 << 24;

/// The control/dispatch core: staging buffer, patch bank, and voice
/// pool, driven by one realtime thread.
///
/// `S` is the byte transport feeding performance messages in; with the
/// `rtrb` feature that is typically the consumer half of an SPSC ring
/// buffer whose producer lives on a MIDI input thread.
pub struct SynthUnit<S: ByteSource> {
    source: S,
    input: InputBuffer,
    bank: PatchBank,
    pool: VoicePool,
    factory: Box<dyn VoiceFactory>,
}

impl<S: ByteSource> SynthUnit<S> {
    pub fn new(source: S, factory: Box<dyn VoiceFactory>) -> Self {
        Self {
            source,
            input: InputBuffer::new(INPUT_BUFFER_CAPACITY),
            bank: PatchBank::new(),
            pool: VoicePool::new(MAX_ACTIVE_VOICES),
            factory,
        }
    }

    /// Produce exactly `out.len()` mono samples, applying any complete
    /// messages that have arrived since the last call first.
    pub fn render(&mut self, out: &mut [i16]) {
        self.input.refill(&mut self.source);
        self.drain_messages();

        let mut accumulator = [0i32; RENDER_BLOCK_SIZE];
        for frame in out.chunks_mut(RENDER_BLOCK_SIZE) {
            let block = &mut accumulator[..frame.len()];
            block.fill(0);
            self.pool.render_block(block);
            for (sample, &sum) in frame.iter_mut().zip(block.iter()) {
                *sample = scale_sample(sum);
            }
        }
    }

    /// Dispatch complete messages from the front of the staging buffer,
    /// then drop exactly the bytes they occupied.
    fn drain_messages(&mut self) {
        let Self {
            input,
            bank,
            pool,
            factory,
            ..
        } = self;

        let mut offset = 0;
        loop {
            let window = &input.bytes()[offset..];
            if window.is_empty() {
                break;
            }
            match scan_message(window) {
                Scan::Incomplete => break,
                Scan::Unknown { status } => {
                    // Aggressive resync: the whole remaining window goes,
                    // valid messages behind the bad byte included.
                    log::warn!(
                        "unknown midi status {status:#04x}, discarding {} buffered bytes",
                        window.len()
                    );
                    offset += window.len();
                    break;
                }
                Scan::Message { message, consumed } => {
                    dispatch(bank, pool, factory.as_ref(), message);
                    offset += consumed;
                }
            }
        }
        input.consume(offset);
    }

    /// Mutable access to the transport, for drivers that own the unit
    /// and feed it directly (offline rendering, tests).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn patch_bank(&self) -> &PatchBank {
        &self.bank
    }

    pub fn voices(&self) -> &VoicePool {
        &self.pool
    }

    /// Bytes currently staged and waiting for a complete message.
    pub fn pending_bytes(&self) -> usize {
        self.input.len()
    }
}

fn dispatch(
    bank: &mut PatchBank,
    pool: &mut VoicePool,
    factory: &dyn VoiceFactory,
    message: MidiMessage<'_>,
) {
    match message {
        MidiMessage::NoteOff { note } => pool.note_off(note),
        MidiMessage::NoteOn { note, velocity } => {
            let engine = factory.create_voice(bank.current_patch(), note, velocity);
            pool.note_on(note, engine);
        }
        MidiMessage::ProgramChange { program } => {
            bank.program_change(program);
            log::info!(
                "loaded patch {}: {}",
                bank.current_index(),
                bank.current_patch().name()
            );
        }
        MidiMessage::BulkDump { payload } => {
            bank.load_bulk(payload);
            log::info!("bulk dump applied, bank replaced");
        }
    }
}

/// Scale one accumulator sample down to 16 bits with hard clipping.
///
/// The accumulator is shifted right by 4 for headroom, tested against
/// the 25-bit clip window, then shifted a further 9 bits; out-of-window
/// values saturate at the i16 extremes rather than wrapping.
fn scale_sample(sum: i32) -> i16 {
    let val = sum >> HEADROOM_SHIFT;
    if val < -CLIP_THRESHOLD {
        i16::MIN
    } else if val >= CLIP_THRESHOLD {
        i16::MAX
    } else {
        (val >> OUTPUT_SHIFT) as i16
    }
}
