use crate::patch::BANK_BYTES;

/// Sysex prefix announcing a full 32-patch bulk dump: sysex status,
/// vendor id, then the format/count bytes for "32 voices, packed".
pub const BULK_DUMP_HEADER: [u8; 6] = [0xf0, 0x43, 0x00, 0x09, 0x20, 0x00];

/// Total wire length of a bulk dump: 6-byte header plus the packed bank.
pub const BULK_DUMP_LEN: usize = BULK_DUMP_HEADER.len() + BANK_BYTES;

/// One classified performance message.
///
/// `BulkDump` borrows its payload straight out of the scan window so the
/// 4 KiB bank never gets copied before the bank swap itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage<'a> {
    /// Note-off status, or note-on with velocity zero (running keyboards
    /// commonly send the latter).
    NoteOff { note: u8 },
    NoteOn { note: u8, velocity: u8 },
    ProgramChange { program: u8 },
    BulkDump { payload: &'a [u8; BANK_BYTES] },
}

/// Outcome of classifying the front of the scan window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    /// A complete message and the number of bytes it occupied.
    Message {
        message: MidiMessage<'a>,
        consumed: usize,
    },
    /// A known shape whose tail has not arrived yet. Consume nothing and
    /// retry once more bytes are buffered.
    Incomplete,
    /// Status byte matches no known shape. The caller discards the whole
    /// remaining window (aggressive resync; see module tests).
    Unknown { status: u8 },
}

/// Classify the message at the front of `window`.
///
/// Recognized shapes, by status byte:
///
/// | status        | length | message                                |
/// |---------------|--------|----------------------------------------|
/// | `8x` / `9x`+0 | 3      | note off (velocity-0 note-on included) |
/// | `9x`          | 3      | note on                                |
/// | `Cx`          | 2      | program change                         |
/// | `F0 43 00 09 20 00` | 4102 | bulk dump (32 packed patches)    |
///
/// An empty window is `Incomplete`.
pub fn scan_message(window: &[u8]) -> Scan<'_> {
    let Some(&status) = window.first() else {
        return Scan::Incomplete;
    };
    match status & 0xf0 {
        0x80 | 0x90 => {
            if window.len() < 3 {
                return Scan::Incomplete;
            }
            let (note, velocity) = (window[1], window[2]);
            let message = if status & 0xf0 == 0x80 || velocity == 0 {
                MidiMessage::NoteOff { note }
            } else {
                MidiMessage::NoteOn { note, velocity }
            };
            Scan::Message {
                message,
                consumed: 3,
            }
        }
        0xc0 => {
            if window.len() < 2 {
                return Scan::Incomplete;
            }
            Scan::Message {
                message: MidiMessage::ProgramChange { program: window[1] },
                consumed: 2,
            }
        }
        0xf0 if status == 0xf0 => scan_bulk_dump(window),
        _ => Scan::Unknown { status },
    }
}

fn scan_bulk_dump(window: &[u8]) -> Scan<'_> {
    // Match as much of the header as has arrived. A mismatching byte is
    // desync; a matching prefix is an incomplete header worth waiting for.
    let seen = window.len().min(BULK_DUMP_HEADER.len());
    if window[..seen] != BULK_DUMP_HEADER[..seen] {
        return Scan::Unknown { status: window[0] };
    }
    if window.len() < BULK_DUMP_LEN {
        return Scan::Incomplete;
    }
    match <&[u8; BANK_BYTES]>::try_from(&window[BULK_DUMP_HEADER.len()..BULK_DUMP_LEN]) {
        Ok(payload) => Scan::Message {
            message: MidiMessage::BulkDump { payload },
            consumed: BULK_DUMP_LEN,
        },
        // Length was checked above; keep the parser panic-free regardless.
        Err(_) => Scan::Incomplete,
    }
}
