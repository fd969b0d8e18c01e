// Purpose - patch storage: opaque 128-byte voice parameter blocks and
// the 32-slot bank the dispatcher selects from

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size of one packed voice parameter block.
pub const PATCH_BYTES: usize = 128;
/// Offset of the patch name field inside the block.
pub const NAME_OFFSET: usize = 118;
/// Length of the patch name field.
pub const NAME_LEN: usize = 10;
/// Number of patches in a bank.
pub const BANK_PATCHES: usize = 32;
/// Size of a packed bank, as carried by a bulk dump.
pub const BANK_BYTES: usize = PATCH_BYTES * BANK_PATCHES;

/// The "E.PIANO 1" factory voice: six 17-byte operator rows, 16 global
/// parameter bytes, then the 10-byte name. Seeded into every bank slot
/// at startup so the unit makes a sound before any dump arrives.
#[rustfmt::skip]
const EPIANO_BYTES: [u8; PATCH_BYTES] = [
    95, 29, 20, 50, 99, 95, 0, 0, 41, 0, 19, 0, 115, 24, 79, 2, 0,
    95, 20, 20, 50, 99, 95, 0, 0, 0, 0, 0, 0, 3, 0, 99, 2, 0,
    95, 29, 20, 50, 99, 95, 0, 0, 0, 0, 0, 0, 59, 24, 89, 2, 0,
    95, 20, 20, 50, 99, 95, 0, 0, 0, 0, 0, 0, 59, 8, 99, 2, 0,
    95, 50, 35, 78, 99, 75, 0, 0, 0, 0, 0, 0, 59, 28, 58, 28, 0,
    96, 25, 25, 67, 99, 75, 0, 0, 0, 0, 0, 0, 83, 8, 99, 2, 0,

    94, 67, 95, 60, 50, 50, 50, 50, 4, 6, 34, 33, 0, 0, 56, 24,
    69, 46, 80, 73, 65, 78, 79, 32, 49, 32,
];

/// One instrument voice as an opaque parameter block.
///
/// The unit never interprets the contents beyond the name field; the
/// voice engine is handed the raw bytes at note-on.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    data: [u8; PATCH_BYTES],
}

impl Patch {
    pub fn from_bytes(data: [u8; PATCH_BYTES]) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8; PATCH_BYTES] {
        &self.data
    }

    /// The human-readable name, lossily decoded with trailing padding
    /// trimmed.
    pub fn name(&self) -> String {
        let raw = &self.data[NAME_OFFSET..NAME_OFFSET + NAME_LEN];
        raw.iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self { data: EPIANO_BYTES }
    }
}

impl std::fmt::Debug for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patch").field("name", &self.name()).finish()
    }
}

// Serde sees a patch as a plain byte sequence; deriving would expose the
// array field and fixed-size deserialization stops at 32 elements anyway.
#[cfg(feature = "serde")]
impl Serialize for Patch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.data)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Patch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        let data: [u8; PATCH_BYTES] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| serde::de::Error::invalid_length(v.len(), &"128 bytes"))?;
        Ok(Self { data })
    }
}

/// The 32-patch bank plus the currently selected program.
///
/// Program changes move the selection; a bulk dump replaces every patch
/// in one step. Neither touches voices that are already sounding - they
/// keep the patch bytes they were built from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct PatchBank {
    patches: [Patch; BANK_PATCHES],
    current: usize,
}

impl PatchBank {
    pub fn new() -> Self {
        Self {
            patches: [Patch::default(); BANK_PATCHES],
            current: 0,
        }
    }

    /// Select program `program`, clamping out-of-range values to the
    /// last slot. Returns the newly selected patch.
    pub fn program_change(&mut self, program: u8) -> &Patch {
        self.current = (program as usize).min(BANK_PATCHES - 1);
        &self.patches[self.current]
    }

    /// Replace the whole bank from a packed 4 KiB payload. All 32
    /// patches change in one step; the selection index is untouched.
    pub fn load_bulk(&mut self, payload: &[u8; BANK_BYTES]) {
        for (patch, chunk) in self.patches.iter_mut().zip(payload.chunks_exact(PATCH_BYTES)) {
            patch.data.copy_from_slice(chunk);
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_patch(&self) -> &Patch {
        &self.patches[self.current]
    }

    pub fn patch(&self, index: usize) -> Option<&Patch> {
        self.patches.get(index)
    }
}

impl Default for PatchBank {
    fn default() -> Self {
        Self::new()
    }
}
