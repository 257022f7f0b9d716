use crate::SRIX4K_BLOCKS;

/// Sparse image of the card's EEPROM: up to 128 blocks, any subset loaded.
///
/// Partial dumps are normal in practice (aborted scans, stale caches), so
/// lookups never fail: a block that was never loaded reads as 0, or as an
/// explicit default where the caller needs one. Immutable once the loader
/// hands it to the decoding functions.
#[derive(Clone, Debug)]
pub struct BlockMap {
    values: [u32; SRIX4K_BLOCKS],
    present: [bool; SRIX4K_BLOCKS],
}

impl BlockMap {
    pub fn new() -> Self {
        Self {
            values: [0; SRIX4K_BLOCKS],
            present: [false; SRIX4K_BLOCKS],
        }
    }

    /// Set a block value. Out-of-range indices are ignored; a duplicate
    /// index overwrites (last wins).
    pub fn insert(&mut self, index: usize, value: u32) {
        if index < SRIX4K_BLOCKS {
            self.values[index] = value;
            self.present[index] = true;
        }
    }

    /// Block value, or 0 when the block was never loaded.
    pub fn get(&self, index: usize) -> u32 {
        self.get_or(index, 0)
    }

    /// Block value, or `default` when the block was never loaded.
    pub fn get_or(&self, index: usize, default: u32) -> u32 {
        if self.contains(index) {
            self.values[index]
        } else {
            default
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < SRIX4K_BLOCKS && self.present[index]
    }

    /// Number of blocks actually loaded.
    pub fn loaded(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }
}

impl Default for BlockMap {
    fn default() -> Self {
        Self::new()
    }
}
