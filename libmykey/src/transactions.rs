use crate::blocks::BlockMap;
use crate::card::BLOCK_SERIAL;
use crate::{EMPTY_BLOCK, TRANSACTION_SLOTS};

/// First block of the 8-slot transaction ring
const BLOCK_RING_BASE: usize = 0x34;
/// Masked pointer to the ring's logical start
const BLOCK_RING_POINTER: usize = 0x3C;

/// One recharge recorded in the card's ring buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub credit_cents: u16,
}

impl Transaction {
    /// Unpack a raw ring slot. No cipher involved: day in the top 5 bits,
    /// month in the next 4, a 7-bit year offset from 2000, credit in the
    /// low 16.
    fn from_raw(block: u32) -> Self {
        Self {
            day: (block >> 27) as u8,
            month: (block >> 23 & 0x0F) as u8,
            year: 2000 + (block >> 16 & 0x7F) as u16,
            credit_cents: (block & 0xFFFF) as u16,
        }
    }
}

/// Decode the ring pointer into the slot the scan starts from.
///
/// Two unrelated bit groups OR-combined, reverse-engineered from the card
/// firmware. Do not simplify the formula.
pub(crate) fn starting_offset(pointer: u32) -> u32 {
    (pointer & 0x3000_0000) >> 28 | (pointer & 0x0010_0000) >> 18
}

/// Reconstruct the transaction history, newest first.
///
/// The pointer block 0x3C is masked with the serial block; 0xFFFFFFFF
/// means the ring was never written. Slots are scanned oldest-first from
/// the starting offset until the first empty slot. Malformed data
/// degrades to an empty or truncated history, never an error.
pub fn read_history(blocks: &BlockMap) -> Vec<Transaction> {
    let pointer = blocks.get_or(BLOCK_RING_POINTER, EMPTY_BLOCK);
    if pointer == EMPTY_BLOCK {
        return Vec::new();
    }

    let offset = starting_offset(pointer ^ blocks.get(BLOCK_SERIAL)) as usize;
    if offset >= TRANSACTION_SLOTS {
        // Unrecognized pointer encoding.
        return Vec::new();
    }

    let mut history = Vec::with_capacity(TRANSACTION_SLOTS);
    for i in 0..TRANSACTION_SLOTS {
        let slot = BLOCK_RING_BASE + (offset + i) % TRANSACTION_SLOTS;
        let raw = blocks.get_or(slot, EMPTY_BLOCK);
        if raw == EMPTY_BLOCK {
            break;
        }
        history.push(Transaction::from_raw(raw));
    }

    // Slots were visited oldest first.
    history.reverse();
    history
}
