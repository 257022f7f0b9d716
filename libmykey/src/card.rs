use crate::blocks::BlockMap;
use crate::cipher::encode_decode;
use crate::reader::MyKeyDump;
use crate::transactions::{self, Transaction};

/// Block with the OTP counter area used in key derivation
const BLOCK_OTP: usize = 0x06;
/// Block with the card serial number
pub const BLOCK_SERIAL: usize = 0x07;
/// Block with the BCD-encoded production date
const BLOCK_PRODUCTION_DATE: usize = 0x08;
/// Block whose low 24 bits count charge operations
const BLOCK_OPERATIONS: usize = 0x12;
/// Vendor identity blocks, also matched against the reset sentinels
const BLOCK_VENDOR_HI: usize = 0x18;
const BLOCK_VENDOR_LO: usize = 0x19;
/// Block with the encrypted current credit
const BLOCK_CREDIT: usize = 0x21;

/// Values blocks 0x18/0x19 take on a card with no vendor bound
const RESET_VENDOR_HI: u32 = 0x8FCD_0F48;
const RESET_VENDOR_LO: u32 = 0xC082_0007;

/// Card serial number, raw block 0x07. The BCD date/serial semantics
/// inside it are opaque at this layer.
pub fn serial(blocks: &BlockMap) -> u32 {
    blocks.get(BLOCK_SERIAL)
}

/// Current stored credit in cents.
pub fn credit(blocks: &BlockMap, encryption_key: u32) -> u16 {
    (encode_decode(blocks.get(BLOCK_CREDIT) ^ encryption_key) & 0xFFFF) as u16
}

/// Charge operation counter, low 24 bits of block 0x12.
pub fn operation_count(blocks: &BlockMap) -> u32 {
    blocks.get(BLOCK_OPERATIONS) & 0x00FF_FFFF
}

/// True when the card carries the vendor-reset sentinels in blocks
/// 0x18/0x19. A missing block reads as 0 and never matches.
pub fn is_reset(blocks: &BlockMap) -> bool {
    blocks.get(BLOCK_VENDOR_HI) == RESET_VENDOR_HI
        && blocks.get(BLOCK_VENDOR_LO) == RESET_VENDOR_LO
}

/// Re-derive the credit encryption key from card contents.
///
/// OTP is the byte-reversed block 0x06, complemented plus one. The vendor
/// code comes from the decoded blocks 0x18/0x19. The key is the low word
/// of `uid * vendor * otp` with wrapping 64-bit multiplies, the same value
/// the vending machines compute.
pub fn derive_encryption_key(uid: u64, blocks: &BlockMap) -> u32 {
    let otp = (!blocks.get(BLOCK_OTP).swap_bytes()).wrapping_add(1);

    let vendor_hi = encode_decode(blocks.get(BLOCK_VENDOR_HI));
    let vendor_lo = encode_decode(blocks.get(BLOCK_VENDOR_LO));
    let vendor =
        ((u64::from(vendor_hi) << 16) | u64::from(vendor_lo & 0xFFFF)).wrapping_add(1);

    uid.wrapping_mul(vendor).wrapping_mul(u64::from(otp)) as u32
}

/// Calendar date stored on the card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// Decode the BCD production date in block 0x08.
///
/// Digit layout follows the firmware: day in the top two nibbles, month in
/// the next two, year digits spread over the low four (thousands in bits
/// 0..4, hundreds in 4..8, tens in 12..16, ones in 8..12). Returns `None`
/// for an absent block or a value that is not a calendar date, so the
/// report never shows garbage.
pub fn production_date(blocks: &BlockMap) -> Option<CardDate> {
    if !blocks.contains(BLOCK_PRODUCTION_DATE) {
        return None;
    }
    let raw = blocks.get(BLOCK_PRODUCTION_DATE);

    let day = ((raw >> 28 & 0x0F) * 10 + (raw >> 24 & 0x0F)) as u8;
    let month = ((raw >> 20 & 0x0F) * 10 + (raw >> 16 & 0x0F)) as u8;
    let year = ((raw & 0x0F) * 1000
        + (raw >> 4 & 0x0F) * 100
        + (raw >> 12 & 0x0F) * 10
        + (raw >> 8 & 0x0F)) as u16;

    if day == 0 || day > 31 || month == 0 || month > 12 {
        return None;
    }
    Some(CardDate { day, month, year })
}

/// Everything the decoder can recover from one dump. A read-only report,
/// built once per parsed file.
#[derive(Clone, Debug)]
pub struct CardSnapshot {
    pub uid: u64,
    /// Key recorded in the dump by the scanning tool
    pub encryption_key: u32,
    /// Key re-derived from the card contents, for cross-checking
    pub derived_key: u32,
    pub serial: u32,
    pub production_date: Option<CardDate>,
    pub credit_cents: u16,
    pub operation_count: u32,
    pub is_reset: bool,
    /// Newest first
    pub transactions: Vec<Transaction>,
}

impl CardSnapshot {
    /// Decode every field of a dump. Total over whatever blocks are
    /// present: missing blocks fall back to the documented defaults
    /// instead of failing the report.
    pub fn decode(dump: &MyKeyDump) -> Self {
        let blocks = &dump.blocks;
        Self {
            uid: dump.uid,
            encryption_key: dump.encryption_key,
            derived_key: derive_encryption_key(dump.uid, blocks),
            serial: serial(blocks),
            production_date: production_date(blocks),
            credit_cents: credit(blocks, dump.encryption_key),
            operation_count: operation_count(blocks),
            is_reset: is_reset(blocks),
            transactions: transactions::read_history(blocks),
        }
    }
}
