/// Encode or decode a MyKey block (XOR bit manipulation).
///
/// Three XOR-fold passes over fixed 2-bit groups, reverse-engineered from
/// the card firmware. Each pass reads and writes disjoint bit positions,
/// so the transform is its own inverse. The mask/shift table must stay
/// exactly as it is: compatibility with real card dumps depends on it.
pub fn encode_decode(mut block: u32) -> u32 {
    block ^= (block & 0x00C0_0000) << 6
        | (block & 0x0000_C000) << 12
        | (block & 0x0000_00C0) << 18
        | (block & 0x000C_0000) >> 6
        | (block & 0x0003_0000) >> 12
        | (block & 0x0000_0300) >> 6;
    block ^= (block & 0x3000_0000) >> 6
        | (block & 0x0C00_0000) >> 12
        | (block & 0x0300_0000) >> 18
        | (block & 0x0000_3000) << 6
        | (block & 0x0000_0030) << 12
        | (block & 0x0000_000C) << 6;
    block ^= (block & 0x00C0_0000) << 6
        | (block & 0x0000_C000) << 12
        | (block & 0x0000_00C0) << 18
        | (block & 0x000C_0000) >> 6
        | (block & 0x0003_0000) >> 12
        | (block & 0x0000_0300) >> 6;
    block
}
