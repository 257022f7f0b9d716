use std::fs;
use std::path::Path;

use log::warn;

use crate::blocks::BlockMap;
use crate::error::ReaderError;
use crate::{FILE_MAGIC, SRIX4K_BLOCKS};

/// Parsed contents of a MyKey dump file.
#[derive(Clone, Debug)]
pub struct MyKeyDump {
    /// Tag UID as stored in the dump
    pub uid: u64,
    /// Credit encryption key recorded by the scanning tool
    pub encryption_key: u32,
    /// EEPROM blocks found in the dump
    pub blocks: BlockMap,
}

/// Read and parse a MyKey dump file.
pub fn load(path: impl AsRef<Path>) -> Result<MyKeyDump, ReaderError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parse the text of a MyKey dump file.
///
/// Only the header, UID and encryption key lines are mandatory. Block
/// lines may arrive in any order, a duplicate index overwrites, and an
/// incomplete block set is reported with a warning but never fails the
/// parse: the decoders tolerate missing blocks.
pub fn parse(text: &str) -> Result<MyKeyDump, ReaderError> {
    let mut lines = text.lines();

    match lines.next() {
        Some(line) if line.starts_with(FILE_MAGIC) => {}
        _ => return Err(ReaderError::MissingHeader),
    }

    let uid = field_value(lines.next(), "UID:")
        .and_then(parse_hex64)
        .ok_or(ReaderError::MissingUid)?;

    let encryption_key = field_value(lines.next(), "ENCRYPTION_KEY:")
        .and_then(parse_hex32)
        .ok_or(ReaderError::MissingKey)?;

    let mut blocks = BlockMap::new();
    for line in lines {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("BLOCK_") else {
            continue;
        };
        let Some((index_text, value_text)) = rest.split_once(':') else {
            warn!("skipping malformed block line: {line:?}");
            continue;
        };

        let index = match index_text.trim().parse::<usize>() {
            Ok(index) if index < SRIX4K_BLOCKS => index,
            _ => {
                warn!("skipping block line with bad index: {line:?}");
                continue;
            }
        };
        let Some(value) = parse_hex32(value_text) else {
            warn!("skipping block line with bad value: {line:?}");
            continue;
        };

        blocks.insert(index, value);
    }

    if blocks.loaded() < SRIX4K_BLOCKS {
        warn!(
            "expected {SRIX4K_BLOCKS} blocks, found {}; decoding a partial dump",
            blocks.loaded()
        );
    }

    Ok(MyKeyDump {
        uid,
        encryption_key,
        blocks,
    })
}

fn field_value<'a>(line: Option<&'a str>, prefix: &str) -> Option<&'a str> {
    line?.trim().strip_prefix(prefix)
}

fn parse_hex32(text: &str) -> Option<u32> {
    u32::from_str_radix(strip_hex_prefix(text), 16).ok()
}

fn parse_hex64(text: &str) -> Option<u64> {
    u64::from_str_radix(strip_hex_prefix(text), 16).ok()
}

fn strip_hex_prefix(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}
