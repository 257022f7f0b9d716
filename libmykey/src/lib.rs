/// Magic prefix on the first line of a MyKey dump file
pub const FILE_MAGIC: &str = "COGES_MYKEY_V1";
/// Number of 32-bit EEPROM blocks on an SRIX4K tag
pub const SRIX4K_BLOCKS: usize = 128;
/// Raw value of a never-written EEPROM block
pub const EMPTY_BLOCK: u32 = 0xFFFF_FFFF;
/// Number of slots in the transaction ring buffer
pub const TRANSACTION_SLOTS: usize = 8;

pub mod blocks;
pub mod card;
pub mod cipher;
pub mod error;
pub mod reader;
pub mod transactions;

pub use blocks::BlockMap;
pub use card::{CardDate, CardSnapshot};
pub use cipher::encode_decode;
pub use error::ReaderError;
pub use reader::{load, parse, MyKeyDump};
pub use transactions::Transaction;
