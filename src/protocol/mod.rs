//! Protocol Layer: Length-Prefixed Binary Encoding
//!
//! Prinsip desain:
//! - Length-Prefixed: Setiap string dan list punya prefix u32 eksplisit,
//!   tidak ada delimiter yang bisa bentrok dengan isi field
//! - Deterministic: Pesan yang sama selalu menghasilkan bytes identik
//! - Defensive decode: Bounds dicek sebelum setiap read, tidak pernah
//!   ada record parsial yang keluar

mod encoder;
mod message;

pub use encoder::{CodecError, Decoder, Encoder};
pub use message::{Msg, MAX_FIELD_LEN, PREFIX_SIZE};
