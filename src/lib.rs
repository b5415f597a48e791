//! Kurir - Deterministic Binary Message Codec
//!
//! Codec length-prefixed untuk record pesan lima field: transform murni
//! antara [`Msg`] dan byte buffer, tanpa I/O, tanpa shared state.
//!
//! # Usage
//! ```
//! use kurir::Msg;
//!
//! let msg = Msg::new(
//!     "msg456",
//!     "sender123",
//!     vec!["recipient1".to_string(), "recipient2".to_string()],
//!     "greeting",
//!     "Hello, world!",
//! );
//!
//! // Serialize
//! let bytes = msg.encode()?;
//!
//! // Deserialize
//! let decoded = Msg::decode(&bytes)?;
//! assert_eq!(msg, decoded);
//! # Ok::<(), kurir::CodecError>(())
//! ```

mod protocol;

pub use protocol::{CodecError, Decoder, Encoder, Msg, MAX_FIELD_LEN, PREFIX_SIZE};
