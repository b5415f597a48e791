//! Msg Record Format (Length-Prefixed)
//!
//! Layout satu record (semua prefix u32 little-endian):
//! ┌──────────┬──────────┬───────────────┬───────────────┬─────────────┐
//! │ len(id)  │ id bytes │ len(fromId).. │ len(type)..   │ len(body).. │
//! ├──────────┴──────────┴───────────────┴───────────────┴─────────────┤
//! │ count(toIds) │ len(toIds[0]) │ toIds[0] bytes │ len(toIds[1]) │ … │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! String ditulis sebagai raw bytes tanpa escaping atau terminator,
//! karena itu setiap field dan setiap recipient butuh length prefix
//! eksplisit. Tidak ada magic number, version byte, atau checksum.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};

use super::encoder::{write_msg, CodecError, Decoder};

/// Ukuran setiap length/count prefix dalam bytes (u32 little-endian)
pub const PREFIX_SIZE: usize = 4;

/// Panjang field maksimum yang bisa direpresentasikan prefix u32
pub const MAX_FIELD_LEN: usize = u32::MAX as usize;

/// Record pesan dengan lima field.
///
/// Encode/decode selalu menghasilkan value yang field-wise identik
/// (round-trip fidelity), termasuk untuk field kosong dan `to_ids` kosong.
/// Urutan `to_ids` dipertahankan persis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Msg {
    /// Identifier pesan, opaque
    pub id: String,
    /// Identifier pengirim
    pub from_id: String,
    /// Daftar recipient, urutan signifikan, boleh kosong
    pub to_ids: Vec<String>,
    /// Tag tipe pesan milik aplikasi
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Isi pesan
    pub body: String,
}

impl Msg {
    /// Membuat pesan baru dengan semua field terisi
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_ids: Vec<String>,
        msg_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_ids,
            msg_type: msg_type.into(),
            body: body.into(),
        }
    }

    /// Membuat pesan dengan id `msg_<unix-seconds>` yang di-generate.
    ///
    /// Returns pesan beserta timestamp yang dipakai.
    pub fn with_timestamp(
        body: impl Into<String>,
        from_id: impl Into<String>,
        to_ids: Vec<String>,
        msg_type: impl Into<String>,
    ) -> (Self, i64) {
        let timestamp = unix_seconds();
        let msg = Self {
            id: format!("msg_{}", timestamp),
            from_id: from_id.into(),
            to_ids,
            msg_type: msg_type.into(),
            body: body.into(),
        };
        (msg, timestamp)
    }

    /// Cek semua field scalar terisi dan minimal ada satu recipient
    pub fn validate(&self) -> bool {
        !self.id.is_empty()
            && !self.from_id.is_empty()
            && !self.msg_type.is_empty()
            && !self.body.is_empty()
            && !self.to_ids.is_empty()
    }

    /// Ukuran hasil encode dalam bytes, tanpa melakukan encode.
    ///
    /// 4 scalar prefix + count prefix + satu prefix per recipient,
    /// ditambah raw bytes semua string.
    pub fn encoded_len(&self) -> usize {
        let scalars =
            self.id.len() + self.from_id.len() + self.msg_type.len() + self.body.len();
        let recipients: usize = self.to_ids.iter().map(|s| PREFIX_SIZE + s.len()).sum();
        5 * PREFIX_SIZE + scalars + recipients
    }

    /// Encode pesan ke byte buffer baru.
    ///
    /// Deterministik: pesan yang sama selalu menghasilkan bytes identik.
    /// Fails dengan [`CodecError::EncodingOverflow`] jika ada field
    /// melebihi kapasitas prefix u32.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        write_msg(self, &mut buf)?;
        Ok(buf.to_vec())
    }

    /// Encode append ke buffer milik caller.
    ///
    /// `dst` tidak tersentuh jika encode gagal.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<(), CodecError> {
        write_msg(self, dst)
    }

    /// Decode satu pesan dari `src` (strict mode).
    ///
    /// Seluruh buffer harus habis terpakai; sisa byte setelah field
    /// terakhir adalah [`CodecError::TrailingData`]. Untuk stream berisi
    /// beberapa record back-to-back, pakai [`Decoder`] langsung.
    pub fn decode(src: &[u8]) -> Result<Self, CodecError> {
        let mut decoder = Decoder::new(src);
        let msg = decoder.decode()?;
        if !decoder.is_empty() {
            return Err(CodecError::TrailingData {
                trailing: decoder.remaining(),
            });
        }
        Ok(msg)
    }

    /// Konversi ke JSON string (field names camelCase: `fromId`, `toIds`, `type`)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Membuat pesan dari JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Unix timestamp saat ini dalam detik
#[inline]
fn unix_seconds() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
