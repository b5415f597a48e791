//! Encoder/Decoder Length-Prefixed
//!
//! Encoder append ke buffer internal yang bisa di-reuse lewat `reset`.
//! Decoder berupa cursor walk sekuensial dengan validasi bounds sebelum
//! setiap read; cursor hanya maju kalau satu record utuh berhasil dibaca.

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

use super::message::{Msg, MAX_FIELD_LEN, PREFIX_SIZE};

/// Error codec. Semua failure bersifat lokal, synchronous, dan recoverable;
/// retry tanpa mengubah input akan menghasilkan failure yang sama.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Field terlalu besar untuk prefix u32
    #[error("field `{field}` length {len} exceeds the u32 prefix")]
    EncodingOverflow { field: &'static str, len: usize },

    /// Buffer habis sebelum prefix berikutnya bisa dibaca utuh
    #[error("input truncated at offset {offset}: {remaining} bytes left, {needed} needed")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Prefix mendeklarasikan panjang/jumlah melebihi sisa buffer
    #[error("prefix at offset {offset} declares {declared} but only {remaining} bytes remain")]
    MalformedLength {
        offset: usize,
        declared: usize,
        remaining: usize,
    },

    /// Masih ada byte tersisa setelah field terakhir (strict mode)
    #[error("{trailing} trailing bytes after the last field")]
    TrailingData { trailing: usize },

    /// Konten field bukan UTF-8 valid
    #[error("field bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Encoder dengan buffer reusable.
///
/// Beberapa record boleh di-append back-to-back untuk membentuk stream;
/// `reset` mengosongkan buffer tanpa melepas kapasitasnya.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    /// Membuat encoder dengan buffer kosong
    pub fn new() -> Self {
        Self::default()
    }

    /// Membuat encoder dengan kapasitas awal tertentu
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Reset buffer untuk reuse
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Encode satu pesan, append ke buffer.
    ///
    /// Returns slice ke region yang baru ditulis.
    /// Buffer tidak berubah jika encode gagal.
    pub fn encode(&mut self, msg: &Msg) -> Result<&[u8], CodecError> {
        let start = self.buf.len();
        write_msg(msg, &mut self.buf)?;
        Ok(&self.buf[start..])
    }

    /// Isi buffer saat ini
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Jumlah byte ter-encode
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Ambil hasil encode sebagai [`Bytes`] immutable
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Tulis satu pesan ke `dst` dalam urutan field wire format:
/// id, fromId, type, body, lalu count(toIds) + elemennya.
///
/// Semua panjang divalidasi dulu; `dst` tidak tersentuh saat gagal.
pub(crate) fn write_msg(msg: &Msg, dst: &mut BytesMut) -> Result<(), CodecError> {
    check_len("id", msg.id.len())?;
    check_len("fromId", msg.from_id.len())?;
    check_len("type", msg.msg_type.len())?;
    check_len("body", msg.body.len())?;
    check_len("toIds", msg.to_ids.len())?;
    for to_id in &msg.to_ids {
        check_len("toIds element", to_id.len())?;
    }

    dst.reserve(msg.encoded_len());
    put_str(dst, &msg.id);
    put_str(dst, &msg.from_id);
    put_str(dst, &msg.msg_type);
    put_str(dst, &msg.body);
    dst.put_u32_le(msg.to_ids.len() as u32);
    for to_id in &msg.to_ids {
        put_str(dst, to_id);
    }
    Ok(())
}

#[inline]
fn check_len(field: &'static str, len: usize) -> Result<(), CodecError> {
    if len > MAX_FIELD_LEN {
        return Err(CodecError::EncodingOverflow { field, len });
    }
    Ok(())
}

#[inline]
fn put_str(dst: &mut BytesMut, s: &str) {
    dst.put_u32_le(s.len() as u32);
    dst.put_slice(s.as_bytes());
}

/// Decoder cursor atas borrowed buffer.
///
/// Satu call `decode` membaca tepat satu record dan memajukan cursor,
/// sehingga stream record back-to-back bisa dibaca berurutan.
/// Hasil decode fully-owned, tidak alias ke buffer input.
#[derive(Debug)]
pub struct Decoder<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> Decoder<'a> {
    /// Membuat decoder dari buffer
    #[inline]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    /// Decode satu pesan dari posisi cursor saat ini.
    ///
    /// Cursor hanya maju kalau decode berhasil; saat gagal tidak ada
    /// record parsial yang keluar dan posisi cursor tidak berubah.
    pub fn decode(&mut self) -> Result<Msg, CodecError> {
        let mut pos = self.read_pos;

        let id = self.get_str(&mut pos)?;
        let from_id = self.get_str(&mut pos)?;
        let msg_type = self.get_str(&mut pos)?;
        let body = self.get_str(&mut pos)?;

        let count_at = pos;
        let count = self.get_u32(&mut pos)? as usize;

        // Setiap elemen minimal PREFIX_SIZE bytes; count yang melebihi
        // sisa buffer pasti malformed, cek sebelum alokasi Vec
        let remaining = self.buffer.len() - pos;
        if count > remaining / PREFIX_SIZE {
            return Err(CodecError::MalformedLength {
                offset: count_at,
                declared: count,
                remaining,
            });
        }

        let mut to_ids = Vec::with_capacity(count);
        for _ in 0..count {
            to_ids.push(self.get_str(&mut pos)?);
        }

        self.read_pos = pos;
        Ok(Msg {
            id,
            from_id,
            to_ids,
            msg_type,
            body,
        })
    }

    /// Sisa byte dari posisi cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.read_pos
    }

    /// Cek apakah seluruh buffer sudah terbaca
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Baca prefix u32 little-endian pada `pos`
    fn get_u32(&self, pos: &mut usize) -> Result<u32, CodecError> {
        let remaining = self.buffer.len() - *pos;
        if remaining < PREFIX_SIZE {
            return Err(CodecError::TruncatedInput {
                offset: *pos,
                needed: PREFIX_SIZE,
                remaining,
            });
        }

        let mut raw = [0u8; PREFIX_SIZE];
        raw.copy_from_slice(&self.buffer[*pos..*pos + PREFIX_SIZE]);
        *pos += PREFIX_SIZE;
        Ok(u32::from_le_bytes(raw))
    }

    /// Baca satu string length-prefixed pada `pos`
    fn get_str(&self, pos: &mut usize) -> Result<String, CodecError> {
        let prefix_at = *pos;
        let len = self.get_u32(pos)? as usize;

        let remaining = self.buffer.len() - *pos;
        if len > remaining {
            return Err(CodecError::MalformedLength {
                offset: prefix_at,
                declared: len,
                remaining,
            });
        }

        let value = std::str::from_utf8(&self.buffer[*pos..*pos + len])?.to_owned();
        *pos += len;
        Ok(value)
    }
}
