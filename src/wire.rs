//! Field-level edits on encoded protobuf messages.
//!
//! prost drops fields that are not declared on the decoding struct, so a
//! decode/modify/encode round trip of a KiCad item would strip everything this
//! crate does not model. These helpers rewrite a single field of an encoded
//! message and copy every other field through unchanged.

use prost::encoding::{decode_key, decode_varint, encode_key, encode_varint, WireType};

use crate::error::KiCadError;

struct WireField<'a> {
    tag: u32,
    raw: &'a [u8],
    payload: Option<&'a [u8]>,
}

fn malformed(reason: impl std::fmt::Display) -> KiCadError {
    KiCadError::ProtobufDecode(reason.to_string())
}

fn take<'a>(cursor: &mut &'a [u8], len: usize) -> Result<&'a [u8], KiCadError> {
    if cursor.len() < len {
        return Err(malformed(format!(
            "field length {len} exceeds remaining {} bytes",
            cursor.len()
        )));
    }

    let (head, rest) = cursor.split_at(len);
    *cursor = rest;
    Ok(head)
}

fn split_fields(message: &[u8]) -> Result<Vec<WireField<'_>>, KiCadError> {
    let mut fields = Vec::new();
    let mut cursor = message;

    while !cursor.is_empty() {
        let start = message.len() - cursor.len();
        let (tag, wire_type) = decode_key(&mut cursor).map_err(malformed)?;

        let payload = match wire_type {
            WireType::Varint => {
                decode_varint(&mut cursor).map_err(malformed)?;
                None
            }
            WireType::SixtyFourBit => {
                take(&mut cursor, 8)?;
                None
            }
            WireType::ThirtyTwoBit => {
                take(&mut cursor, 4)?;
                None
            }
            WireType::LengthDelimited => {
                let len = decode_varint(&mut cursor).map_err(malformed)?;
                let len = usize::try_from(len).map_err(malformed)?;
                Some(take(&mut cursor, len)?)
            }
            WireType::StartGroup | WireType::EndGroup => {
                return Err(malformed(format!("unsupported group encoding at tag {tag}")));
            }
        };

        let end = message.len() - cursor.len();
        fields.push(WireField {
            tag,
            raw: &message[start..end],
            payload,
        });
    }

    Ok(fields)
}

fn push_length_delimited(out: &mut Vec<u8>, tag: u32, value: &[u8]) {
    encode_key(tag, WireType::LengthDelimited, out);
    encode_varint(value.len() as u64, out);
    out.extend_from_slice(value);
}

/// Replaces the length-delimited field `tag` with `value`, dropping every
/// earlier occurrence.
pub(crate) fn set_field(message: &[u8], tag: u32, value: &[u8]) -> Result<Vec<u8>, KiCadError> {
    edit_field(message, tag, |_| Ok(value.to_vec()))
}

/// Rewrites the embedded message at `tag`.
///
/// Repeated occurrences are merged by concatenation before `edit` runs, which
/// is how protobuf itself merges a singular message field. An absent field is
/// handed to `edit` as an empty message.
pub(crate) fn edit_field(
    message: &[u8],
    tag: u32,
    edit: impl FnOnce(&[u8]) -> Result<Vec<u8>, KiCadError>,
) -> Result<Vec<u8>, KiCadError> {
    let fields = split_fields(message)?;
    let mut out = Vec::with_capacity(message.len() + 16);
    let mut current = Vec::new();

    for field in fields {
        if field.tag != tag {
            out.extend_from_slice(field.raw);
            continue;
        }

        let payload = field.payload.ok_or_else(|| {
            malformed(format!("field {tag} is not length-delimited"))
        })?;
        current.extend_from_slice(payload);
    }

    let edited = edit(&current)?;
    push_length_delimited(&mut out, tag, &edited);
    Ok(out)
}

/// Walks `path` through nested embedded messages and rewrites the innermost one.
pub(crate) fn edit_path(
    message: &[u8],
    path: &[u32],
    edit: impl FnOnce(&[u8]) -> Result<Vec<u8>, KiCadError>,
) -> Result<Vec<u8>, KiCadError> {
    match path.split_first() {
        None => edit(message),
        Some((&tag, rest)) => edit_field(message, tag, |inner| edit_path(inner, rest, edit)),
    }
}
