//! Binary container for save documents.
//!
//! Layout: 4-byte magic, 1-byte format version, then the bincode payload
//! (little-endian, fixed-width integers, `u64` sequence lengths). The same
//! document always encodes to the same bytes.

use crate::error::{DecodeError, SaveError};
use crate::scene::SaveData;

/// Leading bytes of every save file.
pub const MAGIC: [u8; 4] = *b"NVSD";

/// Container version written by [`encode`].
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;

/// Encode a save document.
pub fn encode(data: &SaveData) -> Result<Vec<u8>, SaveError> {
    let payload = bincode::serialize(data).map_err(SaveError::Encode)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(FORMAT_VERSION);
    bytes.extend(payload);
    Ok(bytes)
}

/// Decode a save document.
///
/// Never returns a partially populated document: any missing, extra or
/// corrupt byte is an error.
pub fn decode(bytes: &[u8]) -> Result<SaveData, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }

    let (header, payload) = bytes.split_at(HEADER_LEN);

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&header[..MAGIC.len()]);
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }

    let version = header[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let data: SaveData = bincode::deserialize(payload)?;

    let consumed = bincode::serialized_size(&data)?;
    let trailing = (payload.len() as u64).saturating_sub(consumed);
    if trailing > 0 {
        return Err(DecodeError::TrailingBytes(trailing as usize));
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn sample() -> SaveData {
        SaveData {
            read_scenes: vec![Scene::new(1, 1, 1), Scene::new(1, 1, 2)],
            recent_scene: Scene::new(1, 1, 2),
        }
    }

    #[rustfmt::skip]
    const SAMPLE_BYTES: [u8; 49] = [
        b'N', b'V', b'S', b'D', 1,
        2, 0, 0, 0, 0, 0, 0, 0,
        1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0,
        1, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0,
        1, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0,
    ];

    #[test]
    fn sample_encodes_to_fixed_bytes() {
        let bytes = encode(&sample()).unwrap();
        assert_eq!(bytes, SAMPLE_BYTES);
        assert_eq!(encode(&sample()).unwrap(), bytes);
    }

    #[test]
    fn sample_decodes_back() {
        assert_eq!(decode(&SAMPLE_BYTES).unwrap(), sample());
    }

    #[test]
    fn roundtrip_preserves_documents() {
        let mut long = SaveData::new();
        for section in 0..100 {
            long.record_visit(Scene::new(2, section / 10, -section));
        }

        for data in [SaveData::new(), sample(), long] {
            let decoded = decode(&encode(&data).unwrap()).unwrap();
            assert_eq!(decoded, data);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(decode(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert!(matches!(
            decode(&SAMPLE_BYTES[..3]),
            Err(DecodeError::Truncated { len: 3 })
        ));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        for len in [HEADER_LEN, HEADER_LEN + 4, SAMPLE_BYTES.len() - 1] {
            assert!(
                matches!(decode(&SAMPLE_BYTES[..len]), Err(DecodeError::Malformed(_))),
                "length {len} decoded"
            );
        }
    }

    #[test]
    fn foreign_data_is_rejected() {
        let mut bytes = SAMPLE_BYTES;
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(DecodeError::BadMagic(_))));

        let mut bytes = SAMPLE_BYTES;
        bytes[4] = 2;
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = SAMPLE_BYTES.to_vec();
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(decode(&bytes), Err(DecodeError::TrailingBytes(2))));
    }
}
