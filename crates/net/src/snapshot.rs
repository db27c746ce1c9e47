//! Per-tick drawer snapshot and its fixed binary layout.
//!
//! Layout (little-endian, 34 bytes, no header):
//!
//! ```text
//! enabled:u8 r:f32 g:f32 b:f32 a:f32 width:i32 erase:u8 target:i32 x:f32 y:f32
//! ```
//!
//! `target` is `-1` when the drawer is not over a replicated surface. A
//! non-finite `x` or `y` is rejected on decode. The
//! previous stroke coordinate is not part of the payload; receivers derive it
//! from the coordinate of the snapshot before.

use crate::error::CodecError;
use crate::identity::NetworkId;

/// Encoded size of a [`ReplicatedSnapshot`]
pub const SNAPSHOT_LEN: usize = 34;

/// Wire value of "no target surface"
pub const NO_TARGET: i32 = -1;

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte slice,
/// advancing it past the consumed bytes.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> Result<Self, CodecError>;
}

/// Drawer state sent from the authority to observers once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicatedSnapshot {
    pub enabled: bool,
    pub color: [f32; 4],
    pub width: i32,
    pub erase: bool,
    pub target_surface: Option<NetworkId>,
    pub current_coord: [f32; 2],
}

impl ReplicatedSnapshot {
    /// Encode into a fresh buffer of exactly [`SNAPSHOT_LEN`] bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_LEN);
        self.encode(&mut out);
        out
    }

    /// Decode a whole payload of exactly [`SNAPSHOT_LEN`] bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < SNAPSHOT_LEN {
            return Err(CodecError::Truncated {
                needed: SNAPSHOT_LEN,
                remaining: bytes.len(),
            });
        }
        if bytes.len() > SNAPSHOT_LEN {
            return Err(CodecError::TrailingBytes(bytes.len() - SNAPSHOT_LEN));
        }
        let mut inp = bytes;
        Self::decode(&mut inp)
    }
}

impl SnapshotEncode for ReplicatedSnapshot {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(u8::from(self.enabled));
        for c in self.color {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.width.to_le_bytes());
        out.push(u8::from(self.erase));
        let target = self.target_surface.map_or(NO_TARGET, NetworkId::get);
        out.extend_from_slice(&target.to_le_bytes());
        out.extend_from_slice(&self.current_coord[0].to_le_bytes());
        out.extend_from_slice(&self.current_coord[1].to_le_bytes());
    }
}

impl SnapshotDecode for ReplicatedSnapshot {
    fn decode(inp: &mut &[u8]) -> Result<Self, CodecError> {
        let enabled = take_bool(inp)?;
        let color = [
            f32::from_le_bytes(take::<4>(inp)?),
            f32::from_le_bytes(take::<4>(inp)?),
            f32::from_le_bytes(take::<4>(inp)?),
            f32::from_le_bytes(take::<4>(inp)?),
        ];
        let width = i32::from_le_bytes(take::<4>(inp)?);
        let erase = take_bool(inp)?;
        let target_surface = NetworkId::new(i32::from_le_bytes(take::<4>(inp)?));
        let current_coord = [
            f32::from_le_bytes(take::<4>(inp)?),
            f32::from_le_bytes(take::<4>(inp)?),
        ];
        if !current_coord.iter().all(|c| c.is_finite()) {
            return Err(CodecError::NonFiniteCoord);
        }
        Ok(Self {
            enabled,
            color,
            width,
            erase,
            target_surface,
            current_coord,
        })
    }
}

fn take<const N: usize>(inp: &mut &[u8]) -> Result<[u8; N], CodecError> {
    let Some((head, rest)) = inp.split_first_chunk::<N>() else {
        return Err(CodecError::Truncated {
            needed: N,
            remaining: inp.len(),
        });
    };
    *inp = rest;
    Ok(*head)
}

fn take_bool(inp: &mut &[u8]) -> Result<bool, CodecError> {
    match take::<1>(inp)? {
        [0] => Ok(false),
        [1] => Ok(true),
        [other] => Err(CodecError::InvalidBool(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReplicatedSnapshot {
        ReplicatedSnapshot {
            enabled: true,
            color: [0.1, 0.25, 1.0, 0.5],
            width: 7,
            erase: false,
            target_surface: NetworkId::new(1001),
            current_coord: [0.125, 0.875],
        }
    }

    #[test]
    fn test_encoded_size_is_fixed() {
        // 1 + 4 * 4 + 4 + 1 + 4 + 2 * 4
        assert_eq!(SNAPSHOT_LEN, 34);
        assert_eq!(sample().to_bytes().len(), SNAPSHOT_LEN);
        let idle = ReplicatedSnapshot {
            enabled: false,
            target_surface: None,
            ..sample()
        };
        assert_eq!(idle.to_bytes().len(), SNAPSHOT_LEN);
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let snapshot = sample();
        let decoded = ReplicatedSnapshot::from_bytes(&snapshot.to_bytes()).unwrap();
        assert_eq!(decoded, snapshot);

        let erasing = ReplicatedSnapshot {
            erase: true,
            target_surface: None,
            color: [f32::MIN_POSITIVE, -0.0, 3.5e7, 1.0],
            width: i32::MIN,
            ..sample()
        };
        let decoded = ReplicatedSnapshot::from_bytes(&erasing.to_bytes()).unwrap();
        assert_eq!(decoded, erasing);
        assert_eq!(decoded.color[1].to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_field_order_on_wire() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..5], &0.1f32.to_le_bytes());
        assert_eq!(&bytes[17..21], &7i32.to_le_bytes());
        assert_eq!(bytes[21], 0);
        assert_eq!(&bytes[22..26], &1001i32.to_le_bytes());
        assert_eq!(&bytes[26..30], &0.125f32.to_le_bytes());
        assert_eq!(&bytes[30..34], &0.875f32.to_le_bytes());
    }

    #[test]
    fn test_no_target_encodes_sentinel() {
        let snapshot = ReplicatedSnapshot {
            target_surface: None,
            ..sample()
        };
        let bytes = snapshot.to_bytes();
        assert_eq!(&bytes[22..26], &NO_TARGET.to_le_bytes());
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = sample().to_bytes();
        let err = ReplicatedSnapshot::from_bytes(&bytes[..20]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                needed: SNAPSHOT_LEN,
                remaining: 20
            }
        );
        // The field-level cursor still reports the short read
        let mut inp = &bytes[..20];
        assert_eq!(
            ReplicatedSnapshot::decode(&mut inp).unwrap_err(),
            CodecError::Truncated {
                needed: 4,
                remaining: 3
            }
        );
    }

    #[test]
    fn test_non_finite_coord_rejected() {
        for coord in [
            [f32::INFINITY, 0.5],
            [0.5, f32::NAN],
            [1e9, f32::NEG_INFINITY],
        ] {
            let snapshot = ReplicatedSnapshot {
                current_coord: coord,
                ..sample()
            };
            assert_eq!(
                ReplicatedSnapshot::from_bytes(&snapshot.to_bytes()).unwrap_err(),
                CodecError::NonFiniteCoord
            );
        }
        // Large but finite coordinates are valid on the wire
        let far = ReplicatedSnapshot {
            current_coord: [1e9, 0.5],
            ..sample()
        };
        assert_eq!(ReplicatedSnapshot::from_bytes(&far.to_bytes()).unwrap(), far);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = sample().to_bytes();
        bytes.push(0);
        assert_eq!(
            ReplicatedSnapshot::from_bytes(&bytes).unwrap_err(),
            CodecError::TrailingBytes(1)
        );
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let mut bytes = sample().to_bytes();
        bytes[21] = 2;
        assert_eq!(
            ReplicatedSnapshot::from_bytes(&bytes).unwrap_err(),
            CodecError::InvalidBool(2)
        );
    }

    #[test]
    fn test_decode_stream_of_snapshots() {
        let mut buf = Vec::new();
        sample().encode(&mut buf);
        ReplicatedSnapshot { width: 9, ..sample() }.encode(&mut buf);

        let mut slice: &[u8] = &buf;
        let first = ReplicatedSnapshot::decode(&mut slice).unwrap();
        let second = ReplicatedSnapshot::decode(&mut slice).unwrap();
        assert!(slice.is_empty());
        assert_eq!(first.width, 7);
        assert_eq!(second.width, 9);
    }
}
