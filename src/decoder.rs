//! Bit unpacking for the decode path
//!
//! Walks the tree one bit at a time from the root, emitting a symbol and
//! returning to the root at every leaf. Decoding stops at exactly
//! `total_symbols`; padding bits after the last code are never read as
//! codes.

use crate::error::{CompressError, Result};
use crate::tree::{HuffmanTree, Node};
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::{ErrorKind, Read, Write};

/// Decode `total_symbols` symbols from `reader` into `writer`.
///
/// For a single-leaf tree every bit stands for one occurrence of the
/// symbol, matching the one-bit code the encoder assigns.
pub fn unpack<R: Read, W: Write>(
    reader: R,
    tree: &HuffmanTree,
    total_symbols: u64,
    mut writer: W,
) -> Result<u64> {
    let mut r = BitReader::endian(reader, BigEndian);
    let root = tree.root();
    let mut current = root;
    let mut decoded = 0u64;

    while decoded < total_symbols {
        let bit = match r.read_bit() {
            Ok(bit) => bit,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(CompressError::TruncatedStream {
                    expected: total_symbols,
                    decoded,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Node::Internal { left, right, .. } = tree.node(current) {
            current = if bit { *right } else { *left };
        }

        if let Node::Leaf { symbol, .. } = tree.node(current) {
            writer.write_all(&[*symbol])?;
            decoded += 1;
            current = root;
        }
    }

    Ok(decoded)
}

pub fn unpack_to_vec(bitstream: &[u8], tree: &HuffmanTree, total_symbols: u64) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(total_symbols.min(bitstream.len() as u64 * 8) as usize);
    unpack(bitstream, tree, total_symbols, &mut output)?;
    Ok(output)
}
