//! Bit packing for the encode path

use crate::codes::CodeTable;
use crate::error::{CompressError, Result};
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use std::io::Write;

/// Write the code of every byte of `data`, MSB-first, then zero-pad the
/// final partial byte. Returns the number of payload bits, padding
/// excluded.
pub fn pack<W: Write>(data: &[u8], table: &CodeTable, mut writer: W) -> Result<u64> {
    let mut bits = 0u64;
    let mut w = BitWriter::endian(&mut writer, BigEndian);
    for &byte in data {
        let code = table.get(byte).ok_or(CompressError::UnknownSymbol(byte))?;
        for &bit in code.bits() {
            w.write_bit(bit)?;
        }
        bits += code.len() as u64;
    }
    w.byte_align()?;
    Ok(bits)
}

pub fn pack_to_vec(data: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    pack(data, table, &mut output)?;
    Ok(output)
}
