//! Container header: symbol count and frequency table.
//!
//! Layout, all integers `u32` big-endian:
//! `[total_symbols][count for byte 0]...[count for byte 255]`, followed
//! directly by the packed bitstream.

use crate::config::MAX_CONTAINER_SYMBOLS;
use crate::error::{CompressError, Result};
use crate::frequency::{Histogram, ALPHABET_SIZE};
use std::io::{ErrorKind, Read, Write};

pub const HEADER_LEN: usize = 4 + ALPHABET_SIZE * 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub total_symbols: u32,
    pub histogram: Histogram,
}

impl Header {
    pub fn for_histogram(histogram: &Histogram) -> Result<Self> {
        let total = histogram.total();
        if total > MAX_CONTAINER_SYMBOLS {
            return Err(CompressError::InputTooLarge {
                size: total,
                limit: MAX_CONTAINER_SYMBOLS,
            });
        }
        Ok(Self {
            total_symbols: total as u32,
            histogram: histogram.clone(),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(&self.total_symbols.to_be_bytes());
        for (slot, count) in out[4..]
            .chunks_exact_mut(4)
            .zip(self.histogram.counts().iter())
        {
            slot.copy_from_slice(&count.to_be_bytes());
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut total = [0u8; 4];
        read_field(&mut reader, &mut total, "total_symbols")?;

        let mut table = [0u8; ALPHABET_SIZE * 4];
        read_field(&mut reader, &mut table, "frequency table")?;

        let mut counts = [0u32; ALPHABET_SIZE];
        for (count, chunk) in counts.iter_mut().zip(table.chunks_exact(4)) {
            *count = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(Self {
            total_symbols: u32::from_be_bytes(total),
            histogram: Histogram::from_counts(counts),
        })
    }

    /// Reject tables that cannot describe the recorded stream.
    pub fn validate(&self) -> Result<()> {
        if self.histogram.is_empty() {
            return Err(CompressError::TreeRebuild("frequency table is all zero".into()));
        }
        let sum = self.histogram.total();
        if sum != self.total_symbols as u64 {
            return Err(CompressError::TreeRebuild(format!(
                "frequency table sums to {sum} but header records {} symbols",
                self.total_symbols
            )));
        }
        Ok(())
    }
}

fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], field: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => CompressError::HeaderRead(format!("{field} is missing or truncated")),
        _ => CompressError::IoError(e),
    })
}
