//! huffpack: whole-file static Huffman compression.
//!
//! Pipeline:
//! - Frequency counting over the whole input ([`frequency`])
//! - Tree construction by repeated min-pair merge ([`tree`])
//! - Code assignment from root-to-leaf paths ([`codes`])
//! - MSB-first bit packing and unpacking ([`encoder`], [`decoder`])
//!
//! A container is a fixed 1028-byte header ([`header`]) holding the symbol
//! count and the 256-entry histogram, followed by the packed bitstream. The
//! tree is never stored; the decoder rebuilds it from the histogram.

pub mod codes;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod header;
pub mod tree;

use crate::codes::CodeTable;
use crate::config::{CompressionConfig, MAX_CONTAINER_SYMBOLS};
use crate::error::CompressError;
use crate::frequency::Histogram;
use crate::header::{Header, HEADER_LEN};
use crate::tree::HuffmanTree;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub use crate::error::Result;

/// Statistics for one file operation
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
    pub distinct_symbols: usize,
    pub payload_bits: u64,
    pub ratio: f64,
    pub entropy_bits: f64,
}

impl CompressionStats {
    fn new(histogram: &Histogram, compressed_size: u64, payload_bits: u64) -> Self {
        let original_size = histogram.total();
        let ratio = if original_size == 0 {
            1.0
        } else {
            compressed_size as f64 / original_size as f64
        };
        Self {
            original_size,
            compressed_size,
            distinct_symbols: histogram.distinct(),
            payload_bits,
            ratio,
            entropy_bits: histogram.entropy_bits(),
        }
    }
}

/// Everything the encoder derives from the input before writing.
struct EncodePlan {
    header: Header,
    table: CodeTable,
}

impl EncodePlan {
    fn build(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        let histogram = Histogram::from_bytes(data);
        let header = Header::for_histogram(&histogram)?;
        let tree = HuffmanTree::from_histogram(&histogram).ok_or(CompressError::EmptyInput)?;
        let table = CodeTable::from_tree(&tree);
        debug!(
            symbols = header.total_symbols,
            distinct = table.len(),
            max_code_len = table.max_len(),
            "prepared code table"
        );
        Ok(Self { header, table })
    }

    fn payload_bits(&self) -> u64 {
        self.table.encoded_bits(&self.header.histogram)
    }
}

/// Output that only appears at its destination once the operation succeeds.
///
/// Bytes go to a temporary file beside the destination; [`commit`] renames
/// it into place. Dropping an uncommitted output removes the temporary file.
///
/// [`commit`]: PendingOutput::commit
struct PendingOutput {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl PendingOutput {
    fn create(path: &Path, capacity: usize) -> Result<Self> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(dir).map_err(|e| CompressError::file_access(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(capacity, file),
        })
    }

    fn writer(&mut self) -> &mut BufWriter<NamedTempFile> {
        &mut self.writer
    }

    fn commit(self) -> Result<u64> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        let written = file.as_file().metadata()?.len();
        file.persist(&self.path)
            .map_err(|e| CompressError::file_access(&self.path, e.error))?;
        Ok(written)
    }
}

/// The compression engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `data` into a complete container.
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.check_size(data.len() as u64)?;
        let plan = EncodePlan::build(data)?;
        let mut output = Vec::with_capacity(HEADER_LEN + plan.payload_bits().div_ceil(8) as usize);
        plan.header.write_to(&mut output)?;
        encoder::pack(data, &plan.table, &mut output)?;
        Ok(output)
    }

    /// Write a container for `data` to `writer`. Returns the payload bit count.
    pub fn compress_to<W: Write>(&self, data: &[u8], mut writer: W) -> Result<u64> {
        self.check_size(data.len() as u64)?;
        let plan = EncodePlan::build(data)?;
        plan.header.write_to(&mut writer)?;
        let bits = encoder::pack(data, &plan.table, &mut writer)?;
        writer.flush()?;
        Ok(bits)
    }

    /// Reconstruct the original bytes from a container.
    pub fn decompress_bytes(&self, container: &[u8]) -> Result<Vec<u8>> {
        let mut reader = container;
        let header = Header::read_from(&mut reader)?;
        let tree = self.rebuild_tree(&header)?;
        decoder::unpack_to_vec(reader, &tree, header.total_symbols as u64)
    }

    /// Compress the file at `input` into a container at `output`.
    ///
    /// `output` is replaced only on success; on failure no partial file is
    /// left behind.
    pub fn compress_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CompressionStats> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let data = self.read_input(input)?;
        let plan = EncodePlan::build(&data)?;

        let mut pending = PendingOutput::create(output, self.config.io_buffer_size)?;
        plan.header.write_to(pending.writer())?;
        let payload_bits = encoder::pack(&data, &plan.table, pending.writer())?;
        let compressed_size = pending.commit()?;

        let stats = CompressionStats::new(&plan.header.histogram, compressed_size, payload_bits);
        info!(
            input = %input.display(),
            output = %output.display(),
            original = stats.original_size,
            compressed = stats.compressed_size,
            "compressed file"
        );
        Ok(stats)
    }

    /// Decompress the container at `input` into `output`.
    pub fn decompress_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CompressionStats> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let file = File::open(input).map_err(|e| CompressError::file_access(input, e))?;
        let compressed_size = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(self.config.io_buffer_size, file);

        let header = Header::read_from(&mut reader)?;
        let tree = self.rebuild_tree(&header)?;

        let mut pending = PendingOutput::create(output, self.config.io_buffer_size)?;
        decoder::unpack(&mut reader, &tree, header.total_symbols as u64, pending.writer())?;
        pending.commit()?;

        let payload_bits = CodeTable::from_tree(&tree).encoded_bits(&header.histogram);
        let stats = CompressionStats::new(&header.histogram, compressed_size, payload_bits);
        info!(
            input = %input.display(),
            output = %output.display(),
            original = stats.original_size,
            compressed = stats.compressed_size,
            "decompressed file"
        );
        Ok(stats)
    }

    fn read_input(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| CompressError::file_access(path, e))?;
        let len = file.metadata()?.len();
        self.check_size(len)?;
        let mut data = Vec::with_capacity(len as usize);
        file.read_to_end(&mut data)?;
        self.check_size(data.len() as u64)?;
        Ok(data)
    }

    fn rebuild_tree(&self, header: &Header) -> Result<HuffmanTree> {
        if let Err(e) = header.validate() {
            warn!(error = %e, "rejected container header");
            return Err(e);
        }
        self.check_size(header.total_symbols as u64)?;
        HuffmanTree::from_histogram(&header.histogram)
            .ok_or_else(|| CompressError::TreeRebuild("frequency table has no symbols".into()))
    }

    fn check_size(&self, size: u64) -> Result<()> {
        let limit = self.config.max_input_size.min(MAX_CONTAINER_SYMBOLS);
        if size > limit {
            return Err(CompressError::InputTooLarge { size, limit });
        }
        Ok(())
    }
}

/// Compress `data` with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().compress_bytes(data)
}

/// Decompress a container produced by [`compress`].
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().decompress_bytes(container)
}
