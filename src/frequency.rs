//! Byte frequency counting
//!
//! A [`Histogram`] holds one `u32` count per byte value. It is the only
//! model state the container persists: the decoder rebuilds its tree from it.

pub const ALPHABET_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; ALPHABET_SIZE],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl Histogram {
    /// Count every byte of `data` in a single pass.
    ///
    /// Callers bound `data.len()` to `u32::MAX`, so no count can overflow.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        for &b in data {
            counts[b as usize] += 1;
        }
        Self { counts }
    }

    pub fn from_counts(counts: [u32; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Nonzero entries in ascending byte order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    /// Shannon entropy in bits per symbol
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (_, c) in self.present() {
            let p = c as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
