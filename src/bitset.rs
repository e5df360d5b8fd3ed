//! Fixed-size bit vector over the cells of a sample space.
//!
//! Coverage vectors, per-event indicators and saturation rows are all 0/1
//! vectors aligned to cell index, so they share this representation and
//! combine word by word.

/// A 0/1 vector of fixed length backed by `u64` words.
///
/// Bits beyond `len` are always clear.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BitSet {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of bits (not set bits)
    len: usize,
}

impl BitSet {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an all-zero vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        let num_words = len.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            len,
        }
    }

    /// Creates an all-one vector of `len` bits.
    pub fn ones(len: usize) -> Self {
        let mut bs = Self::zeros(len);
        bs.words.fill(u64::MAX);
        bs.clear_tail();
        bs
    }

    /// Builds a vector from booleans, one bit per item.
    pub fn from_bools(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in bits {
            let (word_idx, bit_idx) = Self::word_and_bit(len);
            if word_idx == words.len() {
                words.push(0);
            }
            if bit {
                words[word_idx] |= 1u64 << bit_idx;
            }
            len += 1;
        }
        Self { words, len }
    }

    /// Returns the length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the vector has no bits at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    fn clear_tail(&mut self) {
        let (word_idx, bit_idx) = Self::word_and_bit(self.len);
        if bit_idx != 0 {
            self.words[word_idx] &= (1u64 << bit_idx) - 1;
        }
    }

    /// Returns true if the bit at the given index is set.
    ///
    /// Out-of-range indices read as zero.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] >> bit_idx) & 1 == 1
    }

    /// Bitwise OR with `other`, in place.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn union_with(&mut self, other: &BitSet) {
        assert_eq!(self.len, other.len, "Bit vectors should have equal length");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// Bitwise AND with `other`, in place.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn intersect_with(&mut self, other: &BitSet) {
        assert_eq!(self.len, other.len, "Bit vectors should have equal length");
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    /// Returns an iterator over all set bit indices.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            bitset: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Returns every bit as `0` or `1`, in index order.
    pub fn to_indicators(&self) -> Vec<u8> {
        (0..self.len).map(|i| self.contains(i) as u8).collect()
    }

    /// Returns every bit as `0.0` or `1.0`, in index order.
    pub fn to_coefficients(&self) -> Vec<f64> {
        (0..self.len).map(|i| if self.contains(i) { 1.0 } else { 0.0 }).collect()
    }
}

impl std::fmt::Display for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", self.contains(i) as u8)?;
        }
        Ok(())
    }
}

/// Iterator over set bits in a BitSet.
pub struct BitSetIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * BitSet::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = self.bitset.words[self.word_idx];
        }
    }
}
