pub mod dna {

    /// Complement of a single residue. `U` pairs like `T`, anything
    /// that is not a nucleotide becomes `N`.
    #[inline]
    pub fn complement(base: u8) -> u8 {
        match base {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' | b'U' => b'A',
            b'a' => b't',
            b'c' => b'g',
            b'g' => b'c',
            b't' | b'u' => b'a',
            b'n' => b'n',
            _ => b'N',
        }
    }

    /// The sequence read on the other strand.
    pub fn rev_comp(seq: &[u8]) -> Vec<u8> {
        seq.iter().rev().map(|&b| complement(b)).collect()
    }

}
