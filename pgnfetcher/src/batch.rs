/// Splits an ordered record sequence into contiguous batches of at most
/// `size` elements. Every batch except possibly the last holds exactly
/// `size` records; concatenating the batches in order reconstructs the
/// input. `size` must be at least 1.
pub fn chunk<T: Clone>(records: &[T], size: usize) -> Vec<Vec<T>> {
    assert!(size >= 1, "batch size must be at least 1");
    records.chunks(size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_reconstructs_the_input() {
        let records: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let batches = chunk(&records, size);
            let rebuilt: Vec<u32> = batches.iter().flatten().copied().collect();
            assert_eq!(rebuilt, records, "size {size}");
        }
    }

    #[test]
    fn all_batches_full_except_possibly_the_last() {
        let records: Vec<u32> = (0..23).collect();
        let batches = chunk(&records, 10);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 10);
        assert_eq!(batches[1].len(), 10);
        assert_eq!(batches[2].len(), 3);
    }

    #[test]
    fn exact_division_has_no_short_tail() {
        let records: Vec<u32> = (0..20).collect();
        let batches = chunk(&records, 10);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 10));
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let records: Vec<u32> = Vec::new();
        assert!(chunk(&records, 10).is_empty());
    }

    #[test]
    #[should_panic(expected = "batch size")]
    fn zero_size_is_a_caller_bug() {
        chunk(&[1u32], 0);
    }
}
