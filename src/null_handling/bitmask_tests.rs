//==================================================================================
// Unit Tests for the validity-bitmask primitives
//==================================================================================

#[cfg(test)]
mod tests {
    use crate::error::LaminaError;
    use crate::null_handling::bitmask::{and_masks, Bitmask};

    fn collect(mask: &Bitmask) -> Vec<bool> {
        mask.iter_range(0, mask.len()).collect()
    }

    #[test]
    fn test_new_set_and_bit_access() {
        let mask = Bitmask::new_set(10, true);
        assert_eq!(mask.len(), 10);
        assert!((0..10).all(|i| mask.bit_is_valid(i)));

        let mask = Bitmask::new_set(10, false);
        assert!((0..10).all(|i| !mask.bit_is_valid(i)));
    }

    #[test]
    fn test_nulls_at_and_counting() {
        let mask = Bitmask::nulls_at(7, &[3, 6]);
        assert_eq!(collect(&mask), vec![true, true, true, false, true, true, false]);
        assert_eq!(mask.count_invalid_in_range(0, 7), 2);
        assert_eq!(mask.count_invalid_in_range(0, 3), 0);
        assert_eq!(mask.count_invalid_in_range(3, 7), 2);
        assert!(mask.has_invalid_in_range(3, 4));
        assert!(!mask.has_invalid_in_range(4, 6));
    }

    #[test]
    fn test_set_range_mutation() {
        let mut mask = Bitmask::new_set(8, true);
        mask.set_range(2, 5, false);
        assert_eq!(mask.count_invalid_in_range(0, 8), 3);
        mask.set_range(3, 4, true);
        assert_eq!(mask.count_invalid_in_range(0, 8), 2);
        assert!(!mask.bit_is_valid(2));
        assert!(mask.bit_is_valid(3));
        assert!(!mask.bit_is_valid(4));
    }

    #[test]
    fn test_and_masks_zero_offsets() {
        let a = Bitmask::from_bools(&[true, false, true, true]);
        let b = Bitmask::from_bools(&[true, true, false, true]);
        let out = and_masks(Some(&a), 0, Some(&b), 0, 4).unwrap();
        assert_eq!(collect(&out), vec![true, false, false, true]);
    }

    #[test]
    fn test_and_masks_missing_inputs_are_identity() {
        let a = Bitmask::nulls_at(5, &[1, 4]);

        let out = and_masks(Some(&a), 0, None, 0, 5).unwrap();
        assert_eq!(collect(&out), collect(&a));

        let out = and_masks(None, 0, Some(&a), 0, 5).unwrap();
        assert_eq!(collect(&out), collect(&a));

        // Both missing: a freshly allocated all-valid mask.
        let out = and_masks(None, 0, None, 0, 5).unwrap();
        assert_eq!(collect(&out), vec![true; 5]);
    }

    #[test]
    fn test_and_masks_with_independent_offsets() {
        // a viewed from row 2, b viewed from row 1; logical rows must align.
        let a = Bitmask::from_bools(&[false, false, true, false, true, true]);
        let b = Bitmask::from_bools(&[false, true, true, false, true, true]);
        let out = and_masks(Some(&a), 2, Some(&b), 1, 4).unwrap();
        // rows: a[2..6] = 1011, b[1..5] = 1101 -> 1001
        assert_eq!(collect(&out), vec![true, false, false, true]);
    }

    #[test]
    fn test_and_masks_spans_word_boundaries() {
        // 200 bits forces multi-word gathers; offsets are deliberately
        // misaligned against the 64-bit word grid.
        let a = Bitmask::nulls_at(200, &[63, 64, 65, 130]);
        let b = Bitmask::nulls_at(200, &[70, 130, 199]);
        let out = and_masks(Some(&a), 1, Some(&b), 3, 150).unwrap();
        assert_eq!(out.len(), 150);
        for i in 0..150 {
            let expected = a.bit_is_valid(1 + i) && b.bit_is_valid(3 + i);
            assert_eq!(out.bit_is_valid(i), expected, "row {}", i);
        }
    }

    #[test]
    fn test_and_masks_rejects_uncovered_window() {
        let a = Bitmask::new_set(4, true);
        let result = and_masks(Some(&a), 2, None, 0, 4);
        assert!(matches!(result, Err(LaminaError::InvalidArgument(_))));
    }

    #[test]
    fn test_and_masks_empty_row_count() {
        let a = Bitmask::new_set(4, true);
        let out = and_masks(Some(&a), 1, Some(&a), 0, 0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_and_masks_never_mutates_inputs() {
        let a = Bitmask::nulls_at(9, &[0, 8]);
        let b = Bitmask::nulls_at(9, &[4]);
        let a_before = collect(&a);
        let b_before = collect(&b);
        let _ = and_masks(Some(&a), 0, Some(&b), 0, 9).unwrap();
        assert_eq!(collect(&a), a_before);
        assert_eq!(collect(&b), b_before);
    }

    #[test]
    fn test_and_masks_matches_rowwise_reference_on_random_input() {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(0xC01);

        for _ in 0..16 {
            let len = rng.gen_range(1..300);
            let a: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.8)).collect();
            let b: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.8)).collect();
            let offset_a = rng.gen_range(0..len);
            let offset_b = rng.gen_range(0..len);
            let rows = len - offset_a.max(offset_b);

            let out = and_masks(
                Some(&Bitmask::from_bools(&a)),
                offset_a,
                Some(&Bitmask::from_bools(&b)),
                offset_b,
                rows,
            )
            .unwrap();

            for i in 0..rows {
                assert_eq!(out.bit_is_valid(i), a[offset_a + i] && b[offset_b + i]);
            }
        }
    }
}
