use crate::error::LX3DriverError;
use lx3_core::geometry::MAX_CHANNEL_COUNT;

/// Sorts `sig` into ascending order in place.
///
/// Partition-based: last element as pivot, two pointers scanning inward
/// from both ends. Not stable. The fixed pivot choice recurses one level
/// per element on already-sorted input, so very large pre-sorted traces
/// belong in [`selection_sort`] or the standard sort instead.
pub fn quicksort(sig: &mut [i32]) {
    if sig.len() <= 1 {
        return;
    }
    let pivot = partition(sig);
    let (lower, upper) = sig.split_at_mut(pivot);
    quicksort(lower);
    quicksort(&mut upper[1..]);
}

fn partition(sig: &mut [i32]) -> usize {
    let right = sig.len() - 1;
    let pivot = sig[right];
    let mut l = 0;
    let mut r = right;
    loop {
        while sig[l] < pivot {
            l += 1;
        }
        loop {
            if r == 0 {
                break;
            }
            r -= 1;
            if sig[r] <= pivot {
                break;
            }
        }
        if l >= r {
            break;
        }
        sig.swap(l, r);
        l += 1;
    }
    sig.swap(l, right);
    l
}

/// Sorts a runtime-small array of per-channel values into ascending order.
///
/// Selection-based; meant for the per-scan case where `sig` holds at most
/// one value per channel and only a sorted prefix or the median is needed.
///
/// # Errors
///
/// [`LX3DriverError::SortLenOutOfRange`] when `sig` exceeds the channel
/// count of the largest supported build; `sig` is left untouched.
pub fn selection_sort(sig: &mut [u32]) -> Result<(), LX3DriverError> {
    if sig.len() > MAX_CHANNEL_COUNT {
        return Err(LX3DriverError::SortLenOutOfRange(sig.len()));
    }
    for i in 0..sig.len() {
        let mut min_idx = i;
        for j in i + 1..sig.len() {
            if sig[j] < sig[min_idx] {
                min_idx = j;
            }
        }
        sig.swap(i, min_idx);
    }
    Ok(())
}

/// Middle element (`len / 2`) of an already-sorted slice.
///
/// Performs no sorting itself; passing a sorted, non-empty slice is the
/// caller's contract.
#[must_use]
pub fn median<T: Copy>(sig: &[T]) -> T {
    sig[sig.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[rstest::rstest]
    #[case(vec![])]
    #[case(vec![7])]
    #[case(vec![2, 1])]
    #[case(vec![1, 2])]
    #[case(vec![3, 3, 3])]
    #[case(vec![5, -3, 0, -3, 12, 7, 1])]
    #[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0])]
    fn quicksort_ascending(#[case] mut sig: Vec<i32>) {
        let mut expected = sig.clone();
        expected.sort_unstable();
        quicksort(&mut sig);
        assert_eq!(expected, sig);
    }

    #[test]
    fn quicksort_random() {
        let mut rng = rand::rng();
        for len in [0, 1, 2, 3, 10, 64, 257] {
            let mut sig: Vec<i32> = (0..len).map(|_| rng.random_range(-1000..1000)).collect();
            let mut expected = sig.clone();
            expected.sort_unstable();
            quicksort(&mut sig);
            assert_eq!(expected, sig);
        }
    }

    #[test]
    fn both_sorts_agree() {
        let mut rng = rand::rng();
        for len in [0, 1, 5, 31, 64] {
            let values: Vec<u32> = (0..len).map(|_| rng.random_range(0..10000)).collect();
            let mut selected = values.clone();
            selection_sort(&mut selected).unwrap();
            let mut partitioned: Vec<i32> = values.iter().map(|&v| v as i32).collect();
            quicksort(&mut partitioned);
            assert!(selected.iter().map(|&v| v as i32).eq(partitioned));
        }
    }

    #[test]
    fn selection_sort_rejects_oversized_input() {
        let mut sig = vec![0u32; MAX_CHANNEL_COUNT + 1];
        assert_eq!(
            Err(LX3DriverError::SortLenOutOfRange(MAX_CHANNEL_COUNT + 1)),
            selection_sort(&mut sig)
        );
    }

    #[rstest::rstest]
    #[case(3, vec![1, 2, 3, 4, 5])]
    #[case(4, vec![2, 3, 4, 5])]
    #[case(1, vec![1])]
    fn median_of_sorted(#[case] expected: u16, #[case] sig: Vec<u16>) {
        assert_eq!(expected, median(&sig));
    }
}
