//! Utilities related to numbers.

use num;
use std::cmp;

/// Integer-float pair that can be ordered based on the float.
///
/// Used as a priority queue entry, where the integer identifies an item and
/// the float is its priority. NaN priorities compare as equal to everything.
#[derive(Clone, Copy, Debug)]
pub struct OrderableIndexValuePair<I: num::Integer, F: num::Float>(pub I, pub F);

impl<I: num::Integer, F: num::Float> PartialEq for OrderableIndexValuePair<I, F> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<I: num::Integer, F: num::Float> PartialOrd for OrderableIndexValuePair<I, F> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: num::Integer, F: num::Float> Eq for OrderableIndexValuePair<I, F> {}

impl<I: num::Integer, F: num::Float> Ord for OrderableIndexValuePair<I, F> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.1
            .partial_cmp(&other.1)
            .unwrap_or(cmp::Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_largest_value_first() {
        let mut heap = BinaryHeap::new();
        heap.push(OrderableIndexValuePair(0_usize, 1e-3));
        heap.push(OrderableIndexValuePair(1, 5e-2));
        heap.push(OrderableIndexValuePair(2, 2e-4));

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|pair| pair.0)).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }
}
