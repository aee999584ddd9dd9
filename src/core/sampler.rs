use rand::Rng;

/// Draws `count` unique winners from `pool` without replacement.
///
/// Each step picks a uniformly random survivor, so winner order is draw
/// order and the remaining pool keeps its original relative order. Callers
/// must have validated `1 <= count <= pool.len()`.
pub fn sample<T: Clone, R: Rng>(rng: &mut R, pool: &[T], count: usize) -> (Vec<T>, Vec<T>) {
    debug_assert!(count >= 1 && count <= pool.len());

    let mut remaining = pool.to_vec();
    let mut winners = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.gen_range(0..remaining.len());
        winners.push(remaining.remove(index));
    }

    (winners, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn draws_exactly_count_distinct_winners() {
        let pool: Vec<u32> = (1..=10).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let (winners, remaining) = sample(&mut rng, &pool, 3);

        assert_eq!(winners.len(), 3);
        assert_eq!(remaining.len(), 7);
        let distinct: HashSet<_> = winners.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn full_draw_empties_the_pool() {
        let pool = vec![4, 8, 15];
        let mut rng = StdRng::seed_from_u64(1);

        let (winners, remaining) = sample(&mut rng, &pool, 3);

        assert!(remaining.is_empty());
        let mut sorted = winners;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![4, 8, 15]);
    }

    #[test]
    fn remaining_pool_keeps_original_order() {
        let pool: Vec<u32> = (1..=20).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let (_, remaining) = sample(&mut rng, &pool, 5);

        let mut sorted = remaining.clone();
        sorted.sort_unstable();
        assert_eq!(remaining, sorted);
    }

    proptest! {
        #[test]
        fn winners_and_remaining_partition_the_pool(
            pool_size in 1usize..40,
            count_seed in 0usize..40,
            rng_seed in any::<u64>(),
        ) {
            let pool: Vec<u32> = (0..pool_size as u32).collect();
            let count = count_seed % pool_size + 1;
            let mut rng = StdRng::seed_from_u64(rng_seed);

            let (winners, remaining) = sample(&mut rng, &pool, count);

            prop_assert_eq!(winners.len(), count);
            prop_assert_eq!(remaining.len(), pool_size - count);

            let mut combined: Vec<u32> = winners.clone();
            combined.extend(&remaining);
            combined.sort_unstable();
            prop_assert_eq!(combined, pool);
        }
    }
}
