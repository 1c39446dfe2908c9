//! Weighted winner selection
//!
//! Each candidate is drawn with probability `weight / total`. Selection
//! builds prefix sums once and binary-searches a uniform ticket in
//! `[0, total)`, so memory stays proportional to the number of
//! participations rather than the number of entries.

use rand::Rng;

/// Pick one key from `(key, weight)` pairs.
///
/// Non-positive weights never win. Returns `None` when the total weight is zero.
pub fn pick_weighted<T, R>(pool: &[(T, i64)], rng: &mut R) -> Option<T>
where
    T: Copy,
    R: Rng + ?Sized,
{
    let mut cumulative = Vec::with_capacity(pool.len());
    let mut total: i64 = 0;
    for &(_, weight) in pool {
        total = total.saturating_add(weight.max(0));
        cumulative.push(total);
    }
    if total == 0 {
        return None;
    }

    let ticket = rng.gen_range(0..total);
    // first prefix sum strictly greater than the ticket
    let index = cumulative.partition_point(|&c| c <= ticket);
    pool.get(index).map(|&(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_pool_has_no_winner() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_weighted::<i64, _>(&[], &mut rng), None);
        assert_eq!(pick_weighted(&[(1_i64, 0)], &mut rng), None);
    }

    #[test]
    fn test_single_candidate_always_wins() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick_weighted(&[(42_i64, 3)], &mut rng), Some(42));
        }
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = [(1_i64, 0), (2, 5), (3, 0)];
        for _ in 0..200 {
            assert_eq!(pick_weighted(&pool, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        // A holds two entries, B and C one each
        let pool = [('A', 2_i64), ('B', 1), ('C', 1)];
        let mut rng = StdRng::seed_from_u64(20_24);
        let draws = 40_000;
        let (mut a, mut b, mut c) = (0, 0, 0);
        for _ in 0..draws {
            match pick_weighted(&pool, &mut rng) {
                Some('A') => a += 1,
                Some('B') => b += 1,
                Some('C') => c += 1,
                other => panic!("unexpected pick {other:?}"),
            }
        }
        let share = |n: i32| n as f64 / draws as f64;
        assert!((share(a) - 0.50).abs() < 0.02, "A share {}", share(a));
        assert!((share(b) - 0.25).abs() < 0.02, "B share {}", share(b));
        assert!((share(c) - 0.25).abs() < 0.02, "C share {}", share(c));
    }

    #[test]
    fn test_repeated_user_rows_add_up() {
        // Same user across two participations counts as their sum
        let pool = [(1_i64, 1), (2, 1), (1, 2)];
        let mut rng = StdRng::seed_from_u64(99);
        let draws = 20_000;
        let wins = (0..draws)
            .filter(|_| pick_weighted(&pool, &mut rng) == Some(1))
            .count();
        let share = wins as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "user 1 share {share}");
    }
}
