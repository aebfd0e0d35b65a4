//! Conditional parallel iteration for per-bond work.
//!
//! Uses rayon when the `parallel` feature is enabled.

use crate::config::ScreeningConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// Output order always matches input order.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ScreeningConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_sequential() {
        let items: Vec<u32> = (1..=5).collect();
        let doubled = maybe_parallel_map(&items, &ScreeningConfig::sequential(), |x| x * 2);
        assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let items: Vec<u64> = (0..1000).collect();
        let config = ScreeningConfig::new().with_threshold(10);
        let squares = maybe_parallel_map(&items, &config, |x| x * x);
        assert!(squares.iter().enumerate().all(|(i, v)| *v == (i as u64) * (i as u64)));
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = Vec::new();
        assert!(maybe_parallel_map(&items, &ScreeningConfig::new(), |x| *x).is_empty());
    }
}
