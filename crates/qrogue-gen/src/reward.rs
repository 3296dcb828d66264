//! Reward pools.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::{GenError, GenResult};

/// Something a finished puzzle can hand out.
///
/// The generator draws exactly one reward per puzzle from its own seeded
/// stream and never inspects it.
pub trait RewardPool {
    /// The reward type.
    type Reward;

    /// Draw one reward.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Reward;
}

/// No reward.
impl RewardPool for () {
    type Reward = ();

    fn draw<R: Rng + ?Sized>(&self, _rng: &mut R) {}
}

/// Rewards drawn with fixed relative weights.
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Clone> WeightedPool<T> {
    /// Build a pool from `(reward, weight)` pairs.
    ///
    /// Fails if the pool is empty or the weights are negative or all zero.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> GenResult<Self> {
        let (items, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| GenError::InvalidConfig(format!("reward pool: {e}")))?;
        Ok(Self { items, index })
    }

    /// Build a pool where every reward is equally likely.
    pub fn uniform(items: impl IntoIterator<Item = T>) -> GenResult<Self> {
        Self::new(items.into_iter().map(|item| (item, 1.0)))
    }

    /// Number of rewards in the pool.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool is empty. Always false for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> RewardPool for WeightedPool<T> {
    type Reward = T;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.items[self.index.sample(rng)].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_weight_never_drawn() {
        let pool = WeightedPool::new([("coin", 1.0), ("key", 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..200).all(|_| pool.draw(&mut rng) == "coin"));
    }

    #[test]
    fn test_invalid_pools() {
        assert!(WeightedPool::<u32>::uniform([]).is_err());
        assert!(WeightedPool::new([(1, 0.0), (2, 0.0)]).is_err());
        assert!(WeightedPool::new([(1, -1.0)]).is_err());
    }

    #[test]
    fn test_draw_is_seeded() {
        let pool = WeightedPool::uniform(0..10).unwrap();
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(3);
            (0..20).map(|_| pool.draw(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(3);
            (0..20).map(|_| pool.draw(&mut rng)).collect()
        };
        assert_eq!(a, b);
        assert_eq!(pool.len(), 10);
    }
}
