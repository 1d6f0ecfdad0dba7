//! Fixed-capacity particle storage
//!
//! All slots are allocated when the pool is created and reused through
//! their `alive` flag; the pool never grows.
//!
//! ```text
//! ParticlePool
//!   [0] alive ─┐
//!   [1] free   │ claim() scans from slot 0
//!   [2] alive  │ for the first free slot
//!   [3] free ◄─┘
//! ```

use super::particle::Particle;

/// Slots in a default pool
pub const MAX_PARTICLES: usize = 700;

/// Pre-allocated particle slots
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    live: usize,
}

impl ParticlePool {
    /// Pool with [`MAX_PARTICLES`] slots
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }

    /// Pool with a fixed number of slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            live: 0,
        }
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of free slots
    pub fn free_count(&self) -> usize {
        self.capacity() - self.live
    }

    /// Whether every slot is in use
    pub fn is_full(&self) -> bool {
        self.live >= self.capacity()
    }

    /// Claim the first free slot, reset to defaults and marked alive
    ///
    /// Returns `None` when the pool is full.
    pub fn claim(&mut self) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }

        let slot = self.slots.iter_mut().find(|p| !p.alive)?;
        *slot = Particle {
            alive: true,
            ..Particle::default()
        };
        self.live += 1;
        Some(slot)
    }

    /// Free the slot at `index`; returns whether it was live
    pub fn release(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(particle) if particle.alive => {
                particle.alive = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Free every slot
    pub fn reset(&mut self) {
        for particle in &mut self.slots {
            particle.alive = false;
        }
        self.live = 0;
        log::debug!("Particle pool reset ({} slots)", self.capacity());
    }

    /// Particle at `index`, live or not
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index)
    }

    /// Mutable particle at `index`, live or not
    ///
    /// Toggling `alive` through this reference bypasses the live count; use
    /// [`ParticlePool::release`] instead.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots.get_mut(index)
    }

    /// Live particles in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.alive)
    }

    /// Slot indices of live particles
    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().enumerate().filter(|(_, p)| p.alive).map(|(i, _)| i)
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_until_full() {
        let mut pool = ParticlePool::with_capacity(3);
        for _ in 0..3 {
            assert!(pool.claim().is_some());
        }
        assert!(pool.is_full());
        assert!(pool.claim().is_none());
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn test_claim_reuses_lowest_free_slot() {
        let mut pool = ParticlePool::with_capacity(4);
        for _ in 0..4 {
            pool.claim().unwrap().scale = 0.25;
        }
        assert!(pool.release(1));
        assert!(pool.release(3));
        assert!(!pool.release(3));

        pool.claim().unwrap();
        let live: Vec<_> = pool.live_indices().collect();
        assert_eq!(live, vec![0, 1, 2]);
        // reclaimed slot starts fresh
        assert_eq!(pool.get(1).unwrap().scale, 1.0);
    }

    #[test]
    fn test_reset_frees_everything() {
        let mut pool = ParticlePool::new();
        assert_eq!(pool.capacity(), MAX_PARTICLES);
        pool.claim();
        pool.claim();
        pool.reset();

        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.free_count(), MAX_PARTICLES);
        assert_eq!(pool.iter_live().count(), 0);
    }
}
