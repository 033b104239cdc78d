//! Recycling pools for bullets and drop items.
//!
//! Despawned components are handed back here and reused by the next spawn,
//! so steady-state play allocates nothing per frame. A pool never refuses a
//! request: when it runs dry it builds a fresh instance.

/// Cache of reusable component instances.
#[derive(Debug)]
pub struct Pool<T> {
    name: &'static str,
    free: Vec<T>,
    /// Instances ever created by this pool.
    allocated: usize,
}

impl<T: Default> Pool<T> {
    /// A pool pre-filled with `capacity` ready instances.
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            free: (0..capacity).map(|_| T::default()).collect(),
            allocated: capacity,
        }
    }

    /// Take an instance, allocating a new one if none are free.
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(item) => item,
            None => {
                self.allocated += 1;
                tracing::debug!(pool = self.name, allocated = self.allocated, "pool grew");
                T::default()
            }
        }
    }

    /// Return an instance for reuse.
    pub fn release(&mut self, item: T) {
        self.free.push(item);
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Instances currently checked out.
    pub fn in_use(&self) -> usize {
        self.allocated - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_allocates() {
        let mut pool: Pool<Vec<u32>> = Pool::with_capacity("test", 0);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.in_use(), 2);
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_released_instance_is_reused() {
        let mut pool: Pool<Vec<u32>> = Pool::with_capacity("test", 1);
        let mut v = pool.acquire();
        v.reserve(64);
        let cap = v.capacity();
        pool.release(v);
        let again = pool.acquire();
        assert_eq!(again.capacity(), cap);
        assert_eq!(pool.allocated(), 1);
    }
}
