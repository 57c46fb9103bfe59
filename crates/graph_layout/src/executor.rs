use rayon::prelude::*;

/// Runs a closure once per node slot
///
/// Each call gets exclusive access to one slot, so implementations are free to
/// run calls concurrently. All calls have completed when `for_each_node`
/// returns.
pub trait NodeExecutor {
    fn for_each_node<T, F>(&self, slots: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync;
}

/// Runs on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequential;

impl NodeExecutor for Sequential {
    fn for_each_node<T, F>(&self, slots: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        for (index, slot) in slots.iter_mut().enumerate() {
            f(index, slot);
        }
    }
}

/// Runs on the rayon global thread pool
#[derive(Debug, Default, Clone, Copy)]
pub struct Parallel;

impl NodeExecutor for Parallel {
    fn for_each_node<T, F>(&self, slots: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        slots
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, slot)| f(index, slot));
    }
}

/// Sequential below `threshold` slots, parallel from there on
#[derive(Debug, Clone, Copy)]
pub struct Adaptive {
    pub threshold: usize,
}

impl Default for Adaptive {
    fn default() -> Self {
        Self { threshold: 64 }
    }
}

impl NodeExecutor for Adaptive {
    fn for_each_node<T, F>(&self, slots: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        if slots.len() < self.threshold {
            Sequential.for_each_node(slots, f);
        } else {
            Parallel.for_each_node(slots, f);
        }
    }
}
