//! Parallel batched octree queries.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use crate::geometry::Query;
#[cfg(feature = "parallel")]
use crate::spatial::Octree;

#[cfg(feature = "parallel")]
impl Octree {
    /// Answer a batch of queries across the available worker threads,
    /// one result list per query in input order.
    ///
    /// The octree is only read; each worker owns exactly one output
    /// slot, so no synchronization happens beyond the fan-out/fan-in.
    pub fn query_many(&self, queries: &[Query]) -> Vec<Vec<usize>> {
        queries.par_iter().map(|query| self.query(query)).collect()
    }
}
