//! 共享图
//!
//! 图本身不做内部同步。需要跨线程共享时，用读写锁包裹：
//! 算法只需读锁，可以并发执行；增删顶点和边需要写锁，与算法互斥。

use super::graph::Graph;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

pub struct SharedGraph<V = (), E = ()> {
    inner: Arc<RwLock<Graph<V, E>>>,
}

impl<V, E> SharedGraph<V, E> {
    pub fn new(graph: Graph<V, E>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// 获取读锁
    pub fn read(&self) -> RwLockReadGuard<'_, Graph<V, E>> {
        self.inner.read()
    }

    /// 获取写锁
    pub fn write(&self) -> RwLockWriteGuard<'_, Graph<V, E>> {
        self.inner.write()
    }

    /// 在读锁内执行
    pub fn with_read<R>(&self, f: impl FnOnce(&Graph<V, E>) -> R) -> R {
        f(&self.inner.read())
    }

    /// 在写锁内执行
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Graph<V, E>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// 取回图；仍有其他句柄时返回自身
    pub fn try_unwrap(self) -> Result<Graph<V, E>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<V, E> Clone for SharedGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> From<Graph<V, E>> for SharedGraph<V, E> {
    fn from(graph: Graph<V, E>) -> Self {
        Self::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::shortest_paths;
    use crate::graph::{Vertex, VertexId};
    use std::thread;

    #[test]
    fn test_concurrent_readers_single_writer() {
        let mut graph: Graph = Graph::new();
        for i in 0..4 {
            graph.add_vertex(Vertex::new(VertexId::new(i), ())).unwrap();
        }
        for i in 1..4 {
            graph
                .connect_vertices(VertexId::new(i - 1), VertexId::new(i))
                .unwrap();
        }
        let shared = SharedGraph::new(graph);

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = shared.clone();
                thread::spawn(move || {
                    handle.with_read(|g| {
                        shortest_paths(g, VertexId::new(0))
                            .unwrap()
                            .distance_to(VertexId::new(3))
                    })
                })
            })
            .collect();
        for reader in readers {
            assert_eq!(reader.join().unwrap(), 3.0);
        }

        shared.with_write(|g| g.remove_vertex(VertexId::new(3)));
        assert_eq!(shared.read().vertex_count(), 3);

        let graph = shared.try_unwrap().ok().unwrap();
        assert_eq!(graph.edge_count(), 2);
    }
}
