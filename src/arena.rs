//! Append-only bump allocator for transient per-query and per-build data
//! (§4, component K).
//!
//! Backs short-lived strings and small records (in-flight postings during
//! a build, scratch term-info lists during a query) that all die together
//! at a single well-known point — end of build flush, end of query. An
//! [`Arena`] never frees individual allocations; dropping it releases
//! everything en bloc, matching the "thread-local, released en bloc"
//! resource policy in §5.

use std::cell::RefCell;

pub struct Arena {
    chunks: RefCell<Vec<Vec<u8>>>,
    strings: RefCell<Vec<String>>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            chunks: RefCell::new(Vec::new()),
            strings: RefCell::new(Vec::new()),
        }
    }

    /// Bump-allocate `bytes` into the arena and return its index for later
    /// retrieval via [`Self::chunk`].
    pub fn alloc_bytes(&self, bytes: &[u8]) -> usize {
        let mut chunks = self.chunks.borrow_mut();
        chunks.push(bytes.to_vec());
        chunks.len() - 1
    }

    pub fn chunk(&self, id: usize) -> Vec<u8> {
        self.chunks.borrow()[id].clone()
    }

    /// Intern a transient string, returning its index for later retrieval
    /// via [`Self::string`].
    pub fn alloc_string(&self, value: &str) -> usize {
        let mut strings = self.strings.borrow_mut();
        strings.push(value.to_string());
        strings.len() - 1
    }

    pub fn string(&self, id: usize) -> String {
        self.strings.borrow()[id].clone()
    }

    pub fn bytes_allocated(&self) -> usize {
        self.chunks.borrow().iter().map(Vec::len).sum::<usize>()
            + self.strings.borrow().iter().map(String::len).sum::<usize>()
    }

    /// Release every allocation at once (end of build flush, end of query).
    pub fn reset(&self) {
        self.chunks.borrow_mut().clear();
        self.strings.borrow_mut().clear();
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    /// One arena per thread, matching the single-threaded-cooperative
    /// scheduling model of §5: one build, or one query, runs per thread.
    static THREAD_ARENA: Arena = Arena::new();
}

/// Run `f` with access to the current thread's arena.
pub fn with_arena<F, R>(f: F) -> R
where
    F: FnOnce(&Arena) -> R,
{
    THREAD_ARENA.with(f)
}

/// Release the current thread's arena (end of build or query).
pub fn reset_arena() {
    THREAD_ARENA.with(Arena::reset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_retrieve_roundtrip() {
        let arena = Arena::new();
        let id = arena.alloc_bytes(b"hello");
        assert_eq!(arena.chunk(id), b"hello");
        let sid = arena.alloc_string("world");
        assert_eq!(arena.string(sid), "world");
    }

    #[test]
    fn reset_releases_everything_en_bloc() {
        let arena = Arena::new();
        arena.alloc_bytes(b"data");
        arena.alloc_string("more");
        assert!(arena.bytes_allocated() > 0);
        arena.reset();
        assert_eq!(arena.bytes_allocated(), 0);
    }

    #[test]
    fn thread_local_arena_is_reachable() {
        with_arena(|arena| {
            arena.alloc_string("scoped");
        });
        reset_arena();
    }
}
