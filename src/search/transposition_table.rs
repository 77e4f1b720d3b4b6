//! Bounded transposition cache with least-recently-used eviction.
//!
//! Entries live in a slot vector threaded by an index-linked recency list, so
//! insert, lookup and eviction are all O(1). A table is owned by exactly one
//! search call and dropped with it.
//!
//! Recency is driven by insertion by default: a lookup hit does not move the
//! entry, which makes eviction order first-in first-out for keys that are
//! never re-stored. `RecencyPolicy::RefreshOnHit` turns this into true LRU.

use std::collections::HashMap;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub score: i32,
    pub depth: u8,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecencyPolicy {
    /// Only stores move a key to the most-recent end.
    #[default]
    InsertionOrder,
    /// Usable lookup hits also move the key to the most-recent end.
    RefreshOnHit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries, `None` for unbounded.
    pub capacity: Option<usize>,
    pub recency: RecencyPolicy,
    /// Keep an existing entry when a shallower result for the same key
    /// arrives. Off by default: stores overwrite unconditionally.
    pub depth_preferred: bool,
}

/// Result of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The stored score settles the node.
    Hit(i32),
    /// Keep searching with the (possibly narrowed) window.
    Miss { alpha: i32, beta: i32 },
}

#[derive(Debug, Clone)]
struct Slot {
    key: u64,
    entry: TTEntry,
    prev: usize,
    next: usize,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    index: HashMap<u64, usize>,
    slots: Vec<Slot>,
    // most recent
    head: usize,
    // least recent, next eviction victim
    tail: usize,
    config: CacheConfig,
    stats: TTStats,
}

impl TranspositionTable {
    const INITIAL_SLOTS: usize = 1 << 14;

    pub fn new(config: CacheConfig) -> Self {
        let reserve = config
            .capacity
            .map_or(Self::INITIAL_SLOTS, |c| c.min(Self::INITIAL_SLOTS));
        Self {
            index: HashMap::with_capacity(reserve),
            slots: Vec::with_capacity(reserve),
            head: NIL,
            tail: NIL,
            config,
            stats: TTStats::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig {
            capacity: Some(capacity),
            ..CacheConfig::default()
        })
    }

    pub fn unbounded() -> Self {
        Self::new(CacheConfig::default())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.config.capacity
    }

    #[inline]
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        self.index.contains_key(&key)
    }

    /// Read an entry without touching stats or recency.
    #[inline]
    pub fn get(&self, key: u64) -> Option<TTEntry> {
        self.index.get(&key).map(|&i| self.slots[i].entry)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.stats = TTStats::default();
    }

    /// Look up `key` for a search of `depth` plies inside `(alpha, beta)`.
    ///
    /// Entries computed at a shallower depth are ignored.
    pub fn probe(&mut self, key: u64, depth: u8, mut alpha: i32, mut beta: i32) -> Probe {
        self.stats.probes += 1;

        let Some(&slot) = self.index.get(&key) else {
            return Probe::Miss { alpha, beta };
        };
        let entry = self.slots[slot].entry;
        if entry.depth < depth {
            return Probe::Miss { alpha, beta };
        }

        self.stats.hits += 1;
        if self.config.recency == RecencyPolicy::RefreshOnHit {
            self.touch(slot);
        }

        match entry.bound {
            Bound::Exact => return Probe::Hit(entry.score),
            Bound::Lower => alpha = alpha.max(entry.score),
            Bound::Upper => beta = beta.min(entry.score),
        }

        if alpha >= beta {
            Probe::Hit(entry.score)
        } else {
            Probe::Miss { alpha, beta }
        }
    }

    /// Record `score` searched to `depth` with the window the node was
    /// entered with.
    pub fn store(&mut self, key: u64, alpha_orig: i32, beta: i32, score: i32, depth: u8) {
        let entry = TTEntry {
            score,
            depth,
            bound: classify(score, alpha_orig, beta),
        };
        self.insert(key, entry);
    }

    /// Insert a ready-made entry, evicting the least recent key at capacity.
    pub fn insert(&mut self, key: u64, entry: TTEntry) {
        if self.config.capacity == Some(0) {
            return;
        }
        self.stats.stores += 1;

        if let Some(&slot) = self.index.get(&key) {
            if self.config.depth_preferred && self.slots[slot].entry.depth > entry.depth {
                return;
            }
            self.slots[slot].entry = entry;
            self.touch(slot);
            return;
        }

        let at_capacity = self
            .config
            .capacity
            .is_some_and(|capacity| self.index.len() >= capacity);

        let slot = if at_capacity {
            let victim = self.tail;
            self.unlink(victim);
            self.index.remove(&self.slots[victim].key);
            self.stats.evictions += 1;
            self.slots[victim].key = key;
            self.slots[victim].entry = entry;
            victim
        } else {
            self.slots.push(Slot {
                key,
                entry,
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        };

        self.index.insert(key, slot);
        self.push_front(slot);
    }

    /// Keys from most to least recent.
    pub fn keys_by_recency(&self) -> Vec<u64> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while cursor != NIL {
            keys.push(self.slots[cursor].key);
            cursor = self.slots[cursor].next;
        }
        keys
    }

    #[inline]
    fn touch(&mut self, slot: usize) {
        if self.head != slot {
            self.unlink(slot);
            self.push_front(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.slots[slot].prev = NIL;
        self.slots[slot].next = NIL;
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
    }
}

/// Bound type of `score` for a node entered with `(alpha_orig, beta)`.
#[inline]
pub fn classify(score: i32, alpha_orig: i32, beta: i32) -> Bound {
    if score <= alpha_orig {
        Bound::Upper
    } else if score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    }
}
