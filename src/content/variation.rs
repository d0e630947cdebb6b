//! Deterministic phrase selection.
//!
//! A seed string is hashed into a 32-bit state which drives an integer-only
//! pseudo-random stream. The exact formula is fixed so any implementation,
//! in any language, selects the same phrases:
//!
//! ```text
//! hash  = 0
//! for each Unicode scalar value c of the seed:
//!     hash = (hash * 31 + c) mod 2^32
//!
//! next():                                   (Mulberry32)
//!     state = (state + 0x6D2B79F5) mod 2^32
//!     t = (state ^ (state >> 15)) * (state | 1)      mod 2^32
//!     t = t ^ (t + (t ^ (t >> 7)) * (t | 61))        mod 2^32
//!     return t ^ (t >> 14)
//!
//! index(len) = floor(next() * len / 2^32)
//! ```
//!
//! `index(len)` equals `floor(u * len)` for `u = next() / 2^32` in [0, 1),
//! computed without floating point. This is not a cryptographic generator.

/// Rolling hash of a seed string
pub fn seed_hash(seed: &str) -> u32 {
    seed.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32))
}

/// Repeatable pseudo-random stream derived from a seed string
#[derive(Debug, Clone)]
pub struct SeededStream {
    state: u32,
}

impl SeededStream {
    pub fn new(seed: &str) -> Self {
        Self {
            state: seed_hash(seed),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Next index in `0..len`; `len` must be non-zero
    pub fn next_index(&mut self, len: usize) -> usize {
        ((u64::from(self.next_u32()) * len as u64) >> 32) as usize
    }
}

/// Index selected for a pool of `len` entries.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn pick_index(len: usize, seed: &str) -> usize {
    assert!(len > 0, "cannot pick from an empty pool (seed '{}')", seed);
    SeededStream::new(seed).next_index(len)
}

/// Select one entry of `pool` for `seed`. The same pair always yields the
/// same entry.
///
/// # Panics
///
/// Panics if `pool` is empty.
pub fn pick<'p, T>(pool: &'p [T], seed: &str) -> &'p T {
    &pool[pick_index(pool.len(), seed)]
}

/// Select up to `n` distinct entries in seeded order (partial Fisher-Yates).
///
/// # Panics
///
/// Panics if `pool` is empty.
pub fn pick_distinct<'p, T>(pool: &'p [T], seed: &str, n: usize) -> Vec<&'p T> {
    assert!(!pool.is_empty(), "cannot pick from an empty pool (seed '{}')", seed);

    let mut stream = SeededStream::new(seed);
    let mut order: Vec<usize> = (0..pool.len()).collect();
    let take = n.min(pool.len());
    for i in 0..take {
        let j = i + stream.next_index(pool.len() - i);
        order.swap(i, j);
    }
    order[..take].iter().map(|&idx| &pool[idx]).collect()
}

/// Page-level seed from which per-slot seeds are derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSeed {
    base: String,
}

impl PageSeed {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Composite seed `{base}-{tag}` for one text slot
    pub fn slot(&self, tag: &str) -> String {
        format!("{}-{}", self.base, tag)
    }

    pub fn pick<'p, T>(&self, pool: &'p [T], tag: &str) -> &'p T {
        pick(pool, &self.slot(tag))
    }

    pub fn pick_distinct<'p, T>(&self, pool: &'p [T], tag: &str, n: usize) -> Vec<&'p T> {
        pick_distinct(pool, &self.slot(tag), n)
    }
}

/// Replace `{token}` placeholders with values in one pass.
///
/// Substituted values are not scanned again. Unknown tokens and unbalanced
/// braces are kept verbatim.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        if name.contains('{') {
            out.push('{');
            rest = after;
            continue;
        }

        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const POOL: [&str; 5] = ["eins", "zwei", "drei", "vier", "fünf"];

    #[test]
    fn test_seed_hash_fixed_values() {
        assert_eq!(seed_hash(""), 0);
        assert_eq!(seed_hash("a"), 97);
        assert_eq!(seed_hash("ab"), 97 * 31 + 98);
        // wraps instead of overflowing
        let long = "x".repeat(1000);
        let _ = seed_hash(&long);
    }

    #[test]
    fn test_stream_reference_value() {
        // Mulberry32 with state 0: first output 0x6D2B79F5 mixed
        let mut stream = SeededStream { state: 0 };
        let first = stream.next_u32();
        let s: u32 = 0x6D2B_79F5;
        let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        assert_eq!(first, t ^ (t >> 14));
        assert_ne!(stream.next_u32(), first);
    }

    #[test]
    fn test_pick_is_deterministic() {
        let first = pick(&POOL, "scheibenwechsel-berlin-intro");
        for _ in 0..1000 {
            assert_eq!(pick(&POOL, "scheibenwechsel-berlin-intro"), first);
        }
    }

    #[test]
    fn test_pick_spreads_across_seeds() {
        let picked: HashSet<&str> = (0..50)
            .map(|i| *pick(&POOL, &format!("stadt-{}", i)))
            .collect();
        assert!(picked.len() >= 2);
    }

    #[test]
    fn test_purpose_tags_decorrelate() {
        let differing = (0..100)
            .filter(|i| {
                let page = PageSeed::new(format!("scheibenwechsel-ort-{}", i));
                page.pick(&POOL, "faq1") != page.pick(&POOL, "faq2")
            })
            .count();
        assert!(differing >= 30, "only {} of 100 pages differ", differing);
    }

    #[test]
    fn test_next_f64_range() {
        let mut stream = SeededStream::new("range");
        for _ in 0..1000 {
            let x = stream.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_next_index_matches_float_floor() {
        let mut a = SeededStream::new("floor");
        let mut b = a.clone();
        for len in 1..200 {
            let idx = a.next_index(len);
            let u = b.next_f64();
            assert_eq!(idx, (u * len as f64).floor() as usize);
        }
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn test_pick_empty_pool_panics() {
        let empty: [&str; 0] = [];
        pick(&empty, "seed");
    }

    #[test]
    fn test_pick_distinct() {
        let chosen = pick_distinct(&POOL, "faq", 3);
        assert_eq!(chosen.len(), 3);
        let unique: HashSet<_> = chosen.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(pick_distinct(&POOL, "faq", 3), chosen);

        let all = pick_distinct(&POOL, "faq", 10);
        assert_eq!(all.len(), POOL.len());
    }

    #[test]
    fn test_page_seed_slot() {
        let seed = PageSeed::new("scheibenwechsel-berlin");
        assert_eq!(seed.slot("faq1"), "scheibenwechsel-berlin-faq1");
        assert_eq!(seed.as_str(), "scheibenwechsel-berlin");
    }

    #[test]
    fn test_substitute() {
        let values = [("service", "Scheibenwechsel"), ("city", "Berlin")];
        assert_eq!(
            substitute("{service} in {city}", &values),
            "Scheibenwechsel in Berlin"
        );
        assert_eq!(substitute("{city}, {city}!", &values), "Berlin, Berlin!");
    }

    #[test]
    fn test_substitute_unknown_and_unbalanced() {
        let values = [("city", "Berlin")];
        assert_eq!(substitute("{unknown} {city}", &values), "{unknown} Berlin");
        assert_eq!(substitute("offen {city", &values), "offen {city");
        assert_eq!(substitute("{a{city}", &values), "{aBerlin");
        assert_eq!(substitute("keine Platzhalter", &values), "keine Platzhalter");
        assert_eq!(substitute("{}", &values), "{}");
    }

    #[test]
    fn test_substitute_is_not_recursive() {
        let values = [("a", "{b}"), ("b", "x")];
        assert_eq!(substitute("{a}", &values), "{b}");
    }
}
