//! Per-font sequence numbers, so repeated fonts still get distinct test names

use std::collections::HashMap;

/// Hands out 1, 2, 3... per key, in the order cases are seen.
///
/// Lives for one output target of one run; nothing is persisted.
#[derive(Debug, Default)]
pub struct Disambiguator {
    next: HashMap<String, u32>,
}

impl Disambiguator {
    pub fn new() -> Disambiguator {
        Default::default()
    }

    /// The counter for this occurrence of `key`.
    pub fn assign(&mut self, key: &str) -> u32 {
        let next = self.next.entry(key.to_string()).or_insert(1);
        let assigned = *next;
        *next += 1;
        assigned
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Disambiguator;

    #[test]
    fn counters_are_per_key() {
        let mut counters = Disambiguator::new();
        let assigned: Vec<_> = ["A.ttf", "B.otf", "A.ttf", "C.ttf", "B.otf", "A.ttf"]
            .into_iter()
            .map(|key| counters.assign(key))
            .collect();
        assert_eq!(vec![1, 1, 2, 1, 2, 3], assigned);
    }

    #[test]
    fn keys_are_not_folded() {
        let mut counters = Disambiguator::new();
        assert_eq!(1, counters.assign("A.ttf"));
        assert_eq!(1, counters.assign("A.otf"));
        assert_eq!(1, counters.assign("a.ttf"));
    }
}
