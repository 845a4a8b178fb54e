//! Pluggable phrase generator for default engine messages (the "that did
//! nothing" / "you can't go that way" stock lines a blueprint may want to
//! vary instead of always emitting the same sentence).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct Messenger {
    pool: Vec<(&'static str, Vec<String>)>,
    rng: StdRng,
}

impl Messenger {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            pool: default_pool(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn register(&mut self, key: &'static str, phrases: Vec<String>) {
        if let Some(entry) = self.pool.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = phrases;
        } else {
            self.pool.push((key, phrases));
        }
    }

    /// Picks one phrase for `key` at random, falling back to `key` itself
    /// (unmodified) if nothing was registered -- a missing phrase pool is a
    /// content gap, not a reason to panic.
    pub fn phrase(&mut self, key: &str) -> String {
        self.pool
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, phrases)| phrases.choose(&mut self.rng))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn default_pool() -> Vec<(&'static str, Vec<String>)> {
    vec![
        ("nothing_happens", vec!["Nothing happens.".to_string()]),
        ("cant_go_that_way", vec!["You can't go that way.".to_string()]),
        ("ok", vec!["OK.".to_string(), "Done.".to_string()]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_key_falls_back_to_itself() {
        let mut messenger = Messenger::new(1);
        assert_eq!(messenger.phrase("some_unknown_key"), "some_unknown_key");
    }

    #[test]
    fn registered_key_picks_from_its_pool() {
        let mut messenger = Messenger::new(1);
        messenger.register("shrug", vec!["Eh.".to_string()]);
        assert_eq!(messenger.phrase("shrug"), "Eh.");
    }

    #[test]
    fn default_pool_resolves_ok() {
        let mut messenger = Messenger::new(42);
        assert!(["OK.", "Done."].contains(&messenger.phrase("ok").as_str()));
    }
}
