//! Id minting for new sections and entries.
//!
//! New ids come from the wall clock in milliseconds, bumped so a source never
//! repeats itself even when two ids are minted within the same millisecond.
//! The clock alone cannot rule out a clash with ids that came in from a seed,
//! so [`mint_unique`] re-mints until the candidate is free.

use crate::model::Id;

/// A source of integer tokens, strictly increasing per source.
pub trait IdSource {
    fn next_token(&mut self) -> i64;
}

/// Tokens from the current time, as Unix milliseconds.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: i64,
}

impl IdSource for ClockIds {
    fn next_token(&mut self) -> i64 {
        let now = jiff::Timestamp::now().as_millisecond();
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// Deterministic tokens counting up from a starting value.
#[derive(Debug)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    pub fn starting_at(next: i64) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIds {
    fn next_token(&mut self) -> i64 {
        let token = self.next;
        self.next += 1;
        token
    }
}

/// Mint an id not rejected by `taken`.
///
/// With a prefix the id reads `<prefix>-<token>` (sections use `section`);
/// without one it is the bare token (entries).
pub fn mint_unique(
    source: &mut dyn IdSource,
    prefix: Option<&str>,
    taken: impl Fn(&Id) -> bool,
) -> Id {
    loop {
        let token = source.next_token();
        let candidate = match prefix {
            Some(p) => Id::new(format!("{p}-{token}")),
            None => Id::new(token.to_string()),
        };
        if !taken(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ids_are_strictly_increasing() {
        let mut ids = ClockIds::default();
        let first = ids.next_token();
        let second = ids.next_token();
        let third = ids.next_token();
        assert!(first < second && second < third);
    }

    #[test]
    fn mint_skips_taken_candidates() {
        let mut ids = SequentialIds::starting_at(1);
        let taken = [Id::new("section-1"), Id::new("section-2")];
        let id = mint_unique(&mut ids, Some("section"), |c| taken.contains(c));
        assert_eq!(id, Id::new("section-3"));
    }

    #[test]
    fn mint_without_prefix_is_bare_token() {
        let mut ids = SequentialIds::starting_at(40);
        assert_eq!(mint_unique(&mut ids, None, |_| false), Id::new("40"));
    }
}
