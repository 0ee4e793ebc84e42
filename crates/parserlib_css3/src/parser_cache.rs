//! Reuse of parse results for unchanged rules
//!
//! While parsing, every top level style rule is recorded as a block: the source text it spans
//! and the events fired for it. When a later parse (a new *generation*) reaches a position whose
//! text up to the next `{` is the key of a recorded block, and the whole recorded text is found
//! again at that position, the recorded events are shifted to the new position and replayed
//! instead of parsing the rule again.

use crate::events::ParseEvent;
use crate::parser_config::CacheConfig;
use itertools::Itertools;
use parserlib_shared::location::{Location, PositionDelta, ShiftPosition};
use std::collections::HashMap;
use std::time::Instant;

/// A parsed block and the events fired while parsing it
#[derive(Clone, Debug)]
pub struct CachedBlock {
    /// Source text of the whole block, from its first selector through the closing `}`
    pub text: String,
    pub events: Vec<ParseEvent>,
    /// Generation the block was parsed or last reused in
    pub generation: u64,
    /// When that generation started
    pub used: Instant,
    pub start: Location,
    pub end: Location,
}

impl CachedBlock {
    fn new(start: Location, generation: u64, used: Instant) -> Self {
        Self {
            text: String::new(),
            events: Vec::new(),
            generation,
            used,
            start,
            end: start,
        }
    }

    /// Whether a diagnostic at `loc` lies inside the block
    fn covers(&self, loc: &Location) -> bool {
        !loc.is_before(&self.start) && !self.end.is_before(loc)
    }

    fn shift_to(&mut self, to: Location) {
        let delta = PositionDelta::between(self.start, to);
        if !delta.is_empty() {
            self.events.shift_position(&delta);
            self.start.shift_position(&delta);
            self.end.shift_position(&delta);
        }
    }
}

/// Text from `start` up to and including the next `{`
fn block_key(source: &str, start: usize) -> Option<&str> {
    let rest = source.get(start..)?;
    let brace = rest.find('{')?;
    rest.get(..=brace)
}

/// Counters of a cache, mainly for reporting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Blocks of earlier parses, keyed by the text before their opening brace
pub struct ParseCache {
    config: CacheConfig,
    blocks: HashMap<String, Vec<CachedBlock>>,
    /// Blocks that are being parsed right now
    stack: Vec<CachedBlock>,
    /// Counts the parses since creation or the last reset
    generation: u64,
    /// Start of the current generation
    started: Instant,
    last_trim: Option<Instant>,
    stats: CacheStats,
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ParseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            blocks: HashMap::new(),
            stack: Vec::new(),
            generation: 0,
            started: Instant::now(),
            last_trim: None,
            stats: CacheStats::default(),
        }
    }

    /// Forgets everything, for switching to an unrelated document
    pub fn reset(&mut self) {
        log::debug!("parse cache reset ({} keys)", self.blocks.len());
        self.blocks.clear();
        self.stack.clear();
        self.generation = 0;
        self.last_trim = None;
        self.stats = CacheStats::default();
    }

    /// Starts a new generation. Called by the parser before each parse.
    pub fn start(&mut self) {
        self.stack.clear();
        self.generation += 1;
        self.started = Instant::now();
        let due = self
            .last_trim
            .map_or(true, |t| self.started.duration_since(t) >= self.config.trim_delay);
        if due {
            self.trim();
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of stored blocks
    pub fn len(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Looks for a stored block at `at`. On a hit the block is moved to `at` and its events and
    /// end position are returned; the events still have to be fired.
    pub fn find_block(&mut self, source: &str, at: Location) -> Option<(Vec<ParseEvent>, Location)> {
        let key = block_key(source, at.offset)?;
        let Some(candidates) = self.blocks.get_mut(key) else {
            self.stats.misses += 1;
            return None;
        };

        let generation = self.generation;
        let span = generation.max(1) as f64;
        let len = source.len().max(1) as f64;
        let score = |b: &CachedBlock| {
            let age = generation.saturating_sub(b.generation) as f64 / span;
            let drift = b.start.offset.abs_diff(at.offset) as f64 / len;
            age + drift
        };

        // newest and closest first
        let ranked = candidates
            .iter()
            .enumerate()
            .filter(|(_, b)| source.get(at.offset..at.offset + b.text.len()) == Some(b.text.as_str()))
            .sorted_by(|(_, a), (_, b)| score(a).total_cmp(&score(b)))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        let Some(&best) = ranked.first() else {
            self.stats.misses += 1;
            return None;
        };
        // a block already used in this generation stays where it is, a copy is moved instead
        let index = match ranked.iter().find(|&&i| candidates[i].generation != generation) {
            Some(&i) => i,
            None => {
                let copy = candidates[best].clone();
                candidates.push(copy);
                candidates.len() - 1
            }
        };

        let block = &mut candidates[index];
        block.shift_to(at);
        block.generation = generation;
        block.used = self.started;
        self.stats.hits += 1;
        log::debug!("parse cache hit at {} ({} events)", at, block.events.len());
        Some((block.events.clone(), block.end))
    }

    /// Opens a block starting at `start`. Returns an id for `cancel_block`.
    pub fn start_block(&mut self, start: Location) -> usize {
        self.stack.push(CachedBlock::new(start, self.generation, self.started));
        self.stack.len()
    }

    /// Closes the innermost block at `end` (just after its `}`) and stores it
    pub fn end_block(&mut self, source: &str, end: Location) {
        let Some(mut block) = self.stack.pop() else {
            return;
        };
        let (Some(key), Some(text)) = (
            block_key(source, block.start.offset),
            source.get(block.start.offset..end.offset),
        ) else {
            return;
        };
        block.end = end;
        block.text = text.to_string();
        self.blocks.entry(key.to_string()).or_default().push(block);
    }

    /// Drops the block with the given id if it is still open
    pub fn cancel_block(&mut self, id: usize) {
        if id == self.stack.len() {
            self.stack.pop();
        }
    }

    /// Records an event for the innermost open block it belongs to
    pub fn add_event(&mut self, event: &ParseEvent) {
        if let Some(block) = self
            .stack
            .iter_mut()
            .rev()
            .find(|b| event.location.offset >= b.start.offset)
        {
            block.events.push(event.clone());
        }
    }

    /// Takes the positions of the diagnostics found by the latest parse and strips the events of
    /// blocks of this generation that had none. Such blocks keep their position, but replaying
    /// them fires nothing.
    pub fn feedback(&mut self, diagnostics: &[Location]) {
        let mut remaining = diagnostics.to_vec();
        let mut stripped = 0;
        for block in self.blocks.values_mut().flatten() {
            if block.events.is_empty() || block.generation != self.generation {
                continue;
            }
            let before = remaining.len();
            remaining.retain(|loc| !block.covers(loc));
            if remaining.len() == before {
                block.events.clear();
                stripped += 1;
            }
        }
        log::debug!("parse cache feedback: {} clean blocks stripped", stripped);
    }

    /// Drops blocks older than the maximum age, and the older half of the blocks of earlier
    /// generations that share a key
    pub fn trim(&mut self) {
        let now = Instant::now();
        let generation = self.generation;
        let max_age = self.config.max_age;
        let before = self.len();

        self.blocks.retain(|_, blocks| {
            blocks.retain(|b| now.duration_since(b.used) < max_age);
            let (current, older): (Vec<_>, Vec<_>) =
                blocks.drain(..).partition(|b| b.generation == generation);
            let keep = older.len().div_ceil(2);
            blocks.extend(older.into_iter().sorted_by(|a, b| b.generation.cmp(&a.generation)).take(keep));
            blocks.extend(current);
            !blocks.is_empty()
        });

        self.last_trim = Some(now);
        log::debug!("parse cache trimmed from {} to {} blocks", before, self.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::time::Duration;

    fn event(loc: Location) -> ParseEvent {
        ParseEvent::new(EventKind::Warning { message: "w".into() }, loc)
    }

    fn record(cache: &mut ParseCache, source: &str, start: Location, end: Location) {
        cache.start_block(start);
        cache.add_event(&event(start));
        cache.end_block(source, end);
    }

    #[test]
    fn keys() {
        assert_eq!(block_key("a{} b {x}", 4), Some("b {"));
        assert_eq!(block_key("a", 0), None);
    }

    #[test]
    fn hit_after_moving() {
        let mut cache = ParseCache::default();
        cache.start();
        record(&mut cache, "a{x}", Location::new(1, 1, 0), Location::new(1, 5, 4));
        assert_eq!(cache.len(), 1);

        cache.start();
        let source = "b{}\na{x}";
        let (events, end) = cache.find_block(source, Location::new(2, 1, 4)).unwrap();
        assert_eq!(end, Location::new(2, 5, 8));
        assert_eq!(events[0].location, Location::new(2, 1, 4));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 0 });

        // the key matches but the body changed
        assert!(cache.find_block("a{y}", Location::new(1, 1, 0)).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn reuse_within_a_generation_copies() {
        let mut cache = ParseCache::default();
        cache.start();
        record(&mut cache, "a{}", Location::new(1, 1, 0), Location::new(1, 4, 3));

        cache.start();
        let source = "a{}a{}";
        assert!(cache.find_block(source, Location::new(1, 1, 0)).is_some());
        let (events, _) = cache.find_block(source, Location::new(1, 4, 3)).unwrap();
        assert_eq!(events[0].location.offset, 3);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cancelled_blocks_are_not_stored() {
        let mut cache = ParseCache::default();
        cache.start();
        let id = cache.start_block(Location::default());
        cache.cancel_block(id);
        cache.end_block("a{}", Location::new(1, 4, 3));
        assert!(cache.is_empty());
    }

    #[test]
    fn feedback_strips_clean_blocks() {
        let mut cache = ParseCache::default();
        cache.start();
        let source = "a{}\nb{}";
        record(&mut cache, source, Location::new(1, 1, 0), Location::new(1, 4, 3));
        record(&mut cache, source, Location::new(2, 1, 4), Location::new(2, 4, 7));
        cache.feedback(&[Location::new(2, 2, 5)]);

        let (events, _) = cache.find_block(source, Location::new(1, 1, 0)).unwrap();
        assert!(events.is_empty());
        let (events, _) = cache.find_block(source, Location::new(2, 1, 4)).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn trimming() {
        let mut cache = ParseCache::new(CacheConfig {
            max_age: Duration::from_secs(600),
            trim_delay: Duration::from_secs(600),
        });
        let source = "a{}";
        for _ in 0..4 {
            cache.start();
            record(&mut cache, source, Location::new(1, 1, 0), Location::new(1, 4, 3));
            record(&mut cache, source, Location::new(1, 1, 0), Location::new(1, 4, 3));
        }
        // blocks of the current generation are kept, half of the older ones dropped
        cache.trim();
        assert_eq!(cache.len(), 5);
        // too soon for the automatic trim
        cache.start();
        assert_eq!(cache.len(), 5);
        cache.trim();
        assert_eq!(cache.len(), 3);

        let mut cache = ParseCache::new(CacheConfig {
            max_age: Duration::ZERO,
            trim_delay: Duration::ZERO,
        });
        cache.start();
        record(&mut cache, source, Location::new(1, 1, 0), Location::new(1, 4, 3));
        cache.trim();
        assert!(cache.is_empty());
    }
}
