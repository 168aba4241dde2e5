// Two-Level Tick Bitmap
//
// Level 0 keeps one bit per spacing-compressed tick, 128 to a word.
// Level 1 keeps one bit per level-0 word that has any bit set, so a
// search skips empty stretches 16384 compressed ticks at a time.

use cl_math::{MAX_TICK, MIN_TICK, WORD_BITS, WORD_SHIFT};
use soroban_sdk::{Env, Map};

use crate::error::TickError;

pub const LEVEL_TICKS: u32 = 0;
pub const LEVEL_SUMMARY: u32 = 1;

/// Word storage for the bitmap; absent words read as zero
pub trait BitmapStore {
    fn read_word(&self, level: u32, pos: i32) -> u128;
    fn write_word(&mut self, level: u32, pos: i32, word: u128);
}

/// Bitmap words held in a host map, zero words dropped
#[derive(Clone)]
pub struct MemoryBitmap {
    words: Map<(u32, i32), u128>,
}

impl MemoryBitmap {
    pub fn new(env: &Env) -> Self {
        Self { words: Map::new(env) }
    }
}

impl BitmapStore for MemoryBitmap {
    fn read_word(&self, level: u32, pos: i32) -> u128 {
        self.words.get((level, pos)).unwrap_or(0)
    }

    fn write_word(&mut self, level: u32, pos: i32, word: u128) {
        if word == 0 {
            self.words.remove((level, pos));
        } else {
            self.words.set((level, pos), word);
        }
    }
}

/// Word position and bit index of a slot
#[inline]
pub fn position(slot: i32) -> (i32, u32) {
    (slot >> WORD_SHIFT, (slot & (WORD_BITS - 1)) as u32)
}

#[inline]
fn compress(tick: i32, spacing: u32) -> i32 {
    tick.div_euclid(spacing as i32)
}

/// Toggle the bit for an aligned tick and keep the summary level in sync
pub fn flip_tick<S: BitmapStore>(store: &mut S, tick: i32, spacing: u32) -> Result<(), TickError> {
    if spacing == 0 || tick % spacing as i32 != 0 {
        return Err(TickError::InvalidTick);
    }

    let (word_pos, bit) = position(compress(tick, spacing));
    let before = store.read_word(LEVEL_TICKS, word_pos);
    let after = before ^ (1u128 << bit);
    store.write_word(LEVEL_TICKS, word_pos, after);

    if (before == 0) != (after == 0) {
        let (summary_pos, summary_bit) = position(word_pos);
        let summary = store.read_word(LEVEL_SUMMARY, summary_pos);
        store.write_word(LEVEL_SUMMARY, summary_pos, summary ^ (1u128 << summary_bit));
    }

    Ok(())
}

pub fn is_initialized<S: BitmapStore>(store: &S, tick: i32, spacing: u32) -> bool {
    if spacing == 0 {
        return false;
    }
    let (word_pos, bit) = position(compress(tick, spacing));
    store.read_word(LEVEL_TICKS, word_pos) & (1u128 << bit) != 0
}

/// Bits at or below `bit`
#[inline]
fn mask_at_or_below(bit: u32) -> u128 {
    if bit == 127 {
        u128::MAX
    } else {
        (1u128 << (bit + 1)) - 1
    }
}

/// Bits at or above `bit`
#[inline]
fn mask_at_or_above(bit: u32) -> u128 {
    u128::MAX << bit
}

#[inline]
fn highest_bit(word: u128) -> i32 {
    127 - word.leading_zeros() as i32
}

#[inline]
fn lowest_bit(word: u128) -> i32 {
    word.trailing_zeros() as i32
}

/// Largest set slot <= `slot` at one level, scanning words down to `floor_pos`
fn search_down<S: BitmapStore>(store: &S, level: u32, slot: i32, floor_pos: i32) -> Option<i32> {
    let (mut pos, bit) = position(slot);
    let mut word = store.read_word(level, pos) & mask_at_or_below(bit);
    loop {
        if word != 0 {
            return Some(pos * WORD_BITS + highest_bit(word));
        }
        pos -= 1;
        if pos < floor_pos {
            return None;
        }
        word = store.read_word(level, pos);
    }
}

/// Smallest set slot >= `slot` at one level, scanning words up to `ceil_pos`
fn search_up<S: BitmapStore>(store: &S, level: u32, slot: i32, ceil_pos: i32) -> Option<i32> {
    let (mut pos, bit) = position(slot);
    let mut word = store.read_word(level, pos) & mask_at_or_above(bit);
    loop {
        if word != 0 {
            return Some(pos * WORD_BITS + lowest_bit(word));
        }
        pos += 1;
        if pos > ceil_pos {
            return None;
        }
        word = store.read_word(level, pos);
    }
}

/// Next initialized tick from `tick`.
///
/// With `lte` the result is the largest initialized tick <= `tick`,
/// otherwise the smallest initialized tick > `tick`. `None` when the
/// direction holds no initialized tick.
pub fn next_initialized_tick<S: BitmapStore>(
    store: &S,
    tick: i32,
    spacing: u32,
    lte: bool,
) -> Option<i32> {
    if spacing == 0 {
        return None;
    }

    let min_slot = compress(MIN_TICK, spacing);
    let max_slot = compress(MAX_TICK, spacing);
    let (min_word, _) = position(min_slot);
    let (max_word, _) = position(max_slot);
    let (min_summary, _) = position(min_word);
    let (max_summary, _) = position(max_word);

    let slot = compress(tick, spacing);
    let found = if lte {
        let slot = slot.min(max_slot);
        if slot < min_slot {
            return None;
        }
        let (word_pos, _) = position(slot);
        match search_down(store, LEVEL_TICKS, slot, word_pos) {
            Some(found) => found,
            None => {
                let word_pos = search_down(store, LEVEL_SUMMARY, word_pos - 1, min_summary)?;
                word_pos * WORD_BITS + highest_bit(store.read_word(LEVEL_TICKS, word_pos))
            }
        }
    } else {
        let slot = (slot + 1).max(min_slot);
        if slot > max_slot {
            return None;
        }
        let (word_pos, _) = position(slot);
        match search_up(store, LEVEL_TICKS, slot, word_pos) {
            Some(found) => found,
            None => {
                let word_pos = search_up(store, LEVEL_SUMMARY, word_pos + 1, max_summary)?;
                word_pos * WORD_BITS + lowest_bit(store.read_word(LEVEL_TICKS, word_pos))
            }
        }
    };

    Some(found * spacing as i32)
}
