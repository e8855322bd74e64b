//! A stack of FIFO string queues packed into one growable byte arena.
//!
//! Layout of the arena, bottom to top:
//!
//! ```text
//! [base queue strings][frame][queue 1 strings][frame][queue 2 strings] ...
//!                      ^ top mark of queue 1   ^ top mark of queue 2
//! ```
//!
//! Each string is stored followed by a NUL byte. A frame is three
//! little-endian `u64` words: the previous top mark, and the head and tail
//! cursors of the queue underneath. `push` writes a frame at the tail and
//! starts an empty queue after it; `pop` reads the frame back, restores the
//! cursors it saved and truncates the arena to where the frame began. Only
//! the top queue ever grows, so the arena is always exactly as long as the
//! top queue's tail.

use std::mem::size_of;

use crate::ScanError;

const WORD: usize = size_of::<u64>();
const FRAME_LEN: usize = 3 * WORD;
const NO_FRAME: u64 = u64::MAX;

#[derive(Debug)]
pub struct QueueStack {
    arena: Vec<u8>,
    top_mark: Option<usize>,
    head: usize,
    tail: usize,
    depth: usize,
}

impl QueueStack {
    /// Allocate the arena up front. Fails only if the allocator refuses.
    pub fn with_capacity(capacity: usize) -> Result<Self, ScanError> {
        let mut arena = Vec::new();
        arena.try_reserve(capacity)?;

        Ok(QueueStack {
            arena,
            top_mark: None,
            head: 0,
            tail: 0,
            depth: 0,
        })
    }

    /// Open a new, empty queue on top of the stack.
    pub fn push(&mut self) -> Result<(), ScanError> {
        debug_assert_eq!(self.tail, self.arena.len());
        self.arena.try_reserve(FRAME_LEN)?;

        let prev = self.top_mark.map_or(NO_FRAME, |m| m as u64);
        for word in [prev, self.head as u64, self.tail as u64] {
            self.arena.extend_from_slice(&word.to_le_bytes());
        }

        self.top_mark = Some(self.tail);
        self.head = self.arena.len();
        self.tail = self.arena.len();
        self.depth += 1;
        Ok(())
    }

    /// Drop the top queue, unread names included, and make the queue below
    /// it current again. Without a pushed queue this does nothing.
    pub fn pop(&mut self) {
        let Some(mark) = self.top_mark else {
            return;
        };

        let prev = self.read_word(mark);
        self.head = self.read_word(mark + WORD) as usize;
        self.tail = self.read_word(mark + 2 * WORD) as usize;
        self.top_mark = (prev != NO_FRAME).then_some(prev as usize);
        self.arena.truncate(mark);
        self.depth -= 1;
    }

    /// Append a name to the tail of the top queue.
    ///
    /// Names come from directory listings and never contain NUL.
    pub fn enqueue(&mut self, name: &str) -> Result<(), ScanError> {
        debug_assert!(!name.contains('\0'), "queued name contains NUL: {name:?}");
        self.arena.try_reserve(name.len() + 1)?;
        self.arena.extend_from_slice(name.as_bytes());
        self.arena.push(0);
        self.tail = self.arena.len();
        Ok(())
    }

    /// Take the name at the head of the top queue.
    pub fn dequeue(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let pending = &self.arena[self.head..self.tail];
        let len = pending.iter().position(|&b| b == 0).unwrap_or(pending.len());
        let name = String::from_utf8_lossy(&pending[..len]).into_owned();
        self.head += len + 1;
        Some(name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head >= self.tail
    }

    /// Number of queues pushed and not yet popped.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Head and tail offsets of the top queue.
    #[inline]
    pub fn cursors(&self) -> (usize, usize) {
        (self.head, self.tail)
    }

    /// Bytes currently in use, frames included.
    #[inline]
    pub fn used_bytes(&self) -> usize {
        self.arena.len()
    }

    fn read_word(&self, at: usize) -> u64 {
        let mut buf = [0u8; WORD];
        buf.copy_from_slice(&self.arena[at..at + WORD]);
        u64::from_le_bytes(buf)
    }
}

#[cfg(test)]
#[path = "queue_stack_tests.rs"]
mod tests;
