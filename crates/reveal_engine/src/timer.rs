use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Cancellable handle for a timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct TimerEntry<T> {
    task: T,
    repeat_ms: Option<u64>,
}

/// Virtual-time timer queue. Timers due at the same instant fire in
/// registration order; intervals keep their handle across firings.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    heap: BinaryHeap<Reverse<(u64, u64)>>,
    entries: HashMap<u64, TimerEntry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            heap: BinaryHeap::new(),
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timeout(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TimerHandle {
        self.register(now_ms + delay_ms, task, None)
    }

    /// First firing is one full period after `now_ms`.
    pub fn set_interval(&mut self, now_ms: u64, period_ms: u64, task: T) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.register(now_ms + period_ms, task, Some(period_ms))
    }

    /// Returns false if the timer already fired (timeouts) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle.0).is_some()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_cancelled();
        self.heap.peek().map(|Reverse((due, _))| *due)
    }

    /// Pops the earliest timer due at or before `until_ms`.
    /// Intervals are re-armed before they are returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, TimerHandle, T)> {
        self.discard_cancelled();
        let Reverse((due, id)) = *self.heap.peek()?;
        if due > until_ms {
            return None;
        }
        self.heap.pop();

        let entry = self.entries.get(&id)?;
        let task = entry.task.clone();
        match entry.repeat_ms {
            Some(period) => self.heap.push(Reverse((due + period, id))),
            None => {
                self.entries.remove(&id);
            }
        }
        Some((due, TimerHandle(id), task))
    }

    fn register(&mut self, due_ms: u64, task: T, repeat_ms: Option<u64>) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, TimerEntry { task, repeat_ms });
        self.heap.push(Reverse((due_ms, id)));
        TimerHandle(id)
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.entries.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}
