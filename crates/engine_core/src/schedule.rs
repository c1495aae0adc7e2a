//! Recurring and one-shot timers driven by elapsed time.
//!
//! The scheduler owns no clock; callers advance it with the elapsed time of
//! the frame loop and run the returned tasks to completion.

use std::time::Duration;

/// Shortest period accepted for a recurring task.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Every(Duration),
    Once,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    task: T,
    deadline: Duration,
    repeat: Repeat,
    seq: u64,
}

/// Timer queue keyed by task values.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    now: Duration,
    next_seq: u64,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Time the scheduler was last advanced to.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `task` every `period`, first one period from now.
    pub fn every(&mut self, period: Duration, task: T) {
        let period = period.max(MIN_PERIOD);
        self.push(task, self.now + period, Repeat::Every(period));
    }

    /// Fire `task` once, `delay` from now.
    pub fn after(&mut self, delay: Duration, task: T) {
        self.push(task, self.now + delay, Repeat::Once);
    }

    fn push(&mut self, task: T, deadline: Duration, repeat: Repeat) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            task,
            deadline,
            repeat,
            seq,
        });
    }

    /// Advance to `now` and return every due task, earliest deadline first.
    ///
    /// A recurring task appears at most once per call: periods missed while
    /// the loop was stalled are skipped rather than replayed.
    pub fn advance(&mut self, now: Duration) -> Vec<T> {
        let now = self.now.max(now);
        self.now = now;

        let mut due: Vec<(Duration, u64, T)> = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.deadline > now {
                return true;
            }
            due.push((entry.deadline, entry.seq, entry.task.clone()));
            match entry.repeat {
                Repeat::Every(period) => {
                    while entry.deadline <= now {
                        entry.deadline += period;
                    }
                    true
                }
                Repeat::Once => false,
            }
        });

        due.sort_by_key(|(deadline, seq, _)| (*deadline, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    /// Earliest pending deadline, if any task is queued.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn recurring_task_fires_each_period() {
        let mut s = Scheduler::new();
        s.every(ms(100), "tick");
        assert!(s.advance(ms(99)).is_empty());
        assert_eq!(s.advance(ms(100)), vec!["tick"]);
        assert!(s.advance(ms(150)).is_empty());
        assert_eq!(s.advance(ms(200)), vec!["tick"]);
    }

    #[test]
    fn recurring_task_never_fires_twice_in_one_advance() {
        let mut s = Scheduler::new();
        s.every(ms(100), 7u8);
        assert_eq!(s.advance(ms(1_000)), vec![7]);
        // Missed periods are skipped; next deadline is after `now`.
        assert_eq!(s.next_deadline(), Some(ms(1_100)));
    }

    #[test]
    fn one_shot_fires_once_and_is_removed() {
        let mut s = Scheduler::new();
        s.after(ms(50), 'x');
        assert_eq!(s.len(), 1);
        assert_eq!(s.advance(ms(60)), vec!['x']);
        assert!(s.is_empty());
        assert!(s.advance(ms(10_000)).is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_deadline_order() {
        let mut s = Scheduler::new();
        s.after(ms(30), "c");
        s.after(ms(10), "a");
        s.every(ms(20), "b");
        assert_eq!(s.advance(ms(30)), vec!["a", "b", "c"]);
    }

    #[test]
    fn tasks_added_later_are_relative_to_last_advance() {
        let mut s = Scheduler::new();
        s.advance(ms(500));
        s.after(ms(100), 1);
        assert!(s.advance(ms(599)).is_empty());
        assert_eq!(s.advance(ms(600)), vec![1]);
    }

    #[test]
    fn time_does_not_run_backwards() {
        let mut s: Scheduler<u8> = Scheduler::new();
        s.advance(ms(400));
        s.advance(ms(100));
        assert_eq!(s.now(), ms(400));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut s = Scheduler::new();
        s.every(Duration::ZERO, ());
        assert_eq!(s.advance(ms(5)).len(), 1);
        assert_eq!(s.next_deadline(), Some(ms(6)));
    }
}
