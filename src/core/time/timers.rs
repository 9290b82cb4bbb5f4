struct ScheduledTask<T> {
    due_ms: f64,
    task: T,
}

/// One-shot delayed tasks keyed on real time.
///
/// Every `schedule` call arms its own task; identical tasks are NOT merged.
/// Tasks only fire when the owner calls [`take_due`](Self::take_due).
pub struct DelayedTasks<T> {
    pending: Vec<ScheduledTask<T>>,
}

impl<T> DelayedTasks<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: T) {
        self.pending.push(ScheduledTask {
            due_ms: now_ms + delay_ms,
            task,
        });
    }

    /// Drop pending tasks matching `pred`; returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !pred(&t.task));
        before - self.pending.len()
    }

    /// Remove and return every task due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<T> {
        let mut due: Vec<ScheduledTask<T>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        // stable: equal deadlines keep scheduling order
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for DelayedTasks<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_schedules_are_not_deduplicated() {
        let mut tasks = DelayedTasks::new();
        tasks.schedule(0.0, 250.0, "reset");
        tasks.schedule(100.0, 250.0, "reset");
        assert_eq!(tasks.len(), 2);

        assert!(tasks.take_due(200.0).is_empty());
        assert_eq!(tasks.take_due(250.0), vec!["reset"]);
        assert_eq!(tasks.take_due(350.0), vec!["reset"]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut tasks = DelayedTasks::new();
        tasks.schedule(0.0, 10.0, 1);
        tasks.schedule(0.0, 20.0, 2);
        tasks.schedule(5.0, 10.0, 1);
        assert_eq!(tasks.cancel_where(|t| *t == 1), 2);
        assert_eq!(tasks.cancel_where(|t| *t == 1), 0);
        assert_eq!(tasks.take_due(100.0), vec![2]);
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut tasks = DelayedTasks::new();
        tasks.schedule(0.0, 30.0, 'c');
        tasks.schedule(0.0, 10.0, 'a');
        tasks.schedule(0.0, 20.0, 'b');
        assert_eq!(tasks.take_due(30.0), vec!['a', 'b', 'c']);
    }
}
