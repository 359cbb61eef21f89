//! Mutable per-evaluation state: capture slots with a rollback journal, the
//! append-only capture history, and the subroutine recursion counter.
//!
//! Backtracking restores captures by rewinding the journal to a mark instead
//! of copying the slot table at every branch. Subroutine calls additionally
//! need to *re-apply* rolled-back captures when the outer continuation
//! rejects a candidate, which is what `unwind`/`replay` provide.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Capture {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: String,
}

pub(crate) type JournalMark = usize;

pub(crate) struct MatchContext {
    slots: Vec<Option<Capture>>,
    journal: Vec<(usize, Option<Capture>)>,
    history: Vec<(usize, Capture)>,
    pub(crate) depth: usize,
}

impl MatchContext {
    pub(crate) fn new(group_count: usize) -> Self {
        MatchContext {
            slots: vec![None; group_count + 1],
            journal: Vec::new(),
            history: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn mark(&self) -> JournalMark {
        self.journal.len()
    }

    pub(crate) fn rewind(&mut self, mark: JournalMark) {
        while self.journal.len() > mark {
            if let Some((slot, prev)) = self.journal.pop() {
                self.slots[slot] = prev;
            }
        }
    }

    /// Roll back to `mark`, returning a redo list that `replay` can apply to
    /// restore the rolled-back state.
    pub(crate) fn unwind(&mut self, mark: JournalMark) -> Vec<(usize, Option<Capture>)> {
        let mut redo = Vec::new();
        while self.journal.len() > mark {
            if let Some((slot, prev)) = self.journal.pop() {
                redo.push((slot, std::mem::replace(&mut self.slots[slot], prev)));
            }
        }
        redo
    }

    pub(crate) fn replay(&mut self, redo: Vec<(usize, Option<Capture>)>) {
        for (slot, value) in redo.into_iter().rev() {
            self.journal.push((slot, self.slots[slot].clone()));
            self.slots[slot] = value;
        }
    }

    pub(crate) fn set(&mut self, group: usize, cap: Capture) {
        self.journal.push((group, self.slots[group].clone()));
        self.history.push((group, cap.clone()));
        self.slots[group] = Some(cap);
    }

    pub(crate) fn get(&self, group: usize) -> Option<&Capture> {
        self.slots.get(group)?.as_ref()
    }

    pub(crate) fn snapshot(&self) -> Vec<Option<Capture>> {
        self.slots.clone()
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }
}
