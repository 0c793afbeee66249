//! Adaptive question scheduler.
//!
//! Items are introduced in shuffled order, one per turn. A missed item is put
//! into a retest queue a few turns ahead and keeps coming back, each correct
//! answer doubling the gap, until its streak reaches the retirement threshold.
//! Once every item has been introduced the remaining queue is drained in slot
//! order.

pub mod queue;

use crate::types::{GuessOutcome, Item, SchedulerConfig};
use queue::{AskedQuestion, RetestQueue};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Smallest retest interval that never serves a missed item on the next turn.
const MIN_RETEST_BASE: u64 = 2;

/// Where the item currently being asked came from.
#[derive(Debug, Clone, Copy)]
enum InFlight {
    Unseen(usize),
    Retest(AskedQuestion),
}

impl InFlight {
    fn item(&self) -> usize {
        match self {
            Self::Unseen(index) => *index,
            Self::Retest(question) => question.item,
        }
    }
}

/// Snapshot of how far a session has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub introduced: usize,
    /// Questions waiting in the retest queue.
    pub pending_retests: usize,
    pub retirement_threshold: u32,
}

/// Per-session scheduler state.
#[derive(Debug, Clone)]
pub struct Scheduler {
    items: Vec<Item>,
    next_unseen: usize,
    queue: RetestQueue,
    current_slot: u64,
    in_flight: Option<InFlight>,
    retirement_threshold: u32,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Shuffle `items` and prepare an empty retest queue.
    pub fn new<R: Rng + ?Sized>(mut items: Vec<Item>, config: SchedulerConfig, rng: &mut R) -> Self {
        items.shuffle(rng);
        let config = SchedulerConfig {
            retest_base: config.retest_base.max(MIN_RETEST_BASE),
            retirement_threshold: config.retirement_threshold.max(1),
        };

        Self {
            items,
            next_unseen: 0,
            queue: RetestQueue::new(),
            current_slot: 0,
            in_flight: None,
            retirement_threshold: config.retirement_threshold,
            config,
        }
    }

    /// First item of the session. `None` only when there are no items.
    pub fn pick_first(&mut self) -> Option<&Item> {
        self.serve_unseen()
    }

    /// Record the outcome for the item just asked and choose the next one.
    ///
    /// Returns `None` once every item has been introduced and retired.
    pub fn pick_next(&mut self, outcome: &GuessOutcome) -> Option<&Item> {
        let answered = self.record(outcome);

        if let Some(question) = self.queue.pop_front(self.current_slot) {
            return Some(self.serve_retest(question));
        }

        if self.next_unseen < self.items.len() {
            self.current_slot += 1;
            if let Some(question) = self.queue.pop_front(self.current_slot) {
                return Some(self.serve_retest(question));
            }
            return self.serve_unseen();
        }

        self.drain(answered)
    }

    /// Turns until an item with `streak` is asked again.
    pub fn retest_interval(&self, streak: u32) -> u64 {
        self.config
            .retest_base
            .saturating_mul(1u64 << streak.min(62))
    }

    pub fn retirement_threshold(&self) -> u32 {
        self.retirement_threshold
    }

    pub fn current_slot(&self) -> u64 {
        self.current_slot
    }

    /// Streak of a queued or currently asked item; `None` when it is not
    /// being retested.
    pub fn streak(&self, id: &str) -> Option<u32> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        if let Some(InFlight::Retest(question)) = self.in_flight {
            if question.item == index {
                return Some(question.streak);
            }
        }
        self.queue.find(index).map(|(_, question)| question.streak)
    }

    /// Slot at which a queued item is due.
    pub fn due_slot(&self, id: &str) -> Option<u64> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.queue.find(index).map(|(slot, _)| slot)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            total: self.items.len(),
            introduced: self.next_unseen,
            pending_retests: self.queue.len(),
            retirement_threshold: self.retirement_threshold,
        }
    }

    /// Apply the outcome to the in-flight entry. Returns the answered item.
    fn record(&mut self, outcome: &GuessOutcome) -> Option<usize> {
        let in_flight = self.in_flight.take()?;
        let index = in_flight.item();

        if self.items[index].id() != outcome.item {
            warn!(
                asked = self.items[index].id(),
                reported = %outcome.item,
                "outcome reported for an item that was not asked, ignoring"
            );
            if let InFlight::Retest(question) = in_flight {
                self.enqueue(question);
            }
            return Some(index);
        }

        match in_flight {
            InFlight::Unseen(_) => {
                if outcome.was_wrong {
                    self.enqueue(AskedQuestion::new(index));
                }
            }
            InFlight::Retest(mut question) => {
                if outcome.was_wrong {
                    question.streak = 0;
                    self.enqueue(question);
                } else {
                    question.streak += 1;
                    if question.streak >= self.retirement_threshold {
                        debug!(item = self.items[index].id(), streak = question.streak, "retired");
                    } else {
                        self.enqueue(question);
                    }
                }
            }
        }

        Some(index)
    }

    fn enqueue(&mut self, question: AskedQuestion) {
        let slot = self.current_slot + self.retest_interval(question.streak);
        debug!(
            item = self.items[question.item].id(),
            streak = question.streak,
            slot,
            "queued for retest"
        );
        self.queue.push(slot, question);
    }

    /// Serve leftovers once every item has been introduced.
    fn drain(&mut self, answered: Option<usize>) -> Option<&Item> {
        let count = self.queue.len();
        let (slot, question) = self.queue.take_next(answered)?;
        self.current_slot = self.current_slot.max(slot);

        let threshold = ceil_log2(count).clamp(1, self.config.retirement_threshold);
        if threshold != self.retirement_threshold {
            debug!(
                from = self.retirement_threshold,
                to = threshold,
                pending = count,
                "retirement threshold changed"
            );
            self.retirement_threshold = threshold;
        }

        Some(self.serve_retest(question))
    }

    fn serve_unseen(&mut self) -> Option<&Item> {
        let index = self.next_unseen;
        if index >= self.items.len() {
            return None;
        }
        self.next_unseen += 1;
        self.in_flight = Some(InFlight::Unseen(index));
        Some(&self.items[index])
    }

    fn serve_retest(&mut self, question: AskedQuestion) -> &Item {
        self.in_flight = Some(InFlight::Retest(question));
        &self.items[question.item]
    }
}

/// `ceil(log2(n))`, with 0 for `n <= 1`.
fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}
