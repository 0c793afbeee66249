//! A single quiz session: the scheduler plus the item currently on screen.

use crate::error::{QuizError, Result};
use crate::matching::{classify, Classification};
use crate::scheduler::{Progress, Scheduler};
use crate::types::{Feedback, GuessOutcome, Item, MatchSettings, SchedulerConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The item being asked and how many wrong guesses it has had.
#[derive(Debug, Clone)]
pub struct CurrentGuess {
    pub item: Item,
    pub false_guesses: u32,
}

impl CurrentGuess {
    fn new(item: Item) -> Self {
        Self {
            item,
            false_guesses: 0,
        }
    }
}

/// What the player should be shown after a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "item", rename_all = "snake_case")]
pub enum Next {
    /// The same item stays on screen.
    Retry(Item),
    /// A new item was picked.
    Item(Item),
    /// Every item has been mastered.
    Done,
}

/// Result of a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub classification: Classification,
    pub feedback: Feedback,
    pub next: Next,
}

/// Running totals for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Items answered correctly, counting retests.
    pub answered: u32,
    /// Items answered correctly without a wrong guess.
    pub first_try: u32,
    pub wrong_guesses: u32,
    pub near_misses: u32,
}

/// One player's run through a set of items.
#[derive(Debug, Clone)]
pub struct Session {
    scheduler: Scheduler,
    current: Option<CurrentGuess>,
    settings: MatchSettings,
    stats: SessionStats,
}

impl Session {
    /// Shuffle the items and put the first one on screen.
    pub fn start<R: Rng + ?Sized>(
        items: Vec<Item>,
        config: SchedulerConfig,
        settings: MatchSettings,
        rng: &mut R,
    ) -> Self {
        let mut scheduler = Scheduler::new(items, config, rng);
        let current = scheduler.pick_first().cloned().map(CurrentGuess::new);
        Self {
            scheduler,
            current,
            settings,
            stats: SessionStats::default(),
        }
    }

    /// The item on screen, or `None` once the session is over.
    pub fn current(&self) -> Option<&Item> {
        self.current.as_ref().map(|c| &c.item)
    }

    pub fn false_guesses(&self) -> u32 {
        self.current.as_ref().map_or(0, |c| c.false_guesses)
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    pub fn progress(&self) -> Progress {
        self.scheduler.progress()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Classify a guess and advance when it is correct.
    pub fn submit(&mut self, guess: &str) -> Result<Turn> {
        let current = self.current.as_mut().ok_or(QuizError::SessionFinished)?;
        let classification = classify(guess, &current.item, self.settings);

        match classification {
            Classification::Correct { .. } => {
                let feedback = classification.feedback(&current.item, current.false_guesses);
                let was_wrong = current.false_guesses > 0;
                let outcome = GuessOutcome::new(&current.item, was_wrong);

                self.stats.answered += 1;
                if !was_wrong {
                    self.stats.first_try += 1;
                }

                self.current = self.scheduler.pick_next(&outcome).cloned().map(CurrentGuess::new);
                let next = match &self.current {
                    Some(c) => Next::Item(c.item.clone()),
                    None => Next::Done,
                };
                Ok(Turn {
                    classification,
                    feedback,
                    next,
                })
            }
            Classification::Misspelled(_) | Classification::Alias { .. } => {
                self.stats.near_misses += 1;
                Ok(Turn {
                    feedback: classification.feedback(&current.item, current.false_guesses),
                    classification,
                    next: Next::Retry(current.item.clone()),
                })
            }
            Classification::Wrong => {
                current.false_guesses += 1;
                self.stats.wrong_guesses += 1;
                Ok(Turn {
                    feedback: classification.feedback(&current.item, current.false_guesses),
                    classification,
                    next: Next::Retry(current.item.clone()),
                })
            }
        }
    }
}
