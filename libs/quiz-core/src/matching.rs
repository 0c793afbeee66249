//! Answer matching for typed guesses.
//!
//! A guess is tried, in order, as an exact answer, a close misspelling of an
//! accepted name, and a known but unofficial alias. Anything else is wrong.

use crate::types::{Feedback, FeedbackKind, Item, MatchSettings, Segment, Tag};
use serde::{Deserialize, Serialize};

/// Outcome of classifying a guess against an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Correct { name: String },
    Misspelled(Misspelling),
    Alias { alias: String },
    Wrong,
}

impl Classification {
    pub fn kind(&self) -> FeedbackKind {
        match self {
            Self::Correct { .. } => FeedbackKind::Correct,
            Self::Misspelled(_) => FeedbackKind::Misspelled,
            Self::Alias { .. } => FeedbackKind::Alias,
            Self::Wrong => FeedbackKind::Wrong,
        }
    }

    /// Build the feedback payload. `false_guesses` counts wrong guesses on the
    /// item so far, including this one.
    pub fn feedback(&self, item: &Item, false_guesses: u32) -> Feedback {
        match self {
            Self::Correct { name } => {
                Feedback::message(FeedbackKind::Correct, format!("{} is correct!", name))
            }
            Self::Misspelled(misspelling) => misspelling.feedback(),
            Self::Alias { alias } => Feedback::message(
                FeedbackKind::Alias,
                format!("{} is not the official name.", alias),
            ),
            Self::Wrong => Feedback::message(FeedbackKind::Wrong, hint(&item.names, false_guesses)),
        }
    }
}

/// A guess close enough to an accepted name to count as a typo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misspelling {
    /// The accepted name the guess was matched to.
    pub expected: String,
    /// Inserted plus deleted characters.
    pub error_count: usize,
    /// The guess, with extra characters tagged `Inserted`.
    pub guess_segments: Vec<Segment>,
    /// The accepted name, with characters missing from the guess tagged `Deleted`.
    pub expected_segments: Vec<Segment>,
}

impl Misspelling {
    fn feedback(&self) -> Feedback {
        let mut segments = self.guess_segments.clone();
        segments.push(Segment::plain(" -> "));
        segments.extend(self.expected_segments.iter().cloned());
        Feedback {
            kind: FeedbackKind::Misspelled,
            segments,
        }
    }
}

/// Classify a guess against an item.
pub fn classify(guess: &str, item: &Item, settings: MatchSettings) -> Classification {
    let guess = normalize_whitespace(guess);
    let fold = settings.fold_diacritics;

    if let Some(name) = matching_name(&guess, &item.names, fold) {
        return Classification::Correct {
            name: name.to_string(),
        };
    }
    if let Some(misspelling) = misspelled_match(&guess, &item.names, fold) {
        return Classification::Misspelled(misspelling);
    }
    if let Some(alias) = matching_name(&guess, &item.aliases, fold) {
        return Classification::Alias {
            alias: alias.to_string(),
        };
    }
    Classification::Wrong
}

/// Case-insensitive exact match; returns the matched accepted name.
pub fn is_correct_answer<'a>(guess: &str, names: &'a [String]) -> Option<&'a str> {
    matching_name(&normalize_whitespace(guess), names, false)
}

/// Case-insensitive exact match against known unofficial names.
pub fn unofficial_check<'a>(guess: &str, aliases: &'a [String]) -> Option<&'a str> {
    matching_name(&normalize_whitespace(guess), aliases, false)
}

/// Find the first accepted name the guess misspells.
///
/// A candidate is accepted when the inserted plus deleted characters do not
/// exceed a quarter of the combined length of guess and candidate.
pub fn misspelled_check(guess: &str, names: &[String]) -> Option<Misspelling> {
    misspelled_match(&normalize_whitespace(guess), names, false)
}

fn matching_name<'a>(guess: &str, names: &'a [String], fold: bool) -> Option<&'a str> {
    let guess = comparable(guess, fold);
    names
        .iter()
        .find(|name| comparable(name, fold) == guess)
        .map(String::as_str)
}

fn misspelled_match(guess: &str, names: &[String], fold: bool) -> Option<Misspelling> {
    let guess_len = guess.chars().count();

    names.iter().find_map(|name| {
        let name_len = name.chars().count();
        let accepted = (name_len + guess_len) / 4;
        // the length difference is a lower bound on the error count
        if name_len.abs_diff(guess_len) > accepted {
            return None;
        }

        let diff = char_diff_with(guess, name, fold);
        let error_count = count_errors(&diff);
        if error_count > accepted {
            return None;
        }

        let mut guess_segments = Vec::new();
        let mut expected_segments = Vec::new();
        for segment in &diff {
            match segment.diff_type {
                DiffType::Same => {
                    push_segment(&mut guess_segments, &segment.text, Tag::Plain);
                    push_segment(&mut expected_segments, &segment.text_expected, Tag::Plain);
                }
                DiffType::Removed => push_segment(&mut guess_segments, &segment.text, Tag::Inserted),
                DiffType::Added => push_segment(&mut expected_segments, &segment.text, Tag::Deleted),
            }
        }

        Some(Misspelling {
            expected: name.clone(),
            error_count,
            guess_segments,
            expected_segments,
        })
    })
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, tag: Tag) {
    match segments.last_mut() {
        Some(last) if last.tag == tag => last.text.push_str(text),
        _ => segments.push(Segment {
            text: text.to_string(),
            tag,
        }),
    }
}

/// Number of characters that differ between the two sides of a diff.
pub fn count_errors(diff: &[DiffSegment]) -> usize {
    diff.iter()
        .filter(|s| s.diff_type != DiffType::Same)
        .map(|s| s.text.chars().count())
        .sum()
}

/// Character diff kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Text is the same in both strings.
    Same,
    /// Text is in the correct answer but not typed.
    Added,
    /// Text was typed but is not in the correct answer.
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSegment {
    /// Text as typed for `Same` and `Removed`, as expected for `Added`.
    pub text: String,
    /// For `Same` segments, the matching text in the correct answer's casing.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text_expected: String,
    pub diff_type: DiffType,
}

/// Case-insensitive character diff between typed and correct answers.
///
/// Built from a longest common subsequence, so the number of `Added` plus
/// `Removed` characters is minimal.
pub fn char_diff(typed: &str, correct: &str) -> Vec<DiffSegment> {
    char_diff_with(typed, correct, false)
}

fn char_diff_with(typed: &str, correct: &str, fold: bool) -> Vec<DiffSegment> {
    let typed: Vec<char> = typed.chars().collect();
    let correct: Vec<char> = correct.chars().collect();
    let m = correct.len();
    let n = typed.len();
    let same = |i: usize, j: usize| chars_match(correct[i], typed[j], fold);

    // lcs[i * (n + 1) + j] = LCS length of correct[i..] and typed[j..]
    let width = n + 1;
    let mut lcs = vec![0usize; (m + 1) * width];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            lcs[i * width + j] = if same(i, j) {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut result: Vec<DiffSegment> = Vec::new();
    let mut push = |diff_type: DiffType, c: char, expected: Option<char>| {
        if let Some(last) = result.last_mut() {
            if last.diff_type == diff_type {
                last.text.push(c);
                if let Some(e) = expected {
                    last.text_expected.push(e);
                }
                return;
            }
        }
        result.push(DiffSegment {
            text: c.to_string(),
            text_expected: expected.map(String::from).unwrap_or_default(),
            diff_type,
        });
    };

    let (mut i, mut j) = (0, 0);
    while i < m || j < n {
        if i < m && j < n && same(i, j) {
            push(DiffType::Same, typed[j], Some(correct[i]));
            i += 1;
            j += 1;
        } else if j == n || (i < m && lcs[(i + 1) * width + j] >= lcs[i * width + j + 1]) {
            push(DiffType::Added, correct[i], None);
            i += 1;
        } else {
            push(DiffType::Removed, typed[j], None);
            j += 1;
        }
    }

    result
}

/// Hint for a wrong guess.
///
/// The first miss masks every letter of the primary name after the first
/// character; later misses reveal all accepted names.
pub fn hint(names: &[String], false_guesses: u32) -> String {
    if false_guesses <= 1 {
        return format!("Hint: {}", mask_name(&names[0]));
    }
    if names.len() > 1 {
        format!("Correct answers: {}", names.join(" / "))
    } else {
        format!("Correct answer: {}", names[0])
    }
}

fn mask_name(name: &str) -> String {
    let mut chars = name.chars();
    let first = chars.next().map(String::from).unwrap_or_default();
    first
        + &chars
            .map(|c| if c.is_alphabetic() { '*' } else { c })
            .collect::<String>()
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn comparable(s: &str, fold: bool) -> String {
    let lower = s.to_lowercase();
    if fold {
        lower.chars().map(fold_char).collect()
    } else {
        lower
    }
}

fn chars_match(a: char, b: char, fold: bool) -> bool {
    if fold {
        fold_char(a).to_lowercase().eq(fold_char(b).to_lowercase())
    } else {
        a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Replace the Estonian letters with their unaccented counterparts.
pub fn fold_char(c: char) -> char {
    match c {
        'õ' | 'ö' => 'o',
        'Õ' | 'Ö' => 'O',
        'ä' => 'a',
        'Ä' => 'A',
        'ü' => 'u',
        'Ü' => 'U',
        'š' => 's',
        'Š' => 'S',
        'ž' => 'z',
        'Ž' => 'Z',
        _ => c,
    }
}
