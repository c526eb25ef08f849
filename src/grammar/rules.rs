//! Chord quality grammar tables
//!
//! The grammar is an ordered list of steps. Most steps are rule groups; one
//! step re-appends the tension tokens lifted out by the normalizer.
//!
//! ## Rule groups
//! - `FirstMatch` groups fire at most one rule. A rule marked `Flow::Cascade`
//!   also applies the actions of the rules listed after it (without matching
//!   them) until a `Flow::Stop` rule has been applied. This is how "13" implies
//!   11, 9 and 7, and how "dim7" implies the plain diminished triad.
//! - `EveryMatch` groups try every rule once, in order.
//!
//! A matching rule deletes its leftmost match from the working text. The regex
//! engine has no lookaround, so rules carry literal `not_preceded_by` /
//! `not_followed_by` guards that are checked around each candidate match.

use std::ops::Range;

use regex::Regex;

use super::types::Degree::{self, *};
use super::types::DegreeVector;

/// Effect of a rule on the degree vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Set(Degree, i8),
    Omit(Degree),
    /// Lower the current offset, if the degree is present
    Lower(Degree, i8),
}

impl Action {
    pub(crate) fn apply(self, vector: &mut DegreeVector) {
        match self {
            Action::Set(degree, offset) => vector.set(degree, offset),
            Action::Omit(degree) => vector.omit(degree),
            Action::Lower(degree, semitones) => vector.lower(degree, semitones),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Stop,
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    FirstMatch,
    EveryMatch,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rule {
    pub label: &'static str,
    pub pattern: &'static str,
    pub not_preceded_by: &'static [&'static str],
    pub not_followed_by: &'static [&'static str],
    pub actions: &'static [Action],
    pub flow: Flow,
}

const fn rule(label: &'static str, pattern: &'static str, actions: &'static [Action]) -> Rule {
    Rule {
        label,
        pattern,
        not_preceded_by: &[],
        not_followed_by: &[],
        actions,
        flow: Flow::Stop,
    }
}

const fn cascade(label: &'static str, pattern: &'static str, actions: &'static [Action]) -> Rule {
    Rule {
        flow: Flow::Cascade,
        ..rule(label, pattern, actions)
    }
}

impl Rule {
    const fn unless_followed_by(self, guards: &'static [&'static str]) -> Rule {
        Rule {
            not_followed_by: guards,
            ..self
        }
    }

    const fn unless_preceded_by(self, guards: &'static [&'static str]) -> Rule {
        Rule {
            not_preceded_by: guards,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    Group {
        name: &'static str,
        selection: Selection,
        rules: &'static [Rule],
    },
    InjectTensions,
}

const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
const OMISSION: &[&str] = &["omit", "no"];

pub(crate) static GRAMMAR: &[Step] = &[
    Step::Group {
        name: "base",
        selection: Selection::FirstMatch,
        rules: &[
            rule("major", "^M", &[]).unless_followed_by(&["7", "9", "11", "13", "aj"]),
            rule("minor", "^m", &[Action::Set(Third, -1)]).unless_followed_by(&["aj"]),
        ],
    },
    Step::Group {
        name: "augmented",
        selection: Selection::FirstMatch,
        rules: &[
            rule("aug", "aug5?", &[Action::Set(Fifth, 1)]),
            rule("plus", r"\+", &[Action::Set(Fifth, 1)]).unless_followed_by(DIGITS),
            rule(
                "half-diminished",
                "[Φφø]",
                &[Action::Set(Third, -1), Action::Set(Fifth, -1), Action::Set(Seventh, 0)],
            ),
        ],
    },
    Step::Group {
        name: "altered fifth",
        selection: Selection::FirstMatch,
        rules: &[
            rule("sharp 5", "[+#]5", &[Action::Set(Fifth, 1)]),
            rule("flat 5", "[-b]5", &[Action::Set(Fifth, -1)]),
        ],
    },
    Step::Group {
        name: "extension",
        selection: Selection::FirstMatch,
        rules: &[
            rule("power", "^5", &[Action::Omit(Third)]),
            rule("sixth", "^6", &[Action::Set(Seventh, -1)]),
            cascade("13", "^13", &[Action::Set(Thirteenth, 0)]),
            cascade("11", "^11", &[Action::Set(Eleventh, 0)]),
            cascade("9", "^9", &[Action::Set(Ninth, 0)]),
            rule("7", "^7", &[Action::Set(Seventh, 0)]),
        ],
    },
    Step::Group {
        name: "suspension",
        selection: Selection::FirstMatch,
        rules: &[
            rule("sus4", "sus4", &[Action::Set(Third, 1)]),
            rule("sus2", "sus2", &[Action::Set(Third, -2)]),
        ],
    },
    Step::Group {
        name: "added tone",
        selection: Selection::FirstMatch,
        rules: &[
            rule("add2", "add2", &[Action::Set(Ninth, -12)]),
            rule("add9", "add9", &[Action::Set(Ninth, 0)]),
            rule("add4", "add4", &[Action::Set(Eleventh, -12)]),
            rule("add11", "add11", &[Action::Set(Eleventh, 0)]),
            rule("add6", "add6", &[Action::Set(Thirteenth, -12)]),
            rule("add13", "add13", &[Action::Set(Thirteenth, 0)]),
        ],
    },
    Step::Group {
        name: "major seventh",
        selection: Selection::FirstMatch,
        rules: &[
            cascade("maj13", "(M|[Mm]aj|△|Δ)13", &[Action::Set(Thirteenth, 0)]),
            cascade("maj11", "(M|[Mm]aj|△|Δ)11", &[Action::Set(Eleventh, 0)]),
            cascade("maj9", "(M|[Mm]aj|△|Δ)9", &[Action::Set(Ninth, 0)]),
            rule("maj7", "(M|[Mm]aj|△|Δ)7", &[Action::Set(Seventh, 1)]),
        ],
    },
    Step::Group {
        name: "diminished",
        selection: Selection::FirstMatch,
        rules: &[
            cascade("dim7", "^(dim|o)7", &[Action::Set(Seventh, -1)]),
            rule("dim", "^(dim|o)", &[Action::Lower(Third, 1), Action::Lower(Fifth, 1)])
                .unless_followed_by(&["mit"]),
        ],
    },
    Step::InjectTensions,
    Step::Group {
        name: "tension",
        selection: Selection::EveryMatch,
        rules: &[
            rule("#5", "[+#]5", &[Action::Set(Fifth, 1)]),
            rule("b5", "[-b]5", &[Action::Set(Fifth, -1)]),
            rule("M7", "M7", &[Action::Set(Seventh, 1)]),
            rule("7", "7", &[Action::Set(Seventh, 0)]).unless_preceded_by(OMISSION),
            rule("#9", "[+#]9", &[Action::Set(Ninth, 1)]),
            rule("b9", "[-b]9", &[Action::Set(Ninth, -1)]),
            rule("9", "9", &[Action::Set(Ninth, 0)]).unless_preceded_by(OMISSION),
            rule("#11", "[+#]11", &[Action::Set(Eleventh, 1)]),
            rule("b11", "[-b]11", &[Action::Set(Eleventh, -1)]),
            rule("11", "11", &[Action::Set(Eleventh, 0)]).unless_preceded_by(OMISSION),
            rule("#13", "[+#]13", &[Action::Set(Thirteenth, 1)]),
            rule("b13", "[-b]13", &[Action::Set(Thirteenth, -1)]),
            rule("13", "13", &[Action::Set(Thirteenth, 0)]).unless_preceded_by(OMISSION),
        ],
    },
    Step::Group {
        name: "omission",
        selection: Selection::EveryMatch,
        rules: &[
            rule("omit1", "(omit|no)1", &[Action::Omit(Root)]).unless_followed_by(&["1", "3"]),
            rule("omit3", "(omit|no)3", &[Action::Omit(Third)]),
            rule("omit5", "(omit|no)5", &[Action::Omit(Fifth)]),
            rule("omit7", "(omit|no)7", &[Action::Omit(Seventh)]),
            rule("omit9", "(omit|no)9", &[Action::Omit(Ninth)]),
            rule("omit11", "(omit|no)11", &[Action::Omit(Eleventh)]),
            rule("omit13", "(omit|no)13", &[Action::Omit(Thirteenth)]),
        ],
    },
];

/// A rule with its pattern compiled
#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub rule: &'static Rule,
    regex: Regex,
}

impl CompiledRule {
    pub fn new(rule: &'static Rule) -> Self {
        Self {
            rule,
            regex: Regex::new(rule.pattern).expect("invalid regex pattern"),
        }
    }

    /// Leftmost match whose surroundings pass the rule's guards
    fn find(&self, text: &str) -> Option<Range<usize>> {
        let mut start = 0;
        while start <= text.len() {
            let m = self.regex.find_at(text, start)?;
            let before = &text[..m.start()];
            let after = &text[m.end()..];
            let blocked = self.rule.not_preceded_by.iter().any(|g| before.ends_with(g))
                || self.rule.not_followed_by.iter().any(|g| after.starts_with(g));
            if !blocked {
                return Some(m.range());
            }
            start = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// Remove the rule's match from `text`, returning the residual text.
    ///
    /// `None` means the rule did not match and nothing was consumed.
    pub fn consume(&self, text: &str) -> Option<String> {
        let range = self.find(text)?;
        let mut residual = String::with_capacity(text.len() - range.len());
        residual.push_str(&text[..range.start]);
        residual.push_str(&text[range.end..]);
        Some(residual)
    }
}

#[derive(Debug)]
pub(crate) enum CompiledStep {
    Group {
        name: &'static str,
        selection: Selection,
        rules: Vec<CompiledRule>,
    },
    InjectTensions,
}

pub(crate) fn compile(steps: &'static [Step]) -> Vec<CompiledStep> {
    steps
        .iter()
        .map(|step| match *step {
            Step::Group {
                name,
                selection,
                rules,
            } => CompiledStep::Group {
                name,
                selection,
                rules: rules.iter().map(CompiledRule::new).collect(),
            },
            Step::InjectTensions => CompiledStep::InjectTensions,
        })
        .collect()
}
