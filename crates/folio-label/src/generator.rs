#![forbid(unsafe_code)]

//! Label sequence generation.
//!
//! Labels depend only on a leaf's position in the ordered selection, so the
//! generator works on counts and never sees the tree. Callers pass leaves in
//! tree order and zip the result back onto them.
//!
//! # Rules
//!
//! | method       | two_up | label for leaf `i`                                   |
//! |--------------|--------|------------------------------------------------------|
//! | `sequential` | no     | `unit + (start + i)`                                 |
//! | `sequential` | yes    | pair `k`: `unit + n + sep + (n + 1)`, `n = start + 2k` |
//! | `foliate`    | no     | pair `k`: `"f. " + (start + k) + side`               |
//! | `foliate`    | yes    | pair `k`: `"f. " + n + first + sep + n + second`     |
//!
//! A trailing unpaired leaf never gets a merged label: it is `unit + n` in
//! sequential mode and `"f. " + n + front` in foliate mode.

use crate::scheme::{BracketLocation, FOLIO_PREFIX, LabelMethod, LabelScheme, StartWith, TwoUpDirection};

/// Generate one label per leaf, in order.
///
/// Pure: only the length of `leaves` is consulted.
#[must_use]
pub fn label_sequence<T>(leaves: &[T], scheme: &LabelScheme) -> Vec<String> {
    let labels: Vec<String> = Labels::new(scheme, leaves.len()).collect();
    tracing::debug!(
        target: "folio.label",
        count = labels.len(),
        method = ?scheme.method,
        two_up = scheme.two_up,
        "label sequence generated"
    );
    labels
}

/// Lazy label iterator over `len` positions.
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    scheme: &'a LabelScheme,
    len: usize,
    index: usize,
}

impl<'a> Labels<'a> {
    #[must_use]
    pub fn new(scheme: &'a LabelScheme, len: usize) -> Self {
        Self {
            scheme,
            len,
            index: 0,
        }
    }

    /// Label at `index` for a run of `self.len` leaves.
    fn label_at(&self, index: usize) -> String {
        let scheme = self.scheme;
        let pair = (index / 2) as u64;
        let paired = index / 2 * 2 + 1 < self.len;

        let label = match scheme.method {
            LabelMethod::Sequential if scheme.two_up => {
                let n = u64::from(scheme.start_num) + 2 * pair;
                if paired {
                    let (left, right) = self.ordered(self.numeral(n), self.numeral(n + 1));
                    format!("{}{left}{}{right}", scheme.unit_label, scheme.two_up_separator)
                } else {
                    format!("{}{}", scheme.unit_label, self.numeral(n))
                }
            }
            LabelMethod::Sequential => {
                let n = u64::from(scheme.start_num) + index as u64;
                format!("{}{}", scheme.unit_label, self.numeral(n))
            }
            LabelMethod::Foliate => {
                let n = self.numeral(u64::from(scheme.start_num) + pair);
                if !paired {
                    format!("{FOLIO_PREFIX}{n}{}", scheme.front_label)
                } else {
                    let (first, second) = match scheme.start_with {
                        StartWith::Front => (&scheme.front_label, &scheme.back_label),
                        StartWith::Back => (&scheme.back_label, &scheme.front_label),
                    };
                    if scheme.two_up {
                        let (left, right) = self.ordered(format!("{n}{first}"), format!("{n}{second}"));
                        format!("{FOLIO_PREFIX}{left}{}{right}", scheme.two_up_separator)
                    } else if index % 2 == 0 {
                        format!("{FOLIO_PREFIX}{n}{first}")
                    } else {
                        format!("{FOLIO_PREFIX}{n}{second}")
                    }
                }
            }
        };

        if scheme.add_brackets && scheme.bracket_location == BracketLocation::Label {
            format!("[{label}]")
        } else {
            label
        }
    }

    fn numeral(&self, n: u64) -> String {
        if self.scheme.add_brackets && self.scheme.bracket_location == BracketLocation::Numeral {
            format!("[{n}]")
        } else {
            n.to_string()
        }
    }

    fn ordered(&self, first: String, second: String) -> (String, String) {
        match self.scheme.two_up_direction {
            TwoUpDirection::Ltr => (first, second),
            TwoUpDirection::Rtl => (second, first),
        }
    }
}

impl Iterator for Labels<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let label = self.label_at(self.index);
        self.index += 1;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Labels<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(count: usize, scheme: &LabelScheme) -> Vec<String> {
        label_sequence(&vec![(); count], scheme)
    }

    #[test]
    fn sequential_counts_from_start() {
        let scheme = LabelScheme::paginated("p.", 10);
        assert_eq!(labels(2, &scheme), ["p.10", "p.11"]);
    }

    #[test]
    fn sequential_default_unit_has_space() {
        assert_eq!(labels(3, &LabelScheme::default()), ["p. 1", "p. 2", "p. 3"]);
    }

    #[test]
    fn foliate_pairs_share_numeral() {
        let scheme = LabelScheme::foliated(10);
        assert_eq!(labels(2, &scheme), ["f. 10r.", "f. 10v."]);
        assert_eq!(
            labels(4, &scheme),
            ["f. 10r.", "f. 10v.", "f. 11r.", "f. 11v."]
        );
    }

    #[test]
    fn foliate_odd_tail_is_front_only() {
        let scheme = LabelScheme::foliated(1);
        assert_eq!(labels(3, &scheme), ["f. 1r.", "f. 1v.", "f. 2r."]);
    }

    #[test]
    fn start_with_back_swaps_within_pairs() {
        let scheme = LabelScheme {
            start_with: StartWith::Back,
            ..LabelScheme::foliated(1)
        };
        assert_eq!(labels(3, &scheme), ["f. 1v.", "f. 1r.", "f. 2r."]);
    }

    #[test]
    fn two_up_foliate_merges_pair() {
        let scheme = LabelScheme::foliated(10).with_two_up("-");
        assert_eq!(labels(2, &scheme), ["f. 10r.-10v.", "f. 10r.-10v."]);
    }

    #[test]
    fn two_up_foliate_tail_is_not_merged() {
        let scheme = LabelScheme::foliated(10).with_two_up("-");
        assert_eq!(labels(3, &scheme)[2], "f. 11r.");
    }

    #[test]
    fn two_up_rtl_reverses_halves() {
        let scheme = LabelScheme {
            two_up_direction: TwoUpDirection::Rtl,
            ..LabelScheme::foliated(3).with_two_up("/")
        };
        assert_eq!(labels(2, &scheme), ["f. 3v./3r.", "f. 3v./3r."]);
    }

    #[test]
    fn two_up_sequential_spans_two_numbers() {
        let scheme = LabelScheme::paginated("p. ", 1).with_two_up("-");
        assert_eq!(labels(5, &scheme), ["p. 1-2", "p. 1-2", "p. 3-4", "p. 3-4", "p. 5"]);
    }

    #[test]
    fn brackets_wrap_whole_label() {
        let scheme = LabelScheme::foliated(1).with_brackets(BracketLocation::Label);
        assert_eq!(labels(2, &scheme), ["[f. 1r.]", "[f. 1v.]"]);
    }

    #[test]
    fn brackets_wrap_each_numeral() {
        let scheme = LabelScheme::foliated(7)
            .with_two_up("-")
            .with_brackets(BracketLocation::Numeral);
        assert_eq!(labels(2, &scheme), ["f. [7]r.-[7]v.", "f. [7]r.-[7]v."]);

        let pages = LabelScheme::paginated("p. ", 4).with_brackets(BracketLocation::Numeral);
        assert_eq!(labels(1, &pages), ["p. [4]"]);
    }

    #[test]
    fn empty_selection_yields_nothing() {
        assert!(labels(0, &LabelScheme::foliated(1)).is_empty());
    }

    #[test]
    fn iterator_reports_exact_size() {
        let scheme = LabelScheme::default();
        let mut iter = Labels::new(&scheme, 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }
}
