//! Information gain and the choice of the attribute to split on.
use rayon::prelude::*;

use crate::sample::{AttributeKind, Schema};
use super::node::SplitRule;
use super::statistics::*;


/// A numeric threshold whose gain is at or below this value
/// is treated as no information.
/// Categorical attributes compete at any gain, including zero.
const MIN_GAIN: f64 = 1e-12;


/// The best split found for a subset of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    /// Column of the attribute to split on.
    pub column: usize,
    /// How the attribute is split.
    pub rule: SplitRule,
    /// Information gain of the split.
    pub gain: f64,
}


/// Entropy of a binary event that occurs with probability `q`.
/// Defined as `0` at `q = 0` and `q = 1`.
#[inline]
pub fn entropy(q: f64) -> f64 {
    if q <= 0f64 || q >= 1f64 { return 0f64; }

    -(q * q.log2() + (1f64 - q) * (1f64 - q).log2())
}


/// Information gain obtained by partitioning `total` into `groups`.
/// Empty groups contribute nothing.
pub fn information_gain<I>(total: Counts, groups: I) -> f64
    where I: IntoIterator<Item = Counts>
{
    let n = total.items();
    if n == 0 { return 0f64; }
    let n = n as f64;

    let remainder = groups.into_iter()
        .filter(|group| group.items() > 0)
        .map(|group| (group.items() as f64 / n) * entropy(group.yes_fraction()))
        .sum::<f64>();

    entropy(total.yes_fraction()) - remainder
}


/// Gain of a multiway split with one group per distinct value.
pub fn categorical_gain(values: &[ValueCount]) -> f64 {
    let total = values.iter()
        .fold(Counts::default(), |acc, vc| acc + vc.counts);
    information_gain(total, values.iter().map(|vc| vc.counts))
}


/// Searches the threshold `t` of a numeric attribute that maximizes the
/// gain of the split `value <= t` / `value > t`.
///
/// Candidates are every distinct value except the largest,
/// visited in ascending order; the first maximum wins.
/// Returns `None` if the attribute has fewer than two distinct values
/// (or holds no numbers at all).
pub fn best_threshold(values: &[ValueCount]) -> Option<(i64, f64)> {
    let mut pack = values.iter()
        .filter_map(|vc| vc.value.as_number().map(|x| (x, vc.counts)))
        .collect::<Vec<_>>();
    pack.sort_by_key(|(x, _)| *x);

    // Merge equal numbers so that every entry is a distinct value.
    let mut distinct: Vec<(i64, Counts)> = Vec::with_capacity(pack.len());
    for (x, counts) in pack {
        match distinct.last_mut() {
            Some((y, acc)) if *y == x => { *acc += counts; },
            _ => { distinct.push((x, counts)); },
        }
    }
    if distinct.len() < 2 { return None; }

    let total = distinct.iter()
        .fold(Counts::default(), |acc, (_, c)| acc + *c);

    let mut low = Counts::default();
    let mut best: Option<(i64, f64)> = None;
    for &(threshold, counts) in &distinct[..distinct.len() - 1] {
        low += counts;
        let high = Counts::new(total.yes - low.yes, total.no - low.no);
        let gain = information_gain(total, [low, high]);

        match best {
            Some((_, best_gain)) if best_gain >= gain => {},
            _ => { best = Some((threshold, gain)); },
        }
    }
    best
}


/// Scores one attribute. Returns `None` if the attribute
/// cannot partition the rows into at least two groups.
fn score_attribute(kind: AttributeKind, column: usize, values: &[ValueCount])
    -> Option<SplitCandidate>
{
    match kind {
        AttributeKind::Categorical => {
            if values.len() < 2 { return None; }
            let gain = categorical_gain(values);
            Some(SplitCandidate { column, rule: SplitRule::Categorical, gain })
        },
        AttributeKind::Numeric => {
            best_threshold(values).map(|(threshold, gain)| {
                SplitCandidate { column, rule: SplitRule::Threshold(threshold), gain }
            })
        },
    }
}


/// Returns the split with the maximum information gain.
///
/// Attributes are scored in the order they appear in `stats`
/// and the first maximum wins, so equal gains resolve to the
/// attribute that comes first in the schema.
///
/// A categorical attribute with two or more values is always a candidate,
/// even when its gain is zero.
/// A numeric attribute is a candidate only if its best threshold
/// has a positive gain.
/// Returns `None` if no attribute is a candidate.
pub fn best_split(schema: &Schema, stats: &AttributeStatistics)
    -> Option<SplitCandidate>
{
    let tables = stats.iter().collect::<Vec<_>>();
    let candidates = tables.par_iter()
        .map(|&(column, values)| {
            let kind = schema.attribute(column).kind();
            score_attribute(kind, column, values)
        })
        .collect::<Vec<_>>();

    let candidates = candidates.into_iter()
        .flatten()
        .filter(|candidate| match candidate.rule {
            SplitRule::Threshold(_) => candidate.gain > MIN_GAIN,
            SplitRule::Categorical => true,
        });
    argmax_first(candidates)
}


/// Returns the first candidate with the maximum gain.
fn argmax_first<I>(candidates: I) -> Option<SplitCandidate>
    where I: IntoIterator<Item = SplitCandidate>
{
    candidates.into_iter()
        .fold(None, |best: Option<SplitCandidate>, candidate| {
            match best {
                Some(b) if b.gain >= candidate.gain => Some(b),
                _ => Some(candidate),
            }
        })
}
