//! Note value arithmetic
//!
//! Splits a duration in divisions into notatable values (plain, dotted and
//! triplet), preferring few pieces, few triplets and few dots.

use crate::model::gcd;

/// Graphic note type (`<type>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteType {
    pub fn as_musicxml(&self) -> &'static str {
        match self {
            NoteType::Whole => "whole",
            NoteType::Half => "half",
            NoteType::Quarter => "quarter",
            NoteType::Eighth => "eighth",
            NoteType::Sixteenth => "16th",
            NoteType::ThirtySecond => "32nd",
            NoteType::SixtyFourth => "64th",
        }
    }
}

/// A notatable value: type, dots and whether it sits in a 3:2 triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteValue {
    pub note_type: NoteType,
    pub dots: u8,
    pub triplet: bool,
}

impl NoteValue {
    const fn plain(note_type: NoteType) -> Self {
        Self {
            note_type,
            dots: 0,
            triplet: false,
        }
    }

    const fn dotted(note_type: NoteType) -> Self {
        Self {
            note_type,
            dots: 1,
            triplet: false,
        }
    }

    const fn triplet(note_type: NoteType) -> Self {
        Self {
            note_type,
            dots: 0,
            triplet: true,
        }
    }

    /// Relative cost used to choose between equal-length spellings
    fn cost(&self) -> u64 {
        4 + if self.triplet { 2 } else { 0 } + self.dots as u64
    }
}

/// Values as (numerator, denominator) quarter notes, longest first
const NOTE_VALUES: [(u64, u64, NoteValue); 16] = [
    (4, 1, NoteValue::plain(NoteType::Whole)),
    (3, 1, NoteValue::dotted(NoteType::Half)),
    (2, 1, NoteValue::plain(NoteType::Half)),
    (3, 2, NoteValue::dotted(NoteType::Quarter)),
    (4, 3, NoteValue::triplet(NoteType::Half)),
    (1, 1, NoteValue::plain(NoteType::Quarter)),
    (3, 4, NoteValue::dotted(NoteType::Eighth)),
    (2, 3, NoteValue::triplet(NoteType::Quarter)),
    (1, 2, NoteValue::plain(NoteType::Eighth)),
    (3, 8, NoteValue::dotted(NoteType::Sixteenth)),
    (1, 3, NoteValue::triplet(NoteType::Eighth)),
    (1, 4, NoteValue::plain(NoteType::Sixteenth)),
    (3, 16, NoteValue::dotted(NoteType::ThirtySecond)),
    (1, 6, NoteValue::triplet(NoteType::Sixteenth)),
    (1, 8, NoteValue::plain(NoteType::ThirtySecond)),
    (1, 16, NoteValue::plain(NoteType::SixtyFourth)),
];

/// Note values expressible at this resolution, as (length in divisions, value)
fn available_values(divisions: u32) -> Vec<(u64, NoteValue)> {
    NOTE_VALUES
        .iter()
        .filter_map(|&(num, den, value)| {
            let scaled = divisions as u64 * num;
            (scaled % den == 0 && scaled > 0).then(|| (scaled / den, value))
        })
        .collect()
}

/// Split a duration into tied pieces, longest first
///
/// A tail that no value can express is returned with `None` as its value.
/// Whole lengths beyond two of the longest value are taken greedily; the
/// rest is split at minimum cost in steps of the gcd of all value lengths.
pub fn split_duration(duration: u64, divisions: u32) -> Vec<(u64, Option<NoteValue>)> {
    if duration == 0 {
        return Vec::new();
    }
    let values = available_values(divisions);
    let Some(&(longest, longest_value)) = values.first() else {
        return vec![(duration, None)];
    };

    let mut pieces = Vec::new();
    let mut remaining = duration;
    while remaining > 2 * longest {
        pieces.push((longest, Some(longest_value)));
        remaining -= longest;
    }

    let unit = values.iter().fold(0, |acc, (length, _)| gcd(acc, *length));
    let size = (remaining / unit) as usize;

    // best[a] = (cost, index of last value) for the cheapest way to fill `a` units
    let mut best: Vec<Option<(u64, usize)>> = vec![None; size + 1];
    best[0] = Some((0, usize::MAX));
    for amount in 1..=size {
        for (index, (length, value)) in values.iter().enumerate() {
            let steps = (*length / unit) as usize;
            if steps > amount {
                continue;
            }
            if let Some((cost, _)) = best[amount - steps] {
                let candidate = cost + value.cost();
                if best[amount].map_or(true, |(c, _)| candidate < c) {
                    best[amount] = Some((candidate, index));
                }
            }
        }
    }

    // Fill as much as possible; anything left is written without a type
    let filled = (0..=size).rev().find(|&a| best[a].is_some()).unwrap_or(0);
    let mut amount = filled;
    while amount > 0 {
        match best[amount] {
            Some((_, index)) if index != usize::MAX => {
                let (length, value) = values[index];
                pieces.push((length, Some(value)));
                amount -= (length / unit) as usize;
            }
            _ => break,
        }
    }
    pieces.sort_by(|a, b| b.0.cmp(&a.0));

    let tail = remaining - filled as u64 * unit;
    if tail > 0 {
        pieces.push((tail, None));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(pieces: &[(u64, Option<NoteValue>)]) -> Vec<u64> {
        pieces.iter().map(|(l, _)| *l).collect()
    }

    #[test]
    fn test_exact_values() {
        assert_eq!(split_duration(12, 12), vec![(12, Some(NoteValue::plain(NoteType::Quarter)))]);
        assert_eq!(split_duration(18, 12), vec![(18, Some(NoteValue::dotted(NoteType::Quarter)))]);
        assert_eq!(split_duration(4, 12), vec![(4, Some(NoteValue::triplet(NoteType::Eighth)))]);
        assert_eq!(split_duration(48, 12), vec![(48, Some(NoteValue::plain(NoteType::Whole)))]);
        assert!(split_duration(5, 12).len() > 1);
    }

    #[test]
    fn test_single_value_is_not_split() {
        let pieces = split_duration(36, 12);
        assert_eq!(pieces, vec![(36, Some(NoteValue::dotted(NoteType::Half)))]);
    }

    #[test]
    fn test_prefers_plain_over_dotted_plus_triplet() {
        // 5/3 quarter: quarter + quarter triplet rather than dotted quarter + sixteenth triplet
        let pieces = split_duration(20, 12);
        assert_eq!(lengths(&pieces), vec![12, 8]);
    }

    #[test]
    fn test_long_duration() {
        let pieces = split_duration(60, 12);
        assert_eq!(lengths(&pieces), vec![48, 12]);
        assert_eq!(lengths(&pieces).iter().sum::<u64>(), 60);
    }

    #[test]
    fn test_inexpressible_tail() {
        // 480 tpq: a 7-tick remainder is smaller than a 64th (30 ticks)
        let pieces = split_duration(487, 480);
        assert_eq!(pieces[0], (480, Some(NoteValue::plain(NoteType::Quarter))));
        assert_eq!(pieces.last(), Some(&(7, None)));
        assert_eq!(lengths(&pieces).iter().sum::<u64>(), 487);
    }

    #[test]
    fn test_many_measures_at_coarse_resolution() {
        let pieces = split_duration(32767 * 4 * 255, 32767);
        assert_eq!(pieces.len(), 255);
        assert!(pieces
            .iter()
            .all(|&p| p == (32767 * 4, Some(NoteValue::plain(NoteType::Whole)))));
    }

    #[test]
    fn test_fine_resolution_keeps_tail() {
        let divisions = 480_000_000u32;
        let quarter = divisions as u64;
        let pieces = split_duration(3 * quarter + 1, divisions);
        assert_eq!(
            pieces,
            vec![
                (3 * quarter, Some(NoteValue::dotted(NoteType::Half))),
                (1, None),
            ]
        );
    }

    #[test]
    fn test_zero_duration() {
        assert!(split_duration(0, 12).is_empty());
    }
}
