//! Width/layout engine: per-item widths, the common fill-mode slot width and
//! the trim pass.
//!
//! Wrap mode sizes the strip to its content and never trims. Fill mode slices
//! the viewport into uniform slots whose boundaries are derived cumulatively,
//! so the spans partition the viewport without a rounding gap or overlap.

use tabstrip_core::{Px, TextShaper, TextStyle};

use crate::item::ItemRecord;

/// Computes every item's intrinsic width and returns `(total, mean)` where
/// `total` includes both text paddings per item.
pub(crate) fn compute_totals(
    records: &mut [ItemRecord],
    shaper: &dyn TextShaper,
    style: &TextStyle,
    text_padding: Px,
) -> (Px, Px) {
    let mut total = Px::ZERO;
    for record in records.iter_mut() {
        total += record.compute_width(shaper, style) + text_padding * 2;
    }
    let mean = if records.is_empty() {
        Px::ZERO
    } else {
        total / records.len() as i32
    };
    (total, mean)
}

/// Computes the fill-mode slot width.
///
/// The even split (`viewport / count`) is clamped by the mean item width;
/// when the leftover is smaller than half a slot the even split wins outright,
/// otherwise `fits_parent_width` may grow the slot up to double its clamped
/// value, still capped at the even split.
pub(crate) fn common_slot_width(
    viewport: Px,
    count: usize,
    mean_item_width: Px,
    fits_parent_width: bool,
) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let even = viewport.to_f32() / count as f32;
    let mut slot = even.min(mean_item_width.to_f32());
    if viewport.to_f32() - slot * (count as f32) < slot / 2.0 {
        slot = even;
    } else if fits_parent_width {
        slot = slot.max((slot * 2.0).min(even));
    }
    slot
}

/// Left edge of slot `index`, derived from cumulative rounding so adjacent
/// spans always tile exactly.
pub(crate) fn slot_left(slot: f32, index: usize) -> Px {
    Px::from_f32((slot * index as f32).round())
}

/// Width of slot `index`.
pub(crate) fn slot_span(slot: f32, index: usize) -> Px {
    slot_left(slot, index + 1) - slot_left(slot, index)
}

/// Applies the trim pass: in fill mode, labels wider than the available text
/// width are tail-ellipsized; everything else (and all of wrap mode) keeps
/// the full layout.
pub(crate) fn apply_trim(
    records: &mut [ItemRecord],
    wrap: bool,
    avail_text_width: Px,
    shaper: &dyn TextShaper,
    style: &TextStyle,
) {
    for record in records.iter_mut() {
        if !wrap && record.width > avail_text_width {
            record.trim(avail_text_width, shaper, style);
        } else {
            record.untrim(shaper, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use proptest::prelude::*;
    use tabstrip_core::FixedMetricsShaper;

    fn records(labels: &[&str]) -> Vec<ItemRecord> {
        labels
            .iter()
            .map(|label| ItemRecord::new(Item::from_text(*label)))
            .collect()
    }

    #[test]
    fn test_totals_include_padding_both_sides() {
        let shaper = FixedMetricsShaper::new(Px(10), Px(20));
        let style = TextStyle::default();
        let mut records = records(&["abcd", "abcdef", "abcde"]);
        let (total, mean) = compute_totals(&mut records, &shaper, &style, Px(19));
        // 40 + 60 + 50 item widths, plus 19 on both sides of each.
        assert_eq!(total, Px(264));
        assert_eq!(mean, Px(88));
    }

    #[test]
    fn test_totals_empty_list() {
        let shaper = FixedMetricsShaper::new(Px(10), Px(20));
        let (total, mean) = compute_totals(&mut [], &shaper, &TextStyle::default(), Px(19));
        assert_eq!(total, Px::ZERO);
        assert_eq!(mean, Px::ZERO);
    }

    #[test]
    fn test_common_slot_snaps_to_even_split() {
        // Mean-clamped slot of 88 leaves 36px of slack, under half a slot,
        // so the even split of 100 wins.
        let slot = common_slot_width(Px(300), 3, Px(88), false);
        assert_eq!(slot, 100.0);
    }

    #[test]
    fn test_common_slot_keeps_mean_clamp_when_slack_is_large() {
        // 2 items of mean 50 inside 300: slack 200 >= 25, no fit growth.
        let slot = common_slot_width(Px(300), 2, Px(50), false);
        assert_eq!(slot, 50.0);
    }

    #[test]
    fn test_common_slot_fits_parent_doubles_at_most() {
        let slot = common_slot_width(Px(300), 2, Px(50), true);
        assert_eq!(slot, 100.0);

        // Doubling is capped at the even split.
        let slot = common_slot_width(Px(180), 2, Px(50), true);
        assert_eq!(slot, 90.0);
    }

    #[test]
    fn test_common_slot_empty() {
        assert_eq!(common_slot_width(Px(300), 0, Px::ZERO, false), 0.0);
    }

    #[test]
    fn test_slot_spans_tile_exactly() {
        let slot = common_slot_width(Px(301), 3, Px(500), false);
        let sum: i32 = (0..3).map(|i| slot_span(slot, i).raw()).sum();
        assert_eq!(sum, 301);
    }

    #[test]
    fn test_trim_direction() {
        let shaper = FixedMetricsShaper::new(Px(10), Px(20));
        let style = TextStyle::default();
        let mut records = records(&["abcd", "abcdefgh"]);
        for record in records.iter_mut() {
            record.compute_width(&shaper, &style);
        }

        apply_trim(&mut records, false, Px(40), &shaper, &style);
        // Exactly the available width: untrimmed.
        assert_eq!(
            records[0].layout.as_ref().map(|l| l.text.as_str()),
            Some("abcd")
        );
        // Wider than available: trimmed.
        assert!(
            records[1]
                .layout
                .as_ref()
                .is_some_and(|l| l.text.ends_with('…'))
        );

        // Wrap mode never trims.
        apply_trim(&mut records, true, Px(40), &shaper, &style);
        assert_eq!(
            records[1].layout.as_ref().map(|l| l.text.as_str()),
            Some("abcdefgh")
        );
    }

    proptest! {
        #[test]
        fn prop_even_split_partitions_viewport(
            viewport in 1i32..20_000,
            count in 1usize..48,
        ) {
            // A huge mean forces the even split.
            let slot = common_slot_width(Px(viewport), count, Px(i32::MAX / 2), false);
            let sum: i64 = (0..count).map(|i| slot_span(slot, i).raw() as i64).sum();
            prop_assert_eq!(sum, viewport as i64);
        }

        #[test]
        fn prop_slot_lefts_are_monotonic(
            viewport in 1i32..20_000,
            count in 1usize..48,
        ) {
            let slot = common_slot_width(Px(viewport), count, Px(i32::MAX / 2), false);
            for i in 0..count {
                prop_assert!(slot_left(slot, i) <= slot_left(slot, i + 1));
            }
        }
    }
}
