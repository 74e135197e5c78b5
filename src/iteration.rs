//! One thinning sub-iteration: banded classification followed by a
//! single-threaded removal step.

use crate::image::BinaryImage;
use crate::predicates;
use crate::Variant;
use log::*;
use std::ops::Range;

/// Run one sub-iteration over `image` and return how many foreground pixels
/// were removed.
///
/// Classification writes a fresh marker raster; every worker owns a disjoint
/// band of marker rows, so no synchronization is needed. All workers are
/// joined before the marker is applied, which keeps neighbor reads and pixel
/// clears from racing.
pub(crate) fn sub_iteration(
    image: &mut BinaryImage,
    sub_iter: usize,
    variant: Variant,
    bands: usize,
) -> usize {
    let width = image.width();
    let height = image.height();
    let mut marker = vec![0u8; width * height];
    if width > 2 && height > 2 {
        classify(image, &mut marker, sub_iter, variant, bands);
    }

    // Removal stays single threaded. Only pixels that were actually
    // foreground count toward convergence; the predicates never test the
    // center pixel, so background pixels can carry a harmless mark.
    let mut removed = 0usize;
    for (pixel, &mark) in image.data_mut().iter_mut().zip(&marker) {
        if mark != 0 && *pixel != 0 {
            *pixel = 0;
            removed += 1;
        }
    }
    trace!("sub-iteration {} removed {} pixels", sub_iter, removed);
    removed
}

fn classify(
    image: &BinaryImage,
    marker: &mut [u8],
    sub_iter: usize,
    variant: Variant,
    bands: usize,
) {
    let width = image.width();
    let ranges = band_ranges(1..image.height() - 1, bands);
    let slices = band_slices(marker, &ranges, width);

    #[cfg(feature = "rayon")]
    rayon::scope(|scope| {
        for (rows, band) in slices {
            scope.spawn(move |_| classify_rows(image, band, rows, sub_iter, variant));
        }
    });

    #[cfg(not(feature = "rayon"))]
    for (rows, band) in slices {
        classify_rows(image, band, rows, sub_iter, variant);
    }
}

/// Partition `rows` into at most `bands` contiguous ranges. The division
/// remainder goes to the final band so every row is classified exactly once.
fn band_ranges(rows: Range<usize>, bands: usize) -> Vec<Range<usize>> {
    let count = rows.end.saturating_sub(rows.start);
    if count == 0 {
        return Vec::new();
    }
    let bands = bands.clamp(1, count);
    let size = count / bands;
    let mut ranges = Vec::with_capacity(bands);
    let mut start = rows.start;
    for band in 0..bands {
        let end = if band == bands - 1 {
            rows.end
        } else {
            start + size
        };
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Split the marker raster into per-band row slices. The slices are
/// disjoint, which is what lets band workers write without locks.
fn band_slices<'a>(
    marker: &'a mut [u8],
    ranges: &[Range<usize>],
    width: usize,
) -> Vec<(Range<usize>, &'a mut [u8])> {
    let mut slices = Vec::with_capacity(ranges.len());
    let mut tail: &mut [u8] = marker;
    let mut row = 0usize;
    for rows in ranges {
        let rest = std::mem::take(&mut tail);
        let (_, rest) = rest.split_at_mut((rows.start - row) * width);
        let (band, rest) = rest.split_at_mut(rows.len() * width);
        slices.push((rows.clone(), band));
        tail = rest;
        row = rows.end;
    }
    slices
}

fn classify_rows(
    image: &BinaryImage,
    band: &mut [u8],
    rows: Range<usize>,
    sub_iter: usize,
    variant: Variant,
) {
    let width = image.width();
    let data = image.data();
    let first = rows.start;
    for row in rows {
        let row_marker = &mut band[(row - first) * width..][..width];
        for col in 1..width - 1 {
            let neighbors = predicates::neighborhood(data, width, row, col);
            let remove = match variant {
                Variant::ZhangSuen => predicates::zhang_suen(&neighbors, sub_iter),
                Variant::GuoHall => predicates::guo_hall(&neighbors, sub_iter),
            };
            if remove {
                row_marker[col] = 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{band_ranges, band_slices, sub_iteration};
    use crate::image::BinaryImage;
    use crate::Variant;

    #[test]
    fn remainder_rows_go_to_the_final_band() {
        let ranges = band_ranges(1..11, 4);
        assert_eq!(ranges, vec![1..3, 3..5, 5..7, 7..11]);
    }

    #[test]
    fn bands_are_clamped_to_the_row_count() {
        let ranges = band_ranges(1..4, 16);
        assert_eq!(ranges, vec![1..2, 2..3, 3..4]);
    }

    #[test]
    fn no_interior_rows_means_no_bands() {
        assert!(band_ranges(1..1, 4).is_empty());
    }

    #[test]
    fn band_slices_cover_each_interior_row_once() {
        let width = 3;
        let mut marker = vec![0u8; width * 12];
        let ranges = band_ranges(1..11, 5);
        let slices = band_slices(&mut marker, &ranges, width);
        for (rows, band) in &slices {
            assert_eq!(band.len(), rows.len() * width);
        }
        let total: usize = slices.iter().map(|(_, band)| band.len()).sum();
        assert_eq!(total, width * 10);
    }

    #[test]
    fn first_zhang_suen_sub_iteration_erodes_a_block_from_south_and_east() {
        #[rustfmt::skip]
        let mut mask = BinaryImage::from_raw(5, 5, vec![
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ])
        .unwrap();
        let removed = sub_iteration(&mut mask, 0, Variant::ZhangSuen, 2);
        assert_eq!(removed, 6);
        #[rustfmt::skip]
        let expected = BinaryImage::from_raw(5, 5, vec![
            0, 0, 0, 0, 0,
            0, 0, 1, 0, 0,
            0, 1, 1, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
        ])
        .unwrap();
        assert_eq!(mask, expected);
    }

    #[test]
    fn degenerate_rasters_have_nothing_to_classify() {
        let mut narrow = BinaryImage::from_raw(2, 6, vec![1; 12]).unwrap();
        assert_eq!(sub_iteration(&mut narrow, 0, Variant::ZhangSuen, 4), 0);
        let mut short = BinaryImage::from_raw(6, 1, vec![1; 6]).unwrap();
        assert_eq!(sub_iteration(&mut short, 1, Variant::GuoHall, 4), 0);
    }
}
