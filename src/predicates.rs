//! Per-pixel removal rules for the two thinning variants.
//!
//! Both rules inspect the 8-neighborhood p2..p9 of an interior pixel,
//! enumerated clockwise starting from the pixel above:
//!
//! ```text
//! p9 p2 p3
//! p8 p1 p4
//! p7 p6 p5
//! ```
//!
//! Neither rule tests the center pixel p1; marking a background pixel is
//! harmless because clearing it changes nothing.

/// Read the clockwise 8-neighborhood of `(row, col)` from a row-major
/// buffer. The caller guarantees `(row, col)` is an interior pixel.
pub(crate) fn neighborhood(data: &[u8], width: usize, row: usize, col: usize) -> [bool; 8] {
    let up = (row - 1) * width + col;
    let mid = row * width + col;
    let down = (row + 1) * width + col;
    [
        data[up] != 0,       // p2
        data[up + 1] != 0,   // p3
        data[mid + 1] != 0,  // p4
        data[down + 1] != 0, // p5
        data[down] != 0,     // p6
        data[down - 1] != 0, // p7
        data[mid - 1] != 0,  // p8
        data[up - 1] != 0,   // p9
    ]
}

/// The Zhang-Suen removal rule.
///
/// `A` is the number of 0-to-1 transitions in the closed clockwise walk
/// p2..p9..p2 and `B` the number of set neighbors. The neighbor-triple
/// products `m1`/`m2` swap between the sub-iterations to avoid eroding
/// from one direction only.
pub(crate) fn zhang_suen(neighbors: &[bool; 8], sub_iter: usize) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = *neighbors;
    let cycle = [p2, p3, p4, p5, p6, p7, p8, p9, p2];
    let a = cycle.windows(2).filter(|pair| !pair[0] && pair[1]).count();
    let b = neighbors.iter().filter(|&&set| set).count();
    let (m1, m2) = if sub_iter == 0 {
        (p2 && p4 && p6, p4 && p6 && p8)
    } else {
        (p2 && p4 && p8, p2 && p6 && p8)
    };
    a == 1 && (2..=6).contains(&b) && !m1 && !m2
}

/// The Guo-Hall removal rule.
pub(crate) fn guo_hall(neighbors: &[bool; 8], sub_iter: usize) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = *neighbors;
    let c = usize::from(!p2 && (p3 || p4))
        + usize::from(!p4 && (p5 || p6))
        + usize::from(!p6 && (p7 || p8))
        + usize::from(!p8 && (p9 || p2));
    let n1 = usize::from(p9 || p2)
        + usize::from(p3 || p4)
        + usize::from(p5 || p6)
        + usize::from(p7 || p8);
    let n2 = usize::from(p2 || p3)
        + usize::from(p4 || p5)
        + usize::from(p6 || p7)
        + usize::from(p8 || p9);
    let n = n1.min(n2);
    let m = if sub_iter == 0 {
        (p6 || p7 || !p9) && p8
    } else {
        (p2 || p3 || !p5) && p4
    };
    c == 1 && (2..=3).contains(&n) && !m
}
