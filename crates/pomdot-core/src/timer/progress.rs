/// Number of filled cells for `elapsed` out of `total` seconds.
///
/// Rounds down, but shows at least one cell once any time has elapsed and
/// leaves at least one cell empty until the stage is over.
pub fn filled_cells(elapsed_secs: u64, total_secs: u64, width: u16) -> usize {
    let width = u64::from(width);
    if total_secs == 0 || elapsed_secs >= total_secs {
        return width as usize;
    }
    if elapsed_secs == 0 {
        return 0;
    }
    let filled = (u128::from(elapsed_secs) * u128::from(width) / u128::from(total_secs)) as u64;
    filled.max(1).min(width.saturating_sub(1)) as usize
}

/// `[#####-----]`
pub fn render_bar(elapsed_secs: u64, total_secs: u64, width: u16) -> String {
    let filled = filled_cells(elapsed_secs, total_secs, width);
    let empty = usize::from(width) - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_way_is_half_full() {
        assert_eq!(filled_cells(5, 10, 40), 20);
        assert_eq!(render_bar(5, 10, 10), "[#####-----]");
    }

    #[test]
    fn empty_at_start_full_at_end() {
        assert_eq!(filled_cells(0, 1500, 30), 0);
        assert_eq!(filled_cells(1500, 1500, 30), 30);
        assert_eq!(render_bar(0, 60, 10), "[----------]");
        assert_eq!(render_bar(60, 60, 10), "[##########]");
    }

    #[test]
    fn one_cell_as_soon_as_time_passes() {
        assert_eq!(filled_cells(1, 1500, 30), 1);
    }

    #[test]
    fn never_full_before_the_end() {
        assert_eq!(filled_cells(1499, 1500, 30), 29);
        assert_eq!(filled_cells(59, 60, 10), 9);
    }

    #[test]
    fn floors_fractional_cells() {
        // 7/9 of 10 cells is 7.77
        assert_eq!(filled_cells(7, 9, 10), 7);
    }
}
