/// Horizontal bar for inline use, e.g. `████████░░░░░░░░░░░░`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Bar plus right-aligned percentage, e.g. `████████░░  80%`.
#[must_use]
pub fn percentage_bar(percentage: u8, width: usize) -> String {
    let filled = ((usize::from(percentage) * width) / 100).min(width);
    let empty = width.saturating_sub(filled);
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(empty),
        percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bar_scales_to_max() {
        assert_eq!(ascii_bar(5, 10, 4), "██░░");
        assert_eq!(ascii_bar(20, 10, 4), "████");
        assert_eq!(ascii_bar(3, 0, 3), "░░░");
    }

    #[test]
    fn percentage_bar_shows_the_figure() {
        assert_eq!(percentage_bar(50, 4), "██░░  50%");
        assert_eq!(percentage_bar(100, 2), "██ 100%");
    }
}
