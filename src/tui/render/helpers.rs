use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::util::unicode;

/// Filled/empty bar for a percentage, exactly `width` cells wide
pub(super) fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (width * percent.min(100) as usize + 50) / 100;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
