use cfb_api::present::{BarSegment, ProbabilityBar};
use std::ops::Range;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::Widget;

const FILLED: &str = "█";
const EMPTY: &str = "─";

/// Win probability track, one row high. Segment geometry comes from
/// `ProbabilityBar` and is only scaled to terminal columns here.
pub struct ProbabilityBarWidget<'a> {
    pub bar: &'a ProbabilityBar,
}

impl Widget for ProbabilityBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }

        let outline = Style::default().fg(hex_color(&self.bar.outline).unwrap_or(Color::DarkGray));
        let cols = area.width - 2;
        let first = columns(&self.bar.first, cols, self.bar.track_width);
        let second = columns(&self.bar.second, cols, self.bar.track_width);
        let first_style = segment_style(&self.bar.first);
        let second_style = segment_style(&self.bar.second);

        buf.set_string(area.x, area.y, "[", outline);
        for col in 0..cols {
            let (symbol, style) = if first.contains(&col) {
                (FILLED, first_style)
            } else if second.contains(&col) {
                (FILLED, second_style)
            } else {
                (EMPTY, outline)
            };
            if let Some(cell) = buf.cell_mut((area.x + 1 + col, area.y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
        buf.set_string(area.x + 1 + cols, area.y, "]", outline);
    }
}

/// Columns covered by `segment` on a track `cols` wide.
pub fn columns(segment: &BarSegment, cols: u16, track_width: f64) -> Range<u16> {
    if track_width <= 0.0 {
        return 0..0;
    }
    let scale = |x: f64| ((x / track_width).clamp(0.0, 1.0) * f64::from(cols)).round() as u16;
    scale(segment.start)..scale(segment.end)
}

/// "#RRGGBB" to a terminal color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn segment_style(segment: &BarSegment) -> Style {
    Style::default().fg(hex_color(&segment.color).unwrap_or(Color::Gray))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bar: &ProbabilityBar, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        ProbabilityBarWidget { bar }.render(area, &mut buf);
        buf
    }

    fn symbols(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_color("#FF8200"), Some(Color::Rgb(255, 130, 0)));
        assert_eq!(hex_color("#5a5a5a"), Some(Color::Rgb(90, 90, 90)));
        assert_eq!(hex_color("FF8200"), None);
        assert_eq!(hex_color("#FFF"), None);
        assert_eq!(hex_color("#GG0000"), None);
    }

    #[test]
    fn even_game_fills_both_halves() {
        let bar = ProbabilityBar::new(0.5, 0.5, "#FF8200", "#9E1B32");
        let buf = render(&bar, 12);
        assert_eq!(symbols(&buf), "[██████████]");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0xFF, 0x82, 0x00));
        assert_eq!(buf[(10, 0)].fg, Color::Rgb(0x9E, 0x1B, 0x32));
    }

    #[test]
    fn tie_probability_leaves_a_gap() {
        let bar = ProbabilityBar::new(0.3, 0.5, "#111111", "#222222");
        let buf = render(&bar, 12);
        assert_eq!(symbols(&buf), "[███──█████]");
    }

    #[test]
    fn scales_segments_to_columns() {
        let bar = ProbabilityBar::new(0.25, 0.75, "#111111", "#222222");
        assert_eq!(columns(&bar.first, 20, bar.track_width), 0..5);
        assert_eq!(columns(&bar.second, 20, bar.track_width), 5..20);
    }

    #[test]
    fn too_narrow_renders_nothing() {
        let bar = ProbabilityBar::new(0.5, 0.5, "#111111", "#222222");
        let buf = render(&bar, 2);
        assert_eq!(symbols(&buf), "  ");
    }
}
