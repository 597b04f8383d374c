//! Image preview component
//!
//! Terminals have no pixels, so each cell shows two vertically stacked
//! pixels: the upper half block "▀" in the top pixel's color over a
//! background of the bottom pixel's color. Needs a truecolor terminal to
//! look right; 256-color terminals get an approximation.

use crate::gallery::detail::PreviewState;
use crate::tui::theme::Theme;
use image::RgbImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Shown when the record has no image or the image failed to load
pub const PLACEHOLDER_TEXT: &str = "Image not available";

/// Half-block raster widget, centered in its area
pub struct HalfBlockImage<'a> {
    image: &'a RgbImage,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(image: &'a RgbImage) -> Self {
        Self { image }
    }
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = (self.image.width() as u16).min(area.width);
        let rows = (self.image.height().div_ceil(2) as u16).min(area.height);

        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let x = col as u32;
                let y = row as u32 * 2;

                let upper = rgb(self.image.get_pixel(x, y));
                let lower = if y + 1 < self.image.height() {
                    rgb(self.image.get_pixel(x, y + 1))
                } else {
                    Color::Reset
                };

                buf[(left + col, top + row)]
                    .set_symbol("▀")
                    .set_fg(upper)
                    .set_bg(lower);
            }
        }
    }
}

fn rgb(pixel: &image::Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb(r, g, b)
}

/// Render the framed preview area for a detail view
pub fn render(f: &mut Frame, area: Rect, state: &PreviewState, theme: &Theme, spinner: char) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Image ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let message = match state {
        PreviewState::Pending => return,
        PreviewState::Ready(preview) => match preview.fit(inner.width, inner.height) {
            Some(fitted) => {
                f.render_widget(HalfBlockImage::new(&fitted), inner);
                return;
            }
            None => return, // area too small to draw anything
        },
        PreviewState::Loading => format!("{} Loading image...", spinner),
        PreviewState::Unavailable => PLACEHOLDER_TEXT.to_string(),
    };

    let middle = Rect::new(
        inner.x,
        inner.y + inner.height / 2,
        inner.width,
        inner.height.min(1),
    );
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center),
        middle,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_half_blocks_pair_rows() {
        let mut image = RgbImage::new(2, 3);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 2, Rgb([0, 255, 0]));

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        HalfBlockImage::new(&image).render(area, &mut buf);

        let top_left = &buf[(0, 0)];
        assert_eq!(top_left.symbol(), "▀");
        assert_eq!(top_left.fg, Color::Rgb(255, 0, 0));
        assert_eq!(top_left.bg, Color::Rgb(0, 0, 255));

        // Odd height: last row has no lower pixel
        let bottom_right = &buf[(1, 1)];
        assert_eq!(bottom_right.fg, Color::Rgb(0, 255, 0));
        assert_eq!(bottom_right.bg, Color::Reset);
    }

    #[test]
    fn test_small_image_is_centered() {
        let image = RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]));
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        HalfBlockImage::new(&image).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].symbol(), "▀");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
