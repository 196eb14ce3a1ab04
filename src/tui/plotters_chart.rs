//! Plotters-powered figure widget for Ratatui.
//!
//! The widget draws a `Figure` with the same routine used for SVG output,
//! rendered into the Ratatui buffer through `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{Figure, Theme, draw_figure};

/// Render-only wrapper around a prepared figure.
pub struct FigureChart<'a> {
    pub figure: &'a Figure,
    pub theme: Theme,
}

impl<'a> Widget for FigureChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out axes in a tiny area; show a hint instead of panicking.
        if area.width < 30 || area.height < 10 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let theme = self.theme;
        let widget = widget_fn(move |root| {
            draw_figure(&root, figure, &theme)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
