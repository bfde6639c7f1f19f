use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered tile with a value line and a proportional fill bar.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    color: Color,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            color: Theme::FG,
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);
                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(self.color))]);
                Paragraph::new(value_line).render(inner, buf);

                if inner.height >= 2 {
                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (inner.width as f64 * ratio) as u16;
                    let bar_y = inner.y + 1;

                    for x in inner.x..inner.x + inner.width {
                        let ch = if x < inner.x + filled { '█' } else { '░' };
                        buf[(x, bar_y)].set_char(ch).set_fg(self.color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    let color = match value {
        Some(t) if t >= 30.0 => Theme::ERROR,
        Some(t) if t >= 18.0 => Theme::SUCCESS,
        Some(_) => Theme::HIGHLIGHT,
        None => Theme::DIM,
    };
    GaugeWidget::new(title, value, "°C").range(0.0, 40.0).color(color)
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    let color = match value {
        Some(h) if h >= 85.0 => Theme::WARNING,
        Some(_) => Theme::SUCCESS,
        None => Theme::DIM,
    };
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .color(color)
}

pub fn rainfall_gauge<'a>(title: &'a str, value: Option<f64>, max_mm: f64) -> GaugeWidget<'a> {
    let color = value.map(Theme::rain_color).unwrap_or(Theme::DIM);
    GaugeWidget::new(title, value, "mm")
        .range(0.0, max_mm)
        .color(color)
}
