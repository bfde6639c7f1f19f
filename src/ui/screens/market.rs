use crate::app::MarketState;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline, Widget},
};

use super::dashboard::format_kes;

pub struct MarketScreen<'a> {
    pub state: &'a MarketState,
}

impl<'a> MarketScreen<'a> {
    pub fn new(state: &'a MarketState) -> Self {
        Self { state }
    }
}

impl Widget for MarketScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header with filters
                Constraint::Length(2), // Summary
                Constraint::Min(7),    // Quote table
                Constraint::Length(6), // Trend sparkline
                Constraint::Length(1), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_summary(chunks[1], buf);
        self.render_quotes(chunks[2], buf);
        self.render_trend(chunks[3], buf);

        Paragraph::new(Span::styled(
            "Left/Right crop | f county filter | g regenerate feed",
            Theme::dim(),
        ))
        .render(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl MarketScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Market Intelligence", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let county_label = self
            .state
            .county_filter
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "All Counties".to_string());

        let filters = Line::from(vec![
            Span::styled("Crop: ", Theme::dim()),
            Span::styled(
                format!("< {} >", self.state.selected_crop()),
                Theme::highlight(),
            ),
            Span::raw("   "),
            Span::styled("County: ", Theme::dim()),
            Span::styled(county_label, Theme::normal()),
        ]);

        Paragraph::new(filters).block(block).render(area, buf);
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let quotes = self.state.filtered_quotes();

        let (avg_price, avg_7d) = if quotes.is_empty() {
            (0, 0.0)
        } else {
            let price_sum: i64 = quotes.iter().map(|q| q.price_kes).sum();
            let change_sum: f64 = quotes.iter().map(|q| q.change_7d).sum();
            let n = quotes.len();
            (
                (price_sum as f64 / n as f64).round() as i64,
                (change_sum / n as f64 * 10.0).round() / 10.0,
            )
        };

        let summary = Line::from(vec![
            Span::styled("Avg Price/Ton: ", Theme::dim()),
            Span::styled(format_kes(avg_price), Theme::normal()),
            Span::raw("   "),
            Span::styled("7-Day Change: ", Theme::dim()),
            Span::styled(
                format!("{}{:.1}%", if avg_7d > 0.0 { "+" } else { "" }, avg_7d),
                Style::default().fg(Theme::change_color(avg_7d)),
            ),
            Span::raw("   "),
            Span::styled("Markets: ", Theme::dim()),
            Span::styled(quotes.len().to_string(), Theme::normal()),
        ]);

        Paragraph::new(summary).render(area, buf);
    }

    fn render_quotes(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("County Quotes", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let quotes = self.state.filtered_quotes();
        if quotes.is_empty() {
            Paragraph::new(Span::styled("No quotes", Theme::dim())).render(inner, buf);
            return;
        }

        let header = ListItem::new(Line::from(Span::styled(
            format!(
                "{:<14}{:>12}{:>8}{:>8}  {:<8}{:<14}",
                "County", "Price", "7d", "30d", "Vol", "Top Buyer"
            ),
            Theme::header(),
        )));

        let mut items = vec![header];
        items.extend(quotes.iter().map(|q| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", q.county.as_str()), Theme::normal()),
                Span::styled(format!("{:>12}", format_kes(q.price_kes)), Theme::normal()),
                Span::styled(
                    format!("{:>7.1}%", q.change_7d),
                    Style::default().fg(Theme::change_color(q.change_7d)),
                ),
                Span::styled(
                    format!("{:>7.1}%", q.change_30d),
                    Style::default().fg(Theme::change_color(q.change_30d)),
                ),
                Span::styled(
                    format!("  {:<8}", q.volatility.as_str()),
                    Style::default().fg(q.volatility.color()),
                ),
                Span::styled(format!("{:<14}", q.top_buying_county.as_str()), Theme::dim()),
            ]))
        }));

        List::new(items).render(inner, buf);
    }

    fn render_trend(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("12-Month Price Trend - {}", self.state.selected_crop()),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.trend.is_empty() || inner.width == 0 {
            Paragraph::new(Span::styled("No trend data", Theme::dim())).render(inner, buf);
            return;
        }

        // Show the most recent points that fit the width
        let width = inner.width as usize;
        let start = self.state.trend.len().saturating_sub(width);
        let data: Vec<u64> = self.state.trend[start..]
            .iter()
            .map(|p| p.price_kes.max(0) as u64)
            .collect();

        Sparkline::default()
            .data(&data)
            .style(Style::default().fg(Theme::ACCENT))
            .render(inner, buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Planner ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Market ", Theme::nav_label()),
            Span::styled("[4]", Theme::nav_key()),
            Span::styled("Listings ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Settings ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}
