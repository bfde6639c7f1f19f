use crate::models::{FarmAnalysis, FarmProfile, WeatherReport};
use crate::ui::components::{humidity_gauge, rainfall_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub profile: Option<&'a FarmProfile>,
    pub weather: Option<&'a WeatherReport>,
    pub analysis: Option<&'a FarmAnalysis>,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        profile: Option<&'a FarmProfile>,
        weather: Option<&'a WeatherReport>,
        analysis: Option<&'a FarmAnalysis>,
    ) -> Self {
        Self {
            profile,
            weather,
            analysis,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Weather gauges
                Constraint::Min(8),    // Projection and advisories
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_weather(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_projection(middle[0], buf);
        self.render_advisories(middle[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.profile {
            Some(p) => format!("FarmWise - {} ({} - {})", p.name, p.crop, p.county),
            None => "FarmWise - No Farm Profile Configured".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = match self.weather {
            Some(w) => format!(
                "{} | Weather fetched: {}",
                w.description(),
                w.fetched_at.format("%Y-%m-%d %H:%M")
            ),
            None => "Weather: not fetched".to_string(),
        };
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_weather(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let w = self.weather;
        temperature_gauge("Current Temp", w.map(|w| w.current_temp_c))
            .render(gauge_chunks[0], buf);
        humidity_gauge("Humidity", w.map(|w| w.humidity_percent)).render(gauge_chunks[1], buf);
        rainfall_gauge("Rain 7d", w.map(|w| w.rainfall_7d_mm), 100.0)
            .render(gauge_chunks[2], buf);
        rainfall_gauge("Rain 30d", w.map(|w| w.rainfall_30d_mm), 300.0)
            .render(gauge_chunks[3], buf);
    }

    fn render_projection(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Season Projection", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(analysis) = self.analysis else {
            Paragraph::new(Span::styled(
                "No projection - configure a farm profile in Settings",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        };

        let lines = vec![
            metric_line("Yield", format!("{:.2} tons", analysis.estimated_yield_tons), Theme::normal()),
            metric_line(
                "Revenue",
                format_kes(analysis.estimated_revenue_kes),
                Theme::money(analysis.estimated_revenue_kes),
            ),
            metric_line(
                "Cost",
                format_kes(analysis.estimated_cost_kes),
                ratatui::style::Style::default().fg(Theme::COST),
            ),
            metric_line(
                "Profit",
                format_kes(analysis.projected_profit_kes),
                Theme::money(analysis.projected_profit_kes),
            ),
            metric_line(
                "Margin",
                format!("{:.1}%", analysis.profit_margin),
                Theme::money(analysis.projected_profit_kes),
            ),
            Line::from(vec![
                Span::styled(format!("{:<10}", "Risk"), Theme::dim()),
                Span::styled(
                    analysis.risk_level.as_str(),
                    ratatui::style::Style::default().fg(analysis.risk_level.color()),
                ),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_advisories(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Advisories", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let recommendations = self
            .analysis
            .map(|a| a.recommendations.as_slice())
            .unwrap_or(&[]);

        if recommendations.is_empty() {
            Paragraph::new(Span::styled("No advisories", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = recommendations
            .iter()
            .map(|rec| {
                ListItem::new(Line::from(vec![
                    Span::styled("* ", Theme::success()),
                    Span::styled(rec.as_str(), Theme::normal()),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("OFFLINE") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
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
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

pub fn format_kes(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-KES {}", grouped)
    } else {
        format!("KES {}", grouped)
    }
}

fn metric_line(label: &str, value: String, style: ratatui::style::Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Theme::dim()),
        Span::styled(value, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kes_formatting_groups_thousands() {
        assert_eq!(format_kes(0), "KES 0");
        assert_eq!(format_kes(950), "KES 950");
        assert_eq!(format_kes(35_000), "KES 35,000");
        assert_eq!(format_kes(471_100), "KES 471,100");
        assert_eq!(format_kes(1_234_567), "KES 1,234,567");
        assert_eq!(format_kes(-12_500), "-KES 12,500");
    }
}
