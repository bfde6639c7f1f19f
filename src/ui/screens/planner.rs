use crate::app::{PlannerField, PlannerState};
use crate::models::WeatherReport;
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

use super::dashboard::format_kes;

pub struct PlannerScreen<'a> {
    pub state: &'a PlannerState,
    pub weather: Option<&'a WeatherReport>,
    pub fetching_weather: bool,
}

impl<'a> PlannerScreen<'a> {
    pub fn new(state: &'a PlannerState) -> Self {
        Self {
            state,
            weather: None,
            fetching_weather: false,
        }
    }

    pub fn with_weather(mut self, weather: Option<&'a WeatherReport>, fetching: bool) -> Self {
        self.weather = weather;
        self.fetching_weather = fetching;
        self
    }

    fn field_value(&self, field: PlannerField) -> String {
        let input = &self.state.input;
        match field {
            PlannerField::Crop => input.crop.as_str().to_string(),
            PlannerField::County => input.county.as_str().to_string(),
            PlannerField::FarmSize => format!("{:.1}", input.farm_size_acres),
            PlannerField::SoilType => input.soil_type.as_str().to_string(),
            PlannerField::FertilizerBudget => format!("{:.0}", input.fertilizer_budget_kes),
            PlannerField::Rainfall => match input.expected_rainfall_mm {
                Some(mm) => format!("{:.0}", mm),
                None => "auto".to_string(),
            },
        }
    }
}

const FORM_FIELDS: [PlannerField; 6] = [
    PlannerField::Crop,
    PlannerField::County,
    PlannerField::FarmSize,
    PlannerField::SoilType,
    PlannerField::FertilizerBudget,
    PlannerField::Rainfall,
];

impl Widget for PlannerScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(10),   // Form and results
                Constraint::Length(1), // Status / error
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let header = Block::default()
            .title(Span::styled("Financial Planner", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        header.render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(30)])
            .split(chunks[1]);

        self.render_form(body[0], buf);
        self.render_results(body[1], buf);

        self.render_status(chunks[2], buf);
        self.render_nav(chunks[3], buf);
    }
}

impl PlannerScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let mut constraints: Vec<Constraint> =
            FORM_FIELDS.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(4)); // Weather panel
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, row) in FORM_FIELDS.iter().zip(rows.iter()) {
            let focused = *field == self.state.focused_field;
            let value = if focused && self.state.editing {
                self.state.edit_buffer.clone()
            } else {
                self.field_value(*field)
            };

            if field.is_selector() {
                SelectWidget::new(field.label(), &value)
                    .focused(focused)
                    .render(*row, buf);
            } else {
                InputWidget::new(field.label(), &value)
                    .focused(focused)
                    .editing(focused && self.state.editing)
                    .render(*row, buf);
            }
        }

        self.render_weather_panel(rows[FORM_FIELDS.len()], buf);
    }

    fn render_weather_panel(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Local Weather", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = if self.fetching_weather {
            vec![Line::from(Span::styled(
                format!("Fetching weather for {}...", self.state.input.county),
                Theme::dim(),
            ))]
        } else {
            match self.weather {
                Some(w) if w.county == self.state.input.county => vec![
                    Line::from(Span::styled(
                        format!("{} - {:.1}°C", w.description(), w.current_temp_c),
                        Theme::normal(),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "7d: {:.1}mm | 30d: {:.1}mm | Humidity: {:.0}%",
                            w.rainfall_7d_mm, w.rainfall_30d_mm, w.humidity_percent
                        ),
                        Theme::dim(),
                    )),
                ],
                _ => vec![Line::from(Span::styled(
                    "No weather data - press w to fetch",
                    Theme::dim(),
                ))],
            }
        };

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Projection", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(analysis) = self.state.result.as_ref() else {
            Paragraph::new(vec![
                Line::from(Span::styled("Fill in your farm details", Theme::normal())),
                Line::from(Span::styled(
                    "then press c to calculate projections",
                    Theme::dim(),
                )),
            ])
            .render(inner, buf);
            return;
        };

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(inner);

        let metrics = vec![
            Line::from(vec![
                Span::styled(format!("{:<12}", "Yield"), Theme::dim()),
                Span::styled(
                    format!("{:.2} tons", analysis.estimated_yield_tons),
                    Theme::normal(),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Revenue"), Theme::dim()),
                Span::styled(
                    format_kes(analysis.estimated_revenue_kes),
                    Theme::money(analysis.estimated_revenue_kes),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Cost"), Theme::dim()),
                Span::styled(
                    format_kes(analysis.estimated_cost_kes),
                    Style::default().fg(Theme::COST),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Profit"), Theme::dim()),
                Span::styled(
                    format_kes(analysis.projected_profit_kes),
                    Theme::money(analysis.projected_profit_kes),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Margin"), Theme::dim()),
                Span::styled(
                    format!("{:.1}%", analysis.profit_margin),
                    Theme::money(analysis.projected_profit_kes),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Break-even"), Theme::dim()),
                Span::styled(
                    format!("{:.2} acres", analysis.break_even_acres),
                    Theme::normal(),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Risk"), Theme::dim()),
                Span::styled(
                    analysis.risk_level.as_str(),
                    Style::default().fg(analysis.risk_level.color()),
                ),
            ]),
        ];
        Paragraph::new(metrics).render(sections[0], buf);

        let items: Vec<ListItem> = analysis
            .recommendations
            .iter()
            .map(|rec| {
                ListItem::new(Line::from(vec![
                    Span::styled("* ", Theme::success()),
                    Span::styled(rec.as_str(), Theme::normal()),
                ]))
            })
            .collect();
        List::new(items)
            .block(
                Block::default()
                    .title(Span::styled("Recommendations", Theme::header()))
                    .borders(Borders::TOP)
                    .border_style(Theme::border()),
            )
            .render(sections[1], buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let line = if let Some(ref error) = self.state.error {
            Span::styled(error.as_str(), Theme::warning())
        } else if self.state.editing {
            Span::styled("Enter save field | Esc cancel", Theme::dim())
        } else {
            Span::styled(
                "Up/Down move | Left/Right cycle | Enter edit | c calculate | w weather",
                Theme::dim(),
            )
        };
        Paragraph::new(line).render(area, buf);
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
