use crate::app::{ListingField, MarketplaceState};
use crate::models::Listing;
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

pub struct MarketplaceScreen<'a> {
    pub state: &'a MarketplaceState,
    pub rows: &'a [(&'a Listing, u8)],
    pub status_message: Option<&'a str>,
}

impl<'a> MarketplaceScreen<'a> {
    pub fn new(state: &'a MarketplaceState, rows: &'a [(&'a Listing, u8)]) -> Self {
        Self {
            state,
            rows,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

const FORM_FIELDS: [ListingField; 9] = [
    ListingField::Type,
    ListingField::Name,
    ListingField::Phone,
    ListingField::Crop,
    ListingField::County,
    ListingField::Quantity,
    ListingField::Price,
    ListingField::AvailableFrom,
    ListingField::Description,
];

impl Widget for MarketplaceScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.adding {
            self.render_form(area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Listings
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_listings(chunks[1], buf);
        self.render_status(chunks[2], buf);
        self.render_nav(chunks[3], buf);
    }
}

impl MarketplaceScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Marketplace", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let filter_label = match self.state.filter_type {
            Some(t) => format!("{}s only", t),
            None => "All listings".to_string(),
        };
        let info = Line::from(vec![
            Span::styled(filter_label, Theme::normal()),
            Span::styled(
                format!("   {} shown", self.rows.len()),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_listings(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(Span::styled(
                "No listings - press a to add one",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (listing, score))| {
                let selected = i == self.state.selected_index;
                let base = if selected {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                let type_style = if selected {
                    base
                } else {
                    Style::default().fg(listing.listing_type.color())
                };

                let title_line = Line::from(vec![
                    Span::styled(format!("{:<7}", listing.listing_type.as_str()), type_style),
                    Span::styled(format!("{:<18}", listing.name), base),
                    Span::styled(format!("{:<10}", listing.crop.as_str()), base),
                    Span::styled(format!("{:<13}", listing.county.as_str()), base),
                    Span::styled(format!("{:>6.1}t", listing.quantity_tons), base),
                    Span::styled(
                        format!("  {:>12}", format_kes(listing.price_kes)),
                        base,
                    ),
                    Span::styled(format!("  match {:>3}", score), match_style(*score)),
                ]);
                let detail_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(
                        format!(
                            "{} | from {} | {}",
                            listing.phone,
                            listing.available_from.format("%Y-%m-%d"),
                            listing.description
                        ),
                        Theme::dim(),
                    ),
                ]);
                ListItem::new(vec![title_line, detail_line])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                                 // Header
                Constraint::Length(FORM_FIELDS.len() as u16 * 3),      // Fields
                Constraint::Min(1),                                    // Help
            ])
            .split(area);

        let header = Block::default()
            .title(Span::styled("New Listing", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        header.render(chunks[0], buf);

        let form = &self.state.form;
        let field_constraints: Vec<Constraint> =
            FORM_FIELDS.iter().map(|_| Constraint::Length(3)).collect();
        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(field_constraints)
            .split(chunks[1]);

        for (field, field_area) in FORM_FIELDS.iter().zip(field_areas.iter()) {
            let focused = *field == form.focused_field;
            let value = match field {
                ListingField::Type => form.listing_type.as_str().to_string(),
                ListingField::Name => form.name.clone(),
                ListingField::Phone => form.phone.clone(),
                ListingField::Crop => form.crop.as_str().to_string(),
                ListingField::County => form.county.as_str().to_string(),
                ListingField::Quantity => form.quantity.clone(),
                ListingField::Price => form.price.clone(),
                ListingField::AvailableFrom => form.available_from.clone(),
                ListingField::Description => form.description.clone(),
            };

            if field.is_selector() {
                SelectWidget::new(field.label(), &value)
                    .focused(focused)
                    .render(*field_area, buf);
            } else {
                InputWidget::new(field.label(), &value)
                    .focused(focused)
                    .editing(focused)
                    .render(*field_area, buf);
            }
        }

        let help = match self.status_message {
            Some(msg) => Line::from(Span::styled(msg, Theme::warning())),
            None => Line::from(Span::styled(
                "Tab/Down next | Left/Right cycle | Enter submit | Esc cancel",
                Theme::dim(),
            )),
        };
        Paragraph::new(help).render(chunks[2], buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let line = match self.status_message {
            Some(msg) => Span::styled(msg, Theme::success()),
            None => Span::styled(
                "Up/Down select | a add | d delete | f filter",
                Theme::dim(),
            ),
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

fn match_style(score: u8) -> Style {
    let color = if score >= 80 {
        Theme::SUCCESS
    } else if score >= 50 {
        Theme::WARNING
    } else {
        Theme::DIM
    };
    Style::default().fg(color)
}
