use crate::models::FarmProfile;
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    County,
    Crop,
    SoilType,
    FarmSize,
    FertilizerBudget,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Name,
            SettingsField::County,
            SettingsField::Crop,
            SettingsField::SoilType,
            SettingsField::FarmSize,
            SettingsField::FertilizerBudget,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Name => "Farm Name",
            SettingsField::County => "County",
            SettingsField::Crop => "Main Crop",
            SettingsField::SoilType => "Soil Type",
            SettingsField::FarmSize => "Farm Size (acres)",
            SettingsField::FertilizerBudget => "Fertilizer Budget (KES)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SettingsField::Name => SettingsField::County,
            SettingsField::County => SettingsField::Crop,
            SettingsField::Crop => SettingsField::SoilType,
            SettingsField::SoilType => SettingsField::FarmSize,
            SettingsField::FarmSize => SettingsField::FertilizerBudget,
            SettingsField::FertilizerBudget => SettingsField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SettingsField::Name => SettingsField::FertilizerBudget,
            SettingsField::County => SettingsField::Name,
            SettingsField::Crop => SettingsField::County,
            SettingsField::SoilType => SettingsField::Crop,
            SettingsField::FarmSize => SettingsField::SoilType,
            SettingsField::FertilizerBudget => SettingsField::FarmSize,
        }
    }

    /// Selector fields hold an enum and show cycling hints.
    pub fn is_selector(&self) -> bool {
        matches!(
            self,
            SettingsField::County | SettingsField::Crop | SettingsField::SoilType
        )
    }
}

pub struct SettingsScreen<'a> {
    pub profile: &'a FarmProfile,
    pub focused_field: SettingsField,
    pub editing: bool,
    pub edit_buffer: String,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(profile: &'a FarmProfile) -> Self {
        Self {
            profile,
            focused_field: SettingsField::Name,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    pub fn with_focus(mut self, field: SettingsField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool, buffer: &str) -> Self {
        self.editing = editing;
        self.edit_buffer = buffer.to_string();
        self
    }

    fn field_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Name => self.profile.name.clone(),
            SettingsField::County => self.profile.county.as_str().to_string(),
            SettingsField::Crop => self.profile.crop.as_str().to_string(),
            SettingsField::SoilType => self.profile.soil_type.as_str().to_string(),
            SettingsField::FarmSize => format!("{:.1}", self.profile.farm_size_acres),
            SettingsField::FertilizerBudget => {
                format!("{:.0}", self.profile.fertilizer_budget_kes)
            }
        }
    }
}

impl Widget for SettingsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                                   // Header
                Constraint::Length(SettingsField::all().len() as u16 * 3), // Fields
                Constraint::Min(1),                                      // Help
                Constraint::Length(1),                                   // Nav
            ])
            .split(area);

        let header = Block::default()
            .title(Span::styled("Settings - Farm Profile", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        header.render(chunks[0], buf);

        let field_constraints: Vec<Constraint> = SettingsField::all()
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();
        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(field_constraints)
            .split(chunks[1]);

        for (field, field_area) in SettingsField::all().iter().zip(field_areas.iter()) {
            let focused = *field == self.focused_field;
            let value = if focused && self.editing {
                self.edit_buffer.clone()
            } else {
                self.field_value(*field)
            };

            if field.is_selector() && !self.editing {
                SelectWidget::new(field.label(), &value)
                    .focused(focused)
                    .render(*field_area, buf);
            } else {
                InputWidget::new(field.label(), &value)
                    .focused(focused)
                    .editing(focused && self.editing)
                    .render(*field_area, buf);
            }
        }

        let help = if self.editing {
            "Enter save field | Esc cancel"
        } else {
            "Up/Down move | Left/Right cycle | Enter edit | Ctrl-S save profile"
        };
        Paragraph::new(Span::styled(help, Theme::dim())).render(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Planner ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Market ", Theme::nav_label()),
            Span::styled("[4]", Theme::nav_key()),
            Span::styled("Listings ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}
