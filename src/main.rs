mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::OpenMeteoClient;
use db::Database;
use error::{FarmWiseError, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{
    DashboardScreen, MarketScreen, MarketplaceScreen, PlannerScreen, SettingsScreen,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            return Ok(());
        }
        Some(Commands::Check) => {
            return run_check(&cli).await;
        }
        None => {}
    }

    // Load configuration, falling back to interactive setup on first run
    let config = if Config::exists(cli.config.as_ref()) {
        match Config::load(cli.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let (config, _path) = Config::setup_interactive()?;
        config
    };

    // Initialize database
    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;

    // Create app
    let mut app = App::new(config, db)?;

    // Create default profile if none exists
    if app.farm_profile.is_none() {
        app.create_default_profile()?;
        app.set_status("Created default farm profile - update in Settings");
    }

    // Kick off an initial weather fetch for the home county
    if let Some(county) = app.farm_profile.as_ref().map(|p| p.county) {
        app.request_weather(county);
    }

    let weather_client = OpenMeteoClient::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &weather_client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    println!("Config OK: {} ({})", config.farm.name, config.farm.county);

    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;
    println!("Database OK: {}", db.path().display());

    let client = OpenMeteoClient::new();
    match client.test_connection().await {
        Ok(true) => println!("Open-Meteo: OK"),
        _ => println!("Open-Meteo: OFFLINE"),
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    weather_client: &OpenMeteoClient,
) -> Result<()>
where
    FarmWiseError: From<<B as ratatui::backend::Backend>::Error>,
{
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(
                        app.farm_profile.as_ref(),
                        app.weather.as_ref(),
                        app.quick_analysis.as_ref(),
                    )
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Planner => {
                    let screen = PlannerScreen::new(&app.planner_state)
                        .with_weather(app.weather.as_ref(), app.refreshing);
                    f.render_widget(screen, area);
                }
                Screen::Market => {
                    let screen = MarketScreen::new(&app.market_state);
                    f.render_widget(screen, area);
                }
                Screen::Marketplace => {
                    let rows = app.marketplace_rows();
                    let screen = MarketplaceScreen::new(&app.marketplace_state, &rows)
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Settings => {
                    if let Some(ref profile) = app.farm_profile {
                        let screen = SettingsScreen::new(profile)
                            .with_focus(app.settings_state.focused_field)
                            .editing(app.settings_state.editing, &app.settings_state.edit_buffer);
                        f.render_widget(screen, area);
                    }
                }
            }
        })?;

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Text entry contexts swallow printable keys
                let in_text_entry = app.planner_state.editing
                    || app.settings_state.editing
                    || (app.screen == Screen::Marketplace && app.marketplace_state.adding);

                match key.code {
                    KeyCode::Char('q') if !in_text_entry => {
                        app.quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc if !in_text_entry => {
                        // Go back to dashboard
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c) if !in_text_entry => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            // Screen-specific key handling
                            handle_screen_input(app, key.code, key.modifiers);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code, key.modifiers);
                    }
                }
            }
        }

        // Handle pending weather request
        if let Some(county) = app.weather_request.take() {
            app.refreshing = true;
            match weather_client.fetch_weather(county).await {
                Ok(report) => {
                    app.update_weather(report);
                    app.set_status(&format!("Weather updated for {}", county));
                }
                Err(e) => {
                    tracing::warn!("Weather fetch failed: {}", e);
                    app.set_status(&format!("Weather fetch failed: {}", e));
                }
            }
            app.refreshing = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Planner => handle_planner_input(app, code),
        Screen::Market => handle_market_input(app, code),
        Screen::Marketplace => handle_marketplace_input(app, code),
        Screen::Settings => handle_settings_input(app, code, modifiers),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('r') = code {
        if let Some(county) = app.farm_profile.as_ref().map(|p| p.county) {
            app.request_weather(county);
            app.set_status("Refreshing weather...");
        }
    }
}

fn handle_planner_input(app: &mut App, code: KeyCode) {
    if app.planner_state.editing {
        match code {
            KeyCode::Esc => {
                app.planner_state.cancel_editing();
            }
            KeyCode::Enter => {
                let value = app.planner_state.finish_editing();
                app.planner_state.apply_edit(&value);
            }
            KeyCode::Backspace => {
                app.planner_state.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                app.planner_state.edit_buffer.push(c);
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Up => app.planner_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.planner_state.next_field(),
        KeyCode::Left => {
            if app.planner_state.cycle(-1) {
                app.request_weather(app.planner_state.input.county);
            }
        }
        KeyCode::Right => {
            if app.planner_state.cycle(1) {
                app.request_weather(app.planner_state.input.county);
            }
        }
        KeyCode::Enter => {
            if !app.planner_state.focused_field.is_selector() {
                let current = match app.planner_state.focused_field {
                    app::PlannerField::FarmSize => {
                        format!("{}", app.planner_state.input.farm_size_acres)
                    }
                    app::PlannerField::FertilizerBudget => {
                        format!("{}", app.planner_state.input.fertilizer_budget_kes)
                    }
                    app::PlannerField::Rainfall => app
                        .planner_state
                        .input
                        .expected_rainfall_mm
                        .map(|mm| format!("{}", mm))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                app.planner_state.start_editing(&current);
            }
        }
        KeyCode::Char('c') => app.run_planner(),
        KeyCode::Char('w') => {
            app.request_weather(app.planner_state.input.county);
        }
        _ => {}
    }
}

fn handle_market_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => {
            app.market_state.prev_crop();
            app.refresh_trend();
        }
        KeyCode::Right => {
            app.market_state.next_crop();
            app.refresh_trend();
        }
        KeyCode::Char('f') => app.market_state.cycle_county_filter(),
        KeyCode::Char('g') => {
            app.regenerate_market();
            app.set_status("Market feed regenerated");
        }
        _ => {}
    }
}

fn handle_marketplace_input(app: &mut App, code: KeyCode) {
    if app.marketplace_state.adding {
        match code {
            KeyCode::Esc => {
                app.marketplace_state.adding = false;
                app.status_message = None;
            }
            KeyCode::Enter => match app.marketplace_state.form.build() {
                Ok(listing) => {
                    app.marketplace_state.adding = false;
                    match app.add_listing(listing) {
                        Ok(_) => app.set_status("Listing published"),
                        Err(e) => app.set_status(&format!("Save failed: {}", e)),
                    }
                }
                Err(msg) => app.set_status(&msg),
            },
            KeyCode::Up => app.marketplace_state.form.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.marketplace_state.form.next_field(),
            KeyCode::Left => app.marketplace_state.form.cycle(-1),
            KeyCode::Right => app.marketplace_state.form.cycle(1),
            KeyCode::Backspace => app.marketplace_state.form.backspace(),
            KeyCode::Char(c) => app.marketplace_state.form.push_char(c),
            _ => {}
        }
        return;
    }

    let count = app.marketplace_rows().len();
    match code {
        KeyCode::Up => app.marketplace_state.prev(),
        KeyCode::Down => app.marketplace_state.next(count),
        KeyCode::Char('a') => {
            let (crop, county) = app
                .farm_profile
                .as_ref()
                .map(|p| (p.crop, p.county))
                .unwrap_or((models::Crop::Maize, models::County::Nakuru));
            app.marketplace_state.form = app::ListingForm::new(crop, county);
            app.marketplace_state.adding = true;
            app.status_message = None;
        }
        KeyCode::Char('d') => {
            let selected_id = app
                .marketplace_rows()
                .get(app.marketplace_state.selected_index)
                .and_then(|(listing, _)| listing.id);
            if let Some(id) = selected_id {
                match app.delete_listing(id) {
                    Ok(()) => app.set_status("Listing deleted"),
                    Err(e) => app.set_status(&format!("Delete failed: {}", e)),
                }
                let remaining = app.marketplace_rows().len();
                if app.marketplace_state.selected_index >= remaining && remaining > 0 {
                    app.marketplace_state.selected_index = remaining - 1;
                }
            }
        }
        KeyCode::Char('f') => app.marketplace_state.cycle_filter(),
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.settings_state.editing {
        // Editing mode
        match code {
            KeyCode::Esc => {
                app.settings_state.cancel_editing();
            }
            KeyCode::Enter => {
                let value = app.settings_state.finish_editing();
                let field = app.settings_state.focused_field;
                let county_before = app.farm_profile.as_ref().map(|p| p.county);
                // Apply the value to the profile
                if let Some(ref mut profile) = app.farm_profile {
                    apply_field_value(profile, field, &value);
                }
                // Save the profile (separate borrow scope)
                if let Some(profile) = app.farm_profile.clone() {
                    let _ = app.save_farm_profile(profile);
                }
                let county_after = app.farm_profile.as_ref().map(|p| p.county);
                if county_before != county_after {
                    if let Some(county) = county_after {
                        app.request_weather(county);
                    }
                }
            }
            KeyCode::Backspace => {
                app.settings_state.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                app.settings_state.edit_buffer.push(c);
            }
            _ => {}
        }
    } else {
        // Navigation mode
        match code {
            KeyCode::Up => app.settings_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.settings_state.next_field(),
            KeyCode::Left | KeyCode::Right => {
                let step: isize = if code == KeyCode::Left { -1 } else { 1 };
                let field = app.settings_state.focused_field;
                if field.is_selector() {
                    let county_changed = app
                        .farm_profile
                        .as_mut()
                        .map(|profile| cycle_field_value(profile, field, step))
                        .unwrap_or(false);
                    if let Some(profile) = app.farm_profile.clone() {
                        let _ = app.save_farm_profile(profile);
                    }
                    if county_changed {
                        if let Some(county) = app.farm_profile.as_ref().map(|p| p.county) {
                            app.request_weather(county);
                        }
                    }
                }
            }
            KeyCode::Enter => {
                // Start editing text fields
                let field = app.settings_state.focused_field;
                if !field.is_selector() {
                    if let Some(ref profile) = app.farm_profile {
                        let current = get_field_value(profile, field);
                        app.settings_state.start_editing(&current);
                    }
                }
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                // Save profile
                if let Some(profile) = app.farm_profile.clone() {
                    let _ = app.save_farm_profile(profile);
                    app.set_status("Profile saved");
                }
            }
            _ => {}
        }
    }
}

fn get_field_value(profile: &models::FarmProfile, field: ui::screens::SettingsField) -> String {
    use ui::screens::SettingsField;
    match field {
        SettingsField::Name => profile.name.clone(),
        SettingsField::County => profile.county.as_str().to_string(),
        SettingsField::Crop => profile.crop.as_str().to_string(),
        SettingsField::SoilType => profile.soil_type.as_str().to_string(),
        SettingsField::FarmSize => profile.farm_size_acres.to_string(),
        SettingsField::FertilizerBudget => profile.fertilizer_budget_kes.to_string(),
    }
}

fn apply_field_value(
    profile: &mut models::FarmProfile,
    field: ui::screens::SettingsField,
    value: &str,
) {
    use models::{County, Crop, SoilType};
    use ui::screens::SettingsField;

    match field {
        SettingsField::Name => {
            if !value.is_empty() {
                profile.name = value.to_string();
            }
        }
        SettingsField::County => {
            if let Some(county) = County::from_str(value) {
                profile.county = county;
            }
        }
        SettingsField::Crop => {
            if let Some(crop) = Crop::from_str(value) {
                profile.crop = crop;
            }
        }
        SettingsField::SoilType => {
            if let Some(soil) = SoilType::from_str(value) {
                profile.soil_type = soil;
            }
        }
        SettingsField::FarmSize => {
            if let Ok(size) = value.parse::<f64>() {
                if size > 0.0 {
                    profile.farm_size_acres = size;
                }
            }
        }
        SettingsField::FertilizerBudget => {
            if let Ok(budget) = value.parse::<f64>() {
                if budget >= 0.0 {
                    profile.fertilizer_budget_kes = budget;
                }
            }
        }
    }
}

/// Cycle a selector field in place. Returns true when the county changed.
fn cycle_field_value(
    profile: &mut models::FarmProfile,
    field: ui::screens::SettingsField,
    step: isize,
) -> bool {
    use models::{County, Crop, SoilType};
    use ui::screens::SettingsField;

    let wrap =
        |index: usize, len: usize| (index as isize + step).rem_euclid(len as isize) as usize;

    match field {
        SettingsField::County => {
            profile.county = County::ALL[wrap(profile.county.index(), County::ALL.len())];
            true
        }
        SettingsField::Crop => {
            profile.crop = Crop::ALL[wrap(profile.crop.index(), Crop::ALL.len())];
            false
        }
        SettingsField::SoilType => {
            profile.soil_type =
                SoilType::ALL[wrap(profile.soil_type.index(), SoilType::ALL.len())];
            false
        }
        _ => false,
    }
}
