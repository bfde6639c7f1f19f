use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::logic::{estimate, match_score, market};
use crate::models::{
    County, Crop, FarmAnalysis, FarmInput, FarmProfile, Listing, ListingType, MarketQuote,
    PricePoint, ReferenceTables, SoilType, WeatherReport,
};
use crate::ui::screens::SettingsField;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Planner,
    Market,
    Marketplace,
    Settings,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Planner),
            '3' => Some(Screen::Market),
            '4' => Some(Screen::Marketplace),
            's' | 'S' => Some(Screen::Settings),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerField {
    Crop,
    County,
    FarmSize,
    SoilType,
    FertilizerBudget,
    Rainfall,
}

impl PlannerField {
    pub fn label(&self) -> &'static str {
        match self {
            PlannerField::Crop => "Crop",
            PlannerField::County => "County",
            PlannerField::FarmSize => "Farm Size (acres)",
            PlannerField::SoilType => "Soil Type",
            PlannerField::FertilizerBudget => "Fertilizer Budget (KES)",
            PlannerField::Rainfall => "Expected Rainfall (mm/yr)",
        }
    }

    /// Selector fields cycle with Left/Right instead of text editing.
    pub fn is_selector(&self) -> bool {
        matches!(
            self,
            PlannerField::Crop | PlannerField::County | PlannerField::SoilType
        )
    }

    pub fn next(&self) -> Self {
        match self {
            PlannerField::Crop => PlannerField::County,
            PlannerField::County => PlannerField::FarmSize,
            PlannerField::FarmSize => PlannerField::SoilType,
            PlannerField::SoilType => PlannerField::FertilizerBudget,
            PlannerField::FertilizerBudget => PlannerField::Rainfall,
            PlannerField::Rainfall => PlannerField::Crop,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            PlannerField::Crop => PlannerField::Rainfall,
            PlannerField::County => PlannerField::Crop,
            PlannerField::FarmSize => PlannerField::County,
            PlannerField::SoilType => PlannerField::FarmSize,
            PlannerField::FertilizerBudget => PlannerField::SoilType,
            PlannerField::Rainfall => PlannerField::FertilizerBudget,
        }
    }
}

pub struct PlannerState {
    pub focused_field: PlannerField,
    pub editing: bool,
    pub edit_buffer: String,
    pub input: FarmInput,
    /// The user typed a rainfall value; weather auto-fill backs off.
    pub rainfall_overridden: bool,
    pub result: Option<FarmAnalysis>,
    pub error: Option<String>,
}

impl PlannerState {
    pub fn new(input: FarmInput) -> Self {
        Self {
            focused_field: PlannerField::Crop,
            editing: false,
            edit_buffer: String::new(),
            input,
            rainfall_overridden: false,
            result: None,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.edit_buffer)
    }

    /// Cycle the focused selector field. Returns true when the county
    /// changed, so the caller can refetch weather.
    pub fn cycle(&mut self, step: isize) -> bool {
        let wrap = |index: usize, len: usize| {
            (index as isize + step).rem_euclid(len as isize) as usize
        };

        match self.focused_field {
            PlannerField::Crop => {
                self.input.crop = Crop::ALL[wrap(self.input.crop.index(), Crop::ALL.len())];
                false
            }
            PlannerField::County => {
                self.input.county =
                    County::ALL[wrap(self.input.county.index(), County::ALL.len())];
                if !self.rainfall_overridden {
                    self.input.expected_rainfall_mm = None;
                }
                true
            }
            PlannerField::SoilType => {
                self.input.soil_type =
                    SoilType::ALL[wrap(self.input.soil_type.index(), SoilType::ALL.len())];
                false
            }
            _ => false,
        }
    }

    /// Commit a numeric edit to the focused field. Invalid text leaves the
    /// field unchanged and records an error for the status area.
    pub fn apply_edit(&mut self, value: &str) {
        self.error = None;
        match self.focused_field {
            PlannerField::FarmSize => match value.parse::<f64>() {
                Ok(size) if size > 0.0 => self.input.farm_size_acres = size,
                _ => self.error = Some("Farm size must be a number greater than zero".into()),
            },
            PlannerField::FertilizerBudget => match value.parse::<f64>() {
                Ok(budget) if budget >= 0.0 => self.input.fertilizer_budget_kes = budget,
                _ => self.error = Some("Fertilizer budget must be a non-negative number".into()),
            },
            PlannerField::Rainfall => {
                if value.trim().is_empty() {
                    self.input.expected_rainfall_mm = None;
                    self.rainfall_overridden = false;
                } else {
                    match value.parse::<f64>() {
                        Ok(mm) if mm >= 0.0 => {
                            self.input.expected_rainfall_mm = Some(mm);
                            self.rainfall_overridden = true;
                        }
                        _ => {
                            self.error =
                                Some("Rainfall must be a non-negative number of mm".into())
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

pub struct MarketState {
    pub crop_index: usize,
    pub county_filter: Option<County>,
    pub quotes: Vec<MarketQuote>,
    pub trend: Vec<PricePoint>,
}

/// The market dashboard tracks the first six crops and five counties.
pub const MARKET_CROPS: usize = 6;
pub const MARKET_COUNTIES: usize = 5;

impl MarketState {
    pub fn new() -> Self {
        Self {
            crop_index: 0,
            county_filter: None,
            quotes: Vec::new(),
            trend: Vec::new(),
        }
    }

    pub fn selected_crop(&self) -> Crop {
        Crop::ALL[self.crop_index.min(MARKET_CROPS - 1)]
    }

    pub fn next_crop(&mut self) {
        self.crop_index = (self.crop_index + 1) % MARKET_CROPS;
    }

    pub fn prev_crop(&mut self) {
        self.crop_index = (self.crop_index + MARKET_CROPS - 1) % MARKET_CROPS;
    }

    pub fn cycle_county_filter(&mut self) {
        self.county_filter = match self.county_filter {
            None => Some(County::ALL[0]),
            Some(county) => {
                let next = county.index() + 1;
                if next >= MARKET_COUNTIES {
                    None
                } else {
                    Some(County::ALL[next])
                }
            }
        };
    }

    /// Quotes for the selected crop, honoring the county filter.
    pub fn filtered_quotes(&self) -> Vec<&MarketQuote> {
        self.quotes
            .iter()
            .filter(|q| {
                q.crop == self.selected_crop()
                    && self.county_filter.map_or(true, |c| q.county == c)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Type,
    Name,
    Phone,
    Crop,
    County,
    Quantity,
    Price,
    AvailableFrom,
    Description,
}

impl ListingField {
    pub fn label(&self) -> &'static str {
        match self {
            ListingField::Type => "I am a",
            ListingField::Name => "Name",
            ListingField::Phone => "Phone",
            ListingField::Crop => "Crop",
            ListingField::County => "County",
            ListingField::Quantity => "Quantity (tons)",
            ListingField::Price => "Price (KES/ton)",
            ListingField::AvailableFrom => "Available From (YYYY-MM-DD)",
            ListingField::Description => "Description",
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(
            self,
            ListingField::Type | ListingField::Crop | ListingField::County
        )
    }

    pub fn next(&self) -> Self {
        match self {
            ListingField::Type => ListingField::Name,
            ListingField::Name => ListingField::Phone,
            ListingField::Phone => ListingField::Crop,
            ListingField::Crop => ListingField::County,
            ListingField::County => ListingField::Quantity,
            ListingField::Quantity => ListingField::Price,
            ListingField::Price => ListingField::AvailableFrom,
            ListingField::AvailableFrom => ListingField::Description,
            ListingField::Description => ListingField::Type,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ListingField::Type => ListingField::Description,
            ListingField::Name => ListingField::Type,
            ListingField::Phone => ListingField::Name,
            ListingField::Crop => ListingField::Phone,
            ListingField::County => ListingField::Crop,
            ListingField::Quantity => ListingField::County,
            ListingField::Price => ListingField::Quantity,
            ListingField::AvailableFrom => ListingField::Price,
            ListingField::Description => ListingField::AvailableFrom,
        }
    }
}

/// Add-listing form. Text fields edit in place; selector fields cycle.
pub struct ListingForm {
    pub focused_field: ListingField,
    pub listing_type: ListingType,
    pub crop: Crop,
    pub county: County,
    pub name: String,
    pub phone: String,
    pub quantity: String,
    pub price: String,
    pub available_from: String,
    pub description: String,
}

impl ListingForm {
    pub fn new(crop: Crop, county: County) -> Self {
        Self {
            focused_field: ListingField::Type,
            listing_type: ListingType::Farmer,
            crop,
            county,
            name: String::new(),
            phone: String::new(),
            quantity: String::new(),
            price: String::new(),
            available_from: String::new(),
            description: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn cycle(&mut self, step: isize) {
        let wrap = |index: usize, len: usize| {
            (index as isize + step).rem_euclid(len as isize) as usize
        };
        match self.focused_field {
            ListingField::Type => self.listing_type = self.listing_type.opposite(),
            ListingField::Crop => {
                self.crop = Crop::ALL[wrap(self.crop.index(), Crop::ALL.len())]
            }
            ListingField::County => {
                self.county = County::ALL[wrap(self.county.index(), County::ALL.len())]
            }
            _ => {}
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focused_field {
            ListingField::Name => Some(&mut self.name),
            ListingField::Phone => Some(&mut self.phone),
            ListingField::Quantity => Some(&mut self.quantity),
            ListingField::Price => Some(&mut self.price),
            ListingField::AvailableFrom => Some(&mut self.available_from),
            ListingField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    /// Validate and build the listing, or explain what is wrong.
    pub fn build(&self) -> std::result::Result<Listing, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".into());
        }

        let quantity: f64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| "Quantity must be a number of tons".to_string())?;
        if quantity <= 0.0 {
            return Err("Quantity must be greater than zero".into());
        }

        let price: i64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a whole number of KES".to_string())?;
        if price <= 0 {
            return Err("Price must be greater than zero".into());
        }

        let available_from = if self.available_from.trim().is_empty() {
            chrono::Utc::now().date_naive()
        } else {
            NaiveDate::parse_from_str(self.available_from.trim(), "%Y-%m-%d")
                .map_err(|_| "Date must be YYYY-MM-DD".to_string())?
        };

        Ok(Listing::new(
            self.listing_type,
            name,
            self.crop,
            self.county,
            quantity,
            price,
        )
        .with_phone(self.phone.trim())
        .with_description(self.description.trim())
        .with_available_from(available_from))
    }
}

pub struct MarketplaceState {
    pub selected_index: usize,
    pub filter_type: Option<ListingType>,
    pub adding: bool,
    pub form: ListingForm,
}

impl MarketplaceState {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            filter_type: None,
            adding: false,
            form: ListingForm::new(Crop::Maize, County::Nakuru),
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter_type = match self.filter_type {
            None => Some(ListingType::Farmer),
            Some(ListingType::Farmer) => Some(ListingType::Buyer),
            Some(ListingType::Buyer) => None,
        };
        self.selected_index = 0;
    }
}

pub struct SettingsState {
    pub focused_field: SettingsField,
    pub editing: bool,
    pub edit_buffer: String,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            focused_field: SettingsField::Name,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.edit_buffer)
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Data
    pub farm_profile: Option<FarmProfile>,
    pub listings: Vec<Listing>,
    pub weather: Option<WeatherReport>,
    pub quick_analysis: Option<FarmAnalysis>,
    pub tables: ReferenceTables,

    // Screen states
    pub planner_state: PlannerState,
    pub market_state: MarketState,
    pub marketplace_state: MarketplaceState,
    pub settings_state: SettingsState,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub weather_request: Option<County>,

    rng: StdRng,
}

impl App {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        // Load farm profile
        let farm_profile = db.get_default_farm_profile()?;

        // Seed and load the marketplace
        db.seed_listings_if_empty()?;
        let listings = db.get_listings()?;

        let tables = ReferenceTables::default();

        let rng = match config.market.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let planner_input = match &farm_profile {
            Some(profile) => FarmInput::from_profile(profile),
            None => FarmInput::from_profile(&FarmProfile::default()),
        };

        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            farm_profile,
            listings,
            weather: None,
            quick_analysis: None,
            tables,
            planner_state: PlannerState::new(planner_input),
            market_state: MarketState::new(),
            marketplace_state: MarketplaceState::new(),
            settings_state: SettingsState::new(),
            status_message: None,
            refreshing: false,
            weather_request: None,
            rng,
        };

        app.regenerate_market();
        app.refresh_quick_analysis();

        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Ask the main loop to fetch weather for a county.
    pub fn request_weather(&mut self, county: County) {
        if self.config.weather.enabled {
            self.weather_request = Some(county);
        }
    }

    pub fn update_weather(&mut self, report: WeatherReport) {
        // Auto-fill the planner's rainfall estimate unless the user typed
        // their own value
        if self.config.weather.auto_fill_rainfall
            && report.county == self.planner_state.input.county
            && !self.planner_state.rainfall_overridden
        {
            self.planner_state.input.expected_rainfall_mm =
                Some(report.annualized_rainfall_mm());
        }

        self.weather = Some(report);
        self.refresh_quick_analysis();
    }

    /// Dashboard projection from the saved profile defaults.
    pub fn refresh_quick_analysis(&mut self) {
        let Some(ref profile) = self.farm_profile else {
            self.quick_analysis = None;
            return;
        };
        if profile.farm_size_acres <= 0.0 {
            self.quick_analysis = None;
            return;
        }

        let mut input = FarmInput::from_profile(profile);
        if let Some(ref weather) = self.weather {
            if weather.county == profile.county {
                input.expected_rainfall_mm = Some(weather.annualized_rainfall_mm());
            }
        }
        self.quick_analysis = Some(estimate(&input, &self.tables));
    }

    /// Run the estimator on the planner form.
    pub fn run_planner(&mut self) {
        if self.planner_state.input.farm_size_acres <= 0.0 {
            self.planner_state.error = Some("Farm size must be greater than zero".into());
            return;
        }
        self.planner_state.error = None;
        self.planner_state.result =
            Some(estimate(&self.planner_state.input, &self.tables));
    }

    pub fn regenerate_market(&mut self) {
        self.market_state.quotes = market::market_snapshot(&self.tables, &mut self.rng);
        self.refresh_trend();
    }

    pub fn refresh_trend(&mut self) {
        self.market_state.trend = market::price_trend(
            self.market_state.selected_crop(),
            &self.tables,
            chrono::Local::now().date_naive(),
            &mut self.rng,
        );
    }

    pub fn reload_listings(&mut self) -> Result<()> {
        self.listings = self.db.get_listings()?;
        Ok(())
    }

    pub fn add_listing(&mut self, listing: Listing) -> Result<i64> {
        let id = self.db.create_listing(&listing)?;
        self.reload_listings()?;
        Ok(id)
    }

    pub fn delete_listing(&mut self, id: i64) -> Result<()> {
        self.db.delete_listing(id)?;
        self.reload_listings()?;
        Ok(())
    }

    /// Visible listings plus their match scores against the whole board.
    pub fn marketplace_rows(&self) -> Vec<(&Listing, u8)> {
        self.listings
            .iter()
            .filter(|l| {
                self.marketplace_state
                    .filter_type
                    .map_or(true, |t| l.listing_type == t)
            })
            .map(|l| (l, match_score(l, &self.listings)))
            .collect()
    }

    pub fn save_farm_profile(&mut self, profile: FarmProfile) -> Result<()> {
        if profile.id.is_some() {
            self.db.update_farm_profile(&profile)?;
            self.farm_profile = Some(profile);
        } else {
            let id = self.db.create_farm_profile(&profile)?;
            let mut p = profile;
            p.id = Some(id);
            self.farm_profile = Some(p);
        }
        self.refresh_quick_analysis();
        Ok(())
    }

    pub fn create_default_profile(&mut self) -> Result<()> {
        let profile = self.profile_from_config();
        let id = self.db.create_farm_profile(&profile)?;
        let mut p = profile;
        p.id = Some(id);
        self.planner_state = PlannerState::new(FarmInput::from_profile(&p));
        self.farm_profile = Some(p);
        self.refresh_quick_analysis();
        Ok(())
    }

    fn profile_from_config(&self) -> FarmProfile {
        let cfg = &self.config.farm;
        let now = chrono::Utc::now();

        FarmProfile {
            id: None,
            name: cfg.name.clone(),
            county: County::from_str(&cfg.county).unwrap_or(County::Nakuru),
            crop: Crop::from_str(&cfg.crop).unwrap_or(Crop::Maize),
            soil_type: SoilType::from_str(&cfg.soil_type).unwrap_or(SoilType::Loam),
            farm_size_acres: cfg.farm_size_acres,
            fertilizer_budget_kes: cfg.fertilizer_budget_kes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut config = Config::default();
        config.market.seed = Some(7);
        let db = Database::open_in_memory().unwrap();
        App::new(config, db).unwrap()
    }

    #[test]
    fn new_app_seeds_marketplace_and_market() {
        let app = test_app();
        assert_eq!(app.listings.len(), 6);
        assert_eq!(app.market_state.quotes.len(), 30);
        assert_eq!(app.market_state.trend.len(), 365);
    }

    #[test]
    fn planner_rejects_non_positive_size() {
        let mut app = test_app();
        app.planner_state.input.farm_size_acres = 0.0;
        app.run_planner();
        assert!(app.planner_state.result.is_none());
        assert!(app.planner_state.error.is_some());

        app.planner_state.input.farm_size_acres = 5.0;
        app.run_planner();
        assert!(app.planner_state.result.is_some());
        assert!(app.planner_state.error.is_none());
    }

    #[test]
    fn planner_county_cycle_clears_stale_rainfall() {
        let mut app = test_app();
        app.planner_state.input.expected_rainfall_mm = Some(640.0);
        app.planner_state.focused_field = PlannerField::County;
        assert!(app.planner_state.cycle(1));
        assert!(app.planner_state.input.expected_rainfall_mm.is_none());
    }

    #[test]
    fn weather_autofills_planner_rainfall() {
        let mut app = test_app();
        let county = app.planner_state.input.county;
        let report = WeatherReport {
            county,
            fetched_at: chrono::Utc::now(),
            current_temp_c: 20.0,
            max_temp_c: 24.0,
            min_temp_c: 12.0,
            rainfall_7d_mm: 10.0,
            rainfall_30d_mm: 60.0,
            humidity_percent: 70.0,
            weather_code: 1,
            daily_rainfall: Vec::new(),
        };
        app.update_weather(report);
        assert_eq!(app.planner_state.input.expected_rainfall_mm, Some(720.0));
    }

    #[test]
    fn user_rainfall_survives_weather_update() {
        let mut app = test_app();
        app.planner_state.focused_field = PlannerField::Rainfall;
        app.planner_state.apply_edit("950");
        assert!(app.planner_state.rainfall_overridden);

        let county = app.planner_state.input.county;
        let report = WeatherReport {
            county,
            fetched_at: chrono::Utc::now(),
            current_temp_c: 20.0,
            max_temp_c: 24.0,
            min_temp_c: 12.0,
            rainfall_7d_mm: 10.0,
            rainfall_30d_mm: 60.0,
            humidity_percent: 70.0,
            weather_code: 1,
            daily_rainfall: Vec::new(),
        };
        app.update_weather(report);
        assert_eq!(app.planner_state.input.expected_rainfall_mm, Some(950.0));
    }

    #[test]
    fn marketplace_rows_respect_filter() {
        let mut app = test_app();
        assert_eq!(app.marketplace_rows().len(), 6);

        app.marketplace_state.filter_type = Some(ListingType::Farmer);
        let rows = app.marketplace_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .all(|(l, _)| l.listing_type == ListingType::Farmer));
    }

    #[test]
    fn seeded_wheat_pair_scores_high() {
        let app = test_app();
        // Peter Ochieng (farmer, wheat, 43k) vs KenGrain (buyer, wheat, 48k)
        let rows = app.marketplace_rows();
        let (_, score) = rows
            .iter()
            .find(|(l, _)| l.name == "Peter Ochieng")
            .unwrap();
        // 50 + 0 (different county) + round(20 * (1 - 5000/48000)) = 68
        assert_eq!(*score, 68);
    }

    #[test]
    fn listing_form_validation() {
        let mut form = ListingForm::new(Crop::Maize, County::Nakuru);
        assert!(form.build().is_err());

        form.name = "Grace Muthoni".into();
        form.quantity = "8".into();
        form.price = "38000".into();
        let listing = form.build().unwrap();
        assert_eq!(listing.price_kes, 38_000);
        assert_eq!(listing.quantity_tons, 8.0);

        form.available_from = "not-a-date".into();
        assert!(form.build().is_err());
        form.available_from = "2026-09-01".into();
        assert!(form.build().is_ok());
    }

    #[test]
    fn market_crop_cycle_wraps_within_tracked_set() {
        let mut state = MarketState::new();
        for _ in 0..MARKET_CROPS {
            state.next_crop();
        }
        assert_eq!(state.crop_index, 0);
        state.prev_crop();
        assert_eq!(state.selected_crop(), Crop::Tea);
    }
}
