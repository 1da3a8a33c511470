//! Terminal console for TappedOut.
//!
//! Provides subcommands against a running TappedOut backend:
//! - `login` / `logout` / `whoami` / `validate` / `register` - session management
//! - `sports|genders|user-types|levels list` - reference catalogs
//! - `categories search` - category lookup by filters
//! - `events list|show|delete` - event browsing and management
//! - `inscriptions mine|create` - competitor registrations
//! - `users list` - user administration
//! - `config check` - validate the configuration file

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::access;
use crate::api::ApiClient;
use crate::auth::{FileSessionStore, MemorySessionStore, SessionEvent, SessionStore, UserType};
use crate::config::{Config, SessionConfig, SessionStoreKind};
use crate::models::{
    sort_by_id, sort_by_name, sort_events_by_start, sort_inscriptions_by_event_start,
    CategoryFilter, InscriptionCreate, LoginRequest, PaymentStatus, RegisterRequest,
};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "tappedout")]
#[command(author, version, about = "Console client for the TappedOut sports event platform", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tappedout.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Backend URL (overrides [api] base_url)
    #[arg(long, env = "TAPPEDOUT_API_URL")]
    pub api_url: Option<String>,

    /// Do not print notifications (they are still logged)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account e-mail
        email: String,
        /// Account password
        #[arg(long, env = "TAPPEDOUT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check the stored token against the backend
    Validate,

    /// Create a new account
    Register(RegisterArgs),

    /// Sports catalog
    #[command(subcommand)]
    Sports(ListCommands),

    /// Genders catalog
    #[command(subcommand)]
    Genders(ListCommands),

    /// User types catalog
    #[command(subcommand)]
    UserTypes(ListCommands),

    /// Sport levels
    #[command(subcommand)]
    Levels(LevelsCommands),

    /// Competition categories
    #[command(subcommand)]
    Categories(CategoriesCommands),

    /// Events
    #[command(subcommand)]
    Events(EventsCommands),

    /// Registrations to events
    #[command(subcommand)]
    Inscriptions(InscriptionsCommands),

    /// User administration (admins only)
    #[command(subcommand)]
    Users(ListCommands),

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TAPPEDOUT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    /// National identity document number
    #[arg(long)]
    pub dni: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub phone: Option<i64>,
    #[arg(long)]
    pub gender_id: Option<i64>,
    /// COMPETITOR (default) or ORGANIZER
    #[arg(long)]
    pub role: Option<UserType>,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// List all entries
    List,
}

#[derive(Subcommand, Debug)]
pub enum LevelsCommands {
    /// List sport levels
    List {
        /// Only levels of this sport
        #[arg(long)]
        sport: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommands {
    /// Search categories; only the filters given are sent
    Search {
        #[arg(long)]
        sport: Option<i64>,
        #[arg(long)]
        gender: Option<i64>,
        #[arg(long)]
        level: Option<i64>,
        #[arg(long)]
        min_age: Option<i32>,
        #[arg(long)]
        max_age: Option<i32>,
        #[arg(long)]
        min_weight: Option<f64>,
        #[arg(long)]
        max_weight: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventsCommands {
    /// List events, nearest first
    List {
        #[arg(long, conflicts_with = "past")]
        upcoming: bool,
        #[arg(long)]
        past: bool,
    },
    /// Show one event with its categories
    Show { id: i64 },
    /// Delete an event you manage
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum InscriptionsCommands {
    /// List your own registrations
    Mine,
    /// Register for an event category
    Create {
        #[arg(long)]
        event: i64,
        #[arg(long)]
        category: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

// ============================================================================
// Wiring
// ============================================================================

/// Build the configured session store
pub fn session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config.store {
        SessionStoreKind::File => Arc::new(FileSessionStore::new(&config.path)),
        SessionStoreKind::Memory => Arc::new(MemorySessionStore::new()),
    }
}

/// Collect every session event published so far
pub fn drain_session_events(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => drained.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Session events dropped");
            }
            Err(_) => break,
        }
    }
    drained
}

/// React to session transitions once a command has finished. A torn-down
/// session sends the user back to the login command.
pub fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    for event in drain_session_events(events) {
        tracing::debug!(?event, "Session event");
        if let Some(prompt) = login_prompt(event) {
            eprintln!("{}", prompt);
        }
    }
}

fn login_prompt(event: SessionEvent) -> Option<&'static str> {
    match event {
        SessionEvent::Expired => {
            Some("Your session has expired. Run `tappedout login <email>` to sign in again.")
        }
        SessionEvent::Invalidated => {
            Some("Your session is no longer valid. Run `tappedout login <email>` to sign in again.")
        }
        SessionEvent::Established | SessionEvent::LoggedOut => None,
    }
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: &Config, api: &ApiClient) -> Result<()> {
    match &cli.command {
        Commands::Login { email, password } => cmd_login(api, email, password).await,
        Commands::Logout => cmd_logout(api),
        Commands::Whoami => cmd_whoami(api),
        Commands::Validate => cmd_validate(api).await,
        Commands::Register(args) => cmd_register(api, args).await,
        Commands::Sports(ListCommands::List) => cmd_sports_list(api).await,
        Commands::Genders(ListCommands::List) => cmd_genders_list(api).await,
        Commands::UserTypes(ListCommands::List) => cmd_user_types_list(api).await,
        Commands::Levels(LevelsCommands::List { sport }) => cmd_levels_list(api, *sport).await,
        Commands::Categories(CategoriesCommands::Search {
            sport,
            gender,
            level,
            min_age,
            max_age,
            min_weight,
            max_weight,
        }) => {
            let filter = CategoryFilter {
                sport_id: *sport,
                gender_id: *gender,
                level_id: *level,
                min_age: *min_age,
                max_age: *max_age,
                min_weight: *min_weight,
                max_weight: *max_weight,
            };
            cmd_categories_search(api, &filter).await
        }
        Commands::Events(EventsCommands::List { upcoming, past }) => {
            cmd_events_list(api, *upcoming, *past).await
        }
        Commands::Events(EventsCommands::Show { id }) => cmd_events_show(api, *id).await,
        Commands::Events(EventsCommands::Delete { id }) => cmd_events_delete(api, *id).await,
        Commands::Inscriptions(InscriptionsCommands::Mine) => cmd_inscriptions_mine(api).await,
        Commands::Inscriptions(InscriptionsCommands::Create { event, category }) => {
            cmd_inscriptions_create(api, *event, *category).await
        }
        Commands::Users(ListCommands::List) => cmd_users_list(api).await,
        Commands::Config(ConfigCommands::Check) => cmd_config_check(cli, config),
    }
}

async fn cmd_login(api: &ApiClient, email: &str, password: &str) -> Result<()> {
    let credentials = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let user = api.auth().login(&credentials).await?;
    api.notify_success("Login successful!");

    println!();
    println!("Signed in as {} <{}>", user.full_name(), user.email);
    println!("Role:       {}", user.user_type);
    println!("Start page: {}", access::landing_route(api.session()));
    println!();
    Ok(())
}

fn cmd_logout(api: &ApiClient) -> Result<()> {
    let auth = api.auth();
    let was_signed_in = auth.is_authenticated();
    auth.logout();
    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

fn cmd_whoami(api: &ApiClient) -> Result<()> {
    let auth = api.auth();
    if !auth.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    println!();
    match auth.current_user() {
        Some(user) => {
            println!("User:   {} <{}>", user.full_name(), user.email);
            println!("ID:     {}", user.user_id);
        }
        None => println!("User:   (profile unavailable)"),
    }
    let role = auth.current_role().unwrap_or_default();
    let known = role.parse::<UserType>().is_ok();
    println!(
        "Role:   {} {}",
        if known { "[OK]" } else { "[!!]" },
        if role.is_empty() { "-" } else { role.as_str() }
    );
    println!();
    Ok(())
}

async fn cmd_validate(api: &ApiClient) -> Result<()> {
    if !api.auth().is_authenticated() {
        bail!("Not signed in. Run `tappedout login <email>` first.");
    }

    let validation = api.auth().validate_token().await?;
    if validation.valid {
        println!(
            "[OK] Token is valid for {} ({})",
            validation.email, validation.user_type
        );
        Ok(())
    } else {
        bail!("Token rejected by the server");
    }
}

async fn cmd_register(api: &ApiClient, args: &RegisterArgs) -> Result<()> {
    if let Some(role) = args.role {
        if !role.is_self_registrable() {
            bail!("Accounts with role {} cannot be self-registered", role);
        }
    }

    let profile = RegisterRequest {
        email: args.email.clone(),
        password: args.password.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        dni: args.dni.clone(),
        phone: args.phone,
        date_of_birth: args.date_of_birth,
        country: args.country.clone(),
        city: args.city.clone(),
        user_type: args.role,
        gender_id: args.gender_id,
    };
    let registered = api.auth().register(profile).await?;

    println!(
        "[OK] Account created for {} ({}). Run `tappedout login {}` to sign in.",
        registered.email, registered.user_type, registered.email
    );
    Ok(())
}

async fn cmd_sports_list(api: &ApiClient) -> Result<()> {
    let mut sports = api.sports().list().await?;
    sort_by_name(&mut sports);
    print_id_name_table("sports", sports.iter().map(|s| (s.id, s.name.as_str())));
    Ok(())
}

async fn cmd_genders_list(api: &ApiClient) -> Result<()> {
    let mut genders = api.genders().list().await?;
    sort_by_name(&mut genders);
    print_id_name_table("genders", genders.iter().map(|g| (g.id, g.name.as_str())));
    Ok(())
}

async fn cmd_user_types_list(api: &ApiClient) -> Result<()> {
    let mut types = api.user_types().list().await?;
    sort_by_id(&mut types);
    print_id_name_table("user types", types.iter().map(|t| (t.id, t.name.as_str())));
    Ok(())
}

fn print_id_name_table<'a>(what: &str, rows: impl ExactSizeIterator<Item = (i64, &'a str)>) {
    if rows.len() == 0 {
        println!("No {} found.", what);
        return;
    }

    println!();
    println!("{:<8}  {:<40}", "ID", "NAME");
    println!("{}", "-".repeat(50));
    for (id, name) in rows {
        println!("{:<8}  {:<40}", id, truncate(name, 40));
    }
    println!();
}

async fn cmd_levels_list(api: &ApiClient, sport: Option<i64>) -> Result<()> {
    let mut levels = match sport {
        Some(sport_id) => api.sport_levels().list_by_sport(sport_id).await?,
        None => api.sport_levels().list().await?,
    };
    sort_by_name(&mut levels);

    if levels.is_empty() {
        println!("No sport levels found.");
        return Ok(());
    }

    println!();
    println!("{:<8}  {:<30}  {:<20}", "ID", "NAME", "SPORT");
    println!("{}", "-".repeat(62));
    for level in levels {
        println!(
            "{:<8}  {:<30}  {:<20}",
            level.id,
            truncate(&level.name, 30),
            truncate(&level.sport.name, 20)
        );
    }
    println!();
    Ok(())
}

async fn cmd_categories_search(api: &ApiClient, filter: &CategoryFilter) -> Result<()> {
    let mut categories = api.categories().search(filter).await?;
    sort_by_name(&mut categories);

    if categories.is_empty() {
        println!("No categories match.");
        return Ok(());
    }

    println!();
    println!(
        "{:<8}  {:<24}  {:<14}  {:<10}  {:<10}  {:<16}",
        "ID", "NAME", "SPORT", "GENDER", "AGE", "WEIGHT"
    );
    println!("{}", "-".repeat(92));
    for category in categories {
        println!(
            "{:<8}  {:<24}  {:<14}  {:<10}  {:<10}  {:<16}",
            category.id,
            truncate(&category.name, 24),
            truncate(category.sport.as_deref().unwrap_or("-"), 14),
            truncate(category.gender.as_deref().unwrap_or("-"), 10),
            format_range(category.min_age, category.max_age, ""),
            format_range(category.min_weight, category.max_weight, "kg"),
        );
    }
    println!();
    Ok(())
}

async fn cmd_events_list(api: &ApiClient, upcoming: bool, past: bool) -> Result<()> {
    let events = api.events();
    let mut listed = if upcoming {
        events.upcoming().await?
    } else if past {
        events.past().await?
    } else {
        events.list().await?
    };
    sort_events_by_start(&mut listed);

    if listed.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<28}  {:<12}  {:<16}  {:<18}  {:<10}",
        "ID", "NAME", "SPORT", "STARTS", "LOCATION", "STATUS"
    );
    println!("{}", "-".repeat(100));
    for event in listed {
        println!(
            "{:<6}  {:<28}  {:<12}  {:<16}  {:<18}  {:<10}",
            event.id,
            truncate(&event.name, 28),
            truncate(&event.sport.name, 12),
            format_datetime(&event.start_date),
            truncate(&format!("{}, {}", event.city, event.country), 18),
            event.status
        );
    }
    println!();
    Ok(())
}

async fn cmd_events_show(api: &ApiClient, id: i64) -> Result<()> {
    let event = api.events().get(id).await?;
    let mut categories = api.events().categories(id).await?;
    sort_by_name(&mut categories);

    println!();
    println!("=== Event: {} ===", event.name);
    println!();
    println!("ID:          {}", event.id);
    println!("Sport:       {}", event.sport.name);
    println!("Status:      {}", event.status);
    println!("Starts:      {}", format_datetime(&event.start_date));
    println!("Ends:        {}", format_datetime(&event.end_date));
    println!("Location:    {}, {}", event.city, event.country);
    if let Some(address) = &event.address {
        println!("Address:     {}", address);
    }
    println!("Fee:         {}", format_fee(event.registration_fee));
    println!(
        "Organizer:   {} <{}>",
        event.organizer.full_name(),
        event.organizer.email
    );
    if let Some(description) = &event.description {
        println!();
        println!("{}", description);
    }

    println!();
    println!("Categories:");
    if categories.is_empty() {
        println!("  (none)");
    }
    for category in &categories {
        println!("  [{}] {}", category.id, category.name);
    }

    let session = api.session();
    println!();
    if access::can_manage_event(session, &event) {
        println!("You can edit or delete this event.");
    } else if access::can_register(session) {
        println!(
            "Register with: tappedout inscriptions create --event {} --category <id>",
            event.id
        );
    }
    println!();
    Ok(())
}

async fn cmd_events_delete(api: &ApiClient, id: i64) -> Result<()> {
    if !access::can_add_event(api.session()) {
        bail!("Only organizers and administrators can delete events");
    }

    let event = api.events().get(id).await?;
    if !access::can_manage_event(api.session(), &event) {
        bail!("You can only delete events you organize");
    }

    api.events().delete(id).await?;
    Ok(())
}

async fn cmd_inscriptions_mine(api: &ApiClient) -> Result<()> {
    let user = api
        .auth()
        .current_user()
        .context("Not signed in. Run `tappedout login <email>` first.")?;
    let mut inscriptions = api.inscriptions().list_by_competitor(user.user_id).await?;
    sort_inscriptions_by_event_start(&mut inscriptions);

    if inscriptions.is_empty() {
        println!("You are not registered for any event.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<28}  {:<16}  {:<20}  {:<10}",
        "ID", "EVENT", "STARTS", "CATEGORY", "PAYMENT"
    );
    println!("{}", "-".repeat(88));
    for inscription in inscriptions {
        let icon = match inscription.payment_status {
            PaymentStatus::Paid => "[OK]",
            PaymentStatus::Pending | PaymentStatus::Cancelled => "[!!]",
        };
        println!(
            "{:<6}  {:<28}  {:<16}  {:<20}  {} {}",
            inscription.id,
            truncate(&inscription.event.name, 28),
            format_datetime(&inscription.event.start_date),
            truncate(&inscription.category.name, 20),
            icon,
            inscription.payment_status
        );
    }
    println!();
    Ok(())
}

async fn cmd_inscriptions_create(api: &ApiClient, event_id: i64, category_id: i64) -> Result<()> {
    if !access::can_register(api.session()) {
        bail!("Only competitors can register for events");
    }
    let user = api
        .auth()
        .current_user()
        .context("Stored session has no user profile; sign in again")?;

    let inscription = api
        .inscriptions()
        .create(&InscriptionCreate {
            competitor_id: user.user_id,
            event_id,
            category_id,
            payment_status: PaymentStatus::default(),
        })
        .await?;

    println!(
        "Registered for {} / {} (payment {})",
        inscription.event.name, inscription.category.name, inscription.payment_status
    );
    Ok(())
}

async fn cmd_users_list(api: &ApiClient) -> Result<()> {
    if !access::can_administer(api.session()) {
        bail!("Only administrators can list users");
    }

    let mut users = api.users().list().await?;
    sort_by_id(&mut users);

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<24}  {:<30}  {:<12}  {:<8}",
        "ID", "NAME", "EMAIL", "TYPE", "VERIFIED"
    );
    println!("{}", "-".repeat(88));
    for user in users {
        let role = user
            .user_type
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("-");
        println!(
            "{:<6}  {:<24}  {:<30}  {:<12}  {:<8}",
            user.id,
            truncate(&user.full_name(), 24),
            truncate(&user.email, 30),
            role,
            if user.is_verified.unwrap_or(false) { "yes" } else { "no" }
        );
    }
    println!();
    Ok(())
}

fn cmd_config_check(cli: &Cli, config: &Config) -> Result<()> {
    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if config_path.exists() {
        println!("[OK] Configuration file is valid!");
    } else {
        println!(
            "[!!] Configuration file not found: {} (using defaults)",
            config_path.display()
        );
    }

    println!();
    println!("=== Configuration Summary ===");
    println!();
    println!("API:");
    println!("  Base URL:     {}", config.api.base_url);
    if let Some(url) = &cli.api_url {
        println!("  Override:     {}", url);
    }
    println!("  Timeout:      {}s", config.api.timeout_secs);
    println!();
    println!("Session:");
    match config.session.store {
        SessionStoreKind::File => {
            println!("  Store:        file");
            println!("  Path:         {}", config.session.path.display());
        }
        SessionStoreKind::Memory => println!("  Store:        memory (not kept between runs)"),
    }
    println!();
    println!("Logging:");
    println!("  Level:        {}", config.logging.level);
    println!();
    Ok(())
}

// ============================================================================
// Formatting
// ============================================================================

fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn format_fee(fee: Option<f64>) -> String {
    match fee {
        Some(fee) if fee > 0.0 => format!("{:.2}", fee),
        _ => "Free".to_string(),
    }
}

fn format_range<T: std::fmt::Display>(min: Option<T>, max: Option<T>, unit: &str) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{}-{}{}", min, max, unit),
        (Some(min), None) => format!("{}+{}", min, unit),
        (None, Some(max)) => format!("<={}{}", max, unit),
        (None, None) => "-".to_string(),
    }
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
