use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shared::{
    domain::{find_city, OfferId},
    protocol::LoginRequest,
};
use six_cities_core::{
    guard, guard_route, selectors, Action, AppRoute, Guarded, HttpApi, NotificationLevel,
    Orchestrator, ReviewForm, SortOption, Store, StoreEvent, TokenStore,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "six-cities", about = "Browse and book short-term rentals in six cities")]
struct Cli {
    /// Overrides the configured API base url.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Popular,
    PriceLow,
    PriceHigh,
    TopRated,
}

impl From<SortArg> for SortOption {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Popular => Self::Popular,
            SortArg::PriceLow => Self::PriceLowToHigh,
            SortArg::PriceHigh => Self::PriceHighToLow,
            SortArg::TopRated => Self::TopRated,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List offers in a city.
    Offers {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, value_enum, default_value = "popular")]
        sort: SortArg,
    },
    /// Show an offer page with reviews and nearby places.
    Offer { id: String },
    /// Post a review for an offer.
    Review {
        id: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// List saved offers grouped by city.
    Favorites,
    /// Add an offer to favorites, or remove it with --remove.
    Favorite {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

type App = Orchestrator<HttpApi>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
        settings.validate()?;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tokens = TokenStore::open(&settings.token_path)
        .await
        .with_context(|| format!("failed to open token file {}", settings.token_path.display()))?;
    let api = HttpApi::new(&settings.api_url, settings.request_timeout(), tokens)?;
    let store = Arc::new(Store::with_default_city(settings.city()?));
    let app = Orchestrator::new(Arc::clone(&store), Arc::new(api));
    let mut events = store.subscribe_events();

    info!(api_url = %settings.api_url, "starting");
    let status = app.check_auth().await;
    debug!(?status, "authorization checked");

    let outcome = run(&app, cli.command).await;
    report_events(&mut events);
    outcome
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Offers { city, sort } => {
            if let Some(city) = city {
                let city = find_city(&city).ok_or_else(|| anyhow!("unknown city '{city}'"))?;
                app.store().dispatch(Action::SelectLocation(city.name));
            }
            app.load_offers().await.context("failed to load offers")?;
            println!("{}", app.store().select(|state| render::offer_list(state, sort.into())));
        }
        Command::Offer { id } => {
            let id = OfferId::new(id);
            let loaded = app.open_offer(&id).await;
            println!("{}", app.store().select(render::offer_page));
            loaded.with_context(|| format!("failed to load offer {id}"))?;
        }
        Command::Review {
            id,
            rating,
            comment,
        } => {
            let status = app.store().select(selectors::authorization_status);
            match guard(status, || ReviewForm::new(OfferId::new(id))) {
                Guarded::Render(mut form) => {
                    form.set_rating(Some(rating));
                    form.set_comment(comment);
                    let review = form.submit(app).await?;
                    println!("{}", render::review_line(&review));
                }
                Guarded::Redirect(route) => println!("Sign in to post a review ({route})"),
                Guarded::Pending => {}
            }
        }
        Command::Login { email, password } => {
            let user = app.login(&LoginRequest { email, password }).await?;
            println!("{}", render::user(Some(&user)));
        }
        Command::Logout => {
            app.logout().await.context("failed to sign out")?;
            println!("{}", render::user(None));
        }
        Command::Favorites => {
            let status = app.store().select(selectors::authorization_status);
            match guard_route(status, AppRoute::Favorites) {
                Guarded::Render(_) => {
                    app.load_favorites().await.context("failed to load favorites")?;
                    println!("{}", app.store().select(render::favorites));
                }
                Guarded::Redirect(route) => println!("Sign in to see saved offers ({route})"),
                Guarded::Pending => {}
            }
        }
        Command::Favorite { id, remove } => {
            let id = OfferId::new(id);
            if let Some(offer) = app.toggle_favorite(&id, !remove).await? {
                println!("{}", render::offer_card(&offer));
            }
        }
    }
    Ok(())
}

/// Prints redirects and notifications raised while the command ran.
fn report_events(events: &mut broadcast::Receiver<StoreEvent>) {
    loop {
        match events.try_recv() {
            Ok(StoreEvent::Redirect(route)) => eprintln!("-> {route}"),
            Ok(StoreEvent::Notification(notification)) => match notification.level {
                NotificationLevel::Info => eprintln!("{}", notification.message),
                NotificationLevel::Error => eprintln!("error: {}", notification.message),
            },
            Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "missed store events"),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}
