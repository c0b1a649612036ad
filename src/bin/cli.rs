use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;

use staylink::config::Config;
use staylink::models::{Role, User};
use staylink::rest::SessionResponse;
use staylink::storage::SessionStore;

#[derive(Parser)]
#[command(name = "staylink-cli")]
#[command(about = "CLI for the StayLink hotel booking API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "http://localhost:11111")]
    url: String,

    /// Where the local session is kept (defaults to STAYLINK_DATA_DIR)
    #[arg(long)]
    session_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
        /// hotel_owner or traveller
        #[arg(short, long)]
        role: Role,
    },
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Logout,
    Whoami,
    Search {
        #[arg(short, long, default_value = "")]
        location: String,
        #[arg(short = 'm', long, default_value_t = 300.0)]
        max_price: f64,
        #[arg(short, long, default_value_t = 2)]
        guests: u8,
    },
    Hotel {
        #[arg(short, long)]
        id: u32,
    },
    Quote {
        #[arg(short, long)]
        id: u32,
        #[arg(long)]
        check_in: Option<NaiveDate>,
        #[arg(long)]
        check_out: Option<NaiveDate>,
    },
    Book {
        #[arg(short, long)]
        id: u32,
        #[arg(long)]
        check_in: Option<NaiveDate>,
        #[arg(long)]
        check_out: Option<NaiveDate>,
        #[arg(short, long, default_value_t = 2)]
        guests: u8,
    },
    Properties,
    AddProperty {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        location: String,
        #[arg(short, long)]
        price: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        image: String,
        /// Extra amenities on top of WiFi
        #[arg(short, long)]
        amenity: Vec<String>,
    },
    DarkMode {
        /// Omit to print the stored preference
        #[arg(action = clap::ArgAction::Set)]
        enabled: Option<bool>,
    },
}

fn with_token(
    request: RequestBuilder,
    store: &SessionStore,
) -> Result<RequestBuilder, Box<dyn std::error::Error>> {
    Ok(match store.token()? {
        Some(token) => request.header("Authorization", format!("Bearer {}", token)),
        None => request,
    })
}

async fn print_response(res: Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;
    if status.is_success() {
        println!("{}", body);
    } else {
        println!("Request failed ({}): {}", status, body);
    }
    Ok(())
}

async fn start_session(
    res: Response,
    store: &SessionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    if res.status().is_success() {
        let session: SessionResponse = res.json().await?;
        store.save_session(&session.user, &session.token)?;
        println!(
            "Welcome, {}! Signed in as {}.",
            session.user.name,
            session.user.role.display_name()
        );
        Ok(())
    } else {
        print_response(res).await
    }
}

fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role.as_str())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let session_dir = cli
        .session_dir
        .unwrap_or_else(|| config.data_dir.to_string_lossy().into_owned());
    let store = SessionStore::open(&session_dir)?;
    let client = Client::new();

    match cli.command {
        Commands::Register { email, password, name, role } => {
            let res = client.post(format!("{}/register", cli.url))
                .json(&json!({ "email": email, "password": password, "name": name, "role": role }))
                .send()
                .await?;
            start_session(res, &store).await?;
        }
        Commands::Login { email, password } => {
            let res = client.post(format!("{}/login", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?;
            start_session(res, &store).await?;
        }
        Commands::Logout => {
            store.clear_session()?;
            println!("You have been logged out");
        }
        Commands::Whoami => match store.current_user()? {
            Some(user) => println!("{}", describe(&user)),
            None => println!("Not logged in."),
        },
        Commands::Search { location, max_price, guests } => {
            let res = client.get(format!("{}/hotels", cli.url))
                .query(&[
                    ("location", location),
                    ("max_price", max_price.to_string()),
                    ("guests", guests.to_string()),
                ])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Hotel { id } => {
            let res = client.get(format!("{}/hotels/{}", cli.url, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Quote { id, check_in, check_out } => {
            let mut query = vec![];
            if let Some(date) = check_in {
                query.push(("check_in", date.to_string()));
            }
            if let Some(date) = check_out {
                query.push(("check_out", date.to_string()));
            }
            let res = client.get(format!("{}/hotels/{}/quote", cli.url, id))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Book { id, check_in, check_out, guests } => {
            let request = client.post(format!("{}/bookings", cli.url)).json(&json!({
                "hotel_id": id,
                "check_in": check_in,
                "check_out": check_out,
                "guests": guests
            }));
            let res = with_token(request, &store)?.send().await?;
            print_response(res).await?;
        }
        Commands::Properties => {
            let request = client.get(format!("{}/properties", cli.url));
            let res = with_token(request, &store)?.send().await?;
            print_response(res).await?;
        }
        Commands::AddProperty { name, location, price, description, image, amenity } => {
            let mut amenities = vec!["WiFi".to_string()];
            amenities.extend(
                amenity
                    .into_iter()
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty()),
            );
            let request = client.post(format!("{}/properties", cli.url)).json(&json!({
                "name": name,
                "location": location,
                "price": price,
                "description": description,
                "image": image,
                "amenities": amenities
            }));
            let res = with_token(request, &store)?.send().await?;
            print_response(res).await?;
        }
        Commands::DarkMode { enabled } => match enabled {
            Some(enabled) => {
                store.set_dark_mode(enabled)?;
                println!("Dark mode preference saved: {}", enabled);
            }
            None => match store.dark_mode()? {
                Some(enabled) => println!("Dark mode: {}", enabled),
                None => println!("Dark mode: not set"),
            },
        },
    }

    Ok(())
}
