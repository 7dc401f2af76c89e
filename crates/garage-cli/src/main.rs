use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use garage_core::{AuthService, Registration};
use garage_db::{Database, DatabaseConfig, TokenRepository, UserRepository};

#[derive(Parser)]
#[command(name = "garage", version, about = "Vehicle catalog administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create a user account
    CreateUser {
        #[arg(short, long)]
        username: String,

        /// Password (reads from GARAGE_USER_PASSWORD if not provided)
        #[arg(short, long, env = "GARAGE_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List user accounts
    Users,

    /// Delete a user together with their vehicles and token
    DeleteUser {
        #[arg(short, long)]
        username: String,
    },

    /// Revoke a user's API token
    RevokeToken {
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("garage=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Migrate => {
            db.migrate().await.map_err(|e| anyhow::anyhow!(e))?;
            tracing::info!("Migrations applied");
            println!("Migrations applied");
        }
        Commands::CreateUser { username, password } => {
            db.migrate().await.map_err(|e| anyhow::anyhow!(e))?;
            cmd_create_user(&auth(&db), username, password).await?;
        }
        Commands::Users => cmd_users(&auth(&db)).await?,
        Commands::DeleteUser { username } => cmd_delete_user(&auth(&db), &username).await?,
        Commands::RevokeToken { username } => cmd_revoke_token(&auth(&db), &username).await?,
    }

    Ok(())
}

type Auth = AuthService<UserRepository, TokenRepository>;

async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    Database::connect(&config)
        .await
        .context("Failed to connect to database")
}

fn auth(db: &Database) -> Auth {
    AuthService::new(db.user_repo(), db.token_repo())
}

async fn cmd_create_user(auth: &Auth, username: String, password: String) -> Result<()> {
    let user = auth
        .register(Registration {
            username: Some(username),
            password: Some(password),
        })
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(user_id = user.id, username = %user.username, "Created user from CLI");
    println!("Created user {} (id {})", user.username, user.id);
    Ok(())
}

async fn cmd_users(auth: &Auth) -> Result<()> {
    let users = auth.list_users().await.map_err(|e| anyhow::anyhow!(e))?;

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    for user in &users {
        println!(
            "  {:>6}  {:<30} joined {}",
            user.id,
            user.username,
            user.date_joined.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }

    println!("\nTotal: {} users", users.len());
    Ok(())
}

async fn cmd_delete_user(auth: &Auth, username: &str) -> Result<()> {
    let vehicles = auth
        .delete_user(username)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(username, vehicles, "Deleted user from CLI");
    println!("Deleted user {username} and {vehicles} vehicle(s)");
    Ok(())
}

async fn cmd_revoke_token(auth: &Auth, username: &str) -> Result<()> {
    let revoked = auth
        .revoke_token_for(username)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(username, revoked, "Token revocation from CLI");
    if revoked {
        println!("Revoked token for {username}");
    } else {
        println!("{username} has no token");
    }
    Ok(())
}
