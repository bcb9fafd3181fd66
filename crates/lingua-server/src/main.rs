// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! lingua localization server binary.

use clap::{Parser, Subcommand};
use lingua_server::{create_app_state, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// lingua server - localization management backend.
#[derive(Parser, Debug)]
#[command(name = "lingua-server", about = "lingua localization server", version)]
struct Args {
	/// Subcommands for lingua-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	// Handle subcommands that should not start the server
	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = lingua_server_config::load_config()?;

	// Setup tracing
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting lingua-server"
	);

	// Create database pool and run migrations
	let pool = lingua_server::db::create_pool(&config.database.url).await?;
	lingua_server::db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config)?;
	let router = create_router(state);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!(addr = %addr, "listening");

	axum::serve(listener, router).await?;

	Ok(())
}
