use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::{error, info};

use alteration_ledger::api::{self, job::JobService, validation};
use alteration_ledger::auth::AdminSessions;
use alteration_ledger::cli::{self, Cli, Command};
use alteration_ledger::config::Config;
use alteration_ledger::db;
use alteration_ledger::logging;
use alteration_ledger::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let command = Cli::parse().command.unwrap_or(Command::Serve);

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");

    logging::init(&config.log_dir).expect("Failed to initialize logging");

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .expect("Failed to connect to database");
    info!("Database connection pool established");

    // Run migrations on startup so older databases gain any missing columns
    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    match command {
        Command::Serve => {}
        Command::Migrate => {
            pool.close().await;
            return Ok(());
        }
        other => {
            let service = JobService::new(pool.clone(), config.shop_name.clone());
            let result = cli::run(&other, &service).await;
            pool.close().await;
            if let Err(e) = result {
                error!("Command failed: {}", e);
                return Err(std::io::Error::other(e));
            }
            return Ok(());
        }
    }

    info!("Starting alteration-ledger");
    info!("Configuration loaded successfully:");
    info!("  - Shop name: {}", config.shop_name);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);

    let server_pool = pool.clone();
    let sessions = web::Data::new(AdminSessions::new(config.admin_password.clone()));
    let job_service = web::Data::new(JobService::new(pool.clone(), config.shop_name.clone()));
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(job_service.clone())
            .app_data(sessions.clone())
            .app_data(payload_config)
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(api::routes)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server.bind((config.host.as_str(), config.port))?.run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);
    coordinator.wait_for_shutdown().await
}
