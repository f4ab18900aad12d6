use crate::server::config::{AppConfig, ConfigValidator};
use std::path::Path;
use tgparse_core::{ClientHandle, Credentials};
use tgparse_telegram::MtprotoConnector;

pub async fn run() -> anyhow::Result<()> {
    println!("🏥 tgparse Doctor\n");

    let mut all_ok = true;

    check_env_file();
    let config = check_config();
    all_ok &= config.is_some();

    let credentials = Credentials::from_env();
    check_credentials(&credentials);

    if let Some(config) = &config {
        all_ok &= check_connection(&credentials, config).await;
    }

    println!();
    if all_ok {
        println!("✅ All checks passed! Ready to run tgparse.");
    } else {
        println!("⚠️  Some checks failed. Please fix the issues above.");
        std::process::exit(1);
    }

    Ok(())
}

fn check_env_file() {
    print!("Checking .env file... ");

    if Path::new(".env").exists() {
        println!("✅ Found");
    } else {
        println!("ℹ️  Not found (using process environment only)");
        println!("  Copy .env.example to .env to configure credentials");
    }
}

fn check_config() -> Option<AppConfig> {
    print!("Checking configuration... ");

    match crate::server::load_config() {
        Ok(config) => {
            let checks = [
                ConfigValidator::validate_port(config.server.port),
                ConfigValidator::validate_connect_timeout(config.telegram.connect_timeout_secs),
            ];
            if let Some(Err(e)) = checks.iter().find(|c| c.is_err()) {
                println!("❌ {}", e);
                return None;
            }
            println!(
                "✅ {}:{} (connect timeout {}s)",
                config.server.host, config.server.port, config.telegram.connect_timeout_secs
            );
            Some(config)
        }
        Err(e) => {
            println!("❌ {:#}", e);
            None
        }
    }
}

fn check_credentials(credentials: &Credentials) {
    print!("Checking Telegram credentials... ");

    if credentials.is_complete() {
        println!("✅ API_ID and API_HASH set");
    } else {
        println!(
            "ℹ️  Missing {} (server will run in mock mode)",
            credentials.missing().join(", ")
        );
    }

    if credentials.session_configured() {
        println!("  ✅ TELEGRAM_SESSION set");
    } else {
        println!("  ℹ️  TELEGRAM_SESSION not set (a local session file will be used)");
    }
}

async fn check_connection(credentials: &Credentials, config: &AppConfig) -> bool {
    print!("Checking Telegram connectivity... ");

    let Some(app) = credentials.app() else {
        println!("ℹ️  Skipped (mock mode)");
        return true;
    };

    let connector = MtprotoConnector::new(&config.telegram.session_file);
    match ClientHandle::connect(&app, &connector, config.telegram.connect_timeout()).await {
        Ok(session) => {
            if session.is_connected().unwrap_or(false) {
                println!("✅ Connected");
                true
            } else {
                println!("⚠️  Session established but reports disconnected");
                false
            }
        }
        Err(e) => {
            println!("❌ {}", e);
            false
        }
    }
}
