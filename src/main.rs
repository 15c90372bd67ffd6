use clap::Parser;
use wa_broadcast::core::contacts::read_contacts;
use wa_broadcast::core::template::MessageTemplate;
use wa_broadcast::domain::model::{SendMode, SessionEvent};
use wa_broadcast::domain::ports::MessagingClient;
use wa_broadcast::utils::{logger, validation::Validate};
use wa_broadcast::{BroadcastError, Broadcaster, CliConfig, HttpGateway, RandomPacer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting wa-broadcast CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // validate() already proved the delay parses; resolve just rebuilds it.
    let run = match config.resolve() {
        Ok(run) => run,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut client = HttpGateway::new(config.gateway.clone(), config.client_id.clone());

    // Session lifecycle: the loop ends on Ready, which is what triggers
    // ingestion and the send loop.
    loop {
        match client.next_event().await {
            Ok(SessionEvent::QrCode(code)) => {
                tracing::info!("📱 Scan this login code in WhatsApp (Menu → Linked Devices):");
                println!("{}", code);
            }
            Ok(SessionEvent::Authenticated) => {
                tracing::info!("✅ Authenticated successfully");
            }
            Ok(SessionEvent::Ready) => {
                tracing::info!("✅ WhatsApp client ready");
                break;
            }
            Ok(SessionEvent::AuthFailed(reason)) => {
                let e = BroadcastError::AuthError { message: reason };
                tracing::error!("❌ {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            Err(e) => {
                tracing::error!("❌ Gateway session error: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }

    let template = match MessageTemplate::load(&run.message_path) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("❌ Failed to read message file: {}", e);
            std::process::exit(1);
        }
    };

    let contacts = match read_contacts(&run.numbers_path) {
        Ok(contacts) => contacts,
        Err(e) => {
            eprintln!("❌ Failed to read contacts: {}", e);
            std::process::exit(1);
        }
    };

    if contacts.is_empty() {
        eprintln!("❌ No valid contacts found in CSV file");
        std::process::exit(1);
    }

    let (mode_text, mode_word) = match run.mode {
        SendMode::Test => ("TEST MODE - first contact only", "test"),
        SendMode::Full => ("FULL MODE - all contacts", "full"),
    };

    tracing::info!("📋 Found {} contacts, running in {}", contacts.len(), mode_text);
    tracing::info!(
        "⏱️  Delay between messages: {}-{} seconds",
        run.delay.min().as_secs(),
        run.delay.max().as_secs()
    );
    tracing::info!("Message template:\n\"{}\"", template.preview());
    tracing::info!("🚀 Starting {} broadcast...", mode_word);

    let mut broadcaster = Broadcaster::new(client, RandomPacer::new());

    match broadcaster
        .run(&contacts, &template, run.mode, &run.delay)
        .await
    {
        Ok(report) => {
            tracing::info!("🎉 Broadcast completed!");
            tracing::info!(
                "📊 Summary: {} successful, {} failed",
                report.success_count,
                report.fail_count
            );
            println!(
                "📊 Summary: {} successful, {} failed",
                report.success_count, report.fail_count
            );
        }
        Err(e) => {
            tracing::error!("❌ Broadcast failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
