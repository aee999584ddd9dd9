use clap::Parser;
use lottery_skill::adapters::text;
use lottery_skill::core::dialog::WINNER_COUNT_SLOT;
use lottery_skill::domain::model::{DialogState, ResponseSpec, SkillRequest};
use lottery_skill::domain::ports::SkillSettings;
use lottery_skill::utils::{logger, validation::Validate};
use lottery_skill::{CliConfig, FileGateway, RequestHandler, SkillEngine, TomlConfig};
use std::collections::HashMap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lottery-skill CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let request = build_request(&config)?;
    let gateway = FileGateway::new(config.store_path.clone());
    let session_key = config.session_key.clone();

    let response = match &config.config {
        Some(path) => {
            let settings = TomlConfig::from_file(path)?;
            run_turn(gateway, settings, &session_key, request).await?
        }
        None => run_turn(gateway, config.clone(), &session_key, request).await?,
    };

    if let Some(speech) = &response.speech {
        println!("💬 {}", text::render(speech));
    }
    if let Some(reprompt) = &response.reprompt {
        println!("🔁 {}", text::render(reprompt));
    }
    if let Some(card) = &response.card {
        println!("🗂️  {}: {}", card.title, card.body);
    }
    if let Some(directive) = &response.directive {
        println!("➡️  Host directive: {:?}", directive);
    }
    if response.end_session {
        println!("👋 Session ended.");
    }

    Ok(())
}

async fn run_turn<C: SkillSettings + Validate>(
    gateway: FileGateway,
    settings: C,
    session_key: &str,
    request: SkillRequest,
) -> anyhow::Result<ResponseSpec> {
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let engine = SkillEngine::new(gateway, settings);
    Ok(engine.handle(session_key, request).await?)
}

fn build_request(config: &CliConfig) -> anyhow::Result<SkillRequest> {
    let request = match config.request.as_str() {
        "launch" => SkillRequest::Launch,
        "draw" => {
            let mut slots = HashMap::new();
            // Without a count the dialog is incomplete; the controller will
            // ask the host to collect the slot.
            let dialog_state = match config.winner_count {
                Some(count) => {
                    slots.insert(WINNER_COUNT_SLOT.to_string(), count.to_string());
                    DialogState::Completed
                }
                None => DialogState::Started,
            };
            SkillRequest::Intent {
                name: "DrawLotsIntent".to_string(),
                slots,
                dialog_state,
            }
        }
        "no" => intent("AMAZON.NoIntent"),
        "help" => intent("AMAZON.HelpIntent"),
        "stop" => intent("AMAZON.StopIntent"),
        "end" => SkillRequest::SessionEnded {
            reason: Some("USER_INITIATED".to_string()),
        },
        other => anyhow::bail!(
            "Unknown request kind: {other} (expected launch, draw, no, help, stop or end)"
        ),
    };
    Ok(request)
}

fn intent(name: &str) -> SkillRequest {
    SkillRequest::Intent {
        name: name.to_string(),
        slots: HashMap::new(),
        dialog_state: DialogState::Completed,
    }
}
