use anyhow::Context;
use clap::Parser;
use commander_assist::app::legality::lookup_legality;
use commander_assist::app::render::{render_json, render_legality_markdown, render_markdown};
use commander_assist::config::{Command, OutputFormat, ValidateArgs};
use commander_assist::utils::error::ErrorSeverity;
use commander_assist::utils::logger;
use commander_assist::{
    AssistError, CliConfig, DeckValidator, ScryfallResolver, TomlConfig, ValidationOptions,
};

const EXIT_INVALID_DECK: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            // 日誌尚未初始化
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || settings.json_logs() {
        logger::init_json_logger(cli.verbose, settings.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level());
    }

    tracing::info!("Starting commander-assist");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Settings: {:?}", settings);
    }

    let resolver = match ScryfallResolver::from_config(&settings) {
        Ok(resolver) => resolver,
        Err(e) => exit_with_error(e),
    };

    match &cli.command {
        Command::Validate(args) => run_validate(resolver, &settings, args).await,
        Command::Legality { name } => match lookup_legality(&resolver, name).await {
            Ok(lookup) => {
                println!("{}", render_legality_markdown(&lookup));
                Ok(())
            }
            Err(e) => exit_with_error(e),
        },
    }
}

async fn run_validate(
    resolver: ScryfallResolver,
    settings: &TomlConfig,
    args: &ValidateArgs,
) -> anyhow::Result<()> {
    let decklist = match (&args.decklist, &args.decklist_file) {
        (Some(decklist), _) => decklist.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read decklist file '{}'", path.display()))?,
        (None, None) => anyhow::bail!("Either --decklist or --decklist-file is required"),
    };

    let validator = DeckValidator::with_options(resolver, ValidationOptions::from_config(settings));

    // Ctrl-C 取消驗證
    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    match validator
        .validate_deck_until(&args.commander, &decklist, cancel)
        .await
    {
        Ok(report) => {
            let rendered = match args.format {
                OutputFormat::Markdown => render_markdown(&report),
                OutputFormat::Json => render_json(&report)?,
            };
            println!("{}", rendered);

            if report.is_valid() {
                tracing::info!("✅ Deck is valid");
                Ok(())
            } else {
                tracing::info!("❌ Deck is not valid");
                std::process::exit(EXIT_INVALID_DECK);
            }
        }
        Err(e) => exit_with_error(e),
    }
}

fn exit_with_error(e: AssistError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?}, Retryable: {})",
        e,
        e.category(),
        e.severity(),
        e.is_retryable()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 130, // 使用者取消
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
