use crate::app::repl::run_chat;
use crate::app::status::render_status;
use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use meetyourmaker::admin::Admin;
use meetyourmaker::config::Config;
use meetyourmaker::conversation::{ConversationEngine, EngineOptions, RefreshOutcome, SubmitOutcome};
use meetyourmaker::persona::Mode;
use meetyourmaker::providers::{OpenAiProvider, Provider};
use meetyourmaker::store::{
    self, Collection, IdentityCard, SampleDraft, SampleStore, SampleType, WritingSample,
};
use meetyourmaker::{IdentityCommands, SampleCommands};
use std::sync::Arc;
use tracing::info;

fn build_engine(
    config: &Config,
    store: Arc<dyn SampleStore>,
    mode: Mode,
) -> Result<ConversationEngine> {
    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(
        &config.completion.base_url,
        config.completion.api_key.as_deref(),
    ));
    let options = EngineOptions {
        initial_mode: mode,
        ..EngineOptions::from_config(config)
    };
    ConversationEngine::new(provider, store, options)
}

fn parse_collection(raw: &str) -> Result<Collection> {
    raw.parse::<Collection>().map_err(anyhow::Error::msg)
}

fn parse_sample_type(raw: Option<&str>) -> Result<Option<SampleType>> {
    raw.map(|value| {
        SampleType::parse(value)
            .with_context(|| format!("unknown type {value:?}; expected professional or casual"))
    })
    .transpose()
}

fn print_sample(sample: &WritingSample) {
    let sample_type = sample.sample_type.map_or("-", SampleType::as_str);
    let category = sample.category.as_deref().unwrap_or("-");
    println!("{}  [{sample_type}/{category}]", sample.id);
    println!("    {}", sample.content);
    println!("    Context: {}", sample.context);
}

fn print_identity(card: &IdentityCard) {
    if card.is_empty() {
        println!("(no identity card saved)");
        return;
    }
    for (label, value) in [
        ("name", card.name()),
        ("occupation", card.occupation()),
        ("location", card.location()),
        ("bio", card.bio()),
    ] {
        println!("{label:>10}: {}", value.unwrap_or("-"));
    }
}

async fn run_samples(admin: &Admin, command: SampleCommands) -> Result<()> {
    match command {
        SampleCommands::List {
            collection,
            sample_type,
        } => {
            let collection = parse_collection(&collection)?;
            let samples = admin
                .list(collection, parse_sample_type(sample_type.as_deref())?)
                .await?;
            if samples.is_empty() {
                println!("(no samples in {collection})");
            }
            for sample in &samples {
                print_sample(sample);
            }
            Ok(())
        }
        SampleCommands::Add {
            collection,
            content,
            context,
            category,
            sample_type,
        } => {
            let draft = SampleDraft {
                content,
                context,
                category,
                sample_type: parse_sample_type(sample_type.as_deref())?,
            };
            let sample = admin.create(parse_collection(&collection)?, &draft).await?;
            println!("✓ created {}", sample.id);
            Ok(())
        }
        SampleCommands::Update {
            collection,
            id,
            content,
            context,
            category,
            sample_type,
        } => {
            let draft = SampleDraft {
                content,
                context,
                category,
                sample_type: parse_sample_type(sample_type.as_deref())?,
            };
            let sample = admin
                .update(parse_collection(&collection)?, &id, &draft)
                .await?;
            println!("✓ updated {}", sample.id);
            Ok(())
        }
        SampleCommands::Delete { collection, id } => {
            admin.delete(parse_collection(&collection)?, &id).await?;
            println!("✓ deleted {id}");
            Ok(())
        }
    }
}

async fn run_identity(admin: &Admin, command: IdentityCommands) -> Result<()> {
    match command {
        IdentityCommands::Show => {
            print_identity(&admin.identity().await?);
            Ok(())
        }
        IdentityCommands::Set {
            name,
            occupation,
            location,
            bio,
        } => {
            let saved = admin
                .set_identity(&IdentityCard {
                    name,
                    occupation,
                    location,
                    bio,
                })
                .await?;
            println!("✓ identity saved");
            print_identity(&saved);
            Ok(())
        }
    }
}

async fn run_ask(engine: &ConversationEngine, message: &str) -> Result<()> {
    if let RefreshOutcome::Failed(error) = engine.refresh().await {
        eprintln!("! {error}");
    }
    match engine.submit(message).await {
        SubmitOutcome::Replied(reply) => {
            println!("{reply}");
            Ok(())
        }
        SubmitOutcome::EmptyReply => {
            info!("completion returned no text");
            Ok(())
        }
        SubmitOutcome::Failed(error) => bail!(error),
        SubmitOutcome::Ignored => bail!("message must not be empty"),
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Chat { mode } => {
            let store = store::create_store(&config.store)?;
            let engine = build_engine(&config, store, mode.parse()?)?;
            run_chat(engine).await
        }

        Commands::Ask { mode, message } => {
            let store = store::create_store(&config.store)?;
            let engine = build_engine(&config, store, mode.parse()?)?;
            run_ask(&engine, &message).await
        }

        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting gateway on {host} (random port)");
            } else {
                info!("Starting gateway on {host}:{port}");
            }
            meetyourmaker::gateway::run_gateway(&host, port, config).await
        }

        Commands::Samples { sample_command } => {
            let admin = Admin::new(store::create_store(&config.store)?);
            run_samples(&admin, sample_command).await
        }

        Commands::Identity { identity_command } => {
            let admin = Admin::new(store::create_store(&config.store)?);
            run_identity(&admin, identity_command).await
        }

        Commands::Prompt { mode } => {
            let store = store::create_store(&config.store)?;
            let engine = build_engine(&config, store, mode.parse()?)?;
            if let RefreshOutcome::Failed(error) = engine.refresh().await {
                eprintln!("! {error}");
            }
            println!("{}", engine.system_prompt().await?);
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
