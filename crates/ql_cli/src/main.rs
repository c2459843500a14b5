use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::info;
use uuid::Uuid;

use ql_auth::{TokenConfig, TokenService};
use ql_core::{
    Article, ArticleMetadata, GenerationRequest, Result, Store, Tone,
};
use ql_oracle::{create_oracle, fallback, Config};
use ql_storage::create_storage;
use ql_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(name = "quill", author, version, about = "AI-assisted blogging backend", long_about = None)]
struct Cli {
    /// Storage backend to use. Available backends: memory (default), sqlite
    #[arg(long, default_value = "memory")]
    storage: String,
    /// Database file for the sqlite backend
    #[arg(long)]
    db_path: Option<String>,
    /// Oracle backend to use. Available backends: scripted (default), nebius
    #[arg(long, default_value = "scripted")]
    oracle: String,
    /// API key for the hosted oracle
    #[arg(long, env = "NEBIUS_API_KEY")]
    api_key: Option<String>,
    /// Chat-completions endpoint override
    #[arg(long, env = "NEBIUS_BASE_URL")]
    base_url: Option<String>,
    /// Secret used to sign auth tokens; an ephemeral one is generated when absent
    #[arg(long, env = "QUILL_TOKEN_SECRET")]
    token_secret: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the REST API
    Serve {
        #[arg(long, default_value = "0.0.0.0:9090")]
        bind: String,
    },
    /// Generate one article and print it with its metadata
    Generate {
        #[arg(long)]
        keywords: String,
        #[arg(long, default_value = "professional")]
        tone: Tone,
        #[arg(long, default_value_t = 800)]
        word_count: u32,
    },
}

/// Store/read round trip before taking any traffic.
async fn check_storage(store: &Arc<dyn Store>) -> Result<()> {
    let now = Utc::now();
    let probe = Article {
        id: Uuid::new_v4(),
        title: "storage probe".to_string(),
        content: "storage probe".to_string(),
        tone: Tone::Technical,
        author: "quill-health-check".to_string(),
        metadata: ArticleMetadata {
            word_count: 2,
            reading_time_minutes: 1,
            seo_score: 0.0,
            meta_description: "storage probe".to_string(),
            tags: vec![],
        },
        created_at: now,
        updated_at: now,
        published: false,
    };

    store.save_article(&probe).await?;
    if store.get_article(probe.id).await?.is_none() {
        return Err(ql_core::Error::Storage(
            "failed to read back the probe article".to_string(),
        ));
    }
    store.delete_article(probe.id).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = create_storage(&cli.storage, cli.db_path.as_deref()).await?;
    info!("💾 Checking storage connection...");
    check_storage(&store).await?;
    info!("✨ Storage initialized successfully (using {})", cli.storage);

    let oracle_config = Config {
        api_key: cli.api_key.clone(),
        model: None,
        base_url: cli.base_url.clone(),
    };
    let oracle = create_oracle(&cli.oracle, &oracle_config)?;
    info!("🧠 Oracle initialized successfully (using {})", oracle.name());

    match cli.command {
        Commands::Serve { bind } => {
            let secret = cli.token_secret.clone().unwrap_or_else(|| {
                info!("🔑 No token secret configured, generating an ephemeral one");
                Uuid::new_v4().to_string()
            });
            let tokens = TokenService::new(&TokenConfig::new(secret));

            let app = create_app(AppState {
                oracle,
                store,
                tokens,
            });
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!("🚀 quill listening on {}", bind);
            axum::serve(listener, app).await?;
        }
        Commands::Generate {
            keywords,
            tone,
            word_count,
        } => {
            let request = GenerationRequest {
                keywords,
                tone,
                word_count,
            };
            request.validate()?;

            info!("✍️ Generating article about '{}'", request.keywords);
            let (text, forced_score) =
                fallback::generate_or_fallback(oracle.as_ref(), &request).await;

            let mut metadata = ql_metadata::compute(&text.title, &text.body, &request.keywords);
            if let Some(score) = forced_score {
                metadata.seo_score = score;
            }

            println!("{}\n", text.title);
            println!("{}\n", text.body);
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }

    Ok(())
}
