use crate::http::{create_router, AppState};
use crate::report::render_report;
use application::RecommendationService;
use clap::{Args, Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use domain::profile::{education_label, UserProfile, EDUCATION_LEVELS};
use infrastructure::config::Config;
use shared::types::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lab_recommender")]
#[command(about = "Recommends research labs from the ORCID registry using embeddings and an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Produce recommendations for one profile and print them
    Recommend(RecommendArgs),
}

#[derive(Args, Default)]
pub struct RecommendArgs {
    #[arg(long)]
    pub major: Option<String>,
    /// Comma-separated keywords of interest
    #[arg(long)]
    pub keywords: Option<String>,
    #[arg(long)]
    pub education_level: Option<String>,
    #[arg(long)]
    pub additional_info: Option<String>,
    /// Print the raw JSON array instead of a report
    #[arg(long)]
    pub json: bool,
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Serve { host, port } => self.serve(&host, port).await,
            Command::Recommend(args) => self.recommend(args).await,
        }
    }

    async fn serve(&self, host: &str, port: u16) -> Result<()> {
        if !self.config.has_llm_credential() {
            warn!("DEEPSEEK_API_KEY is not set; responses will use built-in mock data");
        }
        let state = AppState::new(RecommendationService::from_config(&self.config));
        let listener = TcpListener::bind((host, port)).await?;
        info!(address = %listener.local_addr()?, "lab recommender listening");
        axum::serve(listener, create_router(state)).await?;
        Ok(())
    }

    async fn recommend(&self, args: RecommendArgs) -> Result<()> {
        let as_json = args.json;
        let profile = prompt_profile(args)?;
        let service = RecommendationService::from_config(&self.config);
        let labs = service.recommend(&profile).await?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&labs)?);
        } else {
            print!("{}", render_report(&labs));
        }
        Ok(())
    }
}

/// Fill in whatever the flags left out by asking on the terminal.
fn prompt_profile(args: RecommendArgs) -> Result<UserProfile> {
    let theme = ColorfulTheme::default();
    let major = match non_blank(args.major) {
        Some(major) => major,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Major")
            .interact_text()?,
    };
    let keywords = match non_blank(args.keywords) {
        Some(keywords) => keywords,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Keywords of interest (comma-separated)")
            .interact_text()?,
    };
    let education_level = match non_blank(args.education_level) {
        Some(level) => level,
        None => {
            let labels: Vec<&str> = EDUCATION_LEVELS.iter().map(|code| education_label(code)).collect();
            let choice = Select::with_theme(&theme)
                .with_prompt("Education level")
                .items(&labels)
                .default(0)
                .interact()?;
            EDUCATION_LEVELS[choice].to_string()
        }
    };

    Ok(UserProfile::new(
        major,
        keywords,
        education_level,
        non_blank(args.additional_info),
    )?)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
