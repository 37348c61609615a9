use domain::ranking::RankingSettings;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub orcid_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub chat_endpoint: String,
    pub chat_model: String,
    pub embedding_endpoint: String,
    pub embedding_model: String,
    pub embedding_vector_path: String,
    pub ranking: RankingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orcid_base_url: "https://pub.orcid.org/v3.0".to_string(),
            llm_api_key: None,
            llm_base_url: "https://api.deepseek.com".to_string(),
            chat_endpoint: "/v1/chat/completions".to_string(),
            chat_model: "deepseek-chat".to_string(),
            embedding_endpoint: "/v1/embeddings".to_string(),
            embedding_model: "deepseek-chat".to_string(),
            embedding_vector_path: "data.0.embedding".to_string(),
            ranking: RankingSettings::default(),
        }
    }
}

impl Config {
    /// Read `.env` (if present) and the process environment once.
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        let ranking = RankingSettings {
            search_rows: parsed(&lookup, "RECOMMEND_SEARCH_ROWS", defaults.ranking.search_rows),
            min_similarity: parsed_if(
                &lookup,
                "RECOMMEND_MIN_SIMILARITY",
                defaults.ranking.min_similarity,
                |value: &f32| value.is_finite(),
            ),
            top_k: parsed(&lookup, "RECOMMEND_TOP_K", defaults.ranking.top_k),
            fallback_count: parsed(
                &lookup,
                "RECOMMEND_FALLBACK_COUNT",
                defaults.ranking.fallback_count,
            ),
            embed_concurrency: parsed(
                &lookup,
                "RECOMMEND_EMBED_CONCURRENCY",
                defaults.ranking.embed_concurrency,
            )
            .max(1),
        };

        Self {
            orcid_base_url: text("ORCID_API_BASE_URL", defaults.orcid_base_url),
            llm_api_key: lookup("DEEPSEEK_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            llm_base_url: text("DEEPSEEK_BASE_URL", defaults.llm_base_url),
            chat_endpoint: text("DEEPSEEK_CHAT_ENDPOINT", defaults.chat_endpoint),
            chat_model: text("DEEPSEEK_CHAT_MODEL", defaults.chat_model),
            embedding_endpoint: text("DEEPSEEK_EMBEDDING_ENDPOINT", defaults.embedding_endpoint),
            embedding_model: text("DEEPSEEK_EMBEDDING_MODEL", defaults.embedding_model),
            embedding_vector_path: text(
                "DEEPSEEK_EMBEDDING_VECTOR_PATH",
                defaults.embedding_vector_path,
            ),
            ranking,
        }
    }

    pub fn has_llm_credential(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    parsed_if(lookup, key, default, |_| true)
}

/// Like `parsed`, but values rejected by `accept` also fall back to `default`.
fn parsed_if<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    accept: impl Fn(&T) -> bool,
) -> T {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<T>() {
            Ok(value) if accept(&value) => value,
            _ => {
                warn!(key, value = %raw, "ignoring unparsable setting");
                default
            }
        },
        _ => default,
    }
}
