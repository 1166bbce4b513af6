use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Endpoint used when the plugin configuration names none.
pub const DEFAULT_BASE_URL: &str = "https://fastfind.app";

// ─────────────────────────────────────────────────────────────────────────────
// Plugin settings
// ─────────────────────────────────────────────────────────────────────────────

/// Plugin options as handed over by the host, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing apiKey in plugin config")]
    MissingApiKey,
}

/// Validated, immutable settings for one [`crate::client::ConstellaClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ConstellaSettings {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for ConstellaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstellaSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PluginConfig {
    /// Read `baseUrl` and `apiKey` from the host's JSON configuration.
    ///
    /// Non-string values are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            base_url: field("baseUrl"),
            api_key: field("apiKey"),
        }
    }

    /// Trim both options, apply the default base URL and require a key.
    pub fn resolve(&self) -> Result<ConstellaSettings, SettingsError> {
        let api_key = non_blank(self.api_key.as_deref()).ok_or(SettingsError::MissingApiKey)?;
        let base_url = non_blank(self.base_url.as_deref()).unwrap_or(DEFAULT_BASE_URL);

        Ok(ConstellaSettings {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Host configuration (reference binary)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub plugin: PluginSection,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Per-request timeout applied by the host; `0` disables it.
    pub request_timeout_secs: u64,
}

/// Constella plugin options as stored in the host's config file.
#[derive(Deserialize, Clone, Default)]
pub struct PluginSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for PluginSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginSection")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ToolsConfig {
    /// Optional tools the host refuses to expose.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.request_timeout_secs", 60)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::new("config.yaml", FileFormat::Yaml).required(false)),
        };

        // CONSTELLA_SERVER__PORT=8000, CONSTELLA_PLUGIN__API_KEY=..., CONSTELLA_TOOLS__DISABLED=a,b
        builder = builder.add_source(
            Environment::with_prefix("CONSTELLA")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tools.disabled")
                .try_parsing(true),
        );

        // CLI flags win over everything else.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }

        builder.build()?.try_deserialize()
    }

    /// The plugin configuration in the shape the plugin reads (`baseUrl`, `apiKey`).
    pub fn plugin_config(&self) -> Value {
        let mut map = Map::new();
        if let Some(base_url) = &self.plugin.base_url {
            map.insert("baseUrl".into(), Value::String(base_url.clone()));
        }
        if let Some(api_key) = &self.plugin.api_key {
            map.insert("apiKey".into(), Value::String(api_key.clone()));
        }
        Value::Object(map)
    }
}
