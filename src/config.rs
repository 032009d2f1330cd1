use clap::{Parser, ValueEnum};

/// Deployment environment; decides cookie attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

/// Application configuration loaded from flags or environment variables
#[derive(Clone, Debug, Parser)]
#[command(name = "job-crafter", about = "Freelance job marketplace API")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Full MongoDB connection string; takes precedence over DB_USER/DB_PASS
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    /// Atlas cluster host used when building the connection string
    #[arg(long, env = "DB_HOST", default_value = "cluster0.kmxsq.mongodb.net")]
    pub db_host: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "jobCrafter")]
    pub database_name: String,

    /// Secret used to sign and verify credential tokens
    #[arg(long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub access_token_secret: String,

    #[arg(long, env = "APP_ENV", value_enum, default_value = "development")]
    pub environment: Environment,

    /// Origins allowed to make credentialed cross-site requests
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,https://job-crafter-frontend.vercel.app"
    )]
    pub cors_origins: Vec<String>,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 10MB (10 * 1024 * 1024)
    #[arg(long, env = "MAX_PAYLOAD_SIZE", default_value_t = 10 * 1024 * 1024)]
    pub max_payload_size: usize,

    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// A `.env` file is read first if one exists. Required:
    /// - ACCESS_TOKEN_SECRET
    /// - DATABASE_URL, or both DB_USER and DB_PASS
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let config = Config::try_parse().map_err(|e| e.to_string())?;
        config.database_uri()?;
        config.check_origins()?;
        Ok(config)
    }

    /// Credentialed CORS needs explicit origins; a wildcard is refused
    pub fn check_origins(&self) -> Result<(), String> {
        if self.cors_origins.iter().any(|origin| origin.trim() == "*") {
            return Err("CORS_ORIGINS must list explicit origins; '*' cannot be used with credentials".to_string());
        }
        Ok(())
    }

    /// MongoDB connection string
    pub fn database_uri(&self) -> Result<String, String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        match (&self.db_user, &self.db_pass) {
            (Some(user), Some(pass)) => Ok(format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
                user, pass, self.db_host
            )),
            _ => Err("DATABASE_URL or both DB_USER and DB_PASS must be set in .env file or environment".to_string()),
        }
    }
}
