use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    /// Shared secret for the cron trigger endpoints. Required: the
    /// triggers fail closed when the header does not match.
    pub cron_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID")
                .context("Cannot load RAZORPAY_KEY_ID env variable")?,
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .context("Cannot load RAZORPAY_KEY_SECRET env variable")?,
            cron_secret: std::env::var("CRON_SECRET")
                .context("Cannot load CRON_SECRET env variable")?,
            supabase_url: std::env::var("SUPABASE_URL")
                .context("Cannot load SUPABASE_URL env variable")?,
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .context("Cannot load SUPABASE_ANON_KEY env variable")?,
        })
    }
}
