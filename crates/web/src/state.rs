use std::sync::Arc;

use storage::Database;

use crate::clients::auth::AuthClient;
use crate::clients::razorpay::RazorpayClient;
use crate::config::Config;

/// Everything a request handler needs, built once at startup and
/// cloned per request. No globals.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub razorpay: RazorpayClient,
    pub auth: AuthClient,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let razorpay = RazorpayClient::new(&config.razorpay_key_id, &config.razorpay_key_secret);
        let auth = AuthClient::new(&config.supabase_url, &config.supabase_anon_key);

        Self {
            db,
            config: Arc::new(config),
            razorpay,
            auth,
        }
    }
}
