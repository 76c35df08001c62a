//! Shared constants and invariants

/// A cached token is usable only while `expires_at > now + TOKEN_SKEW_SECONDS`.
pub const TOKEN_SKEW_SECONDS: u64 = 30;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

// Environment keys
pub const ENV_CLIENT_ID: &str = "XERO_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "XERO_CLIENT_SECRET";
pub const ENV_SCOPES: &str = "XERO_SCOPES";

// Upstream endpoints
pub const DEFAULT_TOKEN_URL: &str = "https://identity.xero.com/connect/token";
pub const DEFAULT_API_URL: &str = "https://api.xero.com/api.xro/2.0";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

// Files inside the storage directory
pub const TOKEN_FILE: &str = "tokens.json";
pub const ACCOUNTS_SNAPSHOT: &str = "accounts";
pub const VENDORS_SNAPSHOT: &str = "vendors";
pub const LOG_FILE: &str = "app.log";

/// Server-side filter for the contacts listing.
pub const SUPPLIER_FILTER: &str = "IsSupplier==true";
