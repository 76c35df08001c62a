use crate::utils::constants::{ENV_CLIENT_ID, ENV_CLIENT_SECRET};

/// Client-credentials identity, fixed for the process lifetime.
#[derive(Clone, Default)]
pub struct Credentials {
    client_id: Option<String>,
    client_secret: Option<String>,
    scopes: Option<String>,
}

impl Credentials {
    /// Blank values are treated as absent; scopes are trimmed.
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        scopes: Option<String>,
    ) -> Self {
        Self {
            client_id: non_blank(client_id),
            client_secret: non_blank(client_secret),
            scopes: non_blank(scopes.map(|s| s.trim().to_owned())),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Names of the missing required variables, id first.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::with_capacity(2);
        if self.client_id.is_none() {
            missing.push(ENV_CLIENT_ID);
        }
        if self.client_secret.is_none() {
            missing.push(ENV_CLIENT_SECRET);
        }
        missing
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Space-delimited scope list, `None` when not configured.
    pub fn scopes(&self) -> Option<&str> {
        self.scopes.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("scopes", &self.scopes)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
