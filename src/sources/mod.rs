pub mod accounting;
pub mod authenticator;
pub mod fetcher;
pub mod oauth2;
