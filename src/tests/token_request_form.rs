#[cfg(test)]
mod test {

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{routing::post, Form, Json, Router};

    use crate::tests::common::{authenticator, configured_credentials, json, spawn_axum, TOKEN_PATH};

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Token endpoint that records every submitted form.
    async fn capturing_token_endpoint() -> (Captured, String, tokio::task::JoinHandle<()>) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let router = Router::new().route(
            TOKEN_PATH,
            post(move |Form(form): Form<HashMap<String, String>>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(form);
                    Json(json!({"access_token": "abc", "expires_in": 1800}))
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;
        (captured, format!("http://{}{}", addr, TOKEN_PATH), handle)
    }

    #[tokio::test]
    async fn empty_scope_is_omitted_from_the_exchange() {
        let (captured, url, handle) = capturing_token_endpoint().await;
        let dir = tempfile::tempdir().unwrap();
        let auth = authenticator(dir.path(), &url, configured_credentials(Some("   ")));

        auth.get_token().await.unwrap();

        let forms = captured.lock().unwrap().clone();
        assert_eq!(forms.len(), 1);
        let form = &forms[0];
        assert_eq!(form.get("grant_type").map(String::as_str), Some("client_credentials"));
        assert_eq!(form.get("client_id").map(String::as_str), Some("test_client_id"));
        assert_eq!(form.get("client_secret").map(String::as_str), Some("test_client_secret"));
        assert!(!form.contains_key("scope"), "scope must be absent, got {:?}", form);
        handle.abort();
    }

    #[tokio::test]
    async fn configured_scopes_are_sent_verbatim() {
        let (captured, url, handle) = capturing_token_endpoint().await;
        let dir = tempfile::tempdir().unwrap();
        let scopes = "accounting.settings.read accounting.contacts.read";
        let auth = authenticator(dir.path(), &url, configured_credentials(Some(scopes)));

        auth.get_token().await.unwrap();

        let forms = captured.lock().unwrap().clone();
        assert_eq!(forms[0].get("scope").map(String::as_str), Some(scopes));
        handle.abort();
    }
}
