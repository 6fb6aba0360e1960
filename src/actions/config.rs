//! Config Flows

use leptos::logging::warn;

use crate::commands::{Api, Bridge};
use crate::errors::BackendError;
use crate::models::ConfigDocument;

pub async fn load_config<B: Bridge>(api: &Api<B>) -> Result<ConfigDocument, BackendError> {
    let text = api.get_verdaccio_config().await?;
    // The path is only shown as a hint; the text still loads without it
    let path = api.get_config_file_path().await.unwrap_or_else(|e| {
        warn!("[Config] config path unavailable: {}", e);
        String::new()
    });
    Ok(ConfigDocument { text, path })
}

/// Restore the bundled default file and read it back
pub async fn reset_config<B: Bridge>(api: &Api<B>) -> Result<ConfigDocument, BackendError> {
    api.reset_config_to_default().await?;
    load_config(api).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Draft;
    use crate::testing::fake_api;
    use serde_json::json;

    #[tokio::test]
    async fn test_reset_reloads_text() {
        let api = fake_api();
        api.bridge()
            .respond("reset_config_to_default", ())
            .respond("get_verdaccio_config", "storage: ./storage\n")
            .respond("get_config_file_path", "/home/u/.verdaccio/config.yaml");

        let doc = reset_config(&api).await.unwrap();
        assert_eq!(doc.text, "storage: ./storage\n");
        assert_eq!(
            api.bridge().command_names(),
            vec!["reset_config_to_default", "get_verdaccio_config", "get_config_file_path"]
        );
    }

    #[tokio::test]
    async fn test_load_survives_missing_path() {
        let api = &fake_api();
        api.bridge()
            .respond("get_verdaccio_config", "listen: 4873\n")
            .reject("get_config_file_path", "home directory unavailable");

        let doc = load_config(api).await.unwrap();
        assert_eq!(doc.text, "listen: 4873\n");
        assert_eq!(doc.path, "");
        assert_eq!(api.bridge().count("get_config_file_path"), 1);
    }

    #[tokio::test]
    async fn test_load_fails_when_text_unreadable() {
        let api = &fake_api();
        api.bridge()
            .reject("get_verdaccio_config", "permission denied")
            .respond("get_config_file_path", "/home/u/.verdaccio/config.yaml");

        assert!(load_config(api).await.is_err());
    }

    #[tokio::test]
    async fn test_save_sends_text_verbatim() {
        let api = &fake_api();
        api.bridge().respond("save_verdaccio_config", ());

        let mut draft = Draft::new("a: 1\n".to_string());
        draft.edit("a: 2\n  # keep me\n".to_string());
        draft
            .save(|text| async move { api.save_verdaccio_config(&text).await })
            .await
            .unwrap();

        assert!(!draft.is_dirty());
        assert_eq!(
            api.bridge().args_of("save_verdaccio_config"),
            vec![json!({ "config": "a: 2\n  # keep me\n" })]
        );
    }
}
