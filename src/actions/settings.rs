//! Settings Flows
//!
//! The login-item flag lives in the OS; it is read back on load and only
//! written when it actually changed.

use leptos::logging::warn;

use crate::commands::{Api, Bridge};
use crate::errors::BackendError;
use crate::models::AppSettings;

/// Stored settings with `auto_start` replaced by the OS's view
pub async fn load_settings<B: Bridge>(api: &Api<B>) -> Result<AppSettings, BackendError> {
    let mut settings = api.get_app_settings().await?;
    match api.get_auto_start_status().await {
        Ok(enabled) => settings.auto_start = enabled,
        Err(e) => warn!("[Settings] could not read login item state: {}", e),
    }
    Ok(settings)
}

/// Persist `next`. The login item is toggled first so a refusal leaves the
/// stored settings unchanged.
pub async fn save_settings<B: Bridge>(
    api: &Api<B>,
    baseline: &AppSettings,
    next: &AppSettings,
) -> Result<(), BackendError> {
    if next.auto_start != baseline.auto_start {
        api.set_auto_start(next.auto_start).await?;
    }
    api.save_app_settings(next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Draft;
    use crate::testing::fake_api;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_prefers_os_login_item_state() {
        let api = fake_api();
        api.bridge()
            .respond("get_app_settings", AppSettings::default())
            .respond("get_auto_start_status", true);

        let settings = load_settings(&api).await.unwrap();
        assert!(settings.auto_start);
    }

    #[tokio::test]
    async fn test_save_only_toggles_login_item_on_change() {
        let api = fake_api();
        api.bridge().respond("save_app_settings", ()).respond("set_auto_start", ());

        let baseline = AppSettings::default();
        let next = AppSettings { default_port: 5000, ..baseline.clone() };
        save_settings(&api, &baseline, &next).await.unwrap();
        assert_eq!(api.bridge().count("set_auto_start"), 0);

        let next = AppSettings { auto_start: true, ..baseline.clone() };
        save_settings(&api, &baseline, &next).await.unwrap();
        assert_eq!(api.bridge().args_of("set_auto_start"), vec![json!({ "enable": true })]);
        assert_eq!(api.bridge().args_of("save_app_settings")[1]["settings"]["auto_start"], true);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_dirty() {
        let api = fake_api();
        api.bridge().reject("save_app_settings", "disk full");

        let mut draft = Draft::new(AppSettings::default());
        draft.update(|s| s.allow_lan = true);

        let baseline = draft.baseline().clone();
        let result = draft.save(|next| async move { save_settings(&api, &baseline, &next).await }).await;

        assert_eq!(result, Err(BackendError::Rejected("disk full".into())));
        assert!(draft.is_dirty());
        assert!(draft.current().allow_lan);
    }
}
