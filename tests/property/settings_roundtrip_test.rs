//! Property-based tests for ShellSettings persistence round-trip.
//!
//! For arbitrary valid settings, saving through the SettingsEngine and loading
//! from the same file must give back exactly the same values.

use lernova::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use lernova::types::settings::{
    ApiSettings, DownloadSettings, FrontendSettings, ShellSettings, WindowSettings,
};
use proptest::prelude::*;

fn arb_api_settings() -> impl Strategy<Value = ApiSettings> {
    (
        "https?://[a-z]{1,12}(\\.[a-z]{2,5})?(:[1-9][0-9]{1,3})?",
        proptest::option::of(1u64..3600),
    )
        .prop_map(|(base_url, request_timeout_secs)| ApiSettings {
            base_url,
            request_timeout_secs,
        })
}

fn arb_window_settings() -> impl Strategy<Value = WindowSettings> {
    (
        "[A-Za-z0-9 ]{1,30}",
        200u32..4000,
        200u32..3000,
        "#[0-9a-f]{6}",
        any::<bool>(),
    )
        .prop_map(|(title, width, height, background_color, devtools)| WindowSettings {
            title,
            width,
            height,
            background_color,
            devtools,
        })
}

fn arb_frontend_settings() -> impl Strategy<Value = FrontendSettings> {
    (any::<bool>(), "http://localhost:[0-9]{4}", "[a-z/]{1,20}").prop_map(
        |(dev_mode, dev_server_url, dist_dir)| FrontendSettings {
            dev_mode,
            dev_server_url,
            dist_dir,
        },
    )
}

fn arb_download_settings() -> impl Strategy<Value = DownloadSettings> {
    proptest::option::of("/[a-z]{1,10}(/[a-z]{1,10}){0,3}")
        .prop_map(|directory| DownloadSettings { directory })
}

fn arb_shell_settings() -> impl Strategy<Value = ShellSettings> {
    (
        arb_api_settings(),
        arb_window_settings(),
        arb_frontend_settings(),
        arb_download_settings(),
    )
        .prop_map(|(api, window, frontend, downloads)| ShellSettings {
            api,
            window,
            frontend,
            downloads,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_shell_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: ShellSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn settings_file_roundtrip(settings in arb_shell_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let mut engine = SettingsEngine::new(Some(path));
        let loaded = engine.load().unwrap();
        prop_assert_eq!(loaded, settings);
    }
}
