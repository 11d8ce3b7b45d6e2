use figment::Jail;
use manabi_config::{ManabiConfig, StorageBackend};
use pretty_assertions::assert_eq;

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".manabi")?;
        jail.create_file(
            ".manabi/config.toml",
            r#"
            [api]
            base_url = "https://api.manabi.jp/api"
            timeout_secs = 5

            [storage]
            backend = "file"
            "#,
        )?;

        let config = ManabiConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://api.manabi.jp/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.ai_base_url, "http://localhost:8000/api");
        assert_eq!(config.storage.backend, StorageBackend::File);
        Ok(())
    });
}

#[test]
fn project_toml_beats_user_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir("xdg/manabi")?;
        jail.create_file(
            "xdg/manabi/config.toml",
            r#"
            [api]
            base_url = "https://user.manabi.jp/api"
            ai_base_url = "https://ai.manabi.jp/api"
            "#,
        )?;
        jail.create_dir(".manabi")?;
        jail.create_file(
            ".manabi/config.toml",
            r#"
            [api]
            base_url = "https://project.manabi.jp/api"
            "#,
        )?;

        let config = ManabiConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://project.manabi.jp/api");
        assert_eq!(config.api.ai_base_url, "https://ai.manabi.jp/api");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".manabi")?;
        jail.create_file(".manabi/config.toml", "[api\nbase_url = ")?;

        assert!(ManabiConfig::load().is_err());
        Ok(())
    });
}
