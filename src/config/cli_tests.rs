//! Tests for CLI argument parsing and store loading.

use clap::Parser;

use super::cli::{Cli, Command};
use super::loader::load_store;
use super::store::ConfigStore;
use super::ConfigError;

mod parsing {
    use super::*;

    #[test]
    fn parse_send_with_inline_data() {
        let cli = Cli::parse_from_iter([
            "erp-relay",
            "send",
            "--endpoint",
            "erp_a",
            "--data",
            r#"{"order":1}"#,
        ]);

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.endpoint, "erp_a");
                assert_eq!(args.data.as_deref(), Some(r#"{"order":1}"#));
                assert!(args.file.is_none());
            }
            other => panic!("Expected Send, got {other:?}"),
        }
    }

    #[test]
    fn parse_send_with_file() {
        let cli = Cli::parse_from_iter([
            "erp-relay",
            "send",
            "-e",
            "erp_b",
            "--file",
            "payload.json",
        ]);

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.endpoint, "erp_b");
                assert_eq!(
                    args.file.as_deref(),
                    Some(std::path::Path::new("payload.json"))
                );
            }
            other => panic!("Expected Send, got {other:?}"),
        }
    }

    #[test]
    fn send_requires_a_payload_source() {
        let result = Cli::try_parse_from(["erp-relay", "send", "--endpoint", "erp_a"]);
        assert!(result.is_err());
    }

    #[test]
    fn send_rejects_both_payload_sources() {
        let result = Cli::try_parse_from([
            "erp-relay",
            "send",
            "--endpoint",
            "erp_a",
            "--data",
            "{}",
            "--file",
            "payload.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_describe() {
        let cli = Cli::parse_from_iter(["erp-relay", "describe", "--endpoint", "erp_a"]);

        assert!(matches!(cli.command, Command::Describe { ref endpoint } if endpoint == "erp_a"));
    }

    #[test]
    fn parse_init_default_output() {
        let cli = Cli::parse_from_iter(["erp-relay", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Command::Init { output } => assert_eq!(output.to_str(), Some("erp-relay.toml")),
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn parse_init_custom_output() {
        let cli = Cli::parse_from_iter(["erp-relay", "init", "-o", "custom.toml"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output.to_str(), Some("custom.toml")),
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn global_options_before_and_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "erp-relay",
            "--config",
            "erp.toml",
            "describe",
            "-e",
            "erp_a",
            "--set",
            "erp/erp_a/active=1",
            "-v",
        ]);

        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("erp.toml")));
        assert_eq!(cli.overrides, vec!["erp/erp_a/active=1"]);
        assert!(cli.verbose);
        assert!(!cli.is_init());
    }

    #[test]
    fn namespace_defaults_to_erp() {
        let cli = Cli::parse_from_iter(["erp-relay", "init"]);
        assert_eq!(cli.namespace, "erp");
    }

    #[test]
    fn namespace_can_be_overridden() {
        let cli = Cli::parse_from_iter(["erp-relay", "--namespace", "beside_erp", "init"]);
        assert_eq!(cli.namespace, "beside_erp");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["erp-relay"]).is_err());
    }
}

mod loading {
    use super::*;

    #[test]
    fn overrides_take_precedence_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp.toml");
        std::fs::write(
            &path,
            "[erp.general]\nconnection_timeout = 10\nexecution_timeout = 30\n",
        )
        .unwrap();

        let cli = Cli::parse_from_iter([
            "erp-relay".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "--set".to_string(),
            "erp/general/connection_timeout=2".to_string(),
            "describe".to_string(),
            "-e".to_string(),
            "erp_a".to_string(),
        ]);

        let store = load_store(&cli).unwrap();

        assert_eq!(
            store.get_value("erp/general/connection_timeout").as_deref(),
            Some("2")
        );
        assert_eq!(
            store.get_value("erp/general/execution_timeout").as_deref(),
            Some("30")
        );
    }

    #[test]
    fn without_config_file_only_overrides_are_visible() {
        let cli = Cli::parse_from_iter([
            "erp-relay",
            "--set",
            "erp/erp_c/active=1",
            "describe",
            "-e",
            "erp_c",
        ]);

        let store = load_store(&cli).unwrap();

        assert_eq!(store.get_value("erp/erp_c/active").as_deref(), Some("1"));
        assert_eq!(store.sections("erp"), vec!["erp_c"]);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from_iter([
            "erp-relay",
            "--config",
            "/nonexistent/erp-relay.toml",
            "describe",
            "-e",
            "erp_a",
        ]);

        assert!(matches!(load_store(&cli), Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn malformed_override_is_an_error() {
        let cli = Cli::parse_from_iter(["erp-relay", "--set", "oops", "init"]);

        assert!(matches!(
            load_store(&cli),
            Err(ConfigError::InvalidOverride { .. })
        ));
    }
}
