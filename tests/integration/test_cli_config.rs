use clap::Parser;
use saber::cli::{Cli, Commands, KnowledgeCommands};
use saber::config::Config;
use saber::embedding::EmbeddingModel;
use saber::nlp::Language;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_serve_with_overrides() {
    let cli = Cli::try_parse_from(["saber", "serve", "--host", "0.0.0.0", "-p", "8080", "--open"])
        .unwrap();

    match cli.command {
        Commands::Serve { host, port, open } => {
            assert_eq!(host.as_deref(), Some("0.0.0.0"));
            assert_eq!(port, Some(8080));
            assert!(open);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["saber", "serve"]).unwrap();

    match cli.command {
        Commands::Serve { host, port, open } => {
            assert!(host.is_none());
            assert!(port.is_none());
            assert!(!open);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_ask_collects_words() {
    let cli = Cli::try_parse_from(["saber", "ask", "o", "que", "é", "fotossíntese?"]).unwrap();

    match cli.command {
        Commands::Ask { question } => assert_eq!(question.join(" "), "o que é fotossíntese?"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_ask_requires_a_question() {
    assert!(Cli::try_parse_from(["saber", "ask"]).is_err());
}

#[test]
fn test_parse_knowledge_list_limit() {
    let cli = Cli::try_parse_from(["saber", "knowledge", "list", "--limit", "5"]).unwrap();

    match cli.command {
        Commands::Knowledge {
            command: KnowledgeCommands::List { limit },
        } => assert_eq!(limit, Some(5)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["saber"]).is_err());
    assert!(Cli::try_parse_from(["saber", "retrospect"]).is_err());
}

#[test]
fn test_load_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8088

[database]
path = "/tmp/saber-test.db"

[cache]
similarity_threshold = 0.8

[normalizer]
language = "en"

[embedding]
model = "hashed"

[sources]
max_results = 5
request_timeout_secs = 10
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.server.port, 8088);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(
        config.database_path().unwrap(),
        std::path::PathBuf::from("/tmp/saber-test.db")
    );
    assert_eq!(config.cache.similarity_threshold, 0.8);
    assert_eq!(config.normalizer.language, Language::English);
    assert_eq!(config.sources.max_results, 5);
    assert_eq!(config.sources.request_timeout_secs, Some(10));
    assert_eq!(config.sources.wikipedia_lang, "pt");
    assert!(config.validate().is_ok());

    let embedding = config.embedding_config().unwrap();
    assert_eq!(embedding.model, EmbeddingModel::Hashed);
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[cache]\nsimilarity_threshold = \"alto\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_environment_overrides_file_values() {
    std::env::set_var("SABER_SIMILARITY_THRESHOLD", "0.9");
    std::env::set_var("SABER_WIKIPEDIA_LANG", "en");

    let mut config = Config::default();
    config.apply_env_overrides().unwrap();

    std::env::remove_var("SABER_SIMILARITY_THRESHOLD");
    std::env::remove_var("SABER_WIKIPEDIA_LANG");

    assert_eq!(config.cache.similarity_threshold, 0.9);
    assert_eq!(config.sources.wikipedia_lang, "en");
}
