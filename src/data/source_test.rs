// ABOUTME: Tests for StateSource implementations
// Verifies file and directory sources, change detection, and factory resolution

#[cfg(test)]
mod tests {
    use crate::app::config::AppConfig;
    use crate::data::factory::{SourceKind, StateSourceFactory};
    use crate::data::file_source::{expand_tilde, FileStateSource, SaveDirSource, StdinStateSource};
    use crate::data::model::{Expression, ExpressionList, GraphState};
    use crate::data::source::{MockStateSource, StateSource};
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn snapshot_json(title: &str) -> String {
        format!(
            r#"{{"expressions": {{"list": [{{"type": "folder", "id": "1", "title": "{}"}}]}}}}"#,
            title
        )
    }

    fn folder_title(state: &GraphState) -> &str {
        match &state.expressions()[0] {
            Expression::Folder(folder) => &folder.title,
            other => panic!("expected folder, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_source_loads_and_tracks_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, snapshot_json("A")).unwrap();

        let mut source = FileStateSource::new(&path).unwrap();

        // Never loaded yet, so the first check reports a change
        assert!(source.has_changed().await.unwrap());

        let state = source.load_state().await.unwrap();
        assert_eq!(folder_title(&state), "A");
        assert!(!source.has_changed().await.unwrap());

        // Rewrite with a newer mtime
        std::thread::sleep(Duration::from_millis(20));
        fs::write(&path, snapshot_json("B")).unwrap();
        assert!(source.has_changed().await.unwrap());
        let state = source.load_state().await.unwrap();
        assert_eq!(folder_title(&state), "B");
    }

    #[test]
    fn test_file_source_requires_existing_file() {
        let result = FileStateSource::new("/nonexistent/graph.json");
        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Saved state file not found"));
    }

    #[tokio::test]
    async fn test_save_dir_source_picks_newest_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.json"), snapshot_json("old")).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        fs::write(dir.path().join("new.json"), snapshot_json("new")).unwrap();

        let mut source = SaveDirSource::new(dir.path()).unwrap();
        let state = source.load_state().await.unwrap();
        assert_eq!(folder_title(&state), "new");
        assert!(!source.has_changed().await.unwrap());

        // A later save takes over
        std::thread::sleep(Duration::from_millis(20));
        fs::write(dir.path().join("newest.json"), snapshot_json("newest")).unwrap();
        assert!(source.has_changed().await.unwrap());
        let state = source.load_state().await.unwrap();
        assert_eq!(folder_title(&state), "newest");
    }

    #[tokio::test]
    async fn test_save_dir_source_empty_dir_reports_nothing_found() {
        let dir = TempDir::new().unwrap();
        let source = SaveDirSource::new(dir.path()).unwrap();
        let result = source.load_state().await;
        assert!(result.is_err());
    }

    #[test]
    fn test_save_dir_resolution_from_env() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("graph.json"), snapshot_json("env")).unwrap();

        std::env::set_var("DESMOS_TABLES_STATE_DIR", dir.path().to_str().unwrap());
        let result = SaveDirSource::resolve_default(&AppConfig::default());
        std::env::remove_var("DESMOS_TABLES_STATE_DIR");

        let source = result.unwrap();
        assert_eq!(source.dir(), dir.path());
    }

    #[test]
    fn test_save_dir_resolution_from_config() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.state_dirs = vec![
            "/nonexistent/saves".to_string(),
            dir.path().to_string_lossy().to_string(),
        ];

        let source = SaveDirSource::resolve_default(&config).unwrap();
        assert_eq!(source.dir(), dir.path());
    }

    #[tokio::test]
    async fn test_stdin_source_never_changes() {
        let mut source = StdinStateSource::new();
        assert!(!source.has_changed().await.unwrap());
        assert_eq!(source.describe(), "stdin");
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/saves"), home.join("saves"));
        }
    }

    #[tokio::test]
    async fn test_factory_prefers_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, snapshot_json("A")).unwrap();

        let (source, kind) = StateSourceFactory::resolve(
            Some(path.to_str().unwrap()),
            Some(dir.path().to_str().unwrap()),
            true,
            &AppConfig::default(),
        )
        .unwrap();

        assert_eq!(kind, SourceKind::File(path.clone()));
        let state = source.load_state().await.unwrap();
        assert_eq!(folder_title(&state), "A");
    }

    #[test]
    fn test_factory_uses_stdin_when_piped() {
        let (_, kind) =
            StateSourceFactory::resolve(None, None, true, &AppConfig::default()).unwrap();
        assert_eq!(kind, SourceKind::Stdin);
    }

    #[test]
    fn test_factory_guidance_when_nothing_available() {
        // No file, no piped stdin, no snapshot directory anywhere
        let result = StateSourceFactory::resolve(None, None, false, &AppConfig::default());
        match result {
            Err(e) => assert!(e.to_string().contains("No snapshot available")),
            Ok((_, kind)) => panic!("unexpectedly resolved {}", kind),
        }
    }

    // This test verifies that the sources implement the StateSource trait
    #[tokio::test]
    async fn test_sources_implement_statesource() {
        fn assert_implements_statesource<T: StateSource>() {}
        assert_implements_statesource::<FileStateSource>();
        assert_implements_statesource::<SaveDirSource>();
        assert_implements_statesource::<StdinStateSource>();
    }

    #[tokio::test]
    async fn test_mock_source_as_trait_object() {
        let state = GraphState {
            version: None,
            expressions: ExpressionList { list: vec![] },
        };
        let mut source: Box<dyn StateSource> = Box::new(MockStateSource::with_state(state));

        assert!(!source.has_changed().await.unwrap());
        let loaded = source.load_state().await.unwrap();
        assert!(loaded.expressions().is_empty());
    }
}
