use mdpad::config::ThemeMode;
use mdpad::editor::{EditorBuffer, InputEvent, TextBufferController, ToolbarAction};
use mdpad::persistence::{DEFAULT_CONTENT, FileStore, MemoryStore, PersistenceBridge, StoreKey};
use tempfile::tempdir;

#[test]
fn test_first_launch_shows_default_document() {
    let dir = tempdir().unwrap();
    let bridge = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
    assert_eq!(bridge.load_content(), DEFAULT_CONTENT);
    assert_eq!(bridge.load_theme(), ThemeMode::Light);
}

#[test]
fn test_buffer_and_theme_survive_restart() {
    let dir = tempdir().unwrap();
    {
        let mut bridge = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
        let mut controller = TextBufferController::new(&bridge.load_content());
        controller.attach(EditorBuffer::empty());
        controller.handle_input(InputEvent::SelectAll);
        controller.apply_action(ToolbarAction::Table);
        bridge.save_content(&controller.content());
        bridge.save_theme(ThemeMode::Dark);
    }

    let bridge = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
    assert_eq!(bridge.load_content(), mdpad::editor::snippet::TABLE_TEMPLATE);
    assert_eq!(bridge.load_theme(), ThemeMode::Dark);
}

#[test]
fn test_empty_buffer_is_persisted_as_empty() {
    let dir = tempdir().unwrap();
    let mut bridge = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
    bridge.save_content("");
    let reopened = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
    assert_eq!(reopened.load_content(), "");
}

#[test]
fn test_store_file_is_json_object() {
    let dir = tempdir().unwrap();
    let mut bridge = PersistenceBridge::new(FileStore::open_in(dir.path()).unwrap());
    bridge.save_theme(ThemeMode::Dark);

    let raw = std::fs::read_to_string(dir.path().join(FileStore::FILE_NAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[StoreKey::Theme.as_str()], "\"dark\"");
}

#[test]
fn test_corrupt_store_file_is_an_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(FileStore::FILE_NAME), "not json").unwrap();
    assert!(FileStore::open_in(dir.path()).is_err());
}

#[test]
fn test_failing_store_never_blocks_editing() {
    let mut bridge = PersistenceBridge::new(MemoryStore::failing());
    bridge.save_content("draft");
    bridge.save_theme(ThemeMode::Dark);
    assert!(bridge.try_save(StoreKey::Content, "draft").is_err());
    assert_eq!(bridge.load_content(), DEFAULT_CONTENT);
    assert_eq!(bridge.load_theme(), ThemeMode::Light);
}
