use crate::external::settings::{file::FileStore, AodPreference, SettingsStore};
use std::{env, fs, path::PathBuf, time::Duration};
use tokio::time::timeout;

fn settings_path(test_name: &str) -> PathBuf {
    env::temp_dir().join(format!(
        "vigilia-settings-{}-{}.toml",
        test_name,
        std::process::id()
    ))
}

#[tokio::test]
async fn test_reads_initial_preference() {
    let path = settings_path("initial");
    fs::write(&path, "always_on_display = true\n").unwrap();
    let store = FileStore::new(path.clone());
    assert_eq!(*store.preference_channel().borrow(), AodPreference::Enabled);
    fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_missing_file_reads_disabled() {
    let path = settings_path("missing");
    fs::remove_file(&path).ok();
    let store = FileStore::new(path);
    assert_eq!(
        *store.preference_channel().borrow(),
        AodPreference::Disabled
    );
}

#[tokio::test]
async fn test_notifies_on_file_change() {
    let path = settings_path("change");
    fs::write(&path, "always_on_display = false\n").unwrap();
    let store = FileStore::new(path.clone());
    let mut channel = store.preference_channel();
    assert_eq!(*channel.borrow_and_update(), AodPreference::Disabled);

    fs::write(&path, "always_on_display = true\n").unwrap();
    timeout(Duration::from_secs(5), channel.changed())
        .await
        .expect("No change notification within timeout")
        .unwrap();
    assert_eq!(*channel.borrow_and_update(), AodPreference::Enabled);
    fs::remove_file(&path).ok();
}
