use super::{AodPreference, SettingsStore};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::sync::watch;

/// Settings changes are rare; poll slowly to reduce wakeups.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    always_on_display: bool,
}

/// A [SettingsStore] backed by a TOML file on disk.
///
/// The file is polled for modification-time changes from a dedicated thread;
/// every detected change is re-read and pushed into the preference channel,
/// even when the value itself did not move. A missing file reads as
/// [AodPreference::Disabled], an unparseable one keeps the last known value.
pub struct FileStore {
    receiver: watch::Receiver<AodPreference>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> FileStore {
        let initial = match read_preference(&path) {
            Ok(preference) => preference,
            Err(e) => {
                log::warn!(
                    "Couldn't read settings file {}, assuming AOD is disabled: {}",
                    path.display(),
                    e
                );
                AodPreference::Disabled
            }
        };
        let (sender, receiver) = watch::channel(initial);
        std::thread::spawn(move || poll_loop(path, sender));
        FileStore { receiver }
    }
}

impl SettingsStore for FileStore {
    fn preference_channel(&self) -> watch::Receiver<AodPreference> {
        self.receiver.clone()
    }
}

fn poll_loop(path: PathBuf, sender: watch::Sender<AodPreference>) {
    let mut last_mtime = modification_time(&path);
    loop {
        std::thread::sleep(POLL_INTERVAL);
        if sender.is_closed() {
            log::debug!("All preference receivers closed, stopping settings poll");
            return;
        }
        let mtime = modification_time(&path);
        if mtime == last_mtime {
            continue;
        }
        last_mtime = mtime;
        match read_preference(&path) {
            Ok(preference) => {
                log::debug!("Settings file changed, AOD preference is {:?}", preference);
                if sender.send(preference).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::warn!(
                    "Couldn't re-read settings file {}, keeping previous preference: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

fn read_preference(path: &Path) -> Result<AodPreference> {
    if !path.exists() {
        return Ok(AodPreference::Disabled);
    }
    let raw = fs::read_to_string(path).context("settings file unreadable")?;
    let parsed: SettingsFile = toml::from_str(&raw).context("settings file unparseable")?;
    Ok(parsed.always_on_display.into())
}
