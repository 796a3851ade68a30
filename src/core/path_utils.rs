/*
 * Directory discovery for persisted application data. Centralizing the
 * platform-specific location here keeps the config module focused on file
 * contents rather than on where those files live.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * Returns the application's local (non-roaming) configuration directory,
 * creating it when missing. The path is derived from `app_name` alone,
 * without an organization qualifier, so it lands directly under the user's
 * local application data structure. Returns `None` when no suitable location
 * exists on this system or the directory cannot be created.
 */
pub fn ensure_app_config_dir(app_name: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    let config_path = proj_dirs.config_local_dir();
    if !config_path.exists() {
        if let Err(e) = fs::create_dir_all(config_path) {
            log::error!("PathUtils: failed to create config directory {config_path:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: created config directory {config_path:?}.");
    }
    Some(config_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ProjectDirs behavior depends on the environment; this assumes a typical
    // user setup with a resolvable local config location.
    #[test]
    fn test_ensure_app_config_dir_creates_and_reuses_directory() {
        let unique_app_name = format!("TestApp_HrLookup_Paths_{}", rand::random::<u128>());

        let first = ensure_app_config_dir(&unique_app_name)
            .expect("should resolve a config dir for a fresh app name");
        assert!(first.is_dir());
        assert!(
            first
                .to_string_lossy()
                .to_lowercase()
                .contains(&unique_app_name.to_lowercase())
        );

        let second = ensure_app_config_dir(&unique_app_name)
            .expect("should resolve the same dir again");
        assert_eq!(second, first);

        if let Err(e) = fs::remove_dir_all(&first) {
            eprintln!("Test cleanup failed for {}: {e}", first.display());
        }
    }
}
