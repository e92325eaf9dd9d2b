use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

#[cfg(target_os = "android")]
fn android_files_dir() -> Option<PathBuf> {
    use jni::{
        objects::{JObject, JString},
        JavaVM,
    };
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?;
        let activity = JObject::from_raw(ctx.context().cast());
        let files_dir = env
            .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_obj = env
            .call_method(files_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_files_dir() {
            return dir;
        }
        for d in [
            "/data/user/0/com.vipix.client/files",
            "/data/data/com.vipix.client/files",
        ] {
            let p = PathBuf::from(d);
            if p.exists() {
                return p;
            }
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

pub fn config_path() -> PathBuf {
    get_app_data_dir().join("vipix.toml")
}

pub fn database_path() -> PathBuf {
    get_app_data_dir().join("vipix.db")
}

/// File name for a downloaded QR code: `<name>-qr-code.png` with every
/// non-alphanumeric character of the event name replaced by `-`
pub fn qr_code_file_name(event_name: &str) -> String {
    let sanitized: String = event_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}-qr-code.png", sanitized)
}

/// Payload of a base64 `data:` URL
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    use base64::Engine;
    let rest = url.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    base64::engine::general_purpose::STANDARD.decode(data.trim()).ok()
}

/// Writes `bytes` into `dir`, creating the directory if needed
pub fn save_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Directory used for user-visible downloads
pub fn downloads_dir() -> PathBuf {
    get_app_data_dir().join("downloads")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_file_name_sanitizes() {
        assert_eq!(
            qr_code_file_name("Sarah & John's Wedding"),
            "Sarah---John-s-Wedding-qr-code.png"
        );
        assert_eq!(qr_code_file_name("CONF2025"), "CONF2025-qr-code.png");
    }

    #[test]
    fn test_decode_data_url() {
        assert_eq!(
            decode_data_url("data:image/png;base64,AQID"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(decode_data_url("https://cdn.vipix.app/qr/1.png"), None);
        assert_eq!(decode_data_url("data:text/plain,hello"), None);
    }

    #[test]
    fn test_save_file_creates_directory() {
        let dir = std::env::temp_dir().join(format!("vipix-test-{}", uuid::Uuid::new_v4()));
        let path = save_file(&dir, "a.png", &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
