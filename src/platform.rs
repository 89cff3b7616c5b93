//! Platform detection utilities

use crate::Result;
use log::debug;
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use std::os::unix::io::RawFd;

/// Detect the user's locale from the environment
///
/// Checks LC_ALL, LC_MESSAGES and LANG in that order, the same precedence
/// POSIX uses for message catalogs. "C" and "POSIX" mean no locale.
/// Returns a BCP-47 style tag, e.g. "en_GB.UTF-8" becomes "en-GB".
pub fn detect_locale() -> Option<String> {
    detect_locale_from(|var| std::env::var(var).ok())
}

/// Locale detection over an arbitrary variable lookup
pub fn detect_locale_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())
        .and_then(|value| posix_to_bcp47(&value))
}

/// Convert a POSIX locale name to a BCP-47 tag
pub fn posix_to_bcp47(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next().unwrap_or("").trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Put a file descriptor in non-blocking mode
///
/// The original flags come back when the returned guard is dropped.
pub fn set_nonblocking(fd: RawFd) -> Result<NonBlockingGuard> {
    let bits = fcntl(fd, FcntlArg::F_GETFL).map_err(std::io::Error::from)?;
    let original = OFlag::from_bits_truncate(bits);
    fcntl(fd, FcntlArg::F_SETFL(original | OFlag::O_NONBLOCK)).map_err(std::io::Error::from)?;
    debug!("fd {} set non-blocking", fd);
    Ok(NonBlockingGuard { fd, original })
}

/// Restores a descriptor's file status flags on drop
pub struct NonBlockingGuard {
    fd: RawFd,
    original: OFlag,
}

impl Drop for NonBlockingGuard {
    fn drop(&mut self) {
        if let Err(e) = fcntl(self.fd, FcntlArg::F_SETFL(self.original)) {
            debug!("Failed to restore flags on fd {}: {}", self.fd, e);
        } else {
            debug!("fd {} flags restored", self.fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::os::unix::io::AsRawFd;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    fn is_nonblocking(fd: RawFd) -> bool {
        let bits = fcntl(fd, FcntlArg::F_GETFL).unwrap();
        OFlag::from_bits_truncate(bits).contains(OFlag::O_NONBLOCK)
    }

    #[test]
    fn test_posix_to_bcp47() {
        assert_eq!(posix_to_bcp47("en_GB.UTF-8").as_deref(), Some("en-GB"));
        assert_eq!(posix_to_bcp47("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(posix_to_bcp47("fr").as_deref(), Some("fr"));
        assert_eq!(posix_to_bcp47("C.UTF-8"), None);
        assert_eq!(posix_to_bcp47("POSIX"), None);
        assert_eq!(posix_to_bcp47(""), None);
    }

    #[test]
    fn test_lc_all_wins() {
        let env = env_of(&[
            ("LC_ALL", "de_DE.UTF-8"),
            ("LC_MESSAGES", "fr_FR.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]);
        assert_eq!(detect_locale_from(env).as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_lc_messages_before_lang() {
        let env = env_of(&[("LC_MESSAGES", "fr_FR.UTF-8"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(detect_locale_from(env).as_deref(), Some("fr-FR"));
    }

    #[test]
    fn test_empty_values_skipped() {
        let env = env_of(&[("LC_ALL", ""), ("LC_MESSAGES", ""), ("LANG", "pt_BR.UTF-8")]);
        assert_eq!(detect_locale_from(env).as_deref(), Some("pt-BR"));
    }

    #[test]
    fn test_c_locale_means_none() {
        // First non-empty value decides, even when it is "C"
        let env = env_of(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(detect_locale_from(env), None);
        assert_eq!(detect_locale_from(env_of(&[])), None);
    }

    #[test]
    fn test_nonblocking_guard_restores_flags() {
        let file = tempfile::tempfile().unwrap();
        let fd = file.as_raw_fd();
        assert!(!is_nonblocking(fd));

        let guard = set_nonblocking(fd).unwrap();
        assert!(is_nonblocking(fd));

        drop(guard);
        assert!(!is_nonblocking(fd));
    }
}
