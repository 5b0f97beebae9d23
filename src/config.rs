use std::borrow::Cow;
use std::env;

/// Path to the platform smart card library.
///
/// The user can use this environment variable to customize the library loading. The value is used as is:
/// there is no search in other locations when it can not be opened.
pub const PCSC_LIB_PATH_ENV: &str = "PCSC_LIB_PATH";

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        /// Default location of the smart card library.
        pub const DEFAULT_LIB_PATH: &str = "winscard.dll";
    } else if #[cfg(target_os = "macos")] {
        /// Default location of the smart card library.
        pub const DEFAULT_LIB_PATH: &str = "/System/Library/Frameworks/PCSC.framework/PCSC";
    } else {
        /// Default location of the smart card library.
        pub const DEFAULT_LIB_PATH: &str = "libpcsclite.so.1";
    }
}

/// Where the resolver looks for the smart card library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    path: Cow<'static, str>,
}

impl LibraryConfig {
    /// Uses [PCSC_LIB_PATH_ENV] when it is set and the platform default otherwise.
    pub fn from_env() -> Self {
        match env::var(PCSC_LIB_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::with_path(path),
            _ => Self::default(),
        }
    }

    /// Uses the exact `path`.
    pub fn with_path(path: impl Into<Cow<'static, str>>) -> Self {
        Self { path: path.into() }
    }

    /// Library path or name passed to the platform loader.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: Cow::Borrowed(DEFAULT_LIB_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_matches_platform() {
        let config = LibraryConfig::default();

        #[cfg(all(unix, not(target_os = "macos")))]
        assert_eq!(config.path(), "libpcsclite.so.1");
        #[cfg(target_os = "macos")]
        assert!(config.path().ends_with("PCSC.framework/PCSC"));
        #[cfg(windows)]
        assert_eq!(config.path(), "winscard.dll");
    }

    #[test]
    fn explicit_path_is_kept_verbatim() {
        let config = LibraryConfig::with_path("/opt/pcsc/lib/libpcsclite.so");

        assert_eq!(config.path(), "/opt/pcsc/lib/libpcsclite.so");
    }
}
