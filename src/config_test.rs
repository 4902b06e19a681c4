use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize env-mutating tests within this binary.
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_storefront_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("CATALOG_LATENCY_MS");
        std::env::remove_var("CATALOG_FAILURE_RATE");
        std::env::remove_var("RESOLVE_TIMEOUT_MS");
        std::env::remove_var("LOGIN_MIN_PASSWORD_LEN");
        std::env::remove_var("COOKIE_SECURE");
    }
}

#[test]
fn from_env_uses_defaults_when_unset() {
    let _guard = env_lock();
    unsafe { clear_storefront_env() };

    let cfg = StorefrontConfig::from_env().unwrap();
    assert_eq!(cfg, StorefrontConfig::default());
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.resolve_timeout, Duration::from_millis(DEFAULT_RESOLVE_TIMEOUT_MS));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_storefront_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("CATALOG_LATENCY_MS", "5");
        std::env::set_var("CATALOG_FAILURE_RATE", "0.25");
        std::env::set_var("RESOLVE_TIMEOUT_MS", "50");
        std::env::set_var("LOGIN_MIN_PASSWORD_LEN", "10");
        std::env::set_var("COOKIE_SECURE", "Yes");
    }

    let cfg = StorefrontConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.catalog_latency, Duration::from_millis(5));
    assert!((cfg.catalog_failure_rate - 0.25).abs() < f64::EPSILON);
    assert_eq!(cfg.resolve_timeout, Duration::from_millis(50));
    assert_eq!(cfg.min_password_len, 10);
    assert!(cfg.cookie_secure);

    unsafe { clear_storefront_env() };
}

#[test]
fn from_env_rejects_garbage_port() {
    let _guard = env_lock();
    unsafe {
        clear_storefront_env();
        std::env::set_var("PORT", "eighty");
    }

    let err = StorefrontConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT".into(), value: "eighty".into() });

    unsafe { clear_storefront_env() };
}

#[test]
fn from_env_rejects_failure_rate_out_of_range() {
    let _guard = env_lock();
    unsafe {
        clear_storefront_env();
        std::env::set_var("CATALOG_FAILURE_RATE", "1.5");
    }

    let err = StorefrontConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "CATALOG_FAILURE_RATE".into(), value: "1.5".into() });

    unsafe { clear_storefront_env() };
}

#[test]
fn from_env_rejects_unknown_bool_word() {
    let _guard = env_lock();
    unsafe {
        clear_storefront_env();
        std::env::set_var("COOKIE_SECURE", "maybe");
    }

    assert!(StorefrontConfig::from_env().is_err());

    unsafe { clear_storefront_env() };
}

#[test]
fn from_env_reports_raw_failure_rate_text() {
    let _guard = env_lock();
    unsafe {
        clear_storefront_env();
        std::env::set_var("CATALOG_FAILURE_RATE", "1e3");
    }

    let err = StorefrontConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "CATALOG_FAILURE_RATE".into(), value: "1e3".into() });

    unsafe { clear_storefront_env() };
}

#[cfg(unix)]
#[test]
fn from_env_rejects_non_unicode_values() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let _guard = env_lock();
    for key in ["PORT", "COOKIE_SECURE", "CATALOG_FAILURE_RATE"] {
        unsafe {
            clear_storefront_env();
            std::env::set_var(key, OsStr::from_bytes(b"80\xff"));
        }

        match StorefrontConfig::from_env() {
            Err(ConfigError::Invalid { key: got, .. }) => assert_eq!(got, key),
            other => panic!("expected {key} to be rejected, got {other:?}"),
        }
    }

    unsafe { clear_storefront_env() };
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_accepts_word_variants() {
    for val in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
    for val in ["0", "False", "no", "OFF"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_empty_is_none() {
    assert_eq!(parse_bool(""), None);
}
