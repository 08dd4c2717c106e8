//! Top-level browser navigation for leaving the app, e.g. to the OAuth provider.

/// Point the browser at `url`, replacing the app.
pub fn redirect_browser(url: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(window) = web_sys::window() else {
            log::error!("navigation: no window to redirect");
            return;
        };
        if let Err(err) = window.location().set_href(url) {
            log::error!("navigation: redirect to {url} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("navigation: would redirect to {url}");
    }
}

