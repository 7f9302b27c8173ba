//! A client for looking up words in the Cambridge English Dictionary.
//!
//! This module provides a high-level async interface for fetching entry pages from the
//! dictionary site and parsing them into structured data.

use std::time::Duration;

use reqwest::{ClientBuilder, StatusCode, redirect::Policy};

use crate::{Entry, Error};

/// The base URL of the dictionary site.
const BASE_URL: &str = "https://dictionary.cambridge.org";
/// The relative path under which entry pages live.
const ENTRY_PATH: &str = "/dictionary/english/";
/// The maximum length of a slug. The longest English word is 45 characters, and the
/// site truncates anything longer anyway.
const MAX_SLUG_LEN: usize = 50;
/// The `User-Agent` header to send; the site rejects default library agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:141.0) Gecko/20100101 Firefox/141.0";

/// An asynchronous client for the Cambridge English Dictionary.
///
/// This client handles slug normalization, the construction of entry-page requests, and
/// parsing the HTML response into an [`Entry`].
///
/// Redirects are deliberately not followed: the site answers a missing word by silently
/// redirecting to a generic landing page, so a redirect response *is* the "no such
/// entry" signal.
#[derive(Debug)]
pub struct Client {
    /// The base URL of the dictionary site.
    base_url: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// This method provides a convenient way to create a client. It configures default
    /// gzip support, a 30-second timeout, a browser user agent, and disables redirects.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. This can happen in
    /// environments with misconfigured network or TLS dependencies. For a non-panicking
    /// version, see [`Client::try_new`].
    #[must_use]
    pub fn new() -> Client {
        Client::try_new().expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// This is the fallible version of [`Client::new`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error::BuildClient`] if the underlying `reqwest` client fails to
    /// build. See [`ClientBuilder::build`] for more details on potential failures.
    pub fn try_new() -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .gzip(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Self::with_client(client))
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple services or
    /// require custom configuration (e.g., proxies, custom headers). Note that the
    /// provided client should not follow redirects, since a redirect is how the site
    /// signals a missing word.
    ///
    /// # Arguments
    ///
    /// * `client` - An existing `reqwest::Client` instance.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Client {
        let base_url = String::from(BASE_URL);

        Client { base_url, client }
    }

    /// Looks up a word or short phrase and returns its entry.
    ///
    /// This is the uniform, infallible form of [`Client::try_lookup`]: a transport
    /// failure, a missing word, and an unrecognizable page all collapse into the empty
    /// entry, so the caller has a single "nothing to show" outcome to handle.
    pub async fn lookup(&self, word: &str) -> Entry {
        match self.try_lookup(word).await {
            Ok(entry) => entry,
            Err(err) => {
                #[cfg(feature = "log")]
                tracing::debug!(error = %err, "lookup failed, returning the empty entry");
                #[cfg(not(feature = "log"))]
                let _ = err;

                Entry::default()
            }
        }
    }

    /// Looks up a word or short phrase and returns its entry, surfacing transport
    /// failures.
    ///
    /// The word is normalized into a URL slug (see [`normalize_slug`]) and the entry
    /// page is fetched with a single request — no retries, no caching. A redirect
    /// response means the dictionary has no entry for the word and yields
    /// `Ok(Entry::default())`, indistinguishable by design from a page whose entry
    /// container is missing.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Request`] if the HTTP request fails due to network issues, a
    /// timeout, or if the server returns a non-successful status code (e.g., 404, 500).
    pub async fn try_lookup(&self, word: &str) -> Result<Entry, Error> {
        let slug = normalize_slug(word);
        let url = self.entry_url(&slug);
        let request = self.client.get(&url);
        let response = request.send().await.map_err(Error::Request)?;

        if is_missing_word(response.status()) {
            #[cfg(feature = "log")]
            tracing::debug!(%url, "request was redirected, treating the entry as missing");

            return Ok(Entry::default());
        }

        match response.error_for_status() {
            Ok(response) => {
                let body = response.text().await.map_err(Error::Request)?;

                Ok(Entry::from_html(body))
            }
            Err(err) => Err(Error::Request(err)),
        }
    }

    /// Builds the absolute URL of the entry page for an already-normalized slug.
    fn entry_url(&self, slug: &str) -> String {
        format!("{base_url}{ENTRY_PATH}{slug}", base_url = self.base_url)
    }
}

impl Default for Client {
    /// Creates a default `Client` instance.
    ///
    /// This is equivalent to calling [`Client::new`].
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a response status is the site's missing-word signal.
///
/// The site never serves an error page for an unknown word; it redirects to a generic
/// landing page instead. With redirects disabled on the client, that shows up as a 3xx
/// status on the first response.
fn is_missing_word(status: StatusCode) -> bool {
    status.is_redirection()
}

/// Normalizes a free-text word or phrase into the URL path segment the site expects.
///
/// The input is trimmed, truncated to 50 characters, lowercased, and internal
/// whitespace is replaced with `-`.
#[must_use]
pub fn normalize_slug(word: &str) -> String {
    word.trim()
        .chars()
        .take(MAX_SLUG_LEN)
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
