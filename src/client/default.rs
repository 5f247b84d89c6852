//! Process-wide default client used by the convenience entry points.

use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::GenAiConfig;
use crate::error::GenAiResult;

use super::client::GenAiClientImpl;
use super::traits::GenAiClient;

static DEFAULT_CLIENT: Lazy<RwLock<Option<Arc<dyn GenAiClient>>>> = Lazy::new(|| RwLock::new(None));

/// The shared client, built from the environment on first use.
///
/// # Errors
///
/// Fails with `ConfigurationError::MissingApiKey` when no client was
/// configured and neither `GEMINI_API_KEY` nor `GOOGLE_API_KEY` is set.
pub fn default_client() -> GenAiResult<Arc<dyn GenAiClient>> {
    if let Some(client) = DEFAULT_CLIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Ok(Arc::clone(client));
    }

    let mut slot = DEFAULT_CLIENT.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(client) = slot.as_ref() {
        return Ok(Arc::clone(client));
    }

    let client: Arc<dyn GenAiClient> = Arc::new(GenAiClientImpl::from_env()?);
    *slot = Some(Arc::clone(&client));
    Ok(client)
}

/// Replaces the shared client with one built from `config`.
pub fn configure(config: GenAiConfig) -> GenAiResult<()> {
    set_default_client(Arc::new(GenAiClientImpl::new(config)?));
    Ok(())
}

/// Replaces the shared client.
pub fn set_default_client(client: Arc<dyn GenAiClient>) {
    *DEFAULT_CLIENT.write().unwrap_or_else(PoisonError::into_inner) = Some(client);
}

/// Forgets the shared client; the next [`default_client`] call rebuilds it.
pub fn reset_default_client() {
    *DEFAULT_CLIENT.write().unwrap_or_else(PoisonError::into_inner) = None;
}
