//! Command implementations.
//!
//! Every privileged command passes the authentication gate before touching
//! the credential store.

pub mod add;
pub mod get;
pub mod passcode;
pub mod rm;
pub mod status;

use anyhow::Result;
use keygate_core::{
    AuthGate, CacheRequest, Challenger, CredentialTarget, Credentials, Exemption, RecordStore,
};
use tracing::debug;

/// Everything a command needs, resolved from flags, env and config.
pub struct Context<S, C> {
    pub gate: AuthGate<S, C>,
    pub credentials: Credentials<S>,
    pub account: String,
    pub service: String,
    pub label: String,
    pub cache: CacheRequest,
}

impl<S: RecordStore, C: Challenger> Context<S, C> {
    /// Pass the gate for the current account or fail the command.
    pub fn authenticate(&self, reason: &str) -> Result<Exemption> {
        let exemption = self.gate.authenticate(&self.account, reason, &self.cache)?;
        debug!(?exemption, reason, "auth gate passed");
        Ok(exemption)
    }

    pub fn target(&self) -> CredentialTarget {
        CredentialTarget::new(&self.service, &self.account, &self.label)
    }
}
