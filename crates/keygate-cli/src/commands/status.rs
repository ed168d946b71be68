use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use keygate_core::{Challenger, RecordStore};

use super::Context;

/// Show the cached auth state for the account. Reading the cache reveals no
/// secret, so this does not pass the gate.
pub fn run<S: RecordStore, C: Challenger>(ctx: &Context<S, C>, out: &mut impl Write) -> Result<()> {
    let entry = ctx.gate.cached(&ctx.account)?;

    writeln!(out, "account: '{}'", ctx.account)?;
    match entry.expires_at {
        Some(expires_at) if entry.is_fresh_at(Utc::now()) => {
            writeln!(out, "cached until: {}", expires_at.to_rfc3339())?
        }
        Some(expires_at) => writeln!(out, "cached until: expired at {}", expires_at.to_rfc3339())?,
        None => writeln!(out, "cached until: not set")?,
    }
    writeln!(out, "cached attempts: {}", entry.remaining_attempts)?;
    Ok(())
}
