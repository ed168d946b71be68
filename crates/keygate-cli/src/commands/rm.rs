use std::io::Write;

use anyhow::Result;
use keygate_core::{Challenger, RecordStore};

use super::Context;

const REASON: &str = "remove keychain entry";

pub fn run<S: RecordStore, C: Challenger>(ctx: &Context<S, C>, out: &mut impl Write) -> Result<()> {
    ctx.authenticate(REASON)?;

    let target = ctx.target();
    ctx.credentials.remove(&target)?;

    writeln!(out, "Successfully deleted keychain entry for: {target}")?;
    Ok(())
}
