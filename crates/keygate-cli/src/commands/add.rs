use std::io::Write;

use anyhow::Result;
use keygate_core::{Challenger, RecordStore};

use super::Context;
use crate::password;

const REASON: &str = "add new keychain entry";

pub fn run<S: RecordStore, C: Challenger>(
    ctx: &Context<S, C>,
    password_flag: Option<&str>,
    update: bool,
    out: &mut impl Write,
) -> Result<()> {
    ctx.authenticate(REASON)?;

    let target = ctx.target();
    target.validate()?;
    let password = password::read_password(password_flag)?;
    let outcome = ctx.credentials.add(&target, &password, update)?;

    writeln!(out, "Successfully {outcome} keychain entry for: {target}")?;
    Ok(())
}
