use std::io::Write;

use anyhow::Result;
use keygate_core::{Challenger, RecordStore};

use super::Context;

const REASON: &str = "get keychain entry";

pub fn run<S: RecordStore, C: Challenger>(ctx: &Context<S, C>, out: &mut impl Write) -> Result<()> {
    ctx.authenticate(REASON)?;

    let password = ctx.credentials.get(&ctx.target())?;
    writeln!(out, "{password}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use keygate_core::MemoryStore;

    use super::*;
    use crate::commands::testing::{context, Fixed};

    #[test]
    fn test_prints_password() {
        let store = MemoryStore::new();
        let ctx = context(&store, Fixed(true), "GitHub");
        ctx.credentials.add(&ctx.target(), "token123", false).unwrap();

        let mut out = Vec::new();
        run(&ctx, &mut out).unwrap();
        assert_eq!(out, b"token123\n");
    }

    #[test]
    fn test_missing_item() {
        let store = MemoryStore::new();
        let ctx = context(&store, Fixed(true), "GitHub");

        let err = run(&ctx, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "keychain item not found for service='GitHub' account='johndoe'");
    }
}
