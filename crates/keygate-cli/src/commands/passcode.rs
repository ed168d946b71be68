use std::io::{self, Write};

use anyhow::{bail, Result};
use keygate_core::{Challenger, PasscodeChallenger, RecordStore};

use super::Context;

/// Set or replace the device passcode. Replacing an existing passcode
/// requires passing the gate first.
pub fn set<S, C, P>(
    ctx: &Context<S, C>,
    passcodes: &PasscodeChallenger<P>,
    read: impl Fn(&str) -> io::Result<String>,
    out: &mut impl Write,
) -> Result<()>
where
    S: RecordStore,
    C: Challenger,
    P: RecordStore,
{
    if passcodes.is_configured()? {
        ctx.authenticate("change device passcode")?;
    }

    let passcode = read("New passcode: ")?;
    let confirmation = read("Confirm passcode: ")?;
    if passcode != confirmation {
        bail!("passcodes do not match");
    }
    passcodes.set_passcode(&passcode)?;

    writeln!(out, "Device passcode set")?;
    Ok(())
}

pub fn clear<S, C, P>(
    ctx: &Context<S, C>,
    passcodes: &PasscodeChallenger<P>,
    out: &mut impl Write,
) -> Result<()>
where
    S: RecordStore,
    C: Challenger,
    P: RecordStore,
{
    ctx.authenticate("clear device passcode")?;
    passcodes.clear_passcode()?;

    writeln!(out, "Device passcode cleared")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use keygate_core::{AuthMethod, MemoryStore};

    use super::*;
    use crate::commands::testing::context;

    fn replay(answers: &[&str]) -> impl Fn(&str) -> io::Result<String> + 'static {
        let queue = RefCell::new(answers.iter().rev().map(|a| a.to_string()).collect::<Vec<_>>());
        move |_prompt: &str| {
            queue
                .borrow_mut()
                .pop()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
        }
    }

    #[test]
    fn test_first_set_needs_no_gate() {
        let store = MemoryStore::new();
        let passcodes = PasscodeChallenger::new(&store, replay(&["1234"]));
        let ctx = context(&store, &passcodes, "");

        let mut out = Vec::new();
        set(&ctx, &passcodes, replay(&["1234", "1234"]), &mut out).unwrap();

        assert_eq!(out, b"Device passcode set\n");
        assert!(passcodes.challenge(AuthMethod::Any, "check").unwrap());
    }

    #[test]
    fn test_mismatch() {
        let store = MemoryStore::new();
        let passcodes = PasscodeChallenger::new(&store, replay(&[]));
        let ctx = context(&store, &passcodes, "");

        let err = set(&ctx, &passcodes, replay(&["1234", "4321"]), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "passcodes do not match");
        assert!(!passcodes.is_configured().unwrap());
    }

    #[test]
    fn test_change_requires_old_passcode() {
        let store = MemoryStore::new();
        let passcodes = PasscodeChallenger::new(&store, replay(&["wrong", "wrong", "wrong"]));
        passcodes.set_passcode("1234").unwrap();
        let ctx = context(&store, &passcodes, "");

        let err = set(&ctx, &passcodes, replay(&["5678", "5678"]), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "authentication failed");
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let passcodes = PasscodeChallenger::new(&store, replay(&["1234"]));
        passcodes.set_passcode("1234").unwrap();
        let ctx = context(&store, &passcodes, "");

        clear(&ctx, &passcodes, &mut Vec::new()).unwrap();
        assert!(!passcodes.is_configured().unwrap());
    }
}
