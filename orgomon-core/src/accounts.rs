// File: orgomon-core/src/accounts.rs

use tracing::debug;

use crate::models::AccountDescriptor;

/// Walks `<PREFIX>_KEY_<N>` / `<PREFIX>_COMP_<N>` from `start_index` upward
/// and stops at the first index where either value is missing or blank.
///
/// Later pairs after a gap are ignored. An empty result is not an error.
pub fn load_accounts<F>(prefix: &str, start_index: u32, lookup: F) -> Vec<AccountDescriptor>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |name: String| lookup(&name).filter(|v| !v.is_empty());

    let mut accounts = Vec::new();
    let mut index = start_index;
    loop {
        let key = present(format!("{prefix}_KEY_{index}"));
        let comp = present(format!("{prefix}_COMP_{index}"));
        let (Some(credential_key), Some(computer_id)) = (key, comp) else {
            debug!("Account enumeration stopped at index {}", index);
            break;
        };
        accounts.push(AccountDescriptor {
            index,
            credential_key,
            computer_id,
        });
        match index.checked_add(1) {
            Some(next) => index = next,
            None => break,
        }
    }
    accounts
}

/// Same as [`load_accounts`] but against the real process environment.
pub fn load_accounts_from_env(prefix: &str, start_index: u32) -> Vec<AccountDescriptor> {
    load_accounts(prefix, start_index, |name| std::env::var(name).ok())
}
