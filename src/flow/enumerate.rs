//! Account/role enumeration
//!
//! Turns an access token into a finite, on-demand stream of
//! [`AccountRoleRecord`]s: accounts are listed once up front, roles are
//! fetched per account only as the stream is pulled. A provider failure
//! ends the stream with that error; records already yielded stand.

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use serde::Serialize;

use crate::client::{AccountInfo, SsoApi};
use crate::error::Result;
use crate::flow::filter::NameFilters;

/// One (account, role) pair reachable with a token.
///
/// Carries everything downstream stages need, so each record is
/// independently actionable.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRoleRecord {
    pub account_id: String,
    pub account_name: String,
    pub role_name: String,
    pub region: String,
}

enum State {
    Start,
    Listing {
        pending: VecDeque<AccountInfo>,
        buffered: VecDeque<AccountRoleRecord>,
    },
    Done,
}

/// Stream every (account, role) pair visible to `access_token`.
///
/// Accounts whose display name fails `filters` are skipped before any
/// role call is made. Ordering follows the provider: accounts in listing
/// order, roles in listing order within each account.
pub fn account_roles<'a, C>(
    client: &'a C,
    access_token: &'a str,
    region: &'a str,
    filters: &'a NameFilters,
) -> impl Stream<Item = Result<AccountRoleRecord>> + 'a
where
    C: SsoApi + ?Sized,
{
    stream::unfold(State::Start, move |mut state| async move {
        loop {
            state = match state {
                State::Start => match client.list_accounts(access_token).await {
                    Ok(accounts) => {
                        let pending: VecDeque<AccountInfo> = accounts
                            .into_iter()
                            .filter(|account| filters.matches(&account.account_name))
                            .collect();
                        State::Listing {
                            pending,
                            buffered: VecDeque::new(),
                        }
                    }
                    Err(err) => return Some((Err(err), State::Done)),
                },
                State::Listing {
                    mut pending,
                    mut buffered,
                } => {
                    if let Some(record) = buffered.pop_front() {
                        return Some((Ok(record), State::Listing { pending, buffered }));
                    }

                    let Some(account) = pending.pop_front() else {
                        return None;
                    };

                    match client
                        .list_account_roles(access_token, &account.account_id)
                        .await
                    {
                        Ok(roles) => {
                            buffered.extend(roles.into_iter().map(|role| AccountRoleRecord {
                                account_id: account.account_id.clone(),
                                account_name: account.account_name.clone(),
                                role_name: role.role_name,
                                region: region.to_string(),
                            }));
                            // An account with no roles just falls through
                            // to the next one
                            State::Listing { pending, buffered }
                        }
                        Err(err) => return Some((Err(err), State::Done)),
                    }
                }
                State::Done => return None,
            };
        }
    })
}
