//! Identity store.
//!
//! Holds the registered accounts and the currently signed-in principal. The
//! current user is written to the session snapshot under the `user` key and
//! restored on construction; credentials stay in-store and are never
//! serialized into the snapshot.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Email, IdentityEvent, Role, User};
use crate::session::{SharedSession, USER_KEY};
use crate::store::observer::{Subscribers, SubscriptionId};
use crate::{MarketplaceError, Result};

#[derive(Debug)]
struct Account {
    user: User,
    credential: String,
}

#[derive(Debug)]
pub struct IdentityStore {
    accounts: Vec<Account>,
    current: Option<User>,
    session: SharedSession,
    subscribers: Subscribers<IdentityEvent>,
}

impl IdentityStore {
    pub fn new(session: SharedSession) -> Self {
        Self::with_accounts(session, Vec::new())
    }

    /// Builds a store pre-populated with known accounts, e.g. demo data.
    /// Seeds are trusted; emails are assumed distinct.
    pub fn with_accounts(session: SharedSession, accounts: Vec<(User, String)>) -> Self {
        let current = restore(&session);
        Self {
            accounts: accounts
                .into_iter()
                .map(|(user, credential)| Account { user, credential })
                .collect(),
            current,
            session,
            subscribers: Subscribers::default(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_vendor(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |user| user.role == Role::Vendor)
    }

    /// Signs in against the stored accounts. Unknown email and wrong
    /// credential report the same error.
    pub fn login(&mut self, email: &str, credential: &str) -> Result<User> {
        let needle = email.trim().to_lowercase();
        let account = self
            .accounts
            .iter()
            .find(|a| a.user.email.as_str() == needle && a.credential == credential)
            .ok_or(MarketplaceError::InvalidCredentials)?;
        let user = account.user.clone();
        self.current = Some(user.clone());
        self.persist_current();
        info!(user_id = %user.id, "user signed in");
        self.subscribers.notify(&IdentityEvent::LoggedIn {
            user_id: user.id.clone(),
        });
        Ok(user)
    }

    /// Creates an account and signs it in. Fails if the email is already
    /// registered.
    pub fn register(&mut self, name: &str, email: &str, credential: &str, role: Role) -> Result<User> {
        let email = Email::parse(email)?;
        if self.accounts.iter().any(|a| a.user.email == email) {
            return Err(MarketplaceError::EmailInUse(email.to_string()));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            email,
            role,
        };
        self.accounts.push(Account {
            user: user.clone(),
            credential: credential.to_owned(),
        });
        self.current = Some(user.clone());
        self.persist_current();
        info!(user_id = %user.id, role = ?role, "user registered");
        self.subscribers.notify(&IdentityEvent::Registered {
            user_id: user.id.clone(),
        });
        Ok(user)
    }

    pub fn logout(&mut self) {
        if self.current.take().is_none() {
            return;
        }
        self.session.borrow_mut().remove(USER_KEY);
        info!("user signed out");
        self.subscribers.notify(&IdentityEvent::LoggedOut);
    }

    pub fn subscribe(&mut self, listener: impl Fn(&IdentityEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist_current(&self) {
        let Some(user) = &self.current else { return };
        match serde_json::to_string(user) {
            Ok(raw) => self.session.borrow_mut().put(USER_KEY, raw),
            Err(err) => warn!(%err, "failed to serialize user snapshot"),
        }
    }
}

fn restore(session: &SharedSession) -> Option<User> {
    let raw = session.borrow().get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            warn!(%err, "discarding unreadable user snapshot");
            None
        }
    }
}
