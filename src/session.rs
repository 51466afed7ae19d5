//! Session-scoped key-value snapshot.
//!
//! The engine persists exactly two JSON entries between page loads: the
//! signed-in user and the cart contents. Embedders that want the snapshot to
//! survive beyond this process implement [`SessionStore`] over their own
//! backend; [`MemorySession`] is the default.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Snapshot key for the signed-in user.
pub const USER_KEY: &str = "user";
/// Snapshot key for the cart contents.
pub const CART_KEY: &str = "cart";

pub trait SessionStore: fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Handle shared between the stores that persist through the snapshot. The
/// engine is single-threaded, so `Rc<RefCell<..>>` is sufficient.
pub type SharedSession = Rc<RefCell<dyn SessionStore>>;

#[derive(Debug, Default)]
pub struct MemorySession {
    entries: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Rc::new(RefCell::new(Self::new()))
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
