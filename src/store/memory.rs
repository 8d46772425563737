//! In-memory `Storage` for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use super::Storage;

#[derive(Default)]
struct Inner {
    values: HashMap<String, Vec<u8>>,
    writes: usize,
    fail_writes: bool,
}

/// Cloneable handle; clones share the same backing map so a test can keep one
/// handle while the store owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
    pub fn with(key: &str, bytes: &[u8]) -> Self {
        let s = Self::default();
        s.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), bytes.to_vec());
        s
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().values.get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.writes += 1;
        if inner.fail_writes {
            return Err(io::Error::other("disk full"));
        }
        inner.values.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
