//! Integration tests for the BrightBuy domain store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brightbuy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_properties` - Store contract on a real storage file
//! - `checkout_flow` - Sign-in, cart, checkout and notifications end to end
//! - `persistence` - Reopening the data file and corrupt-file handling
//! - `admin_dashboard` - Admin metrics and status updates, plus the cart and
//!   order change events
//!
//! Every test gets its own temporary directory, so tests run in parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::error::Error;
use std::path::PathBuf;

use tempfile::TempDir;

use brightbuy_storefront::models::User;
use brightbuy_storefront::{DomainStore, FileStorage};

/// Result type for test helpers.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// A file-backed store in a throwaway directory.
pub struct TestContext {
    dir: TempDir,
    pub store: DomainStore<FileStorage>,
}

impl TestContext {
    /// Empty store backed by `storage.json` in a new temp dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp dir or store cannot be created.
    pub fn new() -> TestResult<Self> {
        let dir = tempfile::tempdir()?;
        let store = DomainStore::open(FileStorage::open(dir.path().join("storage.json"))?)?;
        Ok(Self { dir, store })
    }

    /// Store with the demo accounts installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be created or seeded.
    pub fn seeded() -> TestResult<Self> {
        let ctx = Self::new()?;
        ctx.store.initialize_demo_data()?;
        Ok(ctx)
    }

    /// Seeded store with `email` signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails or no account has that email.
    pub fn signed_in(email: &str) -> TestResult<(Self, User)> {
        let mut ctx = Self::seeded()?;
        let user = ctx
            .store
            .login_user(email, "password")?
            .ok_or_else(|| format!("no account for {email}"))?;
        Ok((ctx, user))
    }

    /// Path of the backing storage file.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Drop the live store and open a fresh one on the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read back.
    pub fn reopen(&mut self) -> TestResult {
        self.store = DomainStore::open(FileStorage::open(self.data_file())?)?;
        Ok(())
    }
}
