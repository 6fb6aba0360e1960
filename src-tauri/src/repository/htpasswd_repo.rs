//! Htpasswd Repository
//!
//! Registry accounts as `name:hash` lines, the format Verdaccio's htpasswd
//! auth plugin reads. Hashes are bcrypt. Line order is preserved on rewrite.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::domain::{validate_password, validate_username, DomainError, DomainResult, UserInfo};

/// Parsed htpasswd file: `(username, hash)` in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Htpasswd {
    entries: Vec<(String, String)>,
}

impl Htpasswd {
    /// Blank lines and `#` comments are skipped, as are lines without a separator
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(user, hash)| (user.to_string(), hash.to_string()))
            .collect();
        Self { entries }
    }

    pub fn render(&self) -> String {
        let mut out: String = self
            .entries
            .iter()
            .map(|(user, hash)| format!("{}:{}", user, hash))
            .collect::<Vec<_>>()
            .join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(user, _)| user.as_str())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.entries.iter().any(|(user, _)| user == username)
    }

    #[cfg(test)]
    pub fn hash_of(&self, username: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(user, _)| user == username)
            .map(|(_, hash)| hash.as_str())
    }

    fn insert(&mut self, username: &str, hash: String) -> DomainResult<()> {
        if self.contains(username) {
            return Err(DomainError::Conflict(format!("user {} already exists", username)));
        }
        self.entries.push((username.to_string(), hash));
        Ok(())
    }

    fn replace(&mut self, username: &str, hash: String) -> DomainResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|(user, _)| user == username)
            .ok_or_else(|| DomainError::NotFound(format!("user {}", username)))?;
        entry.1 = hash;
        Ok(())
    }

    fn remove(&mut self, username: &str) -> DomainResult<()> {
        let before = self.entries.len();
        self.entries.retain(|(user, _)| user != username);
        if self.entries.len() == before {
            return Err(DomainError::NotFound(format!("user {}", username)));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct HtpasswdRepository {
    path: PathBuf,
    cost: u32,
}

impl HtpasswdRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cost(path, bcrypt::DEFAULT_COST)
    }

    /// Custom bcrypt cost; tests use the minimum to stay fast
    pub fn with_cost(path: impl Into<PathBuf>, cost: u32) -> Self {
        Self { path: path.into(), cost }
    }

    fn load(&self) -> DomainResult<Htpasswd> {
        if !self.path.exists() {
            return Ok(Htpasswd::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(DomainError::io(format!("reading {}", self.path.display())))?;
        Ok(Htpasswd::parse(&content))
    }

    fn store(&self, file: &Htpasswd) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(DomainError::io(format!("creating {}", parent.display())))?;
        }
        fs::write(&self.path, file.render())
            .map_err(DomainError::io(format!("writing {}", self.path.display())))
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {}", e)))
    }

    pub fn list(&self) -> DomainResult<Vec<UserInfo>> {
        Ok(self.load()?.usernames().map(UserInfo::new).collect())
    }

    pub fn count(&self) -> DomainResult<usize> {
        Ok(self.load()?.len())
    }

    pub fn add(&self, username: &str, password: &str) -> DomainResult<()> {
        validate_username(username)?;
        validate_password(password)?;
        let mut file = self.load()?;
        if file.contains(username) {
            return Err(DomainError::Conflict(format!("user {} already exists", username)));
        }
        file.insert(username, self.hash(password)?)?;
        self.store(&file)?;
        info!(user = username, "user added");
        Ok(())
    }

    pub fn delete(&self, username: &str) -> DomainResult<()> {
        let mut file = self.load()?;
        file.remove(username)?;
        self.store(&file)?;
        info!(user = username, "user deleted");
        Ok(())
    }

    pub fn change_password(&self, username: &str, new_password: &str) -> DomainResult<()> {
        validate_password(new_password)?;
        let mut file = self.load()?;
        if !file.contains(username) {
            return Err(DomainError::NotFound(format!("user {}", username)));
        }
        file.replace(username, self.hash(new_password)?)?;
        self.store(&file)?;
        info!(user = username, "password changed");
        Ok(())
    }

    /// Check `password` against the stored hash
    #[cfg(test)]
    pub fn verify(&self, username: &str, password: &str) -> DomainResult<bool> {
        let file = self.load()?;
        let hash = file
            .hash_of(username)
            .ok_or_else(|| DomainError::NotFound(format!("user {}", username)))?;
        bcrypt::verify(password, hash)
            .map_err(|e| DomainError::Internal(format!("unreadable password hash: {}", e)))
    }
}
