//! User directory: the identity provider backing authentication and the
//! role lookups used by reservation priority.

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};

pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The built-in accounts every fresh process starts with
    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                username: "librarian".to_string(),
                password: "password".to_string(),
                name: "Admin User".to_string(),
                role: Role::Librarian,
            },
            User {
                username: "student".to_string(),
                password: "password".to_string(),
                name: "John Doe".to_string(),
                role: Role::Student,
            },
            User {
                username: "teacher".to_string(),
                password: "password".to_string(),
                name: "Jane Smith".to_string(),
                role: Role::Teacher,
            },
        ])
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn role_of(&self, username: &str) -> Option<Role> {
        self.get(username).map(|u| u.role)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
    }

    pub fn register(&mut self, user: User) -> AppResult<User> {
        if self.get(&user.username).is_some() {
            return Err(AppError::AlreadyExists("Username already exists.".to_string()));
        }
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
