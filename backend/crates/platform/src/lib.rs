//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Signed bearer tokens (HS256 JWT)
//! - `Authorization` header parsing

pub mod bearer;
pub mod password;
pub mod token;
