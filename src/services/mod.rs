// SPDX-License-Identifier: MIT

//! Services module - collaborators the repositories treat as opaque.

pub mod password;

pub use password::{hash_password, verify_password};
