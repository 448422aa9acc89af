//! Platform directories and the invoking user.

pub mod xdg_root;

pub use xdg_root::current_user;
