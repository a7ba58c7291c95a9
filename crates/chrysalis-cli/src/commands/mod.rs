pub mod build;
pub mod check;
pub mod dump;
pub mod loader;
pub mod qr;
pub mod run;
pub mod trace;
