pub mod discover;
pub mod gen_token;
pub mod logs;

/// Print the version of the CLI.
pub fn print_version() {
    println!("version {}", env!("CARGO_PKG_VERSION"));
}
